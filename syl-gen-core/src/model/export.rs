use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::ExportError;
use super::transition_table::TransitionTable;

/// Path of the statistics file for a table inside `folder`.
///
/// `syllables/` + `[francais] | [m, f]` → `syllables/syllables-francais-mf.json`
pub fn statistics_path<P: AsRef<Path>>(folder: P, table: &TransitionTable) -> PathBuf {
	folder
		.as_ref()
		.join(format!("syllables-{}.json", table.selection().file_tag()))
}

/// Writes the successor lists of a table as pretty JSON.
///
/// Keys are sorted and non-ASCII characters are written as-is.
/// The folder is created if missing.
///
/// # Errors
/// Returns an error if the folder or the file cannot be written.
pub fn export_statistics<P: AsRef<Path>>(folder: P, table: &TransitionTable) -> Result<PathBuf, ExportError> {
	let folder = folder.as_ref();
	fs::create_dir_all(folder)?;

	let path = statistics_path(folder, table);
	let mut writer = BufWriter::new(File::create(&path)?);
	serde_json::to_writer_pretty(&mut writer, &table.successor_lists())?;
	writer.flush()?;

	log::info!("syllable statistics written to {}", path.display());
	Ok(path)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::BTreeMap;
	use crate::corpus::{Gender, Selection};

	#[test]
	fn writes_sorted_successor_lists() {
		let dir = tempfile::tempdir().unwrap();
		let selection = Selection::new(["francais"], &[Gender::Female, Gender::Neutral]);
		let table = TransitionTable::from_names(selection, ["hélène", "elena", "elana"]);

		let path = export_statistics(dir.path().join("out"), &table).unwrap();
		assert!(path.ends_with("syllables-francais-fx.json"));

		let contents = fs::read_to_string(&path).unwrap();
		assert!(contents.contains("\"hé\""));
		let lists: BTreeMap<String, Vec<String>> = serde_json::from_str(&contents).unwrap();
		assert_eq!(lists, table.successor_lists());
		assert_eq!(lists["e"], vec!["la", "le"]);
	}

	#[test]
	fn reports_unwritable_folder() {
		let dir = tempfile::tempdir().unwrap();
		let blocker = dir.path().join("file");
		fs::write(&blocker, "").unwrap();

		let table = TransitionTable::from_names(Selection::default(), ["elena"]);
		assert!(matches!(export_statistics(&blocker, &table), Err(ExportError::Io(_))));
	}
}
