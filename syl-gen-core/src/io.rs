use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::env;

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
/// - Falls back to Windows-1252 when the file is not valid UTF-8
///   (older name corpora are ANSI encoded)
pub fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let bytes = fs::read(filename)?;
	let contents = match String::from_utf8(bytes) {
		Ok(contents) => contents,
		Err(e) => e.into_bytes().into_iter().map(decode_windows_1252).collect(),
	};
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Characters of Windows-1252 bytes `0x80..=0x9F`.
/// Unassigned bytes keep their C1 control code point.
const WINDOWS_1252_HIGH: [char; 32] = [
	'€', '\u{81}', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', '\u{8d}', 'Ž', '\u{8f}',
	'\u{90}', '‘', '’', '“', '”', '•', '–', '—', '˜', '™', 'š', '›', 'œ', '\u{9d}', 'ž', 'Ÿ',
];

fn decode_windows_1252(byte: u8) -> char {
	match byte {
		0x80..=0x9f => WINDOWS_1252_HIGH[usize::from(byte - 0x80)],
		_ => char::from(byte),
	}
}

/// Resolves the folder holding the corpus files.
///
/// An empty path, `"."` or `"./"` means the current working directory.
///
/// # Errors
/// Returns `NotFound` if the path is not an existing directory.
pub fn corpus_folder(input: &Path) -> io::Result<PathBuf> {
	let folder = if input.as_os_str().is_empty() || input == Path::new(".") {
		env::current_dir()?
	} else {
		input.to_path_buf()
	};

	if !folder.is_dir() {
		return Err(io::Error::new(
			io::ErrorKind::NotFound,
			format!("expected a corpus directory, got: {}", folder.display()),
		));
	}
	Ok(folder)
}

/// Lists the files of a directory, optionally restricted to one extension.
///
/// Returns file names only (no paths), sorted so loading order is stable.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: Option<&str>) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let entry = entry?;
		let path = entry.path();

		if !path.is_file() {
			continue;
		}
		if let Some(extension) = extension {
			if path.extension() != Some(std::ffi::OsStr::new(extension)) {
				continue;
			}
		}
		if let Some(name) = path.file_name() {
			files.push(name.to_string_lossy().to_string());
		}
	}

	files.sort();
	Ok(files)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reads_utf8_and_latin1() {
		let dir = tempfile::tempdir().unwrap();
		let utf8 = dir.path().join("a.txt");
		let latin1 = dir.path().join("b.txt");
		fs::write(&utf8, "f Zoé\r\nm Léo\n").unwrap();
		fs::write(&latin1, b"f Zo\xe9\n").unwrap();

		assert_eq!(read_file(&utf8).unwrap(), vec!["f Zoé", "m Léo"]);
		assert_eq!(read_file(&latin1).unwrap(), vec!["f Zoé"]);
	}

	#[test]
	fn ansi_ligatures_are_decoded() {
		let dir = tempfile::tempdir().unwrap();
		let ansi = dir.path().join("c.txt");
		fs::write(&ansi, b"f Chlo\xeb\nm \x9fves\nf Aur\x9clie\n\x80\x8c\x81").unwrap();

		assert_eq!(read_file(&ansi).unwrap(), vec!["f Chloë", "m Ÿves", "f Aurœlie", "€Œ\u{81}"]);
	}

	#[test]
	fn lists_files_by_extension() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("b-x.txt"), "").unwrap();
		fs::write(dir.path().join("a-y.txt"), "").unwrap();
		fs::write(dir.path().join("c.bin"), "").unwrap();
		fs::create_dir(dir.path().join("sub")).unwrap();

		assert_eq!(list_files(dir.path(), Some("txt")).unwrap(), vec!["a-y.txt", "b-x.txt"]);
		assert_eq!(list_files(dir.path(), None).unwrap().len(), 3);
	}

	#[test]
	fn resolves_corpus_folder() {
		let dir = tempfile::tempdir().unwrap();
		let file = dir.path().join("prenoms-orc.txt");
		fs::write(&file, "m Ugo").unwrap();

		assert_eq!(corpus_folder(dir.path()).unwrap(), dir.path());
		assert_eq!(corpus_folder(Path::new("./")).unwrap(), env::current_dir().unwrap());
		assert_eq!(corpus_folder(&file).unwrap_err().kind(), io::ErrorKind::NotFound);
	}
}
