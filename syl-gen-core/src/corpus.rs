use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::io::{list_files, read_file};

/// Gender tag found at the start of every corpus line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gender {
	#[serde(rename = "m")]
	Male,
	#[serde(rename = "f")]
	Female,
	#[serde(rename = "x")]
	Neutral,
}

impl Gender {
	pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Neutral];

	/// Single character used in the corpus files.
	pub fn tag(self) -> char {
		match self {
			Gender::Male => 'm',
			Gender::Female => 'f',
			Gender::Neutral => 'x',
		}
	}

	pub fn from_tag(tag: char) -> Option<Self> {
		match tag.to_ascii_lowercase() {
			'm' => Some(Gender::Male),
			'f' => Some(Gender::Female),
			'x' => Some(Gender::Neutral),
			_ => None,
		}
	}

	/// Parses a run of tags such as `"mf"` or `"m,f,x"`.
	///
	/// # Errors
	/// Returns an error on any unknown tag.
	pub fn parse_tags(tags: &str) -> Result<Vec<Self>, String> {
		let mut genders = Vec::new();
		for c in tags.chars().filter(|c| !c.is_whitespace() && *c != ',') {
			let gender = Gender::from_tag(c).ok_or_else(|| format!("Unknown gender tag '{}'", c))?;
			if !genders.contains(&gender) {
				genders.push(gender);
			}
		}
		Ok(genders)
	}
}

impl fmt::Display for Gender {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.tag())
	}
}

/// The languages and genders a table is built from.
///
/// Displayed as `[francais, allemand] | [m, f]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
	pub languages: Vec<String>,
	pub genders: Vec<Gender>,
}

impl Selection {
	pub fn new<L, S>(languages: L, genders: &[Gender]) -> Self
	where
		L: IntoIterator<Item=S>,
		S: Into<String>,
	{
		Self {
			languages: languages.into_iter().map(Into::into).collect(),
			genders: genders.to_vec(),
		}
	}

	pub fn contains(&self, language: &str, gender: Gender) -> bool {
		self.genders.contains(&gender) && self.languages.iter().any(|l| l == language)
	}

	/// Tag used to name exported files: `francais-allemand-mf`.
	pub fn file_tag(&self) -> String {
		let genders: String = self.genders.iter().map(|g| g.tag()).collect();
		let mut parts = self.languages.clone();
		parts.push(genders);
		parts.join("-")
	}
}

impl fmt::Display for Selection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let genders: Vec<String> = self.genders.iter().map(Gender::to_string).collect();
		write!(f, "[{}] | [{}]", self.languages.join(", "), genders.join(", "))
	}
}

/// One name of the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusEntry {
	pub language: String,
	pub gender: Gender,
	pub name: String,
}

/// Real names grouped by language and gender.
///
/// Loaded from a folder of files named `<anything>-<language>.<ext>`, where
/// each line is a gender tag, one separator character, then the name:
///
/// ```text
/// f Élodie
/// m;Bernard
/// ```
#[derive(Debug, Clone, Default)]
pub struct Corpus {
	entries: Vec<CorpusEntry>,
}

impl Corpus {
	/// Builds a corpus from already parsed entries.
	pub fn from_entries<I: IntoIterator<Item=CorpusEntry>>(entries: I) -> Self {
		Self { entries: entries.into_iter().collect() }
	}

	/// Loads every corpus file of a folder.
	///
	/// # Errors
	/// Returns an error if the folder cannot be listed or a file cannot be read.
	///
	/// # Notes
	/// - Files whose name has no `-<language>` part are ignored.
	/// - Subdirectories are ignored.
	pub fn load<P: AsRef<Path>>(folder: P) -> io::Result<Self> {
		let folder = folder.as_ref();
		let mut corpus = Self::default();

		for file in list_files(folder, None)? {
			let Some(language) = Self::language_of(&file) else {
				log::debug!("skipping '{}': no language in file name", file);
				continue;
			};
			let lines = read_file(folder.join(&file))?;
			let before = corpus.entries.len();
			corpus.entries.extend(lines.iter().filter_map(|line| Self::parse_line(&language, line)));
			log::debug!("loaded {} names for '{}' from '{}'", corpus.entries.len() - before, language, file);
		}

		Ok(corpus)
	}

	/// Language tag encoded in a corpus file name.
	///
	/// `prenoms-francais.txt` → `francais`
	pub fn language_of(file: &str) -> Option<String> {
		let stem = Path::new(file).file_stem()?.to_str()?;
		let language = stem.split('-').nth(1)?.trim().to_lowercase();
		if language.is_empty() { None } else { Some(language) }
	}

	/// Parses one corpus line: gender tag, separator, name.
	///
	/// Returns `None` for blank lines, unknown tags and empty names.
	pub fn parse_line(language: &str, line: &str) -> Option<CorpusEntry> {
		let mut chars = line.chars();
		let gender = Gender::from_tag(chars.next()?)?;
		chars.next()?;
		let name = chars.as_str().trim().to_lowercase();
		if name.is_empty() {
			return None;
		}
		Some(CorpusEntry { language: language.to_owned(), gender, name })
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Sorted list of languages present in the corpus.
	pub fn languages(&self) -> Vec<String> {
		self.entries
			.iter()
			.map(|e| e.language.clone())
			.collect::<BTreeSet<_>>()
			.into_iter()
			.collect()
	}

	/// Names matching the selection, in corpus order.
	pub fn names(&self, selection: &Selection) -> Vec<String> {
		self.entries
			.iter()
			.filter(|e| selection.contains(&e.language, e.gender))
			.map(|e| e.name.clone())
			.collect()
	}

	/// Same names as [`Corpus::names`], as an exclusion set.
	pub fn name_set(&self, selection: &Selection) -> HashSet<String> {
		self.names(selection).into_iter().collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;

	#[test]
	fn parses_lines() {
		let entry = Corpus::parse_line("francais", "f Élodie \r").unwrap();
		assert_eq!(entry.gender, Gender::Female);
		assert_eq!(entry.name, "élodie");

		assert_eq!(Corpus::parse_line("francais", "m;Bernard").unwrap().name, "bernard");
		assert!(Corpus::parse_line("francais", "").is_none());
		assert!(Corpus::parse_line("francais", "m").is_none());
		assert!(Corpus::parse_line("francais", "m   ").is_none());
		assert!(Corpus::parse_line("francais", "q Quentin").is_none());
	}

	#[test]
	fn language_from_file_name() {
		assert_eq!(Corpus::language_of("prenoms-francais.txt").as_deref(), Some("francais"));
		assert_eq!(Corpus::language_of("names-Orc.dat").as_deref(), Some("orc"));
		assert_eq!(Corpus::language_of("readme.md"), None);
	}

	#[test]
	fn parses_gender_tags() {
		assert_eq!(Gender::parse_tags("m,f").unwrap(), vec![Gender::Male, Gender::Female]);
		assert_eq!(Gender::parse_tags("xx").unwrap(), vec![Gender::Neutral]);
		assert!(Gender::parse_tags("mz").is_err());
	}

	#[test]
	fn selection_display_and_tag() {
		let selection = Selection::new(["francais", "allemand"], &[Gender::Male, Gender::Female]);
		assert_eq!(selection.to_string(), "[francais, allemand] | [m, f]");
		assert_eq!(selection.file_tag(), "francais-allemand-mf");
	}

	#[test]
	fn loads_and_filters_folder() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("prenoms-francais.txt"), "f Marie\nm Paul\nx Camille\n").unwrap();
		fs::write(dir.path().join("prenoms-allemand.txt"), "f Greta\nm Klaus\n").unwrap();
		fs::write(dir.path().join("notes.txt"), "f Ignored\n").unwrap();
		// ANSI encoded "f Héloïse"
		fs::write(dir.path().join("old-latin.txt"), b"f H\xe9lo\xefse\n").unwrap();

		let corpus = Corpus::load(dir.path()).unwrap();
		assert_eq!(corpus.len(), 6);
		assert_eq!(corpus.languages(), vec!["allemand", "francais", "latin"]);

		let selection = Selection::new(["francais"], &[Gender::Female, Gender::Neutral]);
		assert_eq!(corpus.names(&selection), vec!["marie", "camille"]);

		let latin = Selection::new(["latin"], &Gender::ALL);
		assert_eq!(corpus.names(&latin), vec!["héloïse"]);
	}
}
