use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::corpus::{Gender, Selection};

/// Language used when none is requested.
pub const DEFAULT_LANGUAGE: &str = "francais";

/// Input parameters of a generation request.
///
/// # Responsibilities
/// - Track generation parameters (`count`, `max_length`, `max_attempts`, `seed`)
/// - Track the language/gender selection, which can never be empty
/// - Track the diagnostic options (statistics export, attempt report)
///
/// # Defaults
/// - 10 names, `francais`, all genders, at most 8 characters
/// - no export, no attempt report, no attempt ceiling, random seed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
	/// Number of names to produce.
	pub count: usize,

	/// Languages pooled together.
	languages: Vec<String>,

	/// Genders pooled together.
	genders: Vec<Gender>,

	/// Maximum length of a generated name, in characters.
	pub max_length: usize,

	/// Write the syllable statistics to `export_dir`.
	pub export_statistics: bool,

	/// Folder receiving the statistics export.
	pub export_dir: PathBuf,

	/// Report the number of attempts on the outcome.
	pub report_attempts: bool,

	/// Give up after this many attempts. `None` retries until done.
	pub max_attempts: Option<usize>,

	/// Seed of the random generator. `None` uses OS entropy.
	pub seed: Option<u64>,
}

impl Default for GenerationRequest {
	fn default() -> Self {
		Self {
			count: 10,
			languages: vec![DEFAULT_LANGUAGE.to_owned()],
			genders: Gender::ALL.to_vec(),
			max_length: 8,
			export_statistics: false,
			export_dir: PathBuf::from("syllables"),
			report_attempts: false,
			max_attempts: None,
			seed: None,
		}
	}
}

impl GenerationRequest {
	/// Creates a request for `count` names with default settings.
	pub fn new(count: usize) -> Self {
		Self { count, ..Self::default() }
	}

	pub fn languages(&self) -> &[String] {
		&self.languages
	}

	pub fn genders(&self) -> &[Gender] {
		&self.genders
	}

	/// Sets the languages to pool.
	///
	/// Tags are trimmed, lowercased and deduplicated.
	///
	/// # Errors
	/// Returns an error if no language remains.
	pub fn set_languages<I, S>(&mut self, languages: I) -> Result<(), String>
	where
		I: IntoIterator<Item=S>,
		S: AsRef<str>,
	{
		let mut cleaned: Vec<String> = Vec::new();
		for language in languages {
			let language = language.as_ref().trim().to_lowercase();
			if !language.is_empty() && !cleaned.contains(&language) {
				cleaned.push(language);
			}
		}
		if cleaned.is_empty() {
			return Err("At least one language is required".to_owned());
		}
		self.languages = cleaned;
		Ok(())
	}

	/// Sets the genders to pool.
	///
	/// # Errors
	/// Returns an error if the list is empty.
	pub fn set_genders(&mut self, genders: &[Gender]) -> Result<(), String> {
		let mut cleaned: Vec<Gender> = Vec::new();
		for gender in genders {
			if !cleaned.contains(gender) {
				cleaned.push(*gender);
			}
		}
		if cleaned.is_empty() {
			return Err("At least one gender is required".to_owned());
		}
		self.genders = cleaned;
		Ok(())
	}

	/// The selection this request reads from the corpus.
	pub fn selection(&self) -> Selection {
		Selection::new(self.languages.iter().cloned(), &self.genders)
	}

	/// Checks settings that would make generation impossible.
	///
	/// A generated name holds at least two syllables, so `max_length` must
	/// allow two characters.
	pub fn validate(&self) -> Result<(), String> {
		if self.max_length < 2 {
			return Err(format!("max_length must be at least 2, got {}", self.max_length));
		}
		if self.max_attempts == Some(0) && self.count > 0 {
			return Err("max_attempts must be positive".to_owned());
		}
		if self.languages.is_empty() || self.genders.is_empty() {
			return Err("Selection cannot be empty".to_owned());
		}
		Ok(())
	}
}
