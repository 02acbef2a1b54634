use std::collections::HashSet;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::corpus::{Corpus, Selection};
use crate::error::GenerationError;
use crate::io;
use super::export::export_statistics;
use super::generation_request::GenerationRequest;
use super::transition_table::TransitionTable;

/// Names produced by [`generate`] and the number of walks it took.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generation {
	pub names: Vec<String>,
	pub attempts: usize,
}

/// Result of a full generation request.
///
/// `attempts` is only filled when the request asked for it.
/// `export_error` holds the reason a requested statistics export failed;
/// the names are returned regardless.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOutcome {
	pub names: Vec<String>,
	pub attempts: Option<usize>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub export_error: Option<String>,
}

/// Walks the table once and returns the candidate name.
///
/// - Starts on a uniformly random syllable, then always takes one successor
/// - Keeps following weighted successors while the last syllable has one
///   and the next syllable still fits in `max_length` characters
///
/// Returns `None` if the table is empty or if the first two syllables
/// already exceed `max_length`.
pub fn walk<R: Rng + ?Sized>(table: &TransitionTable, max_length: usize, rng: &mut R) -> Option<String> {
	let start = table.random_start(rng)?;
	let mut current = table.next(start, rng)?;

	let mut name = format!("{start}{current}");
	let mut length = name.chars().count();
	if length > max_length {
		return None;
	}

	while let Some(next) = table.next(current, rng) {
		let next_length = length + next.chars().count();
		if next_length > max_length {
			break;
		}
		name.push_str(next);
		length = next_length;
		current = next;
	}

	Some(name)
}

/// Generates `target_count` distinct names absent from `excluded`.
///
/// Every walk counts as an attempt, accepted or not.
///
/// # Errors
/// - `EmptyModel` if the table has no transition, before any sampling.
/// - `LengthUnreachable` if no `key + successor` pair fits in `max_length`,
///   before any sampling.
/// - `AttemptsExhausted` if `max_attempts` is set and reached. The names
///   found so far are returned inside the error.
///
/// # Notes
/// Without `max_attempts` the loop only ends once enough names are found:
/// a sparse table combined with a large `target_count` can run forever.
pub fn generate<R: Rng + ?Sized>(
	table: &TransitionTable,
	excluded: &HashSet<String>,
	target_count: usize,
	max_length: usize,
	max_attempts: Option<usize>,
	rng: &mut R,
) -> Result<Generation, GenerationError> {
	let shortest = match table.shortest_pair_length() {
		Some(shortest) => shortest,
		None => return Err(GenerationError::EmptyModel(table.selection().clone())),
	};
	if shortest > max_length {
		return Err(GenerationError::LengthUnreachable {
			selection: table.selection().clone(),
			max_length,
			shortest,
		});
	}

	let mut names: Vec<String> = Vec::with_capacity(target_count);
	let mut seen: HashSet<String> = HashSet::with_capacity(target_count);
	let mut attempts = 0;

	while names.len() < target_count {
		if let Some(limit) = max_attempts {
			if attempts >= limit {
				return Err(GenerationError::AttemptsExhausted {
					attempts,
					requested: target_count,
					generated: names,
				});
			}
		}
		attempts += 1;

		let Some(candidate) = walk(table, max_length, rng) else {
			continue;
		};
		if excluded.contains(&candidate) || seen.contains(&candidate) {
			continue;
		}
		seen.insert(candidate.clone());
		names.push(candidate);
	}

	log::debug!("{} names generated in {} attempts", names.len(), attempts);
	Ok(Generation { names, attempts })
}

/// High-level generator working on a name corpus.
///
/// # Responsibilities
/// - Load the corpus files of a folder
/// - Build a fresh transition table for every request
/// - Run the random walk and filter out real names
///
/// Requests share nothing mutable: each one owns its table, its exclusion
/// set and its random generator, so `generate_names` only needs `&self`.
#[derive(Debug, Clone, Default)]
pub struct Generator {
	corpus: Corpus
}

impl Generator {
	/// Creates a generator by loading every corpus file of a directory.
	///
	/// # Parameters
	/// - `filepath`: Path to a directory containing corpus files.
	///   `"."` loads the current working directory.
	///
	/// # Errors
	/// - Returns an error if the path does not exist or is not a directory.
	/// - Returns an error if a corpus file cannot be read.
	pub fn new<P: AsRef<Path>>(filepath: P) -> Result<Self, GenerationError> {
		let folder = io::corpus_folder(filepath.as_ref())?;
		let corpus = Corpus::load(&folder)?;
		log::info!("loaded {} names from {}", corpus.len(), folder.display());
		Ok(Self::from_corpus(corpus))
	}

	/// Creates a generator over an in-memory corpus.
	pub fn from_corpus(corpus: Corpus) -> Self {
		Self { corpus }
	}

	pub fn corpus(&self) -> &Corpus {
		&self.corpus
	}

	/// Languages available in the corpus.
	pub fn get_languages(&self) -> Vec<String> {
		self.corpus.languages()
	}

	/// Builds the transition table of a selection.
	pub fn build_table(&self, selection: &Selection) -> TransitionTable {
		TransitionTable::from_names(selection.clone(), self.corpus.names(selection))
	}

	/// Runs a full generation request.
	///
	/// # Behavior
	/// - Builds the table and the real-name set of the request selection.
	/// - Exports the statistics if requested. A failed export is logged and
	///   reported on the outcome, never returned as an error.
	/// - Fails with `EmptyModel` if the selection has no transition.
	/// - Seeds the random generator from `request.seed` when set.
	pub fn generate_names(&self, request: &GenerationRequest) -> Result<GenerationOutcome, GenerationError> {
		request.validate().map_err(GenerationError::InvalidRequest)?;

		let selection = request.selection();
		let table = self.build_table(&selection);
		let excluded = self.corpus.name_set(&selection);

		let mut export_error = None;
		if request.export_statistics {
			if let Err(e) = export_statistics(&request.export_dir, &table) {
				log::warn!("could not export syllable statistics for {}: {}", selection, e);
				export_error = Some(e.to_string());
			}
		}

		let mut rng = match request.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_os_rng(),
		};

		let generation = generate(
			&table,
			&excluded,
			request.count,
			request.max_length,
			request.max_attempts,
			&mut rng,
		)?;

		if request.report_attempts {
			log::info!("{} names generated in {} attempts", generation.names.len(), generation.attempts);
		}

		Ok(GenerationOutcome {
			names: generation.names,
			attempts: request.report_attempts.then_some(generation.attempts),
			export_error,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::corpus::{CorpusEntry, Gender};

	const FRENCH: [&str; 12] = [
		"melina", "selina", "malina", "salome", "melodie", "rosalie",
		"rosine", "marine", "sabine", "nadine", "caroline", "delphine",
	];

	fn table() -> TransitionTable {
		TransitionTable::from_names(Selection::new(["francais"], &[Gender::Female]), FRENCH)
	}

	fn corpus() -> Corpus {
		let french = FRENCH.iter().map(|name| CorpusEntry {
			language: "francais".to_owned(),
			gender: Gender::Female,
			name: name.to_string(),
		});
		let orc = ["urgoza", "zagoku", "kuzagur", "gokuza"].iter().map(|name| CorpusEntry {
			language: "orc".to_owned(),
			gender: Gender::Male,
			name: name.to_string(),
		});
		Corpus::from_entries(french.chain(orc))
	}

	#[test]
	fn empty_table_fails_fast() {
		let selection = Selection::new(["klingon"], &[Gender::Neutral]);
		let empty = TransitionTable::new(selection.clone());
		let mut rng = StdRng::seed_from_u64(0);

		match generate(&empty, &HashSet::new(), 5, 5, None, &mut rng) {
			Err(GenerationError::EmptyModel(s)) => assert_eq!(s, selection),
			other => panic!("expected EmptyModel, got {:?}", other),
		}
	}

	#[test]
	fn unreachable_length_fails_fast() {
		// chris | top | he: the shortest candidate is "tophe"
		let selection = Selection::new(["francais"], &[Gender::Male]);
		let table = TransitionTable::from_names(selection.clone(), ["christophe"]);
		let mut rng = StdRng::seed_from_u64(0);

		match generate(&table, &HashSet::new(), 1, 4, None, &mut rng) {
			Err(e @ GenerationError::LengthUnreachable { .. }) => {
				assert!(e.to_string().contains("[francais] | [m]"));
				assert!(e.to_string().contains(" 4 characters"));
			}
			other => panic!("expected LengthUnreachable, got {:?}", other),
		}

		let generation = generate(&table, &HashSet::new(), 1, 5, None, &mut rng).unwrap();
		assert_eq!(generation.names, vec!["tophe"]);
	}

	#[test]
	fn names_respect_length_and_exclusions() {
		let table = table();
		let excluded: HashSet<String> = FRENCH.iter().map(|s| s.to_string()).collect();
		let mut rng = StdRng::seed_from_u64(42);

		let generation = generate(&table, &excluded, 5, 6, Some(100_000), &mut rng).unwrap();
		assert_eq!(generation.names.len(), 5);
		assert!(generation.attempts >= 5);

		let unique: HashSet<&String> = generation.names.iter().collect();
		assert_eq!(unique.len(), 5);
		for name in &generation.names {
			assert!(name.chars().count() <= 6, "{name} is too long");
			assert!(!excluded.contains(name), "{name} is a real name");
		}
	}

	#[test]
	fn walk_stays_within_max_length() {
		let table = table();
		let mut rng = StdRng::seed_from_u64(9);
		for _ in 0..500 {
			if let Some(name) = walk(&table, 5, &mut rng) {
				assert!(name.chars().count() <= 5);
			}
		}
	}

	#[test]
	fn seeded_generation_is_reproducible() {
		let table = table();
		let excluded = HashSet::new();
		let first = generate(&table, &excluded, 4, 8, Some(10_000), &mut StdRng::seed_from_u64(1234)).unwrap();
		let second = generate(&table, &excluded, 4, 8, Some(10_000), &mut StdRng::seed_from_u64(1234)).unwrap();
		assert_eq!(first, second);
	}

	#[test]
	fn attempt_ceiling_returns_partial_result() {
		// Only "e" → "le" → "na" exists: a single possible name.
		let table = TransitionTable::from_names(Selection::default(), ["elena"]);
		let mut rng = StdRng::seed_from_u64(5);

		match generate(&table, &HashSet::new(), 3, 8, Some(50), &mut rng) {
			Err(GenerationError::AttemptsExhausted { attempts, requested, generated }) => {
				assert_eq!(attempts, 50);
				assert_eq!(requested, 3);
				assert!(generated.len() <= 2);
			}
			other => panic!("expected AttemptsExhausted, got {:?}", other),
		}
	}

	#[test]
	fn zero_names_requested() {
		let generation = generate(&table(), &HashSet::new(), 0, 8, None, &mut StdRng::seed_from_u64(0)).unwrap();
		assert!(generation.names.is_empty());
		assert_eq!(generation.attempts, 0);
	}

	#[test]
	fn session_reports_attempts_on_request() {
		let generator = Generator::from_corpus(corpus());
		let mut request = GenerationRequest::new(3);
		request.set_genders(&[Gender::Female]).unwrap();
		request.max_attempts = Some(100_000);
		request.seed = Some(7);

		let outcome = generator.generate_names(&request).unwrap();
		assert_eq!(outcome.names.len(), 3);
		assert_eq!(outcome.attempts, None);

		request.report_attempts = true;
		let reported = generator.generate_names(&request).unwrap();
		assert_eq!(reported.names, outcome.names);
		assert!(reported.attempts.unwrap() >= 3);
	}

	#[test]
	fn session_names_the_empty_selection() {
		let generator = Generator::from_corpus(corpus());
		let mut request = GenerationRequest::new(3);
		request.set_languages(["orc"]).unwrap();
		request.set_genders(&[Gender::Female]).unwrap();

		let err = generator.generate_names(&request).unwrap_err();
		assert!(matches!(err, GenerationError::EmptyModel(_)));
		assert!(err.to_string().contains("[orc] | [f]"));
	}

	#[test]
	fn selections_are_isolated() {
		let generator = Generator::from_corpus(corpus());
		let french = generator.build_table(&Selection::new(["francais"], &Gender::ALL));
		let orc = generator.build_table(&Selection::new(["orc"], &Gender::ALL));

		let orc_again = generator.build_table(&Selection::new(["orc"], &Gender::ALL));
		assert_eq!(orc, orc_again);
		for key in french.successor_lists().keys() {
			assert!(!orc.contains(key), "'{key}' leaked into orc");
		}

		let mut request = GenerationRequest::new(2);
		request.set_languages(["orc"]).unwrap();
		request.max_attempts = Some(100_000);
		request.seed = Some(11);
		let outcome = generator.generate_names(&request).unwrap();
		for name in outcome.names {
			let start_ok = orc.successor_lists().keys().any(|k| name.starts_with(k.as_str()));
			assert!(start_ok, "{name} does not start with an orc syllable");
		}
	}

	#[test]
	fn failed_export_does_not_block_names() {
		let dir = tempfile::tempdir().unwrap();
		let blocker = dir.path().join("not-a-dir");
		std::fs::write(&blocker, "").unwrap();

		let generator = Generator::from_corpus(corpus());
		let mut request = GenerationRequest::new(2);
		request.max_attempts = Some(100_000);
		request.seed = Some(3);
		request.export_statistics = true;
		request.export_dir = blocker;

		let outcome = generator.generate_names(&request).unwrap();
		assert_eq!(outcome.names.len(), 2);
		assert!(outcome.export_error.is_some());
	}

	#[test]
	fn invalid_request_is_rejected() {
		let generator = Generator::from_corpus(corpus());
		let mut request = GenerationRequest::new(2);
		request.max_length = 0;
		assert!(matches!(generator.generate_names(&request), Err(GenerationError::InvalidRequest(_))));
	}
}
