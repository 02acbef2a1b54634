use std::collections::BTreeMap;

use rand::Rng;

use serde::{Deserialize, Serialize};


/// Represents one syllable of the transition table.
///
/// A `State` stores every syllable observed right after `key` in the corpus,
/// together with how many times it was observed.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges
/// are weighted by their number of observations.
///
/// ## Invariants
/// - A state only exists once a successor has been recorded
/// - Each successor count is strictly positive
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct State {
	/// The syllable this state belongs to.
	key: String,
	/// Observed successors and their occurrence counts.
	/// Example: { "ne" => 3, "na" => 1 }
	successors: BTreeMap<String, usize>
}

impl State {
	/// Creates a new empty state for the given syllable.
	pub fn new(key: &str) -> Self {
		Self {
			key: key.to_owned(),
			successors: BTreeMap::new(),
		}
	}

	/// Records one occurrence of `next` following this syllable.
	pub fn add_transition(&mut self, next: &str) {
		*self.successors.entry(next.to_owned()).or_insert(0) += 1;
	}

	/// Total number of recorded transitions.
	pub fn total(&self) -> usize {
		self.successors.values().sum()
	}

	/// Number of times `next` was observed after this syllable.
	pub fn count(&self, next: &str) -> usize {
		self.successors.get(next).copied().unwrap_or(0)
	}

	/// Length in characters of the shortest recorded successor.
	pub fn shortest_successor(&self) -> Option<usize> {
		self.successors.keys().map(|next| next.chars().count()).min()
	}

	/// Successors as a flat list where each one is repeated `count` times.
	pub fn expanded(&self) -> Vec<String> {
		self.successors
			.iter()
			.flat_map(|(next, occurrence)| std::iter::repeat_n(next.clone(), *occurrence))
			.collect()
	}

	/// Picks a successor using weighted random sampling.
	///
	/// The probability of a successor is proportional to its count, which is
	/// the same distribution as a uniform pick in [`State::expanded`].
	///
	/// Returns `None` if the state has no transitions.
	pub fn predict<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		let total = self.total();
		if total == 0 {
			return None;
		}

		let mut r = rng.random_range(0..total);
		for (next, occurrence) in &self.successors {
			if r < *occurrence {
				return Some(next.as_str());
			}
			r -= occurrence;
		}

		// Unreachable while counts sum to `total`
		self.successors.keys().next_back().map(String::as_str)
	}

	/// Merges another state into this one.
	///
	/// Both states must belong to the same syllable. Counts are summed.
	///
	/// # Errors
	/// Returns an error if the state keys do not match.
	pub fn merge(&mut self, other: &Self) -> Result<(), String> {
		if self.key != other.key {
			return Err(format!("Key mismatch: '{}' vs '{}'", self.key, other.key));
		}

		for (next, occurrence) in &other.successors {
			*self.successors.entry(next.clone()).or_insert(0) += *occurrence;
		}

		Ok(())
	}
}
