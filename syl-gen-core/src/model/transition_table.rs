use std::collections::BTreeMap;
use std::path::Path;

use rand::Rng;
use rand::prelude::IteratorRandom;
use serde::{Deserialize, Serialize};

use crate::corpus::Selection;
use crate::error::ExportError;
use super::state::State;
use super::syllable::{decompose, Decomposition};

/// Syllable transition statistics for one language/gender selection.
///
/// Maps each syllable to the syllables observed right after it in the
/// corpus. A syllable only becomes a key once it has a successor, so every
/// key can continue a walk.
///
/// # Responsibilities
/// - Ingest decomposed names (`observe`)
/// - Sample a random start syllable and weighted successors
/// - Merge with another table (pooling corpora)
/// - Export / snapshot the statistics
///
/// Keys and successors live in sorted maps: iteration order never depends
/// on hashing, so a seeded generator replays the same walk.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct TransitionTable {
	selection: Selection,
	states: BTreeMap<String, State>,
}

impl TransitionTable {
	/// Creates an empty table for the given selection.
	pub fn new(selection: Selection) -> Self {
		Self { selection, states: BTreeMap::new() }
	}

	/// Builds a table by decomposing and observing every name.
	///
	/// Names that cannot be decomposed cleanly still contribute the
	/// syllables that could be produced.
	pub fn from_names<I, S>(selection: Selection, names: I) -> Self
	where
		I: IntoIterator<Item=S>,
		S: AsRef<str>,
	{
		let mut table = Self::new(selection);
		let mut malformed = 0;
		for name in names {
			if !table.observe_name(name.as_ref()).is_complete() {
				malformed += 1;
			}
		}
		if malformed > 0 {
			log::warn!("{} name(s) of {} could not be fully split", malformed, table.selection);
		}
		log::debug!("built {} syllable states for {}", table.len(), table.selection);
		table
	}

	pub fn selection(&self) -> &Selection {
		&self.selection
	}

	/// Number of syllables having at least one successor.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// `true` if `syllable` has at least one recorded successor.
	pub fn contains(&self, syllable: &str) -> bool {
		self.states.contains_key(syllable)
	}

	pub fn state(&self, syllable: &str) -> Option<&State> {
		self.states.get(syllable)
	}

	/// Length in characters of the shortest `key + successor` pair.
	///
	/// No walk can produce a name shorter than this. `None` for an empty table.
	pub fn shortest_pair_length(&self) -> Option<usize> {
		self.states
			.iter()
			.filter_map(|(key, state)| Some(key.chars().count() + state.shortest_successor()?))
			.min()
	}

	/// Records every consecutive pair of a decomposed name.
	///
	/// A single syllable records nothing.
	pub fn observe<S: AsRef<str>>(&mut self, syllables: &[S]) {
		for pair in syllables.windows(2) {
			let (current, next) = (pair[0].as_ref(), pair[1].as_ref());
			self.states
				.entry(current.to_owned())
				.or_insert_with(|| State::new(current))
				.add_transition(next);
		}
	}

	/// Decomposes a name and observes its syllables.
	pub fn observe_name(&mut self, name: &str) -> Decomposition {
		let decomposition = decompose(name);
		self.observe(&decomposition.syllables);
		decomposition
	}

	/// Picks a start syllable uniformly among the keys.
	pub fn random_start<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		self.states.keys().choose(rng).map(String::as_str)
	}

	/// Picks a weighted successor of `syllable`.
	///
	/// Returns `None` when the syllable is a dead end.
	pub fn next<R: Rng + ?Sized>(&self, syllable: &str, rng: &mut R) -> Option<&str> {
		self.states.get(syllable)?.predict(rng)
	}

	/// Merges another table into this one.
	///
	/// Successor counts are summed and the other selection's languages and
	/// genders are added to this one.
	pub fn merge(&mut self, other: &Self) -> Result<(), String> {
		for (key, state) in &other.states {
			if let Some(existing) = self.states.get_mut(key) {
				existing.merge(state)?;
			} else {
				self.states.insert(key.clone(), state.clone());
			}
		}

		for language in &other.selection.languages {
			if !self.selection.languages.contains(language) {
				self.selection.languages.push(language.clone());
			}
		}
		for gender in &other.selection.genders {
			if !self.selection.genders.contains(gender) {
				self.selection.genders.push(*gender);
			}
		}

		Ok(())
	}

	/// Export view: each syllable with its successors repeated by count.
	///
	/// `{ "e": ["la", "le", "le"] }`
	pub fn successor_lists(&self) -> BTreeMap<String, Vec<String>> {
		self.states
			.iter()
			.map(|(key, state)| (key.clone(), state.expanded()))
			.collect()
	}

	/// Serializes the table with `postcard`.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ExportError> {
		let bytes = postcard::to_stdvec(self)?;
		std::fs::write(path, bytes)?;
		Ok(())
	}

	/// Loads a table written by [`TransitionTable::save`].
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ExportError> {
		let bytes = std::fs::read(path)?;
		Ok(postcard::from_bytes(&bytes)?)
	}
}
