//! Syllable model and name generation.
//!
//! - Vowel-based syllable splitting (`syllable`)
//! - Per-syllable successor counts (`State`)
//! - Transition statistics of a language/gender selection (`TransitionTable`)
//! - Request parameters (`GenerationRequest`)
//! - Random walk and request sessions (`Generator`)

/// Splits names into syllables and corrects doubtful boundaries.
pub mod syllable;

/// Transition statistics built from decomposed names.
///
/// Supports observation, merging, weighted sampling and binary snapshots.
pub mod transition_table;

/// Successors of a single syllable with their occurrence counts.
///
/// Only reachable through `TransitionTable::state`.
mod state;

/// Parameters of a generation request.
pub mod generation_request;

/// Weighted random walk over a transition table, and the high-level
/// `Generator` running complete requests against a corpus.
pub mod generator;

/// JSON export of the syllable statistics.
pub mod export;

pub use state::State;
