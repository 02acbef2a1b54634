//! Syllable-based given-name generation library.
//!
//! This crate learns which syllable follows which in a corpus of real
//! names, then walks those statistics to build new names:
//! - Heuristic vowel-based syllable splitting
//! - Transition statistics per language/gender selection
//! - Weighted random walk with length cap and real-name exclusion
//! - Corpus loading and statistics export
//!
//! ```no_run
//! use syl_gen_core::model::generator::Generator;
//! use syl_gen_core::model::generation_request::GenerationRequest;
//!
//! let generator = Generator::new("./data")?;
//! let outcome = generator.generate_names(&GenerationRequest::new(5))?;
//! for (i, name) in outcome.names.iter().enumerate() {
//!     println!("Name {} : {}", i + 1, name);
//! }
//! # Ok::<(), syl_gen_core::error::GenerationError>(())
//! ```

/// Syllable splitting, transition statistics and generation.
pub mod model;

/// Name corpus: languages, genders and the names themselves.
pub mod corpus;

/// Error types.
pub mod error;

/// File helpers (reading, listing, path handling).
pub mod io;
