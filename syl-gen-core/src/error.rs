use crate::corpus::Selection;

/// Errors that stop a generation request.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
	/// No syllable pair was observed for the selection.
	#[error("no syllables available for this combination: {0}")]
	EmptyModel(Selection),

	/// Even the shortest syllable pair of the selection is longer than
	/// the requested maximum, so no walk can ever be accepted.
	#[error("no name of {selection} fits in {max_length} characters (shortest is {shortest})")]
	LengthUnreachable {
		selection: Selection,
		max_length: usize,
		shortest: usize,
	},

	/// The attempt ceiling was reached before enough names were found.
	#[error("gave up after {attempts} attempts with {} of {requested} names", .generated.len())]
	AttemptsExhausted {
		attempts: usize,
		requested: usize,
		generated: Vec<String>,
	},

	#[error("invalid request: {0}")]
	InvalidRequest(String),

	#[error("corpus error: {0}")]
	Corpus(#[from] std::io::Error),
}

/// Errors raised while writing or reading syllable statistics.
///
/// Never fatal to generation: the session logs them and keeps going.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("binary encoding error: {0}")]
	Binary(#[from] postcard::Error),
}
