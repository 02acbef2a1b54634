/// Characters treated as vowels when looking for syllable boundaries.
///
/// Includes `y` and the accented vowels found in the name corpora.
pub const VOWELS: &str = "aeiouyáâãäèéêëíîïòóôöōùúûüū";

/// Returns `true` if `c` belongs to [`VOWELS`].
pub fn is_vowel(c: char) -> bool {
	VOWELS.contains(c)
}

/// Result of splitting a single name into syllables.
///
/// The syllables concatenate back to the lowercased name unless a vowel
/// position could not produce a syllable. Those positions are listed in
/// `skipped` (character indices into the lowercased name).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Decomposition {
	pub syllables: Vec<String>,
	pub skipped: Vec<usize>,
}

impl Decomposition {
	/// `true` when no character of the name was lost.
	pub fn is_complete(&self) -> bool {
		self.skipped.is_empty() && !self.syllables.is_empty()
	}

	/// Concatenation of all syllables.
	pub fn joined(&self) -> String {
		self.syllables.concat()
	}
}

/// Splits a name on vowel positions.
///
/// Each vowel yields one raw syllable:
/// - a vowel at index 0 takes the characters up to the consonant anchoring the next vowel
/// - the first vowel takes everything before it
/// - the last vowel takes everything after it
/// - any other vowel takes the consonant right before it (if any) and
///   the characters up to the next anchor consonant
///
/// A leading vowel with no vowel after it (e.g. `"al"`) cannot produce a
/// syllable. Its position is recorded in [`Decomposition::skipped`] and the
/// split continues. A name with no vowel at all produces nothing.
///
/// # Notes
/// - Works on characters, not bytes (accented vowels are multibyte).
pub fn split(name: &str) -> Decomposition {
	let chars: Vec<char> = name.to_lowercase().chars().collect();
	let positions: Vec<usize> = chars
		.iter()
		.enumerate()
		.filter(|(_, c)| is_vowel(**c))
		.map(|(i, _)| i)
		.collect();

	let mut decomposition = Decomposition::default();
	if positions.is_empty() {
		if !chars.is_empty() {
			log::warn!("no vowel in '{}', nothing to split", name);
			decomposition.skipped.push(0);
		}
		return decomposition;
	}

	let last = positions.len() - 1;
	for (i, &p) in positions.iter().enumerate() {
		// End (exclusive) of the queue: stop before the next anchor consonant.
		// Adjacent vowels give an empty queue.
		let queue_end = positions.get(i + 1).map(|&next| (next - 1).max(p + 1));

		let (head, tail) = if p == 0 {
			match queue_end {
				Some(end) => (0, end),
				None => {
					log::warn!("cannot split '{}': leading vowel without a following vowel", name);
					decomposition.skipped.push(p);
					continue;
				}
			}
		} else if i == 0 {
			// First vowel keeps the whole onset; when it is also the last
			// vowel it keeps the whole coda too.
			(0, queue_end.unwrap_or(chars.len()))
		} else {
			let head = if is_vowel(chars[p - 1]) { p } else { p - 1 };
			if i == last {
				(head, chars.len())
			} else {
				(head, queue_end.unwrap_or(chars.len()))
			}
		};

		decomposition.syllables.push(chars[head..tail].iter().collect());
	}

	decomposition
}

/// Merges adjacent syllables whose boundary looks wrong.
///
/// Two neighbours are merged when the last character of the first and the
/// first character of the second are both vowels, or are the same letter.
///
/// Single left-to-right pass: a merged syllable is not compared again with
/// the one that follows it, so runs like `"ia" + "ea" + "u"` may keep a
/// vowel boundary.
pub fn correct(syllables: &[String]) -> Vec<String> {
	let mut corrected = Vec::with_capacity(syllables.len());
	let mut i = 0;
	while i < syllables.len() {
		let current = &syllables[i];
		match syllables.get(i + 1) {
			Some(next) if should_merge(current, next) => {
				corrected.push(format!("{current}{next}"));
				i += 1;
			}
			_ => corrected.push(current.clone()),
		}
		i += 1;
	}
	corrected
}

fn should_merge(current: &str, next: &str) -> bool {
	match (current.chars().last(), next.chars().next()) {
		(Some(end), Some(start)) => (is_vowel(end) && is_vowel(start)) || end == start,
		_ => false,
	}
}

/// Splits a name and applies the correction pass.
pub fn decompose(name: &str) -> Decomposition {
	let mut decomposition = split(name);
	decomposition.syllables = correct(&decomposition.syllables);
	decomposition
}
