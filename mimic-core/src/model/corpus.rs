use regex::Regex;
use serde::Deserialize;

/// Substring marking truncated or linked content; such records are not
/// original text and are dropped.
pub const LINK_MARKER: &str = "https://t.co/";

/// Prefix marking a repost of someone else's text.
pub const REPOST_PREFIX: &str = "RT";

/// One record of the raw corpus.
///
/// Only the `text` field matters to the model; any other field present in
/// the source document is ignored during deserialization.
#[derive(Deserialize, Clone, Debug)]
pub struct CorpusRecord {
	pub text: String,
}

impl CorpusRecord {
	/// Returns true when the record passes the filtering policy:
	/// no embedded link marker, and not a repost.
	pub fn is_original(&self) -> bool {
		!self.text.contains(LINK_MARKER) && !self.text.starts_with(REPOST_PREFIX)
	}
}

/// Splits retained texts into token sequences.
///
/// # Responsibilities
/// - Apply the corpus filtering policy, preserving record order
/// - Split each retained text on runs of whitespace (`\s+`)
///
/// # Notes
/// - No further normalization: punctuation stays attached to tokens.
pub struct Tokenizer {
	whitespace: Regex,
}

impl Tokenizer {
	pub fn new() -> Self {
		Self {
			// The pattern is a valid literal.
			whitespace: Regex::new(r"\s+").unwrap(),
		}
	}

	/// Splits one text into an ordered token sequence.
	pub fn tokenize(&self, text: &str) -> Vec<String> {
		self.whitespace
			.split(text)
			.filter(|fragment| !fragment.is_empty())
			.map(str::to_owned)
			.collect()
	}

	/// Produces one token sequence per retained record, in corpus order.
	pub fn token_sequences(&self, records: &[CorpusRecord]) -> Vec<Vec<String>> {
		records
			.iter()
			.filter(|record| record.is_original())
			.map(|record| self.tokenize(&record.text))
			.collect()
	}
}

impl Default for Tokenizer {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn record(text: &str) -> CorpusRecord {
		CorpusRecord {
			text: text.to_owned(),
		}
	}

	#[test]
	fn linked_records_are_excluded() {
		let records = vec![
			record("check this out https://t.co/abc"),
			record("plain words here"),
		];
		let sequences = Tokenizer::new().token_sequences(&records);
		assert_eq!(sequences, vec![vec!["plain", "words", "here"]]);
	}

	#[test]
	fn reposts_are_excluded() {
		let records = vec![record("RT @someone: hi"), record("my own words")];
		let sequences = Tokenizer::new().token_sequences(&records);
		assert_eq!(sequences, vec![vec!["my", "own", "words"]]);
	}

	#[test]
	fn tokenize_splits_on_whitespace_runs() {
		let tokens = Tokenizer::new().tokenize("one  two\tthree\n four");
		assert_eq!(tokens, vec!["one", "two", "three", "four"]);
	}

	#[test]
	fn punctuation_stays_attached() {
		let tokens = Tokenizer::new().tokenize("hello, world!");
		assert_eq!(tokens, vec!["hello,", "world!"]);
	}
}
