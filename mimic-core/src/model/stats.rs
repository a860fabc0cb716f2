use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::ngram::EMPTY_TOKEN;

/// Corpus-wide transition statistics: prefix token → (successor → count).
///
/// Conceptually a Markov chain where outgoing edges are weighted by the
/// number of observations. The last token of every sequence transitions to
/// [`EMPTY_TOKEN`].
///
/// # Invariants
/// - All counts are strictly positive once inserted
/// - A prefix absent from the table has no known successors
///
/// Serializes transparently as `{ prefix: { successor: count } }`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct SuffixTable {
	counts: HashMap<String, HashMap<String, u64>>,
}

impl SuffixTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds the table for one token sequence.
	///
	/// For each position `i`, the prefix is `grams[i]` and the successor is
	/// `grams[i + 1]`, or the sentinel at the end of the sequence.
	pub fn from_grams(grams: &[String]) -> Self {
		let mut table = Self::new();
		for i in 0..grams.len() {
			let successor = grams.get(i + 1).map(String::as_str).unwrap_or(EMPTY_TOKEN);
			table.observe(&grams[i], successor);
		}
		table
	}

	/// Records one observation of `successor` following `prefix`.
	pub fn observe(&mut self, prefix: &str, successor: &str) {
		*self
			.counts
			.entry(prefix.to_owned())
			.or_default()
			.entry(successor.to_owned())
			.or_insert(0) += 1;
	}

	/// Returns the successor counts observed for `prefix`, if any.
	pub fn successors(&self, prefix: &str) -> Option<&HashMap<String, u64>> {
		self.counts.get(prefix)
	}

	/// Merges another table into this one by summing counts at matching
	/// `(prefix, successor)` keys. Commutative and associative per key, so
	/// partial tables can be combined in any order.
	pub fn merge(&mut self, other: &Self) {
		for (prefix, successors) in &other.counts {
			let entry = self.counts.entry(prefix.clone()).or_default();
			for (successor, count) in successors {
				*entry.entry(successor.clone()).or_insert(0) += count;
			}
		}
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Number of distinct prefixes.
	pub fn len(&self) -> usize {
		self.counts.len()
	}
}

/// Corpus-wide token frequencies, case-folded.
///
/// Two tokens differing only in case contribute to the same entry. For a
/// single sequence, the sum of all entries equals the sequence's length.
///
/// Serializes transparently as `{ token: count }`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct FrequencyTable {
	counts: HashMap<String, u64>,
}

impl FrequencyTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Counts each token of one sequence, case-folded.
	pub fn from_grams(grams: &[String]) -> Self {
		let mut table = Self::new();
		for gram in grams {
			*table.counts.entry(gram.to_lowercase()).or_insert(0) += 1;
		}
		table
	}

	/// Occurrences of `token` (folded before lookup).
	pub fn count(&self, token: &str) -> u64 {
		self.counts.get(&token.to_lowercase()).copied().unwrap_or(0)
	}

	/// Sum of all entries.
	pub fn total(&self) -> u64 {
		self.counts.values().sum()
	}

	/// Iterates over the distinct folded tokens.
	pub fn tokens(&self) -> impl Iterator<Item = &str> {
		self.counts.keys().map(String::as_str)
	}

	/// Merges another table into this one by summing counts at matching
	/// keys. Commutative and associative per key.
	pub fn merge(&mut self, other: &Self) {
		for (token, count) in &other.counts {
			*self.counts.entry(token.clone()).or_insert(0) += count;
		}
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	pub fn len(&self) -> usize {
		self.counts.len()
	}
}
