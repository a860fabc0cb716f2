use std::path::Path;
use std::sync::mpsc;
use std::thread;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::io::{self, FREQUENCY_TABLE_FILE, SUFFIX_TABLE_FILE};
use super::corpus::{CorpusRecord, Tokenizer};
use super::ngram::build_ngrams;
use super::stats::{FrequencyTable, SuffixTable};

/// The two corpus-wide tables produced by one full analysis pass.
///
/// # Responsibilities
/// - Build per-text tables and reduce them into corpus totals
/// - Parallelize the per-text work across threads
/// - Cache the result as a compact binary next to the corpus file
///
/// Both tables are batch-built and treated as immutable afterwards.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct CorpusStats {
	pub suffix: SuffixTable,
	pub frequency: FrequencyTable,
}

impl CorpusStats {
	pub fn new() -> Self {
		Self::default()
	}

	/// Loads the stats from a binary cache if one exists next to the corpus
	/// file, otherwise builds them from the corpus and writes the cache.
	///
	/// - `corpus_path` is the raw corpus JSON file.
	/// - The cache is the same path with a `bin` extension, encoded with
	///   `postcard`.
	pub fn load_or_build<P: AsRef<Path>>(corpus_path: P) -> Result<Self, ModelError> {
		let cache_path = io::build_output_path(&corpus_path, "bin")?;

		if cache_path.exists() {
			log::info!("loading cached model from {}", cache_path.display());
			let bytes = std::fs::read(cache_path)?;
			return Ok(postcard::from_bytes(&bytes)?);
		}

		let records = io::read_corpus(&corpus_path)?;
		let stats = Self::analyze(&records)?;

		let bytes = postcard::to_stdvec(&stats)?;
		std::fs::write(&cache_path, bytes)?;
		log::info!("cached model at {}", cache_path.display());

		Ok(stats)
	}

	/// Filters and tokenizes the corpus, then builds corpus-wide tables.
	pub fn analyze(records: &[CorpusRecord]) -> Result<Self, ModelError> {
		let sequences = Tokenizer::new().token_sequences(records);
		Self::from_sequences(sequences)
	}

	/// Builds and reduces per-text tables in parallel.
	///
	/// # Behavior
	/// - Splits the sequences into chunks (CPU cores * factor).
	/// - Each thread builds partial tables for its chunk, one text at a time.
	/// - Partial tables are collected over an MPSC channel and merged.
	///
	/// The additive merges are commutative and associative per key, so the
	/// arrival order of partial tables does not affect the result.
	pub fn from_sequences(sequences: Vec<Vec<String>>) -> Result<Self, ModelError> {
		if sequences.is_empty() {
			return Ok(Self::new());
		}

		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = (sequences.len() + chunks - 1) / chunks;

		let (tx, rx) = mpsc::channel();
		for chunk in sequences.chunks(chunk_size) {
			let tx = tx.clone();
			let chunk: Vec<Vec<String>> = chunk.to_vec();

			thread::spawn(move || {
				let mut partial = CorpusStats::new();
				for tokens in chunk {
					partial.add_sequence(&tokens);
				}
				tx.send(partial).expect("Failed to send from thread");
			});
		}
		drop(tx);

		let mut stats = Self::new();
		for partial in rx.iter() {
			stats.merge(&partial);
		}

		Ok(stats)
	}

	/// Folds one text's statistics into the accumulated tables.
	pub fn add_sequence(&mut self, tokens: &[String]) {
		// n = 1, the precondition always holds.
		let grams = build_ngrams(1, tokens, " ").unwrap();
		self.suffix.merge(&SuffixTable::from_grams(&grams));
		self.frequency.merge(&FrequencyTable::from_grams(&grams));
	}

	/// Merges another pair of tables into this one.
	pub fn merge(&mut self, other: &Self) {
		self.suffix.merge(&other.suffix);
		self.frequency.merge(&other.frequency);
	}

	/// Exports `count.json` and `freq.json` into `dir`.
	pub fn write_tables<P: AsRef<Path>>(&self, dir: P) -> Result<(), ModelError> {
		let dir = dir.as_ref();
		std::fs::create_dir_all(dir)?;
		io::write_json(dir.join(SUFFIX_TABLE_FILE), &self.suffix)?;
		io::write_json(dir.join(FREQUENCY_TABLE_FILE), &self.frequency)?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::EMPTY_TOKEN;

	fn sequence(words: &[&str]) -> Vec<String> {
		words.iter().map(|w| (*w).to_owned()).collect()
	}

	#[test]
	fn parallel_build_matches_sequential_build() {
		let sequences: Vec<Vec<String>> = (0..100)
			.map(|i| sequence(&["the", "cat", if i % 2 == 0 { "sat" } else { "ran" }]))
			.collect();

		let parallel = CorpusStats::from_sequences(sequences.clone()).unwrap();

		let mut sequential = CorpusStats::new();
		for tokens in &sequences {
			sequential.add_sequence(tokens);
		}

		assert_eq!(parallel.suffix, sequential.suffix);
		assert_eq!(parallel.frequency, sequential.frequency);
	}

	#[test]
	fn per_text_chains_do_not_cross() {
		// The last word of one text must not become a prefix of the
		// first word of the next text.
		let sequences = vec![sequence(&["a", "b"]), sequence(&["c", "d"])];
		let stats = CorpusStats::from_sequences(sequences).unwrap();

		let b = stats.suffix.successors("b").unwrap();
		assert_eq!(b[EMPTY_TOKEN], 1);
		assert!(!b.contains_key("c"));
	}

	#[test]
	fn empty_corpus_yields_empty_tables() {
		let stats = CorpusStats::from_sequences(Vec::new()).unwrap();
		assert!(stats.suffix.is_empty());
		assert!(stats.frequency.is_empty());
	}

	#[test]
	fn exported_tables_reload_identically() {
		let dir = tempfile::tempdir().unwrap();
		let mut stats = CorpusStats::new();
		stats.add_sequence(&sequence(&["Hello", "hello", "world"]));
		stats.write_tables(dir.path()).unwrap();

		let suffix: SuffixTable = crate::io::read_json(dir.path().join(SUFFIX_TABLE_FILE)).unwrap();
		let frequency: FrequencyTable =
			crate::io::read_json(dir.path().join(FREQUENCY_TABLE_FILE)).unwrap();

		assert_eq!(suffix, stats.suffix);
		assert_eq!(frequency, stats.frequency);
	}

	#[test]
	fn cache_round_trip_via_postcard() {
		let mut stats = CorpusStats::new();
		stats.add_sequence(&sequence(&["x", "y", "z"]));

		let bytes = postcard::to_stdvec(&stats).unwrap();
		let loaded: CorpusStats = postcard::from_bytes(&bytes).unwrap();
		assert_eq!(loaded.suffix, stats.suffix);
		assert_eq!(loaded.frequency, stats.frequency);
	}
}
