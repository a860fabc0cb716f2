use rand::Rng;
use rand::prelude::IteratorRandom;

use crate::error::ModelError;
use super::ngram::EMPTY_TOKEN;
use super::pos::{PosCountTable, PosFrequencyTable, PosTagger};
use super::sampler::sample_next;
use super::stats::{FrequencyTable, SuffixTable};

/// High-level interface for generating pastiche texts.
///
/// # Responsibilities
/// - Hold the corpus tables, the part-of-speech aggregates and the tagger
/// - Walk the chain from a seed word up to a character bound
/// - Offer random seed selection from the frequency table
///
/// # Invariants
/// - The tables are never mutated after construction
/// - A generation run either terminates (bound or sentinel) or fails with
///   a propagated error; it never loops forever
#[derive(Debug)]
pub struct Generator<T: PosTagger> {
	suffix: SuffixTable,
	frequency: FrequencyTable,
	pos_freq: PosFrequencyTable,
	pos_counts: PosCountTable,
	tagger: T,
}

impl<T: PosTagger> Generator<T> {
	/// Default character bound of one generated text.
	pub const DEFAULT_MAX_LENGTH: usize = 280;

	pub fn new(
		suffix: SuffixTable,
		frequency: FrequencyTable,
		pos_freq: PosFrequencyTable,
		pos_counts: PosCountTable,
		tagger: T,
	) -> Self {
		Self {
			suffix,
			frequency,
			pos_freq,
			pos_counts,
			tagger,
		}
	}

	/// Picks a random seed token from the frequency table.
	///
	/// Returns `None` if the model is empty.
	pub fn random_seed<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<String> {
		self.frequency.tokens().choose(rng).map(str::to_owned)
	}

	/// Generates one text starting from `seed` with the default bound.
	pub fn generate(&self, seed: &str) -> Result<String, ModelError> {
		self.generate_with_rng(seed, Self::DEFAULT_MAX_LENGTH, &mut rand::rng())
	}

	/// Generates one text starting from `seed`, bounded to `max_length`
	/// emitted characters, drawing from the provided RNG.
	///
	/// # Behavior
	/// - The buffer starts empty and `last_word` starts at the seed.
	/// - Loop while the emitted length is below `max_length` and the last
	///   word is not the sentinel.
	/// - Each step appends `" " + last_word`, sentinel included; every
	///   sentinel occurrence is stripped from the final text, which is then
	///   whitespace-trimmed.
	///
	/// The emitted length is counted in characters and strictly increases
	/// each iteration, so the loop always terminates.
	pub fn generate_with_rng<R: Rng + ?Sized>(
		&self,
		seed: &str,
		max_length: usize,
		rng: &mut R,
	) -> Result<String, ModelError> {
		let mut buffer = String::new();
		let mut emitted = 0usize;
		let mut last_word = seed.to_owned();

		while emitted < max_length && last_word != EMPTY_TOKEN {
			last_word = sample_next(
				&self.suffix,
				&self.pos_freq,
				&self.pos_counts,
				&last_word,
				&self.tagger,
				rng,
			)?;
			buffer.push(' ');
			buffer.push_str(&last_word);
			emitted += 1 + last_word.chars().count();
		}

		let text = format!("{seed}{buffer}");
		Ok(text.replace(EMPTY_TOKEN, "").trim().to_owned())
	}
}
