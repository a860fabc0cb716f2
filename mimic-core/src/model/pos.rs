use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::io;

/// Default tag assigned to words missing from a lexicon.
pub const DEFAULT_TAG: &str = "NN";

/// External part-of-speech classification capability.
///
/// The model consumes tags, it never computes them. Implementations range
/// from a lexicon lookup to a full library tagger; tests inject closures.
pub trait PosTagger {
	fn classify(&self, token: &str) -> Result<String, ModelError>;
}

impl<F> PosTagger for F
where
	F: Fn(&str) -> Result<String, ModelError>,
{
	fn classify(&self, token: &str) -> Result<String, ModelError> {
		self(token)
	}
}

/// Pre-supplied aggregate: tag → (successor tag → count). Read-only.
///
/// Serializes transparently as `{ tag: { tag: count } }`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(transparent)]
pub struct PosCountTable {
	counts: HashMap<String, HashMap<String, u64>>,
}

impl PosCountTable {
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
		io::read_json(path)
	}

	pub fn get(&self, tag: &str) -> Option<&HashMap<String, u64>> {
		self.counts.get(tag)
	}
}

/// Pre-supplied aggregate: tag → frequency. Read-only.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(transparent)]
pub struct PosFrequencyTable {
	counts: HashMap<String, u64>,
}

impl PosFrequencyTable {
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
		io::read_json(path)
	}

	pub fn get(&self, tag: &str) -> Option<u64> {
		self.counts.get(tag).copied()
	}
}

/// Tagger backed by a word → tag lexicon.
///
/// Lookup only, no tagging algorithm: a token is looked up as written, then
/// case-folded, then falls back to the default tag.
#[derive(Clone, Debug)]
pub struct LexiconTagger {
	lexicon: HashMap<String, String>,
	default_tag: String,
}

impl LexiconTagger {
	pub fn new(lexicon: HashMap<String, String>) -> Self {
		Self {
			lexicon,
			default_tag: DEFAULT_TAG.to_owned(),
		}
	}

	/// Loads a `{ word: tag }` JSON lexicon.
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
		Ok(Self::new(io::read_json(path)?))
	}
}

impl Default for LexiconTagger {
	fn default() -> Self {
		Self::new(HashMap::new())
	}
}

impl PosTagger for LexiconTagger {
	fn classify(&self, token: &str) -> Result<String, ModelError> {
		if let Some(tag) = self.lexicon.get(token) {
			return Ok(tag.clone());
		}
		if let Some(tag) = self.lexicon.get(&token.to_lowercase()) {
			return Ok(tag.clone());
		}
		Ok(self.default_tag.clone())
	}
}
