use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by model construction, sampling and table I/O.
///
/// # Notes
/// - `InvalidArgument` marks a caller-contract violation and should abort
///   the current build rather than be retried.
/// - `Classification` aborts the sampling call it occurs in; the generation
///   loop propagates it instead of spinning.
#[derive(Debug, Error)]
pub enum ModelError {
	/// A caller broke a precondition (ex. n-gram size below 1).
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	/// The part-of-speech classifier could not tag a token.
	#[error("cannot classify {token:?}: {reason}")]
	Classification { token: String, reason: String },

	/// Underlying file I/O failure.
	#[error(transparent)]
	Io(#[from] std::io::Error),

	/// A table or corpus file exists but is not valid JSON for its schema.
	/// A partial or corrupt table is never treated as valid input.
	#[error("malformed JSON in {}: {source}", path.display())]
	MalformedTable {
		path: PathBuf,
		source: serde_json::Error,
	},

	/// The binary model cache could not be encoded or decoded.
	#[error("model cache error: {0}")]
	Cache(#[from] postcard::Error),
}
