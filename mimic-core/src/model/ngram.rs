use crate::error::ModelError;

/// Sentinel token meaning "end of chain": no successor observed, or the
/// sequence ran out while padding a window.
pub const EMPTY_TOKEN: &str = "__EMPTY__";

/// Builds one n-gram string per input position.
///
/// For each index `i`, the window is `tokens[i]` followed by up to `n - 1`
/// following tokens; positions past the end of the sequence are filled with
/// [`EMPTY_TOKEN`]. The window is joined with `separator`.
///
/// Output length equals input length and order is preserved. With `n = 1`
/// (the only mode the pipelines exercise) each output equals its input
/// token.
///
/// # Errors
/// Returns `InvalidArgument` if `n < 1`.
pub fn build_ngrams(
	n: usize,
	tokens: &[String],
	separator: &str,
) -> Result<Vec<String>, ModelError> {
	if n < 1 {
		return Err(ModelError::InvalidArgument(
			"n-gram size must be >= 1".to_owned(),
		));
	}

	let mut grams = Vec::with_capacity(tokens.len());
	for i in 0..tokens.len() {
		let mut window = Vec::with_capacity(n);
		window.push(tokens[i].as_str());
		for j in 1..n {
			window.push(tokens.get(i + j).map(String::as_str).unwrap_or(EMPTY_TOKEN));
		}
		grams.push(window.join(separator));
	}

	Ok(grams)
}
