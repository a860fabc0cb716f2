use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ModelError;
use crate::model::corpus::CorpusRecord;

/// Exported suffix count table (`{ prefix: { successor: count } }`).
pub const SUFFIX_TABLE_FILE: &str = "count.json";
/// Exported frequency table (`{ token: count }`).
pub const FREQUENCY_TABLE_FILE: &str = "freq.json";
/// Pre-supplied part-of-speech count aggregate.
pub const POS_COUNT_FILE: &str = "count_pos.json";
/// Pre-supplied part-of-speech frequency aggregate.
pub const POS_FREQUENCY_FILE: &str = "freq_pos.json";

/// Reads and deserializes a JSON document.
///
/// A file that exists but does not match the expected schema is reported as
/// `MalformedTable` with the offending path.
pub fn read_json<T, P>(path: P) -> Result<T, ModelError>
where
	T: DeserializeOwned,
	P: AsRef<Path>,
{
	let file = File::open(&path)?;
	serde_json::from_reader(BufReader::new(file)).map_err(|source| ModelError::MalformedTable {
		path: path.as_ref().to_owned(),
		source,
	})
}

/// Serializes a value as pretty-printed JSON (two-space indent).
pub fn write_json<T, P>(path: P, value: &T) -> Result<(), ModelError>
where
	T: Serialize,
	P: AsRef<Path>,
{
	let file = File::create(&path)?;
	serde_json::to_writer_pretty(BufWriter::new(file), value).map_err(|source| {
		ModelError::MalformedTable {
			path: path.as_ref().to_owned(),
			source,
		}
	})
}

/// Loads a raw corpus file: a JSON array of records bearing a `text` field.
pub fn read_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<CorpusRecord>, ModelError> {
	read_json(path)
}

/// Builds an output path based on an input path and a new extension.
///
/// Example:
/// `data/raw.json` + `"bin"` → `data/raw.bin`
pub fn build_output_path<P: AsRef<Path>>(
	input_path: P,
	output_extension: &str,
) -> Result<PathBuf, ModelError> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path.file_stem().ok_or_else(|| {
		ModelError::InvalidArgument("input path has no filename".to_owned())
	})?;

	let mut output = PathBuf::from(parent);
	output.push(file_stem);
	output.set_extension(output_extension);

	Ok(output)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	#[test]
	fn json_round_trip_keeps_counts() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join(FREQUENCY_TABLE_FILE);

		let mut table: HashMap<String, u64> = HashMap::new();
		table.insert("cat".to_owned(), 2);
		table.insert("dog".to_owned(), 1);

		write_json(&path, &table).unwrap();
		let loaded: HashMap<String, u64> = read_json(&path).unwrap();
		assert_eq!(loaded, table);
	}

	#[test]
	fn malformed_table_reports_path() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("broken.json");
		std::fs::write(&path, "{ not json").unwrap();

		let err = read_json::<HashMap<String, u64>, _>(&path).unwrap_err();
		match err {
			ModelError::MalformedTable { path: p, .. } => assert_eq!(p, path),
			other => panic!("unexpected error: {other}"),
		}
	}

	#[test]
	fn output_path_swaps_extension() {
		let out = build_output_path("data/raw.json", "bin").unwrap();
		assert_eq!(out, PathBuf::from("data/raw.bin"));
	}
}
