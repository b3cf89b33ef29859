use serde::{Deserialize, Serialize};

use super::{CapitalizedWords, NGramDictionary, MAX_DEPTH, MIN_DEPTH};

/// Borrowed view of a store, used for encoding without cloning.
#[derive(Serialize)]
struct RecordRef<'a> {
	depth: usize,
	dictionary: &'a NGramDictionary,
	capitalized_words: &'a [String],
}

/// Decoded content of a dictionary file.
///
/// # Invariants
/// - All three fields are required; unknown fields are skipped
/// - `depth` lies in `[MIN_DEPTH, MAX_DEPTH]` once returned by `decode`
#[derive(Deserialize, Debug, PartialEq)]
pub(crate) struct DictionaryRecord {
	pub(crate) depth: usize,
	pub(crate) dictionary: NGramDictionary,
	pub(crate) capitalized_words: CapitalizedWords,
}

/// Encodes the three fields as a single CBOR map.
///
/// Field order on disk is `depth`, `dictionary`, `capitalized_words`.
pub(crate) fn encode(depth: usize, dictionary: &NGramDictionary, capitalized_words: &[String]) -> Result<Vec<u8>, String> {
	let record = RecordRef { depth, dictionary, capitalized_words };
	let mut bytes = Vec::new();
	ciborium::into_writer(&record, &mut bytes).map_err(|e| e.to_string())?;
	Ok(bytes)
}

/// Decodes a full file content.
///
/// # Errors
/// Returns a human-readable reason if:
/// - the bytes are not valid CBOR, or the top level is not a map
/// - a required field is missing or has the wrong type
/// - bytes remain after the record
/// - the stored depth is out of range
pub(crate) fn decode(bytes: &[u8]) -> Result<DictionaryRecord, String> {
	if bytes.is_empty() {
		return Err("file is empty".to_owned());
	}

	let mut reader = bytes;
	let record: DictionaryRecord = ciborium::from_reader(&mut reader).map_err(|e| e.to_string())?;

	if !reader.is_empty() {
		return Err(format!("{} trailing bytes after record", reader.len()));
	}
	if !(MIN_DEPTH..=MAX_DEPTH).contains(&record.depth) {
		return Err(format!(
			"stored depth {} is outside {}..={}",
			record.depth, MIN_DEPTH, MAX_DEPTH
		));
	}

	Ok(record)
}
