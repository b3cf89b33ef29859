//! Word-level n-gram dictionary and its persistence.
//!
//! This module provides:
//! - The in-memory model types (`NGramDictionary`, `CapitalizedWords`)
//! - The owning file-backed store (`DictionaryStore`)
//! - The binary record read from and written to disk (internal)

use std::collections::BTreeMap;

use crate::error::{Result, StoreError};

/// File-backed owner of an n-gram dictionary.
///
/// Handles loading on construction, atomic saves and deletes.
pub mod store;

/// On-disk record (CBOR map with `depth`, `dictionary`, `capitalized_words`).
///
/// This module is not exposed publicly.
mod record;

/// Smallest supported n-gram depth.
pub const MIN_DEPTH: usize = 1;

/// Largest supported n-gram depth.
pub const MAX_DEPTH: usize = 5;

/// Depth used when the caller has no preference.
pub const DEFAULT_DEPTH: usize = 2;

/// Mapping from an n-gram key to the tokens observed after it.
///
/// Example: `{ "hello" => { "world" => 1 } }`
///
/// Ordered maps keep the encoded file byte-for-byte reproducible.
pub type NGramDictionary = BTreeMap<String, BTreeMap<String, u64>>;

/// Words seen capitalized in the training text, in first-seen order.
pub type CapitalizedWords = Vec<String>;

/// Joins up to `depth` tokens into a dictionary key.
///
/// Tokens are separated by a single space:
/// `["the", "quick"]` → `"the quick"`
pub fn ngram_key<S: AsRef<str>>(tokens: &[S]) -> String {
	let mut key = String::new();
	for (i, token) in tokens.iter().enumerate() {
		if i > 0 {
			key.push(' ');
		}
		key.push_str(token.as_ref());
	}
	key
}

/// Checks that `depth` lies in `[MIN_DEPTH, MAX_DEPTH]`.
pub(crate) fn check_depth(depth: usize) -> Result<usize> {
	if (MIN_DEPTH..=MAX_DEPTH).contains(&depth) {
		Ok(depth)
	} else {
		Err(StoreError::InvalidDepth { depth, min: MIN_DEPTH, max: MAX_DEPTH })
	}
}
