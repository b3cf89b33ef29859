//! Integration tests for the dictionary store.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use rs_markov_core::{ngram_key, DeleteOutcome, DictionaryStore, NGramDictionary};
use tempfile::TempDir;

/// Helper to get an unused dictionary path inside a fresh temp dir.
fn dictionary_path() -> (TempDir, PathBuf) {
	let temp_dir = TempDir::new().expect("Failed to create temp dir");
	let path = temp_dir.path().join("dictionary.cbor");
	(temp_dir, path)
}

#[test]
fn test_hello_world_scenario() {
	let (_temp, path) = dictionary_path();

	let mut store = DictionaryStore::new(&path, 2).expect("open new store");
	assert!(store.dictionary().is_empty());
	assert!(store.capitalized_words().is_empty());

	store
		.dictionary_mut()
		.insert("hello".to_owned(), BTreeMap::from([("world".to_owned(), 1)]));
	store.capitalized_words_mut().push("World".to_owned());
	store.save().expect("save");
	drop(store);

	let reopened = DictionaryStore::new(&path, 2).expect("reopen");
	let expected: NGramDictionary = BTreeMap::from([(
		"hello".to_owned(),
		BTreeMap::from([("world".to_owned(), 1)]),
	)]);
	assert_eq!(reopened.dictionary(), &expected);
	assert_eq!(reopened.capitalized_words(), &vec!["World".to_owned()]);
	assert_eq!(reopened.depth(), 2);
}

#[test]
fn test_depth_out_of_range_creates_no_file() {
	let (_temp, path) = dictionary_path();

	for depth in [0, 6, 42] {
		let err = DictionaryStore::new(&path, depth).expect_err("depth must be rejected");
		assert!(err.is_invalid_depth(), "depth {depth}: {err}");
	}
	assert!(!path.exists());
}

#[test]
fn test_missing_file_is_not_created_until_save() {
	let (_temp, path) = dictionary_path();

	let store = DictionaryStore::new(&path, 3).expect("open");
	assert!(store.is_empty());
	assert!(!path.exists());

	store.save().expect("save");
	assert!(path.exists());
}

#[test]
fn test_corrupt_file_is_reported() {
	let (_temp, path) = dictionary_path();
	fs::write(&path, b"\x00\x01 definitely not a dictionary record").expect("seed");

	let err = DictionaryStore::new(&path, 2).expect_err("corrupt file");
	assert!(err.is_corrupt(), "{err}");
	assert!(err.to_string().contains("dictionary.cbor"));
}

#[test]
fn test_empty_file_is_corrupt() {
	let (_temp, path) = dictionary_path();
	fs::write(&path, b"").expect("seed");

	let err = DictionaryStore::new(&path, 2).expect_err("empty file");
	assert!(err.is_corrupt());
}

#[test]
fn test_directory_path_is_io_error() {
	let temp = TempDir::new().expect("Failed to create temp dir");

	let err = DictionaryStore::new(temp.path(), 2).expect_err("directory");
	assert!(err.is_io(), "{err}");
}

#[test]
fn test_file_depth_overrides_requested_depth() {
	let (_temp, path) = dictionary_path();
	DictionaryStore::new(&path, 2).expect("open").save().expect("save");

	let store = DictionaryStore::new(&path, 3).expect("reopen");
	assert_eq!(store.depth(), 2);
}

#[test]
fn test_save_into_missing_directory_fails() {
	let temp = TempDir::new().expect("Failed to create temp dir");
	let path = temp.path().join("missing").join("dictionary.cbor");

	let store = DictionaryStore::new(&path, 2).expect("open");
	let err = store.save().expect_err("no parent directory");
	assert!(err.is_io());
	assert!(!path.exists());
}

#[test]
fn test_failed_save_keeps_previous_dictionary() {
	let temp = TempDir::new().expect("Failed to create temp dir");
	let path = temp.path().join("dictionary.cbor");

	let mut store = DictionaryStore::new(&path, 2).expect("open");
	store.capitalized_words_mut().push("Old".to_owned());
	store.save().expect("first save");
	let saved = fs::read(&path).expect("read saved");

	// Move the valid dictionary inside a directory sitting at the target path,
	// so the final rename of the next save fails
	let inner = temp.path().join("inner.cbor");
	fs::rename(&path, &inner).expect("move aside");
	fs::create_dir(&path).expect("directory at target");
	fs::rename(&inner, path.join("inner.cbor")).expect("move inside");

	store.capitalized_words_mut().push("New".to_owned());
	let err = store.save().expect_err("rename over a non-empty directory");
	assert!(err.is_io(), "{err}");

	assert_eq!(fs::read(path.join("inner.cbor")).expect("read kept"), saved);
	let leftovers: Vec<String> = fs::read_dir(temp.path())
		.expect("list")
		.filter_map(|entry| entry.ok())
		.map(|entry| entry.file_name().to_string_lossy().into_owned())
		.filter(|name| name.ends_with(".tmp"))
		.collect();
	assert!(leftovers.is_empty(), "{leftovers:?}");

	let kept = DictionaryStore::new(path.join("inner.cbor"), 2).expect("reopen kept");
	assert_eq!(kept.capitalized_words(), &vec!["Old".to_owned()]);
}

#[cfg(unix)]
#[test]
fn test_save_keeps_file_mode() {
	use std::os::unix::fs::PermissionsExt;

	let (_temp, path) = dictionary_path();
	let store = DictionaryStore::new(&path, 2).expect("open");
	store.save().expect("first save");
	fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).expect("chmod");

	store.save().expect("second save");

	let mode = fs::metadata(&path).expect("metadata").permissions().mode() & 0o777;
	assert_eq!(mode, 0o644);
}

#[test]
fn test_save_overwrites_previous_content() {
	let (temp, path) = dictionary_path();

	let mut store = DictionaryStore::new(&path, 2).expect("open");
	store.capitalized_words_mut().push("First".to_owned());
	store.save().expect("first save");

	store.capitalized_words_mut().clear();
	store.capitalized_words_mut().push("Second".to_owned());
	store.save().expect("second save");

	let reopened = DictionaryStore::new(&path, 2).expect("reopen");
	assert_eq!(reopened.capitalized_words(), &vec!["Second".to_owned()]);

	// Only the target remains, no leftover temporary file
	let entries = fs::read_dir(temp.path()).expect("list").count();
	assert_eq!(entries, 1);
}

#[test]
fn test_delete_twice() {
	let (_temp, path) = dictionary_path();
	DictionaryStore::new(&path, 2).expect("open").save().expect("save");

	let first = DictionaryStore::delete(&path).expect("first delete");
	assert_eq!(first, DeleteOutcome::Deleted(path.clone()));
	assert_eq!(first.to_string(), format!("Deleted {}", path.display()));
	assert!(!path.exists());

	let second = DictionaryStore::delete(&path).expect("second delete");
	assert!(!second.is_deleted());
	assert_eq!(second.to_string(), format!("{} does not exist.", path.display()));
}

#[test]
fn test_ngram_keys_round_trip() {
	let (_temp, path) = dictionary_path();

	let mut store = DictionaryStore::new(&path, 3).expect("open");
	let key = ngram_key(&["the", "quick", "brown"]);
	*store
		.dictionary_mut()
		.entry(key.clone())
		.or_default()
		.entry("fox".to_owned())
		.or_insert(0) += 2;
	store.save().expect("save");

	let reopened = DictionaryStore::new(&path, 3).expect("reopen");
	assert_eq!(reopened.dictionary()[&key]["fox"], 2);
}

mod property_tests {
	use super::*;
	use proptest::prelude::*;

	fn dictionaries() -> impl Strategy<Value = NGramDictionary> {
		prop::collection::btree_map(
			"\\PC{0,16}",
			prop::collection::btree_map("\\PC{1,8}", any::<u64>(), 0..4),
			0..16,
		)
	}

	proptest! {
		#![proptest_config(ProptestConfig::with_cases(64))]

		#[test]
		fn save_then_load_is_identity(
			depth in 1usize..=5,
			dictionary in dictionaries(),
			words in prop::collection::vec("[A-Z][a-z]{0,8}", 0..8),
		) {
			let (_temp, path) = dictionary_path();

			let mut store = DictionaryStore::new(&path, depth).expect("open");
			*store.dictionary_mut() = dictionary.clone();
			*store.capitalized_words_mut() = words.clone();
			store.save().expect("save");

			let reopened = DictionaryStore::new(&path, 1).expect("reopen");
			prop_assert_eq!(reopened.depth(), depth);
			prop_assert_eq!(reopened.dictionary(), &dictionary);
			prop_assert_eq!(reopened.capitalized_words(), &words);
		}

		#[test]
		fn out_of_range_depth_is_rejected(depth in 6usize..1000) {
			let (_temp, path) = dictionary_path();
			let rejected = DictionaryStore::new(&path, depth)
				.err()
				.is_some_and(|e| e.is_invalid_depth());
			prop_assert!(rejected);
			prop_assert!(!path.exists());
		}
	}
}
