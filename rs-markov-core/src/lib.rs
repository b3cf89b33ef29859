//! Persistence layer for word-level n-gram (Markov chain) dictionaries.
//!
//! This crate provides:
//! - An owning store binding an in-memory n-gram dictionary to a file
//! - A compact, self-describing binary record format (CBOR)
//! - Atomic saves and idempotent deletes
//!
//! Training and generation are left to the caller, which mutates the
//! dictionary through the references the store hands out.
//!
//! Files are CBOR, not MessagePack: dictionaries written by the Ruby
//! `marky_markov` gem are not readable and load as
//! [`StoreError::CorruptFile`].

/// N-gram dictionary store and its on-disk record.
pub mod dictionary;

/// Error types shared by all store operations.
pub mod error;

/// I/O utilities (optional reads, atomic writes, removal).
///
/// Not exposed
pub(crate) mod io;

pub use dictionary::store::{DeleteOutcome, DictionaryStore};
pub use dictionary::{ngram_key, CapitalizedWords, NGramDictionary, DEFAULT_DEPTH, MAX_DEPTH, MIN_DEPTH};
pub use error::{Result, StoreError};
