use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::record;
use super::{check_depth, CapitalizedWords, NGramDictionary, DEFAULT_DEPTH};
use crate::error::{Result, StoreError};
use crate::io;

/// Owner of an n-gram dictionary bound to a file.
///
/// The store holds the model in memory and only touches the file during
/// construction, [`reload`](Self::reload), [`save`](Self::save) and
/// [`delete`](Self::delete). No handle is kept open in between.
///
/// # Responsibilities
/// - Validate the requested depth before any I/O
/// - Load the file if it exists, otherwise start empty
/// - Save atomically, replacing the whole file
///
/// # Invariants
/// - `depth` is always in `[MIN_DEPTH, MAX_DEPTH]`
/// - `dictionary` and `capitalized_words` are either both fresh and empty or
///   both come from the same successfully decoded file
///
/// # Notes
/// - A file recorded with another depth wins over the requested one
/// - Nothing serializes access to the same path across stores or processes
#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryStore {
	path: PathBuf,
	requested_depth: usize,
	depth: usize,
	dictionary: NGramDictionary,
	capitalized_words: CapitalizedWords,
}

impl DictionaryStore {
	/// Creates a store bound to `path` and loads it.
	///
	/// # Behavior
	/// - Rejects depths outside `[MIN_DEPTH, MAX_DEPTH]` before touching the disk
	/// - If the file is absent, starts with an empty model at `depth`
	/// - If the file exists, takes depth, dictionary and capitalized words from it
	///
	/// # Errors
	/// - [`StoreError::InvalidDepth`] for an out of range depth
	/// - [`StoreError::CorruptFile`] if the file exists but does not decode
	/// - [`StoreError::Io`] if the file cannot be read
	pub fn new<P: AsRef<Path>>(path: P, depth: usize) -> Result<Self> {
		let depth = check_depth(depth)?;
		let mut store = Self {
			path: path.as_ref().to_path_buf(),
			requested_depth: depth,
			depth,
			dictionary: NGramDictionary::new(),
			capitalized_words: CapitalizedWords::new(),
		};
		store.reload()?;
		Ok(store)
	}

	/// Same as [`new`](Self::new) with [`DEFAULT_DEPTH`].
	pub fn with_default_depth<P: AsRef<Path>>(path: P) -> Result<Self> {
		Self::new(path, DEFAULT_DEPTH)
	}

	/// Re-reads the bound file, discarding in-memory changes.
	///
	/// A missing file resets the model to empty at the depth requested on
	/// construction. On error the in-memory model is left untouched.
	pub fn reload(&mut self) -> Result<()> {
		let bytes = match io::read_optional(&self.path) {
			Ok(Some(bytes)) => bytes,
			Ok(None) => {
				debug!("{} does not exist, starting with an empty dictionary", self.path.display());
				self.depth = self.requested_depth;
				self.dictionary = NGramDictionary::new();
				self.capitalized_words = CapitalizedWords::new();
				return Ok(());
			}
			Err(e) => return Err(StoreError::io(&self.path, e)),
		};

		let loaded = record::decode(&bytes).map_err(|reason| StoreError::corrupt(&self.path, reason))?;

		if loaded.depth != self.requested_depth {
			warn!(
				"{} was saved with depth {}, ignoring requested depth {}",
				self.path.display(),
				loaded.depth,
				self.requested_depth
			);
		}
		debug!(
			"Loaded {} n-grams and {} capitalized words from {} (depth {})",
			loaded.dictionary.len(),
			loaded.capitalized_words.len(),
			self.path.display(),
			loaded.depth
		);

		self.depth = loaded.depth;
		self.dictionary = loaded.dictionary;
		self.capitalized_words = loaded.capitalized_words;
		Ok(())
	}

	/// Writes the model to the bound path, replacing any previous file.
	///
	/// The record is fully encoded before the disk is touched, then written
	/// through a temporary file renamed over the target.
	///
	/// # Errors
	/// - [`StoreError::Encode`] if the record cannot be encoded
	/// - [`StoreError::Io`] if writing fails; the previous file is kept as-is
	pub fn save(&self) -> Result<()> {
		let bytes = record::encode(self.depth, &self.dictionary, &self.capitalized_words)
			.map_err(|reason| StoreError::Encode { reason })?;
		io::write_atomic(&self.path, &bytes).map_err(|e| StoreError::io(&self.path, e))?;
		debug!("Saved {} bytes to {}", bytes.len(), self.path.display());
		Ok(())
	}

	/// Deletes a dictionary file.
	///
	/// `target` is either a path or a store (resolved to its bound path).
	/// A store's in-memory model is not affected.
	///
	/// # Returns
	/// - [`DeleteOutcome::Deleted`] if a file was removed
	/// - [`DeleteOutcome::NotFound`] if there was nothing to remove
	///
	/// # Errors
	/// [`StoreError::Io`] if the file exists but cannot be removed.
	pub fn delete<P: AsRef<Path>>(target: P) -> Result<DeleteOutcome> {
		let path = target.as_ref();
		let outcome = match io::remove_if_exists(path) {
			Ok(true) => DeleteOutcome::Deleted(path.to_path_buf()),
			Ok(false) => DeleteOutcome::NotFound(path.to_path_buf()),
			Err(e) => return Err(StoreError::io(path, e)),
		};
		debug!("{outcome}");
		Ok(outcome)
	}

	/// Path the store loads from and saves to.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Current depth (from the file if one was loaded).
	pub fn depth(&self) -> usize {
		self.depth
	}

	pub fn dictionary(&self) -> &NGramDictionary {
		&self.dictionary
	}

	/// Mutable access for the training side.
	pub fn dictionary_mut(&mut self) -> &mut NGramDictionary {
		&mut self.dictionary
	}

	pub fn capitalized_words(&self) -> &CapitalizedWords {
		&self.capitalized_words
	}

	/// Mutable access for the training side. Duplicates are not filtered.
	pub fn capitalized_words_mut(&mut self) -> &mut CapitalizedWords {
		&mut self.capitalized_words
	}

	/// True if the dictionary holds no n-gram.
	pub fn is_empty(&self) -> bool {
		self.dictionary.is_empty()
	}

	/// Consumes the store, returning `(depth, dictionary, capitalized_words)`.
	pub fn into_parts(self) -> (usize, NGramDictionary, CapitalizedWords) {
		(self.depth, self.dictionary, self.capitalized_words)
	}
}

impl AsRef<Path> for DictionaryStore {
	fn as_ref(&self) -> &Path {
		&self.path
	}
}

/// Result of [`DictionaryStore::delete`].
///
/// Both variants are successful outcomes; `Display` gives a message fit
/// for end users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
	Deleted(PathBuf),
	NotFound(PathBuf),
}

impl DeleteOutcome {
	/// True if a file was actually removed.
	pub fn is_deleted(&self) -> bool {
		matches!(self, Self::Deleted(_))
	}

	pub fn path(&self) -> &Path {
		match self {
			Self::Deleted(path) | Self::NotFound(path) => path,
		}
	}

	/// Human-readable confirmation, same as `to_string()`.
	pub fn message(&self) -> String {
		self.to_string()
	}
}

impl fmt::Display for DeleteOutcome {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Deleted(path) => write!(f, "Deleted {}", path.display()),
			Self::NotFound(path) => write!(f, "{} does not exist.", path.display()),
		}
	}
}
