use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for dictionary store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Failures surfaced by [`DictionaryStore`](crate::DictionaryStore).
///
/// A missing dictionary file and an already absent delete target are not
/// errors and never show up here.
#[derive(Error, Debug)]
pub enum StoreError {
	/// Depth outside the supported range, raised before any I/O.
	#[error("depth must be between {min} and {max}, got {depth}")]
	InvalidDepth {
		depth: usize,
		min: usize,
		max: usize,
	},

	/// The file exists but is not a well-formed dictionary record.
	#[error("dictionary file {} is corrupt: {reason}", path.display())]
	CorruptFile {
		path: PathBuf,
		reason: String,
	},

	/// Filesystem failure other than "file does not exist".
	#[error("I/O error on {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// The record could not be encoded. Nothing was written.
	#[error("failed to encode dictionary record: {reason}")]
	Encode {
		reason: String,
	},
}

impl StoreError {
	pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
		Self::Io { path: path.into(), source }
	}

	pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
		Self::CorruptFile { path: path.into(), reason: reason.into() }
	}

	/// True for a rejected depth.
	pub fn is_invalid_depth(&self) -> bool {
		matches!(self, Self::InvalidDepth { .. })
	}

	/// True when an existing file failed to parse.
	pub fn is_corrupt(&self) -> bool {
		matches!(self, Self::CorruptFile { .. })
	}

	/// True for filesystem failures.
	pub fn is_io(&self) -> bool {
		matches!(self, Self::Io { .. })
	}
}
