use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::Builder;

/// Reads a whole file into memory.
///
/// - Returns `Ok(None)` if the file does not exist
/// - Any other failure (permissions, path is a directory...) is an error
pub(crate) fn read_optional<P: AsRef<Path>>(path: P) -> io::Result<Option<Vec<u8>>> {
	match fs::read(path) {
		Ok(bytes) => Ok(Some(bytes)),
		Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
		Err(e) => Err(e),
	}
}

/// Directory a file lives in.
///
/// Example:
/// - `data/model.cbor` → `data`
/// - `model.cbor` → `.`
pub(crate) fn parent_dir<P: AsRef<Path>>(path: P) -> PathBuf {
	match path.as_ref().parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
		_ => PathBuf::from("."),
	}
}

/// Replaces the content of `path` with `bytes`.
///
/// The bytes go to a temporary file next to the target which is synced,
/// then renamed over it. Readers see either the old content or the new one.
/// On failure the temporary file is removed and the target is left as-is.
///
/// Permissions of an existing target are carried over. A new file gets
/// `0o666` minus the umask, like a plain `File::create`.
pub(crate) fn write_atomic<P: AsRef<Path>>(path: P, bytes: &[u8]) -> io::Result<()> {
	let path = path.as_ref();
	let file_name = path
		.file_name()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?;

	let existing = match fs::metadata(path) {
		Ok(metadata) => Some(metadata.permissions()),
		Err(e) if e.kind() == io::ErrorKind::NotFound => None,
		Err(e) => return Err(e),
	};

	let prefix = format!(".{}.", file_name.to_string_lossy());
	let mut builder = Builder::new();
	builder.prefix(&prefix).suffix(".tmp");
	#[cfg(unix)]
	{
		use std::os::unix::fs::PermissionsExt;
		if existing.is_none() {
			// The mode given to open(2) is filtered by the umask
			builder.permissions(fs::Permissions::from_mode(0o666));
		}
	}
	let mut tmp = builder.tempfile_in(parent_dir(path))?;
	if let Some(permissions) = existing {
		tmp.as_file().set_permissions(permissions)?;
	}

	tmp.write_all(bytes)?;
	tmp.as_file().sync_all()?;
	tmp.persist(path).map_err(|e| e.error)?;
	Ok(())
}

/// Removes a file.
///
/// Returns `false` if there was nothing to remove.
pub(crate) fn remove_if_exists<P: AsRef<Path>>(path: P) -> io::Result<bool> {
	match fs::remove_file(path) {
		Ok(()) => Ok(true),
		Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
		Err(e) => Err(e),
	}
}
