//! Copy-if-different file replacement.
//!
//! Rule files are included by other rule files that a running build may be
//! reading, so a file is never rewritten in place. New content goes to a
//! uniquely named temporary file in the same directory and is renamed over the
//! destination only when it differs from what is already there.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use tempfile::Builder;
use tracing::debug;

use super::types::{GenerateError, WriteOutcome};

/// Write `contents` to `path` unless the file already holds exactly those bytes.
///
/// An unchanged file keeps its modification time. A replaced file keeps its
/// permissions; a new one gets the mode a plain create would give it under the
/// process umask. The parent directory must exist.
pub fn write_if_different(path: &Path, contents: &str) -> Result<WriteOutcome, GenerateError> {
  let existed = match fs::read(path) {
    Ok(existing) if existing == contents.as_bytes() => {
      debug!(path = %path.display(), "content unchanged");
      return Ok(WriteOutcome::Unchanged);
    }
    Ok(_) => true,
    Err(e) if e.kind() == io::ErrorKind::NotFound => false,
    // Unreadable: let the replacement below surface the real error.
    Err(_) => true,
  };
  let existing_permissions = existed
    .then(|| fs::metadata(path).ok())
    .flatten()
    .filter(|meta| meta.is_file())
    .map(|meta| meta.permissions());

  let dir = path
    .parent()
    .filter(|p| !p.as_os_str().is_empty())
    .unwrap_or_else(|| Path::new("."));

  let mut temp = new_file_builder().tempfile_in(dir).map_err(|e| GenerateError::Open {
    path: path.to_path_buf(),
    source: e,
  })?;

  if let Some(permissions) = existing_permissions {
    temp
      .as_file()
      .set_permissions(permissions)
      .map_err(|e| GenerateError::Write {
        path: path.to_path_buf(),
        source: e,
      })?;
  }

  temp
    .write_all(contents.as_bytes())
    .and_then(|()| temp.flush())
    .map_err(|e| GenerateError::Write {
      path: path.to_path_buf(),
      source: e,
    })?;

  temp.persist(path).map_err(|e| GenerateError::Persist {
    path: path.to_path_buf(),
    source: e.error,
  })?;

  let outcome = if existed {
    WriteOutcome::Updated
  } else {
    WriteOutcome::Created
  };
  debug!(path = %path.display(), ?outcome, "file written");
  Ok(outcome)
}

/// Temp file builder whose files start out like `File::create` would make them.
///
/// `tempfile` defaults to 0600; asking for 0666 lets the umask decide instead.
fn new_file_builder() -> Builder<'static, 'static> {
  #[cfg_attr(not(unix), allow(unused_mut))]
  let mut builder = Builder::new();
  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt;
    builder.permissions(fs::Permissions::from_mode(0o666));
  }
  builder
}

/// Overwrite `path` unconditionally.
pub fn write_always(path: &Path, contents: &str) -> Result<(), GenerateError> {
  let mut file = File::create(path).map_err(|e| GenerateError::Open {
    path: path.to_path_buf(),
    source: e,
  })?;
  file
    .write_all(contents.as_bytes())
    .and_then(|()| file.flush())
    .map_err(|e| GenerateError::Write {
      path: path.to_path_buf(),
      source: e,
    })
}

/// Create `dir` and its parents. Failure is returned, not logged.
pub fn create_dir(dir: &Path) -> Result<(), GenerateError> {
  fs::create_dir_all(dir).map_err(|e| GenerateError::CreateDir {
    path: dir.to_path_buf(),
    source: e,
  })
}
