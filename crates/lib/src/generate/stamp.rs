//! Dependency stamp placeholders.
//!
//! Every object and target has a `<name>.depends.make` file that an external
//! dependency scanner later fills in. The generator only guarantees the file
//! exists so the include directives that reference it always resolve. An
//! existing file is never opened for writing, whatever it contains.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use tracing::{debug, warn};

use super::types::{GenerateError, StampOutcome};

/// Create the placeholder at `path` if no file exists there.
///
/// `header` is written first (the disclaimer), followed by a comment naming
/// `entity`. Creation uses create-new semantics: if another pass creates the
/// file concurrently, this call reports [`StampOutcome::Existing`].
pub fn ensure_placeholder(path: &Path, entity: &str, header: &str) -> Result<StampOutcome, GenerateError> {
  if path.exists() {
    return Ok(StampOutcome::Existing);
  }

  let file = match OpenOptions::new().write(true).create_new(true).open(path) {
    Ok(file) => file,
    Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(StampOutcome::Existing),
    Err(e) => {
      return Err(GenerateError::Open {
        path: path.to_path_buf(),
        source: e,
      });
    }
  };

  fill_or_remove(path, file, &placeholder_text(entity, header))?;

  debug!(path = %path.display(), entity, "created dependency placeholder");
  Ok(StampOutcome::Created)
}

/// Write `body` into the freshly created `file`, removing it again on failure.
///
/// A truncated placeholder would count as existing on every later pass and
/// never be repaired.
fn fill_or_remove(path: &Path, mut file: impl Write, body: &str) -> Result<(), GenerateError> {
  let Err(e) = file.write_all(body.as_bytes()).and_then(|()| file.flush()) else {
    return Ok(());
  };
  drop(file);
  if let Err(rm) = fs::remove_file(path) {
    warn!(path = %path.display(), error = %rm, "failed to remove partial placeholder");
  }
  Err(GenerateError::Write {
    path: path.to_path_buf(),
    source: e,
  })
}

fn placeholder_text(entity: &str, header: &str) -> String {
  format!(
    "{header}# Empty dependencies file for {entity}.\n\
     # This may be replaced when dependencies are built.\n"
  )
}
