//! Descriptor persistence.

use crate::error::{ReconcileError, ReconcileResult};
use camino::Utf8Path;
use std::io::Write as _;
use tempfile::NamedTempFile;
use tracing::debug;

/// Serialize the full document text to `path`, replacing prior content.
///
/// The write goes through a temp file in the target directory followed by a
/// rename, so the descriptor on disk is never partially written. Failures
/// surface as [`ReconcileError::Io`] and are not retried.
pub fn write(path: &Utf8Path, contents: &str) -> ReconcileResult<()> {
    let dir = parent_dir(path);

    let io_err = |source: std::io::Error| ReconcileError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(contents.as_bytes()).map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    debug!(path = %path, bytes = contents.len(), "wrote descriptor");
    Ok(())
}

/// Directory the temp file is created in. A bare relative filename has an
/// empty parent, which is not a directory the temp file API accepts.
fn parent_dir(path: &Utf8Path) -> &Utf8Path {
    match path.parent() {
        Some(dir) if !dir.as_str().is_empty() => dir,
        _ => Utf8Path::new("."),
    }
}
