//! Project identity: a name and a root path, each derivable from the other.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when the caller supplies neither a path nor a name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("either a project path or a project name must be supplied")]
    Missing,

    #[error("cannot derive a project name from path '{path}'")]
    Unnameable { path: Utf8PathBuf },
}

/// A project's name and root path.
///
/// Callers may supply either half; the other is derived (name from the last
/// path segment, path as `./<name>`). Resolution is pure: no I/O happens
/// here, so argument errors surface before any file is touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectIdentity {
    pub name: String,
    pub root: Utf8PathBuf,
}

impl ProjectIdentity {
    pub fn resolve(
        path: Option<&Utf8Path>,
        name: Option<&str>,
    ) -> Result<ProjectIdentity, IdentityError> {
        match (path, name) {
            (None, None) => Err(IdentityError::Missing),
            (None, Some(name)) => Ok(ProjectIdentity {
                name: name.to_string(),
                root: Utf8Path::new(".").join(name),
            }),
            (Some(path), name) => {
                let name = match name {
                    Some(n) => n.to_string(),
                    None => path
                        .file_name()
                        .map(str::to_string)
                        .ok_or_else(|| IdentityError::Unnameable {
                            path: path.to_path_buf(),
                        })?,
                };
                Ok(ProjectIdentity {
                    name,
                    root: path.to_path_buf(),
                })
            }
        }
    }
}
