//! Error types for descriptor reconciliation.
//!
//! One closed taxonomy covers the whole pipeline:
//! - argument errors (insufficient project identity)
//! - absence errors (project root missing, creation not requested)
//! - decode errors (descriptor present but not valid TOML)
//! - structural errors (required section missing after load)
//! - I/O errors (read or write failure)

use camino::Utf8PathBuf;
use extmod_types::IdentityError;
use thiserror::Error;

/// The top-level error type for one reconciliation call.
///
/// Every variant is fatal to the current call; nothing is retried. A failure
/// while reconciling the second descriptor does not roll back the first.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Caller supplied neither a path nor a name.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// The project root does not exist and creation was not requested.
    #[error("project root '{root}' does not exist")]
    RootMissing { root: Utf8PathBuf },

    /// A descriptor file exists but is not syntactically valid TOML.
    /// No recovery is attempted.
    #[error("failed to parse {path}: {source}")]
    Decode {
        path: Utf8PathBuf,
        #[source]
        source: toml_edit::TomlError,
    },

    /// A required top-level section is missing from a loaded document.
    #[error("'{section}' section is required for {path}")]
    MissingSection {
        path: Utf8PathBuf,
        section: &'static str,
    },

    /// A read or write failed at the filesystem level.
    #[error("io error on {path}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using ReconcileError.
pub type ReconcileResult<T> = Result<T, ReconcileError>;
