//! Descriptor loading.
//!
//! Load is modeled as a tagged result: a document either came from disk
//! (`Found`) or was synthesized from the variant's template (`Synthesized`).
//! Both flow into the same validate/merge/write pipeline, so absence is not
//! a separate control-flow path.

use crate::error::{ReconcileError, ReconcileResult};
use camino::{Utf8Path, Utf8PathBuf};
use extmod_types::{DescriptorKind, DescriptorOrigin};
use fs_err as fs;
use std::io::ErrorKind;
use toml_edit::DocumentMut;
use tracing::debug;

/// A descriptor materialized in memory, ready for validation and merging.
#[derive(Debug)]
pub struct LoadedDescriptor {
    pub kind: DescriptorKind,
    pub path: Utf8PathBuf,
    pub origin: DescriptorOrigin,
    pub doc: DocumentMut,
    /// Raw on-disk text before this run, for change detection.
    /// `None` for synthesized documents.
    pub previous: Option<String>,
}

/// Read the descriptor at `<root>/<kind file name>`, or synthesize it from
/// the template when the file is absent.
///
/// Malformed content is a [`ReconcileError::Decode`]; no recovery is
/// attempted. Other read failures surface as [`ReconcileError::Io`].
pub fn load(root: &Utf8Path, kind: DescriptorKind, name: &str) -> ReconcileResult<LoadedDescriptor> {
    let path = root.join(kind.file_name());

    match fs::read_to_string(&path) {
        Ok(raw) => {
            let doc = raw
                .parse::<DocumentMut>()
                .map_err(|source| ReconcileError::Decode {
                    path: path.clone(),
                    source,
                })?;
            debug!(path = %path, "loaded descriptor from disk");
            Ok(LoadedDescriptor {
                kind,
                path,
                origin: DescriptorOrigin::Found,
                doc,
                previous: Some(raw),
            })
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            let doc = template(kind, name)
                .parse::<DocumentMut>()
                .map_err(|source| ReconcileError::Decode {
                    path: path.clone(),
                    source,
                })?;
            debug!(path = %path, "descriptor absent, synthesized from template");
            Ok(LoadedDescriptor {
                kind,
                path,
                origin: DescriptorOrigin::Synthesized,
                doc,
                previous: None,
            })
        }
        Err(source) => Err(ReconcileError::Io { path, source }),
    }
}

/// Default document for a descriptor variant, parameterized by project name.
///
/// Templates must contain every section the variant's validator requires.
fn template(kind: DescriptorKind, name: &str) -> String {
    match kind {
        DescriptorKind::Pyproject => format!(
            r#"[project]
name = "{name}"
requires-python = ">=3.12"
classifiers = [
    "Programming Language :: Rust",
    "Programming Language :: Python :: Implementation :: CPython",
    "Programming Language :: Python :: Implementation :: PyPy",
]
dynamic = ["version"]

[build-system]
requires = "{requires}"
build-backend = "{backend}"
"#,
            requires = crate::merge::MATURIN_REQUIRES,
            backend = crate::merge::MATURIN_BACKEND,
        ),
        DescriptorKind::CargoManifest => format!(
            r#"[package]
name = "{name}"
version = "0.1.0"
edition = "2021"

[lib]
name = "{name}"

[dependencies]
"#
        ),
    }
}
