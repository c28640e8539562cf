//! The two descriptor variants a project carries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two project descriptors an engine pass operates on.
///
/// The reconciliation engine is generic over this: the kind selects the
/// file name, the required top-level sections, and the merge rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DescriptorKind {
    /// The Python package descriptor (`pyproject.toml`).
    Pyproject,
    /// The native library descriptor (`Cargo.toml`).
    CargoManifest,
}

impl DescriptorKind {
    /// File name of this descriptor relative to the project root.
    pub fn file_name(self) -> &'static str {
        match self {
            DescriptorKind::Pyproject => "pyproject.toml",
            DescriptorKind::CargoManifest => "Cargo.toml",
        }
    }

    /// Top-level sections that must exist after load, whether the document
    /// came from disk or from a template.
    pub fn required_sections(self) -> &'static [&'static str] {
        match self {
            DescriptorKind::Pyproject => &["project"],
            DescriptorKind::CargoManifest => &["package", "lib", "dependencies"],
        }
    }

    /// Reconciliation order: package descriptor first, then native descriptor.
    pub fn reconcile_order() -> [DescriptorKind; 2] {
        [DescriptorKind::Pyproject, DescriptorKind::CargoManifest]
    }
}

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}
