//! Serializable record of what one reconciliation run did.

use crate::descriptor::DescriptorKind;
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Where the in-memory document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptorOrigin {
    /// The file existed on disk and parsed cleanly.
    Found,
    /// The file was absent; the document was synthesized from the template.
    Synthesized,
}

/// Result of reconciling a single descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorOutcome {
    pub kind: DescriptorKind,
    pub path: Utf8PathBuf,
    pub origin: DescriptorOrigin,
    /// True when the serialized document differs from what was on disk
    /// before the run (always true for synthesized documents).
    pub changed: bool,
}

/// Result of a full `init` run over one project root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileOutcome {
    pub project: String,
    pub root: Utf8PathBuf,
    pub descriptors: Vec<DescriptorOutcome>,
    /// True when this run created the empty `src/lib.rs` placeholder.
    pub entry_file_created: bool,
}
