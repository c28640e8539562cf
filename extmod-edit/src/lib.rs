//! Descriptor reconciliation engine.
//!
//! Responsibilities:
//! - Load a descriptor from disk, or synthesize it from a name-parameterized
//!   template when absent.
//! - Validate required top-level sections.
//! - Merge mandatory fields (overwrite / set-if-absent / union-append).
//! - Persist the full document atomically.
//!
//! One generic pipeline runs over both descriptor variants
//! ([`DescriptorKind::Pyproject`] and [`DescriptorKind::CargoManifest`]).
//! The pipeline is deterministic and idempotent: reconciling an
//! already-reconciled descriptor rewrites it byte-for-byte identical.
//!
//! [`DescriptorKind::Pyproject`]: extmod_types::DescriptorKind::Pyproject
//! [`DescriptorKind::CargoManifest`]: extmod_types::DescriptorKind::CargoManifest

mod error;
mod load;
mod merge;
mod validate;
mod write;

pub use error::{ReconcileError, ReconcileResult};
pub use load::{LoadedDescriptor, load};
pub use merge::{
    MATURIN_BACKEND, MATURIN_REQUIRES, PYO3_DEP, PYO3_VERSION, SENTINEL_FEATURE, merge,
};
pub use validate::validate;
pub use write::write;

use camino::Utf8Path;
use extmod_types::{DescriptorKind, DescriptorOutcome};
use tracing::debug;

/// Run the full load → validate → merge → write pipeline for one descriptor.
///
/// The document moves through the pipeline as a single owned value; nothing
/// re-reads the file mid-call. A decode or validation failure aborts before
/// any mutation reaches disk.
pub fn reconcile_descriptor(
    root: &Utf8Path,
    kind: DescriptorKind,
    name: &str,
) -> ReconcileResult<DescriptorOutcome> {
    let mut desc = load(root, kind, name)?;
    validate(&desc)?;
    merge(&mut desc.doc, kind);

    let rendered = desc.doc.to_string();
    let changed = desc.previous.as_deref() != Some(rendered.as_str());
    write(&desc.path, &rendered)?;

    debug!(path = %desc.path, origin = ?desc.origin, changed, "reconciled descriptor");
    Ok(DescriptorOutcome {
        kind,
        path: desc.path,
        origin: desc.origin,
        changed,
    })
}
