//! Structural validation of loaded descriptors.

use crate::error::{ReconcileError, ReconcileResult};
use crate::load::LoadedDescriptor;
use camino::Utf8Path;
use extmod_types::DescriptorKind;
use toml_edit::DocumentMut;

/// Check that every required top-level section exists in the document.
///
/// A scalar at a section's key (e.g. `project = "x"`) is not a section the
/// merger could hold the mandated fields in, so it fails this check too
/// rather than being clobbered downstream.
///
/// Pure check, no side effects: callers must not proceed to the merger when
/// this fails. The error names the first missing section and the descriptor
/// path, whether the document came from disk or from a template.
pub fn validate(desc: &LoadedDescriptor) -> ReconcileResult<()> {
    validate_sections(&desc.doc, desc.kind, &desc.path)
}

pub(crate) fn validate_sections(
    doc: &DocumentMut,
    kind: DescriptorKind,
    path: &Utf8Path,
) -> ReconcileResult<()> {
    for section in kind.required_sections() {
        let is_section = doc
            .get(section)
            .is_some_and(|item| item.as_table_like().is_some());
        if !is_section {
            return Err(ReconcileError::MissingSection {
                path: path.to_path_buf(),
                section,
            });
        }
    }
    Ok(())
}
