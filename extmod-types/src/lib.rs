//! Shared vocabulary types for the extmod workspace.
//!
//! # Design constraints
//! - Outcome types are intended to be serialized to disk or stdout.
//! - Be conservative with breaking changes.
//! - Prefer adding optional fields over changing semantics.

pub mod descriptor;
pub mod identity;
pub mod outcome;

pub use descriptor::DescriptorKind;
pub use identity::{IdentityError, ProjectIdentity};
pub use outcome::{DescriptorOrigin, DescriptorOutcome, ReconcileOutcome};
