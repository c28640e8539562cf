//! Embeddable orchestration core for extmod.
//!
//! Provides clap-free entry points suitable for linking into a host process:
//!
//! - [`run_init`](pipeline::run_init) — resolve the project identity,
//!   optionally scaffold a fresh tree, reconcile both descriptors, and
//!   ensure the entry-point source file exists.
//! - [`run_build`](pipeline::run_build) — compile the native library and
//!   install the produced wheels into the active environment.
//!
//! All subprocess execution goes through the [`ToolRunner`](ports::ToolRunner)
//! port; [`adapters`] provides the default process-spawning implementation.

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod settings;

// Re-export the engine's error type so callers don't need extmod-edit directly.
pub use extmod_edit::ReconcileError;
pub use extmod_types::{ProjectIdentity, ReconcileOutcome};
