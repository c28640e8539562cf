//! Init and build pipelines, composed from the engine and the tool port.

use crate::ports::ToolRunner;
use crate::settings::{BuildSettings, InitSettings};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use extmod_edit::{ReconcileError, reconcile_descriptor};
use extmod_types::{DescriptorKind, ProjectIdentity, ReconcileOutcome};
use fs_err as fs;
use tracing::{debug, info};

/// Error type for pipeline results.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

/// Bring a project into the extension-module layout.
///
/// Resolves the identity (argument errors surface before any I/O), optionally
/// scaffolds a fresh tree, reconciles `pyproject.toml` then `Cargo.toml`, and
/// finally ensures `src/lib.rs` exists. A failure on the second descriptor
/// does not roll back the first; callers tolerate partial success.
pub fn run_init(
    settings: &InitSettings,
    tools: &dyn ToolRunner,
) -> Result<ReconcileOutcome, ToolError> {
    let identity =
        ProjectIdentity::resolve(settings.path.as_deref(), settings.name.as_deref())
            .map_err(ReconcileError::from)?;

    if settings.create {
        tools
            .run("maturin", &["new", "-b", "pyo3", identity.root.as_str()], None)
            .context("scaffold project with maturin new")?;
    } else if !identity.root.is_dir() {
        return Err(ReconcileError::RootMissing {
            root: identity.root.clone(),
        }
        .into());
    }

    let mut outcome = ReconcileOutcome {
        project: identity.name.clone(),
        root: identity.root.clone(),
        ..ReconcileOutcome::default()
    };

    for kind in DescriptorKind::reconcile_order() {
        let descriptor = reconcile_descriptor(&identity.root, kind, &identity.name)?;
        outcome.descriptors.push(descriptor);
    }

    outcome.entry_file_created = ensure_entry_file(&identity.root)?;

    info!(project = %identity.name, root = %identity.root, "project reconciled");
    Ok(outcome)
}

/// Create the empty `src/lib.rs` placeholder iff it is absent.
///
/// An existing entry file is never rewritten, so content produced by a prior
/// scaffold or build step survives repeated runs.
fn ensure_entry_file(root: &Utf8Path) -> Result<bool, ReconcileError> {
    let src_dir = root.join("src");
    let entry = src_dir.join("lib.rs");

    if entry.is_file() {
        return Ok(false);
    }

    fs::create_dir_all(&src_dir).map_err(|source| ReconcileError::Io {
        path: src_dir.clone(),
        source,
    })?;
    fs::write(&entry, "").map_err(|source| ReconcileError::Io {
        path: entry.clone(),
        source,
    })?;

    debug!(path = %entry, "created empty entry file");
    Ok(true)
}

/// Compile the native library and install the produced wheels.
///
/// Runs `maturin build --verbose` in the project root, then `pip install`
/// for each wheel under `target/wheels/`, in path order. Both tools run
/// with the project root as their working directory, so wheel paths are
/// handed to pip relative to the root.
pub fn run_build(settings: &BuildSettings, tools: &dyn ToolRunner) -> Result<(), ToolError> {
    if !settings.root.is_dir() {
        return Err(ReconcileError::RootMissing {
            root: settings.root.clone(),
        }
        .into());
    }

    tools
        .run("maturin", &["build", "--verbose"], Some(&settings.root))
        .context("maturin build")?;

    let wheels = find_wheels(&settings.root).map_err(ToolError::Internal)?;
    if wheels.is_empty() {
        return Err(ToolError::Internal(anyhow::anyhow!(
            "no wheels produced under {}/target/wheels",
            settings.root
        )));
    }

    for wheel in &wheels {
        tools
            .run("pip", &["install", wheel], Some(&settings.root))
            .with_context(|| format!("pip install {wheel}"))?;
    }

    info!(root = %settings.root, wheels = wheels.len(), "built and installed");
    Ok(())
}

/// Wheel paths relative to the project root, since pip runs with the root
/// as its working directory. A root-prefixed path would resolve against the
/// root a second time for any relative root.
fn find_wheels(root: &Utf8Path) -> anyhow::Result<Vec<String>> {
    let pattern = root.join("target").join("wheels").join("*.whl");

    let mut wheels = Vec::new();
    for entry in glob::glob(pattern.as_str()).context("glob target/wheels/*.whl")? {
        let path = entry.map_err(|e| anyhow::anyhow!("glob error: {e}"))?;
        let path = Utf8PathBuf::from_path_buf(path)
            .map_err(|p| anyhow::anyhow!("non-utf8 wheel path: {}", p.display()))?;
        let rel = path.strip_prefix(root).unwrap_or(path.as_path());
        wheels.push(rel.to_string());
    }

    // Deterministic install order.
    wheels.sort();
    Ok(wheels)
}
