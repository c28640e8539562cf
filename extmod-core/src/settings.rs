//! Clap-free settings for the init and build pipelines.

use camino::Utf8PathBuf;

/// Settings for the init pipeline.
///
/// At least one of `path` and `name` must be set; the other is derived.
#[derive(Debug, Clone, Default)]
pub struct InitSettings {
    /// Project root. Defaults to `./<name>` when only a name is given.
    pub path: Option<Utf8PathBuf>,

    /// Project name. Defaults to the last segment of `path`.
    pub name: Option<String>,

    /// Scaffold a fresh project tree (`maturin new -b pyo3`) before
    /// reconciling. When false, the project root must already exist.
    pub create: bool,
}

/// Settings for the build pipeline.
#[derive(Debug, Clone)]
pub struct BuildSettings {
    /// Root of the project to build and install.
    pub root: Utf8PathBuf,
}
