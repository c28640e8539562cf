//! Port traits abstracting subprocess execution away from the pipelines.

use camino::Utf8Path;

/// Runs an external tool (maturin, pip) to completion.
///
/// A non-zero exit status is an error; the pipelines never retry.
pub trait ToolRunner {
    fn run(&self, program: &str, args: &[&str], cwd: Option<&Utf8Path>) -> anyhow::Result<()>;
}
