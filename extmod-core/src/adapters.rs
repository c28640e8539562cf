//! Default port implementations.

use crate::ports::ToolRunner;
use anyhow::Context;
use camino::Utf8Path;
use std::process::Command;
use tracing::debug;

/// Spawns tools as child processes, shell-free.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&self, program: &str, args: &[&str], cwd: Option<&Utf8Path>) -> anyhow::Result<()> {
        debug!(program, ?args, ?cwd, "running tool");

        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        let status = cmd
            .status()
            .with_context(|| format!("spawn {program}"))?;
        if !status.success() {
            anyhow::bail!("{program} {} exited with {status}", args.join(" "));
        }
        Ok(())
    }
}
