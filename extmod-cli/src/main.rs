use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use extmod_core::adapters::ProcessRunner;
use extmod_core::pipeline::{run_build, run_init};
use extmod_core::settings::{BuildSettings, InitSettings};
use extmod_types::ReconcileOutcome;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "extmod",
    version,
    about = "Reconcile project descriptors into the pyo3/maturin extension-module layout."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Reconcile pyproject.toml and Cargo.toml, creating them when absent.
    Init(InitArgs),
    /// Build the native library and install the wheels with pip.
    Build(BuildArgs),
}

#[derive(Debug, Parser)]
struct InitArgs {
    /// Project root (default: ./<name>).
    #[arg(long)]
    path: Option<Utf8PathBuf>,

    /// Project name (default: last segment of --path).
    #[arg(long)]
    name: Option<String>,

    /// Scaffold a fresh project tree with `maturin new -b pyo3` first.
    #[arg(long, default_value_t = false)]
    create: bool,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct BuildArgs {
    /// Project root to build and install.
    #[arg(default_value = ".")]
    path: Utf8PathBuf,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Init(args) => cmd_init(args),
        Command::Build(args) => cmd_build(args),
    }
}

fn cmd_init(args: InitArgs) -> anyhow::Result<()> {
    let settings = InitSettings {
        path: args.path,
        name: args.name,
        create: args.create,
    };

    let outcome = run_init(&settings, &ProcessRunner)?;
    match args.format {
        OutputFormat::Text => print_outcome(&outcome),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
    }
    Ok(())
}

fn cmd_build(args: BuildArgs) -> anyhow::Result<()> {
    run_build(&BuildSettings { root: args.path }, &ProcessRunner)?;
    Ok(())
}

fn print_outcome(outcome: &ReconcileOutcome) {
    println!("project {} at {}", outcome.project, outcome.root);
    for d in &outcome.descriptors {
        let state = match (d.origin, d.changed) {
            (extmod_types::DescriptorOrigin::Synthesized, _) => "created",
            (extmod_types::DescriptorOrigin::Found, true) => "updated",
            (extmod_types::DescriptorOrigin::Found, false) => "unchanged",
        };
        println!("  {}: {}", d.path, state);
    }
    if outcome.entry_file_created {
        println!("  src/lib.rs: created");
    }
}
