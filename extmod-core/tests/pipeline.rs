//! Orchestration tests against a recording tool runner and temp projects.

use camino::{Utf8Path, Utf8PathBuf};
use extmod_core::pipeline::{ToolError, run_build, run_init};
use extmod_core::ports::ToolRunner;
use extmod_core::settings::{BuildSettings, InitSettings};
use extmod_edit::{ReconcileError, SENTINEL_FEATURE};
use extmod_types::IdentityError;
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Invocation {
    program: String,
    args: Vec<String>,
    cwd: Option<Utf8PathBuf>,
}

/// Records tool invocations without running anything.
#[derive(Default)]
struct RecordingRunner {
    calls: RefCell<Vec<Invocation>>,
}

impl RecordingRunner {
    fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }
}

impl ToolRunner for RecordingRunner {
    fn run(&self, program: &str, args: &[&str], cwd: Option<&Utf8Path>) -> anyhow::Result<()> {
        self.calls.borrow_mut().push(Invocation {
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            cwd: cwd.map(Utf8Path::to_path_buf),
        });
        Ok(())
    }
}

/// Pretends to be `maturin new` by creating the target directory.
#[derive(Default)]
struct ScaffoldingRunner {
    inner: RecordingRunner,
}

impl ToolRunner for ScaffoldingRunner {
    fn run(&self, program: &str, args: &[&str], cwd: Option<&Utf8Path>) -> anyhow::Result<()> {
        self.inner.run(program, args, cwd)?;
        if program == "maturin" && args.first() == Some(&"new") {
            let target = args.last().expect("maturin new takes a path");
            fs::create_dir_all(target)?;
        }
        Ok(())
    }
}

fn utf8_root(td: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(td.path().to_path_buf()).expect("utf8 tempdir")
}

fn init_settings(root: &Utf8Path) -> InitSettings {
    InitSettings {
        path: Some(root.to_path_buf()),
        name: Some("demo".to_string()),
        create: false,
    }
}

#[test]
fn empty_root_ends_up_with_both_descriptors_and_an_empty_entry_file() {
    let td = tempfile::tempdir().expect("tempdir");
    let root = utf8_root(&td);
    let tools = RecordingRunner::default();

    let outcome = run_init(&init_settings(&root), &tools).expect("init");

    assert_eq!(outcome.project, "demo");
    assert_eq!(outcome.descriptors.len(), 2);
    assert!(outcome.entry_file_created);
    assert!(tools.calls().is_empty());

    let py = fs::read_to_string(root.join("pyproject.toml")).expect("pyproject");
    assert!(py.contains(SENTINEL_FEATURE));
    let cargo = fs::read_to_string(root.join("Cargo.toml")).expect("manifest");
    assert!(cargo.contains("cdylib"));

    let entry = fs::read_to_string(root.join("src").join("lib.rs")).expect("entry file");
    assert_eq!(entry, "");
}

#[test]
fn rerunning_init_is_idempotent() {
    let td = tempfile::tempdir().expect("tempdir");
    let root = utf8_root(&td);
    let tools = RecordingRunner::default();

    run_init(&init_settings(&root), &tools).expect("first init");
    let py_before = fs::read_to_string(root.join("pyproject.toml")).expect("read");
    let cargo_before = fs::read_to_string(root.join("Cargo.toml")).expect("read");

    let outcome = run_init(&init_settings(&root), &tools).expect("second init");

    assert!(outcome.descriptors.iter().all(|d| !d.changed));
    assert!(!outcome.entry_file_created);
    assert_eq!(fs::read_to_string(root.join("pyproject.toml")).expect("read"), py_before);
    assert_eq!(fs::read_to_string(root.join("Cargo.toml")).expect("read"), cargo_before);
}

#[test]
fn init_never_truncates_an_existing_entry_file() {
    let td = tempfile::tempdir().expect("tempdir");
    let root = utf8_root(&td);
    fs::create_dir_all(root.join("src")).expect("mkdir");
    fs::write(root.join("src").join("lib.rs"), "pub fn built() {}\n").expect("seed entry");

    let outcome = run_init(&init_settings(&root), &RecordingRunner::default()).expect("init");

    assert!(!outcome.entry_file_created);
    assert_eq!(
        fs::read_to_string(root.join("src").join("lib.rs")).expect("read"),
        "pub fn built() {}\n"
    );
}

#[test]
fn missing_identity_fails_before_any_io() {
    let tools = RecordingRunner::default();
    let err = run_init(&InitSettings::default(), &tools).unwrap_err();

    assert!(matches!(
        err,
        ToolError::Reconcile(ReconcileError::Identity(IdentityError::Missing))
    ));
    assert!(tools.calls().is_empty());
}

#[test]
fn missing_root_without_create_is_an_absence_error() {
    let td = tempfile::tempdir().expect("tempdir");
    let root = utf8_root(&td).join("does-not-exist");
    let tools = RecordingRunner::default();

    let err = run_init(&init_settings(&root), &tools).unwrap_err();

    assert!(matches!(
        err,
        ToolError::Reconcile(ReconcileError::RootMissing { .. })
    ));
    assert!(tools.calls().is_empty());
    assert!(!root.exists());
}

#[test]
fn create_scaffolds_before_reconciling() {
    let td = tempfile::tempdir().expect("tempdir");
    let root = utf8_root(&td).join("fresh");
    let tools = ScaffoldingRunner::default();

    let settings = InitSettings {
        path: Some(root.clone()),
        name: None,
        create: true,
    };
    let outcome = run_init(&settings, &tools).expect("init with create");

    // Name derived from the last path segment.
    assert_eq!(outcome.project, "fresh");

    let calls = tools.inner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].program, "maturin");
    assert_eq!(calls[0].args, vec!["new", "-b", "pyo3", root.as_str()]);

    assert!(root.join("pyproject.toml").is_file());
    assert!(root.join("Cargo.toml").is_file());
    assert!(root.join("src").join("lib.rs").is_file());
}

#[test]
fn malformed_pyproject_aborts_before_the_native_descriptor() {
    let td = tempfile::tempdir().expect("tempdir");
    let root = utf8_root(&td);
    fs::write(root.join("pyproject.toml"), "not [valid toml\n").expect("seed");

    let err = run_init(&init_settings(&root), &RecordingRunner::default()).unwrap_err();

    assert!(matches!(
        err,
        ToolError::Reconcile(ReconcileError::Decode { .. })
    ));
    // Per-descriptor isolation: the native descriptor was never touched.
    assert!(!root.join("Cargo.toml").exists());
    assert!(!root.join("src").exists());
}

#[test]
fn second_descriptor_failure_keeps_the_first_write() {
    let td = tempfile::tempdir().expect("tempdir");
    let root = utf8_root(&td);
    fs::write(root.join("pyproject.toml"), "[project]\nname = \"demo\"\n").expect("seed");
    fs::write(root.join("Cargo.toml"), "not [valid toml\n").expect("seed");

    let err = run_init(&init_settings(&root), &RecordingRunner::default()).unwrap_err();
    assert!(matches!(
        err,
        ToolError::Reconcile(ReconcileError::Decode { .. })
    ));

    // No rollback: the package descriptor stays reconciled.
    let py = fs::read_to_string(root.join("pyproject.toml")).expect("read");
    assert!(py.contains(SENTINEL_FEATURE));
}

#[test]
fn build_compiles_then_installs_each_wheel_in_order() {
    let td = tempfile::tempdir().expect("tempdir");
    let root = utf8_root(&td);
    let wheels_dir = root.join("target").join("wheels");
    fs::create_dir_all(&wheels_dir).expect("mkdir");
    fs::write(wheels_dir.join("demo-0.1.0-cp312.whl"), b"").expect("seed wheel");

    let tools = RecordingRunner::default();
    run_build(&BuildSettings { root: root.clone() }, &tools).expect("build");

    let calls = tools.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].program, "maturin");
    assert_eq!(calls[0].args, vec!["build", "--verbose"]);
    assert_eq!(calls[0].cwd.as_deref(), Some(root.as_path()));
    assert_eq!(calls[1].program, "pip");
    assert_eq!(calls[1].cwd.as_deref(), Some(root.as_path()));
    // pip runs inside the root, so the wheel path must be root-relative;
    // a root-prefixed path would resolve to <root>/<root>/target/wheels.
    assert_eq!(
        calls[1].args,
        vec!["install", "target/wheels/demo-0.1.0-cp312.whl"]
    );
    assert!(root.join(&calls[1].args[1]).is_file());
}

#[test]
fn build_installs_wheels_in_sorted_order() {
    let td = tempfile::tempdir().expect("tempdir");
    let root = utf8_root(&td);
    let wheels_dir = root.join("target").join("wheels");
    fs::create_dir_all(&wheels_dir).expect("mkdir");
    fs::write(wheels_dir.join("b-0.1.0.whl"), b"").expect("seed wheel");
    fs::write(wheels_dir.join("a-0.1.0.whl"), b"").expect("seed wheel");

    let tools = RecordingRunner::default();
    run_build(&BuildSettings { root }, &tools).expect("build");

    let installed: Vec<String> = tools
        .calls()
        .into_iter()
        .filter(|c| c.program == "pip")
        .map(|c| c.args[1].clone())
        .collect();
    assert_eq!(
        installed,
        vec!["target/wheels/a-0.1.0.whl", "target/wheels/b-0.1.0.whl"]
    );
}

#[test]
fn build_with_no_wheels_is_an_error() {
    let td = tempfile::tempdir().expect("tempdir");
    let root = utf8_root(&td);

    let err = run_build(&BuildSettings { root }, &RecordingRunner::default()).unwrap_err();
    assert!(matches!(err, ToolError::Internal(_)));
    assert!(err.to_string().contains("no wheels"));
}

#[test]
fn build_on_a_missing_root_is_an_absence_error() {
    let err = run_build(
        &BuildSettings {
            root: Utf8PathBuf::from("./definitely-not-here"),
        },
        &RecordingRunner::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ToolError::Reconcile(ReconcileError::RootMissing { .. })
    ));
}
