//! End-to-end pipeline runs against the real filesystem and the bundled
//! template, with package manager and git replaced by recorders.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use goodboy_adapters::template_locator::BUILD_TEMPLATES_DIR;
use goodboy_adapters::{LocalFilesystem, LocalMaterializer};
use goodboy_core::prelude::*;
use goodboy_core::{application::ApplicationError, error::ErrorKind};
use serde_json::Value;
use tempfile::TempDir;

// ── Test doubles ─────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
struct RecordingInstaller {
    calls: Arc<Mutex<Vec<(PackageManagerKind, InstallStage, PathBuf)>>>,
    fail_install_with: Option<i32>,
}

impl PackageInstaller for RecordingInstaller {
    fn probe_online(&self) -> bool {
        true
    }

    fn invoke(
        &self,
        tool: PackageManagerKind,
        step: &InstallStep,
        cwd: &Path,
        _online: bool,
    ) -> GoodboyResult<InstallOutcome> {
        self.calls
            .lock()
            .unwrap()
            .push((tool, step.stage, cwd.to_path_buf()));
        let exit_code = match (step.stage, self.fail_install_with) {
            (InstallStage::Install, Some(code)) => code,
            _ => 0,
        };
        Ok(InstallOutcome {
            exit_code,
            stage: step.stage,
        })
    }
}

#[derive(Clone, Default)]
struct RecordingVcs {
    called: Arc<AtomicBool>,
}

impl VersionControl for RecordingVcs {
    fn try_init(&self, _root: &Path) -> bool {
        self.called.store(true, Ordering::SeqCst);
        true
    }
}

fn service(installer: RecordingInstaller, vcs: RecordingVcs) -> ScaffoldService {
    ScaffoldService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(LocalMaterializer::new()),
        Box::new(installer),
        Box::new(vcs),
        BUILD_TEMPLATES_DIR,
    )
    .with_version_override(Some("0.0.0-test".into()))
}

fn snapshot(dir: &Path) -> Vec<(String, Vec<u8>)> {
    let mut files: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| {
            let e = e.unwrap();
            (
                e.file_name().to_string_lossy().into_owned(),
                fs::read(e.path()).unwrap(),
            )
        })
        .collect();
    files.sort();
    files
}

// ── Scenarios ────────────────────────────────────────────────────────────────

#[test]
fn fresh_directory_gets_template_and_manifest() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("my-app");
    let installer = RecordingInstaller::default();
    let vcs = RecordingVcs::default();

    let report = service(installer.clone(), vcs.clone())
        .scaffold(&ScaffoldRequest::new(&root), &NoopObserver)
        .unwrap();

    let manifest: Value =
        serde_json::from_str(&fs::read_to_string(root.join("package.json")).unwrap()).unwrap();
    assert_eq!(manifest["name"], "my-app");
    assert_eq!(manifest["version"], "1.0.0");
    assert!(manifest["dependencies"].is_object());
    assert!(manifest["devDependencies"].is_object());

    assert!(root.join(".gitignore").is_file());
    assert!(root.join(".env").is_file());
    assert!(root.join("README.md").is_file());
    assert!(root.join("server.ts").is_file());
    assert!(root.join("src/routes.ts").is_file());
    assert!(!root.join("gitignore").exists());
    assert!(!root.join("eslint.config.mjs").exists());

    assert_eq!(report.app_name, "my-app");
    assert!(report.git_initialized);
    assert!(vcs.called.load(Ordering::SeqCst));

    let calls = installer.calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![
            (PackageManagerKind::Npm, InstallStage::Install, root.clone()),
            (PackageManagerKind::Npm, InstallStage::Generate, root.clone()),
        ]
    );
}

#[test]
fn lint_opt_in_copies_lint_config() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("linted");

    service(RecordingInstaller::default(), RecordingVcs::default())
        .scaffold(
            &ScaffoldRequest::new(&root).with_lint_config(true),
            &NoopObserver,
        )
        .unwrap();

    assert!(root.join("eslint.config.mjs").is_file());
}

#[test]
fn conflicting_directory_is_left_untouched() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("my-app");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("notes.txt"), "keep me").unwrap();
    let before = snapshot(&root);

    let installer = RecordingInstaller::default();
    let vcs = RecordingVcs::default();
    let err = service(installer.clone(), vcs.clone())
        .scaffold(&ScaffoldRequest::new(&root), &NoopObserver)
        .unwrap_err();

    match &err {
        GoodboyError::Application(ApplicationError::DirectoryNotEmpty { report, .. }) => {
            assert_eq!(report.conflicts, vec![DirectoryEntry::file("notes.txt")]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(snapshot(&root), before);
    assert!(installer.calls.lock().unwrap().is_empty());
    assert!(!vcs.called.load(Ordering::SeqCst));
}

#[test]
fn ignorable_entries_do_not_block() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("my-app");
    fs::create_dir_all(root.join(".git")).unwrap();
    fs::write(root.join("LICENSE"), "MIT").unwrap();

    service(RecordingInstaller::default(), RecordingVcs::default())
        .scaffold(&ScaffoldRequest::new(&root), &NoopObserver)
        .unwrap();

    assert_eq!(fs::read_to_string(root.join("LICENSE")).unwrap(), "MIT");
    assert!(root.join("package.json").is_file());
}

#[test]
fn failed_install_stops_before_vcs() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("my-app");
    let installer = RecordingInstaller {
        fail_install_with: Some(1),
        ..Default::default()
    };
    let vcs = RecordingVcs::default();

    let err = service(installer.clone(), vcs.clone())
        .scaffold(
            &ScaffoldRequest::new(&root).with_package_manager(PackageManagerKind::Pnpm),
            &NoopObserver,
        )
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Download);
    assert_eq!(installer.calls.lock().unwrap().len(), 1);
    assert!(!vcs.called.load(Ordering::SeqCst));
    // Copied files stay where they are.
    assert!(root.join("package.json").is_file());
}

#[test]
fn invalid_name_creates_nothing() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("My-App");

    let err = service(RecordingInstaller::default(), RecordingVcs::default())
        .scaffold(&ScaffoldRequest::new(&root), &NoopObserver)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidName);
    assert!(!root.exists());
}
