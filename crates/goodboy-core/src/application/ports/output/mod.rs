//! Driven (output) ports - implemented by infrastructure.

use std::path::Path;

use crate::domain::{
    CopyPlan, DirectoryEntry, GeneratedManifest, InstallOutcome, InstallStep, PackageManagerKind,
    ScaffoldRequest, ScaffoldStage,
};
use crate::error::GoodboyResult;

/// Port for filesystem operations the pipeline performs directly.
///
/// Implemented by `goodboy_adapters::filesystem::LocalFilesystem`.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Whether a file can be created inside `dir`. Never errors: any failure
    /// to probe means "not writable".
    fn is_writable(&self, dir: &Path) -> bool;

    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> GoodboyResult<()>;

    /// Top-level entries of `dir`, in no particular order.
    fn list_entries(&self, dir: &Path) -> GoodboyResult<Vec<DirectoryEntry>>;

    fn write_file(&self, path: &Path, content: &[u8]) -> GoodboyResult<()>;
}

/// Port for copying a template subtree into the destination.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateMaterializer: Send + Sync {
    /// Copy every file of `source_root` selected by `plan` into `dest_root`,
    /// applying the plan's renames. Returns the number of files written.
    ///
    /// Existing destination files are overwritten.
    fn materialize(&self, plan: &CopyPlan, source_root: &Path, dest_root: &Path)
    -> GoodboyResult<usize>;
}

/// Port for running package-manager steps.
#[cfg_attr(test, mockall::automock)]
pub trait PackageInstaller: Send + Sync {
    /// Whether the package registry is reachable. Never errors.
    fn probe_online(&self) -> bool;

    /// Run `step` with `tool` inside `cwd` and wait for it.
    ///
    /// Fails when the process cannot be started or exits non-zero. The
    /// pipeline rejects a non-zero outcome even if one is returned.
    fn invoke(
        &self,
        tool: PackageManagerKind,
        step: &InstallStep,
        cwd: &Path,
        online: bool,
    ) -> GoodboyResult<InstallOutcome>;
}

/// Port for version-control initialization.
#[cfg_attr(test, mockall::automock)]
pub trait VersionControl: Send + Sync {
    /// Initialize a repository with an initial commit. Best-effort: returns
    /// `false` (after cleaning up) instead of failing.
    fn try_init(&self, root: &Path) -> bool;
}

/// Port for answers remembered across runs.
#[cfg_attr(test, mockall::automock)]
pub trait PreferencesStore: Send + Sync {
    fn get(&self, key: &str) -> GoodboyResult<Option<serde_json::Value>>;

    fn set(&self, key: &str, value: serde_json::Value) -> GoodboyResult<()>;
}

/// Progress notifications emitted by the pipeline.
///
/// Every method has an empty default so front ends only override what they
/// display. A run ends with either [`ScaffoldStage::Done`] or
/// [`ScaffoldStage::Aborted`] passed to `stage_entered`, except when a stage
/// after directory preparation fails.
pub trait ScaffoldObserver {
    fn stage_entered(&self, _stage: ScaffoldStage, _request: &ScaffoldRequest) {}

    fn manifest_written(&self, _manifest: &GeneratedManifest) {}

    fn step_started(&self, _tool: PackageManagerKind, _step: &InstallStep) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ScaffoldObserver for NoopObserver {}
