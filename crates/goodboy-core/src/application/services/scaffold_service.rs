//! Scaffold Service - main application orchestrator.
//!
//! Runs one scaffold as a linear state machine:
//!
//! ```text
//! Validating → PreparingDirectory → Copying → WritingManifest
//!            → Installing → InitializingVcs → Done
//! ```
//!
//! `Aborted` is reachable only from the first two states, before anything
//! inside the target directory is written. Later failures end the run at
//! the failing stage and leave whatever was already copied in place; the
//! caller owns cleanup.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, PackageInstaller, ScaffoldObserver, TemplateMaterializer, VersionControl},
        services::PathGuard,
    },
    domain::{
        CopyPlan, DomainError, GeneratedManifest, InstallOutcome, InstallStep, MANIFEST_FILE,
        ManifestSynthesizer, ScaffoldRequest, ScaffoldStage, TemplateDescriptor,
        validate_package_name,
    },
    error::{GoodboyError, GoodboyResult},
};

/// What a successful scaffold produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub app_name: String,
    pub root: PathBuf,
    pub manifest: GeneratedManifest,
    pub outcomes: Vec<InstallOutcome>,
    pub files_copied: usize,
    pub git_initialized: bool,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
    materializer: Box<dyn TemplateMaterializer>,
    installer: Box<dyn PackageInstaller>,
    vcs: Box<dyn VersionControl>,
    synthesizer: ManifestSynthesizer,
    templates_root: PathBuf,
    version_override: Option<String>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// `templates_root` is the directory holding the template corpus
    /// (`<root>/<template>/<mode>/...`).
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        materializer: Box<dyn TemplateMaterializer>,
        installer: Box<dyn PackageInstaller>,
        vcs: Box<dyn VersionControl>,
        templates_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            filesystem,
            materializer,
            installer,
            vcs,
            synthesizer: ManifestSynthesizer::default(),
            templates_root: templates_root.into(),
            version_override: None,
        }
    }

    /// Stamp manifests with this version instead of the embedded one.
    pub fn with_version_override(mut self, version: Option<String>) -> Self {
        self.version_override = version;
        self
    }

    /// Run the whole pipeline for `request`.
    #[instrument(
        skip_all,
        fields(
            target = %request.target_path().display(),
            package_manager = %request.package_manager()
        )
    )]
    pub fn scaffold(
        &self,
        request: &ScaffoldRequest,
        observer: &dyn ScaffoldObserver,
    ) -> GoodboyResult<ScaffoldReport> {
        let root = request.target_path();

        // 1. Validating
        observer.stage_entered(ScaffoldStage::Validating, request);
        let app_name = self
            .validate(request)
            .inspect_err(|_| observer.stage_entered(ScaffoldStage::Aborted, request))?;

        // 2. PreparingDirectory
        observer.stage_entered(ScaffoldStage::PreparingDirectory, request);
        self.prepare_directory(root)
            .inspect_err(|_| observer.stage_entered(ScaffoldStage::Aborted, request))?;

        // 3. Copying
        observer.stage_entered(ScaffoldStage::Copying, request);
        let files_copied = self.copy_template(request)?;

        // 4. WritingManifest
        observer.stage_entered(ScaffoldStage::WritingManifest, request);
        let manifest = self.write_manifest(root, &app_name)?;
        observer.manifest_written(&manifest);

        // 5. Installing
        observer.stage_entered(ScaffoldStage::Installing, request);
        let outcomes = self.install(request, observer)?;

        // 6. InitializingVcs
        observer.stage_entered(ScaffoldStage::InitializingVcs, request);
        let git_initialized = self.vcs.try_init(root);
        if !git_initialized {
            debug!("Repository not initialized");
        }

        observer.stage_entered(ScaffoldStage::Done, request);
        info!(app = %app_name, files = files_copied, "Scaffold completed successfully");

        Ok(ScaffoldReport {
            app_name,
            root: root.to_path_buf(),
            manifest,
            outcomes,
            files_copied,
            git_initialized,
        })
    }

    // -------------------------------------------------------------------------
    // Stages
    // -------------------------------------------------------------------------

    fn validate(&self, request: &ScaffoldRequest) -> GoodboyResult<String> {
        let root = request.target_path();
        if !root.is_absolute() {
            return Err(DomainError::RelativeTargetPath {
                path: root.to_path_buf(),
            }
            .into());
        }

        let app_name = request.app_name()?;
        let result = validate_package_name(&app_name);
        if !result.valid() {
            return Err(DomainError::InvalidName {
                name: app_name,
                problems: result.problems(),
            }
            .into());
        }
        Ok(app_name)
    }

    /// Parent writability, then directory creation, then the emptiness
    /// check against the (possibly fresh) directory.
    fn prepare_directory(&self, root: &Path) -> GoodboyResult<()> {
        let guard = PathGuard::new(self.filesystem.as_ref());
        let parent = root.parent().unwrap_or(root);

        if !guard.is_writable(parent) {
            return Err(ApplicationError::PathNotWritable {
                path: parent.to_path_buf(),
            }
            .into());
        }

        self.filesystem.create_dir_all(root)?;

        let report = guard.inspect(root)?;
        if !report.is_empty() {
            info!(conflicts = report.conflicts.len(), "Target directory is not empty");
            return Err(ApplicationError::DirectoryNotEmpty {
                path: root.to_path_buf(),
                report,
            }
            .into());
        }
        Ok(())
    }

    fn copy_template(&self, request: &ScaffoldRequest) -> GoodboyResult<usize> {
        let descriptor = TemplateDescriptor::for_request(request);
        let source = descriptor.source_dir(&self.templates_root);
        let plan = CopyPlan::for_template(request.include_lint_config());

        debug!(
            source = %source.display(),
            source_dir_layout = request.use_source_dir(),
            "Materializing template"
        );
        let copied = self
            .materializer
            .materialize(&plan, &source, request.target_path())?;
        info!(files = copied, "Template copied");
        Ok(copied)
    }

    fn write_manifest(&self, root: &Path, app_name: &str) -> GoodboyResult<GeneratedManifest> {
        let path = root.join(MANIFEST_FILE);
        let manifest = self
            .synthesizer
            .synthesize(app_name, self.version_override.as_deref());

        let manifest_error = |reason: String| -> GoodboyError {
            ApplicationError::ManifestWrite {
                path: path.clone(),
                reason,
            }
            .into()
        };

        let json = manifest.to_json().map_err(|e| manifest_error(e.to_string()))?;
        self.filesystem
            .write_file(&path, json.as_bytes())
            .map_err(|e| manifest_error(e.to_string()))?;

        debug!(
            path = %path.display(),
            generator_version = %manifest.generator_version,
            "Manifest written"
        );
        Ok(manifest)
    }

    fn install(
        &self,
        request: &ScaffoldRequest,
        observer: &dyn ScaffoldObserver,
    ) -> GoodboyResult<Vec<InstallOutcome>> {
        let tool = request.package_manager();
        let online = if tool.requires_explicit_offline() {
            self.installer.probe_online()
        } else {
            true
        };
        if !online {
            warn!("Registry unreachable, installing in offline mode");
        }

        let mut outcomes = Vec::with_capacity(2);
        for step in [InstallStep::install(), InstallStep::generate()] {
            observer.step_started(tool, &step);
            let outcome = self
                .installer
                .invoke(tool, &step, request.target_path(), online)?;
            if !outcome.success() {
                return Err(ApplicationError::from_outcome(tool, &step, &outcome).into());
            }
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }
}
