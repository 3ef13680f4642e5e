//! `goodboy [directory]`: create a new project.
//!
//! Turns arguments, saved preferences and configuration into a
//! [`ScaffoldRequest`], runs the core pipeline with the local adapters and
//! prints progress and the closing summary. No pipeline logic lives here.

use std::io;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use goodboy_adapters::{
    GitInitializer, JsonPreferencesStore, LocalFilesystem, LocalMaterializer, ProcessInstaller,
    templates_root,
};
use goodboy_core::prelude::*;

use crate::{
    cli::{CreateArgs, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Pins the manifest's generator version for reproducible fixtures.
const VERSION_OVERRIDE_VAR: &str = "PRIVATE_TEST_VERSION";

/// Key under which answers are remembered between runs.
const PREFERENCES_KEY: &str = "preferences";

/// Create the project described by `args`.
///
/// 1. Resolve the target directory, prompting when allowed
/// 2. Validate the project name
/// 3. Merge flags, saved preferences and configuration
/// 4. Run the scaffold pipeline
/// 5. Remember the choices and print next steps
#[instrument(skip_all, fields(directory = ?args.directory))]
pub fn execute(
    args: CreateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Directory
    let input = match args
        .directory
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
    {
        Some(dir) => dir.to_string(),
        None => prompt_for_directory(args.yes)?,
    };

    let cwd = std::env::current_dir()?;
    let root = resolve_app_path(&cwd, &input);
    let app_name = root
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_owned)
        .unwrap_or_else(|| input.clone());

    // 2. Name
    let validation = validate_package_name(&app_name);
    if !validation.valid() {
        return Err(CliError::InvalidProjectName {
            name: app_name,
            problems: validation.problems(),
        });
    }

    // 3. Choices
    let store = AppConfig::preferences_path().map(JsonPreferencesStore::new);
    let saved = store
        .as_ref()
        .map(|store| SavedPreferences::load(store))
        .unwrap_or_default();
    let choices = Choices::resolve(&args, &saved, &config, ProcessInstaller::detect);
    debug!(?choices, root = %root.display(), "Choices resolved");

    let templates = templates_root(config.templates.root.clone()).ok_or(CliError::TemplatesNotFound)?;

    let request = ScaffoldRequest::new(&root)
        .with_package_manager(choices.package_manager)
        .with_source_dir(choices.src_dir)
        .with_lint_config(choices.eslint);

    // 4. Pipeline
    let reporter = ProgressReporter { output: &output };
    let report = match build_service(templates).scaffold(&request, &reporter) {
        Ok(report) => report,
        Err(err) if err.is_download() => match fallback_template_source() {
            Some(fallback) => {
                warn!(source = %fallback.display(), "Dependency download failed, retrying with fallback template");
                build_service(fallback)
                    .scaffold(&request, &reporter)
                    .map_err(|e| CliError::from_core(e, &app_name))?
            }
            None => return Err(CliError::Core(err)),
        },
        Err(err) => return Err(CliError::from_core(err, &app_name)),
    };

    if report.git_initialized {
        output.print("Initialized a git repository.")?;
        output.blank()?;
    }

    // 5. Remember and summarize
    if let Some(store) = &store {
        choices.save(store);
    }

    info!(
        app = %report.app_name,
        files = report.files_copied,
        generator = %report.manifest.generator_version,
        "Project created"
    );

    if !global.quiet {
        print_summary(&output, &report, &cwd, choices.package_manager)?;
    }
    Ok(())
}

fn build_service(templates: PathBuf) -> ScaffoldService {
    ScaffoldService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(LocalMaterializer::new()),
        Box::new(ProcessInstaller::new()),
        Box::new(GitInitializer::new()),
        templates,
    )
    .with_version_override(std::env::var(VERSION_OVERRIDE_VAR).ok())
}

/// Alternate template corpus to retry with after a failed dependency
/// download. There is none yet.
fn fallback_template_source() -> Option<PathBuf> {
    None
}

// ── Directory ─────────────────────────────────────────────────────────────────

/// Resolve `input` against `cwd` and normalize `.`/`..` lexically. The
/// directory does not have to exist.
pub fn resolve_app_path(cwd: &Path, input: &str) -> PathBuf {
    let joined = cwd.join(input);
    let mut resolved = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other),
        }
    }
    resolved
}

#[cfg(feature = "interactive")]
fn prompt_for_directory(yes: bool) -> CliResult<String> {
    use std::io::IsTerminal as _;

    if yes || !io::stdin().is_terminal() {
        return Err(CliError::MissingProjectDirectory);
    }

    let answer: String = dialoguer::Input::new()
        .with_prompt("What is your project named?")
        .default("my-app".to_string())
        .validate_with(|input: &String| -> Result<(), String> {
            let name = Path::new(input.trim())
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string();
            match validate_package_name(&name).problems().into_iter().next() {
                None => Ok(()),
                Some(problem) => Err(format!("Invalid project name: {problem}")),
            }
        })
        .interact_text()
        .map_err(|e| {
            debug!(error = %e, "Prompt aborted");
            CliError::Cancelled
        })?;

    Ok(answer.trim().to_string())
}

#[cfg(not(feature = "interactive"))]
fn prompt_for_directory(_yes: bool) -> CliResult<String> {
    Err(CliError::MissingProjectDirectory)
}

// ── Preferences ───────────────────────────────────────────────────────────────

/// Answers remembered from the previous successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavedPreferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    eslint: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    src_dir: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    package_manager: Option<PackageManagerKind>,
}

impl SavedPreferences {
    /// Read from `store`. Unreadable preferences count as none.
    fn load(store: &dyn PreferencesStore) -> Self {
        match store.get(PREFERENCES_KEY) {
            Ok(Some(value)) => serde_json::from_value(value).unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring malformed saved preferences");
                Self::default()
            }),
            Ok(None) => Self::default(),
            Err(e) => {
                warn!(error = %e, "Could not read saved preferences");
                Self::default()
            }
        }
    }
}

/// The options a run actually uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Choices {
    eslint: bool,
    src_dir: bool,
    package_manager: PackageManagerKind,
}

impl Choices {
    /// Flags win. With `--yes`, saved answers fill the gaps. The configured
    /// default and then `detect` pick the package manager.
    fn resolve(
        args: &CreateArgs,
        saved: &SavedPreferences,
        config: &AppConfig,
        detect: impl FnOnce() -> PackageManagerKind,
    ) -> Self {
        let remembered = |value: Option<bool>| args.yes && value.unwrap_or(false);
        let package_manager = args
            .package_manager
            .selected()
            .or(saved.package_manager.filter(|_| args.yes))
            .or(config.defaults.package_manager)
            .unwrap_or_else(detect);

        Self {
            eslint: args.eslint || remembered(saved.eslint),
            src_dir: args.src_dir || remembered(saved.src_dir),
            package_manager,
        }
    }

    /// Write back to `store`. Failures are logged and otherwise ignored.
    fn save(&self, store: &dyn PreferencesStore) {
        let saved = SavedPreferences {
            eslint: Some(self.eslint),
            src_dir: Some(self.src_dir),
            package_manager: Some(self.package_manager),
        };
        let result = serde_json::to_value(&saved)
            .map_err(|e| e.to_string())
            .and_then(|value| store.set(PREFERENCES_KEY, value).map_err(|e| e.to_string()));
        if let Err(e) = result {
            warn!(error = %e, "Could not save preferences");
        }
    }
}

// ── Progress ──────────────────────────────────────────────────────────────────

struct ProgressReporter<'a> {
    output: &'a OutputManager,
}

impl ProgressReporter<'_> {
    fn emit(&self, result: io::Result<()>) {
        if let Err(e) = result {
            debug!(error = %e, "Failed to write progress output");
        }
    }
}

impl ScaffoldObserver for ProgressReporter<'_> {
    fn stage_entered(&self, stage: ScaffoldStage, request: &ScaffoldRequest) {
        if stage != ScaffoldStage::Copying {
            return;
        }
        let root = request.target_path().display().to_string();
        self.emit(self.output.blank());
        self.emit(self.output.print(&format!(
            "Creating a new app in {}.",
            self.output.highlight(&root)
        )));
        self.emit(self.output.blank());
        self.emit(
            self.output
                .print(&format!("Using {}.", request.package_manager())),
        );
        self.emit(self.output.blank());
    }

    fn manifest_written(&self, manifest: &GeneratedManifest) {
        for (title, deps) in [
            ("Installing dependencies:", &manifest.dependencies),
            ("Installing devDependencies:", &manifest.dev_dependencies),
        ] {
            if deps.is_empty() {
                continue;
            }
            self.emit(self.output.header(title));
            for name in deps.keys() {
                self.emit(self.output.list_item(name));
            }
            self.emit(self.output.blank());
        }
    }

    fn step_started(&self, tool: PackageManagerKind, step: &InstallStep) {
        debug!(command = %step.command_line(tool), "Running package manager");
    }
}

// ── Summary ───────────────────────────────────────────────────────────────────

/// Directory to suggest in `cd`: the bare name when the project sits right
/// under the working directory.
fn cd_target(root: &Path, app_name: &str, cwd: &Path) -> String {
    if root.parent() == Some(cwd) {
        app_name.to_string()
    } else {
        root.display().to_string()
    }
}

fn print_summary(
    output: &OutputManager,
    report: &ScaffoldReport,
    cwd: &Path,
    pm: PackageManagerKind,
) -> io::Result<()> {
    let dev = pm.script_command("dev");

    output.success(&format!(
        "Success! Created {} at {}",
        report.app_name,
        report.root.display()
    ))?;
    output.print("Inside that directory, you can run several commands:")?;
    output.blank()?;
    output.command(&dev)?;
    output.print("    Starts the development server.")?;
    output.blank()?;
    output.command(&pm.script_command("build"))?;
    output.print("    Builds the app for production.")?;
    output.blank()?;
    output.command(&format!("{pm} start"))?;
    output.print("    Runs the built app in production mode.")?;
    output.blank()?;
    output.print("We suggest that you begin by typing:")?;
    output.blank()?;
    output.command(&format!(
        "cd {}",
        cd_target(&report.root, &report.app_name, cwd)
    ))?;
    output.command(&dev)?;
    output.blank()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::PackageManagerFlags;
    use serde_json::json;
    use tempfile::TempDir;

    fn detect_bun() -> PackageManagerKind {
        PackageManagerKind::Bun
    }

    // ── resolve_app_path ──────────────────────────────────────────────────────

    #[test]
    fn relative_input_joins_cwd() {
        assert_eq!(
            resolve_app_path(Path::new("/work"), "my-app"),
            PathBuf::from("/work/my-app")
        );
    }

    #[test]
    fn dots_are_normalized() {
        assert_eq!(
            resolve_app_path(Path::new("/work/sub"), "../services/./orders"),
            PathBuf::from("/work/services/orders")
        );
    }

    #[test]
    fn absolute_input_ignores_cwd() {
        assert_eq!(
            resolve_app_path(Path::new("/work"), "/srv/api"),
            PathBuf::from("/srv/api")
        );
    }

    // ── cd_target ─────────────────────────────────────────────────────────────

    #[test]
    fn cd_uses_bare_name_under_cwd() {
        assert_eq!(
            cd_target(Path::new("/work/my-app"), "my-app", Path::new("/work")),
            "my-app"
        );
        assert_eq!(
            cd_target(Path::new("/srv/my-app"), "my-app", Path::new("/work")),
            "/srv/my-app"
        );
    }

    // ── Choices ───────────────────────────────────────────────────────────────

    fn saved_all() -> SavedPreferences {
        SavedPreferences {
            eslint: Some(true),
            src_dir: Some(true),
            package_manager: Some(PackageManagerKind::Pnpm),
        }
    }

    #[test]
    fn saved_answers_need_yes() {
        let args = CreateArgs::default();
        let choices = Choices::resolve(&args, &saved_all(), &AppConfig::default(), detect_bun);
        assert!(!choices.eslint);
        assert!(!choices.src_dir);
        assert_eq!(choices.package_manager, PackageManagerKind::Bun);
    }

    #[test]
    fn yes_fills_from_saved_answers() {
        let args = CreateArgs {
            yes: true,
            ..Default::default()
        };
        let choices = Choices::resolve(&args, &saved_all(), &AppConfig::default(), detect_bun);
        assert!(choices.eslint);
        assert!(choices.src_dir);
        assert_eq!(choices.package_manager, PackageManagerKind::Pnpm);
    }

    #[test]
    fn flag_beats_saved_and_config() {
        let args = CreateArgs {
            yes: true,
            package_manager: PackageManagerFlags {
                use_yarn: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut config = AppConfig::default();
        config.defaults.package_manager = Some(PackageManagerKind::Npm);
        let choices = Choices::resolve(&args, &saved_all(), &config, detect_bun);
        assert_eq!(choices.package_manager, PackageManagerKind::Yarn);
    }

    #[test]
    fn config_default_beats_detection() {
        let mut config = AppConfig::default();
        config.defaults.package_manager = Some(PackageManagerKind::Yarn);
        let choices = Choices::resolve(
            &CreateArgs::default(),
            &SavedPreferences::default(),
            &config,
            detect_bun,
        );
        assert_eq!(choices.package_manager, PackageManagerKind::Yarn);
    }

    // ── Preferences round trip through the JSON store ─────────────────────────

    #[test]
    fn choices_are_saved_in_camel_case() {
        let temp = TempDir::new().unwrap();
        let store = JsonPreferencesStore::new(temp.path().join("preferences.json"));
        Choices {
            eslint: true,
            src_dir: false,
            package_manager: PackageManagerKind::Pnpm,
        }
        .save(&store);

        assert_eq!(
            store.get(PREFERENCES_KEY).unwrap(),
            Some(json!({ "eslint": true, "srcDir": false, "packageManager": "pnpm" }))
        );
        assert_eq!(
            SavedPreferences::load(&store),
            SavedPreferences {
                eslint: Some(true),
                src_dir: Some(false),
                package_manager: Some(PackageManagerKind::Pnpm),
            }
        );
    }

    #[test]
    fn malformed_preferences_are_ignored() {
        let temp = TempDir::new().unwrap();
        let store = JsonPreferencesStore::new(temp.path().join("preferences.json"));
        store
            .set(PREFERENCES_KEY, json!({ "packageManager": "cargo" }))
            .unwrap();
        assert_eq!(SavedPreferences::load(&store), SavedPreferences::default());
    }
}
