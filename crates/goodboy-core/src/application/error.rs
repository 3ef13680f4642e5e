//! Application layer errors.
//!
//! These errors represent failures in orchestration and infrastructure, not
//! business rules. Business rule errors are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{FolderReport, InstallOutcome, InstallStage, InstallStep, PackageManagerKind};
use crate::error::{ErrorCategory, ErrorKind};

/// Errors that occur while running the scaffold pipeline.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The destination (or its parent) cannot be written to.
    #[error("The application path is not writable: {path}")]
    PathNotWritable { path: PathBuf },

    /// The destination holds entries that could collide with the project.
    #[error("The directory {} contains files that could conflict", path.display())]
    DirectoryNotEmpty { path: PathBuf, report: FolderReport },

    /// Reading the template or copying it failed.
    #[error("Template copy failed at {path}: {reason}")]
    TemplateIo { path: PathBuf, reason: String },

    /// The generated `package.json` could not be written.
    #[error("Could not write manifest {path}: {reason}")]
    ManifestWrite { path: PathBuf, reason: String },

    /// The dependency install step exited non-zero.
    #[error("Dependency installation failed: `{command}`{}", exit_suffix(*exit_code))]
    Download {
        command: String,
        exit_code: Option<i32>,
    },

    /// An external command could not be started at all.
    #[error("Failed to start `{command}`: {reason}")]
    SubprocessSpawn { command: String, reason: String },

    /// An external command other than the install step exited non-zero.
    #[error("`{command}` failed{}", exit_suffix(*exit_code))]
    SubprocessExit {
        command: String,
        exit_code: Option<i32>,
    },

    /// Reading or writing stored preferences failed.
    #[error("Preferences error: {reason}")]
    Preferences { reason: String },

    /// Any other filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    Filesystem { path: PathBuf, reason: String },
}

fn exit_suffix(code: Option<i32>) -> String {
    match code {
        Some(code) => format!(" (exit code {code})"),
        None => " (terminated by signal)".to_string(),
    }
}

impl ApplicationError {
    /// Map a failed package-manager step to its taxonomy variant.
    ///
    /// A failing install step is a download failure; anything after it is a
    /// plain subprocess failure.
    pub fn from_outcome(
        tool: PackageManagerKind,
        step: &InstallStep,
        outcome: &InstallOutcome,
    ) -> Self {
        let command = step.command_line(tool);
        let exit_code = Some(outcome.exit_code);
        match outcome.stage {
            InstallStage::Install => Self::Download { command, exit_code },
            InstallStage::Generate => Self::SubprocessExit { command, exit_code },
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::PathNotWritable { .. } => vec![
                "The application path is not writable, please check folder permissions and try again."
                    .into(),
                "It is likely you do not have write permissions for this folder.".into(),
            ],
            Self::DirectoryNotEmpty { report, .. } => {
                let mut lines: Vec<String> =
                    report.conflicts.iter().map(|e| format!("  {e}")).collect();
                lines.push(
                    "Either try using a new directory name, or remove the files listed above."
                        .into(),
                );
                lines
            }
            Self::TemplateIo { path, .. } => vec![
                format!("Check that {} is readable", path.display()),
                "Set GOODBOY_TEMPLATES_DIR to point at a complete template corpus".into(),
            ],
            Self::ManifestWrite { path, .. } => vec![format!(
                "Check free space and permissions for {}",
                path.display()
            )],
            Self::Download { .. } => vec![
                "Check your network connection or registry proxy settings".into(),
                "Re-run the install manually inside the project directory".into(),
            ],
            Self::SubprocessSpawn { command, .. } => vec![format!(
                "Make sure `{}` is installed and on your PATH",
                command.split_whitespace().next().unwrap_or(command)
            )],
            Self::SubprocessExit { .. } => {
                vec!["See the command output above for details".into()]
            }
            Self::Preferences { .. } => vec!["Delete the preferences file to reset it".into()],
            Self::Filesystem { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::PathNotWritable { .. } => ErrorCategory::Validation,
            Self::DirectoryNotEmpty { .. } => ErrorCategory::Conflict,
            Self::Download { .. } | Self::SubprocessSpawn { .. } | Self::SubprocessExit { .. } => {
                ErrorCategory::External
            }
            Self::Preferences { .. } => ErrorCategory::Configuration,
            Self::TemplateIo { .. } | Self::ManifestWrite { .. } | Self::Filesystem { .. } => {
                ErrorCategory::Internal
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PathNotWritable { .. } => ErrorKind::PathNotWritable,
            Self::DirectoryNotEmpty { .. } => ErrorKind::DirectoryNotEmpty,
            Self::TemplateIo { .. } => ErrorKind::TemplateIo,
            Self::ManifestWrite { .. } => ErrorKind::ManifestWrite,
            Self::Download { .. } => ErrorKind::Download,
            Self::SubprocessSpawn { .. } => ErrorKind::SubprocessSpawn,
            Self::SubprocessExit { .. } => ErrorKind::SubprocessExit,
            Self::Preferences { .. } => ErrorKind::Configuration,
            Self::Filesystem { .. } => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DirectoryEntry;

    #[test]
    fn failed_install_is_a_download_error() {
        let step = InstallStep::install();
        let outcome = InstallOutcome {
            exit_code: 1,
            stage: InstallStage::Install,
        };
        let err = ApplicationError::from_outcome(PackageManagerKind::Yarn, &step, &outcome);
        assert_eq!(err.kind(), ErrorKind::Download);
        assert_eq!(
            err.to_string(),
            "Dependency installation failed: `yarn install` (exit code 1)"
        );
    }

    #[test]
    fn failed_generate_is_a_subprocess_error() {
        let step = InstallStep::generate();
        let outcome = InstallOutcome {
            exit_code: 2,
            stage: InstallStage::Generate,
        };
        let err = ApplicationError::from_outcome(PackageManagerKind::Npm, &step, &outcome);
        assert_eq!(err.kind(), ErrorKind::SubprocessExit);
        assert_eq!(err.to_string(), "`npm run generate` failed (exit code 2)");
    }

    #[test]
    fn conflict_suggestions_list_entries() {
        let err = ApplicationError::DirectoryNotEmpty {
            path: PathBuf::from("/tmp/my-app"),
            report: FolderReport {
                conflicts: vec![DirectoryEntry::file("notes.txt"), DirectoryEntry::dir("src")],
                ignorable: vec![],
            },
        };
        let lines = err.suggestions();
        assert_eq!(lines[0], "  notes.txt");
        assert_eq!(lines[1], "  src/");
        assert!(lines[2].starts_with("Either try using a new directory name"));
    }
}
