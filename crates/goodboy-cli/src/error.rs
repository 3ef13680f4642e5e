//! CLI error type and its rendering.
//!
//! Every failure ends up here, is logged once, printed to stderr and turned
//! into exit status 1.

use std::error::Error as _;

use owo_colors::OwoColorize;
use thiserror::Error;

use goodboy_core::application::ApplicationError;
use goodboy_core::domain::FolderReport;
use goodboy_core::error::{ErrorCategory as CoreCategory, GoodboyError};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// The project name breaks one or more package naming rules.
    #[error("Could not create a project called \"{name}\" because of npm naming restrictions:")]
    InvalidProjectName { name: String, problems: Vec<String> },

    /// No directory argument and no way to ask for one.
    #[error("Please specify the project directory:")]
    MissingProjectDirectory,

    /// The target directory holds files the template could overwrite.
    #[error("The directory {name} contains files that could conflict:")]
    DirectoryNotEmpty { name: String, report: FolderReport },

    /// No template corpus on disk.
    #[error("Could not find the project templates")]
    TemplatesNotFound,

    /// The user aborted the interactive prompt.
    #[error("Operation cancelled")]
    Cancelled,

    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("{0}")]
    Core(#[from] GoodboyError),

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Lift a core error, giving conflicts their CLI-level diagnostic.
    pub fn from_core(err: GoodboyError, app_name: &str) -> Self {
        match err {
            GoodboyError::Application(ApplicationError::DirectoryNotEmpty { report, .. }) => {
                Self::DirectoryNotEmpty {
                    name: app_name.to_string(),
                    report,
                }
            }
            other => Self::Core(other),
        }
    }

    /// Lines printed directly under the message.
    pub fn details(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { problems, .. } => {
                problems.iter().map(|p| format!("    * {p}")).collect()
            }
            Self::MissingProjectDirectory => vec![
                "  goodboy <project-directory>".into(),
                String::new(),
                "For example:".into(),
                "  goodboy my-api".into(),
                String::new(),
                "Run goodboy --help to see all options.".into(),
            ],
            Self::DirectoryNotEmpty { report, .. } => {
                // Only the conflicts sit above the advice; ignorable entries
                // follow it so "listed above" never covers them.
                let mut lines: Vec<String> =
                    report.conflicts.iter().map(|entry| format!("  {entry}")).collect();
                lines.push(String::new());
                lines.push(
                    "Either try using a new directory name, or remove the files listed above."
                        .into(),
                );
                if !report.ignorable.is_empty() {
                    lines.push(String::new());
                    lines.push("These entries can stay where they are:".into());
                    lines.extend(report.ignorable.iter().map(|entry| format!("  {entry}")));
                }
                lines
            }
            Self::Core(core) => core.suggestions(),
            _ => Vec::new(),
        }
    }

    /// Follow-up hints, printed after the details.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplatesNotFound => vec![
                "Set GOODBOY_TEMPLATES_DIR to a directory containing default/ts".into(),
                "Or set templates.root in the configuration file".into(),
            ],
            Self::ConfigError { .. } => vec![
                "Check the file passed with --config, or the default config.toml".into(),
                "GOODBOY_* environment variables are read as configuration too".into(),
            ],
            Self::IoError { .. } => vec!["Check file permissions and available disk space".into()],
            Self::Cancelled => vec!["No changes were made".into()],
            _ => Vec::new(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. } | Self::MissingProjectDirectory | Self::Cancelled => {
                ErrorCategory::UserError
            }
            Self::DirectoryNotEmpty { .. } => ErrorCategory::Conflict,
            Self::TemplatesNotFound | Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::Conflict => ErrorCategory::Conflict,
                CoreCategory::External => ErrorCategory::External,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Every failure exits 1.
    pub fn exit_code(&self) -> u8 {
        1
    }

    pub fn format_colored(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push('\n');
        out.push_str(&format!("{}\n", self.to_string().red()));

        for line in self.details() {
            out.push_str(&line);
            out.push('\n');
        }

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                out.push_str(&format!("  {} {}\n", "\u{2192}".dimmed(), err.to_string().dimmed()));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                out.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose && self.source().is_some() {
            out.push_str(&format!(
                "\n{} {}\n",
                "\u{2139}".blue(),
                "Use --verbose for more details.".dimmed()
            ));
        }
        out
    }

    /// [`Self::format_colored`] without ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = format!("\n{self}\n");

        for line in self.details() {
            out.push_str(&line);
            out.push('\n');
        }

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                out.push_str(&format!("  Caused by: {err}\n"));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for suggestion in &suggestions {
                out.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose && self.source().is_some() {
            out.push_str("\nUse --verbose for more details.\n");
        }
        out
    }

    pub fn log(&self) {
        match self.category() {
            // Already reported on stderr; keep the log line out of the
            // default (warn) level.
            ErrorCategory::UserError => tracing::info!("User error: {}", self),
            ErrorCategory::Conflict => tracing::info!("Conflict: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::External => tracing::error!("External tool failed: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }
        if let Self::Core(core) = self {
            tracing::debug!(kind = %core.kind(), "Core error kind");
        }
        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    UserError,
    Conflict,
    External,
    Configuration,
    Internal,
}
