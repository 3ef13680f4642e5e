// ============================================================================
// domain/error.rs - DOMAIN RULE VIOLATIONS
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so reports can be kept after printing)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// One or more package naming rules were violated. Every violated rule is
    /// kept, not only the first.
    #[error("Invalid project name '{name}': {}", problems.join("; "))]
    InvalidName { name: String, problems: Vec<String> },

    #[error("Target path must be absolute: {path}")]
    RelativeTargetPath { path: PathBuf },

    #[error("Cannot derive a project name from {path}")]
    MissingProjectName { path: PathBuf },

    #[error("Unknown package manager '{0}'")]
    UnknownPackageManager(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidName { problems, .. } => {
                let mut lines: Vec<String> = problems.iter().map(|p| format!("* {p}")).collect();
                lines.push("Use lowercase letters, digits, '-', '.' and '_' (e.g. my-app)".into());
                lines
            }
            Self::RelativeTargetPath { .. } => vec![
                "Resolve the directory against the working directory first".into(),
            ],
            Self::MissingProjectName { path } => vec![
                format!("'{}' has no final path component", path.display()),
                "Pass a directory name such as my-app".into(),
            ],
            Self::UnknownPackageManager(_) => vec![
                "Supported package managers: npm, yarn, pnpm, bun".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidName { .. }
            | Self::MissingProjectName { .. }
            | Self::UnknownPackageManager(_) => ErrorCategory::Validation,
            Self::RelativeTargetPath { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
