//! Unified error handling for Goodboy Core.
//!
//! [`GoodboyError`] wraps domain and application errors behind one type so
//! that the CLI can render suggestions and pick an exit status without
//! knowing which layer failed.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Goodboy Core operations.
#[derive(Debug, Error, Clone)]
pub enum GoodboyError {
    /// Business rule violations (invalid name, bad request).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Orchestration and infrastructure failures.
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl GoodboyError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec!["This appears to be a bug in goodboy".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Stable taxonomy tag, independent of the layer that raised the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(DomainError::InvalidName { .. })
            | Self::Domain(DomainError::MissingProjectName { .. }) => ErrorKind::InvalidName,
            Self::Domain(_) => ErrorKind::Internal,
            Self::Application(e) => e.kind(),
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Whether the dependency-fetching step failed. Callers may retry with a
    /// different template source when this is true.
    pub fn is_download(&self) -> bool {
        self.kind() == ErrorKind::Download
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    External,
    Configuration,
    Internal,
}

/// Flat classification of every failure a scaffold can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidName,
    PathNotWritable,
    DirectoryNotEmpty,
    TemplateIo,
    ManifestWrite,
    Download,
    SubprocessSpawn,
    SubprocessExit,
    Configuration,
    Internal,
}

impl ErrorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidName => "invalid-name",
            Self::PathNotWritable => "path-not-writable",
            Self::DirectoryNotEmpty => "directory-not-empty",
            Self::TemplateIo => "template-io",
            Self::ManifestWrite => "manifest-write",
            Self::Download => "download",
            Self::SubprocessSpawn => "subprocess-spawn",
            Self::SubprocessExit => "subprocess-exit",
            Self::Configuration => "configuration",
            Self::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convenient result type alias.
pub type GoodboyResult<T> = Result<T, GoodboyError>;
