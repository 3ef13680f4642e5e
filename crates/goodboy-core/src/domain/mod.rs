//! Core domain layer for Goodboy.
//!
//! Pure rules with no I/O: package naming, target-directory classification,
//! template copy rules, manifest synthesis and package-manager value types.
//! Everything that touches the filesystem, the network or child processes is
//! reached through the ports in `crate::application::ports`.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: domain logic is synchronous
//! - **No I/O**: no filesystem, network, or process calls
//! - **Immutable values**: everything is `Clone + PartialEq`
pub mod copy_plan;
pub mod error;
pub mod folder;
pub mod manifest;
pub mod name;
pub mod package_manager;
pub mod request;

pub use copy_plan::{
    CopyPlan, DEFAULT_TEMPLATE_ID, LINT_CONFIG_FILE, MANIFEST_FILE, TemplateDescriptor,
    TemplateMode,
};
pub use error::{DomainError, ErrorCategory};
pub use folder::{DirectoryEntry, FolderReport};
pub use manifest::{DependencyTable, GeneratedManifest, ManifestSynthesizer, PROJECT_VERSION};
pub use name::{MAX_NAME_LENGTH, Problem, Severity, ValidationResult, validate_package_name};
pub use package_manager::{InstallOutcome, InstallStage, InstallStep, PackageManagerKind};
pub use request::{ScaffoldRequest, ScaffoldStage};
