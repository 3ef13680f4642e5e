//! Goodboy Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Goodboy
//! project scaffolder, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           goodboy-cli (CLI)             │
//! │   (argument parsing, prompts, output)   │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │       (ScaffoldService, PathGuard)      │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │ (Filesystem, Materializer, Installer,   │
//! │  VersionControl, PreferencesStore)      │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     goodboy-adapters (Infrastructure)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (name rules, copy plan, manifest, ...)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use goodboy_core::prelude::*;
//!
//! assert!(validate_package_name("my-app").valid());
//! assert!(!validate_package_name("My-App").valid());
//!
//! let request = ScaffoldRequest::new("/tmp/my-app")
//!     .with_package_manager(PackageManagerKind::Pnpm);
//! assert_eq!(request.app_name().unwrap(), "my-app");
//! assert_eq!(request.package_manager(), PackageManagerKind::Pnpm);
//! ```
//!
//! Running a scaffold takes the `goodboy-adapters` implementations of the
//! ports, boxed and handed to [`ScaffoldService::new`](application::ScaffoldService::new)
//! together with the templates directory; see `goodboy-cli` for the wiring.

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        NoopObserver, PathGuard, ScaffoldReport, ScaffoldService,
        ports::{
            Filesystem, PackageInstaller, PreferencesStore, ScaffoldObserver,
            TemplateMaterializer, VersionControl,
        },
    };
    pub use crate::domain::{
        CopyPlan, DependencyTable, DirectoryEntry, FolderReport, GeneratedManifest, InstallOutcome,
        InstallStage, InstallStep, ManifestSynthesizer, PackageManagerKind, ScaffoldRequest,
        ScaffoldStage, TemplateDescriptor, TemplateMode, ValidationResult, validate_package_name,
    };
    pub use crate::error::{ErrorKind, GoodboyError, GoodboyResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
