//! Application layer for Goodboy.
//!
//! This layer contains:
//! - **Services**: the scaffold pipeline (`ScaffoldService`) and target checks (`PathGuard`)
//! - **Ports**: traits for the filesystem, template copy, package managers and VCS
//! - **Errors**: orchestration and infrastructure failures
//!
//! The application layer sequences the domain rules but holds none of its
//! own. Naming, copy and manifest rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{PathGuard, ScaffoldReport, ScaffoldService};

pub use ports::{
    Filesystem, NoopObserver, PackageInstaller, PreferencesStore, ScaffoldObserver,
    TemplateMaterializer, VersionControl,
};

pub use error::ApplicationError;
