//! Application ports (traits) for external dependencies.
//!
//! Ports define what the scaffold pipeline needs from the outside world.
//! Adapters in `goodboy-adapters` implement them; unit tests use the
//! `mockall`-generated doubles.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: called by the pipeline, implemented by infrastructure
//!   - `Filesystem`: directory probing and file writes
//!   - `TemplateMaterializer`: template subtree copy
//!   - `PackageInstaller`: package-manager subprocesses and the registry probe
//!   - `VersionControl`: best-effort repository initialization
//!   - `PreferencesStore`: persisted answers from previous runs
//!   - `ScaffoldObserver`: progress notifications for the front end

pub mod output;

pub use output::{
    Filesystem, NoopObserver, PackageInstaller, PreferencesStore, ScaffoldObserver,
    TemplateMaterializer, VersionControl,
};

#[cfg(test)]
pub use output::{
    MockFilesystem, MockPackageInstaller, MockPreferencesStore, MockTemplateMaterializer,
    MockVersionControl,
};
