//! Infrastructure adapters for Goodboy.
//!
//! This crate implements the ports defined in
//! `goodboy_core::application::ports`. Every filesystem access, child
//! process and network lookup of the tool lives here.

pub mod filesystem;
pub mod git;
pub mod materializer;
pub mod package_manager;
pub mod preferences;
pub mod template_locator;

// Re-export commonly used adapters
pub use filesystem::LocalFilesystem;
pub use git::GitInitializer;
pub use materializer::LocalMaterializer;
pub use package_manager::ProcessInstaller;
pub use preferences::JsonPreferencesStore;
pub use template_locator::{TemplateLocator, templates_root};
