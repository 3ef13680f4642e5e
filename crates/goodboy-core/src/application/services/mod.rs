//! Application services - orchestrate use cases.

pub mod path_guard;
pub mod scaffold_service;

pub use path_guard::PathGuard;
pub use scaffold_service::{ScaffoldReport, ScaffoldService};
