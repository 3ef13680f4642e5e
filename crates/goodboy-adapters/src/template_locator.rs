//! Template corpus discovery.
//!
//! The corpus is searched in this order, stopping at the first directory
//! that holds the default template:
//!
//! 1. **`$GOODBOY_TEMPLATES_DIR`**, an explicit override.
//! 2. **`templates.root`** from the configuration file.
//! 3. **`<executable-dir>/templates`**, for installed binaries shipped next
//!    to their templates.
//! 4. **`./templates`**, relative to the working directory.
//! 5. **The source checkout's `templates/`**, so `cargo run` and the test
//!    suites work without any setup.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use goodboy_core::domain::DEFAULT_TEMPLATE_ID;

/// Environment variable overriding template discovery.
pub const TEMPLATES_DIR_VAR: &str = "GOODBOY_TEMPLATES_DIR";

/// Templates directory of the source checkout this binary was built from.
pub const BUILD_TEMPLATES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates");

/// Ordered set of places the template corpus may live.
#[derive(Debug, Clone, Default)]
pub struct TemplateLocator {
    env_override: Option<PathBuf>,
    configured: Option<PathBuf>,
    exe_dir: Option<PathBuf>,
}

impl TemplateLocator {
    /// Locator seeded from the process environment.
    pub fn from_env() -> Self {
        Self {
            env_override: std::env::var_os(TEMPLATES_DIR_VAR).map(PathBuf::from),
            configured: None,
            exe_dir: std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf)),
        }
    }

    pub fn with_env_override(mut self, dir: Option<PathBuf>) -> Self {
        self.env_override = dir;
        self
    }

    /// Directory from the `templates.root` configuration key.
    pub fn with_configured(mut self, dir: Option<PathBuf>) -> Self {
        self.configured = dir;
        self
    }

    pub fn with_exe_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.exe_dir = dir;
        self
    }

    /// Candidate roots in priority order.
    pub fn candidates(&self) -> Vec<PathBuf> {
        let mut paths = Vec::with_capacity(5);
        paths.extend(self.env_override.clone());
        paths.extend(self.configured.clone());
        if let Some(exe_dir) = &self.exe_dir {
            paths.push(exe_dir.join("templates"));
        }
        paths.push(PathBuf::from("templates"));
        paths.push(PathBuf::from(BUILD_TEMPLATES_DIR));
        paths
    }

    /// First candidate that contains the default template.
    pub fn locate(&self) -> Option<PathBuf> {
        for candidate in self.candidates() {
            if candidate.join(DEFAULT_TEMPLATE_ID).is_dir() {
                debug!(path = %candidate.display(), "Using templates directory");
                return Some(candidate);
            }
            debug!(path = %candidate.display(), "No templates here, trying next");
        }
        warn!(
            "no templates directory found; checked ${TEMPLATES_DIR_VAR}, templates.root, \
             <exe>/templates, ./templates and the build directory"
        );
        None
    }
}

/// Locate the template corpus using the process environment and the
/// configured directory, if any.
pub fn templates_root(configured: Option<PathBuf>) -> Option<PathBuf> {
    TemplateLocator::from_env().with_configured(configured).locate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn corpus() -> TempDir {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join(DEFAULT_TEMPLATE_ID).join("ts")).unwrap();
        temp
    }

    #[test]
    fn env_override_comes_first() {
        let locator = TemplateLocator::default()
            .with_env_override(Some("/env/templates".into()))
            .with_configured(Some("/config/templates".into()))
            .with_exe_dir(Some("/usr/local/bin".into()));

        assert_eq!(
            locator.candidates()[..3],
            [
                PathBuf::from("/env/templates"),
                PathBuf::from("/config/templates"),
                PathBuf::from("/usr/local/bin/templates"),
            ]
        );
    }

    #[test]
    fn skips_candidates_without_default_template() {
        let empty = TempDir::new().unwrap();
        let real = corpus();
        let locator = TemplateLocator::default()
            .with_env_override(Some(empty.path().to_path_buf()))
            .with_configured(Some(real.path().to_path_buf()));

        assert_eq!(locator.locate(), Some(real.path().to_path_buf()));
    }

    #[test]
    fn falls_back_to_source_checkout() {
        let locator = TemplateLocator::default();
        let found = locator.locate().expect("bundled templates");
        assert!(found.join(DEFAULT_TEMPLATE_ID).join("ts").is_dir());
    }
}
