//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. Core
//! never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied at the call-site, not here)
//! 2. `GOODBOY_*` environment variables, `__` separating nested keys
//!    (`GOODBOY_DEFAULTS__PACKAGE_MANAGER=pnpm`)
//! 3. The config file: `--config <FILE>`, else the platform config dir
//! 4. Built-in defaults

use std::path::PathBuf;

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use goodboy_core::domain::PackageManagerKind;

use crate::error::{CliError, CliResult};

const ENV_PREFIX: &str = "GOODBOY";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub defaults: Defaults,
    pub output: OutputConfig,
    pub templates: TemplateConfig,
}

/// Fallbacks for choices the user did not make on the command line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_manager: Option<PackageManagerKind>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Overrides template discovery.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

impl AppConfig {
    /// Layer defaults, the config file and the environment.
    ///
    /// A file passed with `--config` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> CliResult<Self> {
        let file = match config_file {
            Some(path) => Some(File::from(path.as_path()).required(true)),
            None => Self::config_path().map(|path| File::from(path).required(false)),
        };

        let defaults = Config::try_from(&Self::default()).map_err(config_error)?;
        let mut builder = Config::builder().add_source(defaults);
        if let Some(file) = file {
            builder = builder.add_source(file);
        }
        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .and_then(|config| config.try_deserialize::<Self>())
            .map_err(config_error)
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "goodboy")
    }

    /// `<config dir>/config.toml`, if the platform has a home directory.
    pub fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|d| d.config_dir().join("config.toml"))
    }

    /// Where remembered answers are stored between runs.
    pub fn preferences_path() -> Option<PathBuf> {
        Self::project_dirs().map(|d| d.config_dir().join("preferences.json"))
    }
}

fn config_error(e: config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: e.to_string(),
        source: Some(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_empty() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.package_manager, None);
        assert!(!cfg.output.no_color);
        assert_eq!(cfg.templates.root, None);
    }

    #[test]
    fn explicit_file_is_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("goodboy.toml");
        fs::write(
            &path,
            "[defaults]\npackage_manager = \"pnpm\"\n\n[templates]\nroot = \"/opt/goodboy\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.defaults.package_manager, Some(PackageManagerKind::Pnpm));
        assert_eq!(cfg.templates.root, Some(PathBuf::from("/opt/goodboy")));
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.toml");
        let err = AppConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, CliError::ConfigError { .. }));
    }

    #[test]
    fn unknown_package_manager_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("goodboy.toml");
        fs::write(&path, "[defaults]\npackage_manager = \"cargo\"\n").unwrap();
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn preferences_live_next_to_config() {
        if let (Some(config), Some(prefs)) = (AppConfig::config_path(), AppConfig::preferences_path())
        {
            assert_eq!(config.parent(), prefs.parent());
        }
    }
}
