//! Package-manager value objects.
//!
//! Which tool to run, which steps to run with it, and what a finished step
//! looks like. Spawning processes is an adapter concern.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

// ── PackageManagerKind ───────────────────────────────────────────────────────

/// A supported JavaScript package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManagerKind {
    #[default]
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl PackageManagerKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
            Self::Bun => "bun",
        }
    }

    /// Executable name looked up on `PATH`.
    pub const fn command(&self) -> &'static str {
        self.as_str()
    }

    /// Yarn does not detect offline mode by itself and must be told.
    pub const fn requires_explicit_offline(&self) -> bool {
        matches!(self, Self::Yarn)
    }

    /// How a package script is invoked, e.g. `npm run dev` vs `yarn dev`.
    pub fn script_command(&self, script: &str) -> String {
        match self {
            Self::Yarn => format!("{} {script}", self.as_str()),
            _ => format!("{} run {script}", self.as_str()),
        }
    }

    /// Pick a tool from the `npm_config_user_agent` value of the launching
    /// process. Unknown or missing agents fall back to npm.
    pub fn from_user_agent(user_agent: Option<&str>) -> Self {
        match user_agent {
            Some(agent) if agent.starts_with("yarn") => Self::Yarn,
            Some(agent) if agent.starts_with("pnpm") => Self::Pnpm,
            Some(agent) if agent.starts_with("bun") => Self::Bun,
            _ => Self::Npm,
        }
    }
}

impl fmt::Display for PackageManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManagerKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "yarn" => Ok(Self::Yarn),
            "pnpm" => Ok(Self::Pnpm),
            "bun" => Ok(Self::Bun),
            other => Err(DomainError::UnknownPackageManager(other.to_string())),
        }
    }
}

// ── Install steps ────────────────────────────────────────────────────────────

/// The two external steps of a scaffold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstallStage {
    /// Fetch dependencies. A failure here is a download failure.
    Install,
    /// Post-install code generation (`run generate`).
    Generate,
}

impl InstallStage {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::Generate => "generate",
        }
    }
}

impl fmt::Display for InstallStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One package-manager invocation: a stage plus its subcommand arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallStep {
    pub stage: InstallStage,
    pub args: Vec<String>,
}

impl InstallStep {
    pub fn install() -> Self {
        Self {
            stage: InstallStage::Install,
            args: vec!["install".into()],
        }
    }

    pub fn generate() -> Self {
        Self {
            stage: InstallStage::Generate,
            args: vec!["run".into(), "generate".into()],
        }
    }

    /// Arguments as passed to `tool`; yarn's install gets `--offline` when
    /// the registry is unreachable.
    pub fn args_for(&self, tool: PackageManagerKind, online: bool) -> Vec<String> {
        let mut args = self.args.clone();
        if !online && tool.requires_explicit_offline() && self.stage == InstallStage::Install {
            args.push("--offline".into());
        }
        args
    }

    /// Display form, e.g. `pnpm run generate`.
    pub fn command_line(&self, tool: PackageManagerKind) -> String {
        let mut line = tool.command().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Result of one finished external command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallOutcome {
    pub exit_code: i32,
    pub stage: InstallStage,
}

impl InstallOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}
