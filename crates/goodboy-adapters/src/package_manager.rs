//! Package-manager subprocess adapter.
//!
//! Resolves the tool on `PATH`, runs it in the project directory with the
//! terminal attached, and turns its exit status into an outcome or an error.
//! Also owns the registry reachability probe used to decide on yarn's
//! offline mode.

use std::ffi::OsString;
use std::net::ToSocketAddrs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info, instrument, warn};
use url::Url;

use goodboy_core::{
    application::{ApplicationError, ports::PackageInstaller},
    domain::{InstallOutcome, InstallStage, InstallStep, PackageManagerKind},
    error::{GoodboyError, GoodboyResult},
};

/// Host looked up to decide whether the package registry is reachable.
pub const REGISTRY_HOST: &str = "registry.yarnpkg.com";

/// Environment variable set by package managers for the scripts they run.
pub const USER_AGENT_VAR: &str = "npm_config_user_agent";

/// Environment passed to every install step.
const INSTALL_ENV: &[(&str, &str)] = &[
    ("ADBLOCK", "1"),
    ("NODE_ENV", "development"),
    ("DISABLE_OPENCOLLECTIVE", "1"),
];

/// Runs package managers as child processes.
#[derive(Debug, Clone, Default)]
pub struct ProcessInstaller {
    search_path: Option<OsString>,
}

impl ProcessInstaller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve tools against `paths` instead of the inherited `PATH`.
    pub fn with_search_path(mut self, paths: impl Into<OsString>) -> Self {
        self.search_path = Some(paths.into());
        self
    }

    /// The package manager that launched this process, or npm.
    pub fn detect() -> PackageManagerKind {
        let agent = std::env::var(USER_AGENT_VAR).ok();
        let detected = PackageManagerKind::from_user_agent(agent.as_deref());
        debug!(user_agent = ?agent, %detected, "Detected package manager");
        detected
    }

    fn resolve(&self, tool: PackageManagerKind, cwd: &Path) -> Result<PathBuf, which::Error> {
        match &self.search_path {
            Some(paths) => which::which_in(tool.command(), Some(paths), cwd),
            None => which::which(tool.command()),
        }
    }
}

impl PackageInstaller for ProcessInstaller {
    fn probe_online(&self) -> bool {
        if resolves(&format!("{REGISTRY_HOST}:443")) {
            return true;
        }
        debug!("Registry lookup failed, checking for an HTTPS proxy");

        let Some(proxy) = configured_proxy() else {
            return false;
        };
        match proxy_address(&proxy) {
            Some(address) => resolves(&address),
            None => {
                warn!(%proxy, "Ignoring unparsable proxy setting");
                false
            }
        }
    }

    #[instrument(skip(self, step), fields(stage = %step.stage))]
    fn invoke(
        &self,
        tool: PackageManagerKind,
        step: &InstallStep,
        cwd: &Path,
        online: bool,
    ) -> GoodboyResult<InstallOutcome> {
        let program = self.resolve(tool, cwd).map_err(|e| spawn_error(tool, step, e))?;
        let args = step.args_for(tool, online);
        info!(program = %program.display(), ?args, "Running package manager");

        let status = Command::new(&program)
            .args(&args)
            .current_dir(cwd)
            .envs(INSTALL_ENV.iter().copied())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| spawn_error(tool, step, e))?;

        match status.code() {
            Some(0) => Ok(InstallOutcome {
                exit_code: 0,
                stage: step.stage,
            }),
            Some(code) => {
                let outcome = InstallOutcome {
                    exit_code: code,
                    stage: step.stage,
                };
                Err(ApplicationError::from_outcome(tool, step, &outcome).into())
            }
            None => Err(terminated(tool, step)),
        }
    }
}

fn spawn_error(
    tool: PackageManagerKind,
    step: &InstallStep,
    e: impl std::fmt::Display,
) -> GoodboyError {
    ApplicationError::SubprocessSpawn {
        command: step.command_line(tool),
        reason: e.to_string(),
    }
    .into()
}

/// Killed by a signal: no exit code to report.
fn terminated(tool: PackageManagerKind, step: &InstallStep) -> GoodboyError {
    let command = step.command_line(tool);
    match step.stage {
        InstallStage::Install => ApplicationError::Download {
            command,
            exit_code: None,
        },
        InstallStage::Generate => ApplicationError::SubprocessExit {
            command,
            exit_code: None,
        },
    }
    .into()
}

// ── Reachability ─────────────────────────────────────────────────────────────

fn resolves(address: &str) -> bool {
    address
        .to_socket_addrs()
        .map(|mut addrs| addrs.next().is_some())
        .unwrap_or(false)
}

/// `npm config get https-proxy`, then `https_proxy`/`HTTPS_PROXY`.
fn configured_proxy() -> Option<String> {
    let from_npm = Command::new("npm")
        .args(["config", "get", "https-proxy"])
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok());

    from_npm
        .and_then(usable_proxy)
        .or_else(|| std::env::var("https_proxy").ok().and_then(usable_proxy))
        .or_else(|| std::env::var("HTTPS_PROXY").ok().and_then(usable_proxy))
}

/// npm prints `null` (or `undefined`) when the key is unset.
fn usable_proxy(value: String) -> Option<String> {
    let value = value.trim();
    match value {
        "" | "null" | "undefined" => None,
        _ => Some(value.to_string()),
    }
}

/// `host:port` of a proxy URL, defaulting the port from the scheme.
fn proxy_address(proxy: &str) -> Option<String> {
    let url = Url::parse(proxy).ok()?;
    let host = url.host_str()?;
    let port = url.port_or_known_default()?;
    Some(format!("{host}:{port}"))
}
