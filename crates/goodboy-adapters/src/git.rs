//! Best-effort repository initialization through the `git` CLI.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, info, warn};

use goodboy_core::application::ports::VersionControl;

/// Message of the commit that records the freshly copied template.
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit from goodboy";

/// Initializes a git repository with one commit, or does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitInitializer;

impl GitInitializer {
    pub fn new() -> Self {
        Self
    }

    fn is_available() -> bool {
        which::which("git").is_ok()
    }

    /// Inside an existing git work tree or Mercurial repository.
    fn in_existing_repository(root: &Path) -> bool {
        run_quiet("git", ["rev-parse", "--is-inside-work-tree"], root)
            || run_quiet("hg", ["--cwd", ".", "root"], root)
    }

    fn default_branch_configured(root: &Path) -> bool {
        run_quiet("git", ["config", "init.defaultBranch"], root)
    }

    fn commit_all(root: &Path) -> bool {
        if !Self::default_branch_configured(root)
            && !run_quiet("git", ["checkout", "-b", "main"], root)
        {
            return false;
        }
        run_quiet("git", ["add", "-A"], root)
            && run_quiet("git", ["commit", "-m", INITIAL_COMMIT_MESSAGE], root)
    }
}

impl VersionControl for GitInitializer {
    fn try_init(&self, root: &Path) -> bool {
        if !Self::is_available() {
            debug!("git not found, skipping repository initialization");
            return false;
        }
        if Self::in_existing_repository(root) {
            debug!(root = %root.display(), "already inside a repository");
            return false;
        }
        if !run_quiet("git", ["init"], root) {
            return false;
        }

        if Self::commit_all(root) {
            info!("Initialized a git repository");
            return true;
        }

        // Commit failed (usually no author identity): leave no half-made repo.
        if let Err(e) = fs::remove_dir_all(root.join(".git")) {
            warn!(error = %e, "could not remove partially initialized repository");
        }
        false
    }
}

/// Run a command with all output discarded; `true` on exit status 0.
fn run_quiet<I, S>(program: &str, args: I, cwd: &Path) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|status| status.success())
}
