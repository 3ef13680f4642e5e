//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names and help
//! text. It also owns the forward-compatibility rule: options this version
//! does not know are dropped before clap sees them.

use std::ffi::OsString;

use clap::{ArgAction, Args, CommandFactory, Parser};

use goodboy_core::domain::PackageManagerKind;

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "goodboy",
    bin_name = "goodboy",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Bootstrap an Express + Prisma API project",
    long_about = "goodboy copies a ready-to-run Express + Prisma TypeScript project \
                  into a new directory, writes its package.json, installs its \
                  dependencies and initializes a git repository.",
    override_usage = "goodboy [directory] [options]",
    after_help = "EXAMPLES:\n\
        \x20 goodboy my-api\n\
        \x20 goodboy my-api --use-pnpm --eslint\n\
        \x20 goodboy ../services/orders --yes",
    disable_version_flag = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub create: CreateArgs,

    /// Output the current version.
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: Option<bool>,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// What to create and how.
#[derive(Debug, Clone, Default, Args)]
pub struct CreateArgs {
    /// Directory to create the project in; its last component is the
    /// project name.
    #[arg(value_name = "DIRECTORY")]
    pub directory: Option<String>,

    /// Initialize with ESLint config.
    #[arg(long)]
    pub eslint: bool,

    /// Initialize inside a 'src/' directory.
    #[arg(long = "src-dir")]
    pub src_dir: bool,

    #[command(flatten)]
    pub package_manager: PackageManagerFlags,

    /// Use saved preferences or defaults for unprovided options.
    #[arg(long)]
    pub yes: bool,
}

/// `--use-*` switches. If several are passed, the first in declaration order
/// wins.
#[derive(Debug, Clone, Default, Args)]
pub struct PackageManagerFlags {
    /// Explicitly tell the CLI to bootstrap the application using npm.
    #[arg(long = "use-npm")]
    pub use_npm: bool,

    /// Explicitly tell the CLI to bootstrap the application using pnpm.
    #[arg(long = "use-pnpm")]
    pub use_pnpm: bool,

    /// Explicitly tell the CLI to bootstrap the application using Yarn.
    #[arg(long = "use-yarn")]
    pub use_yarn: bool,

    /// Explicitly tell the CLI to bootstrap the application using Bun.
    #[arg(long = "use-bun")]
    pub use_bun: bool,
}

impl PackageManagerFlags {
    pub fn selected(&self) -> Option<PackageManagerKind> {
        [
            (self.use_npm, PackageManagerKind::Npm),
            (self.use_pnpm, PackageManagerKind::Pnpm),
            (self.use_yarn, PackageManagerKind::Yarn),
            (self.use_bun, PackageManagerKind::Bun),
        ]
        .into_iter()
        .find_map(|(set, kind)| set.then_some(kind))
    }
}

// ── Unknown options ───────────────────────────────────────────────────────────

/// Drop every option clap would reject as unknown.
///
/// Positional arguments, known options (with their values) and everything
/// after `--` pass through unchanged. The first element is the program name
/// and is always kept.
pub fn strip_unknown_options<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let known = KnownOptions::collect();
    let mut args = args.into_iter().map(Into::into);
    let mut kept: Vec<OsString> = args.next().into_iter().collect();

    let mut pending_value = false;
    let mut passthrough = false;
    for arg in args {
        if passthrough || pending_value {
            pending_value = false;
            kept.push(arg);
            continue;
        }

        let Some(text) = arg.to_str() else {
            kept.push(arg);
            continue;
        };

        if text == "--" {
            passthrough = true;
            kept.push(arg);
        } else if let Some(long) = text.strip_prefix("--") {
            let (name, inline_value) = match long.split_once('=') {
                Some((name, _)) => (name, true),
                None => (long, false),
            };
            match known.long(name) {
                Some(takes_value) => {
                    pending_value = takes_value && !inline_value;
                    kept.push(arg);
                }
                None => tracing::debug!(option = %text, "Ignoring unknown option"),
            }
        } else if text.len() > 1 && text.starts_with('-') {
            match known.short_cluster(&text[1..]) {
                Some((cluster, needs_value)) => {
                    pending_value = needs_value;
                    kept.push(OsString::from(format!("-{cluster}")));
                }
                None => tracing::debug!(option = %text, "Ignoring unknown option"),
            }
        } else {
            kept.push(arg);
        }
    }
    kept
}

/// Long and short option names of [`Cli`], with whether each takes a value.
struct KnownOptions {
    longs: Vec<(String, bool)>,
    shorts: Vec<(char, bool)>,
}

impl KnownOptions {
    fn collect() -> Self {
        let mut command = Cli::command();
        command.build();

        let mut longs = Vec::new();
        let mut shorts = Vec::new();
        for arg in command.get_arguments() {
            let takes_value = arg.get_action().takes_values();
            if let Some(long) = arg.get_long() {
                longs.push((long.to_string(), takes_value));
            }
            if let Some(short) = arg.get_short() {
                shorts.push((short, takes_value));
            }
        }
        Self { longs, shorts }
    }

    fn long(&self, name: &str) -> Option<bool> {
        self.longs
            .iter()
            .find(|(long, _)| long == name)
            .map(|(_, takes_value)| *takes_value)
    }

    /// Keep the known flags of a `-abc` cluster. Once a value-taking flag is
    /// reached the rest of the cluster is its value. Returns `None` when
    /// nothing in the cluster is known.
    fn short_cluster(&self, cluster: &str) -> Option<(String, bool)> {
        let mut kept = String::new();
        for (index, c) in cluster.char_indices() {
            match self.shorts.iter().find(|(short, _)| *short == c) {
                Some((_, true)) => {
                    kept.push(c);
                    let rest = &cluster[index + c.len_utf8()..];
                    if rest.is_empty() {
                        return Some((kept, true));
                    }
                    kept.push_str(rest);
                    return Some((kept, false));
                }
                Some((_, false)) => kept.push(c),
                None => {}
            }
        }
        (!kept.is_empty()).then_some((kept, false))
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(args: &[&str]) -> Vec<String> {
        strip_unknown_options(args.iter().copied())
            .into_iter()
            .map(|a| a.into_string().unwrap())
            .collect()
    }

    #[test]
    fn cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn unknown_long_options_are_dropped() {
        assert_eq!(
            strip(&["goodboy", "my-app", "--typescript", "--eslint", "--db=postgres"]),
            ["goodboy", "my-app", "--eslint"]
        );
    }

    #[test]
    fn known_option_values_are_kept() {
        assert_eq!(
            strip(&["goodboy", "--config", "goodboy.toml", "my-app"]),
            ["goodboy", "--config", "goodboy.toml", "my-app"]
        );
        assert_eq!(
            strip(&["goodboy", "--config=goodboy.toml", "my-app"]),
            ["goodboy", "--config=goodboy.toml", "my-app"]
        );
    }

    #[test]
    fn short_clusters_are_filtered() {
        assert_eq!(strip(&["goodboy", "-xq", "my-app"]), ["goodboy", "-q", "my-app"]);
        assert_eq!(strip(&["goodboy", "-x", "my-app"]), ["goodboy", "my-app"]);
        assert_eq!(
            strip(&["goodboy", "-qc", "cfg.toml", "my-app"]),
            ["goodboy", "-qc", "cfg.toml", "my-app"]
        );
    }

    #[test]
    fn everything_after_double_dash_passes() {
        assert_eq!(
            strip(&["goodboy", "--", "--weird-name"]),
            ["goodboy", "--", "--weird-name"]
        );
    }

    #[test]
    fn parsed_after_stripping() {
        let cli = Cli::try_parse_from(strip_unknown_options([
            "goodboy",
            "my-app",
            "--frobnicate",
            "--use-yarn",
            "--src-dir",
        ]))
        .unwrap();
        assert_eq!(cli.create.directory.as_deref(), Some("my-app"));
        assert!(cli.create.src_dir);
        assert_eq!(
            cli.create.package_manager.selected(),
            Some(PackageManagerKind::Yarn)
        );
    }

    #[test]
    fn first_package_manager_flag_wins() {
        let flags = PackageManagerFlags {
            use_npm: false,
            use_pnpm: true,
            use_yarn: true,
            use_bun: true,
        };
        assert_eq!(flags.selected(), Some(PackageManagerKind::Pnpm));
        assert_eq!(PackageManagerFlags::default().selected(), None);
    }

    #[test]
    fn short_v_is_version() {
        let err = Cli::try_parse_from(["goodboy", "-v"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn verbose_is_long_only() {
        let cli = Cli::try_parse_from(["goodboy", "--verbose", "--verbose"]).unwrap();
        assert_eq!(cli.global.verbose, 2);
    }
}
