//! Flags that only shape how the tool reports, not what it creates.
//!
//! Flattened into [`super::Cli`].

use clap::Args;
use std::ffi::OsStr;
use std::path::PathBuf;

/// Logging, colour and configuration flags.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Increase logging verbosity.
    ///
    /// `-v` is taken by `--version`, so there is no short form.
    #[arg(
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase verbosity (--verbose, repeat for more)",
        long_help = "Increase logging verbosity:
    (none)                          - Warnings and errors
    --verbose                       - Info level (pipeline stages)
    --verbose --verbose             - Debug level (detailed diagnostics)
    --verbose --verbose --verbose   - Trace level (every copied file)"
    )]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(
        short = 'q',
        long = "quiet",
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Disable ANSI colour codes.
    ///
    /// `NO_COLOR` is read separately by [`GlobalArgs::color_disabled`], since
    /// any non-empty value must count (see <https://no-color.org>).
    #[arg(long = "no-color", help = "Disable colored output")]
    pub no_color: bool,

    /// Configuration file path.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,
}

impl GlobalArgs {
    /// `--no-color` was given or `NO_COLOR` is set to a non-empty value.
    pub fn color_disabled(&self) -> bool {
        self.no_color || no_color_requested(std::env::var_os("NO_COLOR").as_deref())
    }
}

fn no_color_requested(value: Option<&OsStr>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}
