//! Tracing subscriber initialisation.
//!
//! Only the binary installs a subscriber; `goodboy-core` and
//! `goodboy-adapters` only emit events.
//!
//! # Verbosity mapping
//!
//! | Flag(s)                  | Filter level |
//! |--------------------------|--------------|
//! | (none)                   | WARN         |
//! | `--verbose`              | INFO         |
//! | `--verbose` ×2           | DEBUG        |
//! | `--verbose` ×3 or more   | TRACE        |
//! | `--quiet`                | ERROR        |
//!
//! `RUST_LOG` overrides all of the above if set.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Install the global subscriber. Call once, before any event fires.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let level = derive_level(args);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "goodboy={level},goodboy_core={level},goodboy_adapters={level}"
        ))
    });

    let use_ansi = !args.color_disabled() && std::io::stderr().is_terminal();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(use_ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}

/// Verbosity counter and quiet flag to a level string. Quiet wins.
fn derive_level(args: &GlobalArgs) -> &'static str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
