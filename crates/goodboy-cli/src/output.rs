//! User-facing output on stdout.
//!
//! Diagnostics go through [`crate::error::CliError`] to stderr; everything
//! here is progress and summary text.

use std::io;

use console::Term;
use owo_colors::OwoColorize;

use crate::cli::GlobalArgs;
use crate::config::AppConfig;

pub struct OutputManager {
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Colour is off when asked for by flag, env or config, or when stdout
    /// is not a terminal.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let term = Term::stdout();
        Self {
            quiet: args.quiet,
            no_color: args.color_disabled() || config.output.no_color || !term.is_term(),
            term,
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Plain line; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    pub fn blank(&self) -> io::Result<()> {
        self.print("")
    }

    /// `✓ <msg>` in green.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}")
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Bold header line, e.g. `Installing dependencies:`.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// `- <item>` list entry.
    pub fn list_item(&self, item: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("- {item}")
        } else {
            format!("- {}", item.cyan())
        };
        self.term.write_line(&line)
    }

    /// Indented command suggestion in the closing summary.
    pub fn command(&self, cmd: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("  {cmd}")
        } else {
            format!("  {}", cmd.cyan())
        };
        self.term.write_line(&line)
    }

    /// Render a name or path for inline use in a message.
    pub fn highlight(&self, text: &str) -> String {
        if self.no_color {
            text.to_owned()
        } else {
            text.green().to_string()
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
