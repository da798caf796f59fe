//! Output management and formatting.

use std::io::{self, IsTerminal};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use crate::cli::GlobalArgs;
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    json: bool,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    /// Colour needs a terminal on stdout and neither `--no-color` nor
    /// `output.no_color`.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        Self {
            json: args.json,
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color || !io::stdout().is_terminal(),
            term: Term::stdout(),
        }
    }
    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Indented `key: value` line under a header.
    pub fn detail(&self, key: &str, value: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let key = format!("{key}:");
        let line = if self.no_color {
            format!("  {key:<14} {value}")
        } else {
            format!("  {:<14} {value}", key.dimmed())
        };
        self.term.write_line(&line)
    }

    /// Machine-readable output; written even in quiet mode.
    pub fn json(&self, value: &serde_json::Value) -> io::Result<()> {
        let body = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&body)
    }

    /// Spinner on stderr for a long-running step. Hidden when quiet, when
    /// stderr is not a terminal, or in JSON mode.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.quiet || self.json || !io::stderr().is_terminal() {
            return ProgressBar::hidden();
        }
        let template = if self.no_color {
            "{spinner} {msg}"
        } else {
            "{spinner:.cyan} {msg}"
        };
        let style = ProgressStyle::default_spinner()
            .template(template)
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        let pb = ProgressBar::new_spinner().with_style(style);
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// `--json` was given.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::AppConfig;

    fn args(quiet: bool, no_color: bool, json: bool) -> GlobalArgs {
        GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            json,
        }
    }

    fn make_manager(quiet: bool, no_color: bool) -> OutputManager {
        OutputManager::new(&args(quiet, no_color, false), &AppConfig::default())
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(true, true);
        assert!(out.print("hello").is_ok());
        assert!(out.detail("template", "react").is_ok());
    }

    #[test]
    fn quiet_suppresses_warnings_and_info() {
        let out = make_manager(true, true);
        assert!(out.warning("left in place").is_ok());
        assert!(out.info("using react").is_ok());
    }

    #[test]
    fn quiet_spinner_is_hidden() {
        let out = make_manager(true, true);
        assert!(out.spinner("fetching").is_hidden());
    }

    #[test]
    fn config_no_color_is_honoured() {
        let mut config = AppConfig::default();
        config.output.no_color = true;
        assert!(OutputManager::new(&args(false, false, false), &config).no_color);
    }

    #[test]
    fn json_mode_hides_spinner() {
        let out = OutputManager::new(&args(false, true, true), &AppConfig::default());
        assert!(out.is_json());
        assert!(out.spinner("fetching").is_hidden());
    }
}
