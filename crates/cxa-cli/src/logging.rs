//! Tracing subscriber setup for the `cxa` binary.
//!
//! `cxa-core` and `cxa-adapters` only emit events; this is the one place a
//! subscriber is installed. `RUST_LOG`, when set, replaces the filter built
//! from the verbosity flags.

use std::io::{self, IsTerminal as _};

use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// How chatty a run is, derived from `-q` / `-v` counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// `-q`: errors only.
    Quiet,
    Normal,
    /// `-v`: progress events, package-manager output passed through.
    Progress,
    /// `-vv`: stage transitions, fetch and copy details, with timings.
    Stages,
    /// `-vvv`: per-file copies and everything else.
    Trace,
}

impl Verbosity {
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Progress,
            2 => Self::Stages,
            _ => Self::Trace,
        }
    }

    fn level(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::ERROR,
            Self::Normal => LevelFilter::WARN,
            Self::Progress => LevelFilter::INFO,
            Self::Stages => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }

    /// Whether npm/yarn write to the terminal instead of being silenced.
    pub fn shows_command_output(self) -> bool {
        self >= Self::Progress
    }

    /// Error output includes cause chains.
    pub fn shows_causes(self) -> bool {
        self >= Self::Progress
    }

    /// Our crates at the chosen level; third-party crates stay at warn so
    /// `-vvv` is not drowned in dependency noise.
    fn directives(self) -> String {
        let level = self.level();
        let others = level.min(LevelFilter::WARN);
        format!("{others},cxa={level},cxa_core={level},cxa_adapters={level}")
    }
}

/// Install the global subscriber. Fails only if one is already installed.
pub fn init_logging(verbosity: Verbosity, color: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directives()));
    let ansi = color && io::stderr().is_terminal();

    // Timings and targets only pay off once stages are visible.
    let detailed = verbosity >= Verbosity::Stages;
    let brief = (!detailed).then(|| {
        fmt::layer()
            .without_time()
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(io::stderr)
    });
    let timed = detailed.then(|| {
        fmt::layer()
            .with_timer(fmt::time::uptime())
            .with_target(true)
            .with_ansi(ansi)
            .with_writer(io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(brief)
        .with(timed)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing subscriber already installed: {e}"))
}
