//! Flags accepted by every `cxa` subcommand.

use clap::Args;
use std::path::PathBuf;

use crate::logging::Verbosity;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// `-v` streams npm/yarn output and progress, `-vv` adds the pipeline
    /// stages with timings, `-vvv` everything.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Show more detail (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Only print errors"
    )]
    pub quiet: bool,

    /// Honours `NO_COLOR` (<https://no-color.org>).
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Read configuration from FILE"
    )]
    pub config: Option<PathBuf>,

    /// Replace the human summary of `init` with one JSON object on stdout.
    #[arg(long = "json", global = true, help = "Print the result as JSON")]
    pub json: bool,
}

impl GlobalArgs {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}
