//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "cxa",
    bin_name = "cxa",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Create an app from a template package",
    long_about = "cxa fetches a cxa-template-<name> package, lays its files \
                  into a new directory, applies addons and installs the \
                  declared dependencies with npm or yarn.",
    after_help = "EXAMPLES:\n\
        \x20 cxa init my-app --template react\n\
        \x20 cxa init my-app --template react --addon eslint,jest\n\
        \x20 cxa init my-app --template file:../my-template --yarn\n\
        \x20 cxa completions bash > /usr/share/bash-completion/completions/cxa",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project from a template.
    #[command(
        visible_alias = "i",
        about = "Create a new project from a template",
        after_help = "EXAMPLES:\n\
            \x20 cxa init my-app --template react\n\
            \x20 cxa init my-app --template react --addon eslint --addon jest\n\
            \x20 cxa init my-app --template file:./templates/web --use-alt-package-manager"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 cxa completions bash > ~/.local/share/bash-completion/completions/cxa\n\
            \x20 cxa completions zsh  > ~/.zfunc/_cxa\n\
            \x20 cxa completions fish > ~/.config/fish/completions/cxa.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the cxa configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 cxa config get defaults.package_manager\n\
            \x20 cxa config list\n\
            \x20 cxa config init"
    )]
    Config(ConfigCommands),
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `cxa init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Name of the directory to create in the current directory.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    /// Template to build from. Required unless `defaults.template` is
    /// configured; checked at run time so the error names the flag.
    #[arg(
        short = 't',
        long = "template",
        value_name = "TEMPLATE",
        help = "Template name (cxa-template-<name>) or file:<path>"
    )]
    pub template: Option<String>,

    /// Addons applied after the template, in the order given.
    #[arg(
        short = 'a',
        long = "addon",
        value_name = "ADDONS",
        value_delimiter = ',',
        help = "Comma-separated addons to apply (repeatable)"
    )]
    pub addons: Vec<String>,

    /// Use yarn instead of npm.
    #[arg(
        long = "use-alt-package-manager",
        visible_alias = "yarn",
        help = "Use yarn instead of npm"
    )]
    pub use_alt_package_manager: bool,

    /// Leave the partially created project in place if a step fails.
    #[arg(long = "keep-on-failure", help = "Do not remove the project on failure")]
    pub keep_on_failure: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `cxa completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `cxa config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.package_manager`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
    /// Write a configuration file with the default values.
    Init {
        /// Overwrite an existing config file.
        #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
        force: bool,
    },
}

// ── tests ─────────────────────────────────────────────────────────────────────
