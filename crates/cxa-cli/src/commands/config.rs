//! `cxa config`: inspect the effective configuration and create a file.

use std::path::PathBuf;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    config_file: Option<&PathBuf>,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&value)?;
        }

        ConfigCommands::List => {
            let serialised = config
                .to_toml()
                .map_err(|e| CliError::config("Failed to serialise config", e))?;
            output.print(serialised.trim_end())?;
        }

        ConfigCommands::Path => {
            output.print(&AppConfig::active_path(config_file).display().to_string())?;
        }

        ConfigCommands::Init { force } => {
            let path = AppConfig::active_path(config_file);
            if path.exists() && !force {
                return Err(CliError::ConfigExists { path });
            }
            AppConfig::write_defaults(&path)
                .map_err(|e| CliError::config("Failed to write config", e))?;
            output.success(&format!("Configuration created at {}", path.display()))?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// Unset keys print as an empty string.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    config
        .get(key)
        .map(Option::unwrap_or_default)
        .ok_or_else(|| CliError::UnknownConfigKey {
            key: key.to_string(),
        })
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_known_key() {
        let cfg = AppConfig::default();
        assert_eq!(
            get_config_value(&cfg, "registry.template_prefix").unwrap(),
            "cxa-template-"
        );
    }

    #[test]
    fn get_unset_template_is_empty() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "defaults.template").unwrap(), "");
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        assert!(matches!(
            get_config_value(&cfg, "does.not.exist"),
            Err(CliError::UnknownConfigKey { .. })
        ));
    }

    #[test]
    fn get_no_color_default() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "output.no_color").unwrap(), "false");
    }
}
