//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `CXA_<SECTION>__<KEY>`, e.g.
//!    `CXA_DEFAULTS__PACKAGE_MANAGER=yarn`
//! 3. Config file: `--config <FILE>`, else the per-user config path
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use cxa_adapters::DEFAULT_TEMPLATE_PREFIX;
use cxa_core::domain::PackageManager;

const ENV_PREFIX: &str = "CXA";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Template registry conventions.
    pub registry: RegistryConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Failure handling.
    pub behavior: BehaviorConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Used when `init` is run without `--template`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    pub package_manager: PackageManager,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub template_prefix: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            template_prefix: DEFAULT_TEMPLATE_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    pub keep_on_failure: bool,
}

impl AppConfig {
    /// Load configuration, layering file and environment over the defaults.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder().add_source(
            config::Config::try_from(&Self::default()).context("Failed to encode defaults")?,
        );

        match config_file {
            Some(path) => {
                info!(path = %path.display(), "Loading config file");
                builder = builder.add_source(
                    config::File::from(path.as_path())
                        .format(config::FileFormat::Toml)
                        .required(true),
                );
            }
            None => {
                let path = Self::config_path();
                debug!(path = %path.display(), "Looking for config file");
                builder = builder.add_source(
                    config::File::from(path.as_path())
                        .format(config::FileFormat::Toml)
                        .required(false),
                );
            }
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.cxa.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "cxa", "cxa")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".cxa.toml"))
    }

    /// The file a given invocation reads: `--config` if passed.
    pub fn active_path(config_file: Option<&PathBuf>) -> PathBuf {
        config_file.cloned().unwrap_or_else(Self::config_path)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("Failed to encode configuration")
    }

    /// Look up a dotted key such as `registry.template_prefix`.
    ///
    /// `Ok(None)` means the key is known but unset.
    pub fn get(&self, key: &str) -> Option<Option<String>> {
        let value = toml::Value::try_from(self).ok()?;
        let mut current = &value;
        for segment in key.split('.') {
            match current.get(segment) {
                Some(next) => current = next,
                None if key == "defaults.template" => return Some(None),
                None => return None,
            }
        }
        Some(Some(match current {
            toml::Value::String(s) => s.clone(),
            other => other.to_string(),
        }))
    }

    /// Write the defaults to `path`, creating parent directories.
    pub fn write_defaults(path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(path, Self::default().to_toml()?)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}
