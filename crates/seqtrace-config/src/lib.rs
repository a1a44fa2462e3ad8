//! # seqtrace-config
//!
//! Layered configuration for the `seqtrace` command line tool.
//!
//! Sources, highest priority first:
//! 1. Environment variables (`SEQTRACE_*` prefix, `__` between section and key)
//! 2. Project-level `.seqtrace/config.toml`
//! 3. User-level `~/.config/seqtrace/config.toml`
//! 4. Built-in defaults
//!
//! `SEQTRACE_RENDER__FORMAT=svg` sets `render.format`, and
//! `SEQTRACE_GENERAL__OUTPUT_DIR=out` sets `general.output_dir`.
//!
//! ```no_run
//! use seqtrace_config::SeqtraceConfig;
//!
//! let config = SeqtraceConfig::load().expect("config");
//! println!("rendering with {} as {}", config.render.executable, config.render.format);
//! ```

mod error;
mod general;
mod render;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use render::{RenderConfig, SUPPORTED_FORMATS};

use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Project-local configuration file, relative to the working directory.
pub const PROJECT_CONFIG_PATH: &str = ".seqtrace/config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SeqtraceConfig {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl SeqtraceConfig {
    /// Load from every source and validate the result.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Extract and validate from an already assembled provider chain.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the provider chain without extracting it.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(PROJECT_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("SEQTRACE_").split("__"))
    }

    /// `~/.config/seqtrace/config.toml` on Linux; platform equivalent elsewhere.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("seqtrace").join("config.toml"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.render.validate()?;
        if self.general.file_stem.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: String::from("general.file_stem"),
                reason: String::from("must not be empty"),
            });
        }
        Ok(())
    }
}
