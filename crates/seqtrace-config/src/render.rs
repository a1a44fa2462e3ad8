//! Graph renderer settings.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Output formats accepted by Graphviz that make sense for a trace.
pub const SUPPORTED_FORMATS: &[&str] = &["png", "svg", "pdf", "jpg", "gif", "dot", "plain"];

fn default_executable() -> String {
    String::from("dot")
}

fn default_format() -> String {
    String::from("png")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RenderConfig {
    /// Renderer executable, resolved through `PATH` when not absolute.
    #[serde(default = "default_executable")]
    pub executable: String,

    /// Value of the renderer's `-T` flag.
    #[serde(default = "default_format")]
    pub format: String,

    /// Extra arguments passed before `-T` (e.g. `-Gdpi=150`).
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            executable: default_executable(),
            format: default_format(),
            args: Vec::new(),
        }
    }
}

impl RenderConfig {
    /// Reject settings the renderer could never accept.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.executable.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: String::from("render.executable"),
                reason: String::from("must not be empty"),
            });
        }
        if !SUPPORTED_FORMATS.contains(&self.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: String::from("render.format"),
                reason: format!(
                    "'{}' is not one of {}",
                    self.format,
                    SUPPORTED_FORMATS.join(", ")
                ),
            });
        }
        Ok(())
    }
}
