//! Output location settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_output_dir() -> String {
    String::from(".")
}

fn default_file_stem() -> String {
    String::from("trace")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Directory rendered images are written to when no explicit path is given.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// File name (without extension) of rendered images.
    #[serde(default = "default_file_stem")]
    pub file_stem: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            file_stem: default_file_stem(),
        }
    }
}

impl GeneralConfig {
    /// `<output_dir>/<file_stem>.<extension>`
    #[must_use]
    pub fn output_path(&self, extension: &str) -> PathBuf {
        PathBuf::from(&self.output_dir).join(format!("{}.{extension}", self.file_stem))
    }
}
