//! Configuration file loading for maquette.
//!
//! Reads `maquette.config.json` from the current working directory, or from
//! an explicit path given with `--config`.

use maquette_esquisse::{ModelRules, TemplateRules};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "maquette.config.json";

/// Top-level maquette configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaquetteConfig {
    /// JSON Schema reference (for editor autocompletion).
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Naming and typing rules for generated models.
    #[serde(default)]
    pub model: ModelRules,

    /// Template file naming and nested component references.
    #[serde(default)]
    pub template: TemplateRules,

    /// Directory template paths are resolved against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
}

/// Load `maquette.config.json` from the given directory (or CWD if None).
///
/// A missing file yields the defaults.
pub fn load_config(dir: Option<&Path>) -> MaquetteConfig {
    let base = dir
        .map(|d| d.to_path_buf())
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
    let config_path = base.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        return MaquetteConfig::default();
    }

    load_config_file(&config_path)
}

/// Load a configuration file, warning and falling back to the defaults when
/// it cannot be read or parsed.
pub fn load_config_file(config_path: &Path) -> MaquetteConfig {
    match std::fs::read_to_string(config_path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(config) => {
                tracing::debug!("loaded configuration from {}", config_path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}", config_path.display(), e);
                MaquetteConfig::default()
            }
        },
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", config_path.display(), e);
            MaquetteConfig::default()
        }
    }
}
