//! Configuration management following XDG Base Directory specification.

mod clipboard;
mod format;
mod output;

pub use clipboard::ClipboardConfig;
pub use format::FormatConfig;
pub use output::OutputConfig;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application name for XDG directories.
const APP_NAME: &str = "codecloze";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    pub format: FormatConfig,
    pub output: OutputConfig,
    pub clipboard: ClipboardConfig,
}

/// Get the XDG config directory for this application.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_NAME))
}

/// Get the path to the config file.
pub fn config_file_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("codecloze.toml"))
}

/// Load configuration from file, or return defaults if not found.
pub fn load_config() -> Config {
    match config_file_path() {
        Some(path) if path.exists() => read_config(&path),
        _ => Config::default(),
    }
}

/// Load configuration from a specific path.
pub fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        log::warn!("Config file not found: {:?}", path);
        return Config::default();
    }
    read_config(path)
}

fn read_config(path: &Path) -> Config {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            log::warn!("Failed to read config file: {}", e);
            return Config::default();
        }
    };
    match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Invalid config file {:?}, using defaults: {}", path, e);
            Config::default()
        }
    }
}

/// Generate default configuration as a TOML string with comments.
pub fn generate_default_config() -> anyhow::Result<String> {
    let toml_content = toml::to_string_pretty(&Config::default())?;
    let header = r#"# codecloze configuration file
#
# [format] default_language: one of `codecloze languages`
# [output] file: written by `-o` when no path is given
# [clipboard] copy: copy the generated HTML to the clipboard

"#;
    Ok(format!("{}{}", header, toml_content))
}

/// Initialize a default configuration file at the XDG config location.
///
/// Returns the path where the config was written.
pub fn init_config(force: bool) -> anyhow::Result<PathBuf> {
    let config_path = config_file_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    write_default_config(&config_path, force)?;
    Ok(config_path)
}

fn write_default_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Configuration file already exists at: {}\nUse --force to overwrite.",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, generate_default_config()?)?;
    Ok(())
}

/// Schema generation for configuration.
pub mod schema {
    use super::Config;
    use schemars::schema_for;

    /// Generate JSON schema for the configuration.
    pub fn generate_schema() -> anyhow::Result<String> {
        let schema = schema_for!(Config);
        Ok(serde_json::to_string_pretty(&schema)?)
    }
}
