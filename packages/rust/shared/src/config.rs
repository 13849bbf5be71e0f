//! Application configuration for tokentint.
//!
//! User config lives at `~/.tokentint/tokentint.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TokenTintError};
use crate::types::FieldNames;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "tokentint.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".tokentint";

// ---------------------------------------------------------------------------
// Config structs (matching tokentint.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logo fetching settings.
    #[serde(default)]
    pub fetch: FetchSection,

    /// Input document field names.
    #[serde(default)]
    pub fields: FieldsSection,

    /// Output settings.
    #[serde(default)]
    pub output: OutputSection,
}

/// `[fetch]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchSection {
    /// HTTP timeout per logo download, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FetchSection {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

/// `[fields]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldsSection {
    /// Top-level key holding the token array.
    #[serde(default = "default_tokens_key")]
    pub tokens_key: String,

    /// Per-token key holding the logo URI.
    #[serde(default = "default_logo_key")]
    pub logo_key: String,

    /// Per-token key holding the display symbol.
    #[serde(default = "default_symbol_key")]
    pub symbol_key: String,
}

impl Default for FieldsSection {
    fn default() -> Self {
        Self {
            tokens_key: default_tokens_key(),
            logo_key: default_logo_key(),
            symbol_key: default_symbol_key(),
        }
    }
}

fn default_tokens_key() -> String {
    "tokens".into()
}
fn default_logo_key() -> String {
    "logoURI".into()
}
fn default_symbol_key() -> String {
    "symbol".into()
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    /// File name for the HTML preview, written next to the input file.
    #[serde(default = "default_preview_name")]
    pub preview_name: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            preview_name: default_preview_name(),
        }
    }
}

fn default_preview_name() -> String {
    "preview.html".into()
}

// ---------------------------------------------------------------------------
// Fetch config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime fetch configuration — merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// HTTP timeout per logo download, in seconds.
    pub timeout_secs: u64,
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.fetch.timeout_secs,
        }
    }
}

impl From<&AppConfig> for FieldNames {
    fn from(config: &AppConfig) -> Self {
        Self {
            tokens_key: config.fields.tokens_key.clone(),
            logo_key: config.fields.logo_key.clone(),
            symbol_key: config.fields.symbol_key.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.tokentint/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| TokenTintError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.tokentint/tokentint.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| TokenTintError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        TokenTintError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| TokenTintError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| TokenTintError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| TokenTintError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("timeout_secs"));
        assert!(toml_str.contains("logoURI"));
        assert!(toml_str.contains("preview.html"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.fetch.timeout_secs, 30);
        assert_eq!(parsed.fields.tokens_key, "tokens");
    }

    #[test]
    fn partial_config_uses_defaults() {
        let toml_str = r#"
[fields]
logo_key = "logo"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.fields.logo_key, "logo");
        assert_eq!(config.fields.tokens_key, "tokens");
        assert_eq!(config.fetch.timeout_secs, 30);
    }

    #[test]
    fn fetch_config_from_app_config() {
        let mut app = AppConfig::default();
        app.fetch.timeout_secs = 5;
        let fetch = FetchConfig::from(&app);
        assert_eq!(fetch.timeout_secs, 5);
    }

    #[test]
    fn field_names_from_app_config() {
        let mut app = AppConfig::default();
        app.fields.symbol_key = "ticker".into();
        let fields = FieldNames::from(&app);
        assert_eq!(fields.symbol_key, "ticker");
        assert_eq!(fields.logo_key, "logoURI");
    }
}
