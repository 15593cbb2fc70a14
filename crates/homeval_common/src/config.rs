//! Homeval configuration.
//!
//! Config file: $HOMEVAL_CONFIG, $XDG_CONFIG_HOME/homeval/config.toml
//! (~/.config when unset) or /etc/homeval/config.toml. Every field has a default, so a missing file
//! or an empty `[llm]` table is fine.
//!
//! The API key itself never lives in the file; `api_key_env` names the
//! environment variable that holds it. It is read once, at startup.

use crate::engine::CallSettings;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that overrides the config file location
pub const CONFIG_ENV: &str = "HOMEVAL_CONFIG";

/// Completion service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// OpenAI-compatible API root, e.g. "https://api.openai.com/v1"
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Kept low so numeric answers stay stable
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Call-level timeout; expiry falls back like any other failure
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl LlmConfig {
    /// Read the credential from the environment. Blank values count as absent.
    pub fn resolve_credential(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    pub fn call_settings(&self) -> CallSettings {
        CallSettings {
            temperature: self.temperature,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// XDG config dir is used as-is; HOME only gets `.config` appended.
/// Empty values count as unset.
fn user_config_dir(xdg_config_home: Option<String>, home: Option<String>) -> Option<PathBuf> {
    let non_empty = |v: String| if v.is_empty() { None } else { Some(v) };

    xdg_config_home
        .and_then(non_empty)
        .map(PathBuf::from)
        .or_else(|| home.and_then(non_empty).map(|h| Path::new(&h).join(".config")))
}

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomevalConfig {
    #[serde(default)]
    pub llm: LlmConfig,
}

impl HomevalConfig {
    /// $XDG_CONFIG_HOME/homeval/config.toml, else ~/.config/homeval/config.toml
    pub fn user_config_path() -> Result<PathBuf> {
        let config_dir = user_config_dir(
            std::env::var("XDG_CONFIG_HOME").ok(),
            std::env::var("HOME").ok(),
        )
        .context("Cannot determine config directory")?;

        Ok(config_dir.join("homeval").join("config.toml"))
    }

    pub fn system_config_path() -> PathBuf {
        PathBuf::from("/etc/homeval/config.toml")
    }

    /// Load configuration
    ///
    /// Priority:
    /// 1. $HOMEVAL_CONFIG (must exist when set)
    /// 2. User config ($XDG_CONFIG_HOME or ~/.config, then homeval/config.toml)
    /// 3. System config (/etc/homeval/config.toml)
    /// 4. Defaults
    pub fn load() -> Result<Self> {
        if let Ok(explicit) = std::env::var(CONFIG_ENV) {
            return Self::load_from(Path::new(&explicit));
        }

        if let Ok(user_path) = Self::user_config_path() {
            if user_path.exists() {
                return Self::load_from(&user_path);
            }
        }

        let system_path = Self::system_config_path();
        if system_path.exists() {
            return Self::load_from(&system_path);
        }

        Ok(Self::default())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}
