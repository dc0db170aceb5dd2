use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Spreadsheet web-app endpoint for remote progress sync. Empty disables
    /// sync entirely.
    #[serde(default = "default_script_url")]
    pub script_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Gemini API key. Falls back to the GEMINI_API_KEY env var when unset.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_theme() -> String {
    "cosmic-dark".to_string()
}
fn default_script_url() -> String {
    "https://script.google.com/macros/s/AKfycbybiIeuH0EcBpSL31HdlGAQoVeW4nye3UXRXBVL1zUFJnZs_UsZAI3Nb4MLRsrzk2kj/exec"
        .to_string()
}
fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}
fn default_request_timeout_secs() -> u64 {
    20
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            script_url: default_script_url(),
            model: default_model(),
            api_key: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quizdr")
            .join("config.toml")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gets_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "cosmic-dark");
        assert_eq!(config.model, "gemini-3-flash-preview");
        assert!(config.api_key.is_none());
        assert!(!config.script_url.is_empty());
        assert_eq!(config.request_timeout_secs, 20);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
theme = "terminal-default"
script_url = ""
"#,
        )
        .unwrap();
        assert_eq!(config.theme, "terminal-default");
        assert!(config.script_url.is_empty());
        assert_eq!(config.request_timeout_secs, 20);
    }

    #[test]
    fn round_trip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.theme, deserialized.theme);
        assert_eq!(config.script_url, deserialized.script_url);
        assert_eq!(config.model, deserialized.model);
    }

    #[test]
    fn timeout_never_zero() {
        let mut config = Config::default();
        config.request_timeout_secs = 0;
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }
}
