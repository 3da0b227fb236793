use std::path::PathBuf;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::completion::{self, CompletionConfig};
use crate::error::{Error, Result};

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub default_lang: Option<String>,
    pub temperature: Option<f64>,
}

impl Config {
    /// Load config from ~/.config/ytwise/config.toml if it exists
    pub fn load() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }

    /// Build completion settings with CLI flags taking priority over the
    /// config file, which takes priority over the built-in defaults. The
    /// API key comes from the config file or the environment.
    pub fn completion_config(
        &self,
        model_flag: Option<&str>,
        base_url_flag: Option<&str>,
    ) -> Result<CompletionConfig> {
        let api_key = match &self.api_key {
            Some(key) => key.clone(),
            None => std::env::var(completion::API_KEY_ENV).map_err(|_| Error::MissingApiKey {
                env_var: completion::API_KEY_ENV,
            })?,
        };

        Ok(CompletionConfig {
            base_url: base_url_flag
                .map(str::to_string)
                .or_else(|| self.base_url.clone())
                .unwrap_or_else(|| completion::DEFAULT_BASE_URL.to_string()),
            api_key,
            model: model_flag
                .map(str::to_string)
                .or_else(|| self.model.clone())
                .unwrap_or_else(|| completion::DEFAULT_MODEL.to_string()),
            temperature: self.temperature.unwrap_or(completion::DEFAULT_TEMPERATURE),
        })
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("ytwise")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
base_url = "http://localhost:1234/v1"
model = "local-model"
api_key = "secret"
default_lang = "es"
temperature = 0.2
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:1234/v1"));
        assert_eq!(config.model.as_deref(), Some("local-model"));
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.default_lang.as_deref(), Some("es"));
        assert_eq!(config.temperature, Some(0.2));
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.base_url.is_none());
        assert!(config.model.is_none());
    }

    #[test]
    fn test_parse_partial_config() {
        let config: Config = toml::from_str(r#"default_lang = "fr""#).unwrap();
        assert_eq!(config.default_lang.as_deref(), Some("fr"));
        assert!(config.model.is_none());
    }

    #[test]
    fn test_completion_config_precedence() {
        let config = Config {
            base_url: Some("http://file.example/v1".to_string()),
            model: Some("file-model".to_string()),
            api_key: Some("key".to_string()),
            default_lang: None,
            temperature: None,
        };

        let built = config.completion_config(Some("flag-model"), None).unwrap();
        assert_eq!(built.model, "flag-model");
        assert_eq!(built.base_url, "http://file.example/v1");
        assert!((built.temperature - 0.7).abs() < f64::EPSILON);

        let built = config.completion_config(None, None).unwrap();
        assert_eq!(built.model, "file-model");
    }
}
