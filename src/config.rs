use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub openai: OpenAiConfig,

    pub anthropic: AnthropicConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    pub images_path: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/newsroom.db".to_string(),
            log_level: "info".to_string(),
            images_path: "static/images".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    pub bind_address: String,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            bind_address: "0.0.0.0".to_string(),
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    pub base_url: String,

    /// Model driving the planning, image-prompt, and caption calls.
    pub chat_model: String,

    pub image_model: String,

    pub image_size: String,

    pub image_quality: String,

    /// Request timeout in seconds (default: 300). Image generation is slow.
    pub request_timeout_seconds: u32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            chat_model: "gpt-5".to_string(),
            image_model: "gpt-image-1-mini".to_string(),
            image_size: "1024x1024".to_string(),
            image_quality: "high".to_string(),
            request_timeout_seconds: 300,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnthropicConfig {
    pub base_url: String,

    pub model: String,

    pub max_tokens: u32,

    /// Token budget for extended thinking during the research stage.
    pub thinking_budget_tokens: u32,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.anthropic.com/v1".to_string(),
            model: "claude-haiku-4-5-20251001".to_string(),
            max_tokens: 20000,
            thinking_budget_tokens: 16000,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    fn config_paths() -> Vec<PathBuf> {
        vec![
            PathBuf::from("config.toml"),
            PathBuf::from("data/config.toml"),
        ]
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.server.port != 0, "server.port must be non-zero");
        anyhow::ensure!(
            self.general.max_db_connections >= self.general.min_db_connections,
            "general.max_db_connections must be >= min_db_connections"
        );
        anyhow::ensure!(
            self.anthropic.thinking_budget_tokens < self.anthropic.max_tokens,
            "anthropic.thinking_budget_tokens must be below max_tokens"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 8080

            [openai]
            chat_model = "gpt-5-mini"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.openai.chat_model, "gpt-5-mini");
        assert_eq!(config.openai.image_model, "gpt-image-1-mini");
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_invalid_thinking_budget_rejected() {
        let mut config = Config::default();
        config.anthropic.thinking_budget_tokens = config.anthropic.max_tokens;
        assert!(config.validate().is_err());
    }
}
