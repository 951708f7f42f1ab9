use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quire_core::{AnthropicClient, LlmClient, OpenAiClient};

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub llm: LlmConfig,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LlmConfig {
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Model override; empty uses the provider default
    #[serde(default)]
    pub model: String,

    /// API key; empty falls back to OPENAI_API_KEY / ANTHROPIC_API_KEY
    #[serde(default)]
    pub api_key: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_store_path() -> String {
    "data/documents.json".to_string()
}

fn default_provider() -> String {
    "openai".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: Vec::new(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: String::new(),
            api_key: String::new(),
        }
    }
}

/// Load config from file or use defaults
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        let content =
            fs::read_to_string(path).context(format!("Failed to read config file: {:?}", path))?;

        let config: Config = toml::from_str(&content).context("Failed to parse TOML config")?;

        Ok(config)
    } else {
        Ok(Config::default())
    }
}

/// Store path with ~ expanded
pub fn store_path(config: &Config) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&config.store.path).to_string())
}

/// Build the configured LLM client; the key comes from config or environment.
pub fn build_llm_client(config: &Config) -> Result<Arc<dyn LlmClient>> {
    match config.llm.provider.as_str() {
        "openai" => {
            let key = resolve_key(&config.llm.api_key, "OPENAI_API_KEY")?;
            let mut client = OpenAiClient::new(&key);
            if !config.llm.model.is_empty() {
                client = client.with_model(&config.llm.model);
            }
            Ok(Arc::new(client))
        }
        "anthropic" => {
            let key = resolve_key(&config.llm.api_key, "ANTHROPIC_API_KEY")?;
            let mut client = AnthropicClient::new(&key);
            if !config.llm.model.is_empty() {
                client = client.with_model(&config.llm.model);
            }
            Ok(Arc::new(client))
        }
        other => anyhow::bail!("Unknown LLM provider: {}", other),
    }
}

fn resolve_key(configured: &str, env_var: &str) -> Result<String> {
    if !configured.is_empty() {
        return Ok(configured.to_string());
    }
    std::env::var(env_var)
        .with_context(|| format!("{} is not set and [llm].api_key is empty", env_var))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.store.path, "data/documents.json");
        assert_eq!(config.llm.provider, "openai");
    }

    #[test]
    fn test_partial_config_overrides() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 9090

            [llm]
            provider = "anthropic"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.llm.provider, "anthropic");
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let config = Config {
            llm: LlmConfig {
                provider: "cohere".into(),
                model: String::new(),
                api_key: "key".into(),
            },
            ..Config::default()
        };

        assert!(build_llm_client(&config).is_err());
    }
}
