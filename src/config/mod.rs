// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Configuration management for Luna

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    /// Generative text provider settings
    #[serde(default)]
    pub assist: AssistConfig,

    /// Prompt tuning for the curator
    #[serde(default)]
    pub prompts: PromptConfig,

    /// Web UI settings
    #[serde(default)]
    pub web: WebConfig,

    /// Catalog settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Open detail view limits
    #[serde(default)]
    pub views: ViewConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AssistConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PromptConfig {
    #[serde(default = "default_museum_name")]
    pub museum_name: String,
    #[serde(default = "default_description_words")]
    pub description_words: u32,
    #[serde(default = "default_chat_words")]
    pub chat_words: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WebConfig {
    #[serde(default = "default_web_host")]
    pub host: String,
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// Limit for each uploaded file
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// Limit for a whole request body, a batch of files included
    #[serde(default = "default_max_batch_bytes")]
    pub max_batch_bytes: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CatalogConfig {
    /// Start with the built-in collection instead of an empty catalog
    #[serde(default = "default_true")]
    pub seed: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ViewConfig {
    /// Views untouched for this long are closed when another view opens
    #[serde(default = "default_view_idle_secs")]
    pub idle_secs: u64,
    /// Most views kept open at once; the least recently used goes first
    #[serde(default = "default_max_open_views")]
    pub max_open: usize,
}

// Default value functions
fn default_base_url() -> String { "https://generativelanguage.googleapis.com".to_string() }
fn default_model() -> String { "gemini-2.5-flash".to_string() }
fn default_api_key_env() -> String { "API_KEY".to_string() }
fn default_timeout() -> u64 { 60 }
fn default_museum_name() -> String { "Lumière Museum".to_string() }
fn default_description_words() -> u32 { 100 }
fn default_chat_words() -> u32 { 80 }
fn default_web_host() -> String { "127.0.0.1".to_string() }
fn default_web_port() -> u16 { 8080 }
fn default_max_upload_bytes() -> usize { 20 * 1024 * 1024 }
fn default_max_batch_bytes() -> usize { 200 * 1024 * 1024 }
fn default_view_idle_secs() -> u64 { 30 * 60 }
fn default_max_open_views() -> usize { 256 }
fn default_true() -> bool { true }

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            museum_name: default_museum_name(),
            description_words: default_description_words(),
            chat_words: default_chat_words(),
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_web_host(),
            port: default_web_port(),
            max_upload_bytes: default_max_upload_bytes(),
            max_batch_bytes: default_max_batch_bytes(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { seed: default_true() }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            idle_secs: default_view_idle_secs(),
            max_open: default_max_open_views(),
        }
    }
}

impl AssistConfig {
    /// Read the provider credential from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = serde_json::from_str(&content)
                .map_err(|e| crate::LunaError::Config(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            tracing::info!("Config file not found at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Address the web server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.web.host, self.web.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config.assist.model, "gemini-2.5-flash");
        assert_eq!(config.web.port, 8080);
        assert!(config.catalog.seed);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = AppConfig::default();
        config.web.port = 9191;
        config.assist.model = "gemini-2.0-flash".to_string();
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.web.port, 9191);
        assert_eq!(loaded.assist.model, "gemini-2.0-flash");
        assert_eq!(loaded.bind_addr(), "127.0.0.1:9191");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "web": { "port": 3000 } }"#).unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.web.port, 3000);
        assert_eq!(config.web.host, "127.0.0.1");
        assert_eq!(config.prompts.chat_words, 80);
        assert_eq!(config.web.max_batch_bytes, 200 * 1024 * 1024);
        assert_eq!(config.views.max_open, 256);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        match AppConfig::load(&path) {
            Err(crate::LunaError::Config(msg)) => assert!(msg.contains("Failed to parse")),
            other => panic!("Expected config error, got {:?}", other),
        }
    }
}
