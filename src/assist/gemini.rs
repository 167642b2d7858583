// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Gemini `generateContent` client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{GenerateRequest, TextGenerator};
use crate::config::AssistConfig;
use crate::{LunaError, Result};

/// Gemini API client
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    key_var: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

#[derive(Serialize, Deserialize, Default)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Deserialize)]
struct ModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Deserialize)]
struct ModelInfo {
    name: String,
}

impl ContentRequest {
    fn from_request(request: &GenerateRequest) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: request.prompt.clone() }],
            }],
            system_instruction: request.system_instruction.as_ref().map(|text| Content {
                role: None,
                parts: vec![Part { text: text.clone() }],
            }),
        }
    }
}

impl ContentResponse {
    /// Text of the first candidate, parts concatenated
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .map(|c| c.content.parts.into_iter().map(|p| p.text).collect::<String>())
            .unwrap_or_default()
    }
}

impl GeminiClient {
    /// Create a new Gemini client; the key is read from the configured variable
    pub fn new(config: &AssistConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        // Normalize URL
        let base_url = config
            .base_url
            .trim_end_matches('/')
            .trim_end_matches("/v1beta")
            .to_string();

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key(),
            key_var: config.api_key_env.clone(),
        })
    }

    fn key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            LunaError::ProviderUnavailable(format!("API key not set (expected in ${})", self.key_var))
        })
    }

    /// Check the provider is reachable and the key is accepted
    pub async fn health_check(&self) -> Result<()> {
        self.list_models().await.map(|_| ())
    }

    /// List available models
    pub async fn list_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/v1beta/models", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("x-goog-api-key", self.key()?)
            .timeout(Duration::from_secs(10))
            .send()
            .await
            .map_err(|e| {
                LunaError::ProviderUnavailable(format!(
                    "Cannot connect to {}: {}",
                    self.base_url, e
                ))
            })?;

        if !response.status().is_success() {
            return Err(LunaError::ProviderUnavailable(format!(
                "Provider returned status {}",
                response.status()
            )));
        }

        let models: ModelsResponse = response.json().await?;
        Ok(models
            .models
            .into_iter()
            .map(|m| m.name.trim_start_matches("models/").to_string())
            .collect())
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<String> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, request.model);

        debug!("Sending request to Gemini: model={}", request.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.key()?)
            .json(&ContentRequest::from_request(request))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LunaError::ProviderUnavailable(format!(
                "Provider returned status {}",
                response.status()
            )));
        }

        let result: ContentResponse = response.json().await?;
        Ok(result.text())
    }
}
