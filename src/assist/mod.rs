// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! AI curator: descriptions and chat backed by a generative text provider
//!
//! The provider holds no conversation state. Every chat turn resends the
//! whole transcript, so the client itself stays stateless. Provider failures
//! never reach the caller; they are logged and replaced by a fixed sentence.

pub mod gemini;
pub mod prompt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::catalog::Artwork;
use crate::config::{AppConfig, PromptConfig};
use crate::Result;

pub use gemini::GeminiClient;

pub const DESCRIPTION_EMPTY: &str =
    "The curator is currently observing other pieces. Please try again later.";
pub const DESCRIPTION_UNAVAILABLE: &str =
    "Detailed analysis is currently unavailable due to high visitor volume.";
pub const CHAT_EMPTY: &str = "I apologize, I didn't quite catch that.";
pub const CHAT_UNAVAILABLE: &str = "The curator is stepping away for a moment.";

/// Who said a chat line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One turn of a transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User, text: text.into() }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self { role: Role::Model, text: text.into() }
    }
}

/// A single text generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub system_instruction: Option<String>,
}

/// Anything that can turn a prompt into text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<String>;
}

/// Curator-facing wrapper around a [`TextGenerator`]
#[derive(Clone)]
pub struct AssistClient {
    generator: Arc<dyn TextGenerator>,
    model: String,
    prompts: PromptConfig,
}

impl AssistClient {
    pub fn new(generator: Arc<dyn TextGenerator>, model: impl Into<String>, prompts: PromptConfig) -> Self {
        Self {
            generator,
            model: model.into(),
            prompts,
        }
    }

    /// Client backed by Gemini as configured
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let gemini = GeminiClient::new(&config.assist)?;
        Ok(Self::new(Arc::new(gemini), config.assist.model.clone(), config.prompts.clone()))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Museum-style description of an artwork; never fails
    pub async fn generate_description(&self, artwork: &Artwork) -> String {
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: prompt::description_prompt(artwork, &self.prompts),
            system_instruction: None,
        };

        debug!("Requesting description for {}", artwork.id);
        self.complete(&request, DESCRIPTION_EMPTY, DESCRIPTION_UNAVAILABLE).await
    }

    /// Curator answer to `message`, given the prior transcript; never fails
    pub async fn chat_reply(&self, history: &[ChatMessage], message: &str, artwork: &Artwork) -> String {
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: prompt::chat_prompt(history, message),
            system_instruction: Some(prompt::chat_system_instruction(artwork, &self.prompts)),
        };

        debug!("Chat turn {} for {}", history.len() / 2 + 1, artwork.id);
        self.complete(&request, CHAT_EMPTY, CHAT_UNAVAILABLE).await
    }

    async fn complete(&self, request: &GenerateRequest, empty: &str, unavailable: &str) -> String {
        match self.generator.generate(request).await {
            Ok(text) if text.trim().is_empty() => empty.to_string(),
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!("Provider call failed: {}, using fallback", e);
                unavailable.to_string()
            }
        }
    }
}
