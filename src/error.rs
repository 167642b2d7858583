// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Error types for Luna

use thiserror::Error;

/// Result type alias for Luna operations
pub type Result<T> = std::result::Result<T, LunaError>;

/// Luna error types
#[derive(Error, Debug)]
pub enum LunaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Provider not available: {0}")]
    ProviderUnavailable(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Request already in flight for view {0}")]
    Busy(String),

    #[error("Request cancelled: view {0} was closed")]
    Cancelled(String),
}
