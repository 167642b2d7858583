// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Luna Collection: a small digital museum
//!
//! An in-memory catalog of artworks across six crafts, browsed by category
//! and free-text search, with category-themed backdrops and an AI curator
//! that writes descriptions and answers visitor questions.

pub mod assist;
pub mod catalog;
pub mod config;
pub mod error;
pub mod gallery;
pub mod media;
pub mod theme;
pub mod upload;
pub mod views;
pub mod web;

pub use config::AppConfig;
pub use error::{LunaError, Result};
