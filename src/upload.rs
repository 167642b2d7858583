// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Batch upload: turn selected image files into catalog records

use axum::body::Bytes;
use chrono::{DateTime, Datelike, TimeZone};

use crate::catalog::{Artwork, Category};
use crate::{LunaError, Result};

pub const DEFAULT_MATERIALS: &str = "Uploaded Material";
pub const DEFAULT_DIMENSIONS: &str = "Variable";
pub const DEFAULT_DESCRIPTION: &str = "No description provided.";

/// Settings shared by every file in one batch
#[derive(Debug, Clone)]
pub struct BatchForm {
    pub category: Category,
    pub year: Option<String>,
    pub description: Option<String>,
}

/// A file as received from the client
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// A file after it has been placed in the media store
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub file_name: String,
    pub url: String,
}

/// File name without its last extension
pub fn title_from_file_name(file_name: &str) -> String {
    let stem = match file_name.rfind('.') {
        Some(dot) if !file_name[dot + 1..].is_empty() && !file_name[dot + 1..].contains('/') => {
            &file_name[..dot]
        }
        _ => file_name,
    };
    if stem.is_empty() {
        file_name.to_string()
    } else {
        stem.to_string()
    }
}

/// Reject a batch that has no files, non-images, or oversized files
pub fn validate_files(files: &[UploadedFile], max_bytes: usize) -> Result<()> {
    if files.is_empty() {
        return Err(LunaError::InvalidInput("No files selected".to_string()));
    }
    for file in files {
        if !file.content_type.starts_with("image/") {
            return Err(LunaError::InvalidInput(format!(
                "{} is not an image ({})",
                file.file_name, file.content_type
            )));
        }
        if file.bytes.len() > max_bytes {
            return Err(LunaError::PayloadTooLarge(format!(
                "{} exceeds the {} byte upload limit",
                file.file_name, max_bytes
            )));
        }
    }
    Ok(())
}

/// One artwork per stored file, ids derived from `now` and the file index
pub fn build_batch<Tz: TimeZone>(
    form: &BatchForm,
    files: &[StoredFile],
    now: &DateTime<Tz>,
) -> Result<Vec<Artwork>> {
    if files.is_empty() {
        return Err(LunaError::InvalidInput("No files selected".to_string()));
    }
    if form.category == Category::All {
        return Err(LunaError::InvalidInput("Choose a concrete category".to_string()));
    }

    let year = form
        .year
        .as_deref()
        .map(str::trim)
        .filter(|y| !y.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| now.year().to_string());
    let description = form
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(DEFAULT_DESCRIPTION)
        .to_string();
    let stamp = now.timestamp_millis();

    Ok(files
        .iter()
        .enumerate()
        .map(|(index, file)| Artwork {
            id: format!("local-{}-{}", stamp, index),
            title: title_from_file_name(&file.file_name),
            category: form.category,
            year: year.clone(),
            dimensions: DEFAULT_DIMENSIONS.to_string(),
            materials: DEFAULT_MATERIALS.to_string(),
            image_url: file.url.clone(),
            short_description: description.clone(),
            full_description: None,
        })
        .collect())
}
