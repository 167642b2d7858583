// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Uploaded images held in memory for the lifetime of the process

use axum::body::Bytes;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::{LunaError, Result};

/// Stored upload
#[derive(Debug, Clone)]
pub struct MediaObject {
    pub id: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Ephemeral object store, the server-side stand-in for browser object URLs
#[derive(Default)]
pub struct MediaStore {
    objects: RwLock<HashMap<String, MediaObject>>,
}

/// Public path an object is served under
pub fn media_url(id: &str) -> String {
    format!("/media/{}", id)
}

/// Object id behind a `/media/{id}` reference
pub fn media_id(url: &str) -> Option<&str> {
    url.strip_prefix("/media/").filter(|id| !id.is_empty() && !id.contains('/'))
}

impl MediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, MediaObject>>> {
        self.objects
            .read()
            .map_err(|_| LunaError::Config("Media store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, MediaObject>>> {
        self.objects
            .write()
            .map_err(|_| LunaError::Config("Media store lock poisoned".to_string()))
    }

    /// Store bytes and return the new object's id
    pub fn insert(&self, file_name: &str, content_type: &str, bytes: Bytes) -> Result<String> {
        let id = Uuid::new_v4().simple().to_string();
        self.write()?.insert(
            id.clone(),
            MediaObject {
                id: id.clone(),
                file_name: file_name.to_string(),
                content_type: content_type.to_string(),
                bytes,
            },
        );
        Ok(id)
    }

    pub fn get(&self, id: &str) -> Result<MediaObject> {
        self.read()?
            .get(id)
            .cloned()
            .ok_or_else(|| LunaError::NotFound(format!("Media {}", id)))
    }

    pub fn remove(&self, id: &str) -> Result<()> {
        self.write()?.remove(id);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.read().map(|o| o.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
