// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Open detail views and their curator transcripts
//!
//! A view owns its transcript and a cancellation token. Closing the view
//! cancels any request still waiting on the provider, and a result that
//! arrives for a view that no longer exists is dropped.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

use crate::assist::{prompt, AssistClient, ChatMessage};
use crate::catalog::Artwork;
use crate::config::ViewConfig;
use crate::{LunaError, Result};

struct View {
    artwork_id: String,
    transcript: Vec<ChatMessage>,
    description: Option<String>,
    chat_pending: bool,
    describe_pending: bool,
    cancel: CancellationToken,
    touched: Instant,
    last_used: u64,
}

impl View {
    fn touch(&mut self, stamp: u64) {
        self.touched = Instant::now();
        self.last_used = stamp;
    }

    fn is_busy(&self) -> bool {
        self.chat_pending || self.describe_pending
    }
}

/// How long views may sit unused and how many may be open at once
#[derive(Debug, Clone, Copy)]
pub struct ViewLimits {
    pub idle: Duration,
    pub max_open: usize,
}

impl ViewLimits {
    pub fn from_config(config: &ViewConfig) -> Self {
        Self {
            idle: Duration::from_secs(config.idle_secs),
            max_open: config.max_open.max(1),
        }
    }
}

impl Default for ViewLimits {
    fn default() -> Self {
        Self::from_config(&ViewConfig::default())
    }
}

/// Read-only copy of a view's state
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub id: String,
    pub artwork_id: String,
    pub transcript: Vec<ChatMessage>,
    pub description: Option<String>,
    pub chat_pending: bool,
    pub describe_pending: bool,
}

#[derive(Clone, Copy)]
enum Pending {
    Chat,
    Describe,
}

/// Registry of open detail views
pub struct ViewRegistry {
    views: Mutex<HashMap<String, View>>,
    assist: AssistClient,
    limits: ViewLimits,
    clock: AtomicU64,
}

/// Clears a view's pending flag however the request ends
struct PendingGuard<'a> {
    registry: &'a ViewRegistry,
    id: &'a str,
    kind: Pending,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut views) = self.registry.lock_views() {
            if let Some(view) = views.get_mut(self.id) {
                match self.kind {
                    Pending::Chat => view.chat_pending = false,
                    Pending::Describe => view.describe_pending = false,
                }
            }
        }
    }
}

impl ViewRegistry {
    pub fn new(assist: AssistClient) -> Self {
        Self::with_limits(assist, ViewLimits::default())
    }

    pub fn with_limits(assist: AssistClient, limits: ViewLimits) -> Self {
        Self {
            views: Mutex::new(HashMap::new()),
            assist,
            limits,
            clock: AtomicU64::new(0),
        }
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }

    /// Close idle views, then least recently used ones until one more fits
    fn evict(&self, views: &mut HashMap<String, View>) {
        let expired: Vec<String> = views
            .iter()
            .filter(|(_, view)| !view.is_busy() && view.touched.elapsed() > self.limits.idle)
            .map(|(id, _)| id.clone())
            .collect();
        for id in expired {
            if let Some(view) = views.remove(&id) {
                view.cancel.cancel();
                debug!("Evicted idle view {}", id);
            }
        }

        while views.len() >= self.limits.max_open {
            let Some(oldest) = views
                .iter()
                .min_by_key(|(_, view)| view.last_used)
                .map(|(id, _)| id.clone())
            else {
                break;
            };
            if let Some(view) = views.remove(&oldest) {
                view.cancel.cancel();
                info!("Evicted least recently used view {}", oldest);
            }
        }
    }

    fn lock_views(&self) -> Result<MutexGuard<'_, HashMap<String, View>>> {
        self.views
            .lock()
            .map_err(|_| LunaError::Config("View registry lock poisoned".to_string()))
    }

    /// Open a view on an artwork and return its id
    pub fn open(&self, artwork: &Artwork) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let mut views = self.lock_views()?;
        self.evict(&mut views);
        views.insert(
            id.clone(),
            View {
                artwork_id: artwork.id.clone(),
                transcript: vec![ChatMessage::model(prompt::greeting(artwork))],
                description: artwork.full_description.clone(),
                chat_pending: false,
                describe_pending: false,
                cancel: CancellationToken::new(),
                touched: Instant::now(),
                last_used: self.tick(),
            },
        );
        drop(views);
        info!("Opened view {} on {}", id, artwork.id);
        Ok(id)
    }

    /// Close a view, abandoning anything still in flight
    pub fn close(&self, id: &str) -> Result<()> {
        let view = self
            .lock_views()?
            .remove(id)
            .ok_or_else(|| LunaError::NotFound(format!("View {}", id)))?;
        view.cancel.cancel();
        info!("Closed view {} ({} messages discarded)", id, view.transcript.len());
        Ok(())
    }

    /// Current state of a view; counts as activity on it
    pub fn snapshot(&self, id: &str) -> Result<ViewSnapshot> {
        let mut views = self.lock_views()?;
        let view = views
            .get_mut(id)
            .ok_or_else(|| LunaError::NotFound(format!("View {}", id)))?;
        view.touch(self.tick());
        Ok(ViewSnapshot {
            id: id.to_string(),
            artwork_id: view.artwork_id.clone(),
            transcript: view.transcript.clone(),
            description: view.description.clone(),
            chat_pending: view.chat_pending,
            describe_pending: view.describe_pending,
        })
    }

    pub fn len(&self) -> usize {
        self.lock_views().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mark a request as started; fails if the same kind is already running
    fn begin<'a>(&'a self, id: &'a str, kind: Pending) -> Result<(PendingGuard<'a>, CancellationToken)> {
        let mut views = self.lock_views()?;
        let view = views
            .get_mut(id)
            .ok_or_else(|| LunaError::NotFound(format!("View {}", id)))?;

        let flag = match kind {
            Pending::Chat => &mut view.chat_pending,
            Pending::Describe => &mut view.describe_pending,
        };
        if *flag {
            return Err(LunaError::Busy(id.to_string()));
        }
        *flag = true;
        view.touch(self.tick());

        Ok((PendingGuard { registry: self, id, kind }, view.cancel.clone()))
    }

    /// Generate a description for the view's artwork and keep it on the view
    pub async fn describe(&self, id: &str, artwork: &Artwork) -> Result<String> {
        let (_guard, cancel) = self.begin(id, Pending::Describe)?;

        let text = tokio::select! {
            _ = cancel.cancelled() => return Err(LunaError::Cancelled(id.to_string())),
            text = self.assist.generate_description(artwork) => text,
        };

        let mut views = self.lock_views()?;
        let view = views
            .get_mut(id)
            .ok_or_else(|| LunaError::Cancelled(id.to_string()))?;
        view.description = Some(text.clone());
        Ok(text)
    }

    /// Send a visitor message and record the curator's reply
    pub async fn chat(&self, id: &str, message: &str, artwork: &Artwork) -> Result<ChatMessage> {
        let message = message.trim();
        if message.is_empty() {
            return Err(LunaError::InvalidInput("Empty message".to_string()));
        }

        let (_guard, cancel) = self.begin(id, Pending::Chat)?;

        let history = {
            let mut views = self.lock_views()?;
            let view = views
                .get_mut(id)
                .ok_or_else(|| LunaError::Cancelled(id.to_string()))?;
            let history = view.transcript.clone();
            view.transcript.push(ChatMessage::user(message));
            history
        };

        let text = tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Dropping chat reply for closed view {}", id);
                return Err(LunaError::Cancelled(id.to_string()));
            }
            text = self.assist.chat_reply(&history, message, artwork) => text,
        };

        let reply = ChatMessage::model(text);
        let mut views = self.lock_views()?;
        let view = views
            .get_mut(id)
            .ok_or_else(|| LunaError::Cancelled(id.to_string()))?;
        view.transcript.push(reply.clone());
        Ok(reply)
    }
}
