// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Web UI and JSON API for the collection

mod api;
mod forms;
mod pages;

use axum::{
    extract::{DefaultBodyLimit, Multipart},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router,
};
use chrono::Local;
use serde_json::json;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::assist::AssistClient;
use crate::catalog::{Artwork, Catalog, Category};
use crate::config::AppConfig;
use crate::gallery::Gallery;
use crate::media::{media_id, media_url, MediaStore};
use crate::upload::{self, BatchForm, StoredFile, UploadedFile};
use crate::views::{ViewLimits, ViewRegistry};
use crate::{LunaError, Result};

pub use pages::Pages;

/// Shared application state
pub struct AppState {
    pub gallery: RwLock<Gallery>,
    pub media: MediaStore,
    pub views: ViewRegistry,
    pub config: AppConfig,
    pub pages: Pages,
}

impl AppState {
    pub fn new(config: AppConfig, assist: AssistClient) -> Result<Self> {
        let catalog = if config.catalog.seed {
            Catalog::seeded()
        } else {
            Catalog::default()
        };
        Ok(Self {
            gallery: RwLock::new(Gallery::new(catalog)),
            media: MediaStore::new(),
            views: ViewRegistry::with_limits(assist, ViewLimits::from_config(&config.views)),
            config,
            pages: Pages::new()?,
        })
    }

    pub fn gallery(&self) -> Result<RwLockReadGuard<'_, Gallery>> {
        self.gallery
            .read()
            .map_err(|_| LunaError::Config("Gallery lock poisoned".to_string()))
    }

    pub fn gallery_mut(&self) -> Result<RwLockWriteGuard<'_, Gallery>> {
        self.gallery
            .write()
            .map_err(|_| LunaError::Config("Gallery lock poisoned".to_string()))
    }

    /// Current copy of one artwork
    pub fn artwork(&self, id: &str) -> Result<Artwork> {
        self.gallery()?
            .catalog()
            .get(id)
            .cloned()
            .ok_or_else(|| LunaError::NotFound(format!("Artwork {}", id)))
    }

    /// Artwork currently shown by an open view
    pub fn view_artwork(&self, view_id: &str) -> Result<Artwork> {
        let view = self.views.snapshot(view_id)?;
        self.artwork(&view.artwork_id)
    }
}

/// Create the web application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.web.max_batch_bytes;

    Router::new()
        // Pages
        .route("/", get(pages::gallery_page))
        .route("/artworks/:id", get(pages::detail_page))
        .route("/admin", get(pages::admin_page))
        .route("/media/:id", get(api::media))
        // Form posts
        .route("/artworks/:id/edit", post(forms::edit_artwork))
        .route("/artworks/:id/views", post(forms::open_view))
        .route("/views/:view/describe", post(forms::describe))
        .route("/views/:view/chat", post(forms::chat))
        .route("/views/:view/close", post(forms::close_view))
        .route("/admin/upload", post(forms::upload))
        .route("/admin/labels", post(forms::labels))
        .route("/admin/background", post(forms::background))
        .route("/admin/background/reset", post(forms::reset_background))
        // API endpoints
        .route("/api/artworks", get(api::list_artworks))
        .route("/api/artworks/upload", post(api::upload))
        .route("/api/artworks/:id", get(api::get_artwork).put(api::update_artwork))
        .route("/api/categories", get(api::categories))
        .route("/api/categories/:category/label", put(api::set_label))
        .route("/api/stats", get(api::stats))
        .route("/api/theme", get(api::theme))
        .route(
            "/api/theme/background",
            post(api::set_background).delete(api::clear_background),
        )
        .route("/api/views", post(api::open_view))
        .route("/api/views/:id", get(api::get_view).delete(api::close_view))
        .route("/api/views/:id/describe", post(api::describe))
        .route("/api/views/:id/chat", post(api::chat))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

impl IntoResponse for LunaError {
    fn into_response(self) -> Response {
        let status = match &self {
            LunaError::NotFound(_) => StatusCode::NOT_FOUND,
            LunaError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            LunaError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            LunaError::Conflict(_) => StatusCode::CONFLICT,
            LunaError::Busy(_) => StatusCode::TOO_MANY_REQUESTS,
            LunaError::Cancelled(_) => StatusCode::GONE,
            LunaError::ProviderUnavailable(_) | LunaError::Api(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            warn!("Request failed: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// `?category=` value, empty or missing meaning ALL
pub(crate) fn parse_category(raw: Option<&str>) -> Result<Category> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Category::All),
        Some(value) => value.parse(),
    }
}

/// Read a batch upload form, store its files and add the records to the gallery
pub(crate) async fn ingest_upload(state: &AppState, mut multipart: Multipart) -> Result<Vec<Artwork>> {
    let mut category = None;
    let mut year = None;
    let mut description = None;
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "category" => category = Some(field.text().await.map_err(multipart_error)?.parse::<Category>()?),
            "year" => year = Some(field.text().await.map_err(multipart_error)?),
            "description" => description = Some(field.text().await.map_err(multipart_error)?),
            "files" | "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                // browsers send one empty part when nothing was picked
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                files.push(UploadedFile { file_name, content_type, bytes });
            }
            _ => {}
        }
    }

    let form = BatchForm {
        category: category.unwrap_or(Category::Painting),
        year,
        description,
    };
    upload::validate_files(&files, state.config.web.max_upload_bytes)?;

    let mut stored = Vec::with_capacity(files.len());
    for file in files {
        let id = state.media.insert(&file.file_name, &file.content_type, file.bytes)?;
        stored.push((id, file.file_name));
    }
    let stored_files: Vec<StoredFile> = stored
        .iter()
        .map(|(id, file_name)| StoredFile {
            file_name: file_name.clone(),
            url: media_url(id),
        })
        .collect();

    let result = upload::build_batch(&form, &stored_files, &Local::now())
        .and_then(|items| state.gallery_mut()?.insert_batch(items.clone()).map(|_| items));

    if result.is_err() {
        for (id, _) in &stored {
            if let Err(e) = state.media.remove(id) {
                warn!("Failed to discard media {} after rejected upload: {}", id, e);
            }
        }
    }
    result
}

/// Swap the custom background, discarding the previous one if it was an upload
pub(crate) fn replace_background(state: &AppState, reference: Option<String>) -> Result<()> {
    let previous = state.gallery_mut()?.set_custom_background(reference.clone());
    let stale = previous
        .as_deref()
        .filter(|prev| Some(*prev) != reference.as_deref())
        .and_then(media_id);
    if let Some(id) = stale {
        if let Err(e) = state.media.remove(id) {
            warn!("Failed to discard old background {}: {}", id, e);
        }
    }
    Ok(())
}

/// Store a single uploaded image and make it the custom background
pub(crate) async fn ingest_background(state: &AppState, mut multipart: Multipart) -> Result<String> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }
        let file = UploadedFile {
            file_name: field.file_name().unwrap_or_default().to_string(),
            content_type: field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string(),
            bytes: field.bytes().await.map_err(multipart_error)?,
        };
        upload::validate_files(std::slice::from_ref(&file), state.config.web.max_upload_bytes)?;

        let id = state.media.insert(&file.file_name, &file.content_type, file.bytes)?;
        let url = media_url(&id);
        replace_background(state, Some(url.clone()))?;
        return Ok(url);
    }
    Err(LunaError::InvalidInput("No background file".to_string()))
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> LunaError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        LunaError::PayloadTooLarge("Request body exceeds the batch upload limit".to_string())
    } else {
        LunaError::InvalidInput(format!("Malformed upload: {}", e))
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
        _ = terminate => info!("Received SIGTERM, shutting down..."),
    }
}

/// Start the web server with config and assist client
pub async fn start_server(config: AppConfig, assist: AssistClient) -> Result<()> {
    let addr = config.bind_addr();
    let state = Arc::new(AppState::new(config, assist)?);
    info!("Catalog loaded with {} artworks", state.gallery()?.catalog().len());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Web UI available at http://{}", addr);

    let router = create_router(state);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| LunaError::Config(format!("Server error: {}", e)))?;

    info!("Luna stopped.");
    Ok(())
}
