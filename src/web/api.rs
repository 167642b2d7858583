// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! JSON endpoints

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ingest_upload, parse_category, replace_background, AppState};
use crate::assist::ChatMessage;
use crate::catalog::{Artwork, Category, CategoryLabels};
use crate::views::ViewSnapshot;
use crate::{LunaError, Result};

#[derive(Deserialize)]
pub(crate) struct ArtworksQuery {
    category: Option<String>,
    q: Option<String>,
}

pub(crate) async fn list_artworks(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ArtworksQuery>,
) -> Result<Json<Vec<Artwork>>> {
    let category = parse_category(query.category.as_deref())?;
    let term = query.q.as_deref().unwrap_or_default().trim();
    Ok(Json(state.gallery()?.visible(category, term)))
}

pub(crate) async fn get_artwork(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Artwork>> {
    Ok(Json(state.artwork(&id)?))
}

pub(crate) async fn update_artwork(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(artwork): Json<Artwork>,
) -> Result<Json<Artwork>> {
    if artwork.id != id {
        return Err(LunaError::InvalidInput(format!(
            "Body id {} does not match path id {}",
            artwork.id, id
        )));
    }
    state.gallery_mut()?.update(artwork.clone())?;
    Ok(Json(artwork))
}

pub(crate) async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Vec<Artwork>>)> {
    let items = ingest_upload(&state, multipart).await?;
    Ok((StatusCode::CREATED, Json(items)))
}

pub(crate) async fn categories(State(state): State<Arc<AppState>>) -> Result<Json<CategoryLabels>> {
    Ok(Json(state.gallery()?.catalog().labels().clone()))
}

#[derive(Deserialize)]
pub(crate) struct LabelBody {
    label: String,
}

pub(crate) async fn set_label(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    Json(body): Json<LabelBody>,
) -> Result<Json<CategoryLabels>> {
    let category: Category = category.parse()?;
    let mut gallery = state.gallery_mut()?;
    gallery.set_label(category, body.label);
    Ok(Json(gallery.catalog().labels().clone()))
}

#[derive(Serialize)]
pub(crate) struct StatsResponse {
    total_artworks: usize,
    categories: Vec<(Category, usize)>,
    open_views: usize,
    media_objects: usize,
}

pub(crate) async fn stats(State(state): State<Arc<AppState>>) -> Result<Json<StatsResponse>> {
    let gallery = state.gallery()?;
    Ok(Json(StatsResponse {
        total_artworks: gallery.catalog().len(),
        categories: gallery.catalog().count_by_category(),
        open_views: state.views.len(),
        media_objects: state.media.len(),
    }))
}

#[derive(Deserialize)]
pub(crate) struct ThemeQuery {
    category: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ThemeResponse {
    category: Category,
    background: String,
    custom: bool,
}

pub(crate) async fn theme(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ThemeQuery>,
) -> Result<Json<ThemeResponse>> {
    let category = parse_category(query.category.as_deref())?;
    let gallery = state.gallery()?;
    Ok(Json(ThemeResponse {
        category,
        background: gallery.background(category),
        custom: gallery.custom_background().is_some(),
    }))
}

#[derive(Deserialize)]
pub(crate) struct BackgroundBody {
    url: String,
}

pub(crate) async fn set_background(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BackgroundBody>,
) -> Result<StatusCode> {
    let url = body.url.trim();
    if url.is_empty() {
        return Err(LunaError::InvalidInput("Empty background reference".to_string()));
    }
    replace_background(&state, Some(url.to_string()))?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn clear_background(State(state): State<Arc<AppState>>) -> Result<StatusCode> {
    replace_background(&state, None)?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn media(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response> {
    let object = state.media.get(&id)?;
    Ok(([(header::CONTENT_TYPE, object.content_type)], object.bytes).into_response())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OpenViewBody {
    artwork_id: String,
}

pub(crate) async fn open_view(
    State(state): State<Arc<AppState>>,
    Json(body): Json<OpenViewBody>,
) -> Result<(StatusCode, Json<ViewSnapshot>)> {
    let artwork = state.artwork(&body.artwork_id)?;
    let id = state.views.open(&artwork)?;
    Ok((StatusCode::CREATED, Json(state.views.snapshot(&id)?)))
}

pub(crate) async fn get_view(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ViewSnapshot>> {
    Ok(Json(state.views.snapshot(&id)?))
}

pub(crate) async fn close_view(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.views.close(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
pub(crate) struct DescriptionResponse {
    description: String,
}

pub(crate) async fn describe(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DescriptionResponse>> {
    let artwork = state.view_artwork(&id)?;
    let description = state.views.describe(&id, &artwork).await?;
    Ok(Json(DescriptionResponse { description }))
}

#[derive(Deserialize)]
pub(crate) struct ChatBody {
    message: String,
}

pub(crate) async fn chat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<ChatBody>,
) -> Result<Json<ChatMessage>> {
    let artwork = state.view_artwork(&id)?;
    Ok(Json(state.views.chat(&id, &body.message, &artwork).await?))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::assist::testing::ScriptedGenerator;
    use crate::assist::DESCRIPTION_UNAVAILABLE;
    use crate::config::AppConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};

    fn upload_request(parts: &[(&str, Option<(&str, &str)>, &[u8])]) -> Request<Body> {
        let boundary = "lunaboundary";
        Request::post("/api/artworks/upload")
            .header("content-type", format!("multipart/form-data; boundary={}", boundary))
            .body(Body::from(multipart(boundary, parts)))
            .unwrap()
    }

    fn titles(value: &Value) -> Vec<String> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["title"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_filtering_over_http() {
        let state = state_with(ScriptedGenerator::with_replies(vec![]));

        let (status, body) = send_json(&state, "GET", "/api/artworks?category=LITERATURE&q=garden", Value::Null).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(titles(&body), vec!["The Garden of Forking Paths"]);

        let (_, body) = send_json(&state, "GET", "/api/artworks?q=xyzzy", Value::Null).await;
        assert!(body.as_array().unwrap().is_empty());

        let (_, body) = send_json(&state, "GET", "/api/artworks", Value::Null).await;
        assert_eq!(body.as_array().unwrap().len(), 10);

        let (status, _) = send_json(&state, "GET", "/api/artworks?category=SCULPTURE", Value::Null).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_artwork() {
        let state = state_with(ScriptedGenerator::with_replies(vec![]));
        let (_, mut art) = send_json(&state, "GET", "/api/artworks/p-2", Value::Null).await;
        art["title"] = json!("Evening Haze");

        let (status, _) = send_json(&state, "PUT", "/api/artworks/p-2", art.clone()).await;
        assert_eq!(status, StatusCode::OK);
        let (_, fetched) = send_json(&state, "GET", "/api/artworks/p-2", Value::Null).await;
        assert_eq!(fetched["title"], "Evening Haze");

        art["id"] = json!("missing");
        let (status, _) = send_json(&state, "PUT", "/api/artworks/missing", art.clone()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send_json(&state, "PUT", "/api/artworks/p-1", art).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_labels_and_theme() {
        let state = state_with(ScriptedGenerator::with_replies(vec![]));

        let (status, labels) =
            send_json(&state, "PUT", "/api/categories/clay/label", json!({ "label": "Stone Clay" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(labels["CLAY"], "Stone Clay");
        assert_eq!(labels["ALL"], "Overview");

        let (_, theme) = send_json(&state, "GET", "/api/theme?category=PAINTING", Value::Null).await;
        assert_eq!(theme["background"], "https://picsum.photos/seed/artstudio/1920/1080");
        assert_eq!(theme["custom"], false);

        let (status, _) =
            send_json(&state, "POST", "/api/theme/background", json!({ "url": "custom.png" })).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, theme) = send_json(&state, "GET", "/api/theme?category=PAINTING", Value::Null).await;
        assert_eq!(theme["background"], "custom.png");

        send_json(&state, "DELETE", "/api/theme/background", Value::Null).await;
        let (_, theme) = send_json(&state, "GET", "/api/theme", Value::Null).await;
        assert_eq!(theme["background"], "https://picsum.photos/seed/mistyforest/1920/1080");
    }

    #[tokio::test]
    async fn test_batch_upload_prepends_and_serves_media() {
        let state = state_with(ScriptedGenerator::with_replies(vec![]));
        let boundary = "lunaboundary";
        let body = multipart(
            boundary,
            &[
                ("category", None, &b"PHOTOGRAPHY"[..]),
                ("year", None, &b"2025"[..]),
                ("description", None, &b"Night walks."[..]),
                ("files", Some(("harbour.jpg", "image/jpeg")), &b"jpegbytes"[..]),
                ("files", Some(("tram.png", "image/png")), &b"pngbytes"[..]),
            ],
        );
        let request = Request::post("/api/artworks/upload")
            .header("content-type", format!("multipart/form-data; boundary={}", boundary))
            .body(Body::from(body))
            .unwrap();

        let (status, bytes) = send(&state, request).await;
        assert_eq!(status, StatusCode::CREATED);
        let created: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(titles(&created), vec!["harbour", "tram"]);

        let (_, listed) = send_json(&state, "GET", "/api/artworks?category=PHOTOGRAPHY", Value::Null).await;
        assert_eq!(titles(&listed)[..2], ["harbour".to_string(), "tram".to_string()]);

        let image_url = created[0]["imageUrl"].as_str().unwrap().to_string();
        let (status, served) = get(&state, &image_url).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(served, b"jpegbytes");
    }

    #[tokio::test]
    async fn test_upload_without_files_rejected() {
        let state = state_with(ScriptedGenerator::with_replies(vec![]));
        let boundary = "lunaboundary";
        let body = multipart(boundary, &[("category", None, &b"CLAY"[..])]);
        let request = Request::post("/api/artworks/upload")
            .header("content-type", format!("multipart/form-data; boundary={}", boundary))
            .body(Body::from(body))
            .unwrap();

        let (status, _) = send(&state, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(state.gallery().unwrap().catalog().len(), 10);
        assert!(state.media.is_empty());
    }

    #[tokio::test]
    async fn test_view_lifecycle() {
        let state = state_with(ScriptedGenerator::with_replies(vec![
            Ok("It was carved in 2021.".to_string()),
        ]));

        let (status, view) = send_json(&state, "POST", "/api/views", json!({ "artworkId": "w-1" })).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = view["id"].as_str().unwrap().to_string();

        let (status, reply) =
            send_json(&state, "POST", &format!("/api/views/{}/chat", id), json!({ "message": "When?" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(reply, json!({ "role": "model", "text": "It was carved in 2021." }));

        let (status, _) =
            send_json(&state, "POST", &format!("/api/views/{}/chat", id), json!({ "message": " " })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // script is exhausted, so the provider now fails
        let (status, described) =
            send_json(&state, "POST", &format!("/api/views/{}/describe", id), Value::Null).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(described["description"], DESCRIPTION_UNAVAILABLE);

        let (_, snapshot) = send_json(&state, "GET", &format!("/api/views/{}", id), Value::Null).await;
        // greeting plus one exchange
        assert_eq!(snapshot["transcript"].as_array().unwrap().len(), 3);
        assert_eq!(snapshot["artworkId"], "w-1");

        let (status, _) = send_json(&state, "DELETE", &format!("/api/views/{}", id), Value::Null).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send_json(&state, "GET", &format!("/api/views/{}", id), Value::Null).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_size_limit_applies_per_file() {
        let mut config = AppConfig::default();
        config.web.max_upload_bytes = 1000;
        let state = state_with_config(config, ScriptedGenerator::with_replies(vec![]));

        let small = vec![7u8; 600];
        let (status, _) = send(
            &state,
            upload_request(&[
                ("category", None, &b"CLAY"[..]),
                ("files", Some(("bowl.png", "image/png")), &small[..]),
                ("files", Some(("jar.png", "image/png")), &small[..]),
            ]),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(state.gallery().unwrap().catalog().len(), 12);

        let big = vec![7u8; 1200];
        let (status, body) = send(
            &state,
            upload_request(&[
                ("category", None, &b"CLAY"[..]),
                ("files", Some(("vase.png", "image/png")), &big[..]),
            ]),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        let error: Value = serde_json::from_slice(&body).unwrap();
        assert!(error["error"].as_str().unwrap().contains("vase.png"));
        assert_eq!(state.gallery().unwrap().catalog().len(), 12);
    }

    #[tokio::test]
    async fn test_rejected_batch_discards_stored_media() {
        let state = state_with(ScriptedGenerator::with_replies(vec![]));
        let (status, _) = send(
            &state,
            upload_request(&[
                ("category", None, &b"ALL"[..]),
                ("files", Some(("stray.png", "image/png")), &b"png"[..]),
            ]),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(state.media.is_empty());
        assert_eq!(state.gallery().unwrap().catalog().len(), 10);
    }

    #[tokio::test]
    async fn test_request_over_batch_limit_is_too_large() {
        let mut config = AppConfig::default();
        config.web.max_upload_bytes = 1000;
        config.web.max_batch_bytes = 1500;
        let state = state_with_config(config, ScriptedGenerator::with_replies(vec![]));

        let file = vec![7u8; 900];
        let (status, _) = send(
            &state,
            upload_request(&[
                ("category", None, &b"CLAY"[..]),
                ("files", Some(("bowl.png", "image/png")), &file[..]),
                ("files", Some(("jar.png", "image/png")), &file[..]),
            ]),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(state.gallery().unwrap().catalog().len(), 10);
        assert!(state.media.is_empty());
    }

    #[tokio::test]
    async fn test_stats() {
        let state = state_with(ScriptedGenerator::with_replies(vec![]));
        let (_, stats) = send_json(&state, "GET", "/api/stats", Value::Null).await;
        assert_eq!(stats["total_artworks"], 10);
        assert_eq!(stats["open_views"], 0);
    }
}
