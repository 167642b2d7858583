// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! HTML form handlers; each one redirects back to a page

use axum::{
    extract::{Multipart, Path, State},
    response::Redirect,
    Form,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::{ingest_background, ingest_upload, replace_background, AppState};
use crate::catalog::Category;
use crate::Result;

fn detail_url(artwork_id: &str, view_id: Option<&str>) -> String {
    match view_id {
        Some(view) => format!("/artworks/{}?view={}", artwork_id, view),
        None => format!("/artworks/{}", artwork_id),
    }
}

#[derive(Deserialize)]
pub(crate) struct EditForm {
    title: String,
    year: String,
    dimensions: String,
    materials: String,
    short_description: String,
    #[serde(default)]
    full_description: String,
    #[serde(default)]
    view: Option<String>,
}

pub(crate) async fn edit_artwork(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(form): Form<EditForm>,
) -> Result<Redirect> {
    let mut artwork = state.artwork(&id)?;
    artwork.title = form.title;
    artwork.year = form.year;
    artwork.dimensions = form.dimensions;
    artwork.materials = form.materials;
    artwork.short_description = form.short_description;
    artwork.full_description = Some(form.full_description)
        .filter(|text| !text.trim().is_empty());

    state.gallery_mut()?.update(artwork)?;
    let view = form.view.filter(|v| !v.is_empty());
    Ok(Redirect::to(&detail_url(&id, view.as_deref())))
}

pub(crate) async fn open_view(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let artwork = state.artwork(&id)?;
    let view = state.views.open(&artwork)?;
    Ok(Redirect::to(&detail_url(&id, Some(&view))))
}

pub(crate) async fn describe(
    State(state): State<Arc<AppState>>,
    Path(view): Path<String>,
) -> Result<Redirect> {
    let artwork = state.view_artwork(&view)?;
    state.views.describe(&view, &artwork).await?;
    Ok(Redirect::to(&detail_url(&artwork.id, Some(&view))))
}

#[derive(Deserialize)]
pub(crate) struct ChatForm {
    message: String,
}

pub(crate) async fn chat(
    State(state): State<Arc<AppState>>,
    Path(view): Path<String>,
    Form(form): Form<ChatForm>,
) -> Result<Redirect> {
    let artwork = state.view_artwork(&view)?;
    // blank sends just return to the page
    if !form.message.trim().is_empty() {
        state.views.chat(&view, &form.message, &artwork).await?;
    }
    Ok(Redirect::to(&detail_url(&artwork.id, Some(&view))))
}

pub(crate) async fn close_view(
    State(state): State<Arc<AppState>>,
    Path(view): Path<String>,
) -> Result<Redirect> {
    state.views.close(&view)?;
    Ok(Redirect::to("/"))
}

pub(crate) async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Redirect> {
    let items = ingest_upload(&state, multipart).await?;
    let category = items.first().map(|a| a.category).unwrap_or(Category::All);
    Ok(Redirect::to(&format!("/?category={}", category)))
}

pub(crate) async fn labels(
    State(state): State<Arc<AppState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Redirect> {
    let mut gallery = state.gallery_mut()?;
    for (key, label) in form {
        match key.parse::<Category>() {
            Ok(category) => gallery.set_label(category, label),
            Err(_) => debug!("Ignoring unknown label field {}", key),
        }
    }
    Ok(Redirect::to("/admin"))
}

pub(crate) async fn background(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Redirect> {
    ingest_background(&state, multipart).await?;
    Ok(Redirect::to("/"))
}

pub(crate) async fn reset_background(State(state): State<Arc<AppState>>) -> Result<Redirect> {
    replace_background(&state, None)?;
    Ok(Redirect::to("/"))
}
