// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Server-rendered pages

use axum::{
    extract::{Path, Query, State},
    response::Html,
};
use minijinja::{context, Environment};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use super::{parse_category, AppState};
use crate::catalog::Category;
use crate::Result;

/// Compiled page templates
pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template("base.html", include_str!("templates/base.html"))?;
        env.add_template("gallery.html", include_str!("templates/gallery.html"))?;
        env.add_template("detail.html", include_str!("templates/detail.html"))?;
        env.add_template("admin.html", include_str!("templates/admin.html"))?;
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String> {
        Ok(self.env.get_template(name)?.render(ctx)?)
    }
}

#[derive(Serialize)]
struct NavItem {
    key: Category,
    label: String,
    active: bool,
}

fn nav(state: &AppState, active: Category) -> Result<Vec<NavItem>> {
    let gallery = state.gallery()?;
    Ok(Category::VARIANTS
        .into_iter()
        .map(|c| NavItem {
            key: c,
            label: gallery.catalog().label(c).to_string(),
            active: c == active,
        })
        .collect())
}

#[derive(Deserialize)]
pub(crate) struct GalleryQuery {
    category: Option<String>,
    q: Option<String>,
}

pub(crate) async fn gallery_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GalleryQuery>,
) -> Result<Html<String>> {
    let active = parse_category(query.category.as_deref())?;
    let term = query.q.as_deref().unwrap_or_default().trim().to_string();

    let nav = nav(&state, active)?;
    let gallery = state.gallery()?;
    let html = state.pages.render(
        "gallery.html",
        context! {
            nav,
            active,
            heading => gallery.catalog().label(active),
            labels => gallery.catalog().labels(),
            artworks => gallery.visible(active, &term),
            term,
            background => gallery.background(active),
            custom_background => gallery.custom_background().is_some(),
        },
    )?;
    Ok(Html(html))
}

#[derive(Deserialize)]
pub(crate) struct DetailQuery {
    view: Option<String>,
}

pub(crate) async fn detail_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<DetailQuery>,
) -> Result<Html<String>> {
    let artwork = state.artwork(&id)?;
    // stale or foreign view ids just render without a conversation
    let view = query
        .view
        .and_then(|v| state.views.snapshot(&v).ok())
        .filter(|v| v.artwork_id == artwork.id);

    let description = view
        .as_ref()
        .and_then(|v| v.description.clone())
        .or_else(|| artwork.full_description.clone());

    let nav = nav(&state, artwork.category)?;
    let gallery = state.gallery()?;
    let html = state.pages.render(
        "detail.html",
        context! {
            nav,
            active => artwork.category,
            label => gallery.catalog().label(artwork.category),
            is_literature => artwork.category == Category::Literature,
            background => gallery.background(artwork.category),
            custom_background => gallery.custom_background().is_some(),
            artwork,
            description,
            view,
        },
    )?;
    Ok(Html(html))
}

pub(crate) async fn admin_page(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    let nav = nav(&state, Category::All)?;
    let gallery = state.gallery()?;
    let editable: Vec<NavItem> = Category::concrete()
        .map(|c| NavItem {
            key: c,
            label: gallery.catalog().label(c).to_string(),
            active: false,
        })
        .collect();

    let html = state.pages.render(
        "admin.html",
        context! {
            nav,
            active => Category::All,
            categories => editable,
            counts => gallery.catalog().count_by_category().into_iter().collect::<BTreeMap<_, _>>(),
            year => chrono::Local::now().format("%Y").to_string(),
            background => gallery.background(Category::All),
            custom_background => gallery.custom_background().is_some(),
            max_upload_mb => state.config.web.max_upload_bytes / (1024 * 1024),
        },
    )?;
    Ok(Html(html))
}
