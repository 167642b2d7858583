// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! In-memory artwork catalog and category labels

pub mod filter;
pub mod seed;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::{LunaError, Result};

pub use filter::filter;

/// Artwork categories. `All` is a filter pseudo-category and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    All,
    Painting,
    WoodCarving,
    Clay,
    Leather,
    Photography,
    Literature,
}

impl Category {
    /// Every category, `All` first
    pub const VARIANTS: [Category; 7] = [
        Category::All,
        Category::Painting,
        Category::WoodCarving,
        Category::Clay,
        Category::Leather,
        Category::Photography,
        Category::Literature,
    ];

    /// Categories an artwork can actually belong to
    pub fn concrete() -> impl Iterator<Item = Category> {
        Self::VARIANTS.into_iter().filter(|c| *c != Category::All)
    }

    /// Wire name, e.g. `WOOD_CARVING`
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::All => "ALL",
            Category::Painting => "PAINTING",
            Category::WoodCarving => "WOOD_CARVING",
            Category::Clay => "CLAY",
            Category::Leather => "LEATHER",
            Category::Photography => "PHOTOGRAPHY",
            Category::Literature => "LITERATURE",
        }
    }

    pub fn default_label(&self) -> &'static str {
        match self {
            Category::All => "Overview",
            Category::Painting => "Painting",
            Category::WoodCarving => "Wood Carving",
            Category::Clay => "Clay Sculpture",
            Category::Leather => "Leather Craft",
            Category::Photography => "Photography",
            Category::Literature => "Literature",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = LunaError;

    /// Accepts `WOOD_CARVING`, `wood-carving` and `wood carving`
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        Self::VARIANTS
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| LunaError::InvalidInput(format!("Unknown category: {}", s)))
    }
}

/// A single piece in the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    pub id: String,
    pub title: String,
    pub category: Category,
    /// Free-form, not validated as numeric
    pub year: String,
    pub dimensions: String,
    pub materials: String,
    pub image_url: String,
    pub short_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_description: Option<String>,
}

/// Display names for categories
pub type CategoryLabels = BTreeMap<Category, String>;

/// Labels as shipped with the collection
pub fn default_labels() -> CategoryLabels {
    Category::VARIANTS
        .into_iter()
        .map(|c| (c, c.default_label().to_string()))
        .collect()
}

/// Ordered artwork list, newest first, plus the label map
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    artworks: Vec<Artwork>,
    labels: CategoryLabels,
}

impl Catalog {
    /// Create a catalog from existing records
    pub fn new(artworks: Vec<Artwork>) -> Self {
        Self {
            artworks,
            labels: default_labels(),
        }
    }

    /// Catalog holding the built-in collection
    pub fn seeded() -> Self {
        Self::new(seed::artworks())
    }

    /// Prepend a batch, keeping the batch's own order.
    ///
    /// The whole batch is rejected if it is empty, contains an `All` record,
    /// or carries an id that already exists (in the catalog or the batch).
    pub fn insert_batch(&mut self, items: Vec<Artwork>) -> Result<()> {
        if items.is_empty() {
            return Err(LunaError::InvalidInput("Empty batch".to_string()));
        }

        let mut seen: HashSet<&str> = self.artworks.iter().map(|a| a.id.as_str()).collect();
        for item in &items {
            if item.category == Category::All {
                return Err(LunaError::InvalidInput(format!(
                    "Artwork {} cannot be stored under ALL",
                    item.id
                )));
            }
            if !seen.insert(item.id.as_str()) {
                return Err(LunaError::Conflict(format!("Duplicate artwork id: {}", item.id)));
            }
        }

        debug!("Inserting {} artworks", items.len());
        let mut merged = items;
        merged.append(&mut self.artworks);
        self.artworks = merged;
        Ok(())
    }

    /// Replace the record with the same id, in place
    pub fn update(&mut self, item: Artwork) -> Result<()> {
        if item.category == Category::All {
            return Err(LunaError::InvalidInput(format!(
                "Artwork {} cannot be stored under ALL",
                item.id
            )));
        }

        let slot = self
            .artworks
            .iter_mut()
            .find(|a| a.id == item.id)
            .ok_or_else(|| LunaError::NotFound(format!("Artwork {}", item.id)))?;
        *slot = item;
        Ok(())
    }

    /// Upsert a display label
    pub fn set_label(&mut self, category: Category, label: impl Into<String>) {
        self.labels.insert(category, label.into());
    }

    pub fn get(&self, id: &str) -> Option<&Artwork> {
        self.artworks.iter().find(|a| a.id == id)
    }

    pub fn artworks(&self) -> &[Artwork] {
        &self.artworks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Artwork> {
        self.artworks.iter()
    }

    pub fn len(&self) -> usize {
        self.artworks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artworks.is_empty()
    }

    pub fn labels(&self) -> &CategoryLabels {
        &self.labels
    }

    /// Display label, falling back to the built-in name
    pub fn label(&self, category: Category) -> &str {
        self.labels
            .get(&category)
            .map(String::as_str)
            .unwrap_or_else(|| category.default_label())
    }

    /// Number of stored artworks per concrete category
    pub fn count_by_category(&self) -> Vec<(Category, usize)> {
        Category::concrete()
            .map(|c| (c, self.artworks.iter().filter(|a| a.category == c).count()))
            .collect()
    }
}

#[cfg(test)]
pub(crate) fn sample(id: &str, title: &str, category: Category, materials: &str) -> Artwork {
    Artwork {
        id: id.to_string(),
        title: title.to_string(),
        category,
        year: "2024".to_string(),
        dimensions: "10 x 10 cm".to_string(),
        materials: materials.to_string(),
        image_url: format!("https://example.test/{}.jpg", id),
        short_description: "A sample piece.".to_string(),
        full_description: None,
    }
}
