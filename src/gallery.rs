// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Session-scoped application state: catalog, labels and custom background

use tracing::info;

use crate::catalog::{self, Artwork, Catalog, Category};
use crate::theme;
use crate::Result;

/// Everything the gallery remembers until the process exits
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    catalog: Catalog,
    custom_background: Option<String>,
}

impl Gallery {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            custom_background: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Add uploaded artworks at the front of the collection
    pub fn insert_batch(&mut self, items: Vec<Artwork>) -> Result<()> {
        let count = items.len();
        self.catalog.insert_batch(items)?;
        info!("Added {} artworks ({} total)", count, self.catalog.len());
        Ok(())
    }

    /// Replace an existing artwork with an edited copy
    pub fn update(&mut self, item: Artwork) -> Result<()> {
        let id = item.id.clone();
        self.catalog.update(item)?;
        info!("Updated artwork {}", id);
        Ok(())
    }

    pub fn set_label(&mut self, category: Category, label: impl Into<String>) {
        let label = label.into();
        info!("Category {} relabelled to {:?}", category, label);
        self.catalog.set_label(category, label);
    }

    /// Replace the custom background, returning the one it displaced
    pub fn set_custom_background(&mut self, reference: Option<String>) -> Option<String> {
        std::mem::replace(&mut self.custom_background, reference)
    }

    pub fn custom_background(&self) -> Option<&str> {
        self.custom_background.as_deref()
    }

    /// Owned copies of the artworks visible under the given selection
    pub fn visible(&self, active: Category, search_term: &str) -> Vec<Artwork> {
        catalog::filter(self.catalog.iter(), active, search_term)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn background(&self, active: Category) -> String {
        theme::resolve_background(active, self.custom_background())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample;

    #[test]
    fn test_background_follows_custom_override() {
        let mut gallery = Gallery::new(Catalog::seeded());
        assert!(gallery.background(Category::Leather).contains("leatherbg"));

        assert_eq!(gallery.set_custom_background(Some("/media/abc".to_string())), None);
        assert_eq!(gallery.background(Category::Leather), "/media/abc");

        assert_eq!(gallery.set_custom_background(None).as_deref(), Some("/media/abc"));
        assert!(gallery.background(Category::Clay).contains("pottery"));
    }

    #[test]
    fn test_uploads_show_up_first() {
        let mut gallery = Gallery::new(Catalog::seeded());
        gallery
            .insert_batch(vec![sample("local-1-0", "Fresh Oil", Category::Painting, "Oil")])
            .unwrap();

        let visible = gallery.visible(Category::Painting, "oil");
        assert_eq!(visible[0].id, "local-1-0");
        assert_eq!(visible.len(), 2);
    }
}
