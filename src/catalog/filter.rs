// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Category and free-text filtering over the catalog

use super::{Artwork, Category};

/// Visible subset of `artworks` for the active category and search term.
///
/// Matching is a case-insensitive substring test against title or materials.
/// Catalog order is preserved.
pub fn filter<'a, I>(artworks: I, active: Category, search_term: &str) -> Vec<&'a Artwork>
where
    I: IntoIterator<Item = &'a Artwork>,
{
    let needle = search_term.to_lowercase();
    artworks
        .into_iter()
        .filter(|art| matches_category(art, active) && matches_term(art, &needle))
        .collect()
}

fn matches_category(art: &Artwork, active: Category) -> bool {
    active == Category::All || art.category == active
}

// `needle` is already lowercased
fn matches_term(art: &Artwork, needle: &str) -> bool {
    needle.is_empty()
        || art.title.to_lowercase().contains(needle)
        || art.materials.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{sample, Catalog};

    fn titles<'a>(found: &[&'a Artwork]) -> Vec<&'a str> {
        found.iter().map(|a| a.title.as_str()).collect()
    }

    #[test]
    fn test_all_with_empty_term_returns_everything_in_order() {
        let catalog = Catalog::seeded();
        let found = filter(catalog.iter(), Category::All, "");
        assert_eq!(found.len(), catalog.len());
        for (found, expected) in found.iter().zip(catalog.iter()) {
            assert_eq!(found.id, expected.id);
        }
    }

    #[test]
    fn test_category_restricts_results() {
        let catalog = Catalog::seeded();
        for category in Category::concrete() {
            for term in ["", "o", "paper"] {
                assert!(filter(catalog.iter(), category, term)
                    .iter()
                    .all(|a| a.category == category));
            }
        }
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = Catalog::seeded();
        let upper = filter(catalog.iter(), Category::All, "OIL");
        let lower = filter(catalog.iter(), Category::All, "oil");
        assert!(!upper.is_empty());
        assert_eq!(titles(&upper), titles(&lower));
    }

    #[test]
    fn test_matches_title_or_materials() {
        let catalog = Catalog::new(vec![
            sample("a", "Walnut Dreams", Category::WoodCarving, "Pine"),
            sample("b", "Untitled", Category::WoodCarving, "Walnut Wood"),
            sample("c", "Other", Category::WoodCarving, "Oak"),
        ]);
        let found = filter(catalog.iter(), Category::WoodCarving, "walnut");
        assert_eq!(titles(&found), vec!["Walnut Dreams", "Untitled"]);
    }

    #[test]
    fn test_literature_garden_scenario() {
        let catalog = Catalog::seeded();
        let literature = filter(catalog.iter(), Category::Literature, "");
        assert_eq!(literature.len(), 2);

        let garden = filter(catalog.iter(), Category::Literature, "garden");
        assert_eq!(titles(&garden), vec!["The Garden of Forking Paths"]);

        assert!(filter(catalog.iter(), Category::All, "xyzzy").is_empty());
    }

    #[test]
    fn test_term_is_not_trimmed() {
        let catalog = Catalog::new(vec![sample("a", "Neon Rain", Category::Photography, "Print")]);
        assert_eq!(filter(catalog.iter(), Category::All, "neon rain").len(), 1);
        assert!(filter(catalog.iter(), Category::All, " neon  rain").is_empty());
    }
}
