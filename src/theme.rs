// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Background themes per category

use crate::catalog::Category;

const THEMES: &[(Category, &str)] = &[
    (Category::All, "https://picsum.photos/seed/mistyforest/1920/1080"),
    (Category::Painting, "https://picsum.photos/seed/artstudio/1920/1080"),
    (Category::WoodCarving, "https://picsum.photos/seed/woodwork/1920/1080"),
    (Category::Clay, "https://picsum.photos/seed/pottery/1920/1080"),
    (Category::Leather, "https://picsum.photos/seed/leatherbg/1920/1080"),
    (Category::Photography, "https://picsum.photos/seed/darkroom/1920/1080"),
    (Category::Literature, "https://picsum.photos/seed/library/1920/1080"),
];

/// Static theme image for a category, if one is bound
pub fn theme_for(category: Category) -> Option<&'static str> {
    THEMES.iter().find(|(c, _)| *c == category).map(|(_, url)| *url)
}

const FALLBACK: &str = "https://picsum.photos/seed/mistyforest/1920/1080";

/// Background for the active category. A custom background always wins.
pub fn resolve_background(active: Category, custom: Option<&str>) -> String {
    if let Some(custom) = custom {
        return custom.to_string();
    }
    theme_for(active)
        .or_else(|| theme_for(Category::All))
        .unwrap_or(FALLBACK)
        .to_string()
}
