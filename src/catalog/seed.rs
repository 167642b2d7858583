// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Built-in collection loaded at startup

use super::{Artwork, Category};

const FRAGMENTS_OF_YESTERDAY: &str = "\
The rain had stopped by the time I reached the old house. It stood there, a silent sentinel against the encroaching gray sky, its windows like eyes shut tight against the world. I remember the smell of wet earth and decaying leaves, a scent that always reminds me of endings.

Inside, the dust motes danced in the shafts of light that managed to pierce through the gloom. Every object was a memory, frozen in time. The clock on the mantelpiece had stopped at 3:14, marking a moment that no one remembered but the house itself.

I walked through the rooms, my footsteps echoing on the wooden floorboards. It was here that we had laughed, cried, and lived a lifetime in what felt like a blink of an eye. Now, only the silence remained, heavy and suffocating.

But as I stood by the window, looking out at the overgrown garden, I realized that memories are not ghosts. They are fragments of yesterday that we carry with us, pieces of a puzzle that never quite fits together, but creates a picture nonetheless.";

const FORKING_PATHS: &str = "\
In the garden where the paths diverge,
I found a rose that whispered of the sea.
Its petals, soft as foam, sharp as a dirge,
Spoke of a time when you were here with me.

The stones beneath my feet are cold and gray,
Yet in their cracks, the moss begins to bloom.
Life finds a way, or so the people say,
Even within the shadow of the tomb.

I walk the path that leads to nowhere specific,
Lost in the maze of my own design.
The air is thick, the silence is prolific,
And in this solitude, I find what is mine.";

struct Seed {
    id: &'static str,
    title: &'static str,
    category: Category,
    year: &'static str,
    dimensions: &'static str,
    materials: &'static str,
    image_seed: &'static str,
    size: (u32, u32),
    short_description: &'static str,
    full_description: Option<&'static str>,
}

const SEEDS: &[Seed] = &[
    Seed {
        id: "p-1",
        title: "Echoes of Silence",
        category: Category::Painting,
        year: "2023",
        dimensions: "120 x 80 cm",
        materials: "Oil on Canvas",
        image_seed: "paint1",
        size: (800, 1200),
        short_description: "An abstract exploration of solitude using deep blues and frantic strokes.",
        full_description: None,
    },
    Seed {
        id: "p-2",
        title: "Morning Haze",
        category: Category::Painting,
        year: "2022",
        dimensions: "60 x 60 cm",
        materials: "Acrylic on Panel",
        image_seed: "paint2",
        size: (800, 800),
        short_description: "A gentle landscape capturing the first light of dawn over the valley.",
        full_description: None,
    },
    Seed {
        id: "w-1",
        title: "Ancestral Guardian",
        category: Category::WoodCarving,
        year: "2021",
        dimensions: "40 x 15 x 15 cm",
        materials: "Walnut Wood",
        image_seed: "wood1",
        size: (600, 800),
        short_description: "A totem-inspired figure carved from a single block of walnut, finished with beeswax.",
        full_description: None,
    },
    Seed {
        id: "w-2",
        title: "Fluidity in Oak",
        category: Category::WoodCarving,
        year: "2023",
        dimensions: "30 x 50 x 20 cm",
        materials: "Oak",
        image_seed: "wood2",
        size: (900, 600),
        short_description: "Abstract curvature demonstrating the pliability of perception through rigid oak.",
        full_description: None,
    },
    Seed {
        id: "c-1",
        title: "The Silent Reader",
        category: Category::Clay,
        year: "2023",
        dimensions: "20 x 15 x 10 cm",
        materials: "Stone Plastic Clay, Acrylic",
        image_seed: "clay1",
        size: (700, 700),
        short_description: "A whimsical character reading a tiny book, textured to resemble rough stone.",
        full_description: None,
    },
    Seed {
        id: "l-1",
        title: "The Nomad Satchel",
        category: Category::Leather,
        year: "2022",
        dimensions: "35 x 28 x 10 cm",
        materials: "Vegetable Tanned Leather, Brass",
        image_seed: "leather1",
        size: (800, 800),
        short_description: "Hand-stitched satchel designed for durability, featuring a unique patina.",
        full_description: None,
    },
    Seed {
        id: "ph-1",
        title: "Neon Rain",
        category: Category::Photography,
        year: "2024",
        dimensions: "80 x 120 cm",
        materials: "Digital C-Print",
        image_seed: "photo1",
        size: (1200, 800),
        short_description: "Cyberpunk aesthetics capturing a rainy night in Tokyo, illuminated by neon signage.",
        full_description: None,
    },
    Seed {
        id: "ph-2",
        title: "Ephemeral Solitude",
        category: Category::Photography,
        year: "2023",
        dimensions: "50 x 75 cm",
        materials: "Black & White 35mm Film",
        image_seed: "photo2",
        size: (900, 600),
        short_description: "High-contrast monochrome composition of a lone figure crossing a brutalist bridge.",
        full_description: None,
    },
    Seed {
        id: "lit-1",
        title: "Fragments of Yesterday",
        category: Category::Literature,
        year: "2024",
        dimensions: "150 pages",
        materials: "Digital Manuscript",
        image_seed: "book1",
        size: (800, 1000),
        short_description: "A collection of short stories exploring memory, loss, and the passage of time.",
        full_description: Some(FRAGMENTS_OF_YESTERDAY),
    },
    Seed {
        id: "lit-2",
        title: "The Garden of Forking Paths",
        category: Category::Literature,
        year: "2023",
        dimensions: "A5 Zine",
        materials: "Hand-bound Paper",
        image_seed: "book2",
        size: (800, 800),
        short_description: "Experimental poetry woven together with sketches of local flora.",
        full_description: Some(FORKING_PATHS),
    },
];

/// The collection as shipped
pub fn artworks() -> Vec<Artwork> {
    SEEDS
        .iter()
        .map(|s| Artwork {
            id: s.id.to_string(),
            title: s.title.to_string(),
            category: s.category,
            year: s.year.to_string(),
            dimensions: s.dimensions.to_string(),
            materials: s.materials.to_string(),
            image_url: format!("https://picsum.photos/seed/{}/{}/{}", s.image_seed, s.size.0, s.size.1),
            short_description: s.short_description.to_string(),
            full_description: s.full_description.map(str::to_string),
        })
        .collect()
}
