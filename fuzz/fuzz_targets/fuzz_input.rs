// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use luna::assist::prompt::{chat_prompt, serialize_transcript};
use luna::assist::ChatMessage;
use luna::catalog::{filter::filter, seed, Category};
use luna::theme::resolve_background;
use luna::upload::title_from_file_name;

#[derive(Arbitrary, Debug)]
struct Input {
    category: String,
    search: String,
    file_name: String,
    turns: Vec<(bool, String)>,
    background: Option<String>,
}

fuzz_target!(|input: Input| {
    let active = input.category.parse::<Category>().unwrap_or(Category::All);
    let artworks = seed::artworks();

    // callers trim the term before filtering
    let term = input.search.trim();
    let visible = filter(artworks.iter(), active, term);
    assert!(visible.len() <= artworks.len());
    if term.is_empty() && active == Category::All {
        assert_eq!(visible.len(), artworks.len());
    }
    assert!(filter(artworks.iter(), active, &input.search).len() <= artworks.len());

    let background = resolve_background(active, input.background.as_deref());
    assert!(!background.is_empty() || input.background.as_deref() == Some(""));

    let _ = title_from_file_name(&input.file_name);

    let history: Vec<ChatMessage> = input
        .turns
        .into_iter()
        .map(|(user, text)| if user { ChatMessage::user(text) } else { ChatMessage::model(text) })
        .collect();
    let transcript = serialize_transcript(&history);
    assert!(chat_prompt(&history, &input.search).contains(&transcript));
});
