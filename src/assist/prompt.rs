// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Prompt construction for the curator

use super::{ChatMessage, Role};
use crate::catalog::Artwork;
use crate::config::PromptConfig;

/// One-shot request for a museum-style description of `artwork`
pub fn description_prompt(artwork: &Artwork, prompts: &PromptConfig) -> String {
    format!(
        "Act as a world-renowned art curator for a high-end museum.\n\
         Write a sophisticated, {words}-word description for an artwork with the following details:\n\
         Title: \"{title}\"\n\
         Category: \"{category}\"\n\
         Materials: \"{materials}\"\n\
         Year: \"{year}\"\n\
         Initial thought: \"{short}\"\n\n\
         The tone should be academic yet accessible, poetic, and evocative.\n\
         Focus on the texture, the potential meaning, and the craftsmanship.\n\
         Do not use markdown formatting. Just plain text.",
        words = prompts.description_words,
        title = artwork.title,
        category = artwork.category,
        materials = artwork.materials,
        year = artwork.year,
        short = artwork.short_description,
    )
}

/// Opening line of every conversation, kept in the transcript
pub fn greeting(artwork: &Artwork) -> String {
    format!(
        "Greetings. I am the digital curator. Feel free to ask me anything about \"{}\".",
        artwork.title
    )
}

/// Standing instructions for a chat about one artwork
pub fn chat_system_instruction(artwork: &Artwork, prompts: &PromptConfig) -> String {
    format!(
        "You are the Head Curator of the {museum}. You are knowledgeable, polite, and passionate about art.\n\
         You are currently discussing the artwork titled \"{title}\" created in {year}.\n\
         Category: {category}.\n\
         Materials: {materials}.\n\n\
         Answer the visitor's question about this specific piece.\n\
         If the question is unrelated to the art, politely steer the conversation back to the beauty of this piece.\n\
         Keep answers concise (under {words} words) to fit the chat interface.",
        museum = prompts.museum_name,
        title = artwork.title,
        year = artwork.year,
        category = artwork.category,
        materials = artwork.materials,
        words = prompts.chat_words,
    )
}

fn speaker(role: Role) -> &'static str {
    match role {
        Role::User => "Visitor",
        Role::Model => "Curator",
    }
}

/// `Visitor: ...` / `Curator: ...` lines, oldest first
pub fn serialize_transcript(history: &[ChatMessage]) -> String {
    history
        .iter()
        .map(|m| format!("{}: {}", speaker(m.role), m.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full conversation context sent on every turn; the provider keeps no session
pub fn chat_prompt(history: &[ChatMessage], message: &str) -> String {
    let mut prompt = String::from("Conversation History:\n");
    let transcript = serialize_transcript(history);
    if !transcript.is_empty() {
        prompt.push_str(&transcript);
        prompt.push('\n');
    }
    prompt.push_str(&format!("\nVisitor: {}\nCurator:", message));
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{sample, Category};

    #[test]
    fn test_greeting_names_the_piece() {
        let art = sample("w-2", "Forest Spirit", Category::WoodCarving, "Oak");
        assert_eq!(
            greeting(&art),
            "Greetings. I am the digital curator. Feel free to ask me anything about \"Forest Spirit\"."
        );
    }

    #[test]
    fn test_serialize_transcript() {
        let history = vec![
            ChatMessage::user("Who made this?"),
            ChatMessage::model("A local artisan."),
            ChatMessage::user("When?"),
        ];
        assert_eq!(
            serialize_transcript(&history),
            "Visitor: Who made this?\nCurator: A local artisan.\nVisitor: When?"
        );
        assert_eq!(serialize_transcript(&[]), "");
    }

    #[test]
    fn test_chat_prompt_ends_with_curator_cue() {
        let history = vec![ChatMessage::user("Hi"), ChatMessage::model("Welcome.")];
        let prompt = chat_prompt(&history, "Is it oil?");
        assert!(prompt.starts_with("Conversation History:\nVisitor: Hi\nCurator: Welcome.\n"));
        assert!(prompt.ends_with("Visitor: Is it oil?\nCurator:"));

        let first = chat_prompt(&[], "Hello");
        assert_eq!(first, "Conversation History:\n\nVisitor: Hello\nCurator:");
    }

    #[test]
    fn test_description_prompt_embeds_details() {
        let art = sample("p-9", "Blue Hour", Category::Painting, "Oil on Linen");
        let prompt = description_prompt(&art, &PromptConfig::default());
        assert!(prompt.contains("Title: \"Blue Hour\""));
        assert!(prompt.contains("Category: \"PAINTING\""));
        assert!(prompt.contains("Materials: \"Oil on Linen\""));
        assert!(prompt.contains("Year: \"2024\""));
        assert!(prompt.contains("Initial thought: \"A sample piece.\""));
        assert!(prompt.contains("100-word"));
        assert!(prompt.contains("Do not use markdown"));
    }

    #[test]
    fn test_system_instruction_scopes_to_artwork() {
        let art = sample("w-9", "Oak Spiral", Category::WoodCarving, "Oak");
        let prompts = PromptConfig {
            chat_words: 50,
            ..PromptConfig::default()
        };
        let text = chat_system_instruction(&art, &prompts);
        assert!(text.contains("\"Oak Spiral\" created in 2024"));
        assert!(text.contains("Category: WOOD_CARVING."));
        assert!(text.contains("under 50 words"));
    }
}
