//! Plain-text rendering of quizzes and settings.
//!
//! `logic` is printed verbatim; markdown and LaTeX are left for the reader's
//! terminal or a downstream renderer.

use std::fmt::Write as _;

use mathgenie_core::{ConnectionConfig, Difficulty, QuizItem, TOPICS};
use mathgenie_llm::ProviderShape;

/// Render a quiz. Answers and solutions are shown only when `reveal` is set.
pub fn format_quiz(items: &[QuizItem], reveal: bool) -> String {
    let mut out = String::new();

    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "Q{}. {}", index + 1, item.question.trim());

        if reveal {
            let _ = writeln!(out);
            let _ = writeln!(out, "   Final Answer");
            let _ = writeln!(out, "   {}", item.answer.trim());
            let _ = writeln!(out);
            let _ = writeln!(out, "   Step-by-Step Logic");
            for line in item.logic.trim().lines() {
                let _ = writeln!(out, "   {line}");
            }
        }
    }

    if !reveal && !items.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "(run again with --reveal to show answers and solutions)");
    }
    out
}

/// Render saved settings with the API key masked.
pub fn format_settings(config: &ConnectionConfig) -> String {
    let shape = ProviderShape::classify(&config.base_url);
    format!(
        "Base URL : {}\nModel    : {}\nAPI key  : {}\nProvider : {}\n",
        config.base_url,
        config.model_name,
        config.masked_api_key(),
        shape,
    )
}

/// Render the topic catalogue and the difficulty levels.
pub fn format_catalogue() -> String {
    let mut out = String::from("Topics:\n");
    for topic in TOPICS {
        let _ = writeln!(out, "  {:<14} {}", topic.id, topic.label);
    }
    out.push_str("\nDifficulties:\n");
    for difficulty in Difficulty::all() {
        let _ = writeln!(out, "  {:<14} {}", difficulty.as_str(), difficulty.label());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mathgenie_core::QuizItemId;

    fn items() -> Vec<QuizItem> {
        vec![
            QuizItem {
                id: QuizItemId::Number(1),
                question: "What is 15% of 200?".into(),
                answer: "30".into(),
                logic: "Step 1: $0.15 \\times 200$\nStep 2: $= 30$".into(),
            },
            QuizItem {
                id: QuizItemId::Text("b".into()),
                question: "HCF of 12 and 18?".into(),
                answer: "6".into(),
                logic: "Common factors: 1, 2, 3, 6.".into(),
            },
        ]
    }

    #[test]
    fn hidden_solutions_by_default() {
        let text = format_quiz(&items(), false);
        assert!(text.starts_with("Q1. What is 15% of 200?\n"));
        assert!(text.contains("Q2. HCF of 12 and 18?"));
        assert!(!text.contains("Final Answer"));
        assert!(text.contains("--reveal"));
    }

    #[test]
    fn reveal_shows_answer_and_logic() {
        let text = format_quiz(&items(), true);
        assert!(text.contains("   Final Answer\n   30\n"));
        assert!(text.contains("   Step-by-Step Logic\n   Step 1: $0.15 \\times 200$\n   Step 2: $= 30$\n"));
        assert!(!text.contains("--reveal"));
    }

    #[test]
    fn settings_mask_key() {
        let config = ConnectionConfig::new("https://api.openai.com/v1", "sk-abcdefgh1234", "gpt-4o");
        let text = format_settings(&config);
        assert!(text.contains("gpt-4o"));
        assert!(text.contains("1234"));
        assert!(!text.contains("sk-abcdefgh1234"));
        assert!(text.contains("openai_compatible"));
    }

    #[test]
    fn catalogue_lists_everything() {
        let text = format_catalogue();
        for topic in TOPICS {
            assert!(text.contains(topic.id));
        }
        assert!(text.contains("olympiad"));
    }
}
