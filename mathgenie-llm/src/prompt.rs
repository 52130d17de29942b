//! Prompt templates for quiz generation.
//!
//! The user prompt carries the whole output contract (JSON array shape and
//! math delimiters) so that it also works for providers without a system
//! role.

use mathgenie_core::QuizRequestParams;

/// System instruction sent to OpenAI-compatible providers.
pub const QUIZ_SYSTEM: &str = "You are a helpful math teacher. Output strictly valid JSON.";

/// User prompt asking for `{count}` problems.
pub const QUIZ_USER: &str = r"Generate {count} unique math word problems.
Topics: {topics}.
Difficulty Level: {difficulty}.

Constraint: Return the output as a STRICT JSON array (no markdown code blocks, just raw JSON).
Structure: Array of objects, each having:
- 'id': unique string or number
- 'question': string (the word problem)
- 'answer': string (the final answer key)
- 'logic': string (step-by-step solution using Markdown and LaTeX for math)

Use $...$ for inline math and $$...$$ for block math in 'logic'.";

/// Simple template interpolation for prompts.
///
/// Replaces `{key}` with the corresponding value in a single pass over the
/// template; substituted values are never scanned again. Unknown
/// placeholders are left as they are.
#[must_use]
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substitution = after.find('}').and_then(|close| {
            let key = &after[..close];
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (close, *value))
        });

        match substitution {
            Some((close, value)) => {
                result.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                result.push('{');
                rest = after;
            }
        }
    }

    result.push_str(rest);
    result
}

/// Render the user prompt for a quiz request.
#[must_use]
pub fn quiz_prompt(params: &QuizRequestParams) -> String {
    let count = params.count().to_string();
    let topics = params.topics().join(", ");
    render_template(
        QUIZ_USER,
        &[
            ("count", &count),
            ("topics", &topics),
            ("difficulty", params.difficulty().as_str()),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mathgenie_core::Difficulty;

    #[test]
    fn template_rendering_works() {
        let rendered = render_template(
            "Make {count} problems about {topics}.",
            &[("count", "3"), ("topics", "geometry")],
        );
        assert_eq!(rendered, "Make 3 problems about geometry.");
    }

    #[test]
    fn template_handles_missing_vars() {
        let rendered = render_template("Hello {name}, {unknown}.", &[("name", "Ada")]);
        assert_eq!(rendered, "Hello Ada, {unknown}.");
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let rendered = render_template(
            "{a} then {b}",
            &[("a", "{b}"), ("b", "second")],
        );
        assert_eq!(rendered, "{b} then second");
    }

    #[test]
    fn topic_text_with_braces_is_kept_verbatim() {
        let params = QuizRequestParams::new(
            ["sets {difficulty} notation", "{count} puzzles"],
            Difficulty::Olympiad,
            2,
        )
        .expect("params");
        let prompt = quiz_prompt(&params);

        assert!(prompt.contains("Topics: sets {difficulty} notation, {count} puzzles."));
        assert!(prompt.contains("Generate 2 unique math word problems."));
        assert!(prompt.contains("Difficulty Level: olympiad."));
    }

    #[test]
    fn quiz_prompt_embeds_request() {
        let params =
            QuizRequestParams::new(["algebra", "lcm_hcf"], Difficulty::Olympiad, 7).expect("params");
        let prompt = quiz_prompt(&params);

        assert!(prompt.contains("Generate 7 unique math word problems."));
        assert!(prompt.contains("Topics: algebra, lcm_hcf."));
        assert!(prompt.contains("Difficulty Level: olympiad."));
        assert!(prompt.contains("STRICT JSON array"));
        assert!(prompt.contains("$$...$$"));
        assert!(!prompt.contains("{count}"));
        assert!(!prompt.contains("{topics}"));
        assert!(!prompt.contains("{difficulty}"));
    }
}
