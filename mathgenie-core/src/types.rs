//! Core quiz types: difficulty levels, the topic catalogue, request
//! parameters and generated quiz items.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GenieError, Result};

/// Smallest number of questions a single quiz may ask for.
pub const MIN_QUESTION_COUNT: u8 = 1;
/// Largest number of questions a single quiz may ask for.
pub const MAX_QUESTION_COUNT: u8 = 10;
/// Question count used when the caller does not pick one.
pub const DEFAULT_QUESTION_COUNT: u8 = 5;

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// How hard the generated problems should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Warm-up problems.
    #[default]
    Beginner,
    /// Standard exam level.
    Intermediate,
    /// Multi-step problems.
    Advanced,
    /// Competition level.
    Olympiad,
}

impl Difficulty {
    /// All difficulty levels in ascending order.
    #[must_use]
    pub fn all() -> &'static [Difficulty] {
        &[
            Self::Beginner,
            Self::Intermediate,
            Self::Advanced,
            Self::Olympiad,
        ]
    }

    /// Wire value embedded in prompts and stored settings.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Olympiad => "olympiad",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Olympiad => "Olympiad",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = GenieError;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| GenieError::UnknownDifficulty(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Topic catalogue
// ---------------------------------------------------------------------------

/// A topic offered by the built-in catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topic {
    /// Identifier sent to the model.
    pub id: &'static str,
    /// Display label.
    pub label: &'static str,
}

/// Topics the front end offers by default. Callers may still pass
/// free-form topics; the catalogue is advisory.
pub const TOPICS: &[Topic] = &[
    Topic { id: "number_system", label: "Number System" },
    Topic { id: "lcm_hcf", label: "LCM / HCF" },
    Topic { id: "profit_loss", label: "Profit & Loss" },
    Topic { id: "geometry", label: "Geometry" },
    Topic { id: "algebra", label: "Algebra" },
    Topic { id: "percentage", label: "Percentage" },
    Topic { id: "time_work", label: "Time & Work" },
];

/// Look up a catalogue topic by id (case-insensitive).
#[must_use]
pub fn find_topic(id: &str) -> Option<&'static Topic> {
    let id = id.trim();
    TOPICS.iter().find(|t| t.id.eq_ignore_ascii_case(id))
}

// ---------------------------------------------------------------------------
// QuizRequestParams
// ---------------------------------------------------------------------------

/// What the user asked for. Always valid once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizRequestParams {
    topics: Vec<String>,
    difficulty: Difficulty,
    count: u8,
}

impl QuizRequestParams {
    /// Build validated parameters.
    ///
    /// Blank topics are dropped; order is preserved and duplicates are kept.
    ///
    /// # Errors
    /// Returns [`GenieError::InvalidParams`] if no topic remains or `count`
    /// falls outside `1..=10`.
    pub fn new<I, S>(topics: I, difficulty: Difficulty, count: u8) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let topics: Vec<String> = topics
            .into_iter()
            .map(Into::into)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        if topics.is_empty() {
            return Err(GenieError::InvalidParams(
                "at least one topic must be selected".into(),
            ));
        }
        if !(MIN_QUESTION_COUNT..=MAX_QUESTION_COUNT).contains(&count) {
            return Err(GenieError::InvalidParams(format!(
                "question count must be between {MIN_QUESTION_COUNT} and {MAX_QUESTION_COUNT}, got {count}"
            )));
        }

        Ok(Self {
            topics,
            difficulty,
            count,
        })
    }

    /// Selected topics, in the order given.
    #[must_use]
    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    /// Requested difficulty.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Number of questions requested.
    #[must_use]
    pub fn count(&self) -> u8 {
        self.count
    }
}

// ---------------------------------------------------------------------------
// QuizItem
// ---------------------------------------------------------------------------

/// Opaque identifier chosen by the model; may be a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuizItemId {
    /// Numeric id, e.g. `1`.
    Number(i64),
    /// String id, e.g. `"q1"`.
    Text(String),
}

impl fmt::Display for QuizItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One generated question with its answer and worked solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizItem {
    /// Model-assigned identifier.
    pub id: QuizItemId,
    /// The word problem.
    pub question: String,
    /// Final answer key.
    pub answer: String,
    /// Step-by-step solution (markdown with `$...$` / `$$...$$` math).
    pub logic: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("Olympiad".parse::<Difficulty>().expect("parse"), Difficulty::Olympiad);
        assert_eq!(" beginner ".parse::<Difficulty>().expect("parse"), Difficulty::Beginner);
        assert!("expert".parse::<Difficulty>().is_err());
    }

    #[test]
    fn difficulty_display_round_trip() {
        for d in Difficulty::all() {
            assert_eq!(d.to_string().parse::<Difficulty>().expect("parse"), *d);
        }
    }

    #[test]
    fn difficulty_serializes_lowercase() {
        let json = serde_json::to_string(&Difficulty::Intermediate).expect("serialize");
        assert_eq!(json, "\"intermediate\"");
    }

    #[test]
    fn params_reject_empty_topics() {
        let err = QuizRequestParams::new(Vec::<String>::new(), Difficulty::Beginner, 3);
        assert!(matches!(err, Err(GenieError::InvalidParams(_))));

        let blank = QuizRequestParams::new(["  ", ""], Difficulty::Beginner, 3);
        assert!(matches!(blank, Err(GenieError::InvalidParams(_))));
    }

    #[test]
    fn params_reject_out_of_range_count() {
        assert!(QuizRequestParams::new(["algebra"], Difficulty::Beginner, 0).is_err());
        assert!(QuizRequestParams::new(["algebra"], Difficulty::Beginner, 11).is_err());
        assert!(QuizRequestParams::new(["algebra"], Difficulty::Beginner, 1).is_ok());
        assert!(QuizRequestParams::new(["algebra"], Difficulty::Beginner, 10).is_ok());
    }

    #[test]
    fn params_keep_order_and_duplicates() {
        let params =
            QuizRequestParams::new(["geometry", "algebra", "geometry"], Difficulty::Advanced, 4)
                .expect("valid params");
        assert_eq!(params.topics(), ["geometry", "algebra", "geometry"]);
        assert_eq!(params.difficulty(), Difficulty::Advanced);
        assert_eq!(params.count(), 4);
    }

    #[test]
    fn quiz_item_accepts_numeric_and_string_ids() {
        let items: Vec<QuizItem> = serde_json::from_str(
            r#"[
                {"id": 1, "question": "q", "answer": "a", "logic": "l"},
                {"id": "q2", "question": "q", "answer": "a", "logic": "l"}
            ]"#,
        )
        .expect("items");
        assert_eq!(items[0].id, QuizItemId::Number(1));
        assert_eq!(items[1].id, QuizItemId::Text("q2".into()));
        assert_eq!(items[1].id.to_string(), "q2");
    }

    #[test]
    fn topic_lookup() {
        assert_eq!(find_topic("LCM_HCF").map(|t| t.label), Some("LCM / HCF"));
        assert!(find_topic("calculus").is_none());
    }
}
