//! Predefined questions and their answers.

use std::fmt;

use cmdgen_foundation::{Queryable, Value};

use crate::tier::DifficultyDegree;

/// A question from the predefined set, with its expected answer.
///
/// Every question is named `question` so a wildcard renders that word;
/// the question and answer themselves surface as task remarks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PredefinedQuestion {
    question: String,
    answer: String,
    tier: DifficultyDegree,
}

impl PredefinedQuestion {
    /// Creates an easy question.
    #[must_use]
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            tier: DifficultyDegree::Easy,
        }
    }

    /// Sets the difficulty.
    #[must_use]
    pub fn with_tier(mut self, tier: DifficultyDegree) -> Self {
        self.tier = tier;
        self
    }

    /// The question text.
    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    /// The answer text.
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// How hard the question is to understand.
    #[must_use]
    pub fn tier(&self) -> DifficultyDegree {
        self.tier
    }

    /// `Q:` and `A:` lines for task remarks.
    #[must_use]
    pub fn metadata(&self) -> [String; 2] {
        [format!("Q: {}", self.question), format!("A: {}", self.answer)]
    }
}

impl Queryable for PredefinedQuestion {
    fn name(&self) -> &str {
        "question"
    }

    fn property(&self, name: &str) -> Option<Value> {
        match name.to_ascii_lowercase().as_str() {
            "name" => Some(Value::from("question")),
            "question" => Some(Value::from(self.question.as_str())),
            "answer" => Some(Value::from(self.answer.as_str())),
            "tier" | "difficulty" => Some(Value::from(self.tier.as_str())),
            _ => None,
        }
    }
}

impl fmt::Display for PredefinedQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.question, self.tier)
    }
}
