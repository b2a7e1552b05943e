// src/models/question.rs

use serde::{Deserialize, Serialize};

/// Category tag on a question, driving branch-based selection quotas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    General,
    Technical,
    Electronics,
}

/// A quiz item from the static question bank.
/// The bank is fixed at process start; questions are never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,

    /// The text content of the question.
    pub text: String,

    /// Exactly four option strings, in display order.
    pub options: Vec<String>,

    /// Index into `options` of the correct answer.
    pub correct_option: usize,

    pub category: Category,
}

/// DTO for sending a question to the client (excludes the answer key).
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub id: i64,
    pub text: String,
    pub options: Vec<String>,
    pub category: Category,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id,
            text: q.text.clone(),
            options: q.options.clone(),
            category: q.category,
        }
    }
}
