use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One candidate response to a question. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: i64,
    pub answer: String,
    pub correct: bool,
    pub question_id: i64,
    pub created_at: DateTime<Utc>,
}

/// An answer to be created alongside its question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewAnswer {
    pub answer: String,
    pub correct: bool,
}

impl NewAnswer {
    pub fn new(answer: impl Into<String>, correct: bool) -> Self {
        Self {
            answer: answer.into(),
            correct,
        }
    }
}
