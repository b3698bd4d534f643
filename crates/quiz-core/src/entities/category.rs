use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::QuestionWithAnswers;

/// A top-level grouping of quiz questions, identified by a unique slug.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A category together with all of its questions and their answers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithQuestions {
    #[serde(flatten)]
    pub category: Category,
    pub questions: Vec<QuestionWithAnswers>,
}

/// How a caller names a category: by surrogate id or by slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryRef {
    Id(i64),
    Slug(String),
}

impl From<i64> for CategoryRef {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for CategoryRef {
    fn from(slug: &str) -> Self {
        Self::Slug(slug.to_string())
    }
}

impl From<String> for CategoryRef {
    fn from(slug: String) -> Self {
        Self::Slug(slug)
    }
}

impl fmt::Display for CategoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id={id}"),
            Self::Slug(slug) => write!(f, "slug={slug}"),
        }
    }
}
