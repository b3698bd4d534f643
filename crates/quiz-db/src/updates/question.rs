//! Question patch and builder.
//!
//! Answers are immutable after creation, so the patch only covers the
//! question text and its category.

use quiz_core::errors::CoreError;
use quiz_core::validate::require_text;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

impl QuestionUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.question.is_none() && self.category_id.is_none()
    }

    /// Check every supplied field.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for blank question text or a
    /// non-positive category id.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(ref question) = self.question {
            require_text("question", question)?;
        }
        if let Some(category_id) = self.category_id
            && category_id <= 0
        {
            return Err(CoreError::validation(
                "categoryId",
                "must be a positive integer",
            ));
        }
        Ok(())
    }
}

pub struct QuestionUpdateBuilder(QuestionUpdate);

impl QuestionUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(QuestionUpdate::default())
    }

    #[must_use]
    pub fn question(mut self, question: impl Into<String>) -> Self {
        self.0.question = Some(question.into());
        self
    }

    #[must_use]
    pub const fn category_id(mut self, category_id: i64) -> Self {
        self.0.category_id = Some(category_id);
        self
    }

    #[must_use]
    pub fn build(self) -> QuestionUpdate {
        self.0
    }
}

impl Default for QuestionUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
