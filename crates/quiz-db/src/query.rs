//! Read-only nested projections.
//!
//! Each projection checks out the connection once, so the category, its
//! questions, and their answers all come from the same committed state.

use std::collections::HashMap;

use quiz_core::entities::{
    Answer, Category, CategoryRef, CategoryWithQuestions, Question, QuestionWithAnswers,
};

use crate::QuizDb;
use crate::error::DatabaseError;
use crate::repos::category::{self, require_category};
use crate::repos::question::{self, ANSWER_COLS, load_question_with_answers, row_to_answer};

#[derive(Clone)]
pub struct QueryFacade {
    db: QuizDb,
}

impl QueryFacade {
    #[must_use]
    pub const fn new(db: QuizDb) -> Self {
        Self { db }
    }

    /// All categories in creation order.
    pub async fn list_categories(&self) -> Result<Vec<Category>, DatabaseError> {
        let conn = self.db.acquire().await;
        let mut rows = conn
            .query(
                &format!("SELECT {} FROM categories ORDER BY id", category::SELECT_COLS),
                (),
            )
            .await?;

        let mut categories = Vec::new();
        while let Some(row) = rows.next().await? {
            categories.push(category::row_to_category(&row)?);
        }
        Ok(categories)
    }

    /// A category with every question and every answer it owns.
    pub async fn get_category_by_slug(
        &self,
        slug: &str,
    ) -> Result<CategoryWithQuestions, DatabaseError> {
        let conn = self.db.acquire().await;
        let category = require_category(&conn, &CategoryRef::Slug(slug.to_string())).await?;
        let questions = questions_with_answers(&conn, Some(category.id)).await?;
        Ok(CategoryWithQuestions {
            category,
            questions,
        })
    }

    /// Questions with their answers, optionally restricted to one category.
    ///
    /// A filter naming a category that does not exist is `NotFound`, not an
    /// empty list.
    pub async fn list_questions(
        &self,
        filter: Option<CategoryRef>,
    ) -> Result<Vec<QuestionWithAnswers>, DatabaseError> {
        let conn = self.db.acquire().await;
        let category_id = match filter {
            Some(target) => Some(require_category(&conn, &target).await?.id),
            None => None,
        };
        questions_with_answers(&conn, category_id).await
    }

    pub async fn get_question(&self, id: i64) -> Result<QuestionWithAnswers, DatabaseError> {
        let conn = self.db.acquire().await;
        load_question_with_answers(&conn, id).await
    }
}

async fn questions_with_answers(
    conn: &libsql::Connection,
    category_id: Option<i64>,
) -> Result<Vec<QuestionWithAnswers>, DatabaseError> {
    let questions = {
        let mut rows = match category_id {
            Some(id) => {
                conn.query(
                    &format!(
                        "SELECT {} FROM questions WHERE category_id = ?1 ORDER BY id",
                        question::SELECT_COLS
                    ),
                    [id],
                )
                .await?
            }
            None => {
                conn.query(
                    &format!("SELECT {} FROM questions ORDER BY id", question::SELECT_COLS),
                    (),
                )
                .await?
            }
        };
        let mut questions = Vec::new();
        while let Some(row) = rows.next().await? {
            questions.push(question::row_to_question(&row)?);
        }
        questions
    };

    let answers = {
        let mut rows = match category_id {
            Some(id) => {
                conn.query(
                    &format!(
                        "SELECT {ANSWER_COLS} FROM answers WHERE question_id IN
                         (SELECT id FROM questions WHERE category_id = ?1) ORDER BY id"
                    ),
                    [id],
                )
                .await?
            }
            None => {
                conn.query(
                    &format!("SELECT {ANSWER_COLS} FROM answers ORDER BY id"),
                    (),
                )
                .await?
            }
        };
        let mut answers = Vec::new();
        while let Some(row) = rows.next().await? {
            answers.push(row_to_answer(&row)?);
        }
        answers
    };

    Ok(nest_answers(questions, answers))
}

/// Attach answers to their questions, keeping both in their original order.
fn nest_answers(questions: Vec<Question>, answers: Vec<Answer>) -> Vec<QuestionWithAnswers> {
    let mut by_question: HashMap<i64, Vec<Answer>> = HashMap::new();
    for answer in answers {
        by_question.entry(answer.question_id).or_default().push(answer);
    }

    questions
        .into_iter()
        .map(|question| {
            let answers = by_question.remove(&question.id).unwrap_or_default();
            QuestionWithAnswers { question, answers }
        })
        .collect()
}
