//! Question repository: create with answers, partial update, cascading delete.
//!
//! Answers are only ever written here, as part of creating their question,
//! and removed together with it.

use chrono::Utc;

use quiz_core::entities::{Answer, NewAnswer, Question, QuestionWithAnswers};
use quiz_core::validate::require_text;

use crate::QuizDb;
use crate::error::DatabaseError;
use crate::helpers::{get_bool, parse_datetime};
use crate::repos::category::category_exists;
use crate::service::QuizService;
use crate::updates::question::QuestionUpdate;

pub(crate) const SELECT_COLS: &str = "id, question, category_id, created_at, updated_at";
pub(crate) const ANSWER_COLS: &str = "id, answer, correct, question_id, created_at";

pub(crate) fn row_to_question(row: &libsql::Row) -> Result<Question, DatabaseError> {
    Ok(Question {
        id: row.get(0)?,
        question: row.get(1)?,
        category_id: row.get(2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
        updated_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

pub(crate) fn row_to_answer(row: &libsql::Row) -> Result<Answer, DatabaseError> {
    Ok(Answer {
        id: row.get(0)?,
        answer: row.get(1)?,
        correct: get_bool(row, 2)?,
        question_id: row.get(3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

pub(crate) async fn find_question(
    conn: &libsql::Connection,
    id: i64,
) -> Result<Option<Question>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM questions WHERE id = ?1"),
            [id],
        )
        .await?;
    rows.next().await?.map(|row| row_to_question(&row)).transpose()
}

pub(crate) async fn require_question(
    conn: &libsql::Connection,
    id: i64,
) -> Result<Question, DatabaseError> {
    find_question(conn, id)
        .await?
        .ok_or_else(|| DatabaseError::not_found("question", id))
}

pub(crate) async fn answers_for_question(
    conn: &libsql::Connection,
    question_id: i64,
) -> Result<Vec<Answer>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {ANSWER_COLS} FROM answers WHERE question_id = ?1 ORDER BY id"),
            [question_id],
        )
        .await?;

    let mut answers = Vec::new();
    while let Some(row) = rows.next().await? {
        answers.push(row_to_answer(&row)?);
    }
    Ok(answers)
}

pub(crate) async fn load_question_with_answers(
    conn: &libsql::Connection,
    id: i64,
) -> Result<QuestionWithAnswers, DatabaseError> {
    let question = require_question(conn, id).await?;
    let answers = answers_for_question(conn, id).await?;
    Ok(QuestionWithAnswers { question, answers })
}

/// Exact-text lookup used as the ingestion idempotency key.
async fn find_question_by_text(
    conn: &libsql::Connection,
    category_id: i64,
    text: &str,
) -> Result<Option<Question>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "SELECT {SELECT_COLS} FROM questions
                 WHERE category_id = ?1 AND question = ?2 ORDER BY id LIMIT 1"
            ),
            libsql::params![category_id, text],
        )
        .await?;
    rows.next().await?.map(|row| row_to_question(&row)).transpose()
}

async fn require_category_for_question(
    conn: &libsql::Connection,
    category_id: i64,
) -> Result<(), DatabaseError> {
    if category_exists(conn, category_id).await? {
        Ok(())
    } else {
        Err(DatabaseError::Dependency {
            entity: "category",
            id: category_id,
        })
    }
}

async fn insert_question_tree(
    conn: &libsql::Connection,
    text: &str,
    category_id: i64,
    answers: &[NewAnswer],
) -> Result<QuestionWithAnswers, DatabaseError> {
    let now = Utc::now();
    conn.execute(
        "INSERT INTO questions (category_id, question, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4)",
        libsql::params![category_id, text, now.to_rfc3339(), now.to_rfc3339()],
    )
    .await?;
    let question_id = conn.last_insert_rowid();

    let mut created = Vec::with_capacity(answers.len());
    for answer in answers {
        conn.execute(
            "INSERT INTO answers (question_id, answer, correct, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            libsql::params![
                question_id,
                answer.answer.as_str(),
                i64::from(answer.correct),
                now.to_rfc3339()
            ],
        )
        .await?;
        created.push(Answer {
            id: conn.last_insert_rowid(),
            answer: answer.answer.clone(),
            correct: answer.correct,
            question_id,
            created_at: now,
        });
    }

    Ok(QuestionWithAnswers {
        question: Question {
            id: question_id,
            question: text.to_string(),
            category_id,
            created_at: now,
            updated_at: now,
        },
        answers: created,
    })
}

async fn create_if_absent(
    conn: &libsql::Connection,
    text: &str,
    category_id: i64,
    answers: &[NewAnswer],
) -> Result<Option<QuestionWithAnswers>, DatabaseError> {
    require_category_for_question(conn, category_id).await?;
    if find_question_by_text(conn, category_id, text).await?.is_some() {
        return Ok(None);
    }
    insert_question_tree(conn, text, category_id, answers)
        .await
        .map(Some)
}

async fn apply_question_update(
    conn: &libsql::Connection,
    id: i64,
    update: &QuestionUpdate,
) -> Result<QuestionWithAnswers, DatabaseError> {
    require_question(conn, id).await?;
    if update.is_empty() {
        return load_question_with_answers(conn, id).await;
    }

    let mut sets = Vec::new();
    let mut params: Vec<libsql::Value> = Vec::new();
    let mut idx = 1usize;

    if let Some(ref question) = update.question {
        sets.push(format!("question = ?{idx}"));
        params.push(question.clone().into());
        idx += 1;
    }
    if let Some(category_id) = update.category_id {
        require_category_for_question(conn, category_id).await?;
        sets.push(format!("category_id = ?{idx}"));
        params.push(category_id.into());
        idx += 1;
    }

    sets.push(format!("updated_at = ?{idx}"));
    params.push(Utc::now().to_rfc3339().into());
    idx += 1;

    params.push(id.into());
    let sql = format!("UPDATE questions SET {} WHERE id = ?{idx}", sets.join(", "));
    conn.execute(&sql, libsql::params_from_iter(params)).await?;

    load_question_with_answers(conn, id).await
}

async fn delete_question_tree(conn: &libsql::Connection, id: i64) -> Result<u64, DatabaseError> {
    require_question(conn, id).await?;
    let answers = conn
        .execute("DELETE FROM answers WHERE question_id = ?1", [id])
        .await?;
    conn.execute("DELETE FROM questions WHERE id = ?1", [id])
        .await?;
    Ok(answers)
}

fn validate_new_question(text: &str, answers: &[NewAnswer]) -> Result<(), DatabaseError> {
    require_text("question", text)?;
    for (i, answer) in answers.iter().enumerate() {
        require_text(&format!("answers[{i}].answer"), &answer.answer)?;
    }
    Ok(())
}

impl QuizService {
    /// Create a question and all of its answers atomically.
    ///
    /// Fails with `DatabaseError::Dependency` when `category_id` does not
    /// reference a live category; in that case no row is written.
    pub async fn create_question(
        &self,
        question: &str,
        category_id: i64,
        answers: &[NewAnswer],
    ) -> Result<QuestionWithAnswers, DatabaseError> {
        validate_new_question(question, answers)?;

        let conn = self.db().acquire().await;
        let tx = QuizDb::begin(&conn).await?;
        let result = async {
            require_category_for_question(&tx, category_id).await?;
            insert_question_tree(&tx, question, category_id, answers).await
        }
        .await;
        let created = QuizDb::finish(tx, result).await?;

        tracing::debug!(
            id = created.question.id,
            category_id,
            answers = created.answers.len(),
            "created question"
        );
        Ok(created)
    }

    /// Like [`Self::create_question`], but returns `Ok(None)` without writing
    /// when the category already holds a question with identical text.
    ///
    /// The duplicate check and the insert share one transaction.
    pub async fn create_question_if_absent(
        &self,
        question: &str,
        category_id: i64,
        answers: &[NewAnswer],
    ) -> Result<Option<QuestionWithAnswers>, DatabaseError> {
        validate_new_question(question, answers)?;

        let conn = self.db().acquire().await;
        let tx = QuizDb::begin(&conn).await?;
        let result = create_if_absent(&tx, question, category_id, answers).await;
        let created = QuizDb::finish(tx, result).await?;

        match created {
            Some(ref q) => tracing::debug!(id = q.question.id, category_id, "created question"),
            None => tracing::debug!(category_id, question, "question already present"),
        }
        Ok(created)
    }

    /// Apply a partial update. A new `category_id` must reference a live
    /// category; otherwise the question is left untouched.
    pub async fn update_question(
        &self,
        id: i64,
        update: QuestionUpdate,
    ) -> Result<QuestionWithAnswers, DatabaseError> {
        update.validate()?;

        let conn = self.db().acquire().await;
        let tx = QuizDb::begin(&conn).await?;
        let result = apply_question_update(&tx, id, &update).await;
        let updated = QuizDb::finish(tx, result).await?;

        tracing::debug!(id, "updated question");
        Ok(updated)
    }

    /// Delete a question and its answers atomically.
    pub async fn delete_question(&self, id: i64) -> Result<(), DatabaseError> {
        let conn = self.db().acquire().await;
        let tx = QuizDb::begin(&conn).await?;
        let result = delete_question_tree(&tx, id).await;
        let answers = QuizDb::finish(tx, result).await?;

        tracing::debug!(id, answers, "deleted question");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_support::helpers::{count_rows, seed_tree, test_service};
    use crate::updates::question::QuestionUpdateBuilder;
    use pretty_assertions::assert_eq;

    fn two_answers() -> Vec<NewAnswer> {
        vec![NewAnswer::new("4", true), NewAnswer::new("5", false)]
    }

    #[tokio::test]
    async fn create_question_with_answers() {
        let svc = test_service().await;
        let category = svc.create_category("math", "Math", None).await.unwrap();

        let created = svc
            .create_question("2+2?", category.id, &two_answers())
            .await
            .unwrap();

        assert_eq!(created.question.question, "2+2?");
        assert_eq!(created.question.category_id, category.id);
        assert_eq!(created.answers.len(), 2);
        assert!(created.answers[0].correct);
        assert!(created.answers.iter().all(|a| a.question_id == created.question.id));

        let conn = svc.db().acquire().await;
        let reloaded = load_question_with_answers(&conn, created.question.id)
            .await
            .unwrap();
        assert_eq!(reloaded, created);
    }

    #[tokio::test]
    async fn create_question_for_missing_category_writes_nothing() {
        let svc = test_service().await;

        let err = svc
            .create_question("orphan?", 77, &two_answers())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Dependency);
        assert_eq!(count_rows(svc.db(), "questions").await, 0);
        assert_eq!(count_rows(svc.db(), "answers").await, 0);
    }

    #[tokio::test]
    async fn blank_answer_rejects_whole_question() {
        let svc = test_service().await;
        let category = svc.create_category("math", "Math", None).await.unwrap();

        let answers = vec![NewAnswer::new("4", true), NewAnswer::new(" ", false)];
        let err = svc
            .create_question("2+2?", category.id, &answers)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.field(), Some("answers[1].answer"));
        assert_eq!(count_rows(svc.db(), "questions").await, 0);
    }

    #[tokio::test]
    async fn create_if_absent_skips_exact_duplicate() {
        let svc = test_service().await;
        let category = svc.create_category("math", "Math", None).await.unwrap();

        let first = svc
            .create_question_if_absent("2+2?", category.id, &two_answers())
            .await
            .unwrap();
        assert!(first.is_some());

        let second = svc
            .create_question_if_absent("2+2?", category.id, &two_answers())
            .await
            .unwrap();
        assert!(second.is_none());

        // Different text (even by case) is a different question.
        let third = svc
            .create_question_if_absent("2+2 ?", category.id, &two_answers())
            .await
            .unwrap();
        assert!(third.is_some());

        assert_eq!(count_rows(svc.db(), "questions").await, 2);
        assert_eq!(count_rows(svc.db(), "answers").await, 4);
    }

    #[tokio::test]
    async fn same_text_in_other_category_is_not_duplicate() {
        let svc = test_service().await;
        let a = svc.create_category("a", "A", None).await.unwrap();
        let b = svc.create_category("b", "B", None).await.unwrap();

        svc.create_question_if_absent("Same?", a.id, &[]).await.unwrap();
        let in_b = svc.create_question_if_absent("Same?", b.id, &[]).await.unwrap();
        assert!(in_b.is_some());
    }

    #[tokio::test]
    async fn update_question_text() {
        let svc = test_service().await;
        let category = seed_tree(&svc, "math", 1, 2).await;
        let conn = svc.db().acquire().await;
        let id = find_question_by_text(&conn, category.id, "math question 0?")
            .await
            .unwrap()
            .unwrap()
            .id;
        drop(conn);

        let update = QuestionUpdateBuilder::new().question("What is 2+2?").build();
        let updated = svc.update_question(id, update).await.unwrap();
        assert_eq!(updated.question.question, "What is 2+2?");
        assert_eq!(updated.answers.len(), 2);
    }

    #[tokio::test]
    async fn update_question_moves_category() {
        let svc = test_service().await;
        let from = svc.create_category("from", "From", None).await.unwrap();
        let to = svc.create_category("to", "To", None).await.unwrap();
        let created = svc.create_question("Move me?", from.id, &[]).await.unwrap();

        let update = QuestionUpdateBuilder::new().category_id(to.id).build();
        let updated = svc.update_question(created.question.id, update).await.unwrap();
        assert_eq!(updated.question.category_id, to.id);
    }

    #[tokio::test]
    async fn update_question_to_missing_category_keeps_original() {
        let svc = test_service().await;
        let category = svc.create_category("math", "Math", None).await.unwrap();
        let created = svc
            .create_question("2+2?", category.id, &two_answers())
            .await
            .unwrap();

        let update = QuestionUpdateBuilder::new()
            .question("changed?")
            .category_id(9999)
            .build();
        let err = svc
            .update_question(created.question.id, update)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Dependency);

        let conn = svc.db().acquire().await;
        let after = require_question(&conn, created.question.id).await.unwrap();
        assert_eq!(after.category_id, category.id);
        assert_eq!(after.question, "2+2?");
    }

    #[tokio::test]
    async fn empty_question_patch_is_noop() {
        let svc = test_service().await;
        let category = svc.create_category("math", "Math", None).await.unwrap();
        let created = svc
            .create_question("2+2?", category.id, &two_answers())
            .await
            .unwrap();

        let same = svc
            .update_question(created.question.id, QuestionUpdate::default())
            .await
            .unwrap();
        assert_eq!(same, created);
    }

    #[tokio::test]
    async fn update_missing_question_is_not_found() {
        let svc = test_service().await;
        let update = QuestionUpdateBuilder::new().question("x?").build();
        let err = svc.update_question(5, update).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn delete_question_removes_answers() {
        let svc = test_service().await;
        let category = svc.create_category("math", "Math", None).await.unwrap();
        let doomed = svc
            .create_question("2+2?", category.id, &two_answers())
            .await
            .unwrap();
        svc.create_question("3+3?", category.id, &two_answers())
            .await
            .unwrap();

        svc.delete_question(doomed.question.id).await.unwrap();

        assert_eq!(count_rows(svc.db(), "questions").await, 1);
        assert_eq!(count_rows(svc.db(), "answers").await, 2);
        let err = svc.delete_question(doomed.question.id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
