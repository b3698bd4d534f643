//! Shared test utilities for quiz-db unit tests.

pub(crate) mod helpers {
    use quiz_core::entities::{Category, NewAnswer};

    use crate::QuizDb;
    use crate::helpers::query_count;
    use crate::service::QuizService;

    /// Create an in-memory `QuizService`.
    pub async fn test_service() -> QuizService {
        QuizService::new_local(":memory:").await.unwrap()
    }

    /// Count all rows in `table`.
    pub async fn count_rows(db: &QuizDb, table: &str) -> i64 {
        let conn = db.acquire().await;
        query_count(&conn, &format!("SELECT COUNT(*) FROM {table}"), ())
            .await
            .unwrap()
    }

    /// Create a category holding `questions` questions with `answers` answers each.
    ///
    /// The first answer of every question is the correct one.
    pub async fn seed_tree(
        svc: &QuizService,
        slug: &str,
        questions: usize,
        answers: usize,
    ) -> Category {
        let category = svc.create_category(slug, slug, None).await.unwrap();
        for q in 0..questions {
            let new_answers: Vec<NewAnswer> = (0..answers)
                .map(|a| NewAnswer::new(format!("answer {a}"), a == 0))
                .collect();
            svc.create_question(&format!("{slug} question {q}?"), category.id, &new_answers)
                .await
                .unwrap();
        }
        category
    }
}
