//! # quiz-db
//!
//! libSQL-backed relational store for the quiz domain.
//!
//! - [`QuizDb`] is the entity store: it owns the database handle, runs the
//!   embedded migrations, and hands out the connection one operation at a time.
//! - [`service::QuizService`] is the only writer. Its repo methods (see
//!   [`repos`]) enforce the cross-entity rules: no orphan questions or
//!   answers, unique category slugs, cascade-on-delete.
//! - [`query::QueryFacade`] serves the read-only nested projections.
//!
//! Every mutating operation executes inside a single `BEGIN IMMEDIATE`
//! transaction, so concurrent readers see either all of its writes or none.

pub mod error;
pub mod helpers;
mod migrations;
pub mod query;
pub mod repos;
pub mod service;
pub mod updates;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use error::DatabaseError;
use libsql::{Builder, TransactionBehavior};
use tokio::sync::{Mutex, MutexGuard};

/// Shared handle to the quiz database.
///
/// Cheap to clone. All clones share one connection, which is checked out for
/// the duration of a single logical operation via [`QuizDb::acquire`] and
/// released when the guard drops. Operations therefore never interleave on
/// the connection, and a multi-statement read inside one checkout observes a
/// consistent state.
#[derive(Clone)]
pub struct QuizDb {
    inner: Arc<Inner>,
}

struct Inner {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: Mutex<libsql::Connection>,
}

impl QuizDb {
    /// Open a local database at the given path, or `":memory:"` for tests.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        migrations::run(&conn).await?;
        tracing::debug!(path, "opened quiz database");

        Ok(Self {
            inner: Arc::new(Inner {
                db,
                conn: Mutex::new(conn),
            }),
        })
    }

    /// Check out the connection for one logical operation.
    pub async fn acquire(&self) -> MutexGuard<'_, libsql::Connection> {
        self.inner.conn.lock().await
    }

    /// Begin a write transaction that takes the database write lock up front.
    pub(crate) async fn begin(
        conn: &libsql::Connection,
    ) -> Result<libsql::Transaction, DatabaseError> {
        Ok(conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .await?)
    }

    /// Commit on `Ok`, roll back on `Err`, and pass the result through.
    ///
    /// A rollback failure is logged; the original error is still returned.
    pub(crate) async fn finish<T>(
        tx: libsql::Transaction,
        result: Result<T, DatabaseError>,
    ) -> Result<T, DatabaseError> {
        match result {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(error) => {
                if let Err(rollback) = tx.rollback().await {
                    tracing::error!(%rollback, %error, "transaction rollback failed");
                }
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::count_rows;

    async fn test_db() -> QuizDb {
        QuizDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;
        let conn = db.acquire().await;

        let mut rows = conn
            .query(
                "SELECT name FROM sqlite_master WHERE type = 'table' \
                 AND name IN ('categories', 'questions', 'answers') ORDER BY name",
                (),
            )
            .await
            .unwrap();

        let mut names = Vec::new();
        while let Some(row) = rows.next().await.unwrap() {
            names.push(row.get::<String>(0).unwrap());
        }
        assert_eq!(names, vec!["answers", "categories", "questions"]);
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let db = test_db().await;
        let conn = db.acquire().await;

        let result = conn
            .execute(
                "INSERT INTO questions (category_id, question, created_at, updated_at) \
                 VALUES (999, 'orphan?', 'now', 'now')",
                (),
            )
            .await;
        assert!(result.is_err(), "orphan question must be rejected");
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let db = test_db().await;
        let conn = db.acquire().await;
        migrations::run(&conn).await.unwrap();
    }

    #[tokio::test]
    async fn finish_rolls_back_on_error() {
        let db = test_db().await;
        {
            let conn = db.acquire().await;
            let tx = QuizDb::begin(&conn).await.unwrap();
            tx.execute(
                "INSERT INTO categories (slug, title, created_at, updated_at) \
                 VALUES ('gone', 'Gone', 'now', 'now')",
                (),
            )
            .await
            .unwrap();

            let result: Result<(), DatabaseError> = Err(DatabaseError::Query("forced".into()));
            let err = QuizDb::finish(tx, result).await.unwrap_err();
            assert!(matches!(err, DatabaseError::Query(_)));
        }
        assert_eq!(count_rows(&db, "categories").await, 0);
    }

    #[tokio::test]
    async fn finish_commits_on_ok() {
        let db = test_db().await;
        {
            let conn = db.acquire().await;
            let tx = QuizDb::begin(&conn).await.unwrap();
            tx.execute(
                "INSERT INTO categories (slug, title, created_at, updated_at) \
                 VALUES ('kept', 'Kept', 'now', 'now')",
                (),
            )
            .await
            .unwrap();
            QuizDb::finish(tx, Ok(())).await.unwrap();
        }
        assert_eq!(count_rows(&db, "categories").await, 1);
    }
}
