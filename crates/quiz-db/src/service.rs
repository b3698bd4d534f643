//! Service layer owning every mutation of the quiz store.
//!
//! `QuizService` wraps a [`QuizDb`] handle. The repo modules add the
//! create/update/delete methods through `impl QuizService` blocks.
//!
//! Every mutation method follows this protocol:
//! 1. Validate the supplied field values
//! 2. Check out the connection
//! 3. Begin an immediate transaction
//! 4. Re-check referenced entities and unique keys, then execute SQL
//! 5. Commit on success, roll back on any failure

use crate::QuizDb;
use crate::error::DatabaseError;
use crate::query::QueryFacade;

pub struct QuizService {
    db: QuizDb,
}

impl QuizService {
    /// Create a new service over a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = QuizDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create from an existing `QuizDb` handle.
    #[must_use]
    pub const fn from_db(db: QuizDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &QuizDb {
        &self.db
    }

    /// Read-only projections over the same store.
    #[must_use]
    pub fn queries(&self) -> QueryFacade {
        QueryFacade::new(self.db.clone())
    }
}
