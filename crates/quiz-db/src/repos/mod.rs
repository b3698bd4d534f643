//! Repository modules implementing the mutating operations for each entity.
//!
//! Each module adds methods to `QuizService` via `impl QuizService` blocks and
//! exposes crate-internal row lookups that [`crate::query`] reuses.

pub mod category;
pub mod question;
