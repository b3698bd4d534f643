//! Entity structs for the quiz domain.
//!
//! Each flat entity maps to one table in the libSQL store. The `*With*`
//! structs are read projections that nest children under their parent.
//! JSON field names are camelCase to match the HTTP surface.

mod answer;
mod category;
mod question;

pub use answer::{Answer, NewAnswer};
pub use category::{Category, CategoryRef, CategoryWithQuestions};
pub use question::{Question, QuestionWithAnswers};
