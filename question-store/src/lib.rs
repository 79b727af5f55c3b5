//! Read-only access to the exam question dataset.
//!
//! The dataset is a SQLite file with two tables:
//! - `Questions (QID, IID, question, marks, answer)`
//! - `"Insert" (IID, Text)`: optional reading passages shared by questions
//!
//! Consumers depend on the [`QuestionSource`] trait; [`SqliteQuestionStore`]
//! is the production implementation.

pub mod errors;
pub mod question;
pub mod sqlite;

pub use errors::StoreError;
pub use question::Question;
pub use sqlite::SqliteQuestionStore;

use async_trait::async_trait;

/// Anything that can produce the ordered question list.
///
/// Implementations must return questions sorted by identifier ascending and
/// must report an empty dataset as [`StoreError::NoData`] rather than an
/// empty vector.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn list_questions(&self) -> Result<Vec<Question>, StoreError>;
}
