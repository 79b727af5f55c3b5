use std::{path::Path, time::Duration};

use async_trait::async_trait;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tracing::{debug, error, instrument, warn};

use crate::{QuestionSource, errors::StoreError, question::Question};

const LIST_QUESTIONS_SQL: &str = r#"
    SELECT q.QID      AS id,
           q.IID      AS insert_id,
           i.Text     AS insert_text,
           q.question AS question,
           q.marks    AS marks,
           q.answer   AS answer
    FROM Questions q
    LEFT JOIN "Insert" i ON q.IID = i.IID
    ORDER BY q.QID
"#;

/// Question dataset stored in a SQLite file.
///
/// The pool connects lazily, so a missing or unreadable file is reported as
/// [`StoreError::StorageUnavailable`] on the first request instead of
/// preventing startup.
#[derive(Clone)]
pub struct SqliteQuestionStore {
    pool: SqlitePool,
}

impl SqliteQuestionStore {
    /// Opens the dataset at `path` read-only. Never creates the file.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .connect_lazy_with(options);

        Self { pool }
    }

    /// Wraps an existing pool.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl QuestionSource for SqliteQuestionStore {
    #[instrument(name = "list_questions", skip(self))]
    async fn list_questions(&self) -> Result<Vec<Question>, StoreError> {
        let rows = sqlx::query_as::<_, Question>(LIST_QUESTIONS_SQL)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "database error while listing questions");
                StoreError::from(e)
            })?;

        if rows.is_empty() {
            warn!("question dataset is empty");
            return Err(StoreError::NoData);
        }

        debug!(count = rows.len(), "questions loaded");
        Ok(rows)
    }
}
