use thiserror::Error;

/// Failures of the question dataset.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The database could not be opened or the query failed.
    #[error("Unable to connect to the database: {0}")]
    StorageUnavailable(String),

    /// The query succeeded but returned no rows.
    #[error("No questions found in the database.")]
    NoData,
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::StorageUnavailable(err.to_string())
    }
}
