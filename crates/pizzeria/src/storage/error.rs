use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid value in column {column}: {value:?}")]
    InvalidValue { column: &'static str, value: String },
}
