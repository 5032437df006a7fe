//! Store Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bson::ser::Error),

    #[error("Invalid continuation cursor: {0}")]
    InvalidCursor(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
