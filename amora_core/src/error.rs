use thiserror::Error;

/// Failures surfaced by the record store and the operations built on it.
///
/// `NotFound` and `Validation` are expected at the event-handling boundary
/// and are rendered as corrective user prompts; `DuplicateKey` indicates a
/// creation race that correct gating should prevent.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error(transparent)]
    Db(#[from] sled::Error),
    #[error("record encoding: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
