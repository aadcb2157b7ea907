use thiserror::Error;

/// Input that cannot be accepted as sent. The caller must correct it and resend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Failure reported by a record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    #[error("record store rejected the operation: {0}")]
    Rejected(String),

    #[error("stored record could not be decoded: {0}")]
    Corrupt(String),
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to persist payment: {0}")]
    StorageFailure(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to query payments: {0}")]
    StorageFailure(#[from] StoreError),
}
