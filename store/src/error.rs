use thiserror::Error;

#[derive(Clone, Debug, Error)]
pub enum StoreError {
    #[error("key not found: {0}")]
    NotFound(String),

    #[error("conflicting write: {0}")]
    Conflict(String),

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Transient failures are safe to retry; everything else is a hard
    /// answer from the store.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}
