#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The host refused to hand out the store, or blocks every access to it
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// A write would grow the store past its capacity
    #[error("Quota exceeded while writing {key:?} (limit {limit} bytes)")]
    QuotaExceeded { key: String, limit: usize },

    /// Any other exception raised by the host
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StorageError {
    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn backend<S: Into<String>>(message: S) -> Self {
        Self::Backend(message.into())
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;
