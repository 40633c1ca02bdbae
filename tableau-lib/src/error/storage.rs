//! Persistence errors

/// Error raised while loading or saving store collections.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to (de)serialize '{key}': {source}")]
    Serde {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    /// Persisted data failed entity validation on load.
    #[error("Corrupt data under '{key}': {message}")]
    Corrupt { key: String, message: String },
}

impl StorageError {
    pub(crate) fn serde(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serde {
            key: key.into(),
            source,
        }
    }
}
