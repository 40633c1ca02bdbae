//! Error types

mod storage;
mod store;
mod validation;

pub use storage::*;
pub use store::*;
pub use validation::*;

/// Crate-level error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Construction-time validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A store command referenced something that does not exist.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Loading or saving the store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
