use tableau_lib::error::StorageError;
use tableau_lib::error::StoreError;
use tableau_lib::error::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("Failed to open log file: {0}")]
    LogFile(#[source] std::io::Error),

    #[error("No table named '{0}'")]
    NoSuchTable(String),

    #[error("No tables exist")]
    NoTables,

    #[error("No row '{0}'")]
    NoSuchRow(String),

    #[error("No column '{0}'")]
    NoSuchColumn(String),

    #[error("Unknown column type '{0}'")]
    UnknownType(String),

    #[error("Column '{0}' is not editable")]
    NotEditable(String),
}

pub type Result<T> = std::result::Result<T, CliError>;
