//! Store command errors

use crate::model::CellId;
use crate::model::ColumnId;
use crate::model::RowId;
use crate::model::TableId;

use super::ValidationError;

/// Error returned by store mutation commands.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("Table '{0}' not found")]
    TableNotFound(TableId),

    #[error("Column '{0}' not found")]
    ColumnNotFound(ColumnId),

    #[error("Row '{0}' not found")]
    RowNotFound(RowId),

    #[error("Cell '{0}' not found")]
    CellNotFound(CellId),

    /// A reorder command did not name exactly the current members.
    #[error("Reorder of table '{table}' does not match its {expected} {kind}")]
    ReorderMismatch {
        table: TableId,
        kind: &'static str,
        expected: usize,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
