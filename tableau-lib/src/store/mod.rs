//! Table store
//!
//! [`TableStore`] is the interface the rest of the crate consumes: ordered
//! queries plus a small set of mutation commands. [`MemoryStore`] is the
//! in-memory implementation, an explicit object owned by the application
//! session rather than a global.

mod memory;
mod sample;
mod selection;

pub use memory::ColumnUpdate;
pub use memory::MemoryStore;
pub use sample::SAMPLE_TABLE_NAME;
pub use selection::Selection;
pub use selection::TableSelection;

use crate::config::ColumnSpec;
use crate::config::OptionsPatch;
use crate::config::TableOptions;
use crate::error::StoreError;
use crate::model::Cell;
use crate::model::CellId;
use crate::model::Column;
use crate::model::ColumnId;
use crate::model::Row;
use crate::model::RowId;
use crate::model::Table;
use crate::model::TableId;
use crate::model::Value;

/// Queries and commands over tables, columns, rows and cells.
///
/// Each command applies completely or not at all. Deleting a row or column
/// cascades to its cells and selection membership, and renumbers the
/// remaining siblings to a dense `0..n` sequence.
pub trait TableStore {
    fn table(&self, table_id: &TableId) -> Option<Table>;

    /// Columns of a table ordered by position.
    fn table_columns(&self, table_id: &TableId) -> Vec<Column>;

    /// Rows of a table ordered by position, with `selected` filled in.
    fn table_rows(&self, table_id: &TableId) -> Vec<Row>;

    fn column(&self, column_id: &ColumnId) -> Option<Column>;

    fn row(&self, row_id: &RowId) -> Option<Row>;

    /// The committed cell for a row/column pair, if any.
    fn cell(&self, row_id: &RowId, column_id: &ColumnId) -> Option<Cell>;

    fn options(&self) -> &TableOptions;

    /// Creates the cell for a row/column pair. If one already exists it is
    /// updated instead and its id returned.
    fn create_cell(&mut self, row_id: &RowId, column_id: &ColumnId, value: Value) -> Result<CellId, StoreError>;

    fn update_cell(&mut self, cell_id: &CellId, value: Value) -> Result<(), StoreError>;

    /// Appends an empty row.
    fn create_row(&mut self, table_id: &TableId) -> Result<RowId, StoreError>;

    /// Appends a copy of a row, including its cells.
    fn duplicate_row(&mut self, row_id: &RowId) -> Result<RowId, StoreError>;

    fn delete_row(&mut self, row_id: &RowId) -> Result<(), StoreError>;

    /// Appends a column built from `spec`.
    fn add_column(&mut self, table_id: &TableId, spec: ColumnSpec) -> Result<ColumnId, StoreError>;

    fn delete_column(&mut self, column_id: &ColumnId) -> Result<(), StoreError>;

    /// Replaces the options with `patch` applied, validating the result.
    fn set_options(&mut self, patch: &OptionsPatch) -> Result<(), StoreError>;

    /// Flips a row's selection. Returns whether it is now selected.
    fn toggle_row_selection(&mut self, row_id: &RowId) -> Result<bool, StoreError>;

    /// Flips a column's selection. Returns whether it is now selected.
    fn toggle_column_selection(&mut self, column_id: &ColumnId) -> Result<bool, StoreError>;

    /// Selects every row of a table, or clears them all if every row is
    /// already selected. Returns whether all rows are now selected.
    fn toggle_select_all(&mut self, table_id: &TableId) -> Result<bool, StoreError>;

    /// Selection state of one table, derived fresh on every call.
    fn selection(&self, table_id: &TableId) -> TableSelection;

    /// Writes a value to a row/column pair, creating the cell if needed.
    fn set_cell_value(&mut self, row_id: &RowId, column_id: &ColumnId, value: Value) -> Result<CellId, StoreError> {
        match self.cell(row_id, column_id) {
            Some(cell) => {
                self.update_cell(&cell.id, value)?;
                Ok(cell.id)
            }
            None => self.create_cell(row_id, column_id, value),
        }
    }
}
