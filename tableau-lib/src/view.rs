//! Read-side composition of store, configuration and edit state
//!
//! [`TableView`] is what a host UI walks when drawing a table: ordered
//! columns and rows, per-cell values with type defaults filled in, column
//! widths and rendered cell descriptions.

use crate::config::Configuration;
use crate::edit::CellEditor;
use crate::model::Column;
use crate::model::Row;
use crate::model::RowId;
use crate::model::Table;
use crate::model::TableId;
use crate::model::Value;
use crate::render::RenderedCell;
use crate::sizing::ColumnData;
use crate::sizing::ColumnWidths;
use crate::sizing::calculate_column_widths;
use crate::store::TableSelection;
use crate::store::TableStore;

/// Borrowed view of one table.
pub struct TableView<'a, S: TableStore + ?Sized> {
    config: &'a Configuration,
    store: &'a S,
    table_id: &'a TableId,
}

impl<'a, S: TableStore + ?Sized> TableView<'a, S> {
    pub fn new(config: &'a Configuration, store: &'a S, table_id: &'a TableId) -> Self {
        Self {
            config,
            store,
            table_id,
        }
    }

    pub fn table(&self) -> Option<Table> {
        self.store.table(self.table_id)
    }

    pub fn columns(&self) -> Vec<Column> {
        self.store.table_columns(self.table_id)
    }

    pub fn rows(&self) -> Vec<Row> {
        self.store.table_rows(self.table_id)
    }

    /// The committed value of a cell, or the column type's default when no
    /// cell exists yet.
    pub fn cell_value(&self, row_id: &RowId, column: &Column) -> Value {
        match self.store.cell(row_id, &column.id) {
            Some(cell) => cell.value,
            None => self.config.default_value(&column.column_type),
        }
    }

    pub fn display_text(&self, row_id: &RowId, column: &Column) -> String {
        self.config
            .display_value(&self.cell_value(row_id, column), column)
    }

    /// Allocates widths for every column from their display strings.
    pub fn column_widths(&self, container_width: f64) -> ColumnWidths {
        let columns = self.columns();
        let rows = self.rows();
        let values: Vec<Vec<String>> = columns
            .iter()
            .map(|column| {
                rows.iter()
                    .map(|row| self.display_text(&row.id, column))
                    .collect()
            })
            .collect();
        let data: Vec<ColumnData<'_>> = columns
            .iter()
            .zip(&values)
            .map(|(column, values)| ColumnData::new(column, values))
            .collect();
        calculate_column_widths(&data, &self.config.sizing_config(container_width))
    }

    /// Describes how to draw a cell. `editor` only affects the result when
    /// it targets this cell.
    pub fn render_cell(&self, row_id: &RowId, column: &Column, editor: Option<&CellEditor>) -> RenderedCell {
        let value = self.cell_value(row_id, column);
        let staged = editor
            .filter(|e| e.row_id() == row_id && e.column_id() == &column.id)
            .and_then(CellEditor::staged);
        self.config.render_cell(column, &value, staged)
    }

    pub fn selection(&self) -> TableSelection {
        self.store.selection(self.table_id)
    }

    pub fn row_height(&self) -> u16 {
        self.config.options().density.row_height()
    }
}
