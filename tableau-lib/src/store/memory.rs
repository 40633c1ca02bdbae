use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use log::debug;
use log::warn;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::Selection;
use super::TableSelection;
use super::TableStore;
use crate::config::ColumnSpec;
use crate::config::OptionsPatch;
use crate::config::TableOptions;
use crate::error::StorageError;
use crate::error::StoreError;
use crate::error::ValidationError;
use crate::model::Cell;
use crate::model::CellId;
use crate::model::Column;
use crate::model::ColumnConfig;
use crate::model::ColumnId;
use crate::model::Row;
use crate::model::RowId;
use crate::model::Table;
use crate::model::TableId;
use crate::model::Value;
use crate::storage::CELLS_KEY;
use crate::storage::COLUMNS_KEY;
use crate::storage::KeyValueStorage;
use crate::storage::OPTIONS_KEY;
use crate::storage::ROWS_KEY;
use crate::storage::TABLES_KEY;
use crate::types::TypeRegistry;

/// Partial update for [`MemoryStore::update_column`]. `None` leaves a field
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnUpdate {
    pub name: Option<String>,
    pub width: Option<f64>,
    pub required: Option<bool>,
    pub readonly: Option<bool>,
    pub config: Option<ColumnConfig>,
}

/// In-memory table store using normalized cell records.
///
/// Cells are kept out of line and indexed by `(row, column)`, so a row with
/// no cell for a column simply has no entry. Column configs are checked
/// against the schema of their type in `registry` whenever a column is
/// added, updated or loaded.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    tables: HashMap<TableId, Table>,
    columns: HashMap<ColumnId, Column>,
    rows: HashMap<RowId, Row>,
    cells: HashMap<CellId, Cell>,
    cell_index: HashMap<(RowId, ColumnId), CellId>,
    selection: Selection,
    options: TableOptions,
    registry: Arc<TypeRegistry>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_registry(Arc::new(TypeRegistry::with_builtins()))
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store checking columns against `registry`, usually
    /// [`Configuration::shared_registry`](crate::config::Configuration::shared_registry).
    pub fn with_registry(registry: Arc<TypeRegistry>) -> Self {
        Self {
            tables: HashMap::new(),
            columns: HashMap::new(),
            rows: HashMap::new(),
            cells: HashMap::new(),
            cell_index: HashMap::new(),
            selection: Selection::default(),
            options: TableOptions::default(),
            registry,
        }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn with_options(options: TableOptions) -> Result<Self, ValidationError> {
        options.validate()?;
        Ok(Self {
            options,
            ..Self::default()
        })
    }

    /// All tables, oldest first.
    pub fn tables(&self) -> Vec<Table> {
        let mut tables: Vec<Table> = self.tables.values().cloned().collect();
        tables.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        tables
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn create_table(&mut self, name: impl Into<String>) -> Result<TableId, StoreError> {
        let table = Table::new(TableId::generate(), name)?;
        let id = table.id.clone();
        debug!("Created table {} ({})", table.name, id);
        self.tables.insert(id.clone(), table);
        Ok(id)
    }

    pub fn rename_table(&mut self, table_id: &TableId, name: impl Into<String>) -> Result<(), StoreError> {
        let renamed = self.require_table(table_id)?.renamed(name)?;
        self.tables.insert(table_id.clone(), renamed);
        Ok(())
    }

    /// Deletes a table with all of its columns, rows and cells.
    pub fn delete_table(&mut self, table_id: &TableId) -> Result<(), StoreError> {
        self.require_table(table_id)?;
        for row_id in self.ordered_row_ids(table_id) {
            self.remove_row_records(&row_id);
        }
        for column_id in self.ordered_column_ids(table_id) {
            self.remove_column_records(&column_id);
        }
        self.tables.remove(table_id);
        debug!("Deleted table {table_id}");
        Ok(())
    }

    /// Applies a partial update to a column. The updated column must still
    /// pass entity validation and its type's config schema; otherwise nothing
    /// changes.
    pub fn update_column(&mut self, column_id: &ColumnId, update: ColumnUpdate) -> Result<(), StoreError> {
        let mut column = self
            .columns
            .get(column_id)
            .cloned()
            .ok_or_else(|| StoreError::ColumnNotFound(column_id.clone()))?;
        if let Some(name) = update.name {
            column.name = name;
        }
        if let Some(width) = update.width {
            column.width = width;
        }
        if let Some(required) = update.required {
            column.required = required;
        }
        if let Some(readonly) = update.readonly {
            column.readonly = readonly;
        }
        if let Some(config) = update.config {
            column.config = config;
        }
        self.check_column(&column)?;
        let table_id = column.table_id.clone();
        self.columns.insert(column_id.clone(), column);
        self.touch_table(&table_id);
        Ok(())
    }

    /// Sets column order. `order` must name every column of the table
    /// exactly once.
    pub fn reorder_columns(&mut self, table_id: &TableId, order: &[ColumnId]) -> Result<(), StoreError> {
        self.require_table(table_id)?;
        let current: HashSet<&ColumnId> = self
            .columns
            .values()
            .filter(|c| &c.table_id == table_id)
            .map(|c| &c.id)
            .collect();
        if !is_permutation(&current, order) {
            return Err(StoreError::ReorderMismatch {
                table: table_id.clone(),
                kind: "columns",
                expected: current.len(),
            });
        }
        for (position, id) in order.iter().enumerate() {
            if let Some(column) = self.columns.get_mut(id) {
                column.position = position;
            }
        }
        self.touch_table(table_id);
        Ok(())
    }

    /// Sets row order. `order` must name every row of the table exactly once.
    pub fn reorder_rows(&mut self, table_id: &TableId, order: &[RowId]) -> Result<(), StoreError> {
        self.require_table(table_id)?;
        let current: HashSet<&RowId> = self
            .rows
            .values()
            .filter(|r| &r.table_id == table_id)
            .map(|r| &r.id)
            .collect();
        if !is_permutation(&current, order) {
            return Err(StoreError::ReorderMismatch {
                table: table_id.clone(),
                kind: "rows",
                expected: current.len(),
            });
        }
        for (position, id) in order.iter().enumerate() {
            if let Some(row) = self.rows.get_mut(id) {
                row.position = position;
            }
        }
        Ok(())
    }

    /// Appends `count` empty rows.
    pub fn add_rows(&mut self, table_id: &TableId, count: usize) -> Result<Vec<RowId>, StoreError> {
        self.require_table(table_id)?;
        (0..count).map(|_| self.create_row(table_id)).collect()
    }

    pub fn toggle_cell_selection(&mut self, cell_id: &CellId) -> Result<bool, StoreError> {
        if !self.cells.contains_key(cell_id) {
            return Err(StoreError::CellNotFound(cell_id.clone()));
        }
        Ok(self.selection.toggle_cell(cell_id))
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Writes every collection to `storage`. Selection is session state and
    /// is not persisted.
    pub fn save<K: KeyValueStorage + ?Sized>(&self, storage: &mut K) -> Result<(), StorageError> {
        let mut columns: Vec<&Column> = self.columns.values().collect();
        columns.sort_by(|a, b| (&a.table_id, a.position).cmp(&(&b.table_id, b.position)));
        let mut rows: Vec<&Row> = self.rows.values().collect();
        rows.sort_by(|a, b| (&a.table_id, a.position).cmp(&(&b.table_id, b.position)));
        let mut cells: Vec<&Cell> = self.cells.values().collect();
        cells.sort_by(|a, b| a.id.cmp(&b.id));

        write(storage, TABLES_KEY, &self.tables())?;
        write(storage, COLUMNS_KEY, &columns)?;
        write(storage, ROWS_KEY, &rows)?;
        write(storage, CELLS_KEY, &cells)?;
        write(storage, OPTIONS_KEY, &self.options)?;
        debug!(
            "Saved {} tables, {} columns, {} rows, {} cells",
            self.tables.len(),
            columns.len(),
            rows.len(),
            cells.len()
        );
        Ok(())
    }

    /// Rebuilds a store from `storage`, checking columns against the
    /// built-in types.
    pub fn load<K: KeyValueStorage + ?Sized>(storage: &K) -> Result<Self, StorageError> {
        Self::load_with_registry(storage, Arc::new(TypeRegistry::with_builtins()))
    }

    /// Rebuilds a store from `storage`. Missing keys load as empty.
    ///
    /// Records failing entity validation, or columns whose config breaks
    /// their type's schema, make the load fail. Records that reference a
    /// missing parent are dropped with a warning, and positions are
    /// renumbered densely.
    pub fn load_with_registry<K: KeyValueStorage + ?Sized>(
        storage: &K,
        registry: Arc<TypeRegistry>,
    ) -> Result<Self, StorageError> {
        let mut store = Self::with_registry(registry);

        if let Some(options) = read::<TableOptions, K>(storage, OPTIONS_KEY)? {
            options.validate().map_err(|e| corrupt(OPTIONS_KEY, e))?;
            store.options = options;
        }

        for table in read::<Vec<Table>, K>(storage, TABLES_KEY)?.unwrap_or_default() {
            table.validate().map_err(|e| corrupt(TABLES_KEY, e))?;
            store.tables.insert(table.id.clone(), table);
        }

        for column in read::<Vec<Column>, K>(storage, COLUMNS_KEY)?.unwrap_or_default() {
            store.check_column(&column).map_err(|e| corrupt(COLUMNS_KEY, e))?;
            if !store.tables.contains_key(&column.table_id) {
                warn!("Dropping column {} of missing table {}", column.id, column.table_id);
                continue;
            }
            store.columns.insert(column.id.clone(), column);
        }

        for row in read::<Vec<Row>, K>(storage, ROWS_KEY)?.unwrap_or_default() {
            if !store.tables.contains_key(&row.table_id) {
                warn!("Dropping row {} of missing table {}", row.id, row.table_id);
                continue;
            }
            store.rows.insert(row.id.clone(), row);
        }

        for cell in read::<Vec<Cell>, K>(storage, CELLS_KEY)?.unwrap_or_default() {
            let (Some(row), Some(column)) = (store.rows.get(&cell.row_id), store.columns.get(&cell.column_id)) else {
                warn!("Dropping orphaned cell {}", cell.id);
                continue;
            };
            if row.table_id != column.table_id {
                warn!("Dropping cell {} spanning two tables", cell.id);
                continue;
            }
            let key = (cell.row_id.clone(), cell.column_id.clone());
            if store.cell_index.contains_key(&key) {
                warn!("Dropping duplicate cell {}", cell.id);
                continue;
            }
            store.cell_index.insert(key, cell.id.clone());
            store.cells.insert(cell.id.clone(), cell);
        }

        let table_ids: Vec<TableId> = store.tables.keys().cloned().collect();
        for table_id in &table_ids {
            store.renumber_columns(table_id);
            store.renumber_rows(table_id);
        }
        debug!(
            "Loaded {} tables, {} columns, {} rows, {} cells",
            store.tables.len(),
            store.columns.len(),
            store.rows.len(),
            store.cells.len()
        );
        Ok(store)
    }

    /// Entity rules, then the config schema of the column's type. Columns of
    /// unregistered types only get the entity rules.
    fn check_column(&self, column: &Column) -> Result<(), ValidationError> {
        column.validate()?;
        match self.registry.get(&column.column_type) {
            Some(definition) => definition.validate_config(&column.config),
            None => Ok(()),
        }
    }

    fn require_table(&self, table_id: &TableId) -> Result<&Table, StoreError> {
        self.tables
            .get(table_id)
            .ok_or_else(|| StoreError::TableNotFound(table_id.clone()))
    }

    fn require_row(&self, row_id: &RowId) -> Result<&Row, StoreError> {
        self.rows
            .get(row_id)
            .ok_or_else(|| StoreError::RowNotFound(row_id.clone()))
    }

    fn require_column(&self, column_id: &ColumnId) -> Result<&Column, StoreError> {
        self.columns
            .get(column_id)
            .ok_or_else(|| StoreError::ColumnNotFound(column_id.clone()))
    }

    /// Replaces the table record with one carrying a fresh `updated_at`.
    fn touch_table(&mut self, table_id: &TableId) {
        if let Some(table) = self.tables.get(table_id) {
            let touched = Table {
                updated_at: Utc::now(),
                ..table.clone()
            };
            self.tables.insert(table_id.clone(), touched);
        }
    }

    fn ordered_column_ids(&self, table_id: &TableId) -> Vec<ColumnId> {
        let mut columns: Vec<&Column> = self
            .columns
            .values()
            .filter(|c| &c.table_id == table_id)
            .collect();
        columns.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id)));
        columns.into_iter().map(|c| c.id.clone()).collect()
    }

    fn ordered_row_ids(&self, table_id: &TableId) -> Vec<RowId> {
        let mut rows: Vec<&Row> = self
            .rows
            .values()
            .filter(|r| &r.table_id == table_id)
            .collect();
        rows.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then_with(|| a.created_at.cmp(&b.created_at))
                .then_with(|| a.id.cmp(&b.id))
        });
        rows.into_iter().map(|r| r.id.clone()).collect()
    }

    fn renumber_columns(&mut self, table_id: &TableId) {
        for (position, id) in self.ordered_column_ids(table_id).iter().enumerate() {
            if let Some(column) = self.columns.get_mut(id) {
                column.position = position;
            }
        }
    }

    fn renumber_rows(&mut self, table_id: &TableId) {
        for (position, id) in self.ordered_row_ids(table_id).iter().enumerate() {
            if let Some(row) = self.rows.get_mut(id) {
                row.position = position;
            }
        }
    }

    /// Removes a row, its cells and its selection membership without
    /// renumbering siblings.
    fn remove_row_records(&mut self, row_id: &RowId) -> Option<Row> {
        let row = self.rows.remove(row_id)?;
        self.remove_cells(|cell| &cell.row_id == row_id);
        self.selection.remove_row(row_id);
        Some(row)
    }

    fn remove_column_records(&mut self, column_id: &ColumnId) -> Option<Column> {
        let column = self.columns.remove(column_id)?;
        self.remove_cells(|cell| &cell.column_id == column_id);
        self.selection.remove_column(column_id);
        Some(column)
    }

    fn remove_cells(&mut self, doomed_if: impl Fn(&Cell) -> bool) {
        let doomed: Vec<CellId> = self
            .cells
            .values()
            .filter(|cell| doomed_if(cell))
            .map(|cell| cell.id.clone())
            .collect();
        for id in doomed {
            if let Some(cell) = self.cells.remove(&id) {
                self.cell_index.remove(&(cell.row_id, cell.column_id));
            }
            self.selection.remove_cell(&id);
        }
    }

    fn insert_cell(&mut self, cell: Cell) -> CellId {
        let id = cell.id.clone();
        self.cell_index
            .insert((cell.row_id.clone(), cell.column_id.clone()), id.clone());
        self.cells.insert(id.clone(), cell);
        id
    }
}

impl TableStore for MemoryStore {
    fn table(&self, table_id: &TableId) -> Option<Table> {
        self.tables.get(table_id).cloned()
    }

    fn table_columns(&self, table_id: &TableId) -> Vec<Column> {
        self.ordered_column_ids(table_id)
            .iter()
            .filter_map(|id| self.columns.get(id).cloned())
            .collect()
    }

    fn table_rows(&self, table_id: &TableId) -> Vec<Row> {
        self.ordered_row_ids(table_id)
            .iter()
            .filter_map(|id| self.row(id))
            .collect()
    }

    fn column(&self, column_id: &ColumnId) -> Option<Column> {
        self.columns.get(column_id).cloned()
    }

    fn row(&self, row_id: &RowId) -> Option<Row> {
        self.rows.get(row_id).map(|row| Row {
            selected: self.selection.is_row_selected(row_id),
            ..row.clone()
        })
    }

    fn cell(&self, row_id: &RowId, column_id: &ColumnId) -> Option<Cell> {
        let id = self.cell_index.get(&(row_id.clone(), column_id.clone()))?;
        self.cells.get(id).cloned()
    }

    fn options(&self) -> &TableOptions {
        &self.options
    }

    fn create_cell(&mut self, row_id: &RowId, column_id: &ColumnId, value: Value) -> Result<CellId, StoreError> {
        let row_table = self.require_row(row_id)?.table_id.clone();
        let column = self.require_column(column_id)?;
        if column.table_id != row_table {
            return Err(StoreError::ColumnNotFound(column_id.clone()));
        }
        if let Some(existing) = self.cell_index.get(&(row_id.clone(), column_id.clone())) {
            let existing = existing.clone();
            self.update_cell(&existing, value)?;
            return Ok(existing);
        }
        let cell = Cell::new(CellId::generate(), row_id.clone(), column_id.clone(), value);
        Ok(self.insert_cell(cell))
    }

    fn update_cell(&mut self, cell_id: &CellId, value: Value) -> Result<(), StoreError> {
        let cell = self
            .cells
            .get(cell_id)
            .ok_or_else(|| StoreError::CellNotFound(cell_id.clone()))?
            .with_value(value);
        self.cells.insert(cell_id.clone(), cell);
        Ok(())
    }

    fn create_row(&mut self, table_id: &TableId) -> Result<RowId, StoreError> {
        self.require_table(table_id)?;
        let position = self.rows.values().filter(|r| &r.table_id == table_id).count();
        let row = Row::new(RowId::generate(), table_id.clone(), position);
        let id = row.id.clone();
        self.rows.insert(id.clone(), row);
        debug!("Created row {id} at {position} in {table_id}");
        Ok(id)
    }

    fn duplicate_row(&mut self, row_id: &RowId) -> Result<RowId, StoreError> {
        let table_id = self.require_row(row_id)?.table_id.clone();
        let copy_id = self.create_row(&table_id)?;
        let copies: Vec<Cell> = self
            .cells
            .values()
            .filter(|cell| &cell.row_id == row_id)
            .map(|cell| Cell::new(CellId::generate(), copy_id.clone(), cell.column_id.clone(), cell.value.clone()))
            .collect();
        for cell in copies {
            self.insert_cell(cell);
        }
        debug!("Duplicated row {row_id} as {copy_id}");
        Ok(copy_id)
    }

    fn delete_row(&mut self, row_id: &RowId) -> Result<(), StoreError> {
        let row = self
            .remove_row_records(row_id)
            .ok_or_else(|| StoreError::RowNotFound(row_id.clone()))?;
        self.renumber_rows(&row.table_id);
        debug!("Deleted row {row_id}");
        Ok(())
    }

    fn add_column(&mut self, table_id: &TableId, spec: ColumnSpec) -> Result<ColumnId, StoreError> {
        self.require_table(table_id)?;
        let position = self.columns.values().filter(|c| &c.table_id == table_id).count();
        let column = spec.build(ColumnId::generate(), table_id.clone(), position)?;
        self.check_column(&column)?;
        let id = column.id.clone();
        debug!("Added {} column {} to {table_id}", column.column_type, column.name);
        self.columns.insert(id.clone(), column);
        self.touch_table(table_id);
        Ok(id)
    }

    fn delete_column(&mut self, column_id: &ColumnId) -> Result<(), StoreError> {
        let column = self
            .remove_column_records(column_id)
            .ok_or_else(|| StoreError::ColumnNotFound(column_id.clone()))?;
        self.renumber_columns(&column.table_id);
        self.touch_table(&column.table_id);
        debug!("Deleted column {column_id}");
        Ok(())
    }

    fn set_options(&mut self, patch: &OptionsPatch) -> Result<(), StoreError> {
        self.options = self.options.merged(patch)?;
        Ok(())
    }

    fn toggle_row_selection(&mut self, row_id: &RowId) -> Result<bool, StoreError> {
        self.require_row(row_id)?;
        Ok(self.selection.toggle_row(row_id))
    }

    fn toggle_column_selection(&mut self, column_id: &ColumnId) -> Result<bool, StoreError> {
        self.require_column(column_id)?;
        Ok(self.selection.toggle_column(column_id))
    }

    fn toggle_select_all(&mut self, table_id: &TableId) -> Result<bool, StoreError> {
        self.require_table(table_id)?;
        let rows = self.ordered_row_ids(table_id);
        if self.selection.snapshot(&rows, [], []).is_all_selected {
            self.selection.deselect_rows(&rows);
            Ok(false)
        } else {
            self.selection.select_rows(&rows);
            Ok(!rows.is_empty())
        }
    }

    fn selection(&self, table_id: &TableId) -> TableSelection {
        let rows = self.ordered_row_ids(table_id);
        let row_set: HashSet<&RowId> = rows.iter().collect();
        let columns = self
            .columns
            .values()
            .filter(|c| &c.table_id == table_id)
            .map(|c| &c.id);
        let cells = self
            .cells
            .values()
            .filter(|cell| row_set.contains(&cell.row_id))
            .map(|cell| &cell.id);
        self.selection.snapshot(&rows, columns, cells)
    }
}

fn is_permutation<T: Eq + std::hash::Hash>(current: &HashSet<&T>, order: &[T]) -> bool {
    let given: HashSet<&T> = order.iter().collect();
    given.len() == order.len() && &given == current
}

fn corrupt(key: &str, error: ValidationError) -> StorageError {
    StorageError::Corrupt {
        key: key.to_string(),
        message: error.to_string(),
    }
}

fn write<K, T>(storage: &mut K, key: &str, value: &T) -> Result<(), StorageError>
where
    K: KeyValueStorage + ?Sized,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string_pretty(value).map_err(|e| StorageError::serde(key, e))?;
    storage.set(key, &json)
}

fn read<T, K>(storage: &K, key: &str) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
    K: KeyValueStorage + ?Sized,
{
    match storage.get(key)? {
        Some(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| StorageError::serde(key, e)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NumberConfig;
    use crate::storage::MemoryStorage;
    use crate::types::TextType;

    fn store_with_table() -> (MemoryStore, TableId) {
        let mut store = MemoryStore::new();
        let table = store.create_table("People").unwrap();
        (store, table)
    }

    fn positions(rows: &[Row]) -> Vec<usize> {
        rows.iter().map(|r| r.position).collect()
    }

    #[test]
    fn test_create_table_rejects_empty_name() {
        let mut store = MemoryStore::new();
        let err = store.create_table("  ").unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_rename_replaces_record() {
        let (mut store, table) = store_with_table();
        let before = store.table(&table).unwrap();
        store.rename_table(&table, "Staff").unwrap();
        let after = store.table(&table).unwrap();
        assert_eq!(after.name, "Staff");
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at >= before.updated_at);
        assert_eq!(before.name, "People");
    }

    #[test]
    fn test_rows_append_in_order() {
        let (mut store, table) = store_with_table();
        let ids = store.add_rows(&table, 3).unwrap();
        let rows = store.table_rows(&table);
        assert_eq!(rows.iter().map(|r| r.id.clone()).collect::<Vec<_>>(), ids);
        assert_eq!(positions(&rows), vec![0, 1, 2]);
    }

    #[test]
    fn test_delete_row_renumbers_and_cascades() {
        let (mut store, table) = store_with_table();
        let column = store.add_column(&table, ColumnSpec::text("Name")).unwrap();
        let ids = store.add_rows(&table, 3).unwrap();
        let cell = store.create_cell(&ids[1], &column, Value::from("x")).unwrap();
        store.toggle_row_selection(&ids[1]).unwrap();
        store.toggle_cell_selection(&cell).unwrap();

        store.delete_row(&ids[1]).unwrap();

        let rows = store.table_rows(&table);
        assert_eq!(positions(&rows), vec![0, 1]);
        assert_eq!(rows[1].id, ids[2]);
        assert!(store.cell(&ids[1], &column).is_none());
        let selection = store.selection(&table);
        assert!(selection.selected_rows.is_empty());
        assert!(selection.selected_cells.is_empty());
    }

    #[test]
    fn test_delete_column_renumbers_and_cascades() {
        let (mut store, table) = store_with_table();
        let a = store.add_column(&table, ColumnSpec::text("A")).unwrap();
        let b = store.add_column(&table, ColumnSpec::number("B")).unwrap();
        let c = store.add_column(&table, ColumnSpec::boolean("C")).unwrap();
        let row = store.create_row(&table).unwrap();
        store.create_cell(&row, &a, Value::from("keep")).unwrap();
        store.create_cell(&row, &b, Value::Number(1.0)).unwrap();
        store.toggle_column_selection(&b).unwrap();

        store.delete_column(&b).unwrap();

        let columns = store.table_columns(&table);
        assert_eq!(columns.iter().map(|c| c.id.clone()).collect::<Vec<_>>(), vec![a.clone(), c]);
        assert_eq!(columns.iter().map(|c| c.position).collect::<Vec<_>>(), vec![0, 1]);
        assert!(store.cell(&row, &b).is_none());
        assert!(store.cell(&row, &a).is_some());
        assert!(store.selection(&table).selected_columns.is_empty());
    }

    #[test]
    fn test_create_cell_twice_updates() {
        let (mut store, table) = store_with_table();
        let column = store.add_column(&table, ColumnSpec::text("Name")).unwrap();
        let row = store.create_row(&table).unwrap();
        let first = store.create_cell(&row, &column, Value::from("a")).unwrap();
        let second = store.create_cell(&row, &column, Value::from("b")).unwrap();
        assert_eq!(first, second);
        assert_eq!(store.cell(&row, &column).unwrap().value, Value::from("b"));
    }

    #[test]
    fn test_cell_requires_same_table() {
        let (mut store, table) = store_with_table();
        let other = store.create_table("Other").unwrap();
        let column = store.add_column(&other, ColumnSpec::text("Name")).unwrap();
        let row = store.create_row(&table).unwrap();
        assert_eq!(
            store.create_cell(&row, &column, Value::Null),
            Err(StoreError::ColumnNotFound(column))
        );
    }

    #[test]
    fn test_duplicate_row_copies_cells() {
        let (mut store, table) = store_with_table();
        let column = store.add_column(&table, ColumnSpec::text("Name")).unwrap();
        let ids = store.add_rows(&table, 2).unwrap();
        store.create_cell(&ids[0], &column, Value::from("Alice")).unwrap();

        let copy = store.duplicate_row(&ids[0]).unwrap();

        let rows = store.table_rows(&table);
        assert_eq!(rows.last().unwrap().id, copy);
        assert_eq!(rows.last().unwrap().position, 2);
        let original = store.cell(&ids[0], &column).unwrap();
        let copied = store.cell(&copy, &column).unwrap();
        assert_eq!(copied.value, original.value);
        assert_ne!(copied.id, original.id);
    }

    #[test]
    fn test_add_column_checks_type_schema() {
        let (mut store, table) = store_with_table();
        let err = store
            .add_column(&table, ColumnSpec::number("Age").min(10.0).max(1.0))
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        let err = store
            .add_column(&table, ColumnSpec::number("Age").placeholder("x"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(store.table_columns(&table).is_empty());

        // Unregistered types only get the entity rules.
        store
            .add_column(&table, ColumnSpec::custom("rating", "Stars"))
            .unwrap();
    }

    #[test]
    fn test_update_column_checks_type_schema() {
        let (mut store, table) = store_with_table();
        let column = store.add_column(&table, ColumnSpec::number("Age")).unwrap();
        let update = ColumnUpdate {
            config: Some(ColumnSpec::number("x").min(5.0).max(1.0).config),
            ..ColumnUpdate::default()
        };
        assert!(store.update_column(&column, update).is_err());
        assert_eq!(
            store.column(&column).unwrap().config.as_number(),
            Some(&NumberConfig::default())
        );
    }

    #[test]
    fn test_registry_decides_schema() {
        let mut registry = TypeRegistry::new();
        registry.register(TextType);
        let mut store = MemoryStore::with_registry(Arc::new(registry));
        let table = store.create_table("T").unwrap();
        // "number" is unknown here, so its config is not checked.
        store
            .add_column(&table, ColumnSpec::number("Age").min(10.0).max(1.0))
            .unwrap();
        assert!(store.add_column(&table, ColumnSpec::text("Name").min(1.0)).is_err());
    }

    #[test]
    fn test_update_column_validates() {
        let (mut store, table) = store_with_table();
        let column = store.add_column(&table, ColumnSpec::text("Name")).unwrap();
        let update = ColumnUpdate {
            width: Some(20.0),
            ..ColumnUpdate::default()
        };
        assert!(store.update_column(&column, update).is_err());
        assert_eq!(store.column(&column).unwrap().width, 200.0);

        let update = ColumnUpdate {
            name: Some("Full name".to_string()),
            readonly: Some(true),
            ..ColumnUpdate::default()
        };
        store.update_column(&column, update).unwrap();
        let column = store.column(&column).unwrap();
        assert_eq!(column.name, "Full name");
        assert!(column.readonly);
    }

    #[test]
    fn test_reorder_rows_requires_permutation() {
        let (mut store, table) = store_with_table();
        let ids = store.add_rows(&table, 3).unwrap();
        let err = store.reorder_rows(&table, &ids[..2]).unwrap_err();
        assert!(matches!(err, StoreError::ReorderMismatch { expected: 3, .. }));
        let dup = vec![ids[0].clone(), ids[0].clone(), ids[1].clone()];
        assert!(store.reorder_rows(&table, &dup).is_err());

        let reversed: Vec<RowId> = ids.iter().rev().cloned().collect();
        store.reorder_rows(&table, &reversed).unwrap();
        let rows = store.table_rows(&table);
        assert_eq!(rows.iter().map(|r| r.id.clone()).collect::<Vec<_>>(), reversed);
    }

    #[test]
    fn test_reorder_columns() {
        let (mut store, table) = store_with_table();
        let a = store.add_column(&table, ColumnSpec::text("A")).unwrap();
        let b = store.add_column(&table, ColumnSpec::text("B")).unwrap();
        store.reorder_columns(&table, &[b.clone(), a.clone()]).unwrap();
        let names: Vec<String> = store.table_columns(&table).into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_select_all_then_delete_recomputes() {
        let (mut store, table) = store_with_table();
        let ids = store.add_rows(&table, 3).unwrap();
        assert!(store.toggle_select_all(&table).unwrap());
        assert!(store.selection(&table).is_all_selected);

        store.toggle_row_selection(&ids[0]).unwrap();
        assert!(!store.selection(&table).is_all_selected);

        // Removing the only unselected row leaves everything selected.
        store.delete_row(&ids[0]).unwrap();
        assert!(store.selection(&table).is_all_selected);

        store.create_row(&table).unwrap();
        assert!(!store.selection(&table).is_all_selected);
    }

    #[test]
    fn test_toggle_select_all_clears_when_full() {
        let (mut store, table) = store_with_table();
        store.add_rows(&table, 2).unwrap();
        assert!(store.toggle_select_all(&table).unwrap());
        assert!(!store.toggle_select_all(&table).unwrap());
        assert!(store.selection(&table).selected_rows.is_empty());
    }

    #[test]
    fn test_select_all_on_empty_table() {
        let (mut store, table) = store_with_table();
        assert!(!store.toggle_select_all(&table).unwrap());
        assert!(!store.selection(&table).is_all_selected);
    }

    #[test]
    fn test_rows_report_selection() {
        let (mut store, table) = store_with_table();
        let row = store.create_row(&table).unwrap();
        assert!(!store.row(&row).unwrap().selected);
        store.toggle_row_selection(&row).unwrap();
        assert!(store.row(&row).unwrap().selected);
        assert!(store.table_rows(&table)[0].selected);
    }

    #[test]
    fn test_set_options_rejects_inconsistent_patch() {
        let mut store = MemoryStore::new();
        let patch = OptionsPatch {
            min_column_width: Some(500.0),
            ..OptionsPatch::default()
        };
        assert!(store.set_options(&patch).is_err());
        assert_eq!(store.options(), &TableOptions::default());

        let patch = OptionsPatch {
            striped: Some(true),
            ..OptionsPatch::default()
        };
        store.set_options(&patch).unwrap();
        assert!(store.options().striped);
    }

    #[test]
    fn test_delete_table_cascades() {
        let (mut store, table) = store_with_table();
        let column = store.add_column(&table, ColumnSpec::text("A")).unwrap();
        let row = store.create_row(&table).unwrap();
        store.create_cell(&row, &column, Value::from("x")).unwrap();
        store.delete_table(&table).unwrap();
        assert!(store.is_empty());
        assert!(store.column(&column).is_none());
        assert!(store.row(&row).is_none());
        assert!(store.cell(&row, &column).is_none());
        assert!(matches!(
            store.create_row(&table),
            Err(StoreError::TableNotFound(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let (mut store, table) = store_with_table();
        let column = store.add_column(&table, ColumnSpec::number("Age")).unwrap();
        let row = store.create_row(&table).unwrap();
        store.create_cell(&row, &column, Value::Number(28.0)).unwrap();
        store.toggle_row_selection(&row).unwrap();

        let mut storage = MemoryStorage::new();
        store.save(&mut storage).unwrap();
        let loaded = MemoryStore::load(&storage).unwrap();

        assert_eq!(loaded.tables(), store.tables());
        assert_eq!(loaded.table_columns(&table), store.table_columns(&table));
        assert_eq!(loaded.cell(&row, &column), store.cell(&row, &column));
        // Selection is not persisted.
        assert!(!loaded.row(&row).unwrap().selected);
    }

    #[test]
    fn test_load_empty_storage() {
        let loaded = MemoryStore::load(&MemoryStorage::new()).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_drops_orphans() {
        let (mut store, table) = store_with_table();
        let column = store.add_column(&table, ColumnSpec::text("A")).unwrap();
        let row = store.create_row(&table).unwrap();
        store.create_cell(&row, &column, Value::from("x")).unwrap();
        let mut storage = MemoryStorage::new();
        store.save(&mut storage).unwrap();
        storage.set(ROWS_KEY, "[]").unwrap();

        let loaded = MemoryStore::load(&storage).unwrap();
        assert!(loaded.cell(&row, &column).is_none());
        assert_eq!(loaded.table_columns(&table).len(), 1);
    }

    #[test]
    fn test_load_rejects_invalid_column() {
        let (mut store, table) = store_with_table();
        store.add_column(&table, ColumnSpec::text("A")).unwrap();
        let mut storage = MemoryStorage::new();
        store.save(&mut storage).unwrap();
        let columns = storage.get(COLUMNS_KEY).unwrap().unwrap();
        storage
            .set(COLUMNS_KEY, &columns.replace("200.0", "5.0"))
            .unwrap();
        assert!(matches!(
            MemoryStore::load(&storage),
            Err(StorageError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_load_rejects_column_breaking_type_schema() {
        let (mut store, table) = store_with_table();
        store.add_column(&table, ColumnSpec::number("Age").min(0.0).max(10.0)).unwrap();
        let mut storage = MemoryStorage::new();
        store.save(&mut storage).unwrap();
        let columns = storage.get(COLUMNS_KEY).unwrap().unwrap();
        storage
            .set(COLUMNS_KEY, &columns.replace("\"min\":0.0", "\"min\":50.0"))
            .unwrap();
        assert!(matches!(
            MemoryStore::load(&storage),
            Err(StorageError::Corrupt { key, .. }) if key == COLUMNS_KEY
        ));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let mut storage = MemoryStorage::new();
        storage.set(TABLES_KEY, "{not json").unwrap();
        assert!(matches!(
            MemoryStore::load(&storage),
            Err(StorageError::Serde { .. })
        ));
    }
}
