//! Selection state
//!
//! Selection is tracked by id so it stays stable while rows and columns are
//! added or removed. "Everything selected" is never stored; it is derived
//! from the row set whenever a [`TableSelection`] is taken.

use std::collections::HashSet;

use crate::model::CellId;
use crate::model::ColumnId;
use crate::model::RowId;

/// Mutable selection sets held by a store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    rows: HashSet<RowId>,
    columns: HashSet<ColumnId>,
    cells: HashSet<CellId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_row_selected(&self, id: &RowId) -> bool {
        self.rows.contains(id)
    }

    pub fn is_column_selected(&self, id: &ColumnId) -> bool {
        self.columns.contains(id)
    }

    pub fn is_cell_selected(&self, id: &CellId) -> bool {
        self.cells.contains(id)
    }

    /// Returns whether the row is selected after the toggle.
    pub fn toggle_row(&mut self, id: &RowId) -> bool {
        toggle(&mut self.rows, id)
    }

    pub fn toggle_column(&mut self, id: &ColumnId) -> bool {
        toggle(&mut self.columns, id)
    }

    pub fn toggle_cell(&mut self, id: &CellId) -> bool {
        toggle(&mut self.cells, id)
    }

    pub fn select_rows<'a>(&mut self, ids: impl IntoIterator<Item = &'a RowId>) {
        self.rows.extend(ids.into_iter().cloned());
    }

    pub fn deselect_rows<'a>(&mut self, ids: impl IntoIterator<Item = &'a RowId>) {
        for id in ids {
            self.rows.remove(id);
        }
    }

    pub fn remove_row(&mut self, id: &RowId) {
        self.rows.remove(id);
    }

    pub fn remove_column(&mut self, id: &ColumnId) {
        self.columns.remove(id);
    }

    pub fn remove_cell(&mut self, id: &CellId) {
        self.cells.remove(id);
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.columns.clear();
        self.cells.clear();
    }

    /// Selection restricted to the given members of one table.
    pub fn snapshot<'a>(
        &self,
        rows: &[RowId],
        columns: impl IntoIterator<Item = &'a ColumnId>,
        cells: impl IntoIterator<Item = &'a CellId>,
    ) -> TableSelection {
        TableSelection::new(
            rows.iter().filter(|id| self.rows.contains(*id)).cloned().collect(),
            columns.into_iter().filter(|id| self.columns.contains(*id)).cloned().collect(),
            cells.into_iter().filter(|id| self.cells.contains(*id)).cloned().collect(),
            rows.len(),
        )
    }
}

fn toggle<T: Clone + Eq + std::hash::Hash>(set: &mut HashSet<T>, id: &T) -> bool {
    if set.remove(id) {
        false
    } else {
        set.insert(id.clone());
        true
    }
}

/// Read-only selection view of one table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSelection {
    pub selected_rows: HashSet<RowId>,
    pub selected_columns: HashSet<ColumnId>,
    pub selected_cells: HashSet<CellId>,
    /// `true` exactly when the table has rows and all of them are selected.
    pub is_all_selected: bool,
}

impl TableSelection {
    pub fn new(
        selected_rows: HashSet<RowId>,
        selected_columns: HashSet<ColumnId>,
        selected_cells: HashSet<CellId>,
        total_rows: usize,
    ) -> Self {
        let is_all_selected = total_rows > 0 && selected_rows.len() == total_rows;
        Self {
            selected_rows,
            selected_columns,
            selected_cells,
            is_all_selected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Vec<RowId> {
        (0..n).map(|i| RowId::new(format!("r{i}")).unwrap()).collect()
    }

    #[test]
    fn test_toggle_reports_new_state() {
        let mut selection = Selection::new();
        let id = RowId::new("r").unwrap();
        assert!(selection.toggle_row(&id));
        assert!(selection.is_row_selected(&id));
        assert!(!selection.toggle_row(&id));
        assert!(!selection.is_row_selected(&id));
    }

    #[test]
    fn test_all_selected_is_derived() {
        let ids = rows(3);
        let mut selection = Selection::new();
        selection.select_rows(&ids);
        assert!(selection.snapshot(&ids, [], []).is_all_selected);

        // Same selection against a table with one more row.
        let mut more = ids.clone();
        more.push(RowId::new("r9").unwrap());
        assert!(!selection.snapshot(&more, [], []).is_all_selected);
    }

    #[test]
    fn test_empty_table_is_never_all_selected() {
        let selection = Selection::new();
        assert!(!selection.snapshot(&[], [], []).is_all_selected);
    }

    #[test]
    fn test_snapshot_ignores_other_tables() {
        let ids = rows(2);
        let mut selection = Selection::new();
        selection.select_rows(&ids);
        selection.toggle_row(&RowId::new("elsewhere").unwrap());
        let snapshot = selection.snapshot(&ids, [], []);
        assert_eq!(snapshot.selected_rows.len(), 2);
        assert!(snapshot.is_all_selected);
    }
}
