use log::debug;
use log::trace;

use super::EditBuffer;
use crate::config::Configuration;
use crate::error::StoreError;
use crate::model::Column;
use crate::model::ColumnId;
use crate::model::RowId;
use crate::model::Value;
use crate::store::TableStore;

/// Uncommitted value held while a cell is editing.
#[derive(Debug, Clone, PartialEq)]
pub enum Staged {
    /// Free text typed into an input.
    Text(EditBuffer),
    /// A value picked directly, such as a toggled checkbox.
    Value(Value),
}

impl Staged {
    /// The raw value handed to coercion on commit.
    pub fn raw(&self) -> Value {
        match self {
            Staged::Text(buffer) => Value::Text(buffer.text().to_string()),
            Staged::Value(value) => value.clone(),
        }
    }
}

/// Keys understood by an editing cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Char(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Enter,
    Escape,
    Tab,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditState {
    #[default]
    Viewing,
    Editing(Staged),
}

/// What a key press asks the owner of the editor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Ignored,
    Changed,
    Commit,
    Cancel,
}

/// Edit state of a single cell.
///
/// `Viewing` is the initial and terminal state. Commit and cancel both
/// return to it; there is no error state because commit coerces instead of
/// rejecting.
#[derive(Debug, Clone, PartialEq)]
pub struct CellEditor {
    row_id: RowId,
    column_id: ColumnId,
    state: EditState,
}

impl CellEditor {
    pub fn new(row_id: RowId, column_id: ColumnId) -> Self {
        Self {
            row_id,
            column_id,
            state: EditState::Viewing,
        }
    }

    pub fn row_id(&self) -> &RowId {
        &self.row_id
    }

    pub fn column_id(&self) -> &ColumnId {
        &self.column_id
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing(_))
    }

    pub fn staged(&self) -> Option<&Staged> {
        match &self.state {
            EditState::Editing(staged) => Some(staged),
            EditState::Viewing => None,
        }
    }

    /// Enters edit mode with `current` as the starting value.
    ///
    /// Returns `false` without changing state when the column is readonly,
    /// editing is disabled, the column type is unknown, or the cell is
    /// already editing.
    pub fn begin(&mut self, column: &Column, current: &Value, config: &Configuration) -> bool {
        if self.is_editing() || !config.is_editable(column) {
            return false;
        }
        let Some(definition) = config.type_definition(&column.column_type) else {
            debug!("Not editing column {} of unknown type {}", column.id, column.column_type);
            return false;
        };
        let staged = config
            .renderer(&column.column_type)
            .begin_edit(current, column, definition);
        trace!("Editing cell {}/{}", self.row_id, self.column_id);
        self.state = EditState::Editing(staged);
        true
    }

    /// Replaces the staged text, switching to a text buffer if needed.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        match &mut self.state {
            EditState::Editing(Staged::Text(buffer)) => {
                buffer.set_text(text);
                true
            }
            EditState::Editing(staged) => {
                *staged = Staged::Text(EditBuffer::new(text));
                true
            }
            EditState::Viewing => false,
        }
    }

    /// Replaces the staged value.
    pub fn stage_value(&mut self, value: Value) -> bool {
        match &mut self.state {
            EditState::Editing(staged) => {
                *staged = Staged::Value(value);
                true
            }
            EditState::Viewing => false,
        }
    }

    /// Applies a key to the staged edit without touching the store.
    pub fn handle_key(&mut self, key: EditKey) -> EditAction {
        let EditState::Editing(staged) = &mut self.state else {
            return EditAction::Ignored;
        };
        match key {
            EditKey::Enter | EditKey::Tab => return EditAction::Commit,
            EditKey::Escape => return EditAction::Cancel,
            _ => {}
        }
        match staged {
            Staged::Text(buffer) => {
                match key {
                    EditKey::Char(c) => buffer.insert_char(c),
                    EditKey::Backspace => buffer.delete_char_before(),
                    EditKey::Delete => buffer.delete_char_at(),
                    EditKey::Left => buffer.cursor_left(),
                    EditKey::Right => buffer.cursor_right(),
                    EditKey::Home => buffer.cursor_home(),
                    EditKey::End => buffer.cursor_end(),
                    EditKey::Enter | EditKey::Tab | EditKey::Escape => return EditAction::Ignored,
                }
                EditAction::Changed
            }
            Staged::Value(Value::Bool(b)) if key == EditKey::Char(' ') => {
                *b = !*b;
                EditAction::Changed
            }
            Staged::Value(_) => EditAction::Ignored,
        }
    }

    /// Coerces the staged value through the column type and writes it.
    ///
    /// Issues exactly one store mutation and returns the committed value,
    /// or `None` when the cell was not editing. The editor is back in
    /// `Viewing` even if the store rejects the write.
    ///
    /// `column` must be the column this editor targets; any other column
    /// fails with [`StoreError::ColumnNotFound`] and keeps the edit staged.
    pub fn commit<S: TableStore + ?Sized>(
        &mut self,
        store: &mut S,
        column: &Column,
        config: &Configuration,
    ) -> Result<Option<Value>, StoreError> {
        if column.id != self.column_id {
            return Err(StoreError::ColumnNotFound(column.id.clone()));
        }
        let EditState::Editing(staged) = std::mem::take(&mut self.state) else {
            return Ok(None);
        };
        let value = config.coerce_value(&staged.raw(), column);
        store.set_cell_value(&self.row_id, &self.column_id, value.clone())?;
        debug!("Committed cell {}/{}", self.row_id, self.column_id);
        Ok(Some(value))
    }

    /// Focus left the cell; same as commit.
    pub fn blur<S: TableStore + ?Sized>(
        &mut self,
        store: &mut S,
        column: &Column,
        config: &Configuration,
    ) -> Result<Option<Value>, StoreError> {
        self.commit(store, column, config)
    }

    /// Discards the staged edit. Returns whether anything was discarded.
    pub fn cancel(&mut self) -> bool {
        let was_editing = self.is_editing();
        if was_editing {
            trace!("Cancelled edit of {}/{}", self.row_id, self.column_id);
        }
        self.state = EditState::Viewing;
        was_editing
    }

    /// Handles a key and performs the commit or cancel it asks for.
    pub fn on_key<S: TableStore + ?Sized>(
        &mut self,
        key: EditKey,
        store: &mut S,
        column: &Column,
        config: &Configuration,
    ) -> Result<EditAction, StoreError> {
        let action = self.handle_key(key);
        match action {
            EditAction::Commit => {
                self.commit(store, column, config)?;
            }
            EditAction::Cancel => {
                self.cancel();
            }
            EditAction::Changed | EditAction::Ignored => {}
        }
        Ok(action)
    }
}
