//! Core table records
//!
//! Records are never mutated in place by the store; updates replace the
//! stored record with a new one.

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::CellId;
use super::ColumnConfig;
use super::ColumnId;
use super::RowId;
use super::TableId;
use super::Value;
use crate::error::ValidationError;

/// Narrowest width a column may be configured with.
pub const MIN_COLUMN_WIDTH: f64 = 50.0;
/// Widest width a column may be configured with.
pub const MAX_COLUMN_WIDTH: f64 = 800.0;
/// Width given to new columns.
pub const DEFAULT_COLUMN_WIDTH: f64 = 200.0;

/// Table metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: TableId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Table {
    /// Creates a new table stamped with the current time.
    pub fn new(id: TableId, name: impl Into<String>) -> Result<Self, ValidationError> {
        let now = Utc::now();
        let table = Self {
            id,
            name: name.into(),
            created_at: now,
            updated_at: now,
        };
        table.validate()?;
        Ok(table)
    }

    /// Returns a copy with a new name and a refreshed `updated_at`.
    pub fn renamed(&self, name: impl Into<String>) -> Result<Self, ValidationError> {
        let table = Self {
            name: name.into(),
            updated_at: Utc::now(),
            ..self.clone()
        };
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::empty("table.name"));
        }
        Ok(())
    }
}

/// Column definition.
///
/// `column_type` names an entry in the type registry. A name the registry
/// does not know is still a valid column; it renders as an unknown type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub table_id: TableId,
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
    pub width: f64,
    /// Display order within the table, dense from 0.
    pub position: usize,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub readonly: bool,
    #[serde(default)]
    pub config: ColumnConfig,
}

impl Column {
    /// Checks the entity rules: non-empty name and type, width within
    /// [`MIN_COLUMN_WIDTH`, `MAX_COLUMN_WIDTH`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::empty("column.name"));
        }
        if self.column_type.trim().is_empty() {
            return Err(ValidationError::empty("column.type"));
        }
        if !self.width.is_finite() || !(MIN_COLUMN_WIDTH..=MAX_COLUMN_WIDTH).contains(&self.width) {
            return Err(ValidationError::new(
                "column.width",
                format!(
                    "{} is outside [{}, {}]",
                    self.width, MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH
                ),
            ));
        }
        Ok(())
    }
}

/// A table row.
///
/// Cell values live in separate [`Cell`] records. `selected` mirrors the
/// store's selection set and is filled in when rows are queried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub id: RowId,
    pub table_id: TableId,
    pub position: usize,
    #[serde(skip)]
    pub selected: bool,
    pub created_at: DateTime<Utc>,
}

impl Row {
    pub fn new(id: RowId, table_id: TableId, position: usize) -> Self {
        Self {
            id,
            table_id,
            position,
            selected: false,
            created_at: Utc::now(),
        }
    }
}

/// A committed value for one row/column pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub id: CellId,
    pub row_id: RowId,
    pub column_id: ColumnId,
    pub value: Value,
    pub updated_at: DateTime<Utc>,
}

impl Cell {
    pub fn new(id: CellId, row_id: RowId, column_id: ColumnId, value: Value) -> Self {
        Self {
            id,
            row_id,
            column_id,
            value,
            updated_at: Utc::now(),
        }
    }

    /// Returns a copy holding `value` with a refreshed `updated_at`.
    pub fn with_value(&self, value: Value) -> Self {
        Self {
            value,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }
}
