//! Column types
//!
//! A [`ColumnType`] decides everything type-specific about a column: its
//! default value, how raw input is coerced, how values are displayed and how
//! cells are aligned. Types are registered by name in a [`TypeRegistry`];
//! nothing else in the crate switches on type names.

mod boolean;
mod custom;
mod date;
mod number;
mod registry;
mod select;
mod text;

pub use boolean::BooleanType;
pub use custom::CustomType;
pub use date::DateType;
pub use number::NumberType;
pub use registry::TypeRegistry;
pub use select::SelectType;
pub use text::TextType;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ValidationError;
use crate::model::ColumnConfig;
use crate::model::Value;

/// Horizontal alignment for cell and header content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl std::fmt::Display for Alignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        };
        f.write_str(name)
    }
}

/// Broad family a column type belongs to, used to group pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeCategory {
    Text,
    Number,
    Date,
    Boolean,
    Select,
    Custom,
}

impl std::fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TypeCategory::Text => "text",
            TypeCategory::Number => "number",
            TypeCategory::Date => "date",
            TypeCategory::Boolean => "boolean",
            TypeCategory::Select => "select",
            TypeCategory::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// Behaviour of one kind of column.
///
/// `validate` must be pure and total: any raw value maps to a value of the
/// type's shape, falling back to the default instead of failing.
pub trait ColumnType: Send + Sync + std::fmt::Debug {
    /// Registry key, e.g. `"number"`.
    fn type_name(&self) -> &str;

    fn category(&self) -> TypeCategory;

    /// Human-readable name for pickers.
    fn label(&self) -> &str;

    /// Value shown for a row that has no committed cell.
    fn default_value(&self) -> Value;

    fn alignment(&self) -> Alignment {
        Alignment::Left
    }

    fn header_alignment(&self) -> Alignment {
        self.alignment()
    }

    /// Coerces raw input into this type's shape.
    fn validate(&self, raw: &Value) -> Value;

    /// Display string for a validated value.
    fn format(&self, value: &Value) -> String {
        value.to_plain_string()
    }

    /// Column-aware coercion. Types with per-column options (ranges,
    /// choices, lengths) refine `validate` here.
    fn coerce(&self, raw: &Value, config: &ColumnConfig) -> Value {
        let _ = config;
        self.validate(raw)
    }

    /// Column-aware display string.
    fn format_with(&self, value: &Value, config: &ColumnConfig) -> String {
        let _ = config;
        self.format(value)
    }

    /// Initial editor text for a committed value. Must parse back through
    /// `validate` to the same value.
    fn edit_text(&self, value: &Value) -> String {
        self.format(value)
    }

    /// Whether columns of this type carry a checked config.
    fn has_config_schema(&self) -> bool {
        false
    }

    /// Checks a column's config. Called when columns are built, never when
    /// cells are edited.
    fn validate_config(&self, config: &ColumnConfig) -> Result<(), ValidationError> {
        let _ = config;
        Ok(())
    }

    fn default_config(&self) -> ColumnConfig {
        ColumnConfig::default()
    }
}

/// Rejects a config whose variant does not belong to the column type.
pub(crate) fn config_kind_mismatch(type_name: &str, config: &ColumnConfig) -> ValidationError {
    ValidationError::new(
        "column.config",
        format!("{} config given for a '{}' column", config.kind(), type_name),
    )
}
