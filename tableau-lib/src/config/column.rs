//! Column builders

use crate::error::ValidationError;
use crate::model::Column;
use crate::model::ColumnConfig;
use crate::model::ColumnId;
use crate::model::DEFAULT_COLUMN_WIDTH;
use crate::model::NumberConfig;
use crate::model::NumberFormat;
use crate::model::SelectConfig;
use crate::model::SelectOption;
use crate::model::TableId;
use crate::model::TextConfig;

/// Describes a column before it is added to a table.
///
/// Type-specific setters switch the config to the matching variant. Using a
/// text setter on a number column therefore produces a config mismatch that
/// the store rejects when the column is added.
///
/// # Example
///
/// ```
/// use tableau_lib::config::ColumnSpec;
///
/// let age = ColumnSpec::number("Age").min(0.0).max(120.0).step(1.0).width(100.0);
/// let notes = ColumnSpec::text("Notes").placeholder("Anything else?").multiline(true);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub name: String,
    pub column_type: String,
    pub width: f64,
    pub required: bool,
    pub readonly: bool,
    pub config: ColumnConfig,
}

impl ColumnSpec {
    /// A column of any registered (or unregistered) type with an empty config.
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
            width: DEFAULT_COLUMN_WIDTH,
            required: false,
            readonly: false,
            config: ColumnConfig::default(),
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, "text").with_config(ColumnConfig::Text(TextConfig::default()))
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, "number").with_config(ColumnConfig::Number(NumberConfig::default()))
    }

    pub fn select(name: impl Into<String>) -> Self {
        Self::new(name, "select").with_config(ColumnConfig::Select(SelectConfig::default()))
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, "date").with_config(ColumnConfig::Date)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, "boolean").with_config(ColumnConfig::Boolean)
    }

    pub fn custom(column_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(name, column_type)
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    pub fn with_config(mut self, config: ColumnConfig) -> Self {
        self.config = config;
        self
    }

    // -------------------------------------------------------------------------
    // Text
    // -------------------------------------------------------------------------

    /// Edits the text config, replacing a config of any other kind.
    fn with_text(mut self, edit: impl FnOnce(&mut TextConfig)) -> Self {
        let mut config = match std::mem::take(&mut self.config) {
            ColumnConfig::Text(c) => c,
            _ => TextConfig::default(),
        };
        edit(&mut config);
        self.config = ColumnConfig::Text(config);
        self
    }

    pub fn placeholder(self, placeholder: impl Into<String>) -> Self {
        self.with_text(|c| c.placeholder = Some(placeholder.into()))
    }

    pub fn max_length(self, max_length: usize) -> Self {
        self.with_text(|c| c.max_length = Some(max_length))
    }

    pub fn multiline(self, multiline: bool) -> Self {
        self.with_text(|c| c.multiline = multiline)
    }

    // -------------------------------------------------------------------------
    // Number
    // -------------------------------------------------------------------------

    /// Edits the number config, replacing a config of any other kind.
    fn with_number(mut self, edit: impl FnOnce(&mut NumberConfig)) -> Self {
        let mut config = match std::mem::take(&mut self.config) {
            ColumnConfig::Number(c) => c,
            _ => NumberConfig::default(),
        };
        edit(&mut config);
        self.config = ColumnConfig::Number(config);
        self
    }

    pub fn min(self, min: f64) -> Self {
        self.with_number(|c| c.min = Some(min))
    }

    pub fn max(self, max: f64) -> Self {
        self.with_number(|c| c.max = Some(max))
    }

    pub fn step(self, step: f64) -> Self {
        self.with_number(|c| c.step = Some(step))
    }

    pub fn precision(self, precision: u8) -> Self {
        self.with_number(|c| c.precision = Some(precision))
    }

    pub fn number_format(self, format: NumberFormat) -> Self {
        self.with_number(|c| c.format = format)
    }

    // -------------------------------------------------------------------------
    // Select
    // -------------------------------------------------------------------------

    /// Edits the select config, replacing a config of any other kind.
    fn with_select(mut self, edit: impl FnOnce(&mut SelectConfig)) -> Self {
        let mut config = match std::mem::take(&mut self.config) {
            ColumnConfig::Select(c) => c,
            _ => SelectConfig::default(),
        };
        edit(&mut config);
        self.config = ColumnConfig::Select(config);
        self
    }

    pub fn options(self, options: impl IntoIterator<Item = SelectOption>) -> Self {
        self.with_select(|c| c.options = options.into_iter().collect())
    }

    pub fn multiple(self, multiple: bool) -> Self {
        self.with_select(|c| c.multiple = multiple)
    }

    /// Builds the column record, checking the entity rules.
    pub fn build(self, id: ColumnId, table_id: TableId, position: usize) -> Result<Column, ValidationError> {
        let column = Column {
            id,
            table_id,
            name: self.name,
            column_type: self.column_type,
            width: self.width,
            position,
            required: self.required,
            readonly: self.readonly,
            config: self.config,
        };
        column.validate()?;
        Ok(column)
    }
}
