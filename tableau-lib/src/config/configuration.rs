//! Configuration builder and the immutable configuration facade

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use log::warn;

use super::Density;
use super::OptionsPatch;
use super::Preset;
use super::SizingMode;
use super::TableOptions;
use crate::edit::Staged;
use crate::error::ValidationError;
use crate::model::Column;
use crate::model::Value;
use crate::render::BooleanRenderer;
use crate::render::CellProps;
use crate::render::CellRenderer;
use crate::render::RenderedCell;
use crate::render::TextRenderer;
use crate::sizing::SizingConfig;
use crate::types::Alignment;
use crate::types::ColumnType;
use crate::types::TypeRegistry;

/// Fluent builder for a [`Configuration`].
///
/// Starts from the default options, the built-in column types and the
/// built-in renderers.
///
/// # Example
///
/// ```
/// use tableau_lib::config::{SizingMode, TableConfig};
/// use tableau_lib::model::Value;
/// use tableau_lib::types::CustomType;
///
/// let config = TableConfig::new()
///     .column_sizing(SizingMode::Auto)
///     .striped(true)
///     .register_type(CustomType::new("email", "Email", Value::from("")))
///     .build()
///     .unwrap();
///
/// assert!(config.type_definition("email").is_some());
/// ```
#[derive(Debug, Clone)]
pub struct TableConfig {
    options: TableOptions,
    registry: TypeRegistry,
    renderers: HashMap<String, Arc<dyn CellRenderer>>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::with_options(TableOptions::default())
    }

    pub fn with_options(options: TableOptions) -> Self {
        let mut renderers: HashMap<String, Arc<dyn CellRenderer>> = HashMap::new();
        renderers.insert("boolean".to_string(), Arc::new(BooleanRenderer));
        Self {
            options,
            registry: TypeRegistry::with_builtins(),
            renderers,
        }
    }

    pub fn preset(preset: Preset) -> Self {
        Self::with_options(TableOptions::preset(preset))
    }

    pub fn density(mut self, density: Density) -> Self {
        self.options.density = density;
        self
    }

    pub fn column_sizing(mut self, mode: SizingMode) -> Self {
        self.options.column_sizing = mode;
        self
    }

    pub fn column_width_range(mut self, min: f64, max: f64) -> Self {
        self.options.min_column_width = min;
        self.options.max_column_width = max;
        self
    }

    /// Turns selection, the select-all box and row numbers on or off together.
    pub fn selection(mut self, enabled: bool) -> Self {
        self.options.enable_selection = enabled;
        self.options.show_select_all = enabled;
        self.options.show_row_numbers = enabled;
        self
    }

    pub fn editing(mut self, enabled: bool) -> Self {
        self.options.enable_editing = enabled;
        self
    }

    pub fn striped(mut self, enabled: bool) -> Self {
        self.options.striped = enabled;
        self
    }

    pub fn action_column(mut self, enabled: bool) -> Self {
        self.options.show_action_column = enabled;
        self
    }

    pub fn default_column_type(mut self, type_name: impl Into<String>) -> Self {
        self.options.default_column_type = type_name.into();
        self
    }

    /// Restricts the types offered when adding columns.
    pub fn available_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.available_column_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    /// Registers a column type, replacing any type of the same name.
    pub fn register_type(mut self, definition: impl ColumnType + 'static) -> Self {
        self.registry.register(definition);
        self
    }

    /// Uses `renderer` for columns of `type_name`.
    pub fn renderer(mut self, type_name: impl Into<String>, renderer: impl CellRenderer + 'static) -> Self {
        self.renderers.insert(type_name.into(), Arc::new(renderer));
        self
    }

    /// Validates everything and freezes it into a [`Configuration`].
    ///
    /// Fails when the options are inconsistent or name column types that are
    /// not registered.
    pub fn build(self) -> Result<Configuration, ValidationError> {
        let config = Configuration {
            options: Arc::new(self.options),
            registry: Arc::new(self.registry),
            renderers: Arc::new(self.renderers),
        };
        config.check()?;
        debug!(
            "Built table configuration with {} column types",
            config.registry.len()
        );
        Ok(config)
    }
}

/// Immutable table configuration.
///
/// Cheap to clone and share. Lookups for unknown types fall back to safe
/// defaults instead of failing. Changing options produces a new
/// configuration; existing clones are unaffected.
#[derive(Debug, Clone)]
pub struct Configuration {
    options: Arc<TableOptions>,
    registry: Arc<TypeRegistry>,
    renderers: Arc<HashMap<String, Arc<dyn CellRenderer>>>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            options: Arc::new(TableOptions::default()),
            registry: Arc::new(TypeRegistry::with_builtins()),
            renderers: Arc::new(TableConfig::new().renderers),
        }
    }
}

impl Configuration {
    fn check(&self) -> Result<(), ValidationError> {
        self.options.validate()?;
        if !self.registry.contains(&self.options.default_column_type) {
            return Err(ValidationError::new(
                "options.defaultColumnType",
                format!("'{}' is not a registered column type", self.options.default_column_type),
            ));
        }
        if let Some(types) = &self.options.available_column_types
            && let Some(missing) = types.iter().find(|t| !self.registry.contains(t))
        {
            return Err(ValidationError::new(
                "options.availableColumnTypes",
                format!("'{missing}' is not a registered column type"),
            ));
        }
        Ok(())
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// The shared type registry, for handing to a store.
    pub fn shared_registry(&self) -> Arc<TypeRegistry> {
        Arc::clone(&self.registry)
    }

    /// Returns a new configuration using `options`, sharing types and
    /// renderers with this one.
    pub fn with_options(&self, options: TableOptions) -> Result<Configuration, ValidationError> {
        let config = Configuration {
            options: Arc::new(options),
            registry: Arc::clone(&self.registry),
            renderers: Arc::clone(&self.renderers),
        };
        config.check()?;
        Ok(config)
    }

    /// Returns a new configuration with `patch` applied to the options.
    pub fn apply(&self, patch: &OptionsPatch) -> Result<Configuration, ValidationError> {
        self.with_options(self.options.merged(patch)?)
    }

    pub fn type_definition(&self, type_name: &str) -> Option<&dyn ColumnType> {
        self.registry.get(type_name)
    }

    /// Types offered when adding a column: the allow-list if set, otherwise
    /// every registered type.
    pub fn available_types(&self) -> Vec<&dyn ColumnType> {
        match &self.options.available_column_types {
            Some(names) => names
                .iter()
                .filter_map(|name| {
                    let found = self.registry.get(name);
                    if found.is_none() {
                        warn!("Allowed column type '{}' is not registered", name);
                    }
                    found
                })
                .collect(),
            None => self.registry.all(),
        }
    }

    pub fn default_value(&self, type_name: &str) -> Value {
        self.registry
            .get(type_name)
            .map(|t| t.default_value())
            .unwrap_or_else(|| Value::Text(String::new()))
    }

    pub fn alignment(&self, type_name: &str) -> Alignment {
        self.registry
            .get(type_name)
            .map(|t| t.alignment())
            .unwrap_or(self.options.default_alignment)
    }

    pub fn header_alignment(&self, type_name: &str) -> Alignment {
        self.registry
            .get(type_name)
            .map(|t| t.header_alignment())
            .unwrap_or(self.options.default_header_alignment)
    }

    /// Coerces a raw value through the type's validator. Unknown types pass
    /// the value through unchanged.
    pub fn validate_value(&self, value: &Value, type_name: &str) -> Value {
        match self.registry.get(type_name) {
            Some(t) => t.validate(value),
            None => value.clone(),
        }
    }

    /// Formats a value for display. Unknown types show the plain string.
    pub fn format_value(&self, value: &Value, type_name: &str) -> String {
        match self.registry.get(type_name) {
            Some(t) => t.format(value),
            None => value.to_plain_string(),
        }
    }

    /// Column-aware coercion used when committing edits.
    pub fn coerce_value(&self, raw: &Value, column: &Column) -> Value {
        match self.registry.get(&column.column_type) {
            Some(t) => t.coerce(raw, &column.config),
            None => raw.clone(),
        }
    }

    /// Column-aware display text.
    pub fn display_value(&self, value: &Value, column: &Column) -> String {
        match self.registry.get(&column.column_type) {
            Some(t) => t.format_with(value, &column.config),
            None => value.to_plain_string(),
        }
    }

    /// Checks a column's entity rules and, when its type is known, its
    /// config against the type's schema.
    pub fn validate_column(&self, column: &Column) -> Result<(), ValidationError> {
        column.validate()?;
        match self.registry.get(&column.column_type) {
            Some(t) => t.validate_config(&column.config),
            None => Ok(()),
        }
    }

    /// Whether cells of `column` may enter edit mode.
    pub fn is_editable(&self, column: &Column) -> bool {
        self.options.enable_editing && !column.readonly
    }

    /// Renderer for a column type: a registered one, otherwise the generic
    /// text renderer.
    pub fn renderer(&self, type_name: &str) -> &dyn CellRenderer {
        match self.renderers.get(type_name) {
            Some(r) => r.as_ref(),
            None => &TextRenderer,
        }
    }

    /// Describes how a cell should be drawn.
    pub fn render_cell(&self, column: &Column, value: &Value, staged: Option<&Staged>) -> RenderedCell {
        let Some(definition) = self.registry.get(&column.column_type) else {
            return RenderedCell::Unknown {
                type_name: column.column_type.clone(),
            };
        };
        let props = CellProps {
            value,
            column,
            definition,
            readonly: !self.is_editable(column),
            staged,
        };
        self.renderer(&column.column_type).render(&props)
    }

    /// Sizing inputs derived from the options for a container width.
    pub fn sizing_config(&self, container_width: f64) -> SizingConfig {
        SizingConfig {
            mode: self.options.column_sizing,
            container_width,
            min_column_width: self.options.min_column_width,
            max_column_width: self.options.max_column_width,
            show_row_numbers: self.options.show_row_numbers,
            show_action_column: self.options.show_action_column,
        }
    }
}
