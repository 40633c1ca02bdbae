//! Column types defined by the host application

use std::sync::Arc;

use super::Alignment;
use super::ColumnType;
use super::TypeCategory;
use crate::error::ValidationError;
use crate::model::ColumnConfig;
use crate::model::Value;

type Validator = Arc<dyn Fn(&Value) -> Value + Send + Sync>;
type Formatter = Arc<dyn Fn(&Value) -> String + Send + Sync>;
type ConfigCheck = Arc<dyn Fn(&ColumnConfig) -> Result<(), ValidationError> + Send + Sync>;

/// A column type assembled from closures.
///
/// Without a validator the type passes values through unchanged; without a
/// formatter it shows the plain string form.
///
/// # Example
///
/// ```
/// use tableau_lib::model::Value;
/// use tableau_lib::types::{Alignment, ColumnType, CustomType};
///
/// let rating = CustomType::new("rating", "Rating", Value::from(0.0))
///     .validator(|raw| {
///         let stars = raw.to_plain_string().trim().parse::<f64>().unwrap_or(0.0);
///         Value::from(stars.clamp(0.0, 5.0).round())
///     })
///     .formatter(|v| "*".repeat(v.as_f64().unwrap_or(0.0) as usize))
///     .alignment(Alignment::Center);
///
/// assert_eq!(rating.validate(&Value::from("9")), Value::from(5.0));
/// assert_eq!(rating.format(&Value::from(3.0)), "***");
/// ```
#[derive(Clone)]
pub struct CustomType {
    type_name: String,
    label: String,
    category: TypeCategory,
    default_value: Value,
    alignment: Alignment,
    header_alignment: Option<Alignment>,
    validator: Option<Validator>,
    formatter: Option<Formatter>,
    config_check: Option<ConfigCheck>,
    default_config: ColumnConfig,
}

impl CustomType {
    pub fn new(type_name: impl Into<String>, label: impl Into<String>, default_value: Value) -> Self {
        Self {
            type_name: type_name.into(),
            label: label.into(),
            category: TypeCategory::Custom,
            default_value,
            alignment: Alignment::Left,
            header_alignment: None,
            validator: None,
            formatter: None,
            config_check: None,
            default_config: ColumnConfig::default(),
        }
    }

    /// Files the type under another category in pickers.
    pub fn category(mut self, category: TypeCategory) -> Self {
        self.category = category;
        self
    }

    pub fn validator(mut self, f: impl Fn(&Value) -> Value + Send + Sync + 'static) -> Self {
        self.validator = Some(Arc::new(f));
        self
    }

    pub fn formatter(mut self, f: impl Fn(&Value) -> String + Send + Sync + 'static) -> Self {
        self.formatter = Some(Arc::new(f));
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn header_alignment(mut self, alignment: Alignment) -> Self {
        self.header_alignment = Some(alignment);
        self
    }

    /// Attaches a config schema check.
    pub fn config_check(
        mut self,
        f: impl Fn(&ColumnConfig) -> Result<(), ValidationError> + Send + Sync + 'static,
    ) -> Self {
        self.config_check = Some(Arc::new(f));
        self
    }

    pub fn default_config(mut self, config: ColumnConfig) -> Self {
        self.default_config = config;
        self
    }
}

impl std::fmt::Debug for CustomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomType")
            .field("type_name", &self.type_name)
            .field("label", &self.label)
            .field("category", &self.category)
            .field("default_value", &self.default_value)
            .field("alignment", &self.alignment)
            .field("has_validator", &self.validator.is_some())
            .field("has_formatter", &self.formatter.is_some())
            .finish()
    }
}

impl ColumnType for CustomType {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn category(&self) -> TypeCategory {
        self.category
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn default_value(&self) -> Value {
        self.default_value.clone()
    }

    fn alignment(&self) -> Alignment {
        self.alignment
    }

    fn header_alignment(&self) -> Alignment {
        self.header_alignment.unwrap_or(self.alignment)
    }

    fn validate(&self, raw: &Value) -> Value {
        match &self.validator {
            Some(f) => f(raw),
            None => raw.clone(),
        }
    }

    fn format(&self, value: &Value) -> String {
        match &self.formatter {
            Some(f) => f(value),
            None => value.to_plain_string(),
        }
    }

    fn has_config_schema(&self) -> bool {
        self.config_check.is_some()
    }

    fn validate_config(&self, config: &ColumnConfig) -> Result<(), ValidationError> {
        match &self.config_check {
            Some(f) => f(config),
            None => Ok(()),
        }
    }

    fn default_config(&self) -> ColumnConfig {
        self.default_config.clone()
    }
}
