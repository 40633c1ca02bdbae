//! Free text columns

use super::ColumnType;
use super::TypeCategory;
use super::config_kind_mismatch;
use crate::error::ValidationError;
use crate::model::ColumnConfig;
use crate::model::TextConfig;
use crate::model::Value;

#[derive(Debug, Clone, Copy, Default)]
pub struct TextType;

impl ColumnType for TextType {
    fn type_name(&self) -> &str {
        "text"
    }

    fn category(&self) -> TypeCategory {
        TypeCategory::Text
    }

    fn label(&self) -> &str {
        "Text"
    }

    fn default_value(&self) -> Value {
        Value::Text(String::new())
    }

    fn validate(&self, raw: &Value) -> Value {
        Value::Text(raw.to_plain_string())
    }

    fn coerce(&self, raw: &Value, config: &ColumnConfig) -> Value {
        let text = raw.to_plain_string();
        match config.as_text().and_then(|c| c.max_length) {
            Some(max) if text.chars().count() > max => Value::Text(text.chars().take(max).collect()),
            _ => Value::Text(text),
        }
    }

    fn has_config_schema(&self) -> bool {
        true
    }

    fn validate_config(&self, config: &ColumnConfig) -> Result<(), ValidationError> {
        match config {
            ColumnConfig::Text(TextConfig {
                max_length: Some(0), ..
            }) => Err(ValidationError::new("column.config.maxLength", "must be at least 1")),
            ColumnConfig::Text(_) => Ok(()),
            c if c.is_empty() => Ok(()),
            c => Err(config_kind_mismatch(self.type_name(), c)),
        }
    }

    fn default_config(&self) -> ColumnConfig {
        ColumnConfig::Text(TextConfig::default())
    }
}
