//! Choice columns

use super::ColumnType;
use super::TypeCategory;
use super::config_kind_mismatch;
use crate::error::ValidationError;
use crate::model::ColumnConfig;
use crate::model::SelectConfig;
use crate::model::Value;

/// Stores the chosen option value as text. Multi-select columns join the
/// chosen values with `", "`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectType;

const SEPARATOR: &str = ", ";

/// Resolves one piece of input to an option value, matching values exactly
/// and labels case-insensitively.
fn resolve<'a>(config: &'a SelectConfig, input: &str) -> Option<&'a str> {
    let input = input.trim();
    config
        .options
        .iter()
        .find(|o| o.value == input)
        .or_else(|| config.options.iter().find(|o| o.label.eq_ignore_ascii_case(input)))
        .map(|o| o.value.as_str())
}

impl ColumnType for SelectType {
    fn type_name(&self) -> &str {
        "select"
    }

    fn category(&self) -> TypeCategory {
        TypeCategory::Select
    }

    fn label(&self) -> &str {
        "Select"
    }

    fn default_value(&self) -> Value {
        Value::Text(String::new())
    }

    fn validate(&self, raw: &Value) -> Value {
        Value::Text(raw.to_plain_string())
    }

    fn coerce(&self, raw: &Value, config: &ColumnConfig) -> Value {
        let text = raw.to_plain_string();
        let Some(c) = config.as_select().filter(|c| !c.options.is_empty()) else {
            return Value::Text(text);
        };
        if c.multiple {
            let mut chosen: Vec<&str> = Vec::new();
            for part in text.split(',') {
                if let Some(v) = resolve(c, part)
                    && !chosen.contains(&v)
                {
                    chosen.push(v);
                }
            }
            Value::Text(chosen.join(SEPARATOR))
        } else {
            Value::Text(resolve(c, &text).unwrap_or_default().to_string())
        }
    }

    fn format_with(&self, value: &Value, config: &ColumnConfig) -> String {
        let text = value.to_plain_string();
        let Some(c) = config.as_select() else {
            return text;
        };
        if text.is_empty() {
            return text;
        }
        text.split(',')
            .map(|part| {
                let part = part.trim();
                c.option(part).map(|o| o.label.as_str()).unwrap_or(part)
            })
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    }

    fn has_config_schema(&self) -> bool {
        true
    }

    fn validate_config(&self, config: &ColumnConfig) -> Result<(), ValidationError> {
        let c = match config {
            ColumnConfig::Select(c) => c,
            c if c.is_empty() => return Ok(()),
            c => return Err(config_kind_mismatch(self.type_name(), c)),
        };
        for (i, option) in c.options.iter().enumerate() {
            if option.value.trim().is_empty() {
                return Err(ValidationError::empty(format!("column.config.options[{i}].value")));
            }
            if option.value.contains(',') {
                return Err(ValidationError::new(
                    format!("column.config.options[{i}].value"),
                    "must not contain ','",
                ));
            }
            if c.options[..i].iter().any(|o| o.value == option.value) {
                return Err(ValidationError::new(
                    format!("column.config.options[{i}].value"),
                    format!("duplicate option '{}'", option.value),
                ));
            }
        }
        Ok(())
    }

    fn default_config(&self) -> ColumnConfig {
        ColumnConfig::Select(SelectConfig::default())
    }
}
