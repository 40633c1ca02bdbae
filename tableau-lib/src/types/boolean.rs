//! Yes/no columns

use super::Alignment;
use super::ColumnType;
use super::TypeCategory;
use super::config_kind_mismatch;
use crate::error::ValidationError;
use crate::model::ColumnConfig;
use crate::model::Value;

const TRUTHY: &[&str] = &["true", "yes", "y", "on", "1", "x"];

#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanType;

impl ColumnType for BooleanType {
    fn type_name(&self) -> &str {
        "boolean"
    }

    fn category(&self) -> TypeCategory {
        TypeCategory::Boolean
    }

    fn label(&self) -> &str {
        "Checkbox"
    }

    fn default_value(&self) -> Value {
        Value::Bool(false)
    }

    fn alignment(&self) -> Alignment {
        Alignment::Center
    }

    fn validate(&self, raw: &Value) -> Value {
        let b = match raw {
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Text(s) => {
                let s = s.trim().to_lowercase();
                TRUTHY.contains(&s.as_str())
            }
            Value::Json(serde_json::Value::Bool(b)) => *b,
            _ => false,
        };
        Value::Bool(b)
    }

    fn format(&self, value: &Value) -> String {
        let shown = if value.as_bool().unwrap_or(false) { "Yes" } else { "No" };
        shown.to_string()
    }

    fn validate_config(&self, config: &ColumnConfig) -> Result<(), ValidationError> {
        match config {
            ColumnConfig::Boolean => Ok(()),
            c if c.is_empty() => Ok(()),
            c => Err(config_kind_mismatch(self.type_name(), c)),
        }
    }

    fn default_config(&self) -> ColumnConfig {
        ColumnConfig::Boolean
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthy_strings() {
        for s in ["true", "YES", " on ", "1"] {
            assert_eq!(BooleanType.validate(&Value::from(s)), Value::Bool(true), "{s}");
        }
        for s in ["false", "no", "", "maybe"] {
            assert_eq!(BooleanType.validate(&Value::from(s)), Value::Bool(false), "{s}");
        }
    }

    #[test]
    fn test_round_trip_through_format() {
        for b in [true, false] {
            let shown = BooleanType.format(&Value::Bool(b));
            assert_eq!(BooleanType.validate(&Value::from(shown)), Value::Bool(b));
        }
    }
}
