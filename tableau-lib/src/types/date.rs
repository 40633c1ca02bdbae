//! Calendar date columns

use chrono::DateTime;
use chrono::NaiveDate;

use super::ColumnType;
use super::TypeCategory;
use super::config_kind_mismatch;
use crate::error::ValidationError;
use crate::model::ColumnConfig;
use crate::model::DATE_FORMAT;
use crate::model::Value;

/// Dates are stored as [`Value::Date`]. Empty or unparseable input becomes
/// [`Value::Null`], which displays as an empty cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateType;

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

impl ColumnType for DateType {
    fn type_name(&self) -> &str {
        "date"
    }

    fn category(&self) -> TypeCategory {
        TypeCategory::Date
    }

    fn label(&self) -> &str {
        "Date"
    }

    fn default_value(&self) -> Value {
        Value::Null
    }

    fn validate(&self, raw: &Value) -> Value {
        let date = match raw {
            Value::Date(d) => Some(*d),
            Value::Text(s) => parse_date(s),
            Value::Json(serde_json::Value::String(s)) => parse_date(s),
            _ => None,
        };
        date.map(Value::Date).unwrap_or(Value::Null)
    }

    fn format(&self, value: &Value) -> String {
        value
            .as_date()
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default()
    }

    fn validate_config(&self, config: &ColumnConfig) -> Result<(), ValidationError> {
        match config {
            ColumnConfig::Date => Ok(()),
            c if c.is_empty() => Ok(()),
            c => Err(config_kind_mismatch(self.type_name(), c)),
        }
    }

    fn default_config(&self) -> ColumnConfig {
        ColumnConfig::Date
    }
}
