//! Numeric columns

use super::Alignment;
use super::ColumnType;
use super::TypeCategory;
use super::config_kind_mismatch;
use crate::error::ValidationError;
use crate::model::ColumnConfig;
use crate::model::NumberConfig;
use crate::model::NumberFormat;
use crate::model::Value;
use crate::model::format_number;

#[derive(Debug, Clone, Copy, Default)]
pub struct NumberType;

impl NumberType {
    /// Parses a raw value, mapping anything unparseable or non-finite to 0.
    fn parse(raw: &Value) -> f64 {
        let parsed = match raw {
            Value::Number(n) => Some(*n),
            Value::Text(s) => s.trim().parse::<f64>().ok(),
            Value::Json(serde_json::Value::Number(n)) => n.as_f64(),
            Value::Json(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match parsed {
            Some(n) if n.is_finite() => n,
            _ => 0.0,
        }
    }
}

fn round_to(n: f64, precision: u8) -> f64 {
    let factor = 10f64.powi(i32::from(precision));
    let rounded = (n * factor).round() / factor;
    if rounded.is_finite() { rounded } else { n }
}

impl ColumnType for NumberType {
    fn type_name(&self) -> &str {
        "number"
    }

    fn category(&self) -> TypeCategory {
        TypeCategory::Number
    }

    fn label(&self) -> &str {
        "Number"
    }

    fn default_value(&self) -> Value {
        Value::Number(0.0)
    }

    fn alignment(&self) -> Alignment {
        Alignment::Right
    }

    fn validate(&self, raw: &Value) -> Value {
        Value::Number(Self::parse(raw))
    }

    fn format(&self, value: &Value) -> String {
        format_number(value.as_f64().unwrap_or(0.0))
    }

    fn coerce(&self, raw: &Value, config: &ColumnConfig) -> Value {
        let mut n = Self::parse(raw);
        if let Some(c) = config.as_number() {
            if let Some(min) = c.min {
                n = n.max(min);
            }
            if let Some(max) = c.max {
                n = n.min(max);
            }
            if let Some(precision) = c.precision {
                n = round_to(n, precision);
            }
        }
        Value::Number(n)
    }

    fn format_with(&self, value: &Value, config: &ColumnConfig) -> String {
        let Some(c) = config.as_number() else {
            return self.format(value);
        };
        let n = value.as_f64().unwrap_or(0.0);
        let body = |n: f64, default_precision: Option<u8>| match c.precision.or(default_precision) {
            Some(p) => format!("{:.*}", usize::from(p), n),
            None => format_number(n),
        };
        match c.format {
            NumberFormat::Decimal => body(n, None),
            NumberFormat::Currency if n < 0.0 => format!("-${}", body(-n, Some(2))),
            NumberFormat::Currency => format!("${}", body(n, Some(2))),
            NumberFormat::Percentage => format!("{}%", body(n, None)),
        }
    }

    fn has_config_schema(&self) -> bool {
        true
    }

    fn validate_config(&self, config: &ColumnConfig) -> Result<(), ValidationError> {
        match config {
            ColumnConfig::Number(c) => check_number_config(c),
            c if c.is_empty() => Ok(()),
            c => Err(config_kind_mismatch(self.type_name(), c)),
        }
    }

    fn default_config(&self) -> ColumnConfig {
        ColumnConfig::Number(NumberConfig::default())
    }
}

fn check_number_config(c: &NumberConfig) -> Result<(), ValidationError> {
    for (field, v) in [("min", c.min), ("max", c.max), ("step", c.step)] {
        if v.is_some_and(|v| !v.is_finite()) {
            return Err(ValidationError::new(
                format!("column.config.{field}"),
                "must be a finite number",
            ));
        }
    }
    if let (Some(min), Some(max)) = (c.min, c.max)
        && min > max
    {
        return Err(ValidationError::new(
            "column.config.min",
            format!("min {min} is greater than max {max}"),
        ));
    }
    if c.step.is_some_and(|s| s <= 0.0) {
        return Err(ValidationError::new("column.config.step", "must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(c: NumberConfig) -> ColumnConfig {
        ColumnConfig::Number(c)
    }

    #[test]
    fn test_invalid_input_becomes_zero() {
        assert_eq!(NumberType.validate(&Value::from("abc")), Value::from(0.0));
        assert_eq!(NumberType.validate(&Value::from("NaN")), Value::from(0.0));
        assert_eq!(NumberType.validate(&Value::from("inf")), Value::from(0.0));
        assert_eq!(NumberType.validate(&Value::Null), Value::from(0.0));
        assert_eq!(NumberType.validate(&Value::from(true)), Value::from(0.0));
    }

    #[test]
    fn test_parses_text() {
        assert_eq!(NumberType.validate(&Value::from(" 42 ")), Value::from(42.0));
        assert_eq!(NumberType.validate(&Value::from("-3.5")), Value::from(-3.5));
    }

    #[test]
    fn test_round_trip_through_format() {
        let v = NumberType.validate(&Value::from("42"));
        let shown = NumberType.format(&v);
        assert_eq!(shown, "42");
        assert_eq!(NumberType.validate(&Value::from(shown)), v);
    }

    #[test]
    fn test_coerce_clamps_and_rounds() {
        let c = config(NumberConfig {
            min: Some(0.0),
            max: Some(120.0),
            precision: Some(1),
            ..Default::default()
        });
        assert_eq!(NumberType.coerce(&Value::from("130"), &c), Value::from(120.0));
        assert_eq!(NumberType.coerce(&Value::from("-4"), &c), Value::from(0.0));
        assert_eq!(NumberType.coerce(&Value::from("3.14159"), &c), Value::from(3.1));
    }

    #[test]
    fn test_format_styles() {
        let currency = config(NumberConfig {
            format: NumberFormat::Currency,
            ..Default::default()
        });
        assert_eq!(NumberType.format_with(&Value::from(12.5), &currency), "$12.50");
        assert_eq!(NumberType.format_with(&Value::from(-3.0), &currency), "-$3.00");
        let percent = config(NumberConfig {
            format: NumberFormat::Percentage,
            ..Default::default()
        });
        assert_eq!(NumberType.format_with(&Value::from(40.0), &percent), "40%");
    }

    #[test]
    fn test_config_check() {
        let bad = config(NumberConfig {
            min: Some(10.0),
            max: Some(1.0),
            ..Default::default()
        });
        assert!(NumberType.validate_config(&bad).is_err());
        let bad_step = config(NumberConfig {
            step: Some(0.0),
            ..Default::default()
        });
        assert!(NumberType.validate_config(&bad_step).is_err());
        assert!(NumberType.validate_config(&ColumnConfig::default()).is_ok());
    }
}
