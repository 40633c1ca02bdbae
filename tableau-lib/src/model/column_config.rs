//! Typed per-column configuration

use serde::Deserialize;
use serde::Serialize;

/// Type-specific options attached to a column.
///
/// Each built-in category has its own strongly typed variant. Custom column
/// types carry an open JSON map that their own config check validates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "options", rename_all = "lowercase")]
pub enum ColumnConfig {
    Text(TextConfig),
    Number(NumberConfig),
    Select(SelectConfig),
    Date,
    Boolean,
    Custom(serde_json::Map<String, serde_json::Value>),
}

impl Default for ColumnConfig {
    fn default() -> Self {
        ColumnConfig::Custom(serde_json::Map::new())
    }
}

impl ColumnConfig {
    /// Returns the variant name, used in validation messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ColumnConfig::Text(_) => "text",
            ColumnConfig::Number(_) => "number",
            ColumnConfig::Select(_) => "select",
            ColumnConfig::Date => "date",
            ColumnConfig::Boolean => "boolean",
            ColumnConfig::Custom(_) => "custom",
        }
    }

    /// Returns `true` for an empty custom map, which every type accepts.
    pub fn is_empty(&self) -> bool {
        matches!(self, ColumnConfig::Custom(map) if map.is_empty())
    }

    pub fn as_text(&self) -> Option<&TextConfig> {
        match self {
            ColumnConfig::Text(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&NumberConfig> {
        match self {
            ColumnConfig::Number(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_select(&self) -> Option<&SelectConfig> {
        match self {
            ColumnConfig::Select(c) => Some(c),
            _ => None,
        }
    }
}

/// Options for text columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Maximum length in characters; longer input is truncated on commit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default)]
    pub multiline: bool,
}

/// Display style for number columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberFormat {
    #[default]
    Decimal,
    Currency,
    Percentage,
}

/// Options for number columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    /// Number of decimal places kept on commit and shown on display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u8>,
    #[serde(default)]
    pub format: NumberFormat,
}

/// A single choice of a select column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Options for select columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectConfig {
    #[serde(default)]
    pub options: Vec<SelectOption>,
    #[serde(default)]
    pub multiple: bool,
}

impl SelectConfig {
    /// Looks up the option with the given stored value.
    pub fn option(&self, value: &str) -> Option<&SelectOption> {
        self.options.iter().find(|o| o.value == value)
    }
}
