//! Global table options

use serde::Deserialize;
use serde::Serialize;

use crate::error::ValidationError;
use crate::sizing::DEFAULT_MAX_COLUMN_WIDTH;
use crate::sizing::DEFAULT_MIN_COLUMN_WIDTH;
use crate::types::Alignment;

/// How available width is distributed across columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizingMode {
    /// Each column keeps its configured width.
    Fixed,
    /// Columns size to their content and shrink together when too wide.
    Auto,
    /// Blend of an equal share and a content estimate.
    #[default]
    Balanced,
    /// Every column gets the same share. Unrecognised mode names land here.
    #[serde(other)]
    Equal,
}

impl SizingMode {
    /// Parses a mode name, treating anything unrecognised as [`SizingMode::Equal`].
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "fixed" => SizingMode::Fixed,
            "auto" => SizingMode::Auto,
            "balanced" => SizingMode::Balanced,
            _ => SizingMode::Equal,
        }
    }
}

/// Vertical spacing of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Compact,
    #[default]
    Normal,
    Comfortable,
}

impl Density {
    /// Row height in pixels.
    pub fn row_height(&self) -> u16 {
        match self {
            Density::Compact => 32,
            Density::Normal => 40,
            Density::Comfortable => 48,
        }
    }
}

/// Named option sets for common table styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// No row numbers or selection, compact rows.
    Minimal,
    /// Row numbers, selection, compact striped rows, content sizing.
    Spreadsheet,
    /// No editing or selection, roomy striped rows.
    Readonly,
}

/// Global display configuration.
///
/// Options are replaced as a whole. Every constructor and update runs
/// [`TableOptions::validate`], so an inconsistent set never escapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableOptions {
    pub show_row_numbers: bool,
    pub show_select_all: bool,
    pub enable_selection: bool,
    pub enable_editing: bool,
    pub show_action_column: bool,
    pub column_sizing: SizingMode,
    pub min_column_width: f64,
    pub max_column_width: f64,
    pub density: Density,
    pub striped: bool,
    /// Type given to new columns when none is chosen.
    pub default_column_type: String,
    /// Restricts the "add column" picker. `None` offers every registered type.
    pub available_column_types: Option<Vec<String>>,
    /// Alignment for cells whose type is unknown.
    pub default_alignment: Alignment,
    pub default_header_alignment: Alignment,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            show_row_numbers: true,
            show_select_all: true,
            enable_selection: true,
            enable_editing: true,
            show_action_column: true,
            column_sizing: SizingMode::Balanced,
            min_column_width: DEFAULT_MIN_COLUMN_WIDTH,
            max_column_width: DEFAULT_MAX_COLUMN_WIDTH,
            density: Density::Normal,
            striped: false,
            default_column_type: "text".to_string(),
            available_column_types: None,
            default_alignment: Alignment::Left,
            default_header_alignment: Alignment::Left,
        }
    }
}

impl TableOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for one of the named presets.
    pub fn preset(preset: Preset) -> Self {
        let base = Self::default();
        match preset {
            Preset::Minimal => Self {
                show_row_numbers: false,
                show_select_all: false,
                enable_selection: false,
                density: Density::Compact,
                striped: false,
                ..base
            },
            Preset::Spreadsheet => Self {
                show_row_numbers: true,
                show_select_all: true,
                enable_selection: true,
                density: Density::Compact,
                column_sizing: SizingMode::Auto,
                striped: true,
                ..base
            },
            Preset::Readonly => Self {
                enable_editing: false,
                enable_selection: false,
                show_select_all: false,
                density: Density::Comfortable,
                striped: true,
                ..base
            },
        }
    }

    /// Checks the options as a whole.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.min_column_width.is_finite() || self.min_column_width <= 0.0 {
            return Err(ValidationError::new("options.minColumnWidth", "must be a positive number"));
        }
        if !self.max_column_width.is_finite() {
            return Err(ValidationError::new("options.maxColumnWidth", "must be a finite number"));
        }
        if self.min_column_width > self.max_column_width {
            return Err(ValidationError::new(
                "options.minColumnWidth",
                format!(
                    "{} is greater than maxColumnWidth {}",
                    self.min_column_width, self.max_column_width
                ),
            ));
        }
        if self.show_select_all && !self.enable_selection {
            return Err(ValidationError::new(
                "options.showSelectAll",
                "requires enableSelection",
            ));
        }
        if self.default_column_type.trim().is_empty() {
            return Err(ValidationError::empty("options.defaultColumnType"));
        }
        if let Some(types) = &self.available_column_types {
            if types.is_empty() {
                return Err(ValidationError::empty("options.availableColumnTypes"));
            }
            if types.iter().any(|t| t.trim().is_empty()) {
                return Err(ValidationError::new(
                    "options.availableColumnTypes",
                    "contains an empty type name",
                ));
            }
        }
        Ok(())
    }

    /// Returns new options with `patch` applied, validated as a whole.
    pub fn merged(&self, patch: &OptionsPatch) -> Result<Self, ValidationError> {
        let mut next = self.clone();
        patch.apply_to(&mut next);
        next.validate()?;
        Ok(next)
    }
}

/// A partial options update. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionsPatch {
    pub show_row_numbers: Option<bool>,
    pub show_select_all: Option<bool>,
    pub enable_selection: Option<bool>,
    pub enable_editing: Option<bool>,
    pub show_action_column: Option<bool>,
    pub column_sizing: Option<SizingMode>,
    pub min_column_width: Option<f64>,
    pub max_column_width: Option<f64>,
    pub density: Option<Density>,
    pub striped: Option<bool>,
    pub default_column_type: Option<String>,
    /// `Some(None)` clears the allow-list.
    pub available_column_types: Option<Option<Vec<String>>>,
    pub default_alignment: Option<Alignment>,
    pub default_header_alignment: Option<Alignment>,
}

impl OptionsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    fn apply_to(&self, options: &mut TableOptions) {
        macro_rules! take {
            ($($field:ident),* $(,)?) => {
                $(if let Some(v) = &self.$field {
                    options.$field = v.clone();
                })*
            };
        }
        take!(
            show_row_numbers,
            show_select_all,
            enable_selection,
            enable_editing,
            show_action_column,
            column_sizing,
            min_column_width,
            max_column_width,
            density,
            striped,
            default_column_type,
            available_column_types,
            default_alignment,
            default_header_alignment,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let options = TableOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.column_sizing, SizingMode::Balanced);
        assert_eq!(options.min_column_width, 80.0);
        assert_eq!(options.max_column_width, 400.0);
    }

    #[test]
    fn test_presets_are_valid() {
        for preset in [Preset::Minimal, Preset::Spreadsheet, Preset::Readonly] {
            assert!(TableOptions::preset(preset).validate().is_ok(), "{preset:?}");
        }
        assert!(!TableOptions::preset(Preset::Readonly).enable_editing);
        assert_eq!(TableOptions::preset(Preset::Spreadsheet).column_sizing, SizingMode::Auto);
    }

    #[test]
    fn test_merge_rejects_inconsistent_result_and_leaves_original() {
        let options = TableOptions::default();
        let patch = OptionsPatch {
            min_column_width: Some(500.0),
            ..Default::default()
        };
        assert!(options.merged(&patch).is_err());
        assert_eq!(options.min_column_width, 80.0);

        let patch = OptionsPatch {
            enable_selection: Some(false),
            ..Default::default()
        };
        assert!(options.merged(&patch).is_err());
    }

    #[test]
    fn test_merge_applies_fields() {
        let patch = OptionsPatch {
            striped: Some(true),
            available_column_types: Some(Some(vec!["text".into()])),
            ..Default::default()
        };
        let merged = TableOptions::default().merged(&patch).unwrap();
        assert!(merged.striped);
        assert_eq!(merged.available_column_types, Some(vec!["text".to_string()]));

        let clear = OptionsPatch {
            available_column_types: Some(None),
            ..Default::default()
        };
        assert_eq!(merged.merged(&clear).unwrap().available_column_types, None);
    }

    #[test]
    fn test_unknown_sizing_mode_is_equal() {
        assert_eq!(SizingMode::parse("AUTO"), SizingMode::Auto);
        assert_eq!(SizingMode::parse("stretchy"), SizingMode::Equal);
        let parsed: SizingMode = serde_json::from_str("\"stretchy\"").unwrap();
        assert_eq!(parsed, SizingMode::Equal);
    }

    #[test]
    fn test_density_row_height() {
        assert_eq!(Density::Compact.row_height(), 32);
        assert_eq!(Density::Comfortable.row_height(), 48);
    }
}
