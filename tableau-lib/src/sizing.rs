//! Column width allocation
//!
//! A pure function from columns, their cell texts and a sizing config to a
//! width per column. Text width is estimated from character counts; it only
//! drives a visual default.

use crate::config::SizingMode;
use crate::model::Column;
use crate::model::ColumnId;

/// Width reserved for the row number gutter.
pub const ROW_NUMBER_WIDTH: f64 = 48.0;
/// Width reserved for the trailing action column.
pub const ACTION_COLUMN_WIDTH: f64 = 64.0;
/// Horizontal padding inside a cell (both sides).
pub const CELL_PADDING: f64 = 24.0;
/// Font size assumed for headers and cells.
pub const FONT_SIZE: f64 = 14.0;
/// Content estimate used by balanced sizing for a column with no rows.
pub const EMPTY_CONTENT_WIDTH: f64 = 50.0;
pub const DEFAULT_MIN_COLUMN_WIDTH: f64 = 80.0;
pub const DEFAULT_MAX_COLUMN_WIDTH: f64 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Medium,
}

/// Rough pixel width of `text`: characters times an average glyph width.
pub fn estimate_text_width(text: &str, weight: FontWeight, size: f64) -> f64 {
    let glyph = size * 0.6;
    let weight = match weight {
        FontWeight::Normal => 1.0,
        FontWeight::Medium => 1.1,
    };
    text.chars().count() as f64 * glyph * weight
}

/// Inputs that control allocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingConfig {
    pub mode: SizingMode,
    pub container_width: f64,
    pub min_column_width: f64,
    pub max_column_width: f64,
    pub show_row_numbers: bool,
    pub show_action_column: bool,
}

impl SizingConfig {
    /// Width taken by the row number and action columns.
    pub fn reserved_width(&self) -> f64 {
        let mut reserved = 0.0;
        if self.show_row_numbers {
            reserved += ROW_NUMBER_WIDTH;
        }
        if self.show_action_column {
            reserved += ACTION_COLUMN_WIDTH;
        }
        reserved
    }

    /// Width left for data columns, never negative.
    pub fn available_width(&self) -> f64 {
        (self.container_width - self.reserved_width()).max(0.0)
    }

    /// The `(min, max)` column width range actually applied. Non-finite or
    /// negative bounds fall back to the defaults, and a max below the min is
    /// raised to the min.
    pub fn bounds(&self) -> (f64, f64) {
        let usable = |w: f64| w.is_finite() && w >= 0.0;
        let min = if usable(self.min_column_width) {
            self.min_column_width
        } else {
            DEFAULT_MIN_COLUMN_WIDTH
        };
        let max = if usable(self.max_column_width) {
            self.max_column_width
        } else {
            DEFAULT_MAX_COLUMN_WIDTH
        };
        (min, max.max(min))
    }

    fn clamp(&self, width: f64) -> f64 {
        let (min, max) = self.bounds();
        width.clamp(min, max)
    }
}

/// One column and the display text of every cell in it.
#[derive(Debug, Clone, Copy)]
pub struct ColumnData<'a> {
    pub column: &'a Column,
    pub values: &'a [String],
}

impl<'a> ColumnData<'a> {
    pub fn new(column: &'a Column, values: &'a [String]) -> Self {
        Self { column, values }
    }

    fn header_width(&self) -> f64 {
        estimate_text_width(&self.column.name, FontWeight::Medium, FONT_SIZE)
    }

    fn cell_widths(&self) -> impl Iterator<Item = f64> + '_ {
        self.values
            .iter()
            .map(|v| estimate_text_width(v, FontWeight::Normal, FONT_SIZE))
    }
}

/// Allocated widths in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnWidths(Vec<(ColumnId, f64)>);

impl ColumnWidths {
    pub fn get(&self, id: &ColumnId) -> Option<f64> {
        self.0.iter().find(|(c, _)| c == id).map(|(_, w)| *w)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ColumnId, f64)> {
        self.0.iter().map(|(c, w)| (c, *w))
    }

    pub fn total(&self) -> f64 {
        self.0.iter().map(|(_, w)| w).sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Distributes width across columns according to `config.mode`.
///
/// Outside of fixed mode the total stays within the available width unless
/// every column is already at the minimum width.
pub fn calculate_column_widths(columns: &[ColumnData<'_>], config: &SizingConfig) -> ColumnWidths {
    if columns.is_empty() {
        return ColumnWidths::default();
    }
    let available = config.available_width();
    let count = columns.len() as f64;
    let (min, _) = config.bounds();

    let widths: Vec<f64> = match config.mode {
        SizingMode::Fixed => {
            return ColumnWidths(
                columns
                    .iter()
                    .map(|c| (c.column.id.clone(), config.clamp(c.column.width)))
                    .collect(),
            );
        }
        SizingMode::Auto => {
            let natural: Vec<f64> = columns
                .iter()
                .map(|c| {
                    let content = c.cell_widths().fold(c.header_width(), f64::max);
                    config.clamp(content + CELL_PADDING)
                })
                .collect();
            fit_within(natural, available, min)
        }
        SizingMode::Balanced => {
            let share = (available / count).max(min);
            let blended: Vec<f64> = columns
                .iter()
                .map(|c| {
                    let mean = if c.values.is_empty() {
                        EMPTY_CONTENT_WIDTH
                    } else {
                        c.cell_widths().sum::<f64>() / c.values.len() as f64
                    };
                    let content = (c.header_width() + mean) / 2.0 + CELL_PADDING;
                    config.clamp((share + content) / 2.0)
                })
                .collect();
            fit_within(blended, available, min)
        }
        SizingMode::Equal => {
            let share = config.clamp(available / count);
            fit_within(vec![share; columns.len()], available, min)
        }
    };

    ColumnWidths(
        columns
            .iter()
            .zip(widths)
            .map(|(c, w)| (c.column.id.clone(), w))
            .collect(),
    )
}

/// Scales widths down by a common ratio so they sum to `available`.
///
/// Columns that would drop below `min` are pinned there and the rest share
/// what is left. Widths that already fit are returned unchanged.
fn fit_within(widths: Vec<f64>, available: f64, min: f64) -> Vec<f64> {
    let total: f64 = widths.iter().sum();
    if total <= available {
        return widths;
    }

    let mut pinned = vec![false; widths.len()];
    loop {
        let pinned_count = pinned.iter().filter(|p| **p).count() as f64;
        let budget = available - pinned_count * min;
        let free: f64 = widths
            .iter()
            .zip(&pinned)
            .filter(|(_, p)| !**p)
            .map(|(w, _)| w)
            .sum();

        if budget <= 0.0 || free <= 0.0 {
            return vec![min; widths.len()];
        }

        let scale = budget / free;
        let mut changed = false;
        for (w, p) in widths.iter().zip(pinned.iter_mut()) {
            if !*p && w * scale < min {
                *p = true;
                changed = true;
            }
        }

        if !changed {
            return widths
                .iter()
                .zip(&pinned)
                .map(|(w, p)| if *p { min } else { w * scale })
                .collect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnConfig;
    use crate::model::TableId;

    const EPS: f64 = 1e-9;

    fn column(id: &str, name: &str, width: f64) -> Column {
        Column {
            id: ColumnId::new(id).unwrap(),
            table_id: TableId::new("t").unwrap(),
            name: name.to_string(),
            column_type: "text".to_string(),
            width,
            position: 0,
            required: false,
            readonly: false,
            config: ColumnConfig::default(),
        }
    }

    fn config(mode: SizingMode, container_width: f64) -> SizingConfig {
        SizingConfig {
            mode,
            container_width,
            min_column_width: 80.0,
            max_column_width: 400.0,
            show_row_numbers: true,
            show_action_column: true,
        }
    }

    fn texts(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_estimate_text_width() {
        assert!((estimate_text_width("abcd", FontWeight::Normal, 14.0) - 33.6).abs() < EPS);
        assert!((estimate_text_width("abcd", FontWeight::Medium, 14.0) - 36.96).abs() < EPS);
        assert_eq!(estimate_text_width("", FontWeight::Normal, 14.0), 0.0);
    }

    #[test]
    fn test_reserved_width() {
        let mut c = config(SizingMode::Auto, 1000.0);
        assert_eq!(c.available_width(), 888.0);
        c.show_row_numbers = false;
        c.show_action_column = false;
        assert_eq!(c.available_width(), 1000.0);
    }

    #[test]
    fn test_fixed_clamps_and_ignores_content() {
        let narrow = column("a", "A", 50.0);
        let wide = column("b", "B", 700.0);
        let normal = column("c", "C", 200.0);
        let long = texts(&["x".repeat(500).as_str()]);
        let data = [
            ColumnData::new(&narrow, &long),
            ColumnData::new(&wide, &[]),
            ColumnData::new(&normal, &long),
        ];
        let widths = calculate_column_widths(&data, &config(SizingMode::Fixed, 10.0));
        assert_eq!(widths.get(&narrow.id), Some(80.0));
        assert_eq!(widths.get(&wide.id), Some(400.0));
        assert_eq!(widths.get(&normal.id), Some(200.0));
    }

    #[test]
    fn test_inverted_or_non_finite_bounds_do_not_panic() {
        let a = column("a", "A", 200.0);
        let values = texts(&["hello"]);
        let data = [ColumnData::new(&a, &values)];

        let mut inverted = config(SizingMode::Fixed, 1000.0);
        inverted.min_column_width = 300.0;
        inverted.max_column_width = 100.0;
        assert_eq!(inverted.bounds(), (300.0, 300.0));
        assert_eq!(calculate_column_widths(&data, &inverted).get(&a.id), Some(300.0));

        let mut nan = config(SizingMode::Auto, 1000.0);
        nan.min_column_width = f64::NAN;
        nan.max_column_width = f64::INFINITY;
        assert_eq!(nan.bounds(), (DEFAULT_MIN_COLUMN_WIDTH, DEFAULT_MAX_COLUMN_WIDTH));
        for mode in [SizingMode::Auto, SizingMode::Balanced, SizingMode::Equal] {
            let mut c = inverted;
            c.mode = mode;
            let width = calculate_column_widths(&data, &c).get(&a.id).unwrap();
            assert!(width.is_finite());
        }
    }

    #[test]
    fn test_auto_uses_natural_widths_when_they_fit() {
        let name = column("name", "Name", 200.0);
        let values = texts(&["Alice Johnson", "Bob"]);
        let data = [ColumnData::new(&name, &values)];
        let widths = calculate_column_widths(&data, &config(SizingMode::Auto, 1000.0));
        // 13 chars * 8.4 + 24 padding
        assert!((widths.get(&name.id).unwrap() - 133.2).abs() < EPS);
    }

    #[test]
    fn test_auto_natural_width_floors_at_min() {
        let id = column("id", "ID", 200.0);
        let values = texts(&["1", "2"]);
        let data = [ColumnData::new(&id, &values)];
        let widths = calculate_column_widths(&data, &config(SizingMode::Auto, 1000.0));
        assert_eq!(widths.get(&id.id), Some(80.0));
    }

    #[test]
    fn test_auto_scales_down_to_fit() {
        let a = column("a", "A", 200.0);
        let b = column("b", "B", 200.0);
        let long = texts(&["y".repeat(60).as_str()]);
        let data = [ColumnData::new(&a, &long), ColumnData::new(&b, &long)];
        // Each natural width clamps to 400; 512 available after reserving 112.
        let widths = calculate_column_widths(&data, &config(SizingMode::Auto, 624.0));
        assert!((widths.get(&a.id).unwrap() - 256.0).abs() < EPS);
        assert!((widths.total() - 512.0).abs() < EPS);
    }

    #[test]
    fn test_scaling_pins_columns_at_min() {
        let short = column("s", "S", 200.0);
        let long = column("l", "L", 200.0);
        let tiny = texts(&["ab"]);
        let huge = texts(&["z".repeat(60).as_str()]);
        let data = [ColumnData::new(&short, &tiny), ColumnData::new(&long, &huge)];
        // Natural: 80 and 400. Available 312: 80 * 312/480 < 80 so it pins.
        let widths = calculate_column_widths(&data, &config(SizingMode::Auto, 424.0));
        assert_eq!(widths.get(&short.id), Some(80.0));
        assert!((widths.get(&long.id).unwrap() - 232.0).abs() < EPS);
        assert!((widths.total() - 312.0).abs() < EPS);
    }

    #[test]
    fn test_balanced_blends_share_and_content() {
        let name = column("name", "Name", 200.0);
        let values = texts(&["Alice", "Bob"]);
        let data = [ColumnData::new(&name, &values)];
        let widths = calculate_column_widths(&data, &config(SizingMode::Balanced, 512.0));
        // share 400; header 36.96; mean cell (42 + 25.2) / 2 = 33.6
        // content (36.96 + 33.6) / 2 + 24 = 59.28; blend (400 + 59.28) / 2
        assert!((widths.get(&name.id).unwrap() - 229.64).abs() < 1e-6);
    }

    #[test]
    fn test_balanced_never_exceeds_available() {
        let cols: Vec<Column> = (0..6).map(|i| column(&format!("c{i}"), "Column", 200.0)).collect();
        let values = texts(&["some fairly long cell content here"]);
        let data: Vec<_> = cols.iter().map(|c| ColumnData::new(c, &values)).collect();
        let c = config(SizingMode::Balanced, 800.0);
        let widths = calculate_column_widths(&data, &c);
        assert!(widths.total() <= c.available_width() + EPS);
    }

    #[test]
    fn test_equal_share_fallback() {
        let a = column("a", "A", 200.0);
        let b = column("b", "B", 200.0);
        let data = [ColumnData::new(&a, &[]), ColumnData::new(&b, &[])];
        let widths = calculate_column_widths(&data, &config(SizingMode::Equal, 512.0));
        assert_eq!(widths.get(&a.id), Some(200.0));
        assert_eq!(widths.get(&b.id), Some(200.0));
    }

    #[test]
    fn test_no_columns() {
        let widths = calculate_column_widths(&[], &config(SizingMode::Auto, 500.0));
        assert!(widths.is_empty());
    }
}
