//! Plain-text table layout.
//!
//! Pixel widths from the allocator are converted to terminal columns using
//! the same average glyph width the allocator estimates text with.

use tableau_lib::config::Configuration;
use tableau_lib::sizing::FONT_SIZE;
use tableau_lib::sizing::ROW_NUMBER_WIDTH;
use tableau_lib::store::TableStore;
use tableau_lib::types::Alignment;
use tableau_lib::view::TableView;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

const PX_PER_CHAR: f64 = FONT_SIZE * 0.6;
const MIN_CHARS: usize = 3;
const SEPARATOR: &str = " │ ";

pub fn px_to_chars(px: f64) -> usize {
    ((px / PX_PER_CHAR).floor() as usize).max(MIN_CHARS)
}

/// Truncates `text` to `width` terminal columns and pads it per `alignment`.
pub fn fit(text: &str, width: usize, alignment: Alignment) -> String {
    let (mut out, used) = if text.width() > width {
        let mut out = String::new();
        let mut used = 0;
        for c in text.chars() {
            let w = c.width().unwrap_or(0);
            if used + w + 1 > width {
                break;
            }
            out.push(c);
            used += w;
        }
        out.push('…');
        (out, used + 1)
    } else {
        (text.to_string(), text.width())
    };
    let pad = width.saturating_sub(used);
    match alignment {
        Alignment::Left => out.push_str(&" ".repeat(pad)),
        Alignment::Right => out.insert_str(0, &" ".repeat(pad)),
        Alignment::Center => {
            let left = pad / 2;
            out.insert_str(0, &" ".repeat(left));
            out.push_str(&" ".repeat(pad - left));
        }
    }
    out
}

/// Renders every row of a table as aligned text lines.
pub fn render_table<S: TableStore + ?Sized>(view: &TableView<'_, S>, config: &Configuration, container_width: f64) -> Vec<String> {
    let columns = view.columns();
    let rows = view.rows();
    let widths = view.column_widths(container_width);
    let chars: Vec<usize> = columns
        .iter()
        .map(|c| px_to_chars(widths.get(&c.id).unwrap_or(c.width)))
        .collect();
    let numbers = config.options().show_row_numbers;
    let number_chars = px_to_chars(ROW_NUMBER_WIDTH);

    let mut lines = Vec::with_capacity(rows.len() + 2);

    let mut header: Vec<String> = Vec::new();
    if numbers {
        header.push(fit("#", number_chars, Alignment::Right));
    }
    for (column, width) in columns.iter().zip(&chars) {
        header.push(fit(&column.name, *width, config.header_alignment(&column.column_type)));
    }
    lines.push(header.join(SEPARATOR));

    let rule: Vec<String> = numbers
        .then_some(number_chars)
        .into_iter()
        .chain(chars.iter().copied())
        .map(|w| "─".repeat(w))
        .collect();
    lines.push(rule.join("─┼─"));

    for (index, row) in rows.iter().enumerate() {
        let mut cells: Vec<String> = Vec::new();
        if numbers {
            cells.push(fit(&(index + 1).to_string(), number_chars, Alignment::Right));
        }
        for (column, width) in columns.iter().zip(&chars) {
            let rendered = view.render_cell(&row.id, column, None);
            cells.push(fit(&rendered.text(), *width, rendered.alignment()));
        }
        lines.push(cells.join(SEPARATOR));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_pads_by_alignment() {
        assert_eq!(fit("ab", 5, Alignment::Left), "ab   ");
        assert_eq!(fit("ab", 5, Alignment::Right), "   ab");
        assert_eq!(fit("ab", 5, Alignment::Center), " ab  ");
    }

    #[test]
    fn test_fit_truncates_with_ellipsis() {
        assert_eq!(fit("abcdefgh", 5, Alignment::Left), "abcd…");
        assert_eq!(fit("abcdefgh", 5, Alignment::Left).width(), 5);
    }

    #[test]
    fn test_fit_counts_wide_glyphs() {
        let out = fit("日本語テキスト", 6, Alignment::Left);
        assert_eq!(out.width(), 6);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn test_px_to_chars() {
        assert_eq!(px_to_chars(84.0), 10);
        assert_eq!(px_to_chars(1.0), MIN_CHARS);
    }
}
