//! Renderer contract for host UIs
//!
//! A [`CellRenderer`] turns a cell's value and edit state into a
//! [`RenderedCell`] description. Host UIs (terminal, GUI, web) draw that
//! description however they like; the edit state machine handles the
//! change callbacks.

use crate::edit::EditBuffer;
use crate::edit::Staged;
use crate::model::Column;
use crate::model::Value;
use crate::types::Alignment;
use crate::types::ColumnType;

/// Everything a renderer gets to see about one cell.
#[derive(Debug, Clone, Copy)]
pub struct CellProps<'a> {
    /// Committed value, or the type default when the cell has none.
    pub value: &'a Value,
    pub column: &'a Column,
    pub definition: &'a dyn ColumnType,
    pub readonly: bool,
    /// Staged edit, present while the cell is editing.
    pub staged: Option<&'a Staged>,
}

impl CellProps<'_> {
    pub fn editing(&self) -> bool {
        self.staged.is_some()
    }
}

/// What a cell should look like.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedCell {
    /// Read-only view of a value.
    Display { text: String, alignment: Alignment },
    /// Open editor.
    Editor {
        text: String,
        /// Byte offset of the caret in `text`.
        cursor: usize,
        all_selected: bool,
        placeholder: Option<String>,
        alignment: Alignment,
    },
    /// The column's type is not registered.
    Unknown { type_name: String },
}

impl RenderedCell {
    /// Text to draw for this cell.
    pub fn text(&self) -> String {
        match self {
            RenderedCell::Display { text, .. } | RenderedCell::Editor { text, .. } => text.clone(),
            RenderedCell::Unknown { type_name } => format!("Unknown type: {type_name}"),
        }
    }

    pub fn alignment(&self) -> Alignment {
        match self {
            RenderedCell::Display { alignment, .. } | RenderedCell::Editor { alignment, .. } => *alignment,
            RenderedCell::Unknown { .. } => Alignment::Left,
        }
    }

    pub fn is_editor(&self) -> bool {
        matches!(self, RenderedCell::Editor { .. })
    }
}

/// Draws cells of one or more column types.
pub trait CellRenderer: Send + Sync + std::fmt::Debug {
    fn render(&self, props: &CellProps<'_>) -> RenderedCell;

    /// Staged edit created when the cell is activated.
    ///
    /// The default opens a text editor holding the value's edit text with
    /// everything selected.
    fn begin_edit(&self, value: &Value, _column: &Column, definition: &dyn ColumnType) -> Staged {
        Staged::Text(EditBuffer::selected(definition.edit_text(value)))
    }
}

/// Generic renderer: formatted text in view mode, a text input when editing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl CellRenderer for TextRenderer {
    fn render(&self, props: &CellProps<'_>) -> RenderedCell {
        let alignment = props.definition.alignment();
        match props.staged {
            Some(Staged::Text(buffer)) => RenderedCell::Editor {
                text: buffer.text().to_string(),
                cursor: buffer.cursor(),
                all_selected: buffer.is_all_selected(),
                placeholder: props
                    .column
                    .config
                    .as_text()
                    .and_then(|c| c.placeholder.clone()),
                alignment,
            },
            Some(Staged::Value(value)) => {
                let text = props.definition.format_with(value, &props.column.config);
                let cursor = text.len();
                RenderedCell::Editor {
                    text,
                    cursor,
                    all_selected: false,
                    placeholder: None,
                    alignment,
                }
            }
            None => RenderedCell::Display {
                text: props.definition.format_with(props.value, &props.column.config),
                alignment,
            },
        }
    }
}

/// Checkbox renderer. Activating the cell stages the flipped value.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanRenderer;

impl BooleanRenderer {
    fn glyph(value: &Value) -> &'static str {
        if value.as_bool().unwrap_or(false) { "[x]" } else { "[ ]" }
    }
}

impl CellRenderer for BooleanRenderer {
    fn render(&self, props: &CellProps<'_>) -> RenderedCell {
        let alignment = props.definition.alignment();
        match props.staged {
            Some(staged) => RenderedCell::Editor {
                text: Self::glyph(&props.definition.validate(&staged.raw())).to_string(),
                cursor: 0,
                all_selected: false,
                placeholder: None,
                alignment,
            },
            None => RenderedCell::Display {
                text: Self::glyph(props.value).to_string(),
                alignment,
            },
        }
    }

    fn begin_edit(&self, value: &Value, _column: &Column, definition: &dyn ColumnType) -> Staged {
        let current = definition.validate(value).as_bool().unwrap_or(false);
        Staged::Value(Value::Bool(!current))
    }
}
