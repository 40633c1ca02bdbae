//! Text buffer behind an editing cell

/// Editable text with a byte-offset cursor.
///
/// A buffer can start with its whole content selected, the state an editor
/// is in right after it opens. Typing then replaces the content, and moving
/// the cursor collapses the selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    text: String,
    cursor: usize,
    all_selected: bool,
}

impl EditBuffer {
    /// Creates a buffer with the cursor at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self {
            text,
            cursor,
            all_selected: false,
        }
    }

    /// Creates a buffer with all of its text selected.
    pub fn selected(text: impl Into<String>) -> Self {
        Self {
            all_selected: true,
            ..Self::new(text)
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position as a byte offset into [`text`](Self::text).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_all_selected(&self) -> bool {
        self.all_selected
    }

    /// Replaces the content, leaving the cursor at the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        *self = Self::new(text);
    }

    fn take_selection(&mut self) -> bool {
        if self.all_selected {
            self.text.clear();
            self.cursor = 0;
            self.all_selected = false;
            true
        } else {
            false
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.take_selection();
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Deletes the character before the cursor (backspace).
    pub fn delete_char_before(&mut self) {
        if self.take_selection() || self.cursor == 0 {
            return;
        }
        let prev = self.text[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        self.text.remove(prev);
        self.cursor = prev;
    }

    /// Deletes the character at the cursor (delete key).
    pub fn delete_char_at(&mut self) {
        if self.take_selection() {
            return;
        }
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
        }
    }

    pub fn cursor_left(&mut self) {
        if self.all_selected {
            self.all_selected = false;
            self.cursor = 0;
            return;
        }
        self.cursor = self.text[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
    }

    pub fn cursor_right(&mut self) {
        if self.all_selected {
            self.all_selected = false;
            self.cursor = self.text.len();
            return;
        }
        self.cursor = self.text[self.cursor..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| self.cursor + i)
            .unwrap_or(self.text.len());
    }

    pub fn cursor_home(&mut self) {
        self.all_selected = false;
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.all_selected = false;
        self.cursor = self.text.len();
    }
}
