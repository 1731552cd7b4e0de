//! Single-line edit buffer with a cursor tracked in three units.
//!
//! The cursor position is kept as a byte offset into the UTF-8 text, as a
//! char (code point) offset and as a terminal column. All three always refer
//! to the same position.

use unicode_width::UnicodeWidthChar;

const TAB_STOP: usize = 8;

/// Editable input line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    text: String,
    byte_offset: usize,
    codepoint_offset: usize,
    visual_offset: usize,
}

impl EditBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `c` at the cursor and move past it.
    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.byte_offset, c);
        self.move_cursor_to(self.byte_offset + c.len_utf8());
    }

    /// Delete the char before the cursor. No-op at the start.
    pub fn delete_char_backward(&mut self) {
        if self.byte_offset == 0 {
            return;
        }
        self.move_cursor_backward();
        self.text.remove(self.byte_offset);
    }

    /// Move one char right. No-op at the end.
    pub fn move_cursor_forward(&mut self) {
        if let Some(c) = self.text[self.byte_offset..].chars().next() {
            self.move_cursor_to(self.byte_offset + c.len_utf8());
        }
    }

    /// Move one char left. No-op at the start.
    pub fn move_cursor_backward(&mut self) {
        if let Some(c) = self.text[..self.byte_offset].chars().next_back() {
            self.move_cursor_to(self.byte_offset - c.len_utf8());
        }
    }

    /// Place the cursor at `byte_offset` and recompute the other offsets.
    ///
    /// Offsets past the end clamp to the end; offsets inside a multi-byte
    /// char clamp back to that char's start.
    pub fn move_cursor_to(&mut self, byte_offset: usize) {
        let mut offset = byte_offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }

        self.byte_offset = offset;
        self.codepoint_offset = 0;
        self.visual_offset = 0;
        for c in self.text[..offset].chars() {
            self.codepoint_offset += 1;
            self.visual_offset = advance_column(self.visual_offset, c);
        }
    }

    /// Return the text and reset the buffer.
    pub fn take_and_clear(&mut self) -> String {
        self.byte_offset = 0;
        self.codepoint_offset = 0;
        self.visual_offset = 0;
        std::mem::take(&mut self.text)
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in bytes.
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    /// Cursor position in chars.
    pub fn codepoint_offset(&self) -> usize {
        self.codepoint_offset
    }

    /// Cursor position in terminal columns.
    pub fn visual_offset(&self) -> usize {
        self.visual_offset
    }

    /// The text with tabs expanded to spaces, so that columns line up with
    /// [`Self::visual_offset`].
    pub fn display_text(&self) -> String {
        let mut out = String::with_capacity(self.text.len());
        let mut column = 0;
        for c in self.text.chars() {
            let next = advance_column(column, c);
            if c == '\t' {
                out.extend(std::iter::repeat_n(' ', next - column));
            } else {
                out.push(c);
            }
            column = next;
        }
        out
    }

    /// Whether the buffer holds no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Column after drawing `c` at `column`.
fn advance_column(column: usize, c: char) -> usize {
    if c == '\t' {
        return (column / TAB_STOP + 1) * TAB_STOP;
    }
    match c.width() {
        Some(width) if width > 1 => column + 2,
        _ => column + 1,
    }
}
