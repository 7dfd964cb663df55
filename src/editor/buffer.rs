use ropey::Rope;

/// Cursor position in the text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column (char offset within the line).
    pub col: usize,
}

impl Cursor {
    /// Create a cursor at a specific position.
    pub const fn at(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// Half-open range of char offsets into the document.
///
/// `start == end` denotes a caret with nothing highlighted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Build a selection from two offsets in any order.
    pub const fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub const fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    pub const fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }
}

/// Caret motions understood by [`TextBuffer::move_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Up,
    Down,
    Left,
    Right,
    /// Beginning of the line (Home)
    LineStart,
    /// End of the line (End)
    LineEnd,
    /// One word left (Ctrl+Left)
    WordLeft,
    /// One word right (Ctrl+Right)
    WordRight,
    /// Start of the buffer (Ctrl+Home)
    BufferStart,
    /// End of the buffer (Ctrl+End)
    BufferEnd,
}

/// The document text backed by a rope, plus caret and selection.
///
/// Offsets are char indices. A selection exists while `anchor` is set and
/// differs from the caret.
pub struct TextBuffer {
    rope: Rope,
    caret: usize,
    anchor: Option<usize>,
    /// Remembered column for vertical movement (sticky column).
    col_memory: usize,
}

impl TextBuffer {
    /// Create a new buffer from a string, caret at the start.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            caret: 0,
            anchor: None,
            col_memory: 0,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// The underlying rope.
    pub const fn rope(&self) -> &Rope {
        &self.rope
    }

    /// Cheap clone of the current text, suitable for history entries.
    pub fn snapshot(&self) -> Rope {
        self.rope.clone()
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Number of chars in the buffer.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let s = self.rope.line(line_idx).to_string();
        Some(s.trim_end_matches('\n').trim_end_matches('\r').to_string())
    }

    /// Length of a line in chars (without trailing newline).
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.chars().count())
    }

    /// Caret offset in chars.
    pub const fn caret(&self) -> usize {
        self.caret
    }

    /// Caret as a line/column pair.
    pub fn cursor(&self) -> Cursor {
        let line = self.rope.char_to_line(self.caret);
        Cursor::at(line, self.caret - self.rope.line_to_char(line))
    }

    /// Current selection; a caret-only selection when nothing is highlighted.
    pub fn selection(&self) -> Selection {
        self.anchor
            .map_or_else(|| Selection::caret(self.caret), |a| Selection::new(a, self.caret))
    }

    pub fn has_selection(&self) -> bool {
        !self.selection().is_empty()
    }

    /// Text covered by the selection (empty when nothing is highlighted).
    pub fn selected_text(&self) -> String {
        let sel = self.selection();
        self.rope.slice(sel.start..sel.end).to_string()
    }

    /// Highlight `start..end`, leaving the caret at `end`.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        let len = self.len_chars();
        self.anchor = Some(start.min(len));
        self.set_caret(end.min(len));
    }

    pub fn select_all(&mut self) {
        self.set_selection(0, self.len_chars());
    }

    pub const fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// Replace the whole text, e.g. when restoring a history snapshot.
    ///
    /// The caret is kept where it was when still in range.
    pub fn restore(&mut self, rope: Rope) {
        self.rope = rope;
        self.anchor = None;
        let caret = self.caret.min(self.rope.len_chars());
        self.set_caret(caret);
    }

    /// Replace the selection (or insert at the caret) with `text`.
    ///
    /// Returns the range now occupied by the inserted text; the caret ends
    /// up just after it.
    pub fn replace_selection(&mut self, text: &str) -> Selection {
        let sel = self.selection();
        if !sel.is_empty() {
            self.rope.remove(sel.start..sel.end);
        }
        self.rope.insert(sel.start, text);
        let end = sel.start + text.chars().count();
        self.anchor = None;
        self.set_caret(end);
        Selection::new(sel.start, end)
    }

    /// Insert a character at the caret, replacing any selection.
    pub fn insert_char(&mut self, ch: char) {
        let mut tmp = [0u8; 4];
        self.replace_selection(ch.encode_utf8(&mut tmp));
    }

    /// Insert a string at the caret, replacing any selection.
    ///
    /// Returns `false` when nothing changed.
    pub fn insert_str(&mut self, s: &str) -> bool {
        if s.is_empty() && !self.has_selection() {
            return false;
        }
        self.replace_selection(s);
        true
    }

    /// Split the current line at the caret (Enter key).
    pub fn split_line(&mut self) {
        self.insert_char('\n');
    }

    /// Delete the selection or the character before the caret (Backspace).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        if self.caret == 0 {
            return false;
        }
        let mut start = self.caret - 1;
        // Treat CRLF as a single line break.
        if start > 0 && self.rope.char(start) == '\n' && self.rope.char(start - 1) == '\r' {
            start -= 1;
        }
        self.rope.remove(start..self.caret);
        self.set_caret(start);
        true
    }

    /// Delete the selection or the character at the caret (Delete key).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        if self.caret >= self.len_chars() {
            return false;
        }
        self.rope.remove(self.caret..=self.caret);
        true
    }

    /// Move the caret; `extend` grows the selection instead of clearing it.
    pub fn move_by(&mut self, motion: Motion, extend: bool) {
        if extend {
            if self.anchor.is_none() {
                self.anchor = Some(self.caret);
            }
        } else if self.has_selection() && matches!(motion, Motion::Left | Motion::Right) {
            // Collapsing a selection lands on its edge rather than moving past it.
            let sel = self.selection();
            self.anchor = None;
            let edge = if motion == Motion::Left { sel.start } else { sel.end };
            self.set_caret(edge);
            return;
        } else {
            self.anchor = None;
        }

        match motion {
            Motion::Left => self.move_left(),
            Motion::Right => self.move_right(),
            Motion::Up => self.move_vertical(false),
            Motion::Down => self.move_vertical(true),
            Motion::LineStart => {
                let line = self.cursor().line;
                self.set_caret(self.rope.line_to_char(line));
            }
            Motion::LineEnd => {
                let line = self.cursor().line;
                self.set_caret(self.rope.line_to_char(line) + self.line_len(line));
            }
            Motion::WordLeft => self.move_word_left(),
            Motion::WordRight => self.move_word_right(),
            Motion::BufferStart => self.set_caret(0),
            Motion::BufferEnd => self.set_caret(self.len_chars()),
        }
    }

    /// Move the caret to a specific line and column, clamped to the text.
    pub fn move_to(&mut self, line: usize, col: usize) {
        self.anchor = None;
        let max_line = self.line_count().saturating_sub(1);
        let line = line.min(max_line);
        let col = col.min(self.line_len(line));
        self.set_caret(self.rope.line_to_char(line) + col);
    }

    // --- Private helpers ---

    fn set_caret(&mut self, offset: usize) {
        self.caret = offset;
        self.col_memory = self.cursor().col;
    }

    fn delete_selection(&mut self) -> bool {
        let sel = self.selection();
        self.anchor = None;
        if sel.is_empty() {
            return false;
        }
        self.rope.remove(sel.start..sel.end);
        self.set_caret(sel.start);
        true
    }

    fn move_left(&mut self) {
        if self.caret > 0 {
            self.set_caret(self.caret - 1);
        }
    }

    fn move_right(&mut self) {
        if self.caret < self.len_chars() {
            self.set_caret(self.caret + 1);
        }
    }

    fn move_vertical(&mut self, down: bool) {
        let line = self.cursor().line;
        let target = if down {
            if line + 1 >= self.line_count() {
                return;
            }
            line + 1
        } else {
            if line == 0 {
                return;
            }
            line - 1
        };
        let col = self.col_memory.min(self.line_len(target));
        // Keep the sticky column across short lines.
        let memory = self.col_memory;
        self.caret = self.rope.line_to_char(target) + col;
        self.col_memory = memory;
    }

    fn move_word_left(&mut self) {
        let Cursor { line, col } = self.cursor();
        if col == 0 {
            if line > 0 {
                let prev = line - 1;
                self.set_caret(self.rope.line_to_char(prev) + self.line_len(prev));
            }
            return;
        }

        let chars: Vec<char> = self.line_at(line).unwrap_or_default().chars().collect();
        let mut pos = col.min(chars.len());
        while pos > 0 && !is_word_char(chars[pos - 1]) {
            pos -= 1;
        }
        while pos > 0 && is_word_char(chars[pos - 1]) {
            pos -= 1;
        }
        self.set_caret(self.rope.line_to_char(line) + pos);
    }

    fn move_word_right(&mut self) {
        let Cursor { line, col } = self.cursor();
        let line_len = self.line_len(line);
        if col >= line_len {
            if line + 1 < self.line_count() {
                self.set_caret(self.rope.line_to_char(line + 1));
            }
            return;
        }

        let chars: Vec<char> = self.line_at(line).unwrap_or_default().chars().collect();
        let mut pos = col;
        while pos < chars.len() && is_word_char(chars[pos]) {
            pos += 1;
        }
        while pos < chars.len() && !is_word_char(chars[pos]) {
            pos += 1;
        }
        self.set_caret(self.rope.line_to_char(line) + pos);
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("caret", &self.caret)
            .field("anchor", &self.anchor)
            .finish()
    }
}
