use std::ops::Range;

use ropey::Rope;
use unicode_width::UnicodeWidthChar;

use super::history::{Coalesce, TextEdit, UndoHistory};

/// Undo steps kept when no explicit limit is given.
pub const DEFAULT_UNDO_LIMIT: usize = 1_000;

/// Columns a tab character occupies on screen.
pub const TAB_DISPLAY_WIDTH: usize = 4;

/// Cursor position in the editor buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column (byte offset within the line).
    pub col: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: usize,
}

impl Cursor {
    /// Create a cursor at line 0, column 0.
    pub const fn new() -> Self {
        Self {
            line: 0,
            col: 0,
            col_memory: 0,
        }
    }

    /// Create a cursor at a specific position.
    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            col_memory: col,
        }
    }

    /// Update column and reset column memory to match.
    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.col_memory = col;
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Every way the cursor can be moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Step(Direction),
    LineStart,
    LineEnd,
    WordLeft,
    WordRight,
    BufferStart,
    BufferEnd,
    LinesUp(usize),
    LinesDown(usize),
}

/// The text widget: a rope-backed buffer with cursor, selection and an
/// undo/redo history.
///
/// All edits go through one primitive that records a [`TextEdit`], so undo
/// and redo replay exactly what happened to the rope.
pub struct EditorBuffer {
    rope: Rope,
    cursor: Cursor,
    /// Char offset where the selection started; the cursor is the other end.
    anchor: Option<usize>,
    history: UndoHistory,
}

impl EditorBuffer {
    /// Create a new buffer from a string.
    pub fn from_text(text: &str) -> Self {
        Self::with_undo_limit(text, DEFAULT_UNDO_LIMIT)
    }

    /// Create a buffer keeping at most `undo_limit` undo steps.
    pub fn with_undo_limit(text: &str, undo_limit: usize) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::new(),
            anchor: None,
            history: UndoHistory::new(undo_limit),
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// Replace the whole contents, as when another document is opened.
    ///
    /// Cursor, selection and history start over.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor = Cursor::new();
        self.anchor = None;
        self.history.clear();
    }

    /// The current cursor position.
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get the content of a line (without its line break).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(line_idx).to_string();
        Some(trim_line_break(&line).to_string())
    }

    /// Length of a line in bytes (without its line break).
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.len())
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub const fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub const fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // --- Selection ---

    /// Selected char range, if the selection is non-empty.
    pub fn selection_range(&self) -> Option<Range<usize>> {
        let anchor = self.anchor?;
        let head = self.cursor_char_idx();
        match anchor.cmp(&head) {
            std::cmp::Ordering::Less => Some(anchor..head),
            std::cmp::Ordering::Greater => Some(head..anchor),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn has_selection(&self) -> bool {
        self.selection_range().is_some()
    }

    pub fn selected_text(&self) -> Option<String> {
        let range = self.selection_range()?;
        Some(self.rope.slice(range).to_string())
    }

    /// Byte range of `line_idx` covered by the selection.
    ///
    /// An end of `None` means the selection continues through the line break.
    pub fn selection_on_line(&self, line_idx: usize) -> Option<(usize, Option<usize>)> {
        let range = self.selection_range()?;
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let line_start = self.rope.line_to_char(line_idx);
        let content_end = line_start + self.line_char_len(line_idx);
        let line_end = if line_idx + 1 < self.rope.len_lines() {
            self.rope.line_to_char(line_idx + 1)
        } else {
            content_end
        };
        if range.end <= line_start || range.start > content_end || range.start >= line_end {
            return None;
        }
        let start = range.start.max(line_start);
        let start_byte = self.rope.slice(line_start..start).len_bytes();
        let end = if range.end > content_end {
            None
        } else {
            Some(self.rope.slice(line_start..range.end).len_bytes())
        };
        Some((start_byte, end))
    }

    /// Select the whole buffer, leaving the cursor at the end.
    pub fn select_all(&mut self) {
        self.history.seal();
        self.anchor = Some(0);
        let end = self.rope.len_chars();
        self.set_cursor_char_idx(end);
    }

    /// Remove the selected text. Returns `true` if anything was removed.
    pub fn delete_selection(&mut self) -> bool {
        let Some(range) = self.selection_range() else {
            return false;
        };
        self.replace(range, "", None);
        true
    }

    /// Remove the selected text and return it.
    pub fn cut(&mut self) -> Option<String> {
        let text = self.selected_text()?;
        self.delete_selection();
        Some(text)
    }

    // --- Editing ---

    /// Insert a character at the cursor position (replacing any selection).
    pub fn insert_char(&mut self, ch: char) {
        let mut encoded = [0u8; 4];
        let text = ch.encode_utf8(&mut encoded);
        if let Some(range) = self.selection_range() {
            self.replace(range, text, None);
            return;
        }
        let idx = self.cursor_char_idx();
        let coalesce = if ch.is_whitespace() {
            None
        } else {
            Some(Coalesce::Typing)
        };
        self.replace(idx..idx, text, coalesce);
    }

    /// Insert a string at the cursor position (replacing any selection).
    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        let range = self.selection_range().unwrap_or_else(|| {
            let idx = self.cursor_char_idx();
            idx..idx
        });
        self.replace(range, s, None);
    }

    /// Split the current line at the cursor (Enter key).
    pub fn split_line(&mut self) {
        self.insert_str("\n");
    }

    /// Delete the selection or the character before the cursor (Backspace).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        if self.cursor.col == 0 && self.cursor.line == 0 {
            return false;
        }

        let idx = self.cursor_char_idx();
        let start = if self.cursor.col == 0 {
            // Join with previous line: remove its whole line break
            let prev = self.cursor.line - 1;
            self.rope.line_to_char(prev) + self.line_char_len(prev)
        } else {
            idx - 1
        };
        self.replace(start..idx, "", Some(Coalesce::Deleting));
        true
    }

    /// Delete the selection or the character at the cursor (Delete key).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let line_len = self.line_len(self.cursor.line);
        let idx = self.cursor_char_idx();

        let end = if self.cursor.col >= line_len {
            if self.cursor.line + 1 >= self.line_count() {
                return false;
            }
            self.rope.line_to_char(self.cursor.line + 1)
        } else {
            idx + 1
        };
        self.replace(idx..end, "", Some(Coalesce::Deleting));
        true
    }

    /// Revert the most recent undo step. Returns `false` if there was none.
    pub fn undo(&mut self) -> bool {
        let Some(step) = self.history.undo() else {
            return false;
        };
        for edit in step.edits.iter().rev() {
            edit.revert(&mut self.rope);
        }
        let target = step.cursor_before;
        self.anchor = None;
        self.set_cursor_char_idx(target);
        true
    }

    /// Re-apply the most recently undone step. Returns `false` if there was none.
    pub fn redo(&mut self) -> bool {
        let Some(step) = self.history.redo() else {
            return false;
        };
        for edit in &step.edits {
            edit.apply(&mut self.rope);
        }
        let target = step.cursor_after;
        self.anchor = None;
        self.set_cursor_char_idx(target);
        true
    }

    // --- Movement ---

    /// Move the cursor, extending the selection when `selecting`.
    ///
    /// Any movement ends the current undo step.
    pub fn apply_motion(&mut self, motion: Motion, selecting: bool) {
        self.history.seal();
        if selecting {
            let idx = self.cursor_char_idx();
            self.anchor.get_or_insert(idx);
        } else {
            self.anchor = None;
        }

        match motion {
            Motion::Step(Direction::Left) => self.step_left(),
            Motion::Step(Direction::Right) => self.step_right(),
            Motion::Step(Direction::Up) => self.lines_up(1),
            Motion::Step(Direction::Down) => self.lines_down(1),
            Motion::LineStart => self.cursor.set_col(0),
            Motion::LineEnd => {
                let len = self.line_len(self.cursor.line);
                self.cursor.set_col(len);
            }
            Motion::WordLeft => self.word_left(),
            Motion::WordRight => self.word_right(),
            Motion::BufferStart => {
                self.cursor.line = 0;
                self.cursor.set_col(0);
            }
            Motion::BufferEnd => {
                let last_line = self.line_count().saturating_sub(1);
                self.cursor.line = last_line;
                self.cursor.set_col(self.line_len(last_line));
            }
            Motion::LinesUp(n) => self.lines_up(n),
            Motion::LinesDown(n) => self.lines_down(n),
        }
    }

    /// Move the cursor in the given direction.
    pub fn move_cursor(&mut self, direction: Direction) {
        self.apply_motion(Motion::Step(direction), false);
    }

    /// Move cursor to the beginning of the line (Home).
    pub fn move_home(&mut self) {
        self.apply_motion(Motion::LineStart, false);
    }

    /// Move cursor to the end of the line (End).
    pub fn move_end(&mut self) {
        self.apply_motion(Motion::LineEnd, false);
    }

    /// Move cursor one word to the left (Ctrl+Left).
    pub fn move_word_left(&mut self) {
        self.apply_motion(Motion::WordLeft, false);
    }

    /// Move cursor one word to the right (Ctrl+Right).
    pub fn move_word_right(&mut self) {
        self.apply_motion(Motion::WordRight, false);
    }

    /// Move cursor to the start of the buffer (Ctrl+Home).
    pub fn move_to_start(&mut self) {
        self.apply_motion(Motion::BufferStart, false);
    }

    /// Move cursor to the end of the buffer (Ctrl+End).
    pub fn move_to_end(&mut self) {
        self.apply_motion(Motion::BufferEnd, false);
    }

    /// Move cursor to a specific line and byte column, clearing the selection.
    pub fn move_to(&mut self, line: usize, col: usize) {
        self.history.seal();
        self.anchor = None;
        self.place_cursor(line, col);
    }

    /// Extend the selection to a specific line and byte column (mouse drag).
    pub fn select_to(&mut self, line: usize, col: usize) {
        self.history.seal();
        if self.anchor.is_none() {
            self.anchor = Some(self.cursor_char_idx());
        }
        self.place_cursor(line, col);
    }

    // --- Private helpers ---

    /// Clamp (`line`, `col`) into the buffer and move the cursor there.
    fn place_cursor(&mut self, line: usize, col: usize) {
        let max_line = self.line_count().saturating_sub(1);
        self.cursor.line = line.min(max_line);
        let line_text = self.line_at(self.cursor.line).unwrap_or_default();
        let mut col = col.min(line_text.len());
        while !line_text.is_char_boundary(col) {
            col -= 1;
        }
        self.cursor.set_col(col);
    }

    /// Replace `range` (char offsets) with `text` and record it for undo.
    fn replace(&mut self, range: Range<usize>, text: &str, coalesce: Option<Coalesce>) {
        let before = self.cursor_char_idx();
        let edit = TextEdit {
            start: range.start,
            deleted: self.rope.slice(range.clone()).to_string(),
            inserted: text.to_string(),
        };
        edit.apply(&mut self.rope);
        let after = range.start + text.chars().count();
        self.anchor = None;
        self.set_cursor_char_idx(after);
        self.history.record(edit, before, after, coalesce);
    }

    /// Number of chars in a line, excluding its line break.
    fn line_char_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.chars().count())
    }

    /// Convert cursor position to a ropey char index.
    fn cursor_char_idx(&self) -> usize {
        let line_start = self.rope.line_to_char(self.cursor.line);
        let line = self.line_at(self.cursor.line).unwrap_or_default();
        // Convert byte offset to char offset within the line
        let byte_col = self.cursor.col.min(line.len());
        let char_offset = line[..byte_col].chars().count();
        line_start + char_offset
    }

    /// Place the cursor at a ropey char index.
    fn set_cursor_char_idx(&mut self, idx: usize) {
        let idx = idx.min(self.rope.len_chars());
        let line = self.rope.char_to_line(idx);
        let line_start = self.rope.line_to_char(line);
        let col = self.rope.slice(line_start..idx).len_bytes();
        self.cursor.line = line;
        self.cursor.set_col(col.min(self.line_len(line)));
    }

    fn step_left(&mut self) {
        if self.cursor.col > 0 {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let before = &line[..self.cursor.col];
            let prev_char_len = before.chars().next_back().map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col - prev_char_len);
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.set_col(self.line_len(self.cursor.line));
        }
    }

    fn step_right(&mut self) {
        let line_len = self.line_len(self.cursor.line);
        if self.cursor.col < line_len {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let next_char_len = line[self.cursor.col..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col + next_char_len);
        } else if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        }
    }

    fn lines_up(&mut self, n: usize) {
        if self.cursor.line == 0 || n == 0 {
            return;
        }
        self.cursor.line = self.cursor.line.saturating_sub(n);
        self.restore_col_memory();
    }

    fn lines_down(&mut self, n: usize) {
        let last = self.line_count().saturating_sub(1);
        if self.cursor.line >= last || n == 0 {
            return;
        }
        self.cursor.line = (self.cursor.line + n).min(last);
        self.restore_col_memory();
    }

    /// Apply the sticky column on the current line, snapping to a char boundary.
    fn restore_col_memory(&mut self) {
        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let mut col = self.cursor.col_memory.min(line.len());
        while !line.is_char_boundary(col) {
            col -= 1;
        }
        self.cursor.col = col;
    }

    fn word_left(&mut self) {
        if self.cursor.col == 0 {
            if self.cursor.line > 0 {
                self.cursor.line -= 1;
                self.cursor.set_col(self.line_len(self.cursor.line));
            }
            return;
        }

        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let before = &line[..self.cursor.col];
        let trimmed = before.trim_end();

        if trimmed.is_empty() {
            self.cursor.set_col(0);
            return;
        }

        // Find start of previous word
        let pos = trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| !c.is_alphanumeric() && *c != '_')
            .map_or(0, |(i, c)| i + c.len_utf8());
        self.cursor.set_col(pos);
    }

    fn word_right(&mut self) {
        let line_len = self.line_len(self.cursor.line);

        if self.cursor.col >= line_len {
            if self.cursor.line + 1 < self.line_count() {
                self.cursor.line += 1;
                self.cursor.set_col(0);
            }
            return;
        }

        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let after = &line[self.cursor.col..];

        // Skip current word characters
        let word_end = after
            .find(|c: char| !c.is_alphanumeric() && c != '_')
            .unwrap_or(after.len());

        // Skip whitespace/punctuation after word
        let rest = &after[word_end..];
        let space_end = rest
            .find(|c: char| c.is_alphanumeric() || c == '_')
            .unwrap_or(rest.len());

        self.cursor.set_col(self.cursor.col + word_end + space_end);
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("cursor", &self.cursor)
            .field("anchor", &self.anchor)
            .field("undo_depth", &self.history.undo_depth())
            .finish()
    }
}

/// Strip one trailing line break (`\n`, `\r\n`, or any other break ropey
/// recognises).
fn trim_line_break(line: &str) -> &str {
    if let Some(stripped) = line.strip_suffix("\r\n") {
        return stripped;
    }
    line.strip_suffix(['\n', '\r', '\u{0B}', '\u{0C}', '\u{85}', '\u{2028}', '\u{2029}'])
        .unwrap_or(line)
}

/// Screen width of a single character as the editor draws it.
pub fn char_display_width(ch: char) -> usize {
    if ch == '\t' {
        TAB_DISPLAY_WIDTH
    } else if ch.is_control() {
        // Drawn as a single placeholder cell
        1
    } else {
        ch.width().unwrap_or(0)
    }
}

/// Screen width of a line prefix as the editor draws it.
pub fn display_width(text: &str) -> usize {
    text.chars().map(char_display_width).sum()
}

/// Byte column of the character drawn at screen column `display_col`.
///
/// Columns past the end of the line map to the line length.
pub fn byte_col_for_display(line: &str, display_col: usize) -> usize {
    let mut width = 0;
    for (idx, ch) in line.char_indices() {
        let w = char_display_width(ch);
        if w > 0 && display_col < width + w {
            return idx;
        }
        width += w;
    }
    line.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Construction and basic queries ---

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buf = EditorBuffer::empty();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_at(0), Some(String::new()));
    }

    #[test]
    fn test_from_text_preserves_content() {
        let buf = EditorBuffer::from_text("hello\nworld");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.line_at(1), Some("world".to_string()));
    }

    #[test]
    fn test_from_text_trailing_newline() {
        let buf = EditorBuffer::from_text("hello\n");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_at(1), Some(String::new()));
    }

    #[test]
    fn test_crlf_lines_hide_line_break() {
        let buf = EditorBuffer::from_text("one\r\ntwo");
        assert_eq!(buf.line_at(0), Some("one".to_string()));
        assert_eq!(buf.line_len(0), 3);
        assert_eq!(buf.text(), "one\r\ntwo");
    }

    #[test]
    fn test_line_at_out_of_bounds_returns_none() {
        let buf = EditorBuffer::from_text("hello");
        assert_eq!(buf.line_at(1), None);
    }

    #[test]
    fn test_text_roundtrip() {
        let content = "line one\nline two\nline three";
        let buf = EditorBuffer::from_text(content);
        assert_eq!(buf.text(), content);
    }

    #[test]
    fn test_set_text_resets_cursor_and_history() {
        let mut buf = EditorBuffer::from_text("abc");
        buf.move_end();
        buf.insert_char('d');
        buf.set_text("new\ntext");
        assert_eq!(buf.text(), "new\ntext");
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
        assert!(!buf.can_undo());
    }

    // --- Character insertion ---

    #[test]
    fn test_insert_char_at_start() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.insert_char('H');
        assert_eq!(buf.line_at(0), Some("Hhello".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(0, 1));
    }

    #[test]
    fn test_insert_char_in_middle() {
        let mut buf = EditorBuffer::from_text("hllo");
        buf.move_cursor(Direction::Right);
        buf.insert_char('e');
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_insert_multibyte_char() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_end();
        buf.insert_char('é');
        assert_eq!(buf.line_at(0), Some("helloé".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(0, 7));
    }

    #[test]
    fn test_insert_str_multiline_moves_cursor_to_end() {
        let mut buf = EditorBuffer::from_text("ad");
        buf.move_cursor(Direction::Right);
        buf.insert_str("b\nc");
        assert_eq!(buf.text(), "ab\ncd");
        assert_eq!(buf.cursor(), Cursor::at(1, 1));
    }

    #[test]
    fn test_insert_str_empty_is_noop() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.insert_str("");
        assert!(!buf.can_undo());
        assert_eq!(buf.text(), "hello");
    }

    // --- Line splitting (Enter) ---

    #[test]
    fn test_split_line_in_middle() {
        let mut buf = EditorBuffer::from_text("hello world");
        buf.move_to(0, 5);
        buf.split_line();
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.line_at(1), Some(" world".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    // --- Deletion ---

    #[test]
    fn test_delete_back_at_start_is_noop() {
        let mut buf = EditorBuffer::from_text("hello");
        assert!(!buf.delete_back());
        assert_eq!(buf.text(), "hello");
    }

    #[test]
    fn test_delete_back_removes_char() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_to(0, 5);
        buf.delete_back();
        assert_eq!(buf.line_at(0), Some("hell".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(0, 4));
    }

    #[test]
    fn test_delete_back_joins_lines() {
        let mut buf = EditorBuffer::from_text("hello\nworld");
        buf.move_to(1, 0);
        buf.delete_back();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_at(0), Some("helloworld".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_delete_back_joins_crlf_lines() {
        let mut buf = EditorBuffer::from_text("hello\r\nworld");
        buf.move_to(1, 0);
        buf.delete_back();
        assert_eq!(buf.text(), "helloworld");
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_delete_back_multibyte() {
        let mut buf = EditorBuffer::from_text("café");
        buf.move_end();
        buf.delete_back();
        assert_eq!(buf.line_at(0), Some("caf".to_string()));
    }

    #[test]
    fn test_delete_forward_at_end_is_noop() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_end();
        assert!(!buf.delete_forward());
    }

    #[test]
    fn test_delete_forward_joins_lines() {
        let mut buf = EditorBuffer::from_text("hello\nworld");
        buf.move_to(0, 5);
        buf.delete_forward();
        assert_eq!(buf.line_at(0), Some("helloworld".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_delete_forward_joins_crlf_lines() {
        let mut buf = EditorBuffer::from_text("a\r\nb");
        buf.move_end();
        buf.delete_forward();
        assert_eq!(buf.text(), "ab");
    }

    // --- Cursor movement ---

    #[test]
    fn test_move_left_wraps_to_prev_line() {
        let mut buf = EditorBuffer::from_text("hello\nworld");
        buf.move_to(1, 0);
        buf.move_cursor(Direction::Left);
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_move_right_wraps_to_next_line() {
        let mut buf = EditorBuffer::from_text("hello\nworld");
        buf.move_to(0, 5);
        buf.move_cursor(Direction::Right);
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_column_memory_across_short_line() {
        let mut buf = EditorBuffer::from_text("hello\nhi\nworld");
        buf.move_to(0, 4);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 2);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().line, 2);
        assert_eq!(buf.cursor().col, 4);
    }

    #[test]
    fn test_vertical_move_snaps_to_char_boundary() {
        let mut buf = EditorBuffer::from_text("abc\né");
        buf.move_to(0, 1);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 0);
    }

    #[test]
    fn test_lines_down_clamps_to_last_line() {
        let mut buf = EditorBuffer::from_text("a\nb\nc");
        buf.apply_motion(Motion::LinesDown(10), false);
        assert_eq!(buf.cursor().line, 2);
        buf.apply_motion(Motion::LinesUp(1), false);
        assert_eq!(buf.cursor().line, 1);
    }

    #[test]
    fn test_word_movement() {
        let mut buf = EditorBuffer::from_text("hello world");
        buf.move_word_right();
        assert_eq!(buf.cursor().col, 6);
        buf.move_to(0, 8);
        buf.move_word_left();
        assert_eq!(buf.cursor().col, 6);
    }

    #[test]
    fn test_move_word_left_after_multibyte_separator() {
        let mut buf = EditorBuffer::from_text("a—b");
        buf.move_end();
        buf.move_word_left();
        assert_eq!(buf.cursor().col, "a—".len());
    }

    #[test]
    fn test_move_to_clamps() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_to(100, 100);
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_move_to_start_and_end() {
        let mut buf = EditorBuffer::from_text("hello\nworld");
        buf.move_to_end();
        assert_eq!(buf.cursor(), Cursor::at(1, 5));
        buf.move_to_start();
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
    }

    // --- Selection ---

    #[test]
    fn test_shift_motion_selects_text() {
        let mut buf = EditorBuffer::from_text("hello world");
        buf.apply_motion(Motion::WordRight, true);
        assert_eq!(buf.selected_text(), Some("hello ".to_string()));
    }

    #[test]
    fn test_plain_motion_clears_selection() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.apply_motion(Motion::LineEnd, true);
        assert!(buf.has_selection());
        buf.move_cursor(Direction::Left);
        assert!(!buf.has_selection());
    }

    #[test]
    fn test_typing_replaces_selection() {
        let mut buf = EditorBuffer::from_text("hello world");
        buf.move_to(0, 6);
        buf.apply_motion(Motion::LineEnd, true);
        buf.insert_char('X');
        assert_eq!(buf.text(), "hello X");
    }

    #[test]
    fn test_select_all_and_cut() {
        let mut buf = EditorBuffer::from_text("a\nb");
        buf.select_all();
        assert_eq!(buf.cut(), Some("a\nb".to_string()));
        assert_eq!(buf.text(), "");
        assert_eq!(buf.cut(), None);
    }

    #[test]
    fn test_backspace_deletes_selection() {
        let mut buf = EditorBuffer::from_text("abcdef");
        buf.move_to(0, 1);
        buf.apply_motion(Motion::Step(Direction::Right), true);
        buf.apply_motion(Motion::Step(Direction::Right), true);
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "adef");
        assert_eq!(buf.cursor(), Cursor::at(0, 1));
    }

    #[test]
    fn test_selection_on_line_spans() {
        let mut buf = EditorBuffer::from_text("abc\ndef\nghi");
        buf.move_to(0, 1);
        buf.apply_motion(Motion::Step(Direction::Down), true);
        assert_eq!(buf.selection_on_line(0), Some((1, None)));
        assert_eq!(buf.selection_on_line(1), Some((0, Some(1))));
        assert_eq!(buf.selection_on_line(2), None);
    }

    #[test]
    fn test_select_to_extends_from_cursor() {
        let mut buf = EditorBuffer::from_text("hello\nworld");
        buf.move_to(0, 2);
        buf.select_to(1, 3);
        assert_eq!(buf.selected_text(), Some("llo\nwor".to_string()));
        buf.select_to(0, 0);
        assert_eq!(buf.selected_text(), Some("he".to_string()));
    }

    // --- Undo / redo ---

    #[test]
    fn test_undo_removes_typed_word() {
        let mut buf = EditorBuffer::empty();
        for ch in "hello".chars() {
            buf.insert_char(ch);
        }
        assert!(buf.undo());
        assert_eq!(buf.text(), "");
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
        assert!(buf.redo());
        assert_eq!(buf.text(), "hello");
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_whitespace_splits_undo_steps() {
        let mut buf = EditorBuffer::empty();
        for ch in "hello world".chars() {
            buf.insert_char(ch);
        }
        buf.undo();
        assert_eq!(buf.text(), "hello ");
        buf.undo();
        assert_eq!(buf.text(), "hello");
        buf.undo();
        assert_eq!(buf.text(), "");
        assert!(!buf.undo());
    }

    #[test]
    fn test_movement_seals_typing_step() {
        let mut buf = EditorBuffer::empty();
        buf.insert_char('a');
        buf.move_cursor(Direction::Left);
        buf.move_cursor(Direction::Right);
        buf.insert_char('b');
        buf.undo();
        assert_eq!(buf.text(), "a");
    }

    #[test]
    fn test_backspace_run_undoes_at_once() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_end();
        buf.delete_back();
        buf.delete_back();
        buf.delete_back();
        assert_eq!(buf.text(), "he");
        buf.undo();
        assert_eq!(buf.text(), "hello");
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_undo_line_join() {
        let mut buf = EditorBuffer::from_text("a\r\nb");
        buf.move_to(1, 0);
        buf.delete_back();
        buf.undo();
        assert_eq!(buf.text(), "a\r\nb");
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_redo_cleared_by_new_edit() {
        let mut buf = EditorBuffer::empty();
        buf.insert_char('a');
        buf.undo();
        buf.insert_char('b');
        assert!(!buf.redo());
        assert_eq!(buf.text(), "b");
    }

    #[test]
    fn test_undo_on_fresh_buffer_is_noop() {
        let mut buf = EditorBuffer::from_text("text");
        assert!(!buf.undo());
        assert!(!buf.redo());
        assert_eq!(buf.text(), "text");
    }

    #[test]
    fn test_undo_limit_zero_keeps_no_history() {
        let mut buf = EditorBuffer::with_undo_limit("", 0);
        buf.insert_char('a');
        assert!(!buf.undo());
        assert_eq!(buf.text(), "a");
    }

    // --- Display helpers ---

    #[test]
    fn test_display_width_counts_tabs_and_wide_chars() {
        assert_eq!(display_width("ab"), 2);
        assert_eq!(display_width("\t"), TAB_DISPLAY_WIDTH);
        assert_eq!(display_width("日本"), 4);
        assert_eq!(display_width("a\u{1}"), 2);
    }

    #[test]
    fn test_byte_col_for_display() {
        assert_eq!(byte_col_for_display("hello", 2), 2);
        assert_eq!(byte_col_for_display("hello", 50), 5);
        // Both cells of a wide char map to its start
        assert_eq!(byte_col_for_display("日本", 1), 0);
        assert_eq!(byte_col_for_display("日本", 2), 3);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Insert(char),
            Paste(String),
            Enter,
            Back,
            Delete,
            Move(Motion),
            Select(Motion),
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            let motion = prop_oneof![
                Just(Motion::Step(Direction::Left)),
                Just(Motion::Step(Direction::Right)),
                Just(Motion::Step(Direction::Up)),
                Just(Motion::Step(Direction::Down)),
                Just(Motion::LineStart),
                Just(Motion::LineEnd),
                Just(Motion::WordLeft),
                Just(Motion::WordRight),
            ];
            prop_oneof![
                prop::char::range('a', 'z').prop_map(Op::Insert),
                Just(Op::Insert(' ')),
                Just(Op::Insert('é')),
                "[a-z\n]{0,6}".prop_map(Op::Paste),
                Just(Op::Enter),
                Just(Op::Back),
                Just(Op::Delete),
                motion.clone().prop_map(Op::Move),
                motion.prop_map(Op::Select),
            ]
        }

        fn run(buf: &mut EditorBuffer, op: &Op) {
            match op {
                Op::Insert(ch) => buf.insert_char(*ch),
                Op::Paste(s) => buf.insert_str(s),
                Op::Enter => buf.split_line(),
                Op::Back => {
                    buf.delete_back();
                }
                Op::Delete => {
                    buf.delete_forward();
                }
                Op::Move(m) => buf.apply_motion(*m, false),
                Op::Select(m) => buf.apply_motion(*m, true),
            }
        }

        proptest! {
            #[test]
            fn undo_everything_restores_original(
                original in "[a-z \n]{0,40}",
                ops in prop::collection::vec(op_strategy(), 0..60),
            ) {
                let mut buf = EditorBuffer::from_text(&original);
                for op in &ops {
                    run(&mut buf, op);
                }
                let edited = buf.text();
                while buf.undo() {}
                prop_assert_eq!(buf.text(), original);
                while buf.redo() {}
                prop_assert_eq!(buf.text(), edited);
            }

            #[test]
            fn cursor_always_on_char_boundary(
                original in "[a-zé\n]{0,40}",
                ops in prop::collection::vec(op_strategy(), 0..60),
            ) {
                let mut buf = EditorBuffer::from_text(&original);
                for op in &ops {
                    run(&mut buf, op);
                    let cursor = buf.cursor();
                    let line = buf.line_at(cursor.line).unwrap();
                    prop_assert!(line.is_char_boundary(cursor.col));
                }
            }
        }
    }
}
