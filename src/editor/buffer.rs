use ropey::Rope;
use unicode_width::UnicodeWidthChar;

use super::EditAction;

/// Caret position inside a text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Byte offset within the line; always on a char boundary.
    pub col: usize,
    /// Column vertical moves try to return to.
    col_memory: usize,
}

impl Cursor {
    pub const fn new() -> Self {
        Self::at(0, 0)
    }

    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            col_memory: col,
        }
    }

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

/// Arrow key direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Coarse character classes for word motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Space,
    Word,
    Punct,
}

impl CharClass {
    fn of(ch: char) -> Self {
        if ch.is_whitespace() {
            Self::Space
        } else if ch.is_alphanumeric() || ch == '_' {
            Self::Word
        } else {
            Self::Punct
        }
    }
}

/// Rope-backed text with a caret.
///
/// Built fresh from the model's text for every edit. All edits go through
/// char indices into the rope and the caret is recomputed from the index
/// afterwards, so line breaks of any kind keep the caret consistent.
#[derive(Clone)]
pub struct EditorBuffer {
    rope: Rope,
    cursor: Cursor,
}

impl EditorBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::new(),
        }
    }

    /// Restore a caret, clamped into the text.
    pub fn with_cursor(text: &str, cursor: Cursor) -> Self {
        let mut buf = Self::from_text(text);
        buf.place(cursor.line, cursor.col);
        buf.cursor.col_memory = cursor.col_memory;
        buf
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line content without its line break.
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        (line_idx < self.rope.len_lines()).then(|| {
            let line = self.rope.line(line_idx).to_string();
            strip_line_break(&line).to_string()
        })
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Apply one action. Returns whether the text changed.
    pub fn apply(&mut self, action: &EditAction) -> bool {
        match action {
            EditAction::Insert(ch) => {
                self.insert(ch.encode_utf8(&mut [0; 4]));
                true
            }
            EditAction::Paste(text) => {
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                self.insert(&text);
                !text.is_empty()
            }
            EditAction::SplitLine => {
                self.insert("\n");
                true
            }
            EditAction::DeleteBack => self.delete_back(),
            EditAction::DeleteForward => self.delete_forward(),
            EditAction::Move(direction) => {
                self.move_cursor(*direction);
                false
            }
            EditAction::Home => {
                self.cursor.set_col(0);
                false
            }
            EditAction::End => {
                self.cursor.set_col(self.line_len(self.cursor.line));
                false
            }
            EditAction::WordLeft => {
                self.word_left();
                false
            }
            EditAction::WordRight => {
                self.word_right();
                false
            }
            EditAction::ToStart => {
                self.place(0, 0);
                false
            }
            EditAction::ToEnd => {
                self.move_to_end();
                false
            }
            EditAction::ClickAt { line, cell } => {
                let line = (*line).min(self.line_count().saturating_sub(1));
                let text = self.line_at(line).unwrap_or_default();
                self.place(line, byte_col_for_cell(&text, *cell));
                false
            }
        }
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        let idx = self.char_idx();
        match direction {
            Direction::Left if idx > 0 => {
                let step = if idx >= 2 && self.is_crlf_at(idx - 2) { 2 } else { 1 };
                self.place_at_char(idx - step);
            }
            Direction::Right if idx < self.rope.len_chars() => {
                let step = if self.is_crlf_at(idx) { 2 } else { 1 };
                self.place_at_char(idx + step);
            }
            Direction::Up if self.cursor.line > 0 => self.vertical_to(self.cursor.line - 1),
            Direction::Down if self.cursor.line + 1 < self.line_count() => {
                self.vertical_to(self.cursor.line + 1);
            }
            _ => {}
        }
    }

    pub fn move_to_end(&mut self) {
        self.place_at_char(self.rope.len_chars());
    }

    fn insert(&mut self, text: &str) {
        let idx = self.char_idx();
        self.rope.insert(idx, text);
        self.place_at_char(idx + text.chars().count());
    }

    fn delete_back(&mut self) -> bool {
        let idx = self.char_idx();
        if idx == 0 {
            return false;
        }
        let start = if idx >= 2 && self.is_crlf_at(idx - 2) { idx - 2 } else { idx - 1 };
        self.rope.remove(start..idx);
        self.place_at_char(start);
        true
    }

    fn delete_forward(&mut self) -> bool {
        let idx = self.char_idx();
        if idx >= self.rope.len_chars() {
            return false;
        }
        let end = if self.is_crlf_at(idx) { idx + 2 } else { idx + 1 };
        self.rope.remove(idx..end);
        self.place_at_char(idx);
        true
    }

    fn word_left(&mut self) {
        if self.cursor.col == 0 {
            self.move_cursor(Direction::Left);
            return;
        }
        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let mut chars = line[..self.cursor.col].char_indices().rev().peekable();
        while chars.next_if(|(_, c)| CharClass::of(*c) == CharClass::Space).is_some() {}
        let class = chars.peek().map(|(_, c)| CharClass::of(*c));
        let mut col = self.cursor.col;
        while let Some((i, _)) = chars.next_if(|(_, c)| Some(CharClass::of(*c)) == class) {
            col = i;
        }
        if class.is_none() {
            col = 0;
        }
        self.cursor.set_col(col);
    }

    fn word_right(&mut self) {
        let len = self.line_len(self.cursor.line);
        if self.cursor.col >= len {
            self.move_cursor(Direction::Right);
            return;
        }
        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let start = self.cursor.col;
        let mut chars = line[start..].char_indices().peekable();
        let class = chars.peek().map(|(_, c)| CharClass::of(*c));
        if class != Some(CharClass::Space) {
            while chars.next_if(|(_, c)| Some(CharClass::of(*c)) == class).is_some() {}
        }
        while chars.next_if(|(_, c)| CharClass::of(*c) == CharClass::Space).is_some() {}
        let col = chars.peek().map_or(len, |(i, _)| start + i);
        self.cursor.set_col(col);
    }

    /// Put the caret on `line` at byte `col`, clamping both and snapping back
    /// to a char boundary.
    fn place(&mut self, line: usize, col: usize) {
        let line = line.min(self.line_count().saturating_sub(1));
        self.cursor.line = line;
        self.cursor.set_col(self.snap(line, col));
    }

    fn place_at_char(&mut self, idx: usize) {
        let idx = idx.min(self.rope.len_chars());
        let line = self.rope.char_to_line(idx);
        let col = self.rope.char_to_byte(idx) - self.rope.line_to_byte(line);
        self.cursor.line = line;
        // A caret between '\r' and '\n' belongs before the pair
        self.cursor.set_col(col.min(self.line_len(line)));
    }

    fn vertical_to(&mut self, line: usize) {
        self.cursor.line = line;
        self.cursor.col = self.snap(line, self.cursor.col_memory);
    }

    fn snap(&self, line: usize, col: usize) -> usize {
        let text = self.line_at(line).unwrap_or_default();
        let mut col = col.min(text.len());
        while !text.is_char_boundary(col) {
            col -= 1;
        }
        col
    }

    fn line_len(&self, line: usize) -> usize {
        self.line_at(line).map_or(0, |s| s.len())
    }

    fn char_idx(&self) -> usize {
        let byte = self.rope.line_to_byte(self.cursor.line) + self.cursor.col;
        self.rope.byte_to_char(byte.min(self.rope.len_bytes()))
    }

    fn is_crlf_at(&self, idx: usize) -> bool {
        idx + 1 < self.rope.len_chars()
            && self.rope.char(idx) == '\r'
            && self.rope.char(idx + 1) == '\n'
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field("lines", &self.rope.len_lines())
            .field("cursor", &self.cursor)
            .finish()
    }
}

fn strip_line_break(line: &str) -> &str {
    if let Some(stripped) = line.strip_suffix("\r\n") {
        return stripped;
    }
    line.strip_suffix(['\n', '\r', '\u{000B}', '\u{000C}', '\u{0085}', '\u{2028}', '\u{2029}'])
        .unwrap_or(line)
}

/// Byte offset in `text` that sits under terminal cell `cell`.
pub fn byte_col_for_cell(text: &str, cell: usize) -> usize {
    let mut used = 0;
    text.char_indices()
        .find(|(_, ch)| {
            used += ch.width().unwrap_or(0);
            used > cell
        })
        .map_or(text.len(), |(idx, _)| idx)
}
