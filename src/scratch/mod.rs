//! Scratch raw-markup preview.
//!
//! A free-text input above a fixed-height frame that interprets the input
//! as markup on every keystroke. Started with `--scratch`.

mod markup;

pub use markup::{decode_entities, render_markup};

use crate::editor::{Cursor, EditAction, EditOutcome, apply_to_body};

/// Text the scratch input starts with.
pub const DEFAULT_SOURCE: &str = "<h1>Hello World</h1>";

/// Height of the rendering frame in rows.
pub const FRAME_HEIGHT: u16 = 12;

/// First source line shown in an input of `height` rows so that the caret
/// line stays visible.
pub const fn first_visible_line(caret_line: usize, height: u16) -> usize {
    (caret_line + 1).saturating_sub(height as usize)
}

/// State of the scratch view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scratch {
    source: String,
    cursor: Cursor,
    /// First frame row shown.
    frame_scroll: usize,
}

impl Default for Scratch {
    fn default() -> Self {
        Self::new()
    }
}

impl Scratch {
    pub fn new() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            cursor: Cursor::at(0, DEFAULT_SOURCE.len()),
            frame_scroll: 0,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub const fn frame_scroll(&self) -> usize {
        self.frame_scroll
    }

    /// Apply an edit to the source. Returns true when the text changed.
    pub fn apply(&mut self, action: &EditAction) -> bool {
        match apply_to_body(&self.source, self.cursor, action) {
            EditOutcome::Changed { text, cursor } => {
                self.source = text;
                self.cursor = cursor;
                true
            }
            EditOutcome::Moved(cursor) => {
                self.cursor = cursor;
                false
            }
            EditOutcome::Unchanged => false,
        }
    }

    /// Scroll the frame, clamped to the rendered content.
    pub fn scroll_frame(&mut self, delta: isize, width: usize) {
        let total = render_markup(&self.source, width).len();
        let max = total.saturating_sub(usize::from(FRAME_HEIGHT));
        self.frame_scroll = self.frame_scroll.saturating_add_signed(delta).min(max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_scratch_has_default_source() {
        let scratch = Scratch::new();
        assert_eq!(scratch.source(), "<h1>Hello World</h1>");
        assert_eq!(scratch.cursor(), Cursor::at(0, DEFAULT_SOURCE.len()));
    }

    #[test]
    fn test_apply_edits_source() {
        let mut scratch = Scratch::new();
        assert!(scratch.apply(&EditAction::Insert('!')));
        assert_eq!(scratch.source(), "<h1>Hello World</h1>!");
    }

    #[test]
    fn test_cursor_move_does_not_report_change() {
        let mut scratch = Scratch::new();
        assert!(!scratch.apply(&EditAction::Home));
        assert_eq!(scratch.cursor(), Cursor::at(0, 0));
    }

    #[test]
    fn test_first_visible_line_follows_caret() {
        assert_eq!(first_visible_line(0, 5), 0);
        assert_eq!(first_visible_line(4, 5), 0);
        assert_eq!(first_visible_line(9, 5), 5);
    }

    #[test]
    fn test_frame_scroll_clamps_to_content() {
        let mut scratch = Scratch::new();
        scratch.scroll_frame(5, 40);
        assert_eq!(scratch.frame_scroll(), 0);
    }
}
