//! Text editing for the title field and the markdown body.
//!
//! The editor keeps no state between keystrokes. Each edit rebuilds a
//! rope-backed buffer from the model's text and caret, applies one
//! [`EditAction`], and reports the full updated string back so the model
//! stays the single owner of the document.

mod buffer;

pub use buffer::{Cursor, Direction, EditorBuffer, byte_col_for_cell};

/// A single editing operation on a text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    Insert(char),
    Paste(String),
    SplitLine,
    DeleteBack,
    DeleteForward,
    Move(Direction),
    Home,
    End,
    WordLeft,
    WordRight,
    ToStart,
    ToEnd,
    /// Place the caret under a terminal cell (mouse click).
    ClickAt { line: usize, cell: usize },
}

impl EditAction {
    /// True for actions that can modify the text.
    pub const fn is_edit(&self) -> bool {
        matches!(
            self,
            Self::Insert(_) | Self::Paste(_) | Self::SplitLine | Self::DeleteBack | Self::DeleteForward
        )
    }
}

/// Result of applying an [`EditAction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome<C> {
    /// The text changed; carries the whole new string and the new caret.
    Changed { text: String, cursor: C },
    /// Only the caret moved.
    Moved(C),
    /// Nothing happened (e.g. backspace at the start).
    Unchanged,
}

/// Apply an action to the multi-line body.
pub fn apply_to_body(text: &str, cursor: Cursor, action: &EditAction) -> EditOutcome<Cursor> {
    let mut buf = EditorBuffer::with_cursor(text, cursor);
    let changed = buf.apply(action);
    outcome(&buf, changed, cursor)
}

/// Apply an action to the single-line title.
///
/// The caret is a byte offset. Line breaks never enter the title: Enter and
/// vertical moves are ignored, and any line break already in the text or
/// pasted into it becomes a space.
pub fn apply_to_title(text: &str, cursor: usize, action: &EditAction) -> EditOutcome<usize> {
    let action = match action {
        EditAction::SplitLine | EditAction::Move(Direction::Up | Direction::Down) => {
            return EditOutcome::Unchanged;
        }
        EditAction::Insert(c) if is_line_break(*c) => return EditOutcome::Unchanged,
        EditAction::Paste(s) => EditAction::Paste(flatten_breaks(s)),
        EditAction::ClickAt { cell, .. } => EditAction::ClickAt { line: 0, cell: *cell },
        other => other.clone(),
    };
    let flat = flatten_breaks(text);
    // Flattening swaps chars one for one, so the caret keeps its char index
    let chars_before = text
        .get(..cursor)
        .map_or_else(|| text.chars().count(), |head| head.chars().count());
    let start = flat
        .char_indices()
        .nth(chars_before)
        .map_or(flat.len(), |(idx, _)| idx);
    match apply_to_body(&flat, Cursor::at(0, start), &action) {
        EditOutcome::Changed { text, cursor } => EditOutcome::Changed { text, cursor: cursor.col },
        EditOutcome::Moved(c) if flat != text => EditOutcome::Changed {
            text: flat,
            cursor: c.col,
        },
        EditOutcome::Moved(c) => EditOutcome::Moved(c.col),
        EditOutcome::Unchanged if flat != text => EditOutcome::Changed { text: flat, cursor: start },
        EditOutcome::Unchanged => EditOutcome::Unchanged,
    }
}

/// Every char the rope treats as ending a line.
const fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

fn flatten_breaks(text: &str) -> String {
    text.chars()
        .map(|c| if is_line_break(c) { ' ' } else { c })
        .collect()
}

fn outcome(buf: &EditorBuffer, changed: bool, before: Cursor) -> EditOutcome<Cursor> {
    let after = buf.cursor();
    if changed {
        EditOutcome::Changed {
            text: buf.text(),
            cursor: after,
        }
    } else if after == before {
        EditOutcome::Unchanged
    } else {
        EditOutcome::Moved(after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_typing_reports_full_string() {
        let out = apply_to_body("# Hell", Cursor::at(0, 6), &EditAction::Insert('o'));
        assert_eq!(
            out,
            EditOutcome::Changed {
                text: "# Hello".to_string(),
                cursor: Cursor::at(0, 7),
            }
        );
    }

    #[test]
    fn test_backspace_at_origin_is_unchanged() {
        let out = apply_to_body("abc", Cursor::new(), &EditAction::DeleteBack);
        assert_eq!(out, EditOutcome::Unchanged);
    }

    #[test]
    fn test_cursor_move_reports_moved() {
        let out = apply_to_body("abc", Cursor::new(), &EditAction::End);
        assert_eq!(out, EditOutcome::Moved(Cursor::at(0, 3)));
    }

    #[test]
    fn test_paste_normalizes_crlf() {
        let out = apply_to_body("", Cursor::new(), &EditAction::Paste("a\r\nb".into()));
        let EditOutcome::Changed { text, cursor } = out else {
            panic!("expected change");
        };
        assert_eq!(text, "a\nb");
        assert_eq!(cursor, Cursor::at(1, 1));
    }

    #[test]
    fn test_title_ignores_enter() {
        assert_eq!(
            apply_to_title("Notes", 5, &EditAction::SplitLine),
            EditOutcome::Unchanged
        );
    }

    #[test]
    fn test_title_paste_flattens_newlines() {
        let out = apply_to_title("", 0, &EditAction::Paste("a\nb".into()));
        assert_eq!(
            out,
            EditOutcome::Changed {
                text: "a b".to_string(),
                cursor: 3,
            }
        );
    }

    #[test]
    fn test_title_click_places_caret() {
        let out = apply_to_title("Hello", 0, &EditAction::ClickAt { line: 4, cell: 2 });
        assert_eq!(out, EditOutcome::Moved(2));
    }

    #[test]
    fn test_title_flattens_unicode_line_breaks() {
        let out = apply_to_title("a\u{2028}b", 5, &EditAction::Insert('c'));
        assert_eq!(
            out,
            EditOutcome::Changed {
                text: "a bc".to_string(),
                cursor: 4
            }
        );

        let out = apply_to_title("x", 1, &EditAction::Paste("y\u{0C}z\u{85}".to_string()));
        assert_eq!(
            out,
            EditOutcome::Changed {
                text: "xy z ".to_string(),
                cursor: 5
            }
        );
        assert_eq!(
            apply_to_title("ab", 1, &EditAction::Insert('\u{2029}')),
            EditOutcome::Unchanged
        );
    }

    #[test]
    fn test_is_edit_classifies_moves() {
        assert!(EditAction::Insert('a').is_edit());
        assert!(!EditAction::Home.is_edit());
    }

    proptest! {
        #[test]
        fn typing_appends_at_end(base in "[a-z \\n]{0,40}", ch in "[a-zA-Z0-9#*]") {
            let c = ch.chars().next().unwrap();
            let mut buf = EditorBuffer::from_text(&base);
            buf.move_to_end();
            let out = apply_to_body(&base, buf.cursor(), &EditAction::Insert(c));
            let EditOutcome::Changed { text, .. } = out else {
                panic!("insert must change text");
            };
            prop_assert_eq!(text, format!("{base}{c}"));
        }

        #[test]
        fn moves_never_change_text(text in "[a-zé日 \\n]{0,30}", line in 0..5usize, col in 0..12usize) {
            for action in [
                EditAction::Move(Direction::Up),
                EditAction::Move(Direction::Down),
                EditAction::Move(Direction::Left),
                EditAction::Move(Direction::Right),
                EditAction::WordLeft,
                EditAction::WordRight,
            ] {
                let out = apply_to_body(&text, Cursor::at(line, col), &action);
                let is_changed = matches!(out, EditOutcome::Changed { .. });
                prop_assert!(!is_changed);
            }
        }
    }
}
