use std::fmt;
use std::time::Instant;

use crate::editor::{Cursor, EditAction};

use super::model::{Focus, Model};

/// Messages that can update the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Flip between Text and Preview
    ToggleEditType,

    // Document
    /// The title input produced a new full string
    TitleChanged { text: String, cursor: usize },
    /// Caret moved in the title without an edit; focuses the title
    TitleCursorMoved(usize),
    /// The body input produced a new full string
    BodyChanged { text: String, cursor: Cursor },
    /// Caret moved in the body without an edit; focuses the body
    BodyCursorMoved(Cursor),
    /// Move typing between title and body
    SwitchFocus,
    /// Give the title input focus
    FocusTitle,
    /// Give the body input focus
    FocusBody,
    /// Scroll the editor pane by n lines (negative is up)
    ScrollEditor(isize),

    // Preview navigation
    /// Scroll the preview up by n lines
    ScrollUp(usize),
    /// Scroll the preview down by n lines
    ScrollDown(usize),
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,

    // Links
    /// Open the links on screen (picker when more than one)
    OpenVisibleLinks,
    /// Open link n (1-based) from the picker
    SelectVisibleLink(u8),
    /// Close the link picker
    CancelVisibleLinkPicker,
    /// Follow the link under a preview cell
    FollowLinkAt { line: usize, column: usize },

    /// Copy the document as HTML to the clipboard
    CopyHtml,

    // Help
    ToggleHelp,
    HideHelp,

    // Scratch
    /// Edit the scratch markup source
    ScratchEdit(EditAction),
    /// Scroll the scratch rendering frame by n rows
    ScrollScratch(isize),

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw without changing state
    Redraw,

    /// Quit the application
    Quit,
}

/// Debug view of a [`Message`] for logs; document text is reduced to its length.
pub(super) struct LoggedMessage<'a>(pub &'a Message);

impl fmt::Debug for LoggedMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Message::TitleChanged { text, cursor } => f
                .debug_struct("TitleChanged")
                .field("len", &text.len())
                .field("cursor", cursor)
                .finish(),
            Message::BodyChanged { text, cursor } => f
                .debug_struct("BodyChanged")
                .field("len", &text.len())
                .field("cursor", cursor)
                .finish(),
            Message::ScratchEdit(EditAction::Paste(text)) => f
                .debug_struct("ScratchPaste")
                .field("len", &text.len())
                .finish(),
            other => fmt::Debug::fmt(other, f),
        }
    }
}

/// Update the model based on a message.
///
/// Messages with side effects (opening links, clipboard) leave the model
/// alone here; the event loop runs their effects afterwards.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::ToggleEditType => model.toggle_edit_type(Instant::now()),

        Message::TitleChanged { text, cursor } => model.set_title(text, cursor),
        Message::TitleCursorMoved(cursor) => {
            model.title_cursor = cursor;
            model.focus = Focus::Title;
        }
        Message::BodyChanged { text, cursor } => model.set_body(text, cursor),
        Message::BodyCursorMoved(cursor) => {
            model.body_cursor = cursor;
            model.focus = Focus::Body;
            model.editor_viewport.ensure_visible(cursor.line);
        }
        Message::SwitchFocus => {
            model.focus = match model.focus {
                Focus::Title => Focus::Body,
                Focus::Body => Focus::Title,
            };
        }
        Message::FocusTitle => model.focus = Focus::Title,
        Message::FocusBody => model.focus = Focus::Body,
        Message::ScrollEditor(delta) => model.editor_viewport.scroll_by(delta),

        Message::ScrollUp(n) => model.preview_viewport.scroll_by(-to_delta(n)),
        Message::ScrollDown(n) => model.preview_viewport.scroll_by(to_delta(n)),
        Message::PageUp => model.preview_viewport.page_by(-1),
        Message::PageDown => model.preview_viewport.page_by(1),
        Message::GoToTop => model.preview_viewport.go_to_top(),
        Message::GoToBottom => model.preview_viewport.go_to_bottom(),

        Message::CancelVisibleLinkPicker => model.link_picker_items.clear(),
        Message::SelectVisibleLink(_)
        | Message::OpenVisibleLinks
        | Message::FollowLinkAt { .. }
        | Message::CopyHtml
        | Message::Redraw => {}

        Message::ToggleHelp => model.help_visible = !model.help_visible,
        Message::HideHelp => model.help_visible = false,

        Message::ScratchEdit(action) => {
            if let Some(scratch) = model.scratch.as_mut() {
                scratch.apply(&action);
            }
            // Keep the frame scroll valid for the new content
            model.scroll_scratch(0);
        }
        Message::ScrollScratch(delta) => model.scroll_scratch(delta),

        Message::Resize(width, height) => model.resize(width, height),

        Message::Quit => model.should_quit = true,
    }
    model
}

fn to_delta(n: usize) -> isize {
    isize::try_from(n).unwrap_or(isize::MAX)
}
