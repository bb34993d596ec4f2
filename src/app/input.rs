use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;

use crate::app::{App, Focus, Message, Model};
use crate::editor::{
    Direction, EditAction, EditOutcome, EditorBuffer, apply_to_body, apply_to_title,
};
use crate::mode::EditType;
use crate::scratch::{FRAME_HEIGHT, first_visible_line};
use crate::ui::layout::contains;
use crate::ui::{content_rect, input_shift};

use super::event_loop::ResizeDebouncer;

/// Rows moved per mouse wheel notch.
const WHEEL_ROWS: usize = 3;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Paste(text) => Self::handle_paste(text, model),
            Event::Resize(w, h) => {
                tracing::debug!(width = w, height = h, "resize queued");
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        if model.help_visible {
            return Some(Message::HideHelp);
        }

        if model.link_picker_active() {
            return match key.code {
                KeyCode::Char(c @ '1'..='9') => {
                    u8::try_from(c).ok().map(|b| Message::SelectVisibleLink(b - b'0'))
                }
                _ => Some(Message::CancelVisibleLinkPicker),
            };
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('q' | 'c') if ctrl => return Some(Message::Quit),
            KeyCode::Char('y') if ctrl => return Some(Message::CopyHtml),
            KeyCode::F(1) => return Some(Message::ToggleHelp),
            _ => {}
        }

        if model.scratch.is_some() {
            return Self::handle_scratch_key(key);
        }

        match key.code {
            KeyCode::Char('p') if ctrl => return Some(Message::ToggleEditType),
            KeyCode::F(2) => return Some(Message::ToggleEditType),
            _ => {}
        }

        match model.edit_type() {
            EditType::Preview => Self::handle_preview_key(key, model),
            EditType::Text => Self::handle_text_key(key, model),
        }
    }

    fn handle_preview_key(key: KeyEvent, model: &Model) -> Option<Message> {
        let vp = &model.preview_viewport;
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                vp.can_scroll_down().then_some(Message::ScrollDown(1))
            }
            KeyCode::Char('k') | KeyCode::Up => vp.can_scroll_up().then_some(Message::ScrollUp(1)),
            KeyCode::Char(' ') | KeyCode::PageDown => {
                vp.can_scroll_down().then_some(Message::PageDown)
            }
            KeyCode::Char('b') | KeyCode::PageUp => vp.can_scroll_up().then_some(Message::PageUp),
            KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),
            KeyCode::Char('o') => Some(Message::OpenVisibleLinks),
            KeyCode::Char('?') => Some(Message::ToggleHelp),
            KeyCode::Char('q') | KeyCode::Esc => Some(Message::Quit),
            _ => None,
        }
    }

    fn handle_text_key(key: KeyEvent, model: &Model) -> Option<Message> {
        match (key.code, model.focus) {
            (KeyCode::Tab | KeyCode::BackTab, _) => return Some(Message::SwitchFocus),
            (KeyCode::Enter, Focus::Title) => return Some(Message::FocusBody),
            (KeyCode::PageUp, Focus::Body) => return page_caret(model, Direction::Up),
            (KeyCode::PageDown, Focus::Body) => return page_caret(model, Direction::Down),
            _ => {}
        }
        let action = edit_action_for_key(key)?;
        match model.focus {
            Focus::Title => title_message(model, &action),
            Focus::Body => body_message(model, &action),
        }
    }

    fn handle_scratch_key(key: KeyEvent) -> Option<Message> {
        let rows = isize::try_from(FRAME_HEIGHT).unwrap_or(isize::MAX);
        match key.code {
            KeyCode::PageUp => Some(Message::ScrollScratch(-rows)),
            KeyCode::PageDown => Some(Message::ScrollScratch(rows)),
            KeyCode::Tab => Some(Message::ScratchEdit(EditAction::Insert('\t'))),
            _ => edit_action_for_key(key).map(Message::ScratchEdit),
        }
    }

    pub(super) fn handle_paste(text: &str, model: &Model) -> Option<Message> {
        let action = EditAction::Paste(text.to_string());
        if model.scratch.is_some() {
            return Some(Message::ScratchEdit(action));
        }
        if model.edit_type() != EditType::Text || model.help_visible || model.link_picker_active()
        {
            return None;
        }
        match model.focus {
            Focus::Title => title_message(model, &action),
            Focus::Body => body_message(model, &action),
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        let left_down = matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left));

        if model.help_visible {
            return left_down.then_some(Message::HideHelp);
        }

        if model.link_picker_active() {
            return Self::handle_link_picker_mouse(mouse, model);
        }

        if model.scratch.is_some() {
            return Self::handle_scratch_mouse(mouse, model);
        }

        let layout = model.layout();
        let (col, row) = (mouse.column, mouse.row);

        if left_down && contains(layout.toggle, col, row) {
            return Some(Message::ToggleEditType);
        }

        let content = content_rect(layout.pane);
        let in_pane = contains(content, col, row);
        let text_mode = model.edit_type() == EditType::Text;

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if text_mode => {
                if contains(layout.title, col, row) {
                    let title = model.document.title();
                    let field = content_rect(layout.title);
                    let mut cell = usize::from(col.saturating_sub(field.x));
                    if model.focus == Focus::Title {
                        cell += input_shift(title, model.title_cursor, field.width);
                    }
                    let action = EditAction::ClickAt { line: 0, cell };
                    return title_message(model, &action).or(Some(Message::FocusTitle));
                }
                if in_pane {
                    let line = model.editor_viewport.offset() + usize::from(row - content.y);
                    let mut cell = usize::from(col - content.x);
                    if model.focus == Focus::Body
                        && line == model.body_cursor.line
                        && let Some(text) =
                            EditorBuffer::from_text(model.document.body()).line_at(line)
                    {
                        cell += input_shift(&text, model.body_cursor.col, content.width);
                    }
                    let action = EditAction::ClickAt { line, cell };
                    return body_message(model, &action).or(Some(Message::FocusBody));
                }
                None
            }
            MouseEventKind::Up(MouseButton::Left) if !text_mode && in_pane => {
                let line = model.preview_viewport.offset() + usize::from(row - content.y);
                let column = usize::from(col - content.x);
                model
                    .preview()
                    .link_at(line, column)
                    .map(|_| Message::FollowLinkAt { line, column })
            }
            MouseEventKind::ScrollDown => {
                if text_mode {
                    Some(Message::ScrollEditor(wheel_delta()))
                } else {
                    model
                        .preview_viewport
                        .can_scroll_down()
                        .then_some(Message::ScrollDown(WHEEL_ROWS))
                }
            }
            MouseEventKind::ScrollUp => {
                if text_mode {
                    Some(Message::ScrollEditor(-wheel_delta()))
                } else {
                    model
                        .preview_viewport
                        .can_scroll_up()
                        .then_some(Message::ScrollUp(WHEEL_ROWS))
                }
            }
            _ => None,
        }
    }

    fn handle_link_picker_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if !matches!(mouse.kind, MouseEventKind::Up(MouseButton::Left)) {
            return None;
        }
        let popup = crate::ui::link_picker_rect(model.screen_area(), model.link_picker_items.len());
        if contains(popup, mouse.column, mouse.row) {
            let content_top = crate::ui::link_picker_content_top(popup);
            if mouse.row >= content_top {
                let idx = usize::from((mouse.row - content_top) / 2);
                if idx < model.link_picker_items.len() {
                    return u8::try_from(idx + 1).ok().map(Message::SelectVisibleLink);
                }
            }
        }
        Some(Message::CancelVisibleLinkPicker)
    }

    fn handle_scratch_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        let layout = model.scratch_layout();
        let (col, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::ScrollDown if contains(layout.frame, col, row) => {
                Some(Message::ScrollScratch(wheel_delta()))
            }
            MouseEventKind::ScrollUp if contains(layout.frame, col, row) => {
                Some(Message::ScrollScratch(-wheel_delta()))
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let scratch = model.scratch.as_ref()?;
                let input = content_rect(layout.input);
                if !contains(input, col, row) {
                    return None;
                }
                let first = first_visible_line(scratch.cursor().line, input.height);
                let line = first + usize::from(row - input.y);
                let cell = usize::from(col - input.x);
                Some(Message::ScratchEdit(EditAction::ClickAt { line, cell }))
            }
            _ => None,
        }
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}

fn wheel_delta() -> isize {
    isize::try_from(WHEEL_ROWS).unwrap_or(1)
}

/// Map a key to an editing operation on a text input.
fn edit_action_for_key(key: KeyEvent) -> Option<EditAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let action = match key.code {
        KeyCode::Char(c) if !ctrl && !alt => EditAction::Insert(c),
        KeyCode::Enter => EditAction::SplitLine,
        KeyCode::Backspace => EditAction::DeleteBack,
        KeyCode::Delete => EditAction::DeleteForward,
        KeyCode::Left if ctrl => EditAction::WordLeft,
        KeyCode::Right if ctrl => EditAction::WordRight,
        KeyCode::Left => EditAction::Move(Direction::Left),
        KeyCode::Right => EditAction::Move(Direction::Right),
        KeyCode::Up => EditAction::Move(Direction::Up),
        KeyCode::Down => EditAction::Move(Direction::Down),
        KeyCode::Home if ctrl => EditAction::ToStart,
        KeyCode::End if ctrl => EditAction::ToEnd,
        KeyCode::Home => EditAction::Home,
        KeyCode::End => EditAction::End,
        _ => return None,
    };
    Some(action)
}

fn body_message(model: &Model, action: &EditAction) -> Option<Message> {
    match apply_to_body(model.document.body(), model.body_cursor, action) {
        EditOutcome::Changed { text, cursor } => Some(Message::BodyChanged { text, cursor }),
        EditOutcome::Moved(cursor) => Some(Message::BodyCursorMoved(cursor)),
        EditOutcome::Unchanged => None,
    }
}

fn title_message(model: &Model, action: &EditAction) -> Option<Message> {
    match apply_to_title(model.document.title(), model.title_cursor, action) {
        EditOutcome::Changed { text, cursor } => Some(Message::TitleChanged { text, cursor }),
        EditOutcome::Moved(cursor) => Some(Message::TitleCursorMoved(cursor)),
        EditOutcome::Unchanged => None,
    }
}

/// Move the body caret by one screen of rows.
fn page_caret(model: &Model, direction: Direction) -> Option<Message> {
    let mut buffer = EditorBuffer::with_cursor(model.document.body(), model.body_cursor);
    for _ in 0..model.editor_viewport.height().max(1) {
        buffer.move_cursor(direction);
    }
    let cursor = buffer.cursor();
    (cursor != model.body_cursor).then_some(Message::BodyCursorMoved(cursor))
}
