use std::time::Instant;

use ratatui::buffer::Buffer;
use ratatui::prelude::*;
use unicode_width::UnicodeWidthChar;

use crate::app::{Focus, Model};
use crate::editor::EditorBuffer;
use crate::mode::EditType;
use crate::preview::{PINK, PreviewLine, clip_line, display_width};
use crate::scratch::{Scratch, first_visible_line, render_markup};

use super::layout::pane_block;
use super::pane::{Pane, composite, fading_visibility};
use super::toggle::Toggle;
use super::transition::progress_of;
use super::{content_rect, overlays, status};

const TITLE_PLACEHOLDER: &str = "Title";
const BODY_PLACEHOLDER: &str = "Enter markdown here...";

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    render_at(model, frame, Instant::now());
}

/// Render the complete UI as it looks at `now` (mid-transition frames
/// depend on the time).
pub fn render_at(model: &Model, frame: &mut Frame, now: Instant) {
    let area = frame.area();

    if let Some(scratch) = &model.scratch {
        render_scratch(model, scratch, frame);
    } else {
        render_editor_view(model, frame, now);
    }

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    } else if model.link_picker_active() {
        overlays::render_link_picker_overlay(model, frame, area);
    }
}

fn render_editor_view(model: &Model, frame: &mut Frame, now: Instant) {
    let layout = model.layout();
    let text_mode = model.edit_type() == EditType::Text;

    render_title(
        model,
        frame.buffer_mut(),
        layout.title,
        text_mode && model.focus == Focus::Title,
    );

    frame.render_widget(
        pane_block().border_style(Style::new().fg(PINK)),
        layout.pane_outer,
    );
    render_panes(model, frame.buffer_mut(), layout.pane, now);

    let toggle = model.toggle_slide.map_or_else(
        || Toggle::new(model.edit_type()),
        |slide| Toggle::sliding(model.edit_type(), slide.progress(now)),
    );
    frame.render_widget(toggle, layout.toggle);

    if let Some(toast_area) = layout.toast {
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, layout.status);
}

fn render_title(model: &Model, buf: &mut Buffer, area: Rect, focused: bool) {
    let content = content_rect(area);
    if content.width == 0 || content.height == 0 {
        return;
    }
    let title = model.document.title();
    let caret = focused.then_some(model.title_cursor);
    if title.is_empty() {
        let style = Style::new().fg(Color::DarkGray).add_modifier(Modifier::BOLD);
        draw_input_line(buf, content, content.y, TITLE_PLACEHOLDER, None, style);
        if focused {
            draw_caret(buf, content.x, content.y);
        }
    } else {
        let style = Style::new().add_modifier(Modifier::BOLD);
        draw_input_line(buf, content, content.y, title, caret, style);
    }
}

/// Draw both panes off-screen and composite them by opacity and z-order.
fn render_panes(model: &Model, target: &mut Buffer, area: Rect, now: Instant) {
    let mut editor = Buffer::empty(area);
    render_editor_pane(model, &mut editor, area);
    let mut preview = Buffer::empty(area);
    render_preview_pane(model, &mut preview, area);

    let progress = progress_of(model.pane_fade.as_ref(), now);
    let mode = model.edit_type();
    composite(
        target,
        area,
        (&editor, fading_visibility(Pane::Editor, mode, progress)),
        (&preview, fading_visibility(Pane::Preview, mode, progress)),
    );
}

fn render_editor_pane(model: &Model, buf: &mut Buffer, area: Rect) {
    let content = content_rect(area);
    if content.width == 0 || content.height == 0 {
        return;
    }
    let show_caret = model.edit_type() == EditType::Text && model.focus == Focus::Body;
    let body = model.document.body();

    if body.is_empty() {
        let style = Style::new().fg(Color::DarkGray);
        draw_input_line(buf, content, content.y, BODY_PLACEHOLDER, None, style);
        if show_caret {
            draw_caret(buf, content.x, content.y);
        }
        return;
    }

    let text = EditorBuffer::with_cursor(body, model.body_cursor);
    let cursor = text.cursor();
    for (row, line_idx) in (0..content.height).zip(model.editor_viewport.visible_range()) {
        let line = text.line_at(line_idx).unwrap_or_default();
        let caret = (show_caret && line_idx == cursor.line).then_some(cursor.col);
        draw_input_line(buf, content, content.y + row, &line, caret, Style::new());
    }
}

fn render_preview_pane(model: &Model, buf: &mut Buffer, area: Rect) {
    let content = content_rect(area);
    let preview = model.preview();
    let range = model.preview_viewport.visible_range();
    draw_preview_lines(buf, content, preview.lines().get(range).unwrap_or_default());
}

fn render_scratch(model: &Model, scratch: &Scratch, frame: &mut Frame) {
    let layout = model.scratch_layout();
    let border = Style::new().fg(PINK);

    frame.render_widget(
        pane_block().title(" markup ").border_style(border),
        layout.input_outer,
    );
    let input = content_rect(layout.input);
    if input.width > 0 && input.height > 0 {
        let text = EditorBuffer::with_cursor(scratch.source(), scratch.cursor());
        let cursor = text.cursor();
        let first = first_visible_line(cursor.line, input.height);
        for (row, line_idx) in (0..input.height).zip(first..text.line_count()) {
            let line = text.line_at(line_idx).unwrap_or_default();
            let caret = (line_idx == cursor.line).then_some(cursor.col);
            draw_input_line(
                frame.buffer_mut(),
                input,
                input.y + row,
                &line,
                caret,
                Style::new(),
            );
        }
    }

    frame.render_widget(
        pane_block().title(" rendered ").border_style(border),
        layout.frame_outer,
    );
    let rendered = content_rect(layout.frame);
    let lines = render_markup(scratch.source(), usize::from(rendered.width.max(1)));
    let start = scratch.frame_scroll().min(lines.len());
    draw_preview_lines(frame.buffer_mut(), rendered, &lines[start..]);

    if let Some(toast_area) = layout.toast {
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, layout.status);
}

fn draw_preview_lines(buf: &mut Buffer, area: Rect, lines: &[PreviewLine]) {
    let width = usize::from(area.width);
    for (row, line) in (0..area.height).zip(lines) {
        let spans: Vec<Span> = clip_line(line, width)
            .into_iter()
            .map(|span| Span::styled(span.text().to_string(), span.style()))
            .collect();
        buf.set_line(area.x, area.y + row, &Line::from(spans), area.width);
    }
}

/// Draw one row of an editable input. The row scrolls horizontally so the
/// caret (a byte column) stays inside `area`.
fn draw_input_line(
    buf: &mut Buffer,
    area: Rect,
    y: u16,
    text: &str,
    caret: Option<usize>,
    style: Style,
) {
    let width = usize::from(area.width);
    if width == 0 {
        return;
    }
    let text = text.replace('\t', " ");
    let shift = caret.map_or(0, |col| input_shift(&text, col, area.width));
    buf.set_stringn(area.x, y, skip_cells(&text, shift), width, style);
    if let Some(col) = caret {
        let offset = u16::try_from(caret_cell(&text, col) - shift).unwrap_or(0);
        draw_caret(buf, area.x + offset, y);
    }
}

fn caret_cell(text: &str, col: usize) -> usize {
    text.get(..col.min(text.len())).map_or(0, display_width)
}

/// Columns an input row is scrolled left by so the caret at byte column
/// `col` fits in `width` cells.
pub fn input_shift(text: &str, col: usize, width: u16) -> usize {
    (caret_cell(text, col) + 1).saturating_sub(usize::from(width))
}

fn draw_caret(buf: &mut Buffer, x: u16, y: u16) {
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_style(Style::new().bg(Color::White).fg(Color::Black));
    }
}

/// The suffix of `text` that starts `cells` columns in.
fn skip_cells(text: &str, cells: usize) -> &str {
    let mut used = 0;
    for (idx, ch) in text.char_indices() {
        if used >= cells {
            return &text[idx..];
        }
        used += ch.width().unwrap_or(0);
    }
    ""
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_cells() {
        assert_eq!(skip_cells("hello", 0), "hello");
        assert_eq!(skip_cells("hello", 2), "llo");
        assert_eq!(skip_cells("日本語", 2), "本語");
        assert_eq!(skip_cells("ab", 5), "");
    }

    #[test]
    fn test_input_line_scrolls_to_caret() {
        let area = Rect::new(0, 0, 5, 1);
        let mut buf = Buffer::empty(area);
        draw_input_line(&mut buf, area, 0, "abcdefgh", Some(8), Style::new());
        let row: String = (0..5).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert_eq!(row, "efgh ");
        assert_eq!(buf[(4, 0)].bg, Color::White);
    }
}
