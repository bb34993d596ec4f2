use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};
use crate::mode::EditType;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let status = if model.scratch.is_some() {
        " SCRATCH  PgUp/PgDn:scroll frame  Ctrl+Q:quit  F1:help".to_string()
    } else {
        match model.edit_type() {
            EditType::Text => {
                let cursor = model.body_cursor;
                let words = model.document.body().split_whitespace().count();
                format!(
                    " TEXT  Ln {}, Col {}  {} words  Ctrl+P:preview  Ctrl+Y:copy html  F1:help",
                    cursor.line + 1,
                    cursor.col + 1,
                    words
                )
            }
            EditType::Preview => {
                let vp = &model.preview_viewport;
                format!(
                    " PREVIEW  Line {}/{}  [{}%]  o:links  Ctrl+P:edit  F1:help",
                    (vp.offset() + 1).min(vp.total().max(1)),
                    vp.total(),
                    vp.scroll_percent()
                )
            }
        }
    };

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
