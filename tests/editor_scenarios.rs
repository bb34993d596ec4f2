use std::time::Instant;

use markpane::app::{Message, Model, update};
use markpane::editor::{Cursor, EditAction, EditOutcome, apply_to_body};
use markpane::mode::EditType;
use markpane::preview::{PINK, render_html_document, render_preview};
use markpane::ui::pane::{Pane, front_pane, visibility};
use markpane::ui::render_at;
use ratatui::Terminal;
use ratatui::backend::TestBackend;

fn type_into_body(mut model: Model, text: &str) -> Model {
    for ch in text.chars() {
        let outcome = apply_to_body(model.document.body(), model.body_cursor, &EditAction::Insert(ch));
        if let EditOutcome::Changed { text, cursor } = outcome {
            model = update(model, Message::BodyChanged { text, cursor });
        }
    }
    model
}

fn screen(model: &Model) -> Vec<String> {
    let (width, height) = model.terminal_size;
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|frame| render_at(model, frame, Instant::now()))
        .unwrap();
    let buf = terminal.backend().buffer().clone();
    (0..height)
        .map(|y| (0..width).map(|x| buf[(x, y)].symbol()).collect())
        .collect()
}

#[test]
fn test_starts_in_text_mode_with_editor_in_front() {
    let model = Model::new((80, 24));
    assert_eq!(model.edit_type(), EditType::Text);
    assert_eq!(front_pane(model.edit_type()), Pane::Editor);
    assert!(visibility(Pane::Editor, model.edit_type()).opacity > 0.0);
    assert!(visibility(Pane::Preview, model.edit_type()).opacity <= 0.0);
}

#[test]
fn test_typed_heading_previews_as_h1() {
    let mut model = Model::new((80, 24));
    model.animations_enabled = false;
    let model = type_into_body(model, "# Hello");
    assert_eq!(model.document.body(), "# Hello");
    assert_eq!(model.body_cursor, Cursor::at(0, 7));

    let model = update(model, Message::ToggleEditType);
    assert_eq!(model.edit_type(), EditType::Preview);
    assert_eq!(front_pane(model.edit_type()), Pane::Preview);

    let lines = model.preview().lines();
    assert_eq!(lines[0].text(), "Hello");
    assert_eq!(lines[1].spans()[0].style().fg, Some(PINK));

    let rows = screen(&model);
    assert!(rows[2].contains("Hello"));
    assert!(!rows[2].contains('#'));

    let html = render_html_document(model.document.title(), model.document.body());
    assert!(html.contains("border-bottom:1px solid #ffc4dd\">Hello</h1>"));
}

#[test]
fn test_two_toggles_return_to_text() {
    let model = Model::new((80, 24));
    let model = update(model, Message::ToggleEditType);
    let model = update(model, Message::ToggleEditType);
    assert_eq!(model.edit_type(), EditType::Text);
    assert_eq!(front_pane(model.edit_type()), Pane::Editor);
}

#[test]
fn test_empty_body_previews_nothing() {
    let preview = render_preview("", 40);
    assert!(preview.is_empty());

    let mut model = Model::new((80, 24));
    model.animations_enabled = false;
    let model = update(model, Message::ToggleEditType);
    let rows = screen(&model);
    assert!(rows[2..22].iter().all(|row| !row.chars().any(char::is_alphanumeric)));
}

#[test]
fn test_pipe_table_renders_with_borders() {
    let preview = render_preview("| a | bb |\n|---|---|\n| ccc | d |", 30);
    let rows: Vec<String> = preview.lines().iter().map(|l| l.text()).collect();
    assert!(rows[0].trim_start().starts_with('┌'));
    assert!(rows[1].contains("│  a  │"));
    assert!(rows.last().unwrap().trim_start().starts_with('└'));
}

#[test]
fn test_body_round_trips_any_text() {
    for body in ["", "plain", "line\nbreaks\n", "tabs\tand ünïcode 日本"] {
        let model = update(
            Model::new((80, 24)),
            Message::BodyChanged {
                text: body.to_string(),
                cursor: Cursor::new(),
            },
        );
        assert_eq!(model.document.body(), body);
    }
}
