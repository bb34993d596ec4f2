use std::time::{Duration, Instant};

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::style::Modifier;

use super::render_at;
use super::transition::{PANE_FADE, Transition};
use crate::app::{Message, Model, update};
use crate::editor::Cursor;

fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(width, height)).unwrap()
}

fn draw(model: &Model, now: Instant) -> Buffer {
    let (width, height) = model.terminal_size;
    let mut terminal = create_test_terminal(width, height);
    terminal
        .draw(|frame| render_at(model, frame, now))
        .unwrap();
    terminal.backend().buffer().clone()
}

fn row_text(buf: &Buffer, y: u16) -> String {
    (0..buf.area.width)
        .map(|x| buf[(x, y)].symbol())
        .collect()
}

fn model_with_body(body: &str) -> Model {
    let mut model = Model::new((80, 24));
    model.animations_enabled = false;
    update(
        model,
        Message::BodyChanged {
            text: body.to_string(),
            cursor: Cursor::new(),
        },
    )
}

#[test]
fn test_empty_document_shows_placeholders() {
    let model = Model::new((80, 24));
    let buf = draw(&model, Instant::now());
    assert!(row_text(&buf, 0).contains("Title"));
    assert!(row_text(&buf, 2).contains("Enter markdown here..."));
}

#[test]
fn test_text_mode_shows_markdown_source() {
    let model = model_with_body("# Hello\n\n**bold**");
    let buf = draw(&model, Instant::now());
    assert!(row_text(&buf, 2).contains("# Hello"));
    assert!(row_text(&buf, 4).contains("**bold**"));
}

#[test]
fn test_preview_mode_shows_rendered_markdown() {
    let model = update(
        model_with_body("# Hello\n\n**bold**"),
        Message::ToggleEditType,
    );
    let buf = draw(&model, Instant::now());
    let first = row_text(&buf, 2);
    assert!(first.contains("Hello"));
    assert!(!first.contains('#'));
    let text = (2..22).map(|y| row_text(&buf, y)).collect::<String>();
    assert!(text.contains("bold"));
    assert!(!text.contains("**"));
}

#[test]
fn test_pane_is_framed_with_rounded_border() {
    let model = Model::new((80, 24));
    let buf = draw(&model, Instant::now());
    assert_eq!(buf[(0, 1)].symbol(), "╭");
    assert_eq!(buf[(79, 1)].symbol(), "╮");
    assert_eq!(buf[(0, 22)].symbol(), "╰");
}

#[test]
fn test_toggle_sits_on_bottom_border() {
    let model = Model::new((80, 24));
    let buf = draw(&model, Instant::now());
    let row = row_text(&buf, 22);
    assert!(row.contains("text"));
    assert!(row.contains("(●)"));

    let model = update(model_with_body(""), Message::ToggleEditType);
    let buf = draw(&model, Instant::now());
    assert!(row_text(&buf, 22).contains("preview"));
}

#[test]
fn test_status_bar_reflects_mode() {
    let model = model_with_body("one two three");
    let buf = draw(&model, Instant::now());
    let status = row_text(&buf, 23);
    assert!(status.starts_with(" TEXT"));
    assert!(status.contains("3 words"));

    let model = update(model, Message::ToggleEditType);
    let buf = draw(&model, Instant::now());
    assert!(row_text(&buf, 23).starts_with(" PREVIEW"));
}

#[test]
fn test_old_pane_shows_dimmed_early_in_fade() {
    let mut model = update(model_with_body("source text"), Message::ToggleEditType);
    let start = Instant::now();
    model.pane_fade = Some(Transition::new(start, PANE_FADE));

    let buf = draw(&model, start + Duration::from_millis(100));
    assert!(row_text(&buf, 2).contains("source text"));
    assert!(buf[(2, 2)].modifier.contains(Modifier::DIM));

    let buf = draw(&model, start + PANE_FADE);
    assert!(!buf[(2, 2)].modifier.contains(Modifier::DIM));
}

#[test]
fn test_new_pane_takes_over_past_halfway() {
    let mut model = update(model_with_body("`code`"), Message::ToggleEditType);
    let start = Instant::now();
    model.pane_fade = Some(Transition::new(start, PANE_FADE));

    let buf = draw(&model, start + Duration::from_millis(400));
    let row = row_text(&buf, 2);
    assert!(row.contains("code"));
    assert!(!row.contains('`'));
}

#[test]
fn test_help_overlay_lists_toggle_key() {
    let model = update(Model::new((80, 40)), Message::ToggleHelp);
    let buf = draw(&model, Instant::now());
    let screen = (0..40).map(|y| row_text(&buf, y)).collect::<Vec<_>>().join("\n");
    assert!(screen.contains("Ctrl+P"));
}

#[test]
fn test_scratch_view_renders_markup_frames() {
    let model = Model::new((80, 30)).with_scratch();
    let buf = draw(&model, Instant::now());
    let screen = (0..30).map(|y| row_text(&buf, y)).collect::<Vec<_>>().join("\n");
    assert!(screen.contains(" markup "));
    assert!(screen.contains(" rendered "));
    assert!(row_text(&buf, 29).starts_with(" SCRATCH"));
}

#[test]
fn test_tiny_terminal_does_not_panic() {
    for (width, height) in [(1, 1), (5, 3), (20, 2)] {
        let model = model_with_body("# a\n\nb");
        let model = update(model, Message::Resize(width, height));
        let _ = draw(&model, Instant::now());
        let model = update(model, Message::ToggleEditType);
        let _ = draw(&model, Instant::now());
    }
}
