use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph};

use crate::app::Model;
use crate::preview::PINK;

const HINT: Color = Color::Indexed(245);

/// Key bindings shown in the help popup, grouped by section.
const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    ("Mode", &[("Ctrl+P / F2 / click", "Switch text / preview")]),
    (
        "Text",
        &[
            ("Tab", "Switch title / body"),
            ("Enter (in title)", "Move to body"),
            ("Arrows, Home/End", "Move caret"),
            ("Ctrl+Left/Right", "Word movement"),
            ("Ctrl+Home/End", "Body start / end"),
            ("PgUp/PgDn", "Move caret a screen"),
            ("Click / wheel", "Place caret / scroll"),
        ],
    ),
    (
        "Preview",
        &[
            ("j/k or Up/Down", "Scroll"),
            ("Space/PageDown", "Page down"),
            ("b/PageUp", "Page up"),
            ("g / G", "Top / bottom"),
            ("o / click", "Open links (1-9)"),
        ],
    ),
    (
        "Other",
        &[
            ("Ctrl+Y", "Copy as HTML"),
            ("F1 / ? (preview)", "Toggle help"),
            ("Ctrl+Q / Ctrl+C", "Quit"),
            ("q / Esc (preview)", "Quit"),
        ],
    ),
];

const KEY_COLUMN: usize = 21;

pub fn link_picker_rect(area: Rect, items_len: usize) -> Rect {
    let width = area.width.saturating_sub(16).max(44);
    // Two rows per link plus border, padding and the hint row
    let rows = u16::try_from(items_len.min(9)).unwrap_or(9) * 2 + 4;
    let height = rows.min(area.height.saturating_sub(4).max(8));
    centered_popup_rect(width, height, area)
}

/// First row of the picker's item list (below border and padding).
pub const fn link_picker_content_top(popup: Rect) -> u16 {
    popup.y + 2
}

pub fn render_link_picker_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let items = &model.link_picker_items;
    if items.is_empty() {
        return;
    }
    let popup = link_picker_rect(area, items.len());

    let number_style = Style::new().fg(PINK).add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line> = items
        .iter()
        .enumerate()
        .flat_map(|(idx, link)| {
            let label = match link.text.trim() {
                "" => "(untitled link)",
                text => text,
            };
            [
                Line::from(vec![
                    Span::styled(format!(" {}  ", idx + 1), number_style),
                    Span::styled(label.to_string(), Style::new().add_modifier(Modifier::BOLD)),
                ]),
                Line::from(vec![
                    Span::raw("    "),
                    Span::styled(link.url.clone(), Style::new().fg(Color::Cyan)),
                ]),
            ]
        })
        .collect();
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        " 1-9 opens a link, anything else cancels",
        Style::new().fg(HINT),
    ));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(popup_block(" Open link ")), popup);
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let width = area.width.saturating_sub(12).max(48);
    let height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(width, height, area);

    let heading = Style::new().fg(PINK).add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();
    for (section, bindings) in HELP_SECTIONS {
        lines.push(Line::styled(*section, heading));
        for (keys, action) in *bindings {
            lines.push(Line::raw(format!("  {keys:<KEY_COLUMN$}{action}")));
        }
        lines.push(Line::raw(""));
    }

    let shown = |path: Option<&std::path::PathBuf>, missing: &str| {
        path.map_or_else(|| missing.to_string(), |p| p.display().to_string())
    };
    lines.push(Line::styled("Config", heading));
    lines.push(Line::raw(format!(
        "  Global: {}",
        shown(model.config_global_path.as_ref(), "<unknown>")
    )));
    lines.push(Line::raw(format!(
        "  Local override: {}",
        shown(model.config_local_path.as_ref(), "<none>")
    )));

    let block = popup_block(" Help ").title_bottom(Line::styled(
        " any key closes ",
        Style::new().fg(HINT),
    ));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn popup_block(title: &str) -> Block<'_> {
    Block::new()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(PINK))
        .padding(Padding::uniform(1))
        .style(Style::new().bg(Color::Black).fg(Color::White))
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
