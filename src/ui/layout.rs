//! Screen geometry shared by rendering and mouse hit-testing.

use ratatui::layout::{Position, Rect};
use ratatui::widgets::{Block, BorderType, Borders};

use crate::scratch::FRAME_HEIGHT;

use super::toggle::toggle_rect;

/// Rectangles of the editor view, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub title: Rect,
    /// Pane frame including its border.
    pub pane_outer: Rect,
    /// Area shared by the two overlapping panes.
    pub pane: Rect,
    pub toggle: Rect,
    pub toast: Option<Rect>,
    pub status: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect, toast_active: bool) -> Self {
        let footer_rows = 1 + u16::from(toast_active);
        let title = Rect { height: area.height.min(1), ..area };
        let pane_outer = Rect {
            y: area.y + title.height,
            height: area.height.saturating_sub(title.height + footer_rows),
            ..area
        };
        let status = Rect {
            y: area.bottom().saturating_sub(1),
            height: area.height.min(1),
            ..area
        };
        let toast = toast_active.then(|| Rect {
            y: area.bottom().saturating_sub(2),
            height: u16::from(area.height >= 2),
            ..area
        });
        Self {
            title,
            pane_outer,
            pane: pane_block().inner(pane_outer),
            toggle: toggle_rect(pane_outer),
            toast,
            status,
        }
    }
}

/// Rectangles of the scratch view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScratchLayout {
    /// Input frame including its border.
    pub input_outer: Rect,
    pub input: Rect,
    /// Rendering frame including its border.
    pub frame_outer: Rect,
    pub frame: Rect,
    pub toast: Option<Rect>,
    pub status: Rect,
}

impl ScratchLayout {
    pub fn new(area: Rect, toast_active: bool) -> Self {
        let footer_rows = 1 + u16::from(toast_active);
        let body_height = area.height.saturating_sub(footer_rows);
        let frame_height = (FRAME_HEIGHT + 2).min(body_height);
        let input_outer = Rect {
            height: body_height - frame_height,
            ..area
        };
        let frame_outer = Rect {
            y: area.y + input_outer.height,
            height: frame_height,
            ..area
        };
        let status = Rect {
            y: area.bottom().saturating_sub(1),
            height: area.height.min(1),
            ..area
        };
        let toast = toast_active.then(|| Rect {
            y: area.bottom().saturating_sub(2),
            height: u16::from(area.height >= 2),
            ..area
        });
        Self {
            input_outer,
            input: pane_block().inner(input_outer),
            frame_outer,
            frame: pane_block().inner(frame_outer),
            toast,
            status,
        }
    }
}

/// Rounded border used around the panes.
pub fn pane_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
}

pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    rect.contains(Position::new(column, row))
}
