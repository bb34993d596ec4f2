//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`layout`]: Screen geometry shared by drawing and hit-testing
//! - [`pane`]: Opacity and stacking of the overlapping panes
//! - [`toggle`]: The text/preview switch
//! - [`transition`]: Fade and slide timing
//! - [`viewport`]: Scroll position and visible range management

pub mod layout;
pub mod pane;
pub mod toggle;
pub mod transition;
pub mod viewport;

mod overlays;
mod render;
mod status;

use ratatui::layout::Rect;

pub use overlays::{link_picker_content_top, link_picker_rect};
pub use render::{input_shift, render, render_at};

/// Blank columns kept between the pane border and its text.
pub const PANE_PADDING: u16 = 1;

/// Text area of a pane: `pane` without the horizontal padding.
pub const fn content_rect(pane: Rect) -> Rect {
    Rect {
        x: pane.x.saturating_add(PANE_PADDING),
        width: pane.width.saturating_sub(2 * PANE_PADDING),
        ..pane
    }
}

#[cfg(test)]
mod tests;
