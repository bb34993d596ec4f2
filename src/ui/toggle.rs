//! The text/preview switch.
//!
//! The switch draws a label, a pink track, a knob and a dot. Knob and dot
//! positions are looked up in a two-entry table keyed by [`EditType`]; while
//! the slide animation runs they are interpolated between the previous and
//! the current entry.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

use crate::mode::EditType;
use crate::preview::{MIDNIGHT_BLUE, PINK};

use super::transition::lerp;

/// Width of the knob in cells.
pub const KNOB_WIDTH: u16 = 3;
/// Width of the track in cells.
pub const TRACK_WIDTH: u16 = 9;
/// Room reserved for the longest mode label.
pub const LABEL_WIDTH: u16 = 7;
/// Total width of the widget: label, one space, track.
pub const TOGGLE_WIDTH: u16 = LABEL_WIDTH + 1 + TRACK_WIDTH;

/// Where the indicators sit inside the track, in cells from its left edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorPosition {
    pub knob: f32,
    pub dot: f32,
    /// 1.0 is a full dot, 0.0 hides it.
    pub dot_scale: f32,
}

const POSITIONS: [IndicatorPosition; 2] = [
    // Text
    IndicatorPosition {
        knob: 0.0,
        dot: 3.0,
        dot_scale: 1.0,
    },
    // Preview: knob at TRACK_WIDTH - KNOB_WIDTH
    IndicatorPosition {
        knob: 6.0,
        dot: 8.0,
        dot_scale: 0.0,
    },
];

/// Resting indicator position for a mode.
pub const fn indicator_position(edit_type: EditType) -> IndicatorPosition {
    POSITIONS[edit_type.index()]
}

/// Indicator position part way through the slide from `from` to `to`.
pub fn interpolate(from: EditType, to: EditType, progress: f32) -> IndicatorPosition {
    let a = indicator_position(from);
    let b = indicator_position(to);
    IndicatorPosition {
        knob: lerp(a.knob, b.knob, progress),
        dot: lerp(a.dot, b.dot, progress),
        dot_scale: lerp(a.dot_scale, b.dot_scale, progress),
    }
}

/// Rectangle of the toggle: bottom row of `pane_outer`, two cells in from the
/// right edge.
pub fn toggle_rect(pane_outer: Rect) -> Rect {
    let width = TOGGLE_WIDTH.min(pane_outer.width.saturating_sub(2));
    let right = pane_outer.right().saturating_sub(2);
    Rect::new(
        right.saturating_sub(width),
        pane_outer.bottom().saturating_sub(1),
        width,
        u16::from(pane_outer.height > 0),
    )
}

/// The switch widget for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Toggle {
    edit_type: EditType,
    position: IndicatorPosition,
}

impl Toggle {
    /// A toggle at rest in `edit_type`.
    pub const fn new(edit_type: EditType) -> Self {
        Self {
            edit_type,
            position: indicator_position(edit_type),
        }
    }

    /// A toggle sliding towards `edit_type` from the other mode.
    pub fn sliding(edit_type: EditType, progress: f32) -> Self {
        Self {
            edit_type,
            position: interpolate(edit_type.toggled(), edit_type, progress),
        }
    }

    pub const fn position(&self) -> IndicatorPosition {
        self.position
    }
}

impl Widget for Toggle {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < TRACK_WIDTH || area.height == 0 {
            return;
        }
        let y = area.y;
        let track_x = area.right() - TRACK_WIDTH;

        let label_style = Style::new().fg(PINK).add_modifier(Modifier::BOLD);
        let label = self.edit_type.label();
        let label_width = track_x.saturating_sub(area.x).saturating_sub(1);
        if label_width > 0 {
            let text = format!("{label:>width$}", width = usize::from(label_width));
            buf.set_stringn(area.x, y, text, usize::from(label_width), label_style);
        }

        let track_style = Style::new().fg(PINK);
        for x in track_x..area.right() {
            buf[(x, y)].set_symbol("━").set_style(track_style);
        }

        if let Some(glyph) = dot_glyph(self.position.dot_scale) {
            let dot_x = track_x + cell_offset(self.position.dot);
            buf[(dot_x, y)].set_symbol(glyph).set_style(track_style);
        }

        // The knob is drawn last so it covers the dot while passing it
        let knob_x = track_x + cell_offset(self.position.knob).min(TRACK_WIDTH - KNOB_WIDTH);
        let knob_style = Style::new().fg(PINK).bg(MIDNIGHT_BLUE);
        buf.set_string(knob_x, y, "(●)", knob_style);
    }
}

fn cell_offset(position: f32) -> u16 {
    // Positions are within the track width
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cell = position.round().clamp(0.0, f32::from(TRACK_WIDTH - 1)) as u16;
    cell
}

fn dot_glyph(scale: f32) -> Option<&'static str> {
    if scale >= 0.66 {
        Some("●")
    } else if scale >= 0.33 {
        Some("•")
    } else if scale > 0.0 {
        Some("·")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.right())
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_knob_table_matches_track_geometry() {
        let preview = indicator_position(EditType::Preview);
        assert!((preview.knob - f32::from(TRACK_WIDTH - KNOB_WIDTH)).abs() < f32::EPSILON);
        assert!(indicator_position(EditType::Text).knob.abs() < f32::EPSILON);
    }

    #[test]
    fn test_dot_shrinks_to_nothing_in_preview() {
        assert!((indicator_position(EditType::Text).dot_scale - 1.0).abs() < f32::EPSILON);
        assert!(indicator_position(EditType::Preview).dot_scale.abs() < f32::EPSILON);
    }

    #[test]
    fn test_slide_ends_at_table_entry() {
        let end = interpolate(EditType::Text, EditType::Preview, 1.0);
        assert_eq!(end, indicator_position(EditType::Preview));
        let start = interpolate(EditType::Text, EditType::Preview, 0.0);
        assert_eq!(start, indicator_position(EditType::Text));
    }

    #[test]
    fn test_toggle_rect_sits_on_bottom_row_right() {
        let pane = Rect::new(0, 1, 60, 20);
        let rect = toggle_rect(pane);
        assert_eq!(rect.y, 20);
        assert_eq!(rect.right(), 58);
        assert_eq!(rect.width, TOGGLE_WIDTH);
    }

    #[test]
    fn test_render_text_mode() {
        let area = Rect::new(0, 0, TOGGLE_WIDTH, 1);
        let mut buf = Buffer::empty(area);
        Toggle::new(EditType::Text).render(area, &mut buf);
        assert_eq!(row(&buf, 0), "   text (●)●━━━━━");
    }

    #[test]
    fn test_render_preview_mode_hides_dot() {
        let area = Rect::new(0, 0, TOGGLE_WIDTH, 1);
        let mut buf = Buffer::empty(area);
        Toggle::new(EditType::Preview).render(area, &mut buf);
        assert_eq!(row(&buf, 0), "preview ━━━━━━(●)");
    }

    #[test]
    fn test_render_skips_tiny_area() {
        let area = Rect::new(0, 0, 4, 1);
        let mut buf = Buffer::empty(area);
        Toggle::new(EditType::Text).render(area, &mut buf);
        assert_eq!(row(&buf, 0), "    ");
    }

    proptest! {
        #[test]
        fn indicators_stay_inside_track(p in 0.0f32..=1.0, to_preview in any::<bool>()) {
            let to = if to_preview { EditType::Preview } else { EditType::Text };
            let pos = interpolate(to.toggled(), to, p);
            prop_assert!(pos.knob >= 0.0 && pos.knob <= f32::from(TRACK_WIDTH - KNOB_WIDTH));
            prop_assert!(pos.dot >= 0.0 && pos.dot < f32::from(TRACK_WIDTH));
            prop_assert!((0.0..=1.0).contains(&pos.dot_scale));
        }
    }
}
