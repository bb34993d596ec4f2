//! Overlapping editor and preview panes.
//!
//! Both panes are drawn every frame into their own off-screen buffers and
//! then composited into the frame. Which pane wins a cell depends on the
//! pane's opacity and stacking order, both pure functions of [`EditType`]
//! (blended across the cross-fade).

use ratatui::buffer::{Buffer, Cell};
use ratatui::layout::Rect;
use ratatui::style::Modifier;

use crate::mode::EditType;

use super::transition::lerp;

/// The two overlapping panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Editor,
    Preview,
}

/// Opacity and stacking order of a pane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneVisibility {
    /// 0.0 is invisible, 1.0 fully drawn.
    pub opacity: f32,
    /// Higher is in front.
    pub z: u8,
}

/// Resting visibility of `pane` in mode `edit_type`.
pub const fn visibility(pane: Pane, edit_type: EditType) -> PaneVisibility {
    let active = matches!(
        (pane, edit_type),
        (Pane::Editor, EditType::Text) | (Pane::Preview, EditType::Preview)
    );
    if active {
        PaneVisibility { opacity: 1.0, z: 1 }
    } else {
        PaneVisibility { opacity: 0.0, z: 0 }
    }
}

/// Visibility part way through the cross-fade into `edit_type`.
///
/// Stacking order switches immediately; opacity is interpolated from the
/// other mode's value.
pub fn fading_visibility(pane: Pane, edit_type: EditType, progress: f32) -> PaneVisibility {
    let from = visibility(pane, edit_type.toggled());
    let to = visibility(pane, edit_type);
    PaneVisibility {
        opacity: lerp(from.opacity, to.opacity, progress),
        z: to.z,
    }
}

/// The pane that is frontmost and visible at rest.
pub const fn front_pane(edit_type: EditType) -> Pane {
    match edit_type {
        EditType::Text => Pane::Editor,
        EditType::Preview => Pane::Preview,
    }
}

/// Composite two pane buffers into `target` over `area`.
///
/// For every cell the pane with the higher opacity is shown, the front pane
/// on ties. A partially faded pane is drawn dimmed and a fully transparent
/// one not at all.
pub fn composite(
    target: &mut Buffer,
    area: Rect,
    editor: (&Buffer, PaneVisibility),
    preview: (&Buffer, PaneVisibility),
) {
    let (front, back) = if preview.1.z > editor.1.z {
        (preview, editor)
    } else {
        (editor, preview)
    };
    let (source, vis) = if front.1.opacity >= back.1.opacity {
        front
    } else {
        back
    };
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let Some(dst) = target.cell_mut((x, y)) else {
                continue;
            };
            if vis.opacity <= 0.0 {
                *dst = Cell::default();
                continue;
            }
            let Some(src) = source.cell((x, y)) else {
                continue;
            };
            *dst = src.clone();
            if vis.opacity < 1.0 {
                dst.modifier.insert(Modifier::DIM);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn filled(area: Rect, symbol: &str) -> Buffer {
        let mut buf = Buffer::empty(area);
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                buf[(x, y)].set_symbol(symbol);
            }
        }
        buf
    }

    #[test]
    fn test_text_mode_shows_editor_in_front() {
        let editor = visibility(Pane::Editor, EditType::Text);
        let preview = visibility(Pane::Preview, EditType::Text);
        assert!((editor.opacity - 1.0).abs() < f32::EPSILON);
        assert!(preview.opacity.abs() < f32::EPSILON);
        assert!(editor.z > preview.z);
        assert_eq!(front_pane(EditType::Text), Pane::Editor);
    }

    #[test]
    fn test_preview_mode_shows_preview_in_front() {
        let editor = visibility(Pane::Editor, EditType::Preview);
        let preview = visibility(Pane::Preview, EditType::Preview);
        assert!((preview.opacity - 1.0).abs() < f32::EPSILON);
        assert!(editor.opacity.abs() < f32::EPSILON);
        assert!(preview.z > editor.z);
        assert_eq!(front_pane(EditType::Preview), Pane::Preview);
    }

    #[test]
    fn test_fade_switches_z_immediately() {
        let preview = fading_visibility(Pane::Preview, EditType::Preview, 0.0);
        let editor = fading_visibility(Pane::Editor, EditType::Preview, 0.0);
        assert!(preview.z > editor.z);
        assert!(preview.opacity.abs() < f32::EPSILON);
        assert!((editor.opacity - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_composite_at_rest_copies_front_pane() {
        let area = Rect::new(0, 0, 4, 2);
        let editor = filled(area, "e");
        let preview = filled(area, "p");
        let mut target = Buffer::empty(area);
        composite(
            &mut target,
            area,
            (&editor, visibility(Pane::Editor, EditType::Preview)),
            (&preview, visibility(Pane::Preview, EditType::Preview)),
        );
        assert_eq!(target[(0, 0)].symbol(), "p");
        assert!(!target[(0, 0)].modifier.contains(Modifier::DIM));
    }

    #[test]
    fn test_composite_mid_fade_dims() {
        let area = Rect::new(0, 0, 2, 1);
        let editor = filled(area, "e");
        let preview = filled(area, "p");
        let mut target = Buffer::empty(area);
        composite(
            &mut target,
            area,
            (&editor, fading_visibility(Pane::Editor, EditType::Preview, 0.25)),
            (&preview, fading_visibility(Pane::Preview, EditType::Preview, 0.25)),
        );
        assert_eq!(target[(1, 0)].symbol(), "e");
        assert!(target[(1, 0)].modifier.contains(Modifier::DIM));
    }

    proptest! {
        #[test]
        fn exactly_one_pane_is_front_and_visible(preview_mode in any::<bool>()) {
            let mode = if preview_mode { EditType::Preview } else { EditType::Text };
            let e = visibility(Pane::Editor, mode);
            let p = visibility(Pane::Preview, mode);
            let visible = [e, p].iter().filter(|v| v.opacity > 0.0).count();
            prop_assert_eq!(visible, 1);
            prop_assert!(e.z != p.z);
            let front = if e.z > p.z { Pane::Editor } else { Pane::Preview };
            prop_assert_eq!(front, front_pane(mode));
        }
    }
}
