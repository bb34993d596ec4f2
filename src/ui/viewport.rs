//! Scroll state of a pane.
//!
//! The editor and the preview each own a [`Viewport`]. The editor's follows
//! the caret; the preview's is moved by the scrolling keys and the wheel.
//! Both are kept when their pane is hidden.

use std::ops::Range;

/// The visible window onto a list of rows.
///
/// # Example
///
/// ```
/// use markpane::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(10, 100);
/// vp.scroll_by(5);
/// assert_eq!(vp.visible_range(), 5..15);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    height: u16,
    offset: usize,
    total: usize,
}

impl Viewport {
    pub const fn new(height: u16, total: usize) -> Self {
        Self {
            height,
            offset: 0,
            total,
        }
    }

    /// First visible row.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    pub const fn total(&self) -> usize {
        self.total
    }

    /// Rows currently on screen, clamped to the content.
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.offset + usize::from(self.height)).min(self.total);
        self.offset.min(end)..end
    }

    /// Scroll position as a percentage (0-100).
    pub fn scroll_percent(&self) -> u8 {
        let max = self.max_offset();
        if max == 0 {
            return 100;
        }
        // offset <= max, so the result fits in 0..=100
        #[allow(clippy::cast_possible_truncation)]
        let percent = (self.offset * 100 / max) as u8;
        percent
    }

    pub const fn can_scroll_up(&self) -> bool {
        self.offset > 0
    }

    pub const fn can_scroll_down(&self) -> bool {
        self.offset < self.max_offset()
    }

    /// Move by `delta` rows; negative scrolls up.
    pub fn scroll_by(&mut self, delta: isize) {
        self.offset = self
            .offset
            .saturating_add_signed(delta)
            .min(self.max_offset());
    }

    /// Move by `pages` screens; negative pages up.
    pub fn page_by(&mut self, pages: isize) {
        let rows = isize::try_from(self.height).unwrap_or(isize::MAX);
        self.scroll_by(pages.saturating_mul(rows));
    }

    pub const fn go_to_top(&mut self) {
        self.offset = 0;
    }

    pub const fn go_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Scroll the least amount that brings `row` into view.
    pub fn ensure_visible(&mut self, row: usize) {
        let height = usize::from(self.height).max(1);
        if row < self.offset {
            self.offset = row;
        } else if row >= self.offset + height {
            self.offset = row + 1 - height;
        }
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn set_height(&mut self, height: u16) {
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Update the content length after a re-render.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.offset = self.offset.min(self.max_offset());
    }

    const fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.height as usize)
    }
}
