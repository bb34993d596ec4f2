use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::document::Document;
use crate::editor::{Cursor, EditorBuffer};
use crate::mode::EditType;
use crate::preview::{PreviewLink, RenderedPreview, render_preview};
use crate::scratch::Scratch;
use crate::ui::layout::{ScratchLayout, ScreenLayout};
use crate::ui::transition::{PANE_FADE, TOGGLE_SLIDE, Transition};
use crate::ui::viewport::Viewport;
use crate::ui::{PANE_PADDING, content_rect};

/// Which text input receives typed characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    Title,
    #[default]
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
#[derive(Clone)]
pub struct Model {
    /// Title and markdown body
    pub document: Document,
    /// Current mode; changed only through [`Model::toggle_edit_type`]
    edit_type: EditType,
    /// Input receiving typed text in Text mode
    pub focus: Focus,
    /// Caret in the title, as a byte offset
    pub title_cursor: usize,
    /// Caret in the body
    pub body_cursor: Cursor,
    /// Scroll state of the editor pane
    pub editor_viewport: Viewport,
    /// Scroll state of the preview pane
    pub preview_viewport: Viewport,
    /// Rendered body for the current preview width
    preview: RenderedPreview,
    /// Terminal size (width, height)
    pub terminal_size: (u16, u16),
    /// Upper bound on the preview wrap width
    pub wrap_width: Option<u16>,
    /// Whether toggling animates the panes and the switch
    pub animations_enabled: bool,
    /// Running pane cross-fade
    pub pane_fade: Option<Transition>,
    /// Running toggle indicator slide
    pub toggle_slide: Option<Transition>,
    toast: Option<Toast>,
    /// Links offered by the link picker (empty when closed)
    pub link_picker_items: Vec<PreviewLink>,
    /// Whether the help overlay is shown
    pub help_visible: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Scratch markup view, when started with `--scratch`
    pub scratch: Option<Scratch>,
    /// Config file paths shown in help
    pub config_global_path: Option<PathBuf>,
    pub config_local_path: Option<PathBuf>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("edit_type", &self.edit_type)
            .field("focus", &self.focus)
            .field("title_len", &self.document.title().len())
            .field("body_len", &self.document.body().len())
            .field("body_cursor", &self.body_cursor)
            .field("preview_lines", &self.preview.line_count())
            .field("terminal_size", &self.terminal_size)
            .finish_non_exhaustive()
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new((80, 24))
    }
}

impl Model {
    /// Create a model with an empty document in Text mode.
    pub fn new(terminal_size: (u16, u16)) -> Self {
        let mut model = Self {
            document: Document::new(),
            edit_type: EditType::default(),
            focus: Focus::default(),
            title_cursor: 0,
            body_cursor: Cursor::new(),
            editor_viewport: Viewport::default(),
            preview_viewport: Viewport::default(),
            preview: RenderedPreview::default(),
            terminal_size,
            wrap_width: None,
            animations_enabled: true,
            pane_fade: None,
            toggle_slide: None,
            toast: None,
            link_picker_items: Vec::new(),
            help_visible: false,
            should_quit: false,
            scratch: None,
            config_global_path: None,
            config_local_path: None,
        };
        model.sync_viewports();
        model.rebuild_preview();
        model
    }

    /// Start in the scratch markup view.
    #[must_use]
    pub fn with_scratch(mut self) -> Self {
        self.scratch = Some(Scratch::new());
        self
    }

    /// Limit the preview to at most `width` columns.
    #[must_use]
    pub fn with_wrap_width(mut self, width: Option<u16>) -> Self {
        self.wrap_width = width.filter(|w| *w > 0);
        self.rebuild_preview();
        self
    }

    pub const fn edit_type(&self) -> EditType {
        self.edit_type
    }

    /// Flip between Text and Preview.
    ///
    /// The flip is immediate; the fade and slide only affect drawing.
    pub(super) fn toggle_edit_type(&mut self, now: Instant) {
        self.edit_type = self.edit_type.toggled();
        self.link_picker_items.clear();
        if self.animations_enabled {
            self.pane_fade = Some(Transition::new(now, PANE_FADE));
            self.toggle_slide = Some(Transition::new(now, TOGGLE_SLIDE));
        }
        tracing::debug!(edit_type = ?self.edit_type, "toggled edit type");
    }

    /// Whether a transition still needs frames at `now`.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.pane_fade.is_some_and(|t| t.is_running(now))
            || self.toggle_slide.is_some_and(|t| t.is_running(now))
    }

    /// Drop transitions that have finished.
    pub(super) fn settle_transitions(&mut self, now: Instant) {
        if self.pane_fade.is_some_and(|t| !t.is_running(now)) {
            self.pane_fade = None;
        }
        if self.toggle_slide.is_some_and(|t| !t.is_running(now)) {
            self.toggle_slide = None;
        }
    }

    pub const fn preview(&self) -> &RenderedPreview {
        &self.preview
    }

    /// Replace the body and caret, then re-render the preview.
    pub(super) fn set_body(&mut self, text: String, cursor: Cursor) {
        self.document.set_body(text);
        self.body_cursor = cursor;
        self.rebuild_preview();
        self.editor_viewport.set_total(self.body_line_count());
        self.editor_viewport.ensure_visible(self.body_cursor.line);
    }

    pub(super) fn set_title(&mut self, text: String, cursor: usize) {
        self.document.set_title(text);
        self.title_cursor = cursor;
    }

    /// Number of lines in the body as the editor shows them.
    pub fn body_line_count(&self) -> usize {
        EditorBuffer::from_text(self.document.body()).line_count()
    }

    /// Screen geometry for the current terminal size and toast state.
    pub fn layout(&self) -> ScreenLayout {
        ScreenLayout::new(self.screen_area(), self.toast.is_some())
    }

    pub fn scratch_layout(&self) -> ScratchLayout {
        ScratchLayout::new(self.screen_area(), self.toast.is_some())
    }

    pub const fn screen_area(&self) -> Rect {
        Rect::new(0, 0, self.terminal_size.0, self.terminal_size.1)
    }

    /// Area inside the pane frame where text is drawn.
    pub fn content_area(&self) -> Rect {
        content_rect(self.layout().pane)
    }

    /// Width the preview is rendered at.
    pub fn preview_width(&self) -> usize {
        let width = self.content_area().width;
        let width = self.wrap_width.map_or(width, |w| width.min(w));
        usize::from(width.max(1))
    }

    /// Width the scratch frame is rendered at.
    pub fn scratch_width(&self) -> usize {
        usize::from(self.scratch_layout().frame.width.saturating_sub(2 * PANE_PADDING).max(1))
    }

    pub(super) fn resize(&mut self, width: u16, height: u16) {
        let old_width = self.preview_width();
        self.terminal_size = (width, height);
        self.sync_viewports();
        if self.preview_width() != old_width {
            self.rebuild_preview();
        }
        self.editor_viewport.ensure_visible(self.body_cursor.line);
    }

    pub(super) fn rebuild_preview(&mut self) {
        let width = self.preview_width();
        self.preview = render_preview(self.document.body(), width);
        self.preview_viewport.set_total(self.preview.line_count());
        tracing::debug!(width, lines = self.preview.line_count(), "rebuilt preview");
    }

    /// Keep viewport heights in step with the layout.
    fn sync_viewports(&mut self) {
        let height = self.content_area().height;
        self.editor_viewport.set_height(height);
        self.editor_viewport.set_total(self.body_line_count());
        self.preview_viewport.set_height(height);
        self.preview_viewport.set_total(self.preview.line_count());
    }

    /// Links on the preview rows currently on screen, at most nine.
    pub fn visible_links(&self) -> Vec<PreviewLink> {
        let range = self.preview_viewport.visible_range();
        self.preview
            .links_in_range(range.start, range.end)
            .into_iter()
            .take(9)
            .cloned()
            .collect()
    }

    pub(super) fn scroll_scratch(&mut self, delta: isize) {
        let width = self.scratch_width();
        if let Some(scratch) = self.scratch.as_mut() {
            scratch.scroll_frame(delta, width);
        }
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
        self.sync_viewports();
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            self.sync_viewports();
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    pub const fn link_picker_active(&self) -> bool {
        !self.link_picker_items.is_empty()
    }
}
