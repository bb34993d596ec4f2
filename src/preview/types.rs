use ratatui::style::Style;
use unicode_width::UnicodeWidthStr;

/// A styled run of text in the preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewSpan {
    text: String,
    style: Style,
    /// Index into [`RenderedPreview::links`] when the span is link text.
    link: Option<usize>,
}

impl PreviewSpan {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
            link: None,
        }
    }

    #[must_use]
    pub const fn with_link(mut self, link: Option<usize>) -> Self {
        self.link = link;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn style(&self) -> Style {
        self.style
    }

    pub const fn link(&self) -> Option<usize> {
        self.link
    }

    pub(crate) const fn set_link(&mut self, link: Option<usize>) {
        self.link = link;
    }

    pub fn width(&self) -> usize {
        UnicodeWidthStr::width(self.text.as_str())
    }
}

/// One terminal row of the rendered preview.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewLine {
    spans: Vec<PreviewSpan>,
    /// Vertical spacing row (margins and padding), not content.
    spacer: bool,
}

impl PreviewLine {
    pub const fn new(spans: Vec<PreviewSpan>) -> Self {
        Self {
            spans,
            spacer: false,
        }
    }

    pub(crate) const fn spacer(spans: Vec<PreviewSpan>) -> Self {
        Self {
            spans,
            spacer: true,
        }
    }

    pub fn spans(&self) -> &[PreviewSpan] {
        &self.spans
    }

    pub(crate) fn spans_mut(&mut self) -> &mut [PreviewSpan] {
        &mut self.spans
    }

    pub const fn is_spacer(&self) -> bool {
        self.spacer
    }

    /// Plain text of the row.
    pub fn text(&self) -> String {
        self.spans.iter().map(PreviewSpan::text).collect()
    }

    pub fn width(&self) -> usize {
        self.spans.iter().map(PreviewSpan::width).sum()
    }

    /// The span covering a display column, if any.
    pub fn span_at(&self, column: usize) -> Option<&PreviewSpan> {
        let mut start = 0usize;
        for span in &self.spans {
            let end = start + span.width();
            if column >= start && column < end {
                return Some(span);
            }
            start = end;
        }
        None
    }
}

/// A link found in the preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewLink {
    /// Visible link text.
    pub text: String,
    /// Link target.
    pub url: String,
    /// First preview row the link appears on.
    pub line: usize,
}

/// Output of the preview renderer for one `(body, width)` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedPreview {
    lines: Vec<PreviewLine>,
    links: Vec<PreviewLink>,
    width: usize,
}

impl RenderedPreview {
    pub(crate) const fn new(lines: Vec<PreviewLine>, links: Vec<PreviewLink>, width: usize) -> Self {
        Self {
            lines,
            links,
            width,
        }
    }

    pub fn lines(&self) -> &[PreviewLine] {
        &self.lines
    }

    pub fn links(&self) -> &[PreviewLink] {
        &self.links
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Links whose first row falls inside `[start, end)`.
    pub fn links_in_range(&self, start: usize, end: usize) -> Vec<&PreviewLink> {
        self.links
            .iter()
            .filter(|link| link.line >= start && link.line < end)
            .collect()
    }

    /// The link under a preview row and display column.
    pub fn link_at(&self, line: usize, column: usize) -> Option<&PreviewLink> {
        let span = self.lines.get(line)?.span_at(column)?;
        self.links.get(span.link()?)
    }
}
