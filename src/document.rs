//! The in-memory document being edited.

/// Title and markdown body of the document.
///
/// Pure state: the model replaces the strings wholesale whenever an input
/// reports a change, and the panes read them back on every frame.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Document {
    title: String,
    body: String,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// The document title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The markdown body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Replace the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Replace the body.
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }
}
