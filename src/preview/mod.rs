//! Markdown preview rendering.
//!
//! This module handles:
//! - Parsing the body with comrak
//! - Applying the element style table
//! - Rendering to styled terminal rows and to HTML

mod html;
mod render;
mod theme;
mod types;
mod wrap;

pub use html::{escape_html, escape_url, render_html, render_html_document};
pub use render::{classify, clip_line, markdown_options, render_preview};
pub use theme::{Element, ElementStyle, GREEN, MIDNIGHT_BLUE, PINK, WHITE, element_style};
pub use types::{PreviewLine, PreviewLink, PreviewSpan, RenderedPreview};
pub use wrap::{display_width, truncate_text, wrap_spans};

pub(crate) use render::layout_table;
pub(crate) use wrap::{spans_width, split_hard_lines};
