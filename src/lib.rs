// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. preview::PreviewLine)
    clippy::module_name_repetitions
)]

//! # Markpane
//!
//! A terminal markdown editor with two overlapping panes.
//!
//! Markpane keeps a title and a markdown body in memory and shows them in
//! one of two modes:
//! - **Text**: an editable title and body, the raw markdown source
//! - **Preview**: the body rendered as styled terminal text
//!
//! A switch on the pane frame flips between the modes; the panes cross-fade
//! and the switch knob slides.
//!
//! ## Architecture
//!
//! Markpane uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`document`]: Title and body
//! - [`editor`]: Text editing for the title and body inputs
//! - [`mode`]: Text / Preview edit type
//! - [`preview`]: Markdown to styled terminal lines and to HTML
//! - [`scratch`]: Markup scratch view
//! - [`ui`]: Terminal UI components
//! - [`config`]: Command-line and config file flags

pub mod app;
pub mod config;
pub mod document;
pub mod editor;
pub mod mode;
pub mod preview;
pub mod scratch;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::Document;
    pub use crate::mode::EditType;
    pub use crate::ui::viewport::Viewport;
}
