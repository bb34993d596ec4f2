//! The editor session.
//!
//! State lives in [`Model`]. Terminal events become [`Message`]s, which
//! [`update`] folds into a new model; anything touching the outside world
//! (opening links, the clipboard) runs afterwards as a side effect.
//! [`App::run`] owns the terminal and drives the loop.

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use effects::EffectError;
pub use model::{Focus, Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

/// Startup options, turned into a [`Model`] when the session begins.
#[derive(Debug, Clone)]
pub struct App {
    scratch: bool,
    mouse_enabled: bool,
    animations_enabled: bool,
    wrap_width: Option<u16>,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create an editor with an empty document.
    pub const fn new() -> Self {
        Self {
            scratch: false,
            mouse_enabled: true,
            animations_enabled: true,
            wrap_width: None,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Start in the scratch markup view instead of the editor.
    pub const fn with_scratch(mut self, enabled: bool) -> Self {
        self.scratch = enabled;
        self
    }

    /// Enable or disable mouse capture.
    pub const fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }

    /// Enable or disable the fade and slide animations.
    pub const fn with_animations(mut self, enabled: bool) -> Self {
        self.animations_enabled = enabled;
        self
    }

    /// Limit the preview wrap width.
    pub const fn with_wrap_width(mut self, width: Option<u16>) -> Self {
        self.wrap_width = width;
        self
    }

    /// Config file locations listed in the help popup.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }

    /// The model the event loop starts from.
    pub fn initial_model(&self, terminal_size: (u16, u16)) -> Model {
        let mut model = Model::new(terminal_size).with_wrap_width(self.wrap_width);
        if self.scratch {
            model = model.with_scratch();
        }
        model.animations_enabled = self.animations_enabled;
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        model
    }
}
