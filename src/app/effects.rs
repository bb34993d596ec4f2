use std::io::{Write, stdout};

use base64::Engine;
use thiserror::Error;

use crate::app::{App, Message, Model, ToastLevel};
use crate::preview::{PreviewLink, render_html_document};

/// URL schemes the preview is allowed to hand to the system browser.
const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Failure of a side effect. Shown as a toast, never propagated.
#[derive(Debug, Error)]
pub enum EffectError {
    #[error("unsupported link: {0}")]
    UnsupportedScheme(String),

    #[error("could not launch browser: {0}")]
    Launch(#[source] std::io::Error),

    #[error("clipboard write failed: {0}")]
    Clipboard(#[source] std::io::Error),
}

impl App {
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        match msg {
            Message::OpenVisibleLinks => Self::open_visible_links(model),
            Message::SelectVisibleLink(index) => Self::follow_link_picker_index(model, *index),
            Message::FollowLinkAt { line, column } => {
                let link = model.preview().link_at(*line, *column).cloned();
                if let Some(link) = link {
                    Self::follow_link(model, &link);
                }
            }
            Message::CopyHtml => Self::copy_html(model),
            _ => {}
        }
    }

    fn open_visible_links(model: &mut Model) {
        let visible = model.visible_links();
        match visible.len() {
            0 => model.show_toast(ToastLevel::Info, "No visible links"),
            1 => Self::follow_link(model, &visible[0]),
            _ => {
                model.link_picker_items = visible;
                model.show_toast(ToastLevel::Info, "Select link: 1-9 (Esc to cancel)");
            }
        }
    }

    fn follow_link_picker_index(model: &mut Model, index: u8) {
        let Some(link) = usize::from(index)
            .checked_sub(1)
            .and_then(|idx| model.link_picker_items.get(idx).cloned())
        else {
            return;
        };
        model.link_picker_items.clear();
        Self::follow_link(model, &link);
    }

    fn follow_link(model: &mut Model, link: &PreviewLink) {
        match open_external_link(&link.url) {
            Ok(()) => model.show_toast(ToastLevel::Info, format!("Opened {}", link.url)),
            Err(err) => {
                tracing::warn!(url = %link.url, error = %err, "failed to open link");
                let level = match err {
                    EffectError::UnsupportedScheme(_) => ToastLevel::Warning,
                    _ => ToastLevel::Error,
                };
                model.show_toast(level, format!("Open failed: {err}"));
            }
        }
    }

    fn copy_html(model: &mut Model) {
        let html = render_html_document(model.document.title(), model.document.body());
        match copy_to_clipboard(&html) {
            Ok(()) => model.show_toast(
                ToastLevel::Info,
                format!("Copied {} bytes of HTML", html.len()),
            ),
            Err(err) => {
                tracing::warn!(error = %err, "failed to copy html");
                model.show_toast(ToastLevel::Error, format!("Copy failed: {err}"));
            }
        }
    }
}

/// Reject anything but web and mail links before a process is started.
pub(super) fn check_scheme(url: &str) -> Result<(), EffectError> {
    let scheme = url.split_once(':').map(|(scheme, _)| scheme.to_ascii_lowercase());
    match scheme {
        Some(scheme) if ALLOWED_SCHEMES.contains(&scheme.as_str()) => Ok(()),
        _ => Err(EffectError::UnsupportedScheme(url.to_string())),
    }
}

/// Open `url` in the system browser as a separate process, so no editor
/// context travels with it.
fn open_external_link(url: &str) -> Result<(), EffectError> {
    check_scheme(url)?;
    launch(url).map_err(EffectError::Launch)
}

fn launch(url: &str) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()?
            .wait()?;
        Ok(())
    }
    #[cfg(target_os = "windows")]
    {
        use std::process::Stdio;
        std::process::Command::new("cmd")
            .args(["/C", "start", "", url])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        return Ok(());
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        use std::process::Stdio;
        std::process::Command::new("xdg-open")
            .arg(url)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?
            .wait()?;
        Ok(())
    }
}

fn copy_to_clipboard(text: &str) -> Result<(), EffectError> {
    let osc = osc52_sequence(text);
    let mut out = stdout();
    out.write_all(osc.as_bytes())
        .and_then(|()| out.flush())
        .map_err(EffectError::Clipboard)
}

fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}
