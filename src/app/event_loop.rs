use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use super::update::LoggedMessage;
use crate::app::{App, Message, Model, update};
use crate::ui::transition::FRAME_INTERVAL;

const RESIZE_QUIET_MS: u64 = 100;
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Holds the latest terminal size until resize events stop arriving.
pub(super) struct ResizeDebouncer {
    quiet_ms: u64,
    latest: Option<PendingResize>,
}

#[derive(Clone, Copy)]
struct PendingResize {
    size: (u16, u16),
    at_ms: u64,
}

impl ResizeDebouncer {
    pub(super) const fn new(quiet_ms: u64) -> Self {
        Self {
            quiet_ms,
            latest: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.latest = Some(PendingResize {
            size: (width, height),
            at_ms: now_ms,
        });
    }

    /// The queued size, once it has been quiet long enough.
    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let pending = self.latest?;
        (now_ms.saturating_sub(pending.at_ms) >= self.quiet_ms).then(|| {
            self.latest = None;
            pending.size
        })
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.latest.is_some()
    }
}

impl App {
    /// Run the editor until the person quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized or the event
    /// loop hits an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal; markpane requires an interactive terminal")?;
        let size = terminal.size()?;

        let mut model = self.initial_model((size.width, size.height));
        tracing::debug!(?model, "starting");

        if self.mouse_enabled {
            execute!(stdout(), EnableMouseCapture)?;
        }
        execute!(stdout(), EnableBracketedPaste)?;

        let result = Self::event_loop(&mut terminal, &mut model);

        let _ = execute!(stdout(), DisableBracketedPaste);
        if self.mouse_enabled {
            let _ = execute!(stdout(), DisableMouseCapture);
        }
        ratatui::restore();

        result
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let clock = Instant::now();
        let elapsed_ms = || u64::try_from(clock.elapsed().as_millis()).unwrap_or(u64::MAX);
        let mut resizes = ResizeDebouncer::new(RESIZE_QUIET_MS);
        let mut frames: u64 = 0;
        let mut dirty = true;

        while !model.should_quit {
            let now = Instant::now();
            dirty |= model.expire_toast(now);

            let animating = model.is_animating(now);
            if animating {
                dirty = true;
            } else if model.pane_fade.is_some() || model.toggle_slide.is_some() {
                model.settle_transitions(now);
                dirty = true;
            }

            if let Some((width, height)) = resizes.take_ready(elapsed_ms()) {
                tracing::debug!(width, height, "applying debounced resize");
                Self::dispatch(model, Message::Resize(width, height));
                dirty = true;
            }

            if dirty {
                frames += 1;
                let drawn_at = Instant::now();
                terminal.draw(|frame| Self::view(model, frame))?;
                tracing::trace!(frame = frames, elapsed = ?drawn_at.elapsed(), "drew frame");
                dirty = false;
            }
            if model.should_quit {
                break;
            }

            let wait = if animating {
                FRAME_INTERVAL
            } else if resizes.is_pending() {
                Duration::from_millis(10)
            } else {
                IDLE_POLL
            };
            if !event::poll(wait)? {
                continue;
            }
            // Everything already queued is handled before the next draw.
            let mut handled = 0_u32;
            loop {
                let ev = event::read()?;
                if let Some(msg) = Self::handle_event(&ev, model, elapsed_ms(), &mut resizes) {
                    Self::dispatch(model, msg);
                    handled += 1;
                    dirty = true;
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
            if handled > 1 {
                tracing::trace!(frame = frames, handled, "batched events");
            }
        }
        Ok(())
    }

    /// Apply a message and then run its side effects.
    pub(super) fn dispatch(model: &mut Model, msg: Message) {
        tracing::debug!(msg = ?LoggedMessage(&msg), "message");
        let effect = msg.clone();
        let current = std::mem::take(model);
        *model = update(current, msg);
        Self::handle_message_side_effects(model, &effect);
    }
}
