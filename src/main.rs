//! Markpane - a two-pane terminal markdown editor.
//!
//! # Usage
//!
//! ```bash
//! markpane
//! markpane --wrap-width 80
//! markpane --scratch
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use markpane::app::App;
use markpane::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    save_config_flags,
};

/// A terminal markdown editor with a live preview
#[derive(Parser, Debug)]
#[command(name = "markpane", version, about, long_about = None)]
struct Cli {
    /// Open the markup scratch view instead of the editor
    #[arg(long)]
    scratch: bool,

    /// Do not capture the mouse
    #[arg(long)]
    no_mouse: bool,

    /// Switch panes without fading or sliding
    #[arg(long)]
    no_animation: bool,

    /// Wrap the preview at most this many columns wide
    #[arg(long, value_name = "N")]
    wrap_width: Option<u16>,

    /// Write log output to a file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
                )
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        // The TUI owns the screen; only warnings reach stderr.
        None => tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
            )
            .init(),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = ConfigFlags {
        scratch: cli.scratch,
        no_mouse: cli.no_mouse,
        no_animation: cli.no_animation,
        wrap_width: cli.wrap_width.filter(|w| *w > 0),
        log_file: cli.log_file.clone(),
    };

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_deref())?;
    tracing::info!(?effective, "starting markpane");

    let mut app = App::new()
        .with_scratch(effective.scratch)
        .with_mouse(!effective.no_mouse)
        .with_animations(!effective.no_animation)
        .with_wrap_width(effective.wrap_width)
        .with_config_paths(
            Some(global_path),
            local_path.exists().then_some(local_path),
        );

    app.run().context("Application error")
}
