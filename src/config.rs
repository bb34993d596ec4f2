//! Saved default flags.
//!
//! A config file holds the same `--flag` tokens the command line accepts,
//! one or more per line. Blank lines and `#` comments are ignored.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const APP_DIR: &str = "markpane";
const SAVED_HEADER: &str = "# markpane defaults (saved with --save)";

/// Flags that can come from the command line or a config file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub scratch: bool,
    pub no_mouse: bool,
    pub no_animation: bool,
    pub wrap_width: Option<u16>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge `other` over `self`: switches add up, values from `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            scratch: self.scratch || other.scratch,
            no_mouse: self.no_mouse || other.no_mouse,
            no_animation: self.no_animation || other.no_animation,
            wrap_width: other.wrap_width.or(self.wrap_width),
            log_file: other.log_file.as_ref().or(self.log_file.as_ref()).cloned(),
        }
    }

    fn to_lines(&self) -> Vec<String> {
        let switches = [
            (self.scratch, "--scratch"),
            (self.no_mouse, "--no-mouse"),
            (self.no_animation, "--no-animation"),
        ];
        let mut lines: Vec<String> = switches
            .into_iter()
            .filter_map(|(on, flag)| on.then(|| flag.to_string()))
            .collect();
        lines.extend(self.wrap_width.map(|w| format!("--wrap-width {w}")));
        lines.extend(
            self.log_file
                .as_ref()
                .map(|path| format!("--log-file {}", path.display())),
        );
        lines
    }
}

/// Per-user config file, under the platform's config directory.
pub fn global_config_path() -> PathBuf {
    platform_config_dir().map_or_else(local_override_path, |dir| {
        dir.join(APP_DIR).join("config")
    })
}

#[cfg(target_os = "windows")]
fn platform_config_dir() -> Option<PathBuf> {
    std::env::var_os("APPDATA").map(PathBuf::from)
}

#[cfg(target_os = "macos")]
fn platform_config_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join("Library").join("Application Support"))
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn platform_config_dir() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
}

/// Config file in the working directory, layered over the global one.
pub fn local_override_path() -> PathBuf {
    PathBuf::from(".markpanerc")
}

/// Read flag tokens from `path`. A missing file means no flags.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.is_file() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Reading config {}", path.display()))?;
    let tokens: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .flat_map(str::split_whitespace)
        .map(String::from)
        .collect();
    let flags = parse_flag_tokens(&tokens);
    tracing::debug!(path = %path.display(), ?flags, "loaded config");
    Ok(flags)
}

/// Write `flags` to `path`, one flag per line.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Creating config directory {}", dir.display()))?;
    }
    let mut body = String::from(SAVED_HEADER);
    for line in flags.to_lines() {
        body.push('\n');
        body.push_str(&line);
    }
    body.push('\n');
    fs::write(path, body).with_context(|| format!("Writing config {}", path.display()))
}

/// Remove the config file at `path` if there is one.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Err(err) if err.kind() != std::io::ErrorKind::NotFound => {
            Err(err).with_context(|| format!("Removing config {}", path.display()))
        }
        _ => Ok(()),
    }
}

/// Pick the known flags out of a token list. Unknown tokens are skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut rest = tokens.iter().map(String::as_str);
    while let Some(token) = rest.next() {
        let (name, inline) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (token, None),
        };
        match name {
            "--scratch" => flags.scratch = true,
            "--no-mouse" => flags.no_mouse = true,
            "--no-animation" => flags.no_animation = true,
            "--wrap-width" => {
                if let Some(value) = inline.or_else(|| rest.next()) {
                    flags.wrap_width = value.parse::<u16>().ok().filter(|w| *w > 0);
                }
            }
            "--log-file" => {
                if let Some(value) = inline.or_else(|| rest.next()) {
                    flags.log_file = Some(PathBuf::from(value));
                }
            }
            _ => {}
        }
    }
    flags
}
