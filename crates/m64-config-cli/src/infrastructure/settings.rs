//! TOML settings for the `m64cfg` tool itself.
//!
//! Looked up in the platform config directory unless `--settings` (or
//! `$M64CFG_SETTINGS`) names another file:
//! - Windows:  `%APPDATA%\m64cfg\settings.toml`
//! - Linux:    `$XDG_CONFIG_HOME/m64cfg/settings.toml` or
//!   `~/.config/m64cfg/settings.toml`
//! - macOS:    `~/Library/Application Support/m64cfg/settings.toml`
//!
//! ```toml
//! log_level = "info"
//!
//! [files]
//! config = "/sdcard/mupen64plus/mupen64plus.cfg"
//! cheats = "/sdcard/mupen64plus/mupencheat.txt"
//!
//! [output]
//! show_sentinel = true
//! ```
//!
//! Every field is optional.  A missing file means all defaults, which is
//! how the tool runs the first time.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for settings file operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse settings TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Settings schema ───────────────────────────────────────────────────────────

/// Top-level settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CliSettings {
    /// `tracing` filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub files: FileSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

/// Files used when a sub-command is run without `--file`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FileSettings {
    /// Config file for `sections`, `get`, `put`, `remove`, `match`, `dump`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<PathBuf>,
    /// Cheat database for `cheats`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cheats: Option<PathBuf>,
}

/// Presentation options.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutputSettings {
    /// List the sectionless section in `sections` even when it is empty.
    #[serde(default)]
    pub show_sentinel: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            files: FileSettings::default(),
            output: OutputSettings::default(),
        }
    }
}

// ── Settings repository ───────────────────────────────────────────────────────

/// Resolves the default settings file path.
///
/// # Errors
///
/// Returns [`SettingsError::NoPlatformConfigDir`] when the platform config
/// base directory cannot be determined from the environment.
pub fn default_settings_path() -> Result<PathBuf, SettingsError> {
    platform_config_dir()
        .map(|dir| dir.join("settings.toml"))
        .ok_or(SettingsError::NoPlatformConfigDir)
}

/// Loads settings from `path`, returning [`CliSettings::default`] if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`SettingsError::Io`] for file-system errors other than "not
/// found", and [`SettingsError::Parse`] if the TOML is malformed.
pub fn load_settings(path: &Path) -> Result<CliSettings, SettingsError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(CliSettings::default()),
        Err(e) => Err(SettingsError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Resolves the platform config directory for the tool.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("m64cfg"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("m64cfg"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("m64cfg")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
