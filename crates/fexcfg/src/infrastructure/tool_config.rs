//! TOML settings for the `fexcfg` tool itself.
//!
//! These are *not* FEX-Emu settings; they tell the tool where the image file
//! system lives and how chatty to be.  Stored at:
//! - Windows:  `%APPDATA%\fexcfg\config.toml`
//! - Linux:    `~/.config/fexcfg/config.toml`
//! - macOS:    `~/Library/Application Support/fexcfg/config.toml`
//!
//! ```toml
//! [imagefs]
//! root = "/data/imagefs"
//! user = "xuser"
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Every field has a serde default, so an empty or partial file works and a
//! missing file means "all defaults".

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::store::FEX_DIR;

const TOOL_DIR: &str = "fexcfg";
const TOOL_CONFIG_FILE: &str = "config.toml";

/// Failure reading or writing `config.toml`.
#[derive(Debug, Error)]
pub enum ToolConfigError {
    /// Neither `--tool-config` nor a usable config home (`APPDATA`, `HOME`,
    /// `XDG_CONFIG_HOME`) was available.
    #[error("no tool config path: pass --tool-config or set HOME")]
    NoConfigHome,

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not valid tool config TOML: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot encode tool config as TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Schema ────────────────────────────────────────────────────────────────────

/// Top-level tool settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ToolConfig {
    #[serde(default)]
    pub imagefs: ImageFsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Location of the emulated root file system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageFsConfig {
    /// Root of the image file system.
    #[serde(default = "default_imagefs_root")]
    pub root: PathBuf,
    /// User whose home lives at `<root>/home/<user>`.
    #[serde(default = "default_user")]
    pub user: String,
}

impl ImageFsConfig {
    /// Base home path; container homes are this path suffixed with `-<id>`.
    pub fn home_path(&self) -> PathBuf {
        self.root.join("home").join(&self.user)
    }

    /// Directory holding per-program FEX configs (`<program>.json`).
    pub fn app_config_dir(&self) -> PathBuf {
        self.home_path().join(FEX_DIR).join("AppConfig")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_imagefs_root() -> PathBuf {
    PathBuf::from("imagefs")
}
fn default_user() -> String {
    "xuser".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ImageFsConfig {
    fn default() -> Self {
        Self {
            root: default_imagefs_root(),
            user: default_user(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ── Load / save ───────────────────────────────────────────────────────────────

/// `<config home>/fexcfg/config.toml`, used when `--tool-config` is absent.
pub fn default_config_path() -> Result<PathBuf, ToolConfigError> {
    let home = config_home().ok_or(ToolConfigError::NoConfigHome)?;
    Ok(home.join(TOOL_DIR).join(TOOL_CONFIG_FILE))
}

/// Reads the tool settings.  A file that does not exist yet is all defaults;
/// any other read failure, or TOML that does not match the schema, is an error.
pub fn load_tool_config(path: &Path) -> Result<ToolConfig, ToolConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no tool config file, using defaults");
            return Ok(ToolConfig::default());
        }
        Err(source) => {
            return Err(ToolConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    toml::from_str(&text).map_err(|source| ToolConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `config` as pretty TOML, creating missing parent directories.
pub fn save_tool_config(path: &Path, config: &ToolConfig) -> Result<(), ToolConfigError> {
    let text = toml::to_string_pretty(config)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error(parent))?;
    }
    std::fs::write(path, text).map_err(write_error(path))
}

fn write_error(path: &Path) -> impl FnOnce(io::Error) -> ToolConfigError {
    let path = path.to_path_buf();
    move |source| ToolConfigError::Write { path, source }
}

/// Per-user base directory for application settings.
#[cfg(target_os = "windows")]
fn config_home() -> Option<PathBuf> {
    std::env::var_os("APPDATA").map(PathBuf::from)
}

#[cfg(target_os = "macos")]
fn config_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| Path::new(&home).join("Library/Application Support"))
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn config_home() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| Path::new(&home).join(".config")))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
