//! Config.json persistence for FEX-Emu containers.
//!
//! Each container has its own home directory next to the image's home,
//! suffixed with the container id, and FEX-Emu reads its settings from
//! `.fex-emu/Config.json` inside it:
//!
//! ```text
//! <imagefs>/home/xuser-3/.fex-emu/Config.json
//!           └─ base ──┘└┬┘
//!                       container id
//! ```
//!
//! # Read and write are deliberately asymmetric
//!
//! - **Saving** is a user action, so failures are returned as
//!   [`PersistenceError`] and the caller decides what to do.
//! - **Loading** happens every time the settings are shown and must never
//!   stop the user.  A missing, unreadable or malformed file yields the
//!   default selection `(Fast, Fast, Disabled)`.  The reason is kept in
//!   [`LoadOutcome::Defaulted`] for logging only.
//!
//! The file is always rewritten whole; there is no merging with what was on
//! disk before, and no locking (last writer wins).

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use fexcfg_core::{decode, encode, encode_selection, ConfigDocument, FlagRecord, PresetSelection};
use serde_json::error::Category;
use thiserror::Error;
use tracing::{debug, warn};

use super::fs::{FileSystem, StdFileSystem};

/// Directory FEX-Emu keeps its settings in, relative to a home directory.
pub const FEX_DIR: &str = ".fex-emu";

/// File name of the main FEX-Emu settings file.
pub const CONFIG_FILE_NAME: &str = "Config.json";

/// Errors returned when a config file cannot be written.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The directory that should hold the file could not be created.
    #[error("could not create config directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file itself could not be written (permission denied, disk full, ...).
    #[error("could not write config file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document could not be turned into JSON.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Why a load fell back to the default selection.
///
/// Never returned as an error; see [`LoadOutcome`].
#[derive(Debug, Error)]
pub enum MalformedConfig {
    /// No file at the path.  Normal for containers that were never configured.
    #[error("config file does not exist")]
    Missing,

    #[error("config file could not be read: {0}")]
    Unreadable(#[source] io::Error),

    /// Not JSON at all, or truncated (e.g. a crash mid-write).
    #[error("config file is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    /// Valid JSON without the `Config` object or one of its six flags.
    #[error("config file is missing required settings: {0}")]
    Schema(#[source] serde_json::Error),
}

impl From<serde_json::Error> for MalformedConfig {
    fn from(e: serde_json::Error) -> Self {
        match e.classify() {
            Category::Syntax | Category::Eof => MalformedConfig::Syntax(e),
            Category::Data => MalformedConfig::Schema(e),
            Category::Io => MalformedConfig::Unreadable(io::Error::from(e)),
        }
    }
}

/// Result of [`ConfigStore::load`].  Always carries a usable selection.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The file was read and decoded.
    Loaded(PresetSelection),
    /// The file could not be used; `selection` is the default.
    Defaulted {
        selection: PresetSelection,
        reason: MalformedConfig,
    },
}

impl LoadOutcome {
    fn fallback(reason: MalformedConfig) -> Self {
        LoadOutcome::Defaulted {
            selection: PresetSelection::default(),
            reason,
        }
    }

    pub fn selection(&self) -> PresetSelection {
        match self {
            LoadOutcome::Loaded(selection) | LoadOutcome::Defaulted { selection, .. } => *selection,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, LoadOutcome::Defaulted { .. })
    }

    pub fn reason(&self) -> Option<&MalformedConfig> {
        match self {
            LoadOutcome::Loaded(_) => None,
            LoadOutcome::Defaulted { reason, .. } => Some(reason),
        }
    }
}

/// Builds `{base_home}-{container_id}/.fex-emu/Config.json`.
///
/// The `-{id}` suffix is appended to the last component of `base_home`
/// rather than joined as a new component.  No I/O.
pub fn derive_path(base_home: &Path, container_id: impl fmt::Display) -> PathBuf {
    let mut container_home = OsString::from(base_home.as_os_str());
    container_home.push(format!("-{container_id}"));
    PathBuf::from(container_home)
        .join(FEX_DIR)
        .join(CONFIG_FILE_NAME)
}

/// Reads and writes FEX-Emu config documents through a [`FileSystem`].
#[derive(Debug, Clone, Default)]
pub struct ConfigStore<F = StdFileSystem> {
    fs: F,
}

impl ConfigStore<StdFileSystem> {
    /// A store over the real disk.
    pub fn on_disk() -> Self {
        Self::new(StdFileSystem)
    }
}

impl<F: FileSystem> ConfigStore<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    pub fn file_system(&self) -> &F {
        &self.fs
    }

    /// Encodes the three preset names and writes the document to `path`,
    /// creating parent directories as needed.
    ///
    /// Unrecognised names are written as empty flags; see
    /// [`fexcfg_core::encode`].
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the directory or file cannot be written.
    pub fn save(
        &self,
        path: &Path,
        tso: &str,
        x87: &str,
        multiblock: &str,
    ) -> Result<(), PersistenceError> {
        self.write_record(path, encode(tso, x87, multiblock))
    }

    /// Typed variant of [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the directory or file cannot be written.
    pub fn save_selection(
        &self,
        path: &Path,
        selection: &PresetSelection,
    ) -> Result<(), PersistenceError> {
        self.write_record(path, encode_selection(selection))
    }

    fn write_record(&self, path: &Path, record: FlagRecord) -> Result<(), PersistenceError> {
        let json = ConfigDocument::new(record).to_json()?;

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            if !self.fs.exists(dir) {
                debug!(dir = %dir.display(), "creating config directory");
                self.fs
                    .create_dir_all(dir)
                    .map_err(|source| PersistenceError::CreateDir {
                        path: dir.to_path_buf(),
                        source,
                    })?;
            }
        }

        self.fs
            .write_text(path, &json)
            .map_err(|source| PersistenceError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), "saved FEX config");
        Ok(())
    }

    /// Loads and decodes the presets saved at `path`.
    ///
    /// Never fails: anything short of a complete, parseable document gives
    /// [`LoadOutcome::Defaulted`] with `(Fast, Fast, Disabled)`.
    pub fn load(&self, path: &Path) -> LoadOutcome {
        match self.read_record(path) {
            Ok(record) => {
                let selection = decode(&record);
                debug!(path = %path.display(), %selection, "loaded FEX config");
                LoadOutcome::Loaded(selection)
            }
            Err(MalformedConfig::Missing) => {
                debug!(path = %path.display(), "no FEX config yet; using defaults");
                LoadOutcome::fallback(MalformedConfig::Missing)
            }
            Err(reason) => {
                warn!(path = %path.display(), "ignoring FEX config: {reason}");
                LoadOutcome::fallback(reason)
            }
        }
    }

    fn read_record(&self, path: &Path) -> Result<FlagRecord, MalformedConfig> {
        if !self.fs.exists(path) {
            return Err(MalformedConfig::Missing);
        }
        let text = self
            .fs
            .read_text(path)
            .map_err(MalformedConfig::Unreadable)?;
        Ok(ConfigDocument::from_json(&text)?.config)
    }

    /// One-line description of the saved presets, e.g.
    /// `TSOMode Fast, x87Mode Fast, MultiBlock Disabled`.
    pub fn summarize(&self, path: &Path) -> String {
        self.load(path).selection().to_string()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
