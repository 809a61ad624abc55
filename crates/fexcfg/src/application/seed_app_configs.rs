//! First-run per-program configs.
//!
//! FEX-Emu looks for `<home>/.fex-emu/AppConfig/<program>.json` before the
//! main config when it starts a program.  Some helper programs shipped inside
//! the image run best with specific settings, so on first run we write a
//! config for each of them.  An existing file is never overwritten: the user
//! may have tuned it.

use std::path::{Path, PathBuf};

use fexcfg_core::PresetSelection;
use tracing::{debug, info};

use crate::infrastructure::fs::FileSystem;
use crate::infrastructure::store::{ConfigStore, PersistenceError};

/// A helper program that gets its own FEX config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundledProgram {
    /// Executable name, e.g. `winhandler.exe`.
    pub name: &'static str,
    pub selection: PresetSelection,
}

/// Programs seeded by [`seed_app_configs`].
pub const BUNDLED_PROGRAMS: &[BundledProgram] = &[BundledProgram {
    name: "winhandler.exe",
    selection: PresetSelection::APP_DEFAULT,
}];

/// `<app_config_dir>/<program>.json`
pub fn app_config_path(app_config_dir: &Path, program: &str) -> PathBuf {
    app_config_dir.join(format!("{program}.json"))
}

/// Writes [`BUNDLED_PROGRAMS`] configs that do not exist yet.
///
/// Returns the paths that were written.
///
/// # Errors
///
/// Stops at the first [`PersistenceError`].
pub fn seed_app_configs<F: FileSystem>(
    store: &ConfigStore<F>,
    app_config_dir: &Path,
) -> Result<Vec<PathBuf>, PersistenceError> {
    seed_programs(store, app_config_dir, BUNDLED_PROGRAMS)
}

/// [`seed_app_configs`] over an explicit program list.
///
/// # Errors
///
/// Stops at the first [`PersistenceError`].
pub fn seed_programs<F: FileSystem>(
    store: &ConfigStore<F>,
    app_config_dir: &Path,
    programs: &[BundledProgram],
) -> Result<Vec<PathBuf>, PersistenceError> {
    let mut written = Vec::new();
    for program in programs {
        let path = app_config_path(app_config_dir, program.name);
        if store.file_system().exists(&path) {
            debug!(path = %path.display(), "app config already present");
            continue;
        }
        store.save_selection(&path, &program.selection)?;
        info!(program = program.name, path = %path.display(), "seeded app config");
        written.push(path);
    }
    Ok(written)
}
