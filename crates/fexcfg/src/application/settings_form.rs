//! Screen model for the FEXCore settings surface.
//!
//! A settings screen shows three drop-down lists (TSO mode, x87 mode,
//! multiblock) and highlights whatever is saved for the container.  This
//! module is that screen without any widgets: option lists, selected indexes,
//! and the two transitions (load from disk, save to disk).
//!
//! The option lists normally come from the preset enums, but a front end may
//! supply its own (e.g. localised resource arrays in a different order).  If
//! a saved value is absent from a list, that list has no selection.

use std::path::Path;

use fexcfg_core::{select_index, MultiblockPreset, PresetSelection, TsoPreset, X87Preset};

use crate::infrastructure::fs::FileSystem;
use crate::infrastructure::store::{ConfigStore, PersistenceError};

/// The three ordered option lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionLists {
    pub tso: Vec<String>,
    pub x87: Vec<String>,
    pub multiblock: Vec<String>,
}

impl Default for OptionLists {
    fn default() -> Self {
        fn owned(names: Vec<&'static str>) -> Vec<String> {
            names.into_iter().map(str::to_string).collect()
        }
        Self {
            tso: owned(TsoPreset::options()),
            x87: owned(X87Preset::options()),
            multiblock: owned(MultiblockPreset::options()),
        }
    }
}

/// Option lists plus the currently selected entry of each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    pub options: OptionLists,
    pub tso_index: Option<usize>,
    pub x87_index: Option<usize>,
    pub multiblock_index: Option<usize>,
    /// `true` when the selection came from defaults rather than a saved file.
    pub from_defaults: bool,
}

impl SettingsForm {
    /// Builds a form with `selection` highlighted in `options`.
    pub fn with_selection(options: OptionLists, selection: PresetSelection) -> Self {
        let mut form = Self {
            options,
            tso_index: None,
            x87_index: None,
            multiblock_index: None,
            from_defaults: false,
        };
        form.select(selection);
        form
    }

    /// Loads the container's saved presets, falling back to defaults.
    pub fn load<F: FileSystem>(store: &ConfigStore<F>, path: &Path, options: OptionLists) -> Self {
        let outcome = store.load(path);
        let mut form = Self::with_selection(options, outcome.selection());
        form.from_defaults = outcome.is_default();
        form
    }

    /// Highlights `selection` in each list.
    pub fn select(&mut self, selection: PresetSelection) {
        self.tso_index = select_index(&self.options.tso, selection.tso.name());
        self.x87_index = select_index(&self.options.x87, selection.x87.name());
        self.multiblock_index = select_index(&self.options.multiblock, selection.multiblock.name());
    }

    /// The selected entry of each list; `""` where nothing is selected.
    pub fn selected_names(&self) -> (&str, &str, &str) {
        fn pick(list: &[String], index: Option<usize>) -> &str {
            index
                .and_then(|i| list.get(i))
                .map(String::as_str)
                .unwrap_or("")
        }
        (
            pick(&self.options.tso, self.tso_index),
            pick(&self.options.x87, self.x87_index),
            pick(&self.options.multiblock, self.multiblock_index),
        )
    }

    /// Saves the selected names.  Goes through name-based encoding, so a list
    /// entry that is not a known preset is written as empty flags.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the file cannot be written.
    pub fn save<F: FileSystem>(
        &self,
        store: &ConfigStore<F>,
        path: &Path,
    ) -> Result<(), PersistenceError> {
        let (tso, x87, multiblock) = self.selected_names();
        store.save(path, tso, x87, multiblock)
    }
}
