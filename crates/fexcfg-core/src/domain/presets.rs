//! Tuning presets offered by the settings surface.
//!
//! Each preset enum has a fixed, case-sensitive display name.  The names are
//! what the UI lists show and what users type on the command line, so
//! `Display` and `FromStr` must stay exact inverses of each other.
//!
//! The `ALL` constants list the variants in display order.  For TSO that is
//! weakest ordering (fastest) first, strongest ordering (slowest) last.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A preset name that does not belong to the expected preset family.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {family} preset: {name:?}")]
pub struct UnknownPreset {
    /// Which preset family was being parsed (`"TSO"`, `"x87"`, `"multiblock"`).
    pub family: &'static str,
    /// The rejected input.
    pub name: String,
}

// ── TSO ───────────────────────────────────────────────────────────────────────

/// Memory-ordering preset.  Bundles the four TSO knobs into four curated
/// operating points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TsoPreset {
    /// No TSO emulation at all.
    Fastest,
    /// TSO on scalar memory operations only.
    Fast,
    /// TSO using the cheaper half-barrier implementation.
    Slow,
    /// TSO extended to vector and memcpy/memset operations.
    Slowest,
}

impl TsoPreset {
    /// All variants in display order.
    pub const ALL: [TsoPreset; 4] = [
        TsoPreset::Fastest,
        TsoPreset::Fast,
        TsoPreset::Slow,
        TsoPreset::Slowest,
    ];

    /// The display name of this preset.
    pub const fn name(self) -> &'static str {
        match self {
            TsoPreset::Fastest => "Fastest",
            TsoPreset::Fast => "Fast",
            TsoPreset::Slow => "Slow",
            TsoPreset::Slowest => "Slowest",
        }
    }

    /// Display names in option-list order.
    pub fn options() -> Vec<&'static str> {
        Self::ALL.iter().map(|p| p.name()).collect()
    }
}

impl fmt::Display for TsoPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TsoPreset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Fastest" => Ok(TsoPreset::Fastest),
            "Fast" => Ok(TsoPreset::Fast),
            "Slow" => Ok(TsoPreset::Slow),
            "Slowest" => Ok(TsoPreset::Slowest),
            _ => Err(UnknownPreset {
                family: "TSO",
                name: s.to_string(),
            }),
        }
    }
}

// ── x87 ───────────────────────────────────────────────────────────────────────

/// x87 floating-point precision preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum X87Preset {
    /// Reduced (64-bit) precision.
    Fast,
    /// Full 80-bit extended precision.
    Slow,
}

impl X87Preset {
    pub const ALL: [X87Preset; 2] = [X87Preset::Fast, X87Preset::Slow];

    pub const fn name(self) -> &'static str {
        match self {
            X87Preset::Fast => "Fast",
            X87Preset::Slow => "Slow",
        }
    }

    pub fn options() -> Vec<&'static str> {
        Self::ALL.iter().map(|p| p.name()).collect()
    }
}

impl fmt::Display for X87Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for X87Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Fast" => Ok(X87Preset::Fast),
            "Slow" => Ok(X87Preset::Slow),
            _ => Err(UnknownPreset {
                family: "x87",
                name: s.to_string(),
            }),
        }
    }
}

// ── Multiblock ────────────────────────────────────────────────────────────────

/// Multi-block translation toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MultiblockPreset {
    Enabled,
    Disabled,
}

impl MultiblockPreset {
    pub const ALL: [MultiblockPreset; 2] = [MultiblockPreset::Enabled, MultiblockPreset::Disabled];

    pub const fn name(self) -> &'static str {
        match self {
            MultiblockPreset::Enabled => "Enabled",
            MultiblockPreset::Disabled => "Disabled",
        }
    }

    pub fn options() -> Vec<&'static str> {
        Self::ALL.iter().map(|p| p.name()).collect()
    }
}

impl fmt::Display for MultiblockPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MultiblockPreset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Enabled" => Ok(MultiblockPreset::Enabled),
            "Disabled" => Ok(MultiblockPreset::Disabled),
            _ => Err(UnknownPreset {
                family: "multiblock",
                name: s.to_string(),
            }),
        }
    }
}

// ── Selection triple ──────────────────────────────────────────────────────────

/// The three presets chosen for one container (or one bundled program).
///
/// `Display` renders the one-line summary used in read-only contexts:
/// `TSOMode Fast, x87Mode Fast, MultiBlock Disabled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PresetSelection {
    pub tso: TsoPreset,
    pub x87: X87Preset,
    pub multiblock: MultiblockPreset,
}

impl PresetSelection {
    /// Defaults written for bundled helper programs on first run.
    pub const APP_DEFAULT: PresetSelection = PresetSelection {
        tso: TsoPreset::Fastest,
        x87: X87Preset::Fast,
        multiblock: MultiblockPreset::Disabled,
    };

    pub const fn new(tso: TsoPreset, x87: X87Preset, multiblock: MultiblockPreset) -> Self {
        Self {
            tso,
            x87,
            multiblock,
        }
    }

    /// Every valid selection, TSO-major.
    pub fn all() -> impl Iterator<Item = PresetSelection> {
        TsoPreset::ALL.into_iter().flat_map(|tso| {
            X87Preset::ALL.into_iter().flat_map(move |x87| {
                MultiblockPreset::ALL
                    .into_iter()
                    .map(move |multiblock| PresetSelection::new(tso, x87, multiblock))
            })
        })
    }
}

impl Default for PresetSelection {
    /// `(Fast, Fast, Disabled)`: used for never-configured containers and
    /// whenever a saved file cannot be read.
    fn default() -> Self {
        Self::new(TsoPreset::Fast, X87Preset::Fast, MultiblockPreset::Disabled)
    }
}

impl fmt::Display for PresetSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TSOMode {}, x87Mode {}, MultiBlock {}",
            self.tso, self.x87, self.multiblock
        )
    }
}

/// Returns the position of `value` in an ordered option list.
///
/// This is the whole of "select the list item matching a saved value": the
/// settings surface asks for an index and highlights it.
pub fn select_index<S: AsRef<str>>(options: &[S], value: &str) -> Option<usize> {
    options.iter().position(|o| o.as_ref() == value)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tso_names_round_trip_through_from_str() {
        for preset in TsoPreset::ALL {
            assert_eq!(preset.name().parse::<TsoPreset>(), Ok(preset));
        }
    }

    #[test]
    fn test_x87_and_multiblock_names_round_trip_through_from_str() {
        for preset in X87Preset::ALL {
            assert_eq!(preset.to_string().parse::<X87Preset>(), Ok(preset));
        }
        for preset in MultiblockPreset::ALL {
            assert_eq!(preset.to_string().parse::<MultiblockPreset>(), Ok(preset));
        }
    }

    #[test]
    fn test_preset_names_are_case_sensitive() {
        let err = "fast".parse::<TsoPreset>().unwrap_err();
        assert_eq!(err.family, "TSO");
        assert_eq!(err.name, "fast");
        assert!("enabled".parse::<MultiblockPreset>().is_err());
    }

    #[test]
    fn test_unknown_preset_error_message_names_family() {
        let err = "Turbo".parse::<X87Preset>().unwrap_err();
        assert_eq!(err.to_string(), "unknown x87 preset: \"Turbo\"");
    }

    #[test]
    fn test_tso_options_are_ordered_fastest_to_slowest() {
        assert_eq!(
            TsoPreset::options(),
            vec!["Fastest", "Fast", "Slow", "Slowest"]
        );
    }

    #[test]
    fn test_default_selection_is_fast_fast_disabled() {
        let sel = PresetSelection::default();
        assert_eq!(sel.tso, TsoPreset::Fast);
        assert_eq!(sel.x87, X87Preset::Fast);
        assert_eq!(sel.multiblock, MultiblockPreset::Disabled);
    }

    #[test]
    fn test_selection_display_is_summary_line() {
        let sel = PresetSelection::new(TsoPreset::Slowest, X87Preset::Slow, MultiblockPreset::Enabled);
        assert_eq!(sel.to_string(), "TSOMode Slowest, x87Mode Slow, MultiBlock Enabled");
    }

    #[test]
    fn test_all_selections_cover_sixteen_distinct_triples() {
        let all: std::collections::HashSet<_> = PresetSelection::all().collect();
        assert_eq!(all.len(), 16);
    }

    #[test]
    fn test_select_index_finds_value() {
        let options = TsoPreset::options();
        assert_eq!(select_index(&options, "Slow"), Some(2));
    }

    #[test]
    fn test_select_index_returns_none_for_missing_value() {
        let options = vec!["Enabled".to_string(), "Disabled".to_string()];
        assert_eq!(select_index(&options, "Maybe"), None);
    }
}
