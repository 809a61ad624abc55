//! # fexcfg-core
//!
//! Shared library for the FEXCore settings tooling: the human-facing tuning
//! presets and the codec that turns them into the flag record FEX-Emu reads
//! from `.fex-emu/Config.json`.
//!
//! This crate does no I/O.  Reading and writing config files lives in the
//! `fexcfg` crate.
//!
//! # Architecture overview (for beginners)
//!
//! FEX-Emu runs x86 programs on ARM hosts.  How strictly it emulates x86
//! memory ordering (TSO), how precise its x87 floats are and whether it
//! compiles several basic blocks at once are all controlled by flags in a
//! small JSON file.  Users never edit those flags directly; they pick a
//! *preset* ("Fastest", "Slow", ...) and the presets are translated into
//! flags.
//!
//! - **`domain`** – The preset vocabulary (`TsoPreset`, `X87Preset`,
//!   `MultiblockPreset`), the `PresetSelection` triple, option lists and the
//!   FEXCore version list helpers.
//!
//! - **`codec`** – The serde model of the persisted document (`FlagRecord`,
//!   `ConfigDocument`) and the preset ⇄ flag translation (`encode`/`decode`).

pub mod codec;
pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `fexcfg_core::TsoPreset` instead of `fexcfg_core::domain::presets::TsoPreset`.
pub use codec::flags::{ConfigDocument, FlagRecord, FlagValue};
pub use codec::preset_codec::{
    decode, decode_multiblock, decode_tso, decode_x87, encode, encode_selection,
};
pub use domain::presets::{
    select_index, MultiblockPreset, PresetSelection, TsoPreset, UnknownPreset, X87Preset,
};
pub use domain::versions::{preferred_version, version_options};
