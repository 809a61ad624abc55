//! Preset ⇄ flag translation.
//!
//! Encoding is a table lookup:
//!
//! | TSO preset | TSOEnabled | VectorTSOEnabled | MemcpySetTSOEnabled | HalfBarrierTSOEnabled |
//! |------------|------------|------------------|---------------------|-----------------------|
//! | Fastest    | 0          | 0                | 0                   | 0                     |
//! | Fast       | 1          | 0                | 0                   | 0                     |
//! | Slow       | 1          | 0                | 0                   | 1                     |
//! | Slowest    | 1          | 1                | 1                   | 0                     |
//!
//! x87 `Fast` sets `X87ReducedPrecision`, `Slow` clears it.  Multiblock
//! `Enabled`/`Disabled` sets/clears `Multiblock`.
//!
//! Decoding is *not* the mirror image of that table.  It checks the flags in
//! priority order (see [`decode_tso`]), so combinations the table never
//! produces still map to some preset.  In particular a record with all four
//! TSO flags set decodes to `Slow`, because the half-barrier check runs first.
//! Hand-edited files rely on that precedence; keep it.

use tracing::warn;

use crate::codec::flags::{FlagRecord, FlagValue};
use crate::domain::presets::{MultiblockPreset, PresetSelection, TsoPreset, X87Preset};

/// Encodes preset *names* into a flag record.
///
/// Names that are not recognised leave their flags [`FlagValue::Unset`]
/// (serialized as `""`).  This is not an error: the record is still written
/// with all six keys.  Callers holding typed presets should use
/// [`encode_selection`], which cannot produce unset flags.
pub fn encode(tso: &str, x87: &str, multiblock: &str) -> FlagRecord {
    let tso = tso
        .parse::<TsoPreset>()
        .map_err(|e| warn!("{e}; leaving TSO flags unset"))
        .ok();
    let x87 = x87
        .parse::<X87Preset>()
        .map_err(|e| warn!("{e}; leaving X87ReducedPrecision unset"))
        .ok();
    let multiblock = multiblock
        .parse::<MultiblockPreset>()
        .map_err(|e| warn!("{e}; leaving Multiblock unset"))
        .ok();

    build_record(tso, x87, multiblock)
}

/// Encodes a typed selection.
pub fn encode_selection(selection: &PresetSelection) -> FlagRecord {
    build_record(
        Some(selection.tso),
        Some(selection.x87),
        Some(selection.multiblock),
    )
}

fn build_record(
    tso: Option<TsoPreset>,
    x87: Option<X87Preset>,
    multiblock: Option<MultiblockPreset>,
) -> FlagRecord {
    let [tso_enabled, vector_tso_enabled, memcpy_set_tso_enabled, half_barrier_tso_enabled] =
        match tso {
            Some(preset) => tso_flags(preset).map(FlagValue::from_bool),
            None => Default::default(),
        };

    FlagRecord {
        multiblock: multiblock
            .map(|m| FlagValue::from_bool(m == MultiblockPreset::Enabled))
            .unwrap_or_default(),
        tso_enabled,
        vector_tso_enabled,
        memcpy_set_tso_enabled,
        half_barrier_tso_enabled,
        x87_reduced_precision: x87
            .map(|x| FlagValue::from_bool(x == X87Preset::Fast))
            .unwrap_or_default(),
    }
}

/// `[TSOEnabled, VectorTSOEnabled, MemcpySetTSOEnabled, HalfBarrierTSOEnabled]`
const fn tso_flags(preset: TsoPreset) -> [bool; 4] {
    match preset {
        TsoPreset::Fastest => [false, false, false, false],
        TsoPreset::Fast => [true, false, false, false],
        TsoPreset::Slow => [true, false, false, true],
        TsoPreset::Slowest => [true, true, true, false],
    }
}

/// Recovers the TSO preset from a record, first match wins:
///
/// 1. `TSOEnabled` off → `Fastest`
/// 2. `HalfBarrierTSOEnabled` on → `Slow`
/// 3. `VectorTSOEnabled` and `MemcpySetTSOEnabled` both on → `Slowest`
/// 4. otherwise → `Fast`
pub fn decode_tso(record: &FlagRecord) -> TsoPreset {
    if !record.tso_enabled.is_on() {
        TsoPreset::Fastest
    } else if record.half_barrier_tso_enabled.is_on() {
        TsoPreset::Slow
    } else if record.vector_tso_enabled.is_on() && record.memcpy_set_tso_enabled.is_on() {
        TsoPreset::Slowest
    } else {
        TsoPreset::Fast
    }
}

pub fn decode_x87(record: &FlagRecord) -> X87Preset {
    if record.x87_reduced_precision.is_on() {
        X87Preset::Fast
    } else {
        X87Preset::Slow
    }
}

pub fn decode_multiblock(record: &FlagRecord) -> MultiblockPreset {
    if record.multiblock.is_on() {
        MultiblockPreset::Enabled
    } else {
        MultiblockPreset::Disabled
    }
}

/// Decodes all three presets.
pub fn decode(record: &FlagRecord) -> PresetSelection {
    PresetSelection::new(
        decode_tso(record),
        decode_x87(record),
        decode_multiblock(record),
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────
