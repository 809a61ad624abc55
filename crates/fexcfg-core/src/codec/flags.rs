//! Serde model of FEX-Emu's `Config.json`.
//!
//! Document shape:
//! ```text
//! { "Config": {
//!     "Multiblock": "0"|"1",
//!     "TSOEnabled": "0"|"1",
//!     "VectorTSOEnabled": "0"|"1",
//!     "MemcpySetTSOEnabled": "0"|"1",
//!     "HalfBarrierTSOEnabled": "0"|"1",
//!     "X87ReducedPrecision": "0"|"1"
//! } }
//! ```
//!
//! FEX-Emu stores booleans as the strings `"0"` and `"1"`.  Files written by
//! other tools (or edited by hand) sometimes hold bare numbers or booleans, so
//! reading accepts a string, a number or a boolean and keeps its textual form.
//! Writing always emits strings.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One stored flag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FlagValue {
    /// `"1"`
    On,
    /// `"0"`
    Off,
    /// `""`: written when the preset name that should have set it was not
    /// recognised.
    #[default]
    Unset,
    /// Any other text found in a file.  Never produced by encoding.
    Other(String),
}

impl FlagValue {
    pub fn from_bool(on: bool) -> Self {
        if on {
            FlagValue::On
        } else {
            FlagValue::Off
        }
    }

    /// Only `"1"` counts as set.
    pub fn is_on(&self) -> bool {
        matches!(self, FlagValue::On)
    }

    pub fn as_str(&self) -> &str {
        match self {
            FlagValue::On => "1",
            FlagValue::Off => "0",
            FlagValue::Unset => "",
            FlagValue::Other(s) => s,
        }
    }
}

impl From<&str> for FlagValue {
    fn from(s: &str) -> Self {
        match s {
            "1" => FlagValue::On,
            "0" => FlagValue::Off,
            "" => FlagValue::Unset,
            other => FlagValue::Other(other.to_string()),
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FlagValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FlagValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FlagValueVisitor)
    }
}

struct FlagValueVisitor;

impl<'de> Visitor<'de> for FlagValueVisitor {
    type Value = FlagValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number or boolean flag value")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<FlagValue, E> {
        Ok(FlagValue::from(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<FlagValue, E> {
        Ok(FlagValue::from(if v { "true" } else { "false" }))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<FlagValue, E> {
        Ok(FlagValue::from(v.to_string().as_str()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<FlagValue, E> {
        Ok(FlagValue::from(v.to_string().as_str()))
    }

    // `{:?}` keeps the fraction (`1.0`), so a float never reads as `"1"`.
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<FlagValue, E> {
        Ok(FlagValue::from(format!("{v:?}").as_str()))
    }
}

/// The six flags under the `Config` key.
///
/// Every field is required when reading; a file missing any of them is
/// treated as malformed by the store.  Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlagRecord {
    /// Compile multiple basic blocks per translation unit.
    #[serde(rename = "Multiblock")]
    pub multiblock: FlagValue,
    /// Enforce total store order.
    #[serde(rename = "TSOEnabled")]
    pub tso_enabled: FlagValue,
    /// Extend TSO to vector/SIMD memory operations.
    #[serde(rename = "VectorTSOEnabled")]
    pub vector_tso_enabled: FlagValue,
    /// Extend TSO to memcpy/memset style block operations.
    #[serde(rename = "MemcpySetTSOEnabled")]
    pub memcpy_set_tso_enabled: FlagValue,
    /// Use half barriers instead of full TSO barriers.
    #[serde(rename = "HalfBarrierTSOEnabled")]
    pub half_barrier_tso_enabled: FlagValue,
    /// Run x87 at reduced precision.
    #[serde(rename = "X87ReducedPrecision")]
    pub x87_reduced_precision: FlagValue,
}

/// Top-level `Config.json` document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfigDocument {
    #[serde(rename = "Config")]
    pub config: FlagRecord,
}

impl ConfigDocument {
    pub fn new(config: FlagRecord) -> Self {
        Self { config }
    }

    /// Serializes to compact (single-line) JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
