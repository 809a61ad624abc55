//! Config.json codec.
//!
//! `flags` is the serde model of the file FEX-Emu reads; `preset_codec`
//! translates between that model and the preset vocabulary in
//! [`crate::domain::presets`].

pub mod flags;
pub mod preset_codec;
