//! Domain layer: the preset vocabulary shown to users.
//!
//! Nothing in here knows about JSON or files.  The `codec` module is the only
//! place that maps presets onto stored flags.

pub mod presets;
pub mod versions;
