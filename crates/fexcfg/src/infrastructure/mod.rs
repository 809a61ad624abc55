//! Infrastructure layer.
//!
//! Contains the file-system adapters: the `FileSystem` seam, the Config.json
//! store built on it, and the tool's own TOML settings.
//!
//! **Dependency rule**: this layer may depend on `fexcfg_core`, but MUST NOT
//! import anything from `application`.

pub mod fs;
pub mod store;
pub mod tool_config;
