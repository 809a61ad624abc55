//! Application layer: the operations a settings surface performs.
//!
//! - `settings_form` – load a container's presets as selected list indexes
//!   and save the selected names back.
//! - `seed_app_configs` – write first-run configs for bundled helper programs.

pub mod seed_app_configs;
pub mod settings_form;
