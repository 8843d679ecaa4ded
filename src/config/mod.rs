//! Configuration module
//!
//! Handles loading and validating configuration from TOML files and
//! environment variables, and exposes it as resource-scoped settings.

pub mod loader;
pub mod settings;
pub mod types;

pub use loader::{load_config, load_config_from_str};
pub use settings::{FILES_SETTING, ScopedSettings, SettingsSource};
pub use types::*;
