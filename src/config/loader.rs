//! Configuration loader with layered sources
//!
//! Loads configuration from multiple sources with the following precedence
//! (highest to lowest):
//! 1. Environment variables (AUTO_READONLY__*)
//! 2. Configuration file (TOML)
//! 3. Default values

use crate::config::types::AppConfig;
use crate::error::ConfigError;
use crate::patterns::glob::check_pattern;
use config::{Config, Environment, File, FileFormat};
use serde_json::Value;
use std::path::Path;
use tracing::warn;

/// Default configuration file paths to check (in order)
const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "auto-readonly.toml",
    ".auto-readonly.toml",
    "~/.config/auto-readonly/config.toml",
    "/etc/auto-readonly/config.toml",
];

/// Load configuration from a TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from_str(toml_str, FileFormat::Toml))
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Load configuration from files and environment
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. Start with defaults (handled by serde defaults on AppConfig)

    // 2. Add configuration file
    if let Some(path) = config_path {
        // Explicit path provided - must exist
        if !Path::new(path).exists() {
            return Err(ConfigError::Load(format!(
                "Configuration file not found: {}",
                path
            )));
        }
        builder = builder.add_source(File::new(path, FileFormat::Toml));
    } else {
        // Try default paths (first existing one wins)
        for path in DEFAULT_CONFIG_PATHS {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                builder = builder.add_source(File::new(&expanded, FileFormat::Toml));
                break;
            }
        }
    }

    // 3. Add environment variables with AUTO_READONLY prefix
    // e.g., AUTO_READONLY__READ_ONLY__REVERT_UNSAVED, AUTO_READONLY__LOGGING__LEVEL
    // Double underscore (__) maps to nested keys (logging.level)
    builder = builder.add_source(
        Environment::with_prefix("AUTO_READONLY")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Validate configuration values
///
/// Folder roots are hard errors. Pattern problems are only warned about:
/// the shape of `files` is checked again on every resolution and a bad
/// glob simply never matches.
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.logging.level.trim().is_empty() {
        return Err(ConfigError::Missing {
            field: "logging.level".to_string(),
        });
    }

    for (index, folder) in config.read_only.folders.iter().enumerate() {
        if folder.path.trim().is_empty() {
            return Err(ConfigError::Missing {
                field: format!("read_only.folders[{}].path", index),
            });
        }

        let expanded = shellexpand::tilde(&folder.path);
        if !Path::new(expanded.as_ref()).is_absolute() {
            return Err(ConfigError::Invalid {
                message: format!(
                    "read_only.folders[{}].path must be absolute, got: {}",
                    index, folder.path
                ),
            });
        }

        lint_patterns(
            folder.files.as_ref(),
            &format!("read_only.folders[{}].files", index),
        );
    }

    lint_patterns(config.read_only.files.as_ref(), "read_only.files");

    Ok(())
}

/// Warn about pattern tables that will not behave as the user expects
fn lint_patterns(files: Option<&Value>, field_path: &str) {
    match files {
        None | Some(Value::Null) => {}
        Some(Value::Object(map)) => {
            for (pattern, value) in map {
                if let Err(e) = check_pattern(pattern) {
                    warn!(field = field_path, pattern = %pattern, error = %e, "Glob pattern will never match");
                }
                if !value.is_boolean() {
                    warn!(field = field_path, pattern = %pattern, "Pattern value is not a boolean");
                }
            }
        }
        Some(other) => {
            warn!(
                field = field_path,
                found = crate::error::json_type_name(other),
                "Expected a mapping of glob pattern to boolean"
            );
        }
    }
}
