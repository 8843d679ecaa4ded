//! Configuration types for auto-readonly
//!
//! This module defines the configuration structure that can be loaded from
//! TOML files and/or environment variables.

use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Read-only policy settings
    pub read_only: ReadOnlyConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Read-only policy settings
///
/// `files` is kept as the raw settings value. It is checked to be a mapping
/// of glob pattern to boolean when a document is resolved, so a malformed
/// value is reported on every check instead of silently meaning "no
/// patterns".
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReadOnlyConfig {
    /// Glob pattern to read-only flag, in precedence order (last match wins)
    pub files: Option<serde_json::Value>,

    /// Revert unsaved edits after an editor is made read-only
    pub revert_unsaved: bool,

    /// Show an information message when an editor is made read-only
    pub notify: bool,

    /// Per-folder overrides of `files`
    pub folders: Vec<FolderConfig>,
}

impl Default for ReadOnlyConfig {
    fn default() -> Self {
        Self {
            files: None,
            revert_unsaved: false,
            notify: true,
            folders: Vec::new(),
        }
    }
}

/// Settings scoped to a folder and everything below it
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FolderConfig {
    /// Folder root (absolute, `~` is expanded)
    pub path: String,

    /// Patterns layered over the global `files` for documents in this folder
    pub files: Option<serde_json::Value>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format (pretty, json)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// JSON structured output
    Json,
}
