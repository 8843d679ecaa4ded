//! Error types for auto-readonly
//!
//! This module defines the error hierarchy used throughout the crate.
//! We use `thiserror` for library-style errors that are part of the API;
//! the binary wraps them in `anyhow` at the top level.

use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Editor host error: {0}")]
    Host(#[from] HostError),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Missing required configuration: {field}")]
    Missing { field: String },

    /// The setting exists but is not a mapping of pattern to value.
    #[error("Invalid type for '{key}': expected a mapping, found {found}")]
    InvalidType { key: String, found: &'static str },

    /// A single entry of the mapping holds a value of the wrong type.
    #[error("Invalid value for pattern '{pattern}': {reason}")]
    InvalidValue { pattern: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub fn invalid_type(key: impl Into<String>, value: &serde_json::Value) -> Self {
        Self::InvalidType {
            key: key.into(),
            found: json_type_name(value),
        }
    }
}

/// Name of a JSON value's type, as shown in configuration errors
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Errors raised by the editor host when running a command
#[derive(Error, Debug)]
pub enum HostError {
    #[error("Command '{command}' failed: {reason}")]
    CommandFailed { command: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HostError {
    pub fn command_failed(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CommandFailed {
            command: command.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for editor host commands
pub type HostResult<T> = std::result::Result<T, HostError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invalid_type_names_found_type() {
        let err = ConfigError::invalid_type("autoReadOnly.files", &json!("**/*.md"));
        assert!(matches!(
            err,
            ConfigError::InvalidType {
                found: "string",
                ..
            }
        ));
        assert!(err.to_string().contains("autoReadOnly.files"));

        let err = ConfigError::invalid_type("autoReadOnly.files", &json!(["**/*.md"]));
        assert!(err.to_string().contains("found array"));
    }

    #[test]
    fn test_json_type_names() {
        assert_eq!(json_type_name(&json!(null)), "null");
        assert_eq!(json_type_name(&json!(true)), "boolean");
        assert_eq!(json_type_name(&json!(3)), "number");
        assert_eq!(json_type_name(&json!({})), "object");
    }

    #[test]
    fn test_host_error_display() {
        let err = HostError::command_failed("revert", "no active editor");
        assert_eq!(
            err.to_string(),
            "Command 'revert' failed: no active editor"
        );

        let app: AppError = err.into();
        assert!(app.to_string().starts_with("Editor host error"));
    }
}
