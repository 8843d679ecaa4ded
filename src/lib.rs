//! Auto read-only
//!
//! Marks the active editor read-only when its document path matches a
//! configured glob pattern.
//!
//! ## Features
//!
//! - **Ordered glob tables** mapping patterns to values, resolved with
//!   last-match-wins precedence
//! - **Pluggable matching** behind the [`patterns::GlobMatcher`] trait,
//!   `globset` by default
//! - **Folder-scoped settings** layered over global ones
//! - **Fail-open policy**: malformed configuration is logged and never
//!   blocks editing
//!
//! ## Precedence
//!
//! ```text
//! first entry (general) → ... → last entry (specific)     last match wins
//! global settings → enclosing folders, shallowest → deepest
//! ```
//!
//! Order the table from general to specific. A pattern mapped to `false`
//! is a real match and overrides any earlier `true`.
//!
//! ## Example Configuration
//!
//! ```toml
//! [read_only]
//! revert_unsaved = true
//!
//! [read_only.files]
//! "**/node_modules/**" = true
//! "**/node_modules/special/**" = false
//! "**/src/out/**" = true
//!
//! [[read_only.folders]]
//! path = "~/work/monorepo"
//! files = { "**/generated/**" = true }
//! ```

pub mod config;
pub mod editor;
pub mod error;
pub mod patterns;

// Re-export main types
pub use config::{AppConfig, ScopedSettings, SettingsSource, load_config};
pub use editor::{Document, EditorHost, PolicyDecision, ReadOnlyPolicy, Session};
pub use error::{AppError, ConfigError, HostError, Result};
pub use patterns::{GlobMatcher, GlobsetMatcher, OrderedResolver, PatternTable};
