//! Read-only policy
//!
//! Resolves the configured pattern table for a document and, when the
//! winning pattern says so, drives the host to make the active editor
//! read-only. Configuration errors never block editing: they are logged and
//! the document is left alone.

use crate::config::{FILES_SETTING, ReadOnlyConfig, SettingsSource};
use crate::editor::host::EditorHost;
use crate::error::{ConfigError, HostError};
use crate::patterns::{GlobMatcher, GlobsetMatcher, OrderedResolver, PatternTable};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// A document open in an editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: PathBuf,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name for user-facing messages, falling back to the full path
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or(self.path.as_os_str())
            .to_string_lossy()
            .into_owned()
    }
}

/// Whether a document should be read-only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyDecision {
    ReadOnly,
    Writable,
}

impl PolicyDecision {
    pub fn is_read_only(&self) -> bool {
        matches!(self, PolicyDecision::ReadOnly)
    }
}

/// What applying the policy did to the active editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyOutcome {
    /// The editor was made read-only
    MadeReadOnly {
        /// Unsaved edits were reverted as well
        reverted: bool,
    },
    /// No pattern asked for read-only
    Unchanged,
    /// Configuration was invalid; the editor was left writable
    Skipped(String),
}

/// Behavior switches for the policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyOptions {
    /// Revert unsaved edits after making the editor read-only
    pub revert_unsaved: bool,
    /// Show an information message when making an editor read-only
    pub notify: bool,
}

impl Default for PolicyOptions {
    fn default() -> Self {
        Self {
            revert_unsaved: false,
            notify: true,
        }
    }
}

impl From<&ReadOnlyConfig> for PolicyOptions {
    fn from(config: &ReadOnlyConfig) -> Self {
        Self {
            revert_unsaved: config.revert_unsaved,
            notify: config.notify,
        }
    }
}

/// Read-only policy over a settings source
pub struct ReadOnlyPolicy<S, M = GlobsetMatcher> {
    settings: S,
    resolver: OrderedResolver<M>,
    options: PolicyOptions,
}

impl<S: SettingsSource, M: GlobMatcher> ReadOnlyPolicy<S, M> {
    pub fn new(settings: S, matcher: M, options: PolicyOptions) -> Self {
        Self {
            settings,
            resolver: OrderedResolver::new(matcher),
            options,
        }
    }

    pub fn resolver(&self) -> &OrderedResolver<M> {
        &self.resolver
    }

    pub fn options(&self) -> PolicyOptions {
        self.options
    }

    /// The pattern table that applies to `document`.
    ///
    /// Read fresh on every call so configuration changes take effect on the
    /// next check.
    pub fn patterns(&self, document: &Document) -> Result<PatternTable<bool>, ConfigError> {
        let raw = self.settings.get(FILES_SETTING, Some(document.path()));
        PatternTable::from_setting(FILES_SETTING, raw)
    }

    /// Decide whether `document` should be read-only
    pub fn evaluate(&self, document: &Document) -> Result<PolicyDecision, ConfigError> {
        let table = self.patterns(document)?;
        if table.is_empty() {
            debug!(path = %document.path().display(), "No read-only patterns configured");
            return Ok(PolicyDecision::Writable);
        }

        let read_only = self
            .resolver
            .resolve(document.path(), &table, Some(false))
            .unwrap_or(false);

        debug!(
            path = %document.path().display(),
            patterns = table.len(),
            read_only,
            "Evaluated read-only policy"
        );

        Ok(if read_only {
            PolicyDecision::ReadOnly
        } else {
            PolicyDecision::Writable
        })
    }

    /// Evaluate `document`, which must be the active editor, and act on it.
    ///
    /// Returns `Err` only when a host command fails.
    pub async fn apply<H>(&self, host: &H, document: &Document) -> Result<PolicyOutcome, HostError>
    where
        H: EditorHost + ?Sized,
    {
        let decision = match self.evaluate(document) {
            Ok(decision) => decision,
            Err(e) => {
                error!(
                    path = %document.path().display(),
                    error = %e,
                    "Invalid read-only configuration, leaving editor writable"
                );
                return Ok(PolicyOutcome::Skipped(e.to_string()));
            }
        };

        if !decision.is_read_only() {
            return Ok(PolicyOutcome::Unchanged);
        }

        if self.options.notify {
            let message = format!("Making {} read-only", document.display_name());
            if let Err(e) = host.show_information_message(&message).await {
                warn!(error = %e, "Failed to show information message");
            }
        }

        host.set_active_editor_read_only().await?;

        if self.options.revert_unsaved {
            host.revert_active_editor().await?;
        }

        info!(
            path = %document.path().display(),
            reverted = self.options.revert_unsaved,
            "Made active editor read-only"
        );

        Ok(PolicyOutcome::MadeReadOnly {
            reverted: self.options.revert_unsaved,
        })
    }
}
