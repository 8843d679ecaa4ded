//! Editor session
//!
//! Tracks which document is focused and re-applies the policy whenever the
//! active editor changes. The focused document is explicit state owned by
//! the session, updated only through [`Session::on_did_change_active_editor`].

use crate::config::SettingsSource;
use crate::editor::host::EditorHost;
use crate::editor::policy::{Document, PolicyOutcome, ReadOnlyPolicy};
use crate::error::HostError;
use crate::patterns::{GlobMatcher, GlobsetMatcher};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

pub struct Session<H, S, M = GlobsetMatcher> {
    host: H,
    policy: ReadOnlyPolicy<S, M>,
    active: Option<Document>,
}

impl<H, S, M> Session<H, S, M>
where
    H: EditorHost,
    S: SettingsSource,
    M: GlobMatcher,
{
    /// Create a session; `active` is the editor focused at startup, if any
    pub fn new(host: H, policy: ReadOnlyPolicy<S, M>, active: Option<Document>) -> Self {
        Self {
            host,
            policy,
            active,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn active_editor(&self) -> Option<&Document> {
        self.active.as_ref()
    }

    /// Check the editor that was active at startup
    pub async fn start(&mut self) -> Result<Option<PolicyOutcome>, HostError> {
        self.check_active_editor().await
    }

    /// Record a focus change and check the newly active editor
    pub async fn on_did_change_active_editor(
        &mut self,
        editor: Option<Document>,
    ) -> Result<Option<PolicyOutcome>, HostError> {
        self.active = editor;
        self.check_active_editor().await
    }

    async fn check_active_editor(&self) -> Result<Option<PolicyOutcome>, HostError> {
        let Some(document) = &self.active else {
            debug!("No active editor");
            return Ok(None);
        };
        self.policy.apply(&self.host, document).await.map(Some)
    }
}

/// Drive a session from a stream of focus changes.
///
/// Each line is the path of the newly active document; an empty line means
/// no editor is active. A failing host command is logged and the stream
/// continues. Returns the number of focus changes processed.
pub async fn run_session<R, H, S, M>(
    session: &mut Session<H, S, M>,
    input: R,
) -> Result<usize, HostError>
where
    R: AsyncBufRead + Unpin,
    H: EditorHost,
    S: SettingsSource,
    M: GlobMatcher,
{
    if let Err(e) = session.start().await {
        warn!(error = %e, "Editor command failed");
    }

    let mut lines = input.lines();
    let mut events = 0;
    while let Some(line) = lines.next_line().await? {
        let path = line.trim();
        let editor = (!path.is_empty()).then(|| Document::new(path));
        if let Err(e) = session.on_did_change_active_editor(editor).await {
            warn!(error = %e, "Editor command failed");
        }
        events += 1;
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FILES_SETTING, ScopedSettings};
    use crate::editor::host::ConsoleHost;
    use crate::editor::policy::PolicyOptions;
    use serde_json::json;

    fn session(
        active: Option<Document>,
    ) -> Session<ConsoleHost<Vec<u8>>, ScopedSettings> {
        let settings =
            ScopedSettings::new().with_global(FILES_SETTING, json!({"**/*.lock": true}));
        let options = PolicyOptions {
            revert_unsaved: false,
            notify: false,
        };
        let policy = ReadOnlyPolicy::new(settings, GlobsetMatcher::new(), options);
        Session::new(ConsoleHost::new(Vec::new()), policy, active)
    }

    #[tokio::test]
    async fn test_start_without_editor() {
        let mut session = session(None);
        assert_eq!(session.start().await.unwrap(), None);
        assert!(session.into_host().into_inner().is_empty());
    }

    #[tokio::test]
    async fn test_start_checks_active_editor() {
        let mut session = session(Some(Document::new("/repo/Cargo.lock")));
        let outcome = session.start().await.unwrap();
        assert_eq!(outcome, Some(PolicyOutcome::MadeReadOnly { reverted: false }));
    }

    #[tokio::test]
    async fn test_focus_change_updates_state() {
        let mut session = session(None);

        let outcome = session
            .on_did_change_active_editor(Some(Document::new("/repo/main.rs")))
            .await
            .unwrap();
        assert_eq!(outcome, Some(PolicyOutcome::Unchanged));
        assert_eq!(
            session.active_editor(),
            Some(&Document::new("/repo/main.rs"))
        );

        let outcome = session.on_did_change_active_editor(None).await.unwrap();
        assert_eq!(outcome, None);
        assert!(session.active_editor().is_none());
    }

    #[tokio::test]
    async fn test_run_session_from_lines() {
        let mut session = session(None);
        let input: &[u8] = b"/repo/main.rs\n\n/repo/Cargo.lock\n";

        let events = run_session(&mut session, input).await.unwrap();
        assert_eq!(events, 3);

        let output = String::from_utf8(session.into_host().into_inner()).unwrap();
        assert_eq!(output.lines().count(), 1);
        assert!(output.contains("setActiveEditorReadonlyInSession"));
    }
}
