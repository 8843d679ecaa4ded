//! Editor host
//!
//! The editor-side commands the policy needs, and a console implementation
//! that prints them for the CLI.

use crate::error::{HostError, HostResult};
// async_trait required for dyn-compatibility with Box<dyn EditorHost>
use async_trait::async_trait;
use std::io::Write;
use std::sync::Mutex;

/// Command id that makes the active editor read-only for the session
pub const SET_READ_ONLY_COMMAND: &str = "workbench.action.files.setActiveEditorReadonlyInSession";

/// Command id that discards unsaved edits of the active editor
pub const REVERT_COMMAND: &str = "workbench.action.files.revert";

/// Commands the editor exposes to the policy
///
/// Every command acts on whatever editor is active when it runs.
#[async_trait]
pub trait EditorHost: Send + Sync {
    /// Make the active editor read-only for the rest of the session.
    ///
    /// The file on disk is not touched.
    async fn set_active_editor_read_only(&self) -> HostResult<()>;

    /// Discard edits made to the active document since it was last saved
    async fn revert_active_editor(&self) -> HostResult<()>;

    /// Show a non-modal information message
    async fn show_information_message(&self, message: &str) -> HostResult<()>;
}

/// Box type alias for editor hosts
pub type BoxedEditorHost = Box<dyn EditorHost>;

#[async_trait]
impl<H: EditorHost + ?Sized> EditorHost for Box<H> {
    async fn set_active_editor_read_only(&self) -> HostResult<()> {
        (**self).set_active_editor_read_only().await
    }

    async fn revert_active_editor(&self) -> HostResult<()> {
        (**self).revert_active_editor().await
    }

    async fn show_information_message(&self, message: &str) -> HostResult<()> {
        (**self).show_information_message(message).await
    }
}

/// Host that writes each command as a tab-separated line
///
/// ```text
/// command	workbench.action.files.setActiveEditorReadonlyInSession
/// info	Making file.js read-only
/// ```
pub struct ConsoleHost<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> ConsoleHost<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn write_line(&self, kind: &str, text: &str) -> HostResult<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| HostError::command_failed(kind, "output lock poisoned"))?;
        writeln!(out, "{}\t{}", kind, text)?;
        out.flush()?;
        Ok(())
    }
}

impl ConsoleHost<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

#[async_trait]
impl<W: Write + Send> EditorHost for ConsoleHost<W> {
    async fn set_active_editor_read_only(&self) -> HostResult<()> {
        self.write_line("command", SET_READ_ONLY_COMMAND)
    }

    async fn revert_active_editor(&self) -> HostResult<()> {
        self.write_line("command", REVERT_COMMAND)
    }

    async fn show_information_message(&self, message: &str) -> HostResult<()> {
        self.write_line("info", message)
    }
}
