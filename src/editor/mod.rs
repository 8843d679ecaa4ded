//! Editor integration
//!
//! The host-facing half of the crate: the commands an editor must provide,
//! the policy that decides when to call them, and the session that reacts to
//! focus changes.
//!
//! ```text
//! focus change -> Session -> ReadOnlyPolicy -> PatternTable + OrderedResolver
//!                                   |
//!                                   +-> EditorHost: info message, read-only, revert
//! ```

pub mod host;
pub mod policy;
pub mod session;

pub use host::{BoxedEditorHost, ConsoleHost, EditorHost, REVERT_COMMAND, SET_READ_ONLY_COMMAND};
pub use policy::{Document, PolicyDecision, PolicyOptions, PolicyOutcome, ReadOnlyPolicy};
pub use session::{Session, run_session};
