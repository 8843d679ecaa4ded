//! Glob matching
//!
//! Tests a single path against a single glob pattern. The matching engine
//! sits behind the [`GlobMatcher`] trait so the resolver never depends on a
//! concrete implementation; [`GlobsetMatcher`] is the default and follows
//! the editor's own glob dialect:
//!
//! - `*` and `?` never cross a `/`
//! - `**` spans any number of path segments, and a leading `**/` also
//!   matches the root `/` of an absolute path
//! - `{a,b}` alternation and `[...]` character classes

use globset::GlobBuilder;
use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Capability to test one path against one glob pattern
pub trait GlobMatcher: Send + Sync {
    /// Check whether `path` satisfies `pattern`.
    ///
    /// There is no error surface: a pattern the engine cannot understand
    /// simply does not match.
    fn matches(&self, path: &Path, pattern: &str) -> bool;
}

impl<M: GlobMatcher + ?Sized> GlobMatcher for &M {
    fn matches(&self, path: &Path, pattern: &str) -> bool {
        (**self).matches(path, pattern)
    }
}

impl<M: GlobMatcher + ?Sized> GlobMatcher for Box<M> {
    fn matches(&self, path: &Path, pattern: &str) -> bool {
        (**self).matches(path, pattern)
    }
}

impl<M: GlobMatcher + ?Sized> GlobMatcher for Arc<M> {
    fn matches(&self, path: &Path, pattern: &str) -> bool {
        (**self).matches(path, pattern)
    }
}

/// Glob matcher backed by `globset`
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobsetMatcher {
    case_insensitive: bool,
}

impl GlobsetMatcher {
    /// Create a case-sensitive matcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle case-insensitive matching (useful on case-folding filesystems)
    pub fn case_insensitive(mut self, yes: bool) -> Self {
        self.case_insensitive = yes;
        self
    }

    fn compile(&self, pattern: &str) -> Result<globset::GlobMatcher, globset::Error> {
        GlobBuilder::new(pattern)
            .literal_separator(true)
            .case_insensitive(self.case_insensitive)
            .build()
            .map(|glob| glob.compile_matcher())
    }
}

impl GlobMatcher for GlobsetMatcher {
    fn matches(&self, path: &Path, pattern: &str) -> bool {
        match self.compile(pattern) {
            Ok(matcher) => matcher.is_match(&*normalize_path(path)),
            Err(e) => {
                warn!(pattern, error = %e, "Invalid glob pattern, treating as non-matching");
                false
            }
        }
    }
}

/// Check that a pattern compiles, without matching anything.
pub fn check_pattern(pattern: &str) -> Result<(), globset::Error> {
    GlobsetMatcher::new().compile(pattern).map(|_| ())
}

/// Render a path with `/` separators, the form patterns are written in.
pub fn normalize_path(path: &Path) -> Cow<'_, str> {
    let rendered = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '\\' {
        Cow::Owned(rendered.replace('\\', "/"))
    } else {
        rendered
    }
}
