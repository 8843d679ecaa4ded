//! Ordered resolver
//!
//! Resolves a value for a path from a [`PatternTable`]. Every entry is
//! tested in table order and each match overwrites the previous result, so
//! the **last listed** matching pattern wins. Tables are meant to be written
//! from general to specific: a broad rule first, narrower exceptions after.
//!
//! ```text
//! "**/node_modules/**"          = true    # everything vendored is read-only
//! "**/node_modules/special/**"  = false   # ...except this one package
//! ```

use crate::patterns::glob::{GlobMatcher, GlobsetMatcher};
use crate::patterns::table::PatternTable;
use std::path::Path;
use tracing::trace;

/// Resolve the value for `path`.
///
/// Returns the value of the last matching pattern, otherwise `default`.
/// `None` means nothing matched and no default was supplied.
pub fn resolve<M, V>(
    matcher: &M,
    path: &Path,
    table: &PatternTable<V>,
    default: Option<V>,
) -> Option<V>
where
    M: GlobMatcher + ?Sized,
    V: Clone,
{
    let mut result = None;
    for (pattern, value) in table {
        if matcher.matches(path, pattern) {
            trace!(pattern, path = %path.display(), "Pattern matched");
            result = Some(value);
        }
    }
    result.cloned().or(default)
}

/// Resolve `path` and keep every match, for diagnostics.
pub fn explain<'t, M, V>(
    matcher: &M,
    path: &Path,
    table: &'t PatternTable<V>,
) -> Resolution<'t, V>
where
    M: GlobMatcher + ?Sized,
{
    let matches = table
        .iter()
        .enumerate()
        .filter(|(_, (pattern, _))| matcher.matches(path, pattern))
        .map(|(index, (pattern, value))| Match {
            index,
            pattern,
            value,
        })
        .collect();
    Resolution { matches }
}

/// One table entry that matched
#[derive(Debug, PartialEq, Eq)]
pub struct Match<'t, V> {
    /// Position of the entry in the table
    pub index: usize,
    pub pattern: &'t str,
    pub value: &'t V,
}

/// Every match of a resolution, in table order
#[derive(Debug, PartialEq, Eq)]
pub struct Resolution<'t, V> {
    matches: Vec<Match<'t, V>>,
}

impl<'t, V> Resolution<'t, V> {
    /// The authoritative match (the last one), if any
    pub fn winner(&self) -> Option<&Match<'t, V>> {
        self.matches.last()
    }

    /// The resolved value, if any pattern matched
    pub fn value(&self) -> Option<&'t V> {
        self.winner().map(|m| m.value)
    }

    pub fn matches(&self) -> &[Match<'t, V>] {
        &self.matches
    }

    pub fn is_match(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// Resolver bound to a matching engine
#[derive(Debug, Clone, Default)]
pub struct OrderedResolver<M = GlobsetMatcher> {
    matcher: M,
}

impl<M: GlobMatcher> OrderedResolver<M> {
    pub fn new(matcher: M) -> Self {
        Self { matcher }
    }

    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    /// See [`resolve`]
    pub fn resolve<V: Clone>(
        &self,
        path: &Path,
        table: &PatternTable<V>,
        default: Option<V>,
    ) -> Option<V> {
        resolve(&self.matcher, path, table, default)
    }

    /// See [`explain`]
    pub fn explain<'t, V>(&self, path: &Path, table: &'t PatternTable<V>) -> Resolution<'t, V> {
        explain(&self.matcher, path, table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Matches when the path contains the pattern text
    struct ContainsMatcher {
        calls: AtomicUsize,
    }

    impl ContainsMatcher {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl GlobMatcher for ContainsMatcher {
        fn matches(&self, path: &Path, pattern: &str) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            path.to_string_lossy().contains(pattern)
        }
    }

    #[test]
    fn test_last_match_wins() {
        let matcher = ContainsMatcher::new();
        let table = PatternTable::from([("/a/", 1), ("/b/", 2), ("/a/b/", 3)]);

        assert_eq!(resolve(&matcher, Path::new("/a/b/c"), &table, None), Some(3));
        assert_eq!(resolve(&matcher, Path::new("/x/b/c"), &table, None), Some(2));
        assert_eq!(resolve(&matcher, Path::new("/a/x"), &table, None), Some(1));
    }

    #[test]
    fn test_no_early_exit() {
        let matcher = ContainsMatcher::new();
        let table = PatternTable::from([("/", true), ("/a", false), ("/b", true)]);

        resolve(&matcher, Path::new("/a"), &table, None);
        assert_eq!(matcher.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_default_only_when_nothing_matched() {
        let matcher = ContainsMatcher::new();
        let table = PatternTable::from([("/a/", false)]);

        assert_eq!(resolve(&matcher, Path::new("/a/x"), &table, Some(true)), Some(false));
        assert_eq!(resolve(&matcher, Path::new("/b/x"), &table, Some(true)), Some(true));
        assert_eq!(resolve(&matcher, Path::new("/b/x"), &table, None), None);
    }

    #[test]
    fn test_empty_table() {
        let matcher = ContainsMatcher::new();
        let table = PatternTable::<bool>::new();

        assert_eq!(resolve(&matcher, Path::new("/any"), &table, Some(false)), Some(false));
        assert_eq!(resolve(&matcher, Path::new("/any"), &table, None), None);
        assert_eq!(matcher.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_non_boolean_values() {
        #[derive(Debug, Clone, PartialEq)]
        enum Mode {
            Lock,
            Warn,
        }

        let resolver = OrderedResolver::new(GlobsetMatcher::new());
        let table = PatternTable::from([("**/vendor/**", Mode::Lock), ("**/*.md", Mode::Warn)]);

        assert_eq!(
            resolver.resolve(Path::new("/p/vendor/README.md"), &table, None),
            Some(Mode::Warn)
        );
        assert_eq!(
            resolver.resolve(Path::new("/p/vendor/lib.rs"), &table, None),
            Some(Mode::Lock)
        );
    }

    #[test]
    fn test_explain_records_all_matches() {
        let resolver = OrderedResolver::new(GlobsetMatcher::new());
        let table = PatternTable::from([
            ("**/node_modules/**", true),
            ("**/node_modules/special/**", false),
            ("**/src/**", false),
        ]);

        let resolution =
            resolver.explain(Path::new("/home/user/project/node_modules/special/file.js"), &table);

        assert!(resolution.is_match());
        assert_eq!(resolution.matches().len(), 2);
        assert_eq!(resolution.matches()[0].pattern, "**/node_modules/**");
        let winner = resolution.winner().unwrap();
        assert_eq!(winner.index, 1);
        assert_eq!(winner.pattern, "**/node_modules/special/**");
        assert_eq!(resolution.value(), Some(&false));
    }

    #[test]
    fn test_explain_no_match() {
        let resolver = OrderedResolver::new(GlobsetMatcher::new());
        let table = PatternTable::from([("**/*.md", true)]);

        let resolution = resolver.explain(Path::new("/a/b.rs"), &table);
        assert!(!resolution.is_match());
        assert!(resolution.winner().is_none());
        assert_eq!(resolution.value(), None);
    }
}
