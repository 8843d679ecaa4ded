//! Pattern tables
//!
//! An ordered, key-unique list of `(pattern, value)` pairs. Order is
//! precedence: entries listed later override earlier ones during
//! resolution, so the container never reorders anything except on
//! re-insertion of an existing pattern, which moves it to the end.

use crate::error::ConfigError;
use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::marker::PhantomData;

/// Ordered mapping from glob pattern to value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternTable<V> {
    entries: Vec<(String, V)>,
}

impl<V> PatternTable<V> {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry.
    ///
    /// If the pattern is already present its old entry is removed first, so
    /// the pattern takes the precedence of its latest position. Returns the
    /// previous value, if any.
    pub fn insert(&mut self, pattern: impl Into<String>, value: V) -> Option<V> {
        let pattern = pattern.into();
        let previous = self
            .entries
            .iter()
            .position(|(existing, _)| *existing == pattern)
            .map(|index| self.entries.remove(index).1);
        self.entries.push((pattern, value));
        previous
    }

    /// Look up the value configured for an exact pattern
    pub fn get(&self, pattern: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == pattern)
            .map(|(_, value)| value)
    }

    /// Iterate entries in precedence order (lowest first)
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Iterate patterns in precedence order
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(pattern, _)| pattern.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: DeserializeOwned> PatternTable<V> {
    /// Build a table from a raw settings value.
    ///
    /// A missing or `null` setting is an empty table. A JSON object becomes
    /// the table in document order. Any other shape is a configuration type
    /// error for `key`; it is never treated as "no patterns".
    pub fn from_setting(
        key: &str,
        value: Option<serde_json::Value>,
    ) -> Result<Self, ConfigError> {
        match value {
            None | Some(serde_json::Value::Null) => Ok(Self::new()),
            Some(serde_json::Value::Object(map)) => {
                let mut table = Self::new();
                for (pattern, raw) in map {
                    let value = serde_json::from_value(raw).map_err(|e| {
                        ConfigError::InvalidValue {
                            pattern: pattern.clone(),
                            reason: e.to_string(),
                        }
                    })?;
                    table.insert(pattern, value);
                }
                Ok(table)
            }
            Some(other) => Err(ConfigError::invalid_type(key, &other)),
        }
    }
}

impl<V> Default for PatternTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for PatternTable<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (pattern, value) in iter {
            table.insert(pattern, value);
        }
        table
    }
}

impl<K: Into<String>, V, const N: usize> From<[(K, V); N]> for PatternTable<V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<'a, V> IntoIterator for &'a PatternTable<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of a [`PatternTable`]
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    inner: std::slice::Iter<'a, (String, V)>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(pattern, value)| (pattern.as_str(), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for Iter<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner
            .next_back()
            .map(|(pattern, value)| (pattern.as_str(), value))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for PatternTable<V> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TableVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for TableVisitor<V> {
            type Value = PatternTable<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of glob pattern to value")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut table = PatternTable::new();
                while let Some((pattern, value)) = access.next_entry::<String, V>()? {
                    table.insert(pattern, value);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor(PhantomData))
    }
}
