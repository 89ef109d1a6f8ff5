//! Deterministic cache key construction.

use std::collections::BTreeMap;
use std::fmt::Display;

/// Separator between key parts.
pub const KEY_DELIMITER: &str = ":";

/// Builder for cache keys of the form
/// `prefix:arg1:arg2:name_a=value:name_b=value`.
///
/// Positional arguments keep their call order; named arguments are sorted by
/// name, so the insertion order of named arguments never changes the key.
/// The prefix namespaces the key and keeps unrelated call sites apart.
///
/// Values are rendered with [`Display`] and not hashed: two distinct values
/// with the same rendering share a key.
///
/// ```
/// use blog_platform::infrastructure::cache::CacheKey;
///
/// let a = CacheKey::new("posts").arg(3).named("status", "published").named("author", 1);
/// let b = CacheKey::new("posts").arg(3).named("author", 1).named("status", "published");
///
/// assert_eq!(a.build(), "posts:3:author=1:status=published");
/// assert_eq!(a.build(), b.build());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    prefix: String,
    positional: Vec<String>,
    named: BTreeMap<String, String>,
}

impl CacheKey {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            positional: Vec::new(),
            named: BTreeMap::new(),
        }
    }

    /// Appends a positional argument.
    pub fn arg(mut self, value: impl Display) -> Self {
        self.positional.push(value.to_string());
        self
    }

    /// Sets a named argument. Setting the same name twice keeps the last value.
    pub fn named(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.named.insert(name.into(), value.to_string());
        self
    }

    /// Sets a named argument only when a value is present.
    pub fn named_opt<V: Display>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.named(name, v),
            None => self,
        }
    }

    /// Renders the final key string.
    pub fn build(&self) -> String {
        let mut parts = Vec::with_capacity(1 + self.positional.len() + self.named.len());
        parts.push(self.prefix.clone());
        parts.extend(self.positional.iter().cloned());
        parts.extend(self.named.iter().map(|(k, v)| format!("{}={}", k, v)));
        parts.join(KEY_DELIMITER)
    }

    /// Glob pattern matching every key built under `prefix`.
    pub fn namespace_pattern(prefix: &str) -> String {
        format!("{}{}*", prefix, KEY_DELIMITER)
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.build())
    }
}
