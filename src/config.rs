//! Configuration Module
//!
//! Handles the option map shared by every cache handler.
//!
//! Options are a mapping from lower-cased name to value. Each backend seeds
//! the map with its own defaults and caller-supplied overrides are
//! shallow-merged on top, last writer wins. Lookups are case-insensitive.

use std::collections::BTreeMap;

use serde_json::Value;

// == Options ==
/// Case-insensitive option map for a cache handler.
///
/// Values are JSON scalars so one map covers strings (`prefix`, `path`),
/// integers (`mode`) and anything a future backend needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    entries: BTreeMap<String, Value>,
}

impl Options {
    // == Constructor ==
    /// Creates an empty option map.
    pub fn new() -> Self {
        Self::default()
    }

    // == With ==
    /// Builder-style insert, lower-casing the option name.
    ///
    /// # Example
    /// ```
    /// use kvstash::Options;
    ///
    /// let options = Options::new()
    ///     .with("path", "/tmp/cache")
    ///     .with("prefix", "app_");
    /// ```
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    // == Set ==
    /// Inserts or replaces a single option.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.entries.insert(name.to_lowercase(), value.into());
    }

    // == Merge ==
    /// Shallow-merges `overrides` into this map; overrides win on collision.
    pub fn merge(&mut self, overrides: Options) {
        self.entries.extend(overrides.entries);
    }

    // == Get ==
    /// Looks up an option by case-insensitive name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(&name.to_lowercase())
    }

    /// Looks up a string-valued option.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Looks up a small unsigned integer option (file modes, limits).
    pub fn get_u32(&self, name: &str) -> Option<u32> {
        self.get(name)
            .and_then(Value::as_u64)
            .and_then(|value| u32::try_from(value).ok())
    }

    // == Is Empty ==
    /// Returns true if no options are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_case_insensitive() {
        let mut options = Options::new();
        options.set("Prefix", "cache_");

        assert_eq!(options.get_str("prefix"), Some("cache_"));
        assert_eq!(options.get_str("PREFIX"), Some("cache_"));
    }

    #[test]
    fn test_merge_last_writer_wins() {
        let mut options = Options::new()
            .with("prefix", "cache_")
            .with("mode", 0o640u64);

        options.merge(Options::new().with("PREFIX", "session_"));

        assert_eq!(options.get_str("prefix"), Some("session_"));
        assert_eq!(options.get_u32("mode"), Some(0o640));
    }

    #[test]
    fn test_typed_lookup_mismatch_is_none() {
        let options = Options::new().with("mode", "not a number");

        assert_eq!(options.get_u32("mode"), None);
        assert_eq!(options.get_str("mode"), Some("not a number"));
    }

    #[test]
    fn test_missing_option() {
        let options = Options::new();
        assert!(options.get("path").is_none());
        assert!(options.is_empty());
    }
}
