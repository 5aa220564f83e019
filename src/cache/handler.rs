//! Handler Facade Module
//!
//! The public cache contract, implemented once against the storage backend
//! trait. Backends only supply raw record storage; everything observable
//! (key validation, TTL resolution, default-value handling, batch
//! semantics) lives here and is identical across engines.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Number, Value};

use crate::backend::{FileStore, MemoryStore, StoreBackend};
use crate::cache::ttl::ResolvedTtl;
use crate::cache::{key, CacheRecord, Ttl, FORBIDDEN_NAME_CHARS};
use crate::config::Options;
use crate::error::{CacheError, Result};

// == Default Value ==
/// Fallback returned by `get` on a miss.
///
/// A plain value, or a resolver invoked lazily so "compute the default only
/// when the cache actually missed" costs nothing on a hit.
pub enum DefaultValue {
    /// A ready value, cloned out on each miss.
    Value(Value),
    /// A zero-argument resolver, called once per miss.
    Compute(Box<dyn Fn() -> Value>),
}

impl DefaultValue {
    /// The null default.
    pub fn null() -> Self {
        Self::Value(Value::Null)
    }

    /// A plain default value.
    pub fn of(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    /// A lazily computed default.
    pub fn compute(resolver: impl Fn() -> Value + 'static) -> Self {
        Self::Compute(Box::new(resolver))
    }

    fn resolve(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Compute(resolver) => resolver(),
        }
    }
}

impl From<Value> for DefaultValue {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl std::fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Compute(_) => f.write_str("Compute(..)"),
        }
    }
}

// == Cache ==
/// Cache handler over a storage backend.
pub struct Cache<B: StoreBackend> {
    backend: B,
}

impl Cache<FileStore> {
    /// Creates a file-backed cache.
    ///
    /// # Example
    /// ```no_run
    /// use kvstash::{Cache, Options, Ttl};
    ///
    /// let cache = Cache::file(Options::new().with("path", "/var/cache/app")).unwrap();
    /// cache.set("greeting", "hello", Ttl::Seconds(60)).unwrap();
    /// ```
    pub fn file(options: Options) -> Result<Self> {
        Self::new(FileStore::new(options))
    }
}

impl Cache<MemoryStore> {
    /// Creates an in-process cache.
    pub fn memory(options: Options) -> Result<Self> {
        Self::new(MemoryStore::new(options))
    }
}

impl<B: StoreBackend> Cache<B> {
    // == Constructor ==
    /// Wraps a backend, failing fast if its capability probe says the
    /// engine cannot run here.
    pub fn new(backend: B) -> Result<Self> {
        if !backend.is_supported() {
            return Err(CacheError::Configuration(
                "the selected storage backend is not available in this environment".to_string(),
            ));
        }
        Ok(Self { backend })
    }

    /// Prefixes and validates a raw key into its storage name.
    fn name_for(&self, raw_key: &str) -> Result<String> {
        let prefix = self.backend.options().get_str("prefix").unwrap_or("");
        let name = key::namespace(prefix, raw_key);
        key::validate_name(&name, FORBIDDEN_NAME_CHARS)?;
        Ok(name)
    }

    fn lookup(&self, raw_key: &str, default: &DefaultValue) -> Result<Value> {
        let name = self.name_for(raw_key)?;
        match self.backend.read(&name)? {
            Some(record) => Ok(record.value),
            None => Ok(default.resolve()),
        }
    }

    // == Get ==
    /// Retrieves the value stored under `key`.
    ///
    /// Absent, expired and corrupt entries all resolve to `default`.
    pub fn get(&self, key: &str, default: DefaultValue) -> Result<Value> {
        self.lookup(key, &default)
    }

    // == Set ==
    /// Stores `value` under `key`.
    ///
    /// The TTL is resolved first: a duration or deadline already in the past
    /// returns `Ok(false)` without touching storage, leaving any prior value
    /// for the key intact. A value the serializer rejects (anything carrying
    /// live handles rather than data) is an `InvalidArgument`.
    pub fn set(&self, key: &str, value: impl Serialize, ttl: Ttl) -> Result<bool> {
        let ttl = match ttl.resolve() {
            ResolvedTtl::Expired => return Ok(false),
            ResolvedTtl::Forever => None,
            ResolvedTtl::Seconds(seconds) => Some(seconds),
        };
        let name = self.name_for(key)?;
        let value = serde_json::to_value(value).map_err(|err| {
            CacheError::InvalidArgument(format!("cache value is not serializable: {err}"))
        })?;
        self.backend.write(&name, &CacheRecord::new(value, ttl))
    }

    // == Delete ==
    /// Removes the entry under `key`; an absent key is still a success.
    pub fn delete(&self, key: &str) -> Result<bool> {
        let name = self.name_for(key)?;
        self.backend.delete(&name)
    }

    // == Clear ==
    /// Removes every entry under the configured prefix.
    ///
    /// Per-entry storage failures are swallowed once the engine takes over;
    /// only a configuration problem (no storage root) surfaces as an error.
    pub fn clear(&self) -> Result<bool> {
        self.backend.clear()?;
        Ok(true)
    }

    // == Has ==
    /// Whether `get` would currently hit for `key`.
    pub fn has(&self, key: &str) -> Result<bool> {
        let name = self.name_for(key)?;
        Ok(self.backend.read(&name)?.is_some())
    }

    // == Increment ==
    /// Adds `offset` to the numeric value stored under `key` and returns
    /// the new value.
    ///
    /// An absent key, a non-numeric stored value, or a refused write all
    /// return `0` and change nothing; absence is deliberately not
    /// auto-initialized to `offset`.
    pub fn increment(&self, key: &str, offset: i64) -> Result<Number> {
        self.offset_by(key, i128::from(offset))
    }

    // == Decrement ==
    /// Subtracts `offset` from the numeric value stored under `key`; same
    /// no-op rules as [`Cache::increment`].
    pub fn decrement(&self, key: &str, offset: i64) -> Result<Number> {
        self.offset_by(key, -i128::from(offset))
    }

    fn offset_by(&self, key: &str, delta: i128) -> Result<Number> {
        let name = self.name_for(key)?;
        let record = match self.backend.read(&name)? {
            Some(record) => record,
            None => return Ok(Number::from(0)),
        };
        let updated = match shifted(&record.value, delta) {
            Some(updated) => updated,
            None => return Ok(Number::from(0)),
        };

        // the rewrite keeps the original metadata: the entry's expiry window
        // is unchanged by arithmetic on it
        let rewritten = CacheRecord {
            stored_at: record.stored_at,
            ttl: record.ttl,
            value: Value::Number(updated.clone()),
        };
        if self.backend.write(&name, &rewritten)? {
            Ok(updated)
        } else {
            Ok(Number::from(0))
        }
    }

    // == Get Multiple ==
    /// Sequential `get` per key; every requested key appears in the result,
    /// misses resolved through `default`.
    pub fn get_multiple(
        &self,
        keys: &[&str],
        default: DefaultValue,
    ) -> Result<BTreeMap<String, Value>> {
        let mut values = BTreeMap::new();
        for key in keys {
            values.insert(key.to_string(), self.lookup(key, &default)?);
        }
        Ok(values)
    }

    // == Set Multiple ==
    /// Sequential `set` per pair under one shared TTL.
    ///
    /// An empty input is a no-op reported as `Ok(false)`.
    pub fn set_multiple(&self, pairs: &[(&str, Value)], ttl: Ttl) -> Result<bool> {
        if pairs.is_empty() {
            return Ok(false);
        }
        for (key, value) in pairs {
            self.set(key, value, ttl)?;
        }
        Ok(true)
    }

    // == Delete Multiple ==
    /// Sequential `delete` per key; empty input is a no-op reported as
    /// `Ok(false)`.
    pub fn delete_multiple(&self, keys: &[&str]) -> Result<bool> {
        if keys.is_empty() {
            return Ok(false);
        }
        for key in keys {
            self.delete(key)?;
        }
        Ok(true)
    }

    // == Options ==
    /// Shallow-merges `options` over the current configuration.
    pub fn set_options(&mut self, options: Options) -> &mut Self {
        self.backend.options_mut().merge(options);
        self
    }

    /// Looks up a single option by case-insensitive name.
    pub fn get_option(&self, name: &str) -> Option<Value> {
        self.backend.options().get(name).cloned()
    }

    /// The full merged option map.
    pub fn options(&self) -> &Options {
        self.backend.options()
    }
}

/// Applies `delta` to a stored numeric payload.
///
/// Integer arithmetic stays integral while it fits an `i64`; anything else
/// (stored floats, overflowing sums, huge unsigned values) continues in
/// floating point. Non-numeric payloads return None.
fn shifted(value: &Value, delta: i128) -> Option<Number> {
    let number = match value {
        Value::Number(number) => number,
        _ => return None,
    };
    if let Some(int) = number.as_i64() {
        let sum = i128::from(int) + delta;
        if let Ok(int_sum) = i64::try_from(sum) {
            return Some(Number::from(int_sum));
        }
        return Number::from_f64(sum as f64);
    }
    let float = number.as_f64()?;
    Number::from_f64(float + delta as f64)
}
