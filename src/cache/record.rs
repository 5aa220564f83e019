//! Cache Record Module
//!
//! The stored envelope for every cache entry, plus its wire codec.
//!
//! Each entry persists as `{ stored_at, ttl, value }` serialized to JSON.
//! The payload is an opaque [`serde_json::Value`], which covers booleans,
//! integers, floats, strings, null and nested arrays/objects.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::Value;

// == Cache Record ==
/// A single stored cache entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheRecord {
    /// Unix timestamp (seconds) when the record was written
    pub stored_at: u64,
    /// Lifetime in seconds, None = never expires
    pub ttl: Option<u64>,
    /// The stored payload
    pub value: Value,
}

impl CacheRecord {
    // == Constructor ==
    /// Creates a record stamped with the current clock.
    pub fn new(value: Value, ttl: Option<u64>) -> Self {
        Self {
            stored_at: current_timestamp(),
            ttl,
            value,
        }
    }

    // == Is Expired ==
    /// Checks the record against the current clock.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp())
    }

    /// Checks the record against an explicit clock reading.
    ///
    /// A record with no TTL never expires. A zero TTL is expired from the
    /// moment it is written: the write itself succeeds, but any later read
    /// observes a miss and evicts it.
    pub fn is_expired_at(&self, now: u64) -> bool {
        match self.ttl {
            None => false,
            Some(0) => true,
            Some(ttl) => now > self.stored_at.saturating_add(ttl),
        }
    }

    // == Codec ==
    /// Serializes the record for storage.
    pub fn encode(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Deserializes stored bytes back into a record.
    ///
    /// Corrupt bytes or a missing `stored_at`/`ttl`/`value` field fail here;
    /// callers degrade that to a cache miss rather than an error.
    pub fn decode(bytes: &[u8]) -> serde_json::Result<CacheRecord> {
        serde_json::from_slice(bytes)
    }
}

// == Utility Functions ==
/// Returns the current Unix timestamp in seconds.
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before the Unix epoch")
        .as_secs()
}
