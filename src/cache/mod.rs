//! Cache Module
//!
//! Key namespacing, TTL normalization, the stored-record envelope, and the
//! handler facade shared by every storage backend.

mod handler;
mod key;
mod record;
mod ttl;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use handler::{Cache, DefaultValue};
pub use key::{namespace, validate_name};
pub use record::{current_timestamp, CacheRecord};
pub use ttl::{ResolvedTtl, Ttl};

// == Public Constants ==
/// Characters a composed cache name may never contain.
///
/// Keeps a name safe as a single filesystem path component and free of
/// protocol delimiters in string-keyed engines.
pub const FORBIDDEN_NAME_CHARS: &str = "{}()/\\@:";

/// Forbidden set for SQL-style engines, which additionally reject quotes.
pub const SQL_FORBIDDEN_NAME_CHARS: &str = "{}()/\\@:'\"";
