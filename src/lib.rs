//! kvstash - A file-backed key-value cache
//!
//! A uniform cache contract (get/set/delete/clear/has/increment/decrement,
//! plus batch variants) over interchangeable storage backends, with TTL
//! expiration enforced lazily at read time.
//!
//! # Example
//! ```no_run
//! use kvstash::{Cache, DefaultValue, Options, Ttl};
//!
//! let cache = Cache::file(Options::new().with("path", "/var/cache/app")).unwrap();
//!
//! cache.set("user_42", serde_json::json!({"name": "ada"}), Ttl::Seconds(300)).unwrap();
//! let user = cache.get("user_42", DefaultValue::null()).unwrap();
//! ```

pub mod backend;
pub mod cache;
pub mod config;
pub mod error;

pub use backend::{FileStore, MemoryStore, StoreBackend};
pub use cache::{Cache, CacheRecord, DefaultValue, ResolvedTtl, Ttl};
pub use config::Options;
pub use error::{CacheError, Result};
