//! Storage Backend Module
//!
//! Defines the engine interface the handler facade is written against, and
//! the engines shipped with the crate.

mod file;
mod memory;

// Re-export public types
pub use file::{FileStore, DEFAULT_FILE_MODE, PROTECTED_FILES};
pub use memory::MemoryStore;

use crate::cache::CacheRecord;
use crate::config::Options;
use crate::error::Result;

// == Store Backend ==
/// Storage engine behind a cache handler.
///
/// The facade implements the whole public contract once against this trait;
/// an engine only supplies raw record storage plus its capability probe.
///
/// Error discipline: `Err` is reserved for configuration problems (a missing
/// storage root, for example). Ordinary storage failures are muted inside
/// the engine, logged via `tracing`, and reported as a miss (`Ok(None)`) or
/// a `false` result so cache trouble never crashes the caller.
pub trait StoreBackend {
    /// The merged option map this engine was configured with.
    fn options(&self) -> &Options;

    /// Mutable access for runtime reconfiguration.
    fn options_mut(&mut self) -> &mut Options;

    /// Loads the record stored under `name`.
    ///
    /// Returns `Ok(None)` for absent, expired or undecodable entries. An
    /// expired entry is deleted as a side effect before the miss is
    /// reported (lazy eviction).
    fn read(&self, name: &str) -> Result<Option<CacheRecord>>;

    /// Stores `record` under `name`, overwriting unconditionally.
    ///
    /// Returns `Ok(false)` when the underlying storage refused the write.
    fn write(&self, name: &str, record: &CacheRecord) -> Result<bool>;

    /// Removes the entry under `name`; removing an absent entry succeeds.
    fn delete(&self, name: &str) -> Result<bool>;

    /// Bulk-removes every entry scoped under the configured prefix.
    fn clear(&self) -> Result<()>;

    /// Capability probe: whether this engine's prerequisites are present.
    ///
    /// Checked once at handler construction so an unusable backend fails
    /// fast instead of on first use.
    fn is_supported(&self) -> bool;
}
