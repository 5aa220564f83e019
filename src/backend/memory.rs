//! Memory Store Module
//!
//! In-process storage engine backed by a HashMap.
//!
//! Useful for tests and for single-process deployments that want cache
//! semantics without touching the disk. Entries die with the process.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use crate::backend::StoreBackend;
use crate::cache::CacheRecord;
use crate::config::Options;
use crate::error::Result;

// == Memory Store ==
/// Storage engine keeping records in process memory.
pub struct MemoryStore {
    options: Options,
    entries: RwLock<HashMap<String, CacheRecord>>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty in-process store from caller options merged over the
    /// defaults.
    pub fn new(overrides: Options) -> Self {
        let mut options = Options::new().with("prefix", "cache_");
        options.merge(overrides);
        Self {
            options,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of live entries, expired ones included until a read evicts
    /// them.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl StoreBackend for MemoryStore {
    fn options(&self) -> &Options {
        &self.options
    }

    fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    // == Read ==
    fn read(&self, name: &str) -> Result<Option<CacheRecord>> {
        // write lock up front: the reader that finds an expired entry
        // removes it
        let mut entries = self.entries.write();
        match entries.get(name) {
            None => Ok(None),
            Some(record) if record.is_expired() => {
                debug!("lazily evicting expired cache entry {name}");
                entries.remove(name);
                Ok(None)
            }
            Some(record) => Ok(Some(record.clone())),
        }
    }

    // == Write ==
    fn write(&self, name: &str, record: &CacheRecord) -> Result<bool> {
        self.entries
            .write()
            .insert(name.to_string(), record.clone());
        Ok(true)
    }

    // == Delete ==
    fn delete(&self, name: &str) -> Result<bool> {
        self.entries.write().remove(name);
        Ok(true)
    }

    // == Clear ==
    fn clear(&self) -> Result<()> {
        let prefix = self.options.get_str("prefix").unwrap_or("").to_string();
        self.entries
            .write()
            .retain(|name, _| !name.starts_with(&prefix));
        Ok(())
    }

    // == Is Supported ==
    fn is_supported(&self) -> bool {
        true
    }
}
