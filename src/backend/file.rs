//! File Store Module
//!
//! Filesystem-backed storage engine: one file per cache entry.
//!
//! Each entry lives at `<path>/<name>` and holds the serialized record
//! envelope. Expiry is enforced lazily: an expired entry is deleted by the
//! reader that finds it. Writes are plain overwrites; concurrent writers to
//! the same key race and the last completed write wins, with no atomicity
//! beyond what the filesystem gives a single write call.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::backend::StoreBackend;
use crate::cache::CacheRecord;
use crate::config::Options;
use crate::error::{CacheError, Result};

// == Public Constants ==
/// Housekeeping files that `clear` must never delete, whatever the prefix.
pub const PROTECTED_FILES: [&str; 5] = [
    ".htaccess",
    "index.htm",
    "index.html",
    "index.php",
    "web.config",
];

/// Permission bits applied to entry files unless the `mode` option says
/// otherwise.
pub const DEFAULT_FILE_MODE: u32 = 0o640;

// == File Store ==
/// Storage engine keeping one file per entry under a configured root
/// directory.
pub struct FileStore {
    options: Options,
}

impl FileStore {
    // == Constructor ==
    /// Creates a file store from caller options merged over the defaults.
    ///
    /// The storage root (`path`) has no default. It is resolved on every
    /// operation, so a missing root surfaces as a configuration error on
    /// first use and a later `set_options` can supply it.
    pub fn new(overrides: Options) -> Self {
        let mut options = Options::new()
            .with("prefix", "cache_")
            .with("mode", u64::from(DEFAULT_FILE_MODE));
        options.merge(overrides);
        Self { options }
    }

    fn root(&self) -> Result<&str> {
        self.options.get_str("path").ok_or_else(|| {
            CacheError::Configuration(
                "the caching directory must be defined (\"path\" option)".to_string(),
            )
        })
    }

    /// Maps a namespaced name to its path under the storage root.
    fn real_path(&self, name: &str) -> Result<PathBuf> {
        let root = self.root()?;
        let root = root.trim_end_matches(|c| c == '/' || c == '\\');
        let name = name.trim_matches(|c| c == '/' || c == '\\');
        Ok(Path::new(root).join(name))
    }

    fn mode(&self) -> u32 {
        self.options.get_u32("mode").unwrap_or(DEFAULT_FILE_MODE)
    }

    fn prefix(&self) -> &str {
        self.options.get_str("prefix").unwrap_or("")
    }
}

impl StoreBackend for FileStore {
    fn options(&self) -> &Options {
        &self.options
    }

    fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    // == Read ==
    fn read(&self, name: &str) -> Result<Option<CacheRecord>> {
        let path = self.real_path(name)?;
        if !path.is_file() {
            return Ok(None);
        }

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!("failed to read cache file {}: {err}", path.display());
                return Ok(None);
            }
        };

        let record = match CacheRecord::decode(&bytes) {
            Ok(record) => record,
            Err(err) => {
                debug!(
                    "discarding undecodable cache file {}: {err}",
                    path.display()
                );
                return Ok(None);
            }
        };

        if record.is_expired() {
            debug!("lazily evicting expired cache entry {name}");
            if let Err(err) = fs::remove_file(&path) {
                warn!(
                    "failed to remove expired cache file {}: {err}",
                    path.display()
                );
            }
            return Ok(None);
        }

        Ok(Some(record))
    }

    // == Write ==
    fn write(&self, name: &str, record: &CacheRecord) -> Result<bool> {
        let path = self.real_path(name)?;

        let bytes = match record.encode() {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!("failed to encode cache entry {name}: {err}");
                return Ok(false);
            }
        };

        if let Err(err) = fs::write(&path, bytes) {
            warn!("failed to write cache file {}: {err}", path.display());
            return Ok(false);
        }

        apply_mode(&path, self.mode());
        Ok(true)
    }

    // == Delete ==
    fn delete(&self, name: &str) -> Result<bool> {
        let path = self.real_path(name)?;
        if !path.is_file() {
            // an absent entry counts as deleted
            return Ok(true);
        }
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(err) => {
                warn!("failed to delete cache file {}: {err}", path.display());
                Ok(false)
            }
        }
    }

    // == Clear ==
    /// Removes every entry under the root whose basename starts with the
    /// configured prefix, recursing into subdirectories and dropping the
    /// ones left empty. Housekeeping files from [`PROTECTED_FILES`] are
    /// always kept.
    fn clear(&self) -> Result<()> {
        let root = self.root()?;
        let root = root.trim_end_matches(|c| c == '/' || c == '\\').to_string();
        let prefix = self.prefix().to_string();

        // children before parents, so an emptied subdirectory can be removed
        // on the way back up
        for entry in WalkDir::new(&root).min_depth(1).contents_first(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("skipping unreadable entry while clearing {root}: {err}");
                    continue;
                }
            };
            let path = entry.path();

            if entry.file_type().is_dir() {
                // only succeeds once every entry beneath it is gone
                let _ = fs::remove_dir(path);
                continue;
            }

            let basename = match path.file_name().and_then(|n| n.to_str()) {
                Some(basename) => basename,
                None => continue,
            };
            if PROTECTED_FILES.contains(&basename) || !basename.starts_with(&prefix) {
                continue;
            }
            if let Err(err) = fs::remove_file(path) {
                warn!("failed to delete cache file {}: {err}", path.display());
            }
        }
        Ok(())
    }

    // == Is Supported ==
    /// The local filesystem is always available; the probe exists for
    /// parity with engines that have real runtime prerequisites.
    fn is_supported(&self) -> bool {
        true
    }
}

#[cfg(unix)]
fn apply_mode(path: &Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;

    if let Err(err) = fs::set_permissions(path, fs::Permissions::from_mode(mode)) {
        warn!("failed to set permissions on {}: {err}", path.display());
    }
}

#[cfg(not(unix))]
fn apply_mode(_path: &Path, _mode: u32) {}
