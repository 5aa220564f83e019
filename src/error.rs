//! Error types for the cache
//!
//! Provides unified error handling using thiserror.
//!
//! Only caller mistakes and configuration problems surface as errors.
//! Storage-layer failures (a denied write, an unreadable file) are muted by
//! the backends into boolean or miss results, so a caller that treats the
//! cache as optional never crashes on them.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Caller passed an invalid key or an unserializable value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Required setting missing or backend unavailable
    #[error("Configuration error: {0}")]
    Configuration(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
