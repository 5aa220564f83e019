//! TTL Policy Module
//!
//! Normalizes the time-to-live accepted by `set` into a storable form.
//!
//! Callers may hand over a plain number of seconds, a signed duration, or an
//! absolute deadline. A duration or deadline that lands in the past resolves
//! to `Expired`, which makes the write fail without storing anything.

use chrono::{DateTime, Duration, Utc};

// == Ttl ==
/// Time-to-live accepted by the write operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ttl {
    /// The entry never expires.
    Forever,
    /// Relative lifetime in whole seconds from the moment of the write.
    Seconds(u64),
    /// Signed relative lifetime; negative durations are already expired.
    Duration(Duration),
    /// Absolute deadline; resolved against the clock at write time.
    Until(DateTime<Utc>),
}

// == Resolved Ttl ==
/// Normalized outcome of [`Ttl::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedTtl {
    /// No expiry.
    Forever,
    /// Lifetime in seconds, possibly zero (zero means "expire immediately").
    Seconds(u64),
    /// The requested lifetime is already over; nothing should be stored.
    Expired,
}

impl Ttl {
    // == Resolve ==
    /// Normalizes this TTL against the current clock.
    pub fn resolve(self) -> ResolvedTtl {
        match self {
            Ttl::Forever => ResolvedTtl::Forever,
            Ttl::Seconds(seconds) => ResolvedTtl::Seconds(seconds),
            Ttl::Duration(duration) => from_signed_seconds(duration.num_seconds()),
            Ttl::Until(deadline) => from_signed_seconds((deadline - Utc::now()).num_seconds()),
        }
    }
}

fn from_signed_seconds(seconds: i64) -> ResolvedTtl {
    if seconds < 0 {
        ResolvedTtl::Expired
    } else {
        ResolvedTtl::Seconds(seconds as u64)
    }
}
