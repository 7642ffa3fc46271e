//! Nonce generation for Bitfinex API authentication.
//!
//! Bitfinex rejects any authenticated request whose nonce is not strictly
//! greater than the last nonce it accepted for the same API key.

use std::sync::atomic::{AtomicU64, Ordering};

use time::OffsetDateTime;

/// Trait for providing nonces for authenticated requests.
///
/// The nonce must be strictly increasing for each request.
pub trait NonceProvider: Send + Sync {
    /// Generate the next nonce value.
    ///
    /// This value must be greater than any previously returned value.
    fn next_nonce(&self) -> u64;
}

/// A nonce provider seeded from the wall clock in whole seconds.
///
/// Each call returns `max(now, last + 1)`, so a fresh process starts ahead of
/// any nonce used by an earlier run and several requests within one second
/// still get distinct values. Nonces therefore run ahead of the clock under
/// bursts and catch up once the clock passes them.
///
/// The update is a compare-and-swap, so one instance can be shared between
/// threads and tasks. Ordering is only guaranteed per instance: two instances
/// (or two processes) using the same API key can produce the same nonce
/// within a second, and the exchange will reject one of them.
pub struct IncreasingNonce {
    last_nonce: AtomicU64,
}

impl IncreasingNonce {
    /// Create a new increasing nonce provider.
    pub fn new() -> Self {
        Self {
            last_nonce: AtomicU64::new(0),
        }
    }

    /// The last nonce handed out, or 0 if none has been generated yet.
    pub fn last_nonce(&self) -> u64 {
        self.last_nonce.load(Ordering::SeqCst)
    }

    /// Get current time in whole seconds since UNIX epoch.
    fn current_time_secs() -> u64 {
        u64::try_from(OffsetDateTime::now_utc().unix_timestamp()).unwrap_or_default()
    }
}

impl Default for IncreasingNonce {
    fn default() -> Self {
        Self::new()
    }
}

impl NonceProvider for IncreasingNonce {
    fn next_nonce(&self) -> u64 {
        loop {
            let last = self.last_nonce.load(Ordering::SeqCst);
            let candidate = if last == 0 { 0 } else { last + 1 };
            let next = Self::current_time_secs().max(candidate);

            if self
                .last_nonce
                .compare_exchange(last, next, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                return next;
            }
            // Another caller won the race; re-read both the counter and the clock.
        }
    }
}
