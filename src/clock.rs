//! Time sources for accrual
//!
//! The vault never reads wall-clock time directly. It asks a [`Clock`] for
//! the current unix timestamp in seconds, which lets tests move time forward
//! deterministically with [`ManualClock`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

/// Supplies the current time as unix seconds
pub trait Clock {
    fn now(&self) -> u64;
}

/// Wall-clock time from the system
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        // Timestamps before 1970 clamp to zero
        Utc::now().timestamp().max(0) as u64
    }
}

/// Manually advanced clock
///
/// Clones share the same underlying time, so a test can keep one handle
/// while the vault owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start)),
        }
    }

    /// Move time forward by `secs`
    pub fn advance(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }

    /// Jump to an absolute timestamp
    pub fn set(&self, timestamp: u64) {
        self.now.store(timestamp, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}
