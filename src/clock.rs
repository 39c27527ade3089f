// Clock - where the ledger gets "now" from
//
// Proposal activity is a pure function of the current time, so the time
// source is injected: wall clock in production, a manual clock in tests
// and scripted sessions.

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Source of the current time in seconds since the Unix epoch
pub trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

/// Wall clock backed by `chrono::Utc`
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        Utc::now().timestamp().max(0) as u64
    }
}

/// Manually driven clock. Clones share the same underlying time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    secs: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock frozen at `start` seconds
    pub fn new(start: u64) -> Self {
        Self {
            secs: Arc::new(AtomicU64::new(start)),
        }
    }

    /// Create a clock frozen at the current wall-clock time
    pub fn starting_now() -> Self {
        Self::new(SystemClock.now())
    }

    /// Jump to an absolute time
    pub fn set(&self, secs: u64) {
        self.secs.store(secs, Ordering::SeqCst);
    }

    /// Move time forward, saturating at `u64::MAX`
    pub fn advance(&self, secs: u64) {
        let _ = self
            .secs
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |t| {
                Some(t.saturating_add(secs))
            });
    }

    pub fn advance_minutes(&self, minutes: u64) {
        self.advance(minutes.saturating_mul(60));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.secs.load(Ordering::SeqCst)
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> u64 {
        (**self).now()
    }
}
