//! Mutual exclusion for crawl runs.
//!
//! The crawl trigger and the manual `/refresh` endpoint both go through
//! [`CrawlGuard::try_lock`]. The notifier maintenance task only peeks at
//! [`CrawlGuard::is_busy`]; it never takes the guard itself, so a crawl may start
//! right after it looked. Clearing notifiers is idempotent, which makes that fine.

use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct CrawlGuard {
    busy: AtomicBool,
}

impl CrawlGuard {
    pub fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
        }
    }

    /// Switches from idle to busy. Exactly one caller wins per busy period.
    pub fn try_acquire(&self) -> bool {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Back to idle, whatever the current state.
    pub fn release(&self) {
        self.busy.store(false, Ordering::Release);
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Acquires the guard and hands out a permit that releases it on drop, so
    /// every exit path of the guarded body (errors and panics included) frees it.
    pub fn try_lock(&self) -> Option<CrawlPermit<'_>> {
        self.try_acquire().then_some(CrawlPermit { guard: self })
    }
}

/// Proof of holding the [`CrawlGuard`].
#[derive(Debug)]
pub struct CrawlPermit<'a> {
    guard: &'a CrawlGuard,
}

impl Drop for CrawlPermit<'_> {
    fn drop(&mut self) {
        self.guard.release();
    }
}
