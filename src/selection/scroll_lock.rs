//! Page scroll lock held while an overlay is open

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared scroll lock for one page
///
/// The page is locked while at least one [`ScrollLockGuard`] is alive.
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    holders: Arc<AtomicUsize>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock page scrolling until the returned guard is dropped
    pub fn acquire(&self) -> ScrollLockGuard {
        self.holders.fetch_add(1, Ordering::SeqCst);
        ScrollLockGuard {
            holders: Arc::clone(&self.holders),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.holders.load(Ordering::SeqCst) > 0
    }
}

/// Releases its hold on the scroll lock when dropped
#[derive(Debug)]
#[must_use = "the scroll lock is released as soon as the guard is dropped"]
pub struct ScrollLockGuard {
    holders: Arc<AtomicUsize>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.holders.fetch_sub(1, Ordering::SeqCst);
    }
}
