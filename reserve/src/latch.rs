//! Entry latch: mint-wide reentrancy exclusion.
//!
//! One latch guards every mint entry point of an engine. It is engaged for
//! the whole of a top-level mint call, so a nested call into any mint entry
//! point (for any token id) observes it engaged and is turned away.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::MintError;

#[derive(Debug, Default)]
pub struct EntryLatch {
    engaged: AtomicBool,
}

impl EntryLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engage the latch, or fail with [`MintError::ReentrantCall`] if a mint
    /// is already in flight. The latch is released when the returned guard
    /// drops, on every exit path.
    pub fn enter(&self) -> Result<LatchGuard<'_>, MintError> {
        self.engaged
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| MintError::ReentrantCall)?;
        Ok(LatchGuard { latch: self })
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged.load(Ordering::Acquire)
    }
}

/// Proof that the latch is held. Releases it on drop.
#[derive(Debug)]
pub struct LatchGuard<'a> {
    latch: &'a EntryLatch,
}

impl Drop for LatchGuard<'_> {
    fn drop(&mut self) {
        self.latch.engaged.store(false, Ordering::Release);
    }
}
