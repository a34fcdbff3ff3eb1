//! Nullable pause flag.

use std::sync::atomic::{AtomicBool, Ordering};

use tessera_store::PauseFlag;

#[derive(Default)]
pub struct NullPause {
    paused: AtomicBool,
}

impl NullPause {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    pub fn unpause(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }
}

impl PauseFlag for NullPause {
    fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }
}
