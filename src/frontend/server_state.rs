use std::sync::atomic::{AtomicBool, Ordering};

/// Server-wide shutdown flag checked by the accept loop and request paths.
#[derive(Default)]
pub struct ServerState {
    shutdown: AtomicBool,
}

impl ServerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    pub fn signal_shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
    }
}
