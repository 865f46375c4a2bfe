use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared run flag. Starts running; `stop()` flips it to stopped for good.
///
/// Workers poll it once per cycle, so a stop is observed at the top of the
/// next cycle, never in the middle of one.
#[derive(Clone, Debug)]
pub struct RunningSignal {
    running: Arc<AtomicBool>,
}

impl RunningSignal {
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Idempotent.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }
}

impl Default for RunningSignal {
    fn default() -> Self {
        Self::new()
    }
}
