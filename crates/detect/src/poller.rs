//! State poller - background thread that re-resolves the lock state.
//!
//! For contexts without transition notifications (extensions), polling is
//! the only way to learn about changes.

use lockwatch_context::ScreenState;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Default polling interval for state changes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Callback type for polled state changes. May receive `Unknown`.
pub type StateCallback = Arc<dyn Fn(ScreenState) + Send + Sync + 'static>;

/// Anything that can answer the current lock state.
pub trait StateSource: Send + Sync {
    fn current_state(&self) -> ScreenState;
}

/// Background poller for lock state changes.
pub struct StatePoller {
    running: Arc<AtomicBool>,
    handle: Option<std::thread::JoinHandle<()>>,
}

impl Default for StatePoller {
    fn default() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }
}

impl StatePoller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start polling with the given source and callback.
    pub fn start<S>(&mut self, source: Arc<S>, callback: StateCallback)
    where
        S: StateSource + ?Sized + 'static,
    {
        self.start_with_interval(source, callback, DEFAULT_POLL_INTERVAL);
    }

    /// Start polling with a custom interval.
    ///
    /// The callback fires once with the initial state, then on every change.
    pub fn start_with_interval<S>(
        &mut self,
        source: Arc<S>,
        callback: StateCallback,
        interval: Duration,
    ) where
        S: StateSource + ?Sized + 'static,
    {
        if self.running.load(Ordering::SeqCst) {
            tracing::warn!("StatePoller already running");
            return;
        }

        self.running.store(true, Ordering::SeqCst);
        let running = Arc::clone(&self.running);

        let handle = std::thread::spawn(move || {
            tracing::info!("StatePoller started with interval {:?}", interval);

            let mut last_state: Option<ScreenState> = None;

            while running.load(Ordering::SeqCst) {
                let state = source.current_state();

                if last_state != Some(state) {
                    tracing::debug!(%state, previous = ?last_state, "screen state changed");
                    callback(state);
                    last_state = Some(state);
                }

                std::thread::sleep(interval);
            }

            tracing::info!("StatePoller stopped");
        });

        self.handle = Some(handle);
    }

    /// Stop the poller. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);

        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for StatePoller {
    fn drop(&mut self) {
        self.stop();
    }
}
