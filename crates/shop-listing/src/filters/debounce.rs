//! Debounced search input.
//!
//! Each keystroke replaces the pending timer. Only the text of the last
//! keystroke inside the quiet period is delivered. Dropping the debouncer
//! aborts the pending timer so nothing fires after the owning view is gone.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Quiet period between the last keystroke and the search update.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Cancellable timer that delivers the most recent search text.
#[derive(Debug)]
pub struct SearchDebounce {
    delay: Duration,
    /// Incremented on every push or cancel; deliveries from older timers are
    /// discarded.
    generation: u64,
    pending: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<(u64, String)>,
    rx: mpsc::UnboundedReceiver<(u64, String)>,
}

impl Default for SearchDebounce {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE)
    }
}

impl SearchDebounce {
    pub fn new(delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            delay,
            generation: 0,
            pending: None,
            tx,
            rx,
        }
    }

    /// Restart the timer with `text` as the value to deliver.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn push(&mut self, text: String) {
        self.cancel();

        let generation = self.generation;
        let delay = self.delay;
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver lives as long as the debouncer; a closed channel
            // only means it was dropped, which already aborted this task.
            let _ = tx.send((generation, text));
        }));
    }

    /// Drop the pending timer, if any.
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a keystroke is waiting to be delivered.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Wait for the pending timer and return its text.
    ///
    /// Returns `None` immediately when nothing is pending.
    pub async fn settled(&mut self) -> Option<String> {
        while self.pending.is_some() {
            let (generation, text) = self.rx.recv().await?;
            if generation == self.generation {
                self.pending = None;
                return Some(text);
            }
            tracing::trace!(generation, "Discarding superseded search text");
        }
        None
    }
}

impl Drop for SearchDebounce {
    fn drop(&mut self) {
        self.cancel();
    }
}
