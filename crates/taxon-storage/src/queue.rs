//! PersistenceQueue: best-effort, latest-wins write buffer.
//!
//! Callers enqueue serialized values and never see a storage failure.
//! `flush` writes everything pending; entries that fail stay queued for the
//! next attempt unless a newer value replaced them in the meantime.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use taxon_core::traits::KeyValueStore;
use taxon_observability::tracing_setup::events;

/// Outcome of one flush pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlushReport {
    pub written: usize,
    pub failed: usize,
}

impl FlushReport {
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

pub struct PersistenceQueue {
    store: Arc<dyn KeyValueStore>,
    pending: Mutex<BTreeMap<String, String>>,
}

impl PersistenceQueue {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            pending: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Queue a value, replacing any not-yet-written value for the same key.
    pub fn enqueue(&self, key: impl Into<String>, value: String) {
        match self.pending.lock() {
            Ok(mut pending) => {
                pending.insert(key.into(), value);
            }
            Err(e) => warn!(error = %e, "persistence queue lock poisoned, value dropped"),
        }
    }

    pub fn pending_len(&self) -> usize {
        self.pending.lock().map(|p| p.len()).unwrap_or(0)
    }

    /// Write every pending value. Failures are logged and retried later.
    pub fn flush(&self) -> FlushReport {
        let batch = match self.pending.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(e) => {
                warn!(error = %e, "persistence queue lock poisoned, flush skipped");
                return FlushReport::default();
            }
        };

        let mut report = FlushReport::default();
        let mut retry = BTreeMap::new();
        for (key, value) in batch {
            match self.store.put(&key, &value) {
                Ok(()) => report.written += 1,
                Err(e) => {
                    events::persist_failed(&key, &e.to_string());
                    report.failed += 1;
                    retry.insert(key, value);
                }
            }
        }

        if !retry.is_empty() {
            if let Ok(mut pending) = self.pending.lock() {
                for (key, value) in retry {
                    pending.entry(key).or_insert(value);
                }
            }
        }
        if report.written > 0 || report.failed > 0 {
            debug!(written = report.written, failed = report.failed, "persistence flush");
        }
        report
    }
}

/// Flush `queue` every `interval` on the current tokio runtime.
///
/// The loop runs until the returned handle is aborted.
pub fn spawn_flush_loop(queue: Arc<PersistenceQueue>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let queue = Arc::clone(&queue);
            if let Err(e) = tokio::task::spawn_blocking(move || queue.flush()).await {
                warn!(error = %e, "flush task failed");
            }
        }
    })
}
