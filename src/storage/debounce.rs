//! Debounced writes
//!
//! `DebouncedWriter` owns a background thread that performs saves. Each
//! `schedule` call replaces the pending value for its key and pushes the key's
//! deadline out by the debounce delay, so only the last value of a burst is
//! written. Scheduling never waits on I/O.
//!
//! Draining and writing happen under a dedicated I/O lock, which keeps writes
//! for a key in scheduling order even when `flush` races the worker.

use super::{KeyValueStore, StoreError};
use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Default delay before a scheduled value is written
pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

struct PendingWrite {
    value: String,
    due: Instant,
}

#[derive(Default)]
struct Pending {
    writes: HashMap<String, PendingWrite>,
    shutdown: bool,
}

impl Pending {
    fn next_due(&self) -> Option<Instant> {
        self.writes.values().map(|w| w.due).min()
    }

    fn take_due(&mut self, now: Instant) -> Vec<(String, String)> {
        let due: Vec<String> = self
            .writes
            .iter()
            .filter(|(_, w)| w.due <= now)
            .map(|(key, _)| key.clone())
            .collect();
        due.into_iter()
            .filter_map(|key| self.writes.remove(&key).map(|w| (key, w.value)))
            .collect()
    }

    fn take_all(&mut self) -> Vec<(String, String)> {
        self.writes.drain().map(|(key, w)| (key, w.value)).collect()
    }
}

struct Shared {
    store: Arc<dyn KeyValueStore>,
    delay: Duration,
    pending: Mutex<Pending>,
    io: Mutex<()>,
    wake: Condvar,
}

impl Shared {
    fn lock_pending(&self) -> Result<MutexGuard<'_, Pending>, StoreError> {
        self.pending.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Drain entries chosen by `take` and write them, returning the first error
    fn write_batch(
        &self,
        take: impl FnOnce(&mut Pending) -> Vec<(String, String)>,
    ) -> Result<usize, StoreError> {
        let _io = self.io.lock().map_err(|_| StoreError::Poisoned)?;
        let batch = take(&mut *self.lock_pending()?);

        let mut first_error = None;
        let written = batch.len();
        for (key, value) in batch {
            match self.store.save(&key, &value) {
                Ok(()) => tracing::debug!(key = %key, bytes = value.len(), "saved state"),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "failed to save state");
                    first_error.get_or_insert(e);
                }
            }
        }

        first_error.map_or(Ok(written), Err)
    }

    fn run(&self) {
        loop {
            match self.wait_for_due() {
                Ok(true) => {}
                Ok(false) => return,
                Err(e) => {
                    tracing::error!(error = %e, "debounced writer stopped");
                    return;
                }
            }
            // failures are already logged per key
            let _ = self.write_batch(|pending| pending.take_due(Instant::now()));
        }
    }

    /// Block until some write is due; `Ok(false)` means shut down
    fn wait_for_due(&self) -> Result<bool, StoreError> {
        let mut pending = self.lock_pending()?;
        loop {
            if pending.shutdown {
                return Ok(false);
            }
            let now = Instant::now();
            pending = match pending.next_due() {
                Some(due) if due <= now => return Ok(true),
                Some(due) => {
                    self.wake
                        .wait_timeout(pending, due - now)
                        .map_err(|_| StoreError::Poisoned)?
                        .0
                }
                None => self.wake.wait(pending).map_err(|_| StoreError::Poisoned)?,
            };
        }
    }
}

/// Coalescing, fire-and-forget writer in front of a `KeyValueStore`
///
/// Dropping the writer stops the worker and writes anything still pending.
pub struct DebouncedWriter {
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
}

impl DebouncedWriter {
    /// Start a writer with the given debounce delay
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the worker thread cannot be spawned.
    pub fn new(store: Arc<dyn KeyValueStore>, delay: Duration) -> Result<Self, StoreError> {
        let shared = Arc::new(Shared {
            store,
            delay,
            pending: Mutex::new(Pending::default()),
            io: Mutex::new(()),
            wake: Condvar::new(),
        });

        let worker_shared = Arc::clone(&shared);
        let worker = thread::Builder::new()
            .name("dewit-writer".into())
            .spawn(move || worker_shared.run())?;

        Ok(Self {
            shared,
            worker: Some(worker),
        })
    }

    /// Queue `value` for `key`, superseding any pending value for that key
    pub fn schedule(&self, key: &str, value: String) {
        let due = Instant::now() + self.shared.delay;
        match self.shared.lock_pending() {
            Ok(mut pending) => {
                pending
                    .writes
                    .insert(key.to_string(), PendingWrite { value, due });
                self.shared.wake.notify_one();
                tracing::trace!(key, "scheduled save");
            }
            Err(e) => tracing::error!(key, error = %e, "could not schedule save"),
        }
    }

    /// Number of keys waiting to be written
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.shared
            .lock_pending()
            .map_or(0, |pending| pending.writes.len())
    }

    /// Write every pending value now, on the calling thread
    ///
    /// Returns the number of keys written.
    ///
    /// # Errors
    ///
    /// Returns the first `StoreError` hit; remaining keys are still attempted.
    pub fn flush(&self) -> Result<usize, StoreError> {
        self.shared.write_batch(Pending::take_all)
    }
}

impl Drop for DebouncedWriter {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.shared.lock_pending() {
            pending.shutdown = true;
        }
        self.shared.wake.notify_all();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
        if let Err(e) = self.flush() {
            tracing::warn!(error = %e, "pending state was not fully saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::testing::wait_until;

    const PATIENCE: Duration = Duration::from_secs(10);

    fn writer(delay_ms: u64) -> (Arc<MemoryStore>, DebouncedWriter) {
        let store = Arc::new(MemoryStore::new());
        let writer = DebouncedWriter::new(store.clone(), Duration::from_millis(delay_ms)).unwrap();
        (store, writer)
    }

    #[test]
    fn test_burst_coalesces_into_one_write() {
        let (store, writer) = writer(200);
        for i in 0..10 {
            writer.schedule("tried", i.to_string());
        }

        assert!(wait_until(PATIENCE, || store.save_count() > 0));
        assert_eq!(store.save_count(), 1);
        assert_eq!(store.load("tried").unwrap().as_deref(), Some("9"));
        assert_eq!(writer.pending_count(), 0);
    }

    #[test]
    fn test_keys_are_debounced_independently() {
        let (store, writer) = writer(50);
        writer.schedule("tried", "[]".into());
        writer.schedule("filters", "{}".into());

        assert!(wait_until(PATIENCE, || store.save_count() == 2));
        assert!(store.load("tried").unwrap().is_some());
        assert!(store.load("filters").unwrap().is_some());
    }

    #[test]
    fn test_later_schedule_resets_deadline() {
        let delay = Duration::from_millis(300);
        let store = Arc::new(MemoryStore::new());
        let writer = DebouncedWriter::new(store.clone(), delay).unwrap();

        writer.schedule("tried", "first".into());
        thread::sleep(Duration::from_millis(20));
        let rescheduled = Instant::now();
        writer.schedule("tried", "second".into());

        assert!(wait_until(PATIENCE, || store.save_count() > 0));
        assert!(rescheduled.elapsed() >= delay);
        assert_eq!(store.save_count(), 1);
        assert_eq!(store.load("tried").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_flush_writes_immediately() {
        let (store, writer) = writer(10_000);
        writer.schedule("tried", r#"["Voltage"]"#.into());
        assert_eq!(writer.pending_count(), 1);

        assert_eq!(writer.flush().unwrap(), 1);
        assert_eq!(store.load("tried").unwrap().as_deref(), Some(r#"["Voltage"]"#));
        assert_eq!(writer.pending_count(), 0);
        assert_eq!(writer.flush().unwrap(), 0);
    }

    #[test]
    fn test_drop_flushes_pending_writes() {
        let (store, writer) = writer(10_000);
        writer.schedule("filters", r#"{"excludeDiet":true}"#.into());
        drop(writer);

        assert_eq!(store.save_count(), 1);
        assert!(store.load("filters").unwrap().is_some());
    }

    #[test]
    fn test_default_delay() {
        assert_eq!(DEFAULT_DELAY, Duration::from_millis(100));
    }
}
