//! Debounced, last-write-wins layout saves.
//!
//! [`DebouncedWriter`] is an explicit pending-write scheduler. It owns no
//! timer: the host passes `now` into [`DebouncedWriter::schedule`] and
//! [`DebouncedWriter::poll`] from whatever clock it has (an animation frame,
//! a runtime tick, a test). Scheduling a key that already has a pending
//! write replaces the payload and restarts the quiet period, so a burst of
//! commits produces one write.

use std::collections::BTreeMap;

use web_time::{Duration, Instant};

use crate::storage::{StorageBackend, StorageError};

#[derive(Debug, Clone)]
struct PendingWrite {
    payload: String,
    due: Instant,
}

/// Outcome of one [`DebouncedWriter::poll`] or [`DebouncedWriter::flush`].
#[derive(Debug, Default)]
pub struct SaveReport {
    /// Keys written successfully, in key order.
    pub written: Vec<String>,
    /// Keys whose write failed. The pending write is dropped; the next
    /// layout change schedules a fresh one.
    pub failed: Vec<(String, StorageError)>,
}

impl SaveReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.written.is_empty() && self.failed.is_empty()
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Coalescing save scheduler keyed by storage key.
#[derive(Debug, Clone)]
pub struct DebouncedWriter {
    quiet_period: Duration,
    pending: BTreeMap<String, PendingWrite>,
    superseded: u64,
}

impl DebouncedWriter {
    #[must_use]
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: BTreeMap::new(),
            superseded: 0,
        }
    }

    #[must_use]
    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Queue `payload` for `key`, due `quiet_period` after `now`. Replaces
    /// any pending payload for the same key.
    pub fn schedule(&mut self, key: impl Into<String>, payload: String, now: Instant) {
        let due = now + self.quiet_period;
        if self
            .pending
            .insert(key.into(), PendingWrite { payload, due })
            .is_some()
        {
            self.superseded += 1;
        }
    }

    /// Drop the pending write for `key`. Returns whether one existed.
    pub fn cancel(&mut self, key: &str) -> bool {
        self.pending.remove(key).is_some()
    }

    #[must_use]
    pub fn is_pending(&self, key: &str) -> bool {
        self.pending.contains_key(key)
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Payload currently queued for `key`.
    #[must_use]
    pub fn pending_payload(&self, key: &str) -> Option<&str> {
        self.pending.get(key).map(|w| w.payload.as_str())
    }

    /// Earliest due time among pending writes, for hosts that arm a timer.
    #[must_use]
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.values().map(|w| w.due).min()
    }

    /// How many scheduled payloads were replaced before being written.
    #[must_use]
    pub fn superseded(&self) -> u64 {
        self.superseded
    }

    /// Write every pending entry whose quiet period has elapsed at `now`.
    pub fn poll<S>(&mut self, now: Instant, storage: &mut S) -> SaveReport
    where
        S: StorageBackend + ?Sized,
    {
        let due: Vec<String> = self
            .pending
            .iter()
            .filter(|(_, w)| w.due <= now)
            .map(|(key, _)| key.clone())
            .collect();
        self.write_keys(due, storage)
    }

    /// Write every pending entry now, regardless of due time.
    pub fn flush<S>(&mut self, storage: &mut S) -> SaveReport
    where
        S: StorageBackend + ?Sized,
    {
        let keys: Vec<String> = self.pending.keys().cloned().collect();
        self.write_keys(keys, storage)
    }

    /// Write the pending entry for one key now, if there is one.
    pub fn flush_key<S>(&mut self, key: &str, storage: &mut S) -> SaveReport
    where
        S: StorageBackend + ?Sized,
    {
        let keys = if self.is_pending(key) {
            vec![key.to_owned()]
        } else {
            Vec::new()
        };
        self.write_keys(keys, storage)
    }

    fn write_keys<S>(&mut self, keys: Vec<String>, storage: &mut S) -> SaveReport
    where
        S: StorageBackend + ?Sized,
    {
        let mut report = SaveReport::default();
        for key in keys {
            let Some(write) = self.pending.remove(&key) else {
                continue;
            };
            match storage.set(&key, &write.payload) {
                Ok(()) => report.written.push(key),
                Err(err) => report.failed.push((key, err)),
            }
        }
        report
    }
}
