//! Per-date mutual exclusion
//!
//! The conflict check and the insert for a date must not interleave with
//! another check+insert for the same date. Each date gets its own async
//! mutex; different dates never contend.

use std::sync::Arc;

use chrono::NaiveDate;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::trace;

/// Lock table keyed by calendar date
#[derive(Default)]
pub struct DateLocks {
    locks: DashMap<NaiveDate, Arc<Mutex<()>>>,
}

impl DateLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `date`.
    ///
    /// Access lasts until the returned guard is dropped.
    pub async fn acquire(&self, date: NaiveDate) -> DateGuard<'_> {
        let mutex = Arc::clone(&self.locks.entry(date).or_default());
        let guard = mutex.lock_owned().await;
        trace!(%date, "Date lock acquired");
        DateGuard {
            locks: self,
            date,
            guard: Some(guard),
        }
    }

    /// Number of dates with a live lock entry
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    // Drop the entry once nobody holds or waits on it. Cloning an entry
    // happens under the same shard lock, so the count cannot change here.
    fn release(&self, date: NaiveDate) {
        self.locks
            .remove_if(&date, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}

/// Exclusive access to one date
pub struct DateGuard<'a> {
    locks: &'a DateLocks,
    date: NaiveDate,
    guard: Option<OwnedMutexGuard<()>>,
}

impl DateGuard<'_> {
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Drop for DateGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        self.locks.release(self.date);
        trace!(date = %self.date, "Date lock released");
    }
}
