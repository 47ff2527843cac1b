//! Catway-scoped Locks
//!
//! Serializes every check-then-write on one catway inside this process.
//! Different catways never wait on each other. A slot lives only while
//! someone holds or waits for it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use kernel::deadline::within;
use tokio::sync::OwnedMutexGuard;

use crate::domain::value_objects::CatwayNumber;
use crate::error::BookingResult;

type Slot = Arc<tokio::sync::Mutex<()>>;

/// Registry of one async mutex per catway number
#[derive(Debug, Default)]
pub struct CatwayLocks {
    slots: Mutex<HashMap<CatwayNumber, Slot>>,
}

/// Exclusive access to one catway, released on drop
#[derive(Debug)]
pub struct CatwayGuard<'a> {
    locks: &'a CatwayLocks,
    number: CatwayNumber,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for CatwayGuard<'_> {
    fn drop(&mut self) {
        // Unlock before sweeping so our own clone no longer counts
        drop(self.guard.take());
        self.locks.sweep(self.number);
    }
}

impl CatwayLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `number`, at most `limit`
    ///
    /// The guard releases the catway when dropped, including when the
    /// holding request is cancelled.
    pub async fn acquire(
        &self,
        number: CatwayNumber,
        limit: Duration,
    ) -> BookingResult<CatwayGuard<'_>> {
        let slot = self.slot(number);
        let locked: BookingResult<OwnedMutexGuard<()>> = within(limit, "catways.lock", async move {
            Ok(slot.lock_owned().await)
        })
        .await;

        match locked {
            Ok(guard) => Ok(CatwayGuard {
                locks: self,
                number,
                guard: Some(guard),
            }),
            Err(err) => {
                self.sweep(number);
                Err(err)
            }
        }
    }

    /// Number of catways currently held or awaited
    pub fn active_slots(&self) -> usize {
        self.map().len()
    }

    fn slot(&self, number: CatwayNumber) -> Slot {
        self.map().entry(number).or_default().clone()
    }

    /// Drop the slot for `number` once the registry holds the last reference
    fn sweep(&self, number: CatwayNumber) {
        let mut slots = self.map();
        if slots
            .get(&number)
            .is_some_and(|slot| Arc::strong_count(slot) == 1)
        {
            slots.remove(&number);
        }
    }

    fn map(&self) -> MutexGuard<'_, HashMap<CatwayNumber, Slot>> {
        // Every critical section leaves the map consistent, so a poisoned guard is still usable
        self.slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
