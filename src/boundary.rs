//! Boundary slots: single-writer, multi-reader rendezvous cells
//!
//! Each lane owns one [`BoundarySlot`]. The lane publishes its median there
//! exactly once; its left and right neighbors block in [`BoundarySlot::wait`]
//! until the value shows up. The mutex/condvar pair makes the publish
//! happen-before every successful `wait` return.
//!
//! # Liveness
//!
//! There is no timeout and no deadlock detection. If the owning lane never
//! publishes, every waiter blocks forever. That happens when the lane panics
//! during selection, and also when its thread never starts: if the OS
//! refuses to spawn lane `i` (plausible with a very large lane count), the
//! lanes already running wait on slot `i` and the parallel coordinator never
//! returns. Callers that need bounded latency must keep the lane count within
//! what the host can spawn and make sure every lane reaches its publish.

use parking_lot::{Condvar, Mutex};
use thiserror::Error;

/// Errors that can occur when publishing a boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoundaryError<T> {
    #[error("boundary already published as {previous:?}")]
    AlreadyPublished { previous: T },
}

/// A one-shot cell holding a lane's boundary value
#[derive(Debug)]
pub struct BoundarySlot<T> {
    value: Mutex<Option<T>>,
    published: Condvar,
}

impl<T> BoundarySlot<T> {
    /// Create an empty slot
    pub fn new() -> Self {
        Self {
            value: Mutex::new(None),
            published: Condvar::new(),
        }
    }
}

impl<T> Default for BoundarySlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + std::fmt::Debug> BoundarySlot<T> {
    /// Publish the boundary and wake every waiter
    ///
    /// A second publish is rejected and the first value is kept.
    pub fn publish(&self, value: T) -> Result<(), BoundaryError<T>> {
        let mut guard = self.value.lock();
        if let Some(previous) = *guard {
            return Err(BoundaryError::AlreadyPublished { previous });
        }
        *guard = Some(value);
        self.published.notify_all();
        Ok(())
    }

    /// Block until the boundary is published, then return it
    pub fn wait(&self) -> T {
        let mut guard = self.value.lock();
        loop {
            if let Some(value) = *guard {
                return value;
            }
            self.published.wait(&mut guard);
        }
    }

    /// Return the boundary if it has been published
    pub fn try_get(&self) -> Option<T> {
        *self.value.lock()
    }

    /// Returns true once the boundary has been published
    pub fn is_published(&self) -> bool {
        self.value.lock().is_some()
    }
}

/// One boundary slot per lane
#[derive(Debug)]
pub struct BoundarySlots<T> {
    slots: Vec<BoundarySlot<T>>,
}

impl<T> BoundarySlots<T> {
    /// Create `lane_count` empty slots
    pub fn new(lane_count: usize) -> Self {
        Self {
            slots: (0..lane_count).map(|_| BoundarySlot::new()).collect(),
        }
    }

    /// Slot owned by `lane`
    ///
    /// # Panics
    ///
    /// Panics if `lane` is out of range.
    pub fn get(&self, lane: usize) -> &BoundarySlot<T> {
        &self.slots[lane]
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if there are no slots
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
