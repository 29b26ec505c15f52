//! Thread and lock primitives used by the audio worker.
//!
//! [`WorkerTask`] is a named, joinable background thread; [`SharedState`] is a mutex paired with
//! a condition variable so a waiter can sleep until a deadline and still be woken early.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use std::time::Instant;

use crate::foundation::error::{AvgenError, AvgenResult};

/// A joinable background thread.
#[derive(Debug)]
pub(crate) struct WorkerTask {
    name: String,
    handle: JoinHandle<()>,
}

impl WorkerTask {
    /// Spawn `task` on a new named thread.
    pub(crate) fn spawn<F>(name: &str, task: F) -> AvgenResult<Self>
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = std::thread::Builder::new()
            .name(name.to_string())
            .spawn(task)
            .map_err(|e| AvgenError::worker(format!("failed to spawn thread '{name}': {e}")))?;
        Ok(Self {
            name: name.to_string(),
            handle,
        })
    }

    /// Block until the thread exits. There is no timeout.
    pub(crate) fn join(self) -> AvgenResult<()> {
        self.handle
            .join()
            .map_err(|_| AvgenError::worker(format!("thread '{}' panicked", self.name)))
    }
}

/// State shared between threads behind a single lock.
#[derive(Debug, Default)]
pub(crate) struct SharedState<T> {
    value: Mutex<T>,
    wake: Condvar,
}

impl<T> SharedState<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            value: Mutex::new(value),
            wake: Condvar::new(),
        }
    }

    /// Lock the shared value.
    ///
    /// A panic on the other side cannot leave the guarded value half-written, so poisoning is
    /// ignored.
    pub(crate) fn lock(&self) -> MutexGuard<'_, T> {
        self.value.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mutate the value under the lock and wake any waiter.
    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let out = f(&mut self.lock());
        self.wake.notify_all();
        out
    }

    /// Sleep until `deadline` unless `done` becomes true first.
    ///
    /// Returns `true` when `done` held. The lock is released while sleeping.
    pub(crate) fn wait_until(&self, deadline: Instant, mut done: impl FnMut(&T) -> bool) -> bool {
        let mut guard = self.lock();
        loop {
            if done(&guard) {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            let (next, _) = self
                .wake
                .wait_timeout(guard, deadline - now)
                .unwrap_or_else(PoisonError::into_inner);
            guard = next;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/task.rs"]
mod tests;
