//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Live session counter

use metrics::gauge;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::warn;

/// Thread-safe count of live sessions
///
/// Every operation runs under one mutex, so concurrent increments and decrements never
/// lose an update. The value is diagnostic only; nothing decides whether to accept or
/// reject work based on it.
///
/// Counters are plain values shared through an [`Arc`], so each dispatcher (and each
/// test) owns an independent one.
#[derive(Debug, Default)]
pub struct ActiveSessionCounter {
    active: Mutex<usize>,
}

impl ActiveSessionCounter {
    /// Create a counter starting at zero
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        // A panic while holding the lock cannot leave a half-written usize behind.
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a session starting, returning the new count
    pub fn increment(&self) -> usize {
        let mut active = self.lock();
        *active += 1;
        gauge!("lineecho.sessions.active").set(*active as f64);
        *active
    }

    /// Record a session ending, returning the new count
    ///
    /// Never goes below zero; an unmatched decrement is logged and ignored.
    pub fn decrement(&self) -> usize {
        let mut active = self.lock();
        match active.checked_sub(1) {
            Some(value) => *active = value,
            None => warn!("Session counter decremented below zero, ignoring"),
        }
        gauge!("lineecho.sessions.active").set(*active as f64);
        *active
    }

    /// Current number of live sessions
    pub fn get(&self) -> usize {
        *self.lock()
    }

    /// Increment the counter and return a guard that decrements it exactly once
    pub fn enter(self: &Arc<Self>) -> SessionGuard {
        let active = self.increment();
        SessionGuard {
            counter: Arc::clone(self),
            active_on_entry: active,
            released: false,
        }
    }
}

/// Holds one slot of an [`ActiveSessionCounter`]
///
/// The slot is returned by [`SessionGuard::release`] or, failing that, on drop.
#[derive(Debug)]
pub struct SessionGuard {
    counter: Arc<ActiveSessionCounter>,
    active_on_entry: usize,
    released: bool,
}

impl SessionGuard {
    /// Counter value right after this guard's increment
    pub fn active_on_entry(&self) -> usize {
        self.active_on_entry
    }

    /// Decrement the counter now, returning the remaining count
    pub fn release(mut self) -> usize {
        self.released = true;
        self.counter.decrement()
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if !self.released {
            self.counter.decrement();
        }
    }
}
