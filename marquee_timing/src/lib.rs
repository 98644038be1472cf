// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marquee Timing: host-agnostic timer slots.
//!
//! A [`Timer`] is one cancellable scheduled-task handle. It never owns a
//! clock: callers pass `now` (milliseconds on any monotonic host clock) into
//! every operation, which keeps state machines built on top of it
//! deterministic under test.
//!
//! Each logical timer in a component is a single `Timer` value:
//! - [`Timer::schedule`] replaces any pending deadline, so timers never stack.
//! - [`Timer::cancel`] disarms synchronously; a cancelled timer can never fire
//!   into a stale state.
//! - [`Timer::poll`] reports expiry exactly once per arming.
//!
//! ## Minimal example
//!
//! ```rust
//! use marquee_timing::Timer;
//!
//! let mut timer = Timer::new();
//! timer.schedule(1_000, 500);
//!
//! assert!(!timer.poll(1_200));
//! assert!(timer.poll(1_500));
//! // Fired timers disarm themselves.
//! assert!(!timer.poll(2_000));
//!
//! // Rescheduling cancels the previous deadline.
//! timer.schedule(2_000, 100);
//! timer.schedule(2_000, 1_000);
//! assert!(!timer.poll(2_100));
//! assert!(timer.poll(3_000));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

/// A single cancellable deadline.
#[derive(Clone, Debug, Default)]
pub struct Timer {
    deadline: Option<u64>,
}

impl Timer {
    /// Creates a disarmed timer.
    #[must_use]
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Arms the timer to fire `delay` milliseconds after `now`.
    ///
    /// Any pending deadline is cancelled first.
    pub fn schedule(&mut self, now: u64, delay: u64) {
        self.deadline = Some(now.saturating_add(delay));
    }

    /// Disarms the timer. Returns `true` if a deadline was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Returns `true` exactly once when `now` has reached the deadline.
    ///
    /// The timer disarms itself when it fires.
    pub fn poll(&mut self, now: u64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Returns the pending deadline, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }
}
