// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Schedule: cooperative scheduling of incremental paint workers.
//!
//! A [`RenderScheduler`] owns a fixed set of *paint workers*. Each worker is
//! a closure over a shared mutable context that performs one bounded unit of
//! work (one row, one batch of header cells) and reports whether it did
//! anything. The scheduler drives repeated *scheduling turns* — one
//! invocation of every worker, in registration order — until a turn where no
//! worker reports work, then goes idle. Invalidation re-arms it.
//!
//! There is no thread and no timer in here: hosts call
//! [`RenderScheduler::run_turn`] from their own frame or idle callback on
//! the single UI-owning thread. Yielding between turns is what keeps large
//! paints from blocking the host; a worker invocation itself is never
//! preempted, so every worker observes a consistent context snapshot for the
//! duration of its own run.
//!
//! ```rust
//! use trellis_schedule::{RenderScheduler, Turn};
//!
//! let mut scheduler: RenderScheduler<u32> = RenderScheduler::new();
//! scheduler.add_worker(100, |painted: &mut u32| {
//!     // Pretend each turn paints one row, three rows in total.
//!     if *painted < 3 {
//!         *painted += 1;
//!         true
//!     } else {
//!         false
//!     }
//! });
//! scheduler.start();
//!
//! let mut painted = 0_u32;
//! while scheduler.run_turn(&mut painted) == Turn::Worked {}
//! assert_eq!(painted, 3);
//! assert!(!scheduler.is_armed());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use smallvec::SmallVec;

/// Outcome of one scheduling turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// At least one worker performed paint work; more may remain.
    Worked,
    /// No worker performed work. The scheduler is now idle (or was not
    /// armed to begin with).
    Idle,
}

/// Lifecycle state of a [`RenderScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Armed: the next `run_turn` call will run the workers.
    Armed,
    /// All workers reported no work on the last turn; waiting for an
    /// invalidation.
    Idle,
    /// Permanently stopped; turns are no-ops from now on.
    Stopped,
}

struct WorkerSlot<Cx: ?Sized> {
    /// Relative time-budget hint supplied at registration. Carried as data
    /// for hosts that spread turns across frames; the bounded unit of work
    /// inside each worker is what actually limits per-turn cost.
    weight: u32,
    run: Box<dyn FnMut(&mut Cx) -> bool>,
}

/// Runs registered paint workers across repeated cooperative turns.
///
/// Workers run in registration order within a turn. A worker returns `true`
/// if it performed paint work this invocation (more may remain), `false`
/// otherwise.
pub struct RenderScheduler<Cx: ?Sized> {
    workers: SmallVec<[WorkerSlot<Cx>; 4]>,
    state: State,
}

impl<Cx: ?Sized> core::fmt::Debug for RenderScheduler<Cx> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RenderScheduler")
            .field("workers", &self.workers.len())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<Cx: ?Sized> Default for RenderScheduler<Cx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Cx: ?Sized> RenderScheduler<Cx> {
    /// Creates a scheduler with no workers, not yet armed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            workers: SmallVec::new(),
            state: State::Idle,
        }
    }

    /// Registers a worker with a relative time-budget hint.
    ///
    /// Workers run in registration order on every turn.
    pub fn add_worker(&mut self, weight: u32, worker: impl FnMut(&mut Cx) -> bool + 'static) {
        self.workers.push(WorkerSlot {
            weight,
            run: Box::new(worker),
        });
    }

    /// Number of registered workers.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// The time-budget hints of the registered workers, in order.
    pub fn weights(&self) -> impl Iterator<Item = u32> {
        self.workers.iter().map(|slot| slot.weight)
    }

    /// Arms the scheduler so the next [`RenderScheduler::run_turn`] runs the
    /// workers.
    pub fn start(&mut self) {
        if self.state != State::Stopped {
            self.state = State::Armed;
        }
    }

    /// Re-arms an idle scheduler (new range committed, cache invalidated).
    ///
    /// A no-op after [`RenderScheduler::stop`].
    pub fn invalidate(&mut self) {
        self.start();
    }

    /// Permanently halts the scheduler; any in-flight turn has already
    /// completed its current worker invocation by the time this can run.
    pub fn stop(&mut self) {
        self.state = State::Stopped;
    }

    /// Returns `true` if the next turn will run the workers.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.state == State::Armed
    }

    /// Returns `true` once [`RenderScheduler::stop`] has been called.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.state == State::Stopped
    }

    /// Runs one scheduling turn: every worker once, in registration order.
    ///
    /// If no worker reports work the scheduler transitions to idle and
    /// further turns are no-ops until [`RenderScheduler::invalidate`].
    pub fn run_turn(&mut self, cx: &mut Cx) -> Turn {
        if self.state != State::Armed {
            return Turn::Idle;
        }

        let mut worked = false;
        for slot in &mut self.workers {
            worked |= (slot.run)(cx);
        }

        if worked {
            Turn::Worked
        } else {
            self.state = State::Idle;
            Turn::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{RenderScheduler, Turn};

    #[derive(Default)]
    struct Cx {
        order: Vec<&'static str>,
        rows_left: u32,
        painted: u32,
    }

    #[test]
    fn converges_to_idle_when_workers_run_dry() {
        let mut scheduler: RenderScheduler<Cx> = RenderScheduler::new();
        scheduler.add_worker(800, |cx: &mut Cx| {
            cx.order.push("header");
            false
        });
        scheduler.add_worker(1000, |cx: &mut Cx| {
            cx.order.push("body");
            if cx.rows_left > 0 {
                cx.rows_left -= 1;
                cx.painted += 1;
                true
            } else {
                false
            }
        });
        scheduler.start();

        let mut cx = Cx {
            rows_left: 3,
            ..Cx::default()
        };

        let mut turns = 0;
        while scheduler.run_turn(&mut cx) == Turn::Worked {
            turns += 1;
        }
        // Three working turns plus the final all-idle turn.
        assert_eq!(turns, 3);
        assert_eq!(cx.painted, 3);
        assert!(!scheduler.is_armed());

        // Idle scheduler: further turns do not invoke workers.
        let calls = cx.order.len();
        assert_eq!(scheduler.run_turn(&mut cx), Turn::Idle);
        assert_eq!(cx.order.len(), calls);
    }

    #[test]
    fn workers_run_in_registration_order() {
        let mut scheduler: RenderScheduler<Cx> = RenderScheduler::new();
        scheduler.add_worker(1, |cx: &mut Cx| {
            cx.order.push("first");
            false
        });
        scheduler.add_worker(2, |cx: &mut Cx| {
            cx.order.push("second");
            false
        });
        scheduler.start();

        let mut cx = Cx::default();
        scheduler.run_turn(&mut cx);
        assert_eq!(cx.order, ["first", "second"]);
        assert_eq!(scheduler.worker_count(), 2);
        assert!(scheduler.weights().eq([1, 2]));
    }

    #[test]
    fn invalidate_rearms_an_idle_scheduler() {
        let mut scheduler: RenderScheduler<Cx> = RenderScheduler::new();
        scheduler.add_worker(1, |cx: &mut Cx| {
            if cx.rows_left > 0 {
                cx.rows_left -= 1;
                true
            } else {
                false
            }
        });
        scheduler.start();

        let mut cx = Cx::default();
        assert_eq!(scheduler.run_turn(&mut cx), Turn::Idle);
        assert!(!scheduler.is_armed());

        cx.rows_left = 1;
        scheduler.invalidate();
        assert!(scheduler.is_armed());
        assert_eq!(scheduler.run_turn(&mut cx), Turn::Worked);
    }

    #[test]
    fn stop_is_permanent() {
        let mut scheduler: RenderScheduler<Cx> = RenderScheduler::new();
        scheduler.add_worker(1, |_: &mut Cx| true);
        scheduler.start();
        scheduler.stop();
        assert!(scheduler.is_stopped());

        let mut cx = Cx::default();
        assert_eq!(scheduler.run_turn(&mut cx), Turn::Idle);
        scheduler.invalidate();
        assert!(!scheduler.is_armed());
        assert_eq!(scheduler.run_turn(&mut cx), Turn::Idle);
    }
}
