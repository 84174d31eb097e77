// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quiet-period coalescing for high-frequency triggers.

/// One animation-frame interval at 60 Hz, in milliseconds.
pub const FRAME_INTERVAL_MS: f64 = 16.67;

/// Coalesces repeated triggers into a single emission after a quiet period.
///
/// Each [`DebouncedEmitter::invoke`] re-arms the deadline to `now + quiet`;
/// only the final scheduled emission fires. The emitter is headless: hosts
/// supply monotonic millisecond timestamps and call
/// [`DebouncedEmitter::poll`] from their frame callback, reacting when it
/// returns `true`. The emission carries no payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebouncedEmitter {
    quiet_ms: f64,
    deadline_ms: Option<f64>,
}

impl Default for DebouncedEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl DebouncedEmitter {
    /// Creates an emitter with the default quiet period of one frame
    /// interval ([`FRAME_INTERVAL_MS`]).
    #[must_use]
    pub const fn new() -> Self {
        Self::with_quiet_period(FRAME_INTERVAL_MS)
    }

    /// Creates an emitter with a custom quiet period in milliseconds.
    #[must_use]
    pub const fn with_quiet_period(quiet_ms: f64) -> Self {
        Self {
            quiet_ms,
            deadline_ms: None,
        }
    }

    /// Schedules (or reschedules) an emission one quiet period after `now_ms`.
    pub fn invoke(&mut self, now_ms: f64) {
        self.deadline_ms = Some(now_ms + self.quiet_ms);
    }

    /// Returns `true` if an emission is scheduled and not yet fired.
    #[must_use]
    pub const fn pending(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// Fires the scheduled emission if the quiet period has elapsed.
    ///
    /// Returns `true` at most once per armed deadline.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }

    /// Drops any scheduled emission without firing it.
    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{DebouncedEmitter, FRAME_INTERVAL_MS};

    #[test]
    fn rapid_invokes_coalesce_into_one_emission() {
        let mut emitter = DebouncedEmitter::new();

        // Five triggers spaced 5ms apart, each resetting the timer.
        for i in 0..5 {
            let now = f64::from(i) * 5.0;
            emitter.invoke(now);
            assert!(!emitter.poll(now));
        }
        let last_invoke = 20.0;

        // Just before the quiet period elapses: nothing fires.
        assert!(!emitter.poll(last_invoke + FRAME_INTERVAL_MS - 0.1));
        // At the deadline: exactly one emission, roughly one frame after the
        // last call.
        assert!(emitter.poll(last_invoke + FRAME_INTERVAL_MS));
        // And never a second one.
        assert!(!emitter.poll(last_invoke + 100.0));
        assert!(!emitter.pending());
    }

    #[test]
    fn cancel_discards_the_scheduled_emission() {
        let mut emitter = DebouncedEmitter::with_quiet_period(10.0);
        emitter.invoke(0.0);
        assert!(emitter.pending());
        emitter.cancel();
        assert!(!emitter.poll(1000.0));
    }

    #[test]
    fn poll_without_invoke_is_a_no_op() {
        let mut emitter = DebouncedEmitter::new();
        assert!(!emitter.poll(0.0));
        assert!(!emitter.pending());
    }
}
