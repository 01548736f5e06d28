//! Clock abstraction for hosts that drive a deck.
//!
//! The deck itself never reads time: hosts pass frame times in nanoseconds,
//! the same way frame callbacks receive them. These clocks produce those
//! timestamps for real hosts and for deterministic tests.

use std::cell::Cell;

use web_time::Instant;

/// Provides monotonic frame timestamps.
pub trait Clock {
    /// Nanoseconds elapsed since the clock's origin.
    fn now_nanos(&self) -> u64;

    /// Milliseconds elapsed since the clock's origin.
    fn now_millis(&self) -> i64 {
        (self.now_nanos() / 1_000_000) as i64
    }
}

/// Wall clock backed by `web_time::Instant`, usable on native and wasm hosts.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_nanos(&self) -> u64 {
        self.origin.elapsed().as_nanos() as u64
    }
}

/// Clock advanced by hand.
#[derive(Debug, Default)]
pub struct ManualClock {
    nanos: Cell<u64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_nanos(&self, nanos: u64) -> u64 {
        let next = self.nanos.get().saturating_add(nanos);
        self.nanos.set(next);
        next
    }

    pub fn advance_millis(&self, millis: u64) -> u64 {
        self.advance_nanos(millis.saturating_mul(1_000_000))
    }
}

impl Clock for ManualClock {
    fn now_nanos(&self) -> u64 {
        self.nanos.get()
    }
}
