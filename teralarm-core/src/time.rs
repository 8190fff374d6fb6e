//! Non-blocking timing primitives
//!
//! Every timeout in the engine is a comparison against the wrapping
//! millisecond counter. Only unsigned wrapping subtraction is used, so a
//! counter rollover never produces a stale or negative delta.

/// Milliseconds from `since` to `now`, tolerant of counter wrap
#[inline]
pub fn elapsed(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

/// Periodic gate for redraws, blinks and tone toggles
///
/// A fresh interval is due immediately, so the first check paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Interval {
    period: u32,
    last: u32,
    due: bool,
}

impl Interval {
    /// Create an interval firing every `period` milliseconds
    pub const fn new(period: u32) -> Self {
        Self {
            period,
            last: 0,
            due: true,
        }
    }

    /// Period in milliseconds
    pub fn period(&self) -> u32 {
        self.period
    }

    /// Returns true at most once per period, re-arming from `now`
    pub fn ready(&mut self, now: u32) -> bool {
        if self.due || elapsed(now, self.last) >= self.period {
            self.due = false;
            self.last = now;
            true
        } else {
            false
        }
    }

    /// Make the next `ready` call fire regardless of elapsed time
    pub fn expire(&mut self) {
        self.due = true;
    }

    /// Start a full period from `now`
    pub fn restart(&mut self, now: u32) {
        self.due = false;
        self.last = now;
    }
}
