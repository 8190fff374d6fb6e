//! Monotonic clock backed by the embassy time driver

use embassy_time::Instant;

/// Millisecond counter derived from [`Instant::now`]
///
/// Truncated to 32 bits, so it wraps roughly every 49.7 days like the
/// counter the interaction engine expects.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbassyClock;

impl teralarm_hal::MonotonicClock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}
