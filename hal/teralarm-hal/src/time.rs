//! Monotonic time source

/// Free-running millisecond counter
///
/// The counter wraps at `u32::MAX`. Consumers must compare instants with
/// wrapping subtraction only.
pub trait MonotonicClock {
    /// Milliseconds since an arbitrary epoch (usually boot)
    fn now_ms(&self) -> u32;
}
