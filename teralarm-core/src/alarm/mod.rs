//! Alarm session: disarm challenge, snooze countdown and snooze alert

pub mod session;
pub mod snooze;

pub use session::{AlarmConfig, AlarmSession, SessionOutcome, SessionPhase};
pub use snooze::SnoozeCountdown;

/// Supplies the button the user must press next
pub trait TargetSource {
    /// Next target button number, 1-4
    fn next_target(&mut self) -> u8;
}

/// Xorshift pseudo-random generator
///
/// Seeded from the RTC when the alarm goes off, so the challenge sequence
/// differs every morning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    pub fn new(seed: u32) -> Self {
        // zero is a fixed point of xorshift
        let state = if seed == 0 { 0x9E37_79B9 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

impl TargetSource for XorShift32 {
    fn next_target(&mut self) -> u8 {
        (self.next_u32() % 4) as u8 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_in_range_and_varied() {
        let mut rng = XorShift32::new(1_710_399_600);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let t = rng.next_target();
            assert!((1..=4).contains(&t));
            seen[usize::from(t - 1)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_zero_seed_not_stuck() {
        let mut rng = XorShift32::new(0);
        assert_ne!(rng.next_u32(), 0);
    }
}
