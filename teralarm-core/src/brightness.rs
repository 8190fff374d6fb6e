//! Backlight control
//!
//! In automatic mode the backlight follows the ambient light: the sampler
//! tracks the darkest and brightest readings of each one-second window and
//! writes the curve value of their midpoint when the window closes.

use crate::board::Board;
use crate::time::elapsed;

/// Length of a light-sampling window
pub const WINDOW_MS: u32 = 1000;

/// Backlight duty used while the alarm demands attention
pub const MAX_DUTY: u8 = 255;

/// Highest manual brightness level
pub const MAX_LEVEL: u8 = 17;

/// Readings at or above this are full brightness
const CURVE_HIGH: u16 = 729;

/// Readings at or below this are minimum brightness
const CURVE_LOW: u16 = 110;

/// Reciprocal response of the backlight to a light-sensor reading
///
/// `round(100 / (4 - 0.005 s) - 28)` between the two thresholds, which is
/// `round(20000 / (800 - s)) - 28` in integer arithmetic.
pub fn curve(sensor: u16) -> u8 {
    if sensor >= CURVE_HIGH {
        return MAX_DUTY;
    }
    if sensor <= CURVE_LOW {
        return 1;
    }
    let divisor = u32::from(800 - sensor);
    let scaled = (20_000 + divisor / 2) / divisor;
    scaled.saturating_sub(28).clamp(1, 255) as u8
}

/// Backlight duty for a manual level
///
/// Level 1 switches the backlight off; levels 2-17 step linearly along the
/// sensor axis of [`curve`].
pub fn level_duty(level: u8) -> u8 {
    match level {
        0 | 1 => 0,
        _ => {
            let step = u16::from(level.min(MAX_LEVEL) - 2);
            curve(CURVE_LOW + step * 413 / 10)
        }
    }
}

/// Configured backlight behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BrightnessMode {
    /// Follow ambient light
    Auto,
    /// Backlight off
    Off,
    /// Manual level, 2-17
    Level(u8),
}

impl BrightnessMode {
    /// Decode the persisted setting (0 = auto, 1 = off, 2-17 manual)
    ///
    /// Out-of-range values fall back to automatic.
    pub fn from_setting(value: u8) -> Self {
        match value {
            1 => BrightnessMode::Off,
            2..=MAX_LEVEL => BrightnessMode::Level(value),
            _ => BrightnessMode::Auto,
        }
    }

    /// Encode for persistence
    pub fn as_setting(self) -> u8 {
        match self {
            BrightnessMode::Auto => 0,
            BrightnessMode::Off => 1,
            BrightnessMode::Level(level) => level.clamp(2, MAX_LEVEL),
        }
    }

    /// Duty for this mode given the current light reading
    pub fn duty(self, light: u16) -> u8 {
        match self {
            BrightnessMode::Auto => curve(light),
            BrightnessMode::Off => 0,
            BrightnessMode::Level(level) => level_duty(level),
        }
    }
}

/// Rolling light sampler and backlight writer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BrightnessSampler {
    mode: BrightnessMode,
    overridden: bool,
    min_observed: u16,
    max_observed: u16,
    window_start: u32,
}

impl BrightnessSampler {
    pub const fn new(mode: BrightnessMode) -> Self {
        Self {
            mode,
            overridden: false,
            min_observed: u16::MAX,
            max_observed: 0,
            window_start: 0,
        }
    }

    /// Configured mode
    pub fn mode(&self) -> BrightnessMode {
        self.mode
    }

    /// One sampling step, called on every scheduler tick
    pub fn tick<B: Board>(&mut self, board: &mut B) {
        let light = board.light_level();
        self.min_observed = self.min_observed.min(light);
        self.max_observed = self.max_observed.max(light);

        let now = board.now_ms();
        if elapsed(now, self.window_start) < WINDOW_MS {
            return;
        }

        if self.mode == BrightnessMode::Auto && !self.overridden {
            let midpoint = (u32::from(self.min_observed) + u32::from(self.max_observed)) / 2;
            board.set_backlight(curve(midpoint as u16));
        }
        self.min_observed = u16::MAX;
        self.max_observed = 0;
        self.window_start = now;
    }

    /// Change the mode and apply it immediately unless overridden
    pub fn set_mode<B: Board>(&mut self, mode: BrightnessMode, board: &mut B) {
        debug!("Brightness mode {}", mode);
        self.mode = mode;
        if !self.overridden {
            self.apply(board);
        }
    }

    /// Pin the backlight at maximum and suspend automatic updates
    pub fn override_max<B: Board>(&mut self, board: &mut B) {
        self.overridden = true;
        board.set_backlight(MAX_DUTY);
    }

    /// Drop an override and re-apply the configured mode
    pub fn restore<B: Board>(&mut self, board: &mut B) {
        self.overridden = false;
        self.apply(board);
    }

    fn apply<B: Board>(&mut self, board: &mut B) {
        let light = board.light_level();
        board.set_backlight(self.mode.duty(light));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeBoard;
    use proptest::prelude::*;

    #[test]
    fn test_curve_boundaries() {
        assert_eq!(curve(729), 255);
        assert_eq!(curve(1023), 255);
        assert_eq!(curve(110), 1);
        assert_eq!(curve(0), 1);
    }

    #[test]
    fn test_curve_midrange_rounds() {
        // 100 / (4 - 2.1) - 28 = 24.63
        assert_eq!(curve(420), 25);
        // 100 / (4 - 3.64) - 28 = 249.78
        assert_eq!(curve(728), 250);
        assert_eq!(curve(111), 1);
    }

    #[test]
    fn test_level_duty() {
        assert_eq!(level_duty(1), 0);
        assert_eq!(level_duty(2), 1);
        assert_eq!(level_duty(17), 255);
        // 110 + 41.3 * 8 = 440.4
        assert_eq!(level_duty(10), curve(440));
    }

    #[test]
    fn test_mode_setting_mapping() {
        assert_eq!(BrightnessMode::from_setting(0), BrightnessMode::Auto);
        assert_eq!(BrightnessMode::from_setting(1), BrightnessMode::Off);
        assert_eq!(BrightnessMode::from_setting(9), BrightnessMode::Level(9));
        assert_eq!(BrightnessMode::from_setting(200), BrightnessMode::Auto);
        for value in 0..=MAX_LEVEL {
            assert_eq!(BrightnessMode::from_setting(value).as_setting(), value);
        }
    }

    #[test]
    fn test_auto_writes_once_per_window_with_midpoint() {
        let mut board = FakeBoard::new();
        let mut sampler = BrightnessSampler::new(BrightnessMode::Auto);
        board.light = 200;
        while board.now < 500 {
            sampler.tick(&mut board);
        }
        board.light = 600;
        while board.now < 999 {
            sampler.tick(&mut board);
        }
        assert!(board.backlight.is_empty());
        while board.now < 1100 {
            sampler.tick(&mut board);
        }
        assert_eq!(board.backlight, vec![curve(400)]);
    }

    #[test]
    fn test_manual_mode_never_writes_from_tick() {
        let mut board = FakeBoard::new();
        let mut sampler = BrightnessSampler::new(BrightnessMode::Level(5));
        while board.now < 3000 {
            sampler.tick(&mut board);
        }
        assert!(board.backlight.is_empty());
    }

    #[test]
    fn test_override_and_restore() {
        let mut board = FakeBoard::new();
        board.light = 420;
        let mut sampler = BrightnessSampler::new(BrightnessMode::Auto);
        sampler.override_max(&mut board);
        while board.now < 3000 {
            sampler.tick(&mut board);
        }
        assert_eq!(board.backlight, vec![255]);
        sampler.restore(&mut board);
        assert_eq!(board.backlight.last(), Some(&25));
    }

    #[test]
    fn test_set_mode_during_override_deferred() {
        let mut board = FakeBoard::new();
        let mut sampler = BrightnessSampler::new(BrightnessMode::Auto);
        sampler.override_max(&mut board);
        sampler.set_mode(BrightnessMode::Off, &mut board);
        assert_eq!(board.backlight, vec![255]);
        sampler.restore(&mut board);
        assert_eq!(board.backlight.last(), Some(&0));
    }

    proptest! {
        #[test]
        fn prop_curve_monotonic_and_nonzero(s in 0u16..1023) {
            prop_assert!(curve(s) >= 1);
            prop_assert!(curve(s + 1) >= curve(s));
        }
    }
}
