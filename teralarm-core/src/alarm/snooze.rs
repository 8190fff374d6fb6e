//! Snooze countdown arithmetic
//!
//! The countdown screen shows the remaining time and an 18-cell progress
//! bar. Between whole-cell steps the next cell blinks, lit for the second
//! half of every second, so progress stays visible on long snoozes.

use core::fmt::Write;

use teralarm_display::glyphs::BAR_CELL;
use teralarm_display::Text;

use crate::time::elapsed;

/// Cells in the progress bar
pub const BAR_UNITS: u8 = 18;

/// A running snooze period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SnoozeCountdown {
    started: u32,
    total_ms: u32,
}

impl SnoozeCountdown {
    pub fn new(started: u32, total_ms: u32) -> Self {
        Self { started, total_ms }
    }

    /// Snooze length in milliseconds
    pub fn total_ms(&self) -> u32 {
        self.total_ms
    }

    /// Time since the start, saturating at the total
    pub fn elapsed_ms(&self, now: u32) -> u32 {
        elapsed(now, self.started).min(self.total_ms)
    }

    pub fn remaining_ms(&self, now: u32) -> u32 {
        self.total_ms - self.elapsed_ms(now)
    }

    pub fn is_elapsed(&self, now: u32) -> bool {
        elapsed(now, self.started) >= self.total_ms
    }

    /// Whole bar cells earned so far, 0-18
    pub fn progress_units(&self, now: u32) -> u8 {
        if self.total_ms == 0 {
            return BAR_UNITS;
        }
        let done = u64::from(self.elapsed_ms(now)) * u64::from(BAR_UNITS);
        (done / u64::from(self.total_ms)) as u8
    }

    /// Cells drawn lit, including the blinking leading cell
    pub fn lit_cells(&self, now: u32) -> u8 {
        let progress = self.progress_units(now);
        if progress >= BAR_UNITS {
            return BAR_UNITS;
        }
        let step_start =
            (u64::from(progress) * u64::from(self.total_ms) / u64::from(BAR_UNITS)) as u32;
        let into_step = self.elapsed_ms(now) - step_start;
        if into_step % 1000 >= 500 {
            progress + 1
        } else {
            progress
        }
    }

    /// The bar as LCD characters
    pub fn bar(&self, now: u32) -> [u8; BAR_UNITS as usize] {
        let mut bar = [b' '; BAR_UNITS as usize];
        let lit = usize::from(self.lit_cells(now));
        for cell in &mut bar[..lit] {
            *cell = BAR_CELL;
        }
        bar
    }

    /// Remaining time as `MM:SS`
    pub fn remaining_text(&self, now: u32) -> Text<5> {
        let remaining = self.remaining_ms(now);
        let mut text = Text::new();
        let _ = write!(
            text,
            "{:02}:{:02}",
            (remaining / 60_000).min(99),
            (remaining % 60_000) / 1000
        );
        text
    }
}
