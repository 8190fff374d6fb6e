//! Brightness panel
//!
//! Shown for two seconds after the user nudges the brightness from the
//! clock face. The arrows keep adjusting; holding Confirm and Cancel until
//! the panel times out opens the debug screen.

use core::task::Poll;

use teralarm_display::glyphs::{BAR_CELL, BAR_LEFT, BAR_RIGHT};
use teralarm_display::CharLcd;

use crate::board::{Board, ButtonId};
use crate::brightness::{BrightnessMode, MAX_LEVEL};
use crate::context::{Activity, AppContext};
use crate::time::elapsed;

/// How long the panel stays up without input
pub const PANEL_MS: u32 = 2000;

const BAR_LEN: usize = MAX_LEVEL as usize + 1;

/// How the panel closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelOutcome {
    /// Level stepped to the given setting; redraw the panel with it
    Changed(u8),
    Timeout,
    /// Confirm and Cancel were held when the panel timed out
    Debug,
}

/// Step a brightness setting up or down, wrapping over `0..=17`
pub fn step_level(level: u8, up: bool) -> u8 {
    let levels = MAX_LEVEL + 1;
    if up {
        (level % levels + 1) % levels
    } else {
        (level % levels + MAX_LEVEL) % levels
    }
}

/// The level bar: "AUTO" or one cell per level above off
pub fn level_bar(level: u8) -> [u8; BAR_LEN] {
    let mut bar = [b' '; BAR_LEN];
    bar[0] = BAR_LEFT;
    bar[BAR_LEN - 1] = BAR_RIGHT;
    if level == 0 {
        bar[7..11].copy_from_slice(b"AUTO");
        return bar;
    }

    let cells = usize::from(level.min(MAX_LEVEL)) - 1;
    for cell in &mut bar[1..=cells] {
        *cell = BAR_CELL;
    }
    bar
}

pub struct BrightnessPanel {
    level: u8,
    opened_at: Option<u32>,
}

impl BrightnessPanel {
    pub fn new(level: u8) -> Self {
        Self {
            level,
            opened_at: None,
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    fn open<B: Board, D: CharLcd>(&mut self, ctx: &mut AppContext<B, D>) -> u32 {
        ctx.display.write_at(5, 0, "BRIGHTNESS");
        ctx.display.write_at(1, 2, level_bar(self.level));
        ctx.brightness
            .set_mode(BrightnessMode::from_setting(self.level), &mut ctx.board);
        let now = ctx.now();
        self.opened_at = Some(now);
        now
    }
}

impl Activity for BrightnessPanel {
    type Output = PanelOutcome;

    fn step<B: Board, D: CharLcd>(&mut self, ctx: &mut AppContext<B, D>) -> Poll<PanelOutcome> {
        let opened_at = match self.opened_at {
            Some(at) => at,
            None => self.open(ctx),
        };

        match ctx.poll() {
            Some(ButtonId::Increment) => {
                return Poll::Ready(PanelOutcome::Changed(step_level(self.level, true)))
            }
            Some(ButtonId::Decrement) => {
                return Poll::Ready(PanelOutcome::Changed(step_level(self.level, false)))
            }
            _ => {}
        }

        if elapsed(ctx.now(), opened_at) <= PANEL_MS {
            return Poll::Pending;
        }

        let confirm = ctx.board.button_down(ButtonId::Confirm);
        let cancel = ctx.board.button_down(ButtonId::Cancel);
        if confirm && cancel {
            info!("Entering debug screen");
            Poll::Ready(PanelOutcome::Debug)
        } else {
            Poll::Ready(PanelOutcome::Timeout)
        }
    }
}
