//! Debounced button input
//!
//! Only one button is honoured at a time. A press is delivered once, after
//! the raw signal has been stable for [`DEBOUNCE_MS`], and the next press
//! can only be delivered after the buttons have been released and stayed
//! released for the same period.

use crate::board::{Board, ButtonId};
use crate::time::elapsed;

/// Time a raw button state must hold before it counts
pub const DEBOUNCE_MS: u32 = 100;

/// Debouncer shared by all four buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputPoller {
    /// Highest-priority button down at the last sample
    raw: Option<ButtonId>,
    /// When `raw` last changed
    raw_since: u32,
    /// Button delivered for the press in progress, cleared on release
    reported: Option<ButtonId>,
}

impl Default for InputPoller {
    fn default() -> Self {
        Self::new()
    }
}

impl InputPoller {
    pub const fn new() -> Self {
        Self {
            raw: None,
            raw_since: 0,
            reported: None,
        }
    }

    /// Sample the buttons and return a press not delivered before
    pub fn poll_and_consume_new_press<B: Board>(&mut self, board: &mut B) -> Option<ButtonId> {
        let now = board.now_ms();
        let current = ButtonId::ALL.into_iter().find(|&b| board.button_down(b));

        if current != self.raw {
            self.raw = current;
            self.raw_since = now;
        }
        // Both endpoints count: a state first seen at `raw_since` and still
        // seen at `now` has held for `now - raw_since + 1` milliseconds.
        let settled = elapsed(now, self.raw_since).saturating_add(1) >= DEBOUNCE_MS;

        match (self.reported, self.raw) {
            (None, Some(button)) if settled => {
                self.reported = Some(button);
                trace!("Button {} pressed", button.number());
                Some(button)
            }
            (Some(_), None) if settled => {
                self.reported = None;
                None
            }
            _ => None,
        }
    }

    /// Swallow the press in progress so the next screen does not see it
    ///
    /// A button still held (even one not yet delivered) is treated as
    /// already reported and must be released before anything new counts.
    pub fn consume_pending_press(&mut self) {
        if self.raw.is_some() {
            self.reported = self.raw;
        }
    }
}
