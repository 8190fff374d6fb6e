//! Disarm challenge editor: 0-99, zero shown as `NONE`

use core::fmt::Write;

use teralarm_display::glyphs::CURSOR;
use teralarm_display::{CharLcd, DisplaySurface, Line, Text};

use super::{wrap, Form, VALUE_ROW};

/// Highest challenge count
pub const MAX_CHALLENGE: u8 = 99;

/// Number of correct answers needed to silence the alarm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChallengeForm {
    count: u8,
}

impl ChallengeForm {
    pub fn new(count: u8) -> Self {
        Self {
            count: count.min(MAX_CHALLENGE),
        }
    }

    fn text(&self) -> Text<4> {
        let mut text = Text::new();
        if self.count == 0 {
            let _ = text.push_str("NONE");
        } else {
            let _ = write!(text, "{}", self.count);
        }
        text
    }
}

impl Form for ChallengeForm {
    type Value = u8;

    fn fields(&self) -> u8 {
        1
    }

    fn adjust(&mut self, _field: u8, up: bool) {
        self.count = wrap(self.count, MAX_CHALLENGE + 1, up);
    }

    fn draw_value<D: CharLcd>(&self, _field: u8, display: &mut DisplaySurface<D>) {
        display.write_at(0, VALUE_ROW, Line::<20>::centered(self.text().as_bytes()));
    }

    fn draw_cursor<D: CharLcd>(&self, _field: u8, display: &mut DisplaySurface<D>) {
        let block = [CURSOR; 4];
        let len = self.text().len();
        display.write_at(0, VALUE_ROW, Line::<20>::centered(&block[..len]));
    }

    fn value(&self) -> u8 {
        self.count
    }
}
