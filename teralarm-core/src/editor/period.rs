//! Period editor: `MMmSSs`, zero shown as `NONE`

use core::fmt::Write;

use teralarm_display::glyphs::CURSOR;
use teralarm_display::{CharLcd, DisplaySurface, Text};

use super::{wrap, Form, VALUE_ROW};

const COL: u8 = 7;
const NONE: &[u8; 6] = b" NONE ";
const NONE_CURSOR: [u8; 6] = [b' ', CURSOR, CURSOR, CURSOR, CURSOR, b' '];

/// Minutes (0-59) then seconds (0-59)
///
/// Once the seconds field is active, a zero period reads `NONE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodForm {
    minutes: u8,
    seconds: u8,
}

impl PeriodForm {
    pub fn new(minutes: u8, seconds: u8) -> Self {
        Self {
            minutes: minutes % 60,
            seconds: seconds % 60,
        }
    }

    fn shows_none(&self, field: u8) -> bool {
        field > 0 && self.minutes == 0 && self.seconds == 0
    }
}

impl Form for PeriodForm {
    type Value = (u8, u8);

    fn fields(&self) -> u8 {
        2
    }

    fn adjust(&mut self, field: u8, up: bool) {
        match field {
            0 => self.minutes = wrap(self.minutes, 60, up),
            _ => self.seconds = wrap(self.seconds, 60, up),
        }
    }

    fn draw_value<D: CharLcd>(&self, field: u8, display: &mut DisplaySurface<D>) {
        if self.shows_none(field) {
            display.write_at(COL, VALUE_ROW, NONE);
            return;
        }
        let mut text: Text<6> = Text::new();
        let _ = write!(text, "{:02}m{:02}s", self.minutes, self.seconds);
        display.write_at(COL, VALUE_ROW, text.as_bytes());
    }

    fn draw_cursor<D: CharLcd>(&self, field: u8, display: &mut DisplaySurface<D>) {
        if self.shows_none(field) {
            display.write_at(COL, VALUE_ROW, NONE_CURSOR);
            return;
        }
        let col = if field == 0 { COL } else { COL + 3 };
        display.write_at(col, VALUE_ROW, [CURSOR; 2]);
    }

    fn value(&self) -> (u8, u8) {
        (self.minutes, self.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ButtonId::*;
    use crate::editor::tests::{drive, tapping};
    use crate::editor::{Edit, Editor};
    use crate::testing::{context, FakeBoard};

    #[test]
    fn test_zero_shows_none_on_seconds_field() {
        let mut ctx = context(tapping(&[Confirm]));
        let mut editor = Editor::new(PeriodForm::new(0, 0));
        drive(&mut ctx, &mut editor, 100);
        assert_eq!(&ctx.display.row(2).unwrap()[7..13], b"00m00s");
        drive(&mut ctx, &mut editor, 300);
        assert_eq!(&ctx.display.row(2).unwrap()[7..13], b" NONE ");
        drive(&mut ctx, &mut editor, 500);
        assert_eq!(&ctx.display.row(2).unwrap()[7..13], &NONE_CURSOR);
    }

    #[test]
    fn test_saves_none() {
        let mut ctx = context(tapping(&[Confirm, Confirm]));
        let mut editor = Editor::new(PeriodForm::new(0, 0));
        assert_eq!(drive(&mut ctx, &mut editor, 5_000), Some(Edit::Saved((0, 0))));
    }

    #[test]
    fn test_seconds_wrap() {
        let mut ctx = context(tapping(&[Increment, Confirm, Decrement, Confirm]));
        let mut editor = Editor::new(PeriodForm::new(4, 0));
        assert_eq!(drive(&mut ctx, &mut editor, 5_000), Some(Edit::Saved((5, 59))));
    }

    #[test]
    fn test_minutes_field_never_none() {
        let mut ctx = context(FakeBoard::new());
        let mut editor = Editor::new(PeriodForm::new(0, 0));
        drive(&mut ctx, &mut editor, 300);
        assert_eq!(&ctx.display.row(2).unwrap()[7..13], b"\x01\x01m00s");
    }
}
