//! Time-of-day editor: `HH:MM`

use core::fmt::Write;

use teralarm_display::glyphs::CURSOR;
use teralarm_display::{CharLcd, DisplaySurface, Text};

use super::{wrap, Form, VALUE_ROW};

const COL: u8 = 7;

/// Hours (0-23) then minutes (0-59)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeForm {
    hour: u8,
    minute: u8,
}

impl TimeForm {
    pub fn new(hour: u8, minute: u8) -> Self {
        Self {
            hour: hour % 24,
            minute: minute % 60,
        }
    }
}

impl Form for TimeForm {
    type Value = (u8, u8);

    fn fields(&self) -> u8 {
        2
    }

    fn adjust(&mut self, field: u8, up: bool) {
        match field {
            0 => self.hour = wrap(self.hour, 24, up),
            _ => self.minute = wrap(self.minute, 60, up),
        }
    }

    fn draw_value<D: CharLcd>(&self, _field: u8, display: &mut DisplaySurface<D>) {
        let mut text: Text<5> = Text::new();
        let _ = write!(text, "{:02}:{:02}", self.hour, self.minute);
        display.write_at(COL, VALUE_ROW, text.as_bytes());
    }

    fn draw_cursor<D: CharLcd>(&self, field: u8, display: &mut DisplaySurface<D>) {
        let col = if field == 0 { COL } else { COL + 3 };
        display.write_at(col, VALUE_ROW, [CURSOR; 2]);
    }

    fn value(&self) -> (u8, u8) {
        (self.hour, self.minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ButtonId::*;
    use crate::editor::tests::{drive, tapping};
    use crate::editor::{Edit, Editor};
    use crate::testing::context;

    #[test]
    fn test_hours_wrap_up() {
        let mut ctx = context(tapping(&[Increment, Confirm, Confirm]));
        let mut editor = Editor::new(TimeForm::new(23, 15));
        assert_eq!(drive(&mut ctx, &mut editor, 5_000), Some(Edit::Saved((0, 15))));
    }

    #[test]
    fn test_minutes_wrap_down() {
        let mut ctx = context(tapping(&[Confirm, Decrement, Decrement, Confirm]));
        let mut editor = Editor::new(TimeForm::new(6, 1));
        assert_eq!(drive(&mut ctx, &mut editor, 5_000), Some(Edit::Saved((6, 59))));
    }

    #[test]
    fn test_minute_cursor_position() {
        let mut ctx = context(tapping(&[Confirm]));
        let mut editor = Editor::new(TimeForm::new(6, 1));
        drive(&mut ctx, &mut editor, 300);
        assert_eq!(editor.field(), 1);
        // the cursor blink lands 250 ms after the repaint that follows Confirm
        drive(&mut ctx, &mut editor, 500);
        assert_eq!(&ctx.display.row(2).unwrap()[7..12], b"06:\x01\x01");
    }
}
