//! Date editor: `DD/MM/YYYY`

use core::fmt::Write;

use teralarm_display::glyphs::CURSOR;
use teralarm_display::{CharLcd, DisplaySurface, Text};

use super::{wrap_one_based, Form, VALUE_ROW};

const COL: u8 = 5;

/// Lowest year accepted
pub const MIN_YEAR: u16 = 1000;

/// Highest year accepted
pub const MAX_YEAR: u16 = 9999;

/// Day (1-31), month (1-12), then year (clamped 1000-9999)
///
/// Days are not checked against the month; the caller fits the saved
/// value to a real date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateForm {
    day: u8,
    month: u8,
    year: u16,
}

impl DateForm {
    pub fn new(day: u8, month: u8, year: u16) -> Self {
        Self {
            day: day.clamp(1, 31),
            month: month.clamp(1, 12),
            year: year.clamp(MIN_YEAR, MAX_YEAR),
        }
    }
}

impl Form for DateForm {
    /// `(day, month, year)`
    type Value = (u8, u8, u16);

    fn fields(&self) -> u8 {
        3
    }

    fn adjust(&mut self, field: u8, up: bool) {
        match field {
            0 => self.day = wrap_one_based(self.day, 31, up),
            1 => self.month = wrap_one_based(self.month, 12, up),
            _ if up => self.year = (self.year + 1).min(MAX_YEAR),
            _ => self.year = self.year.saturating_sub(1).max(MIN_YEAR),
        }
    }

    fn draw_value<D: CharLcd>(&self, _field: u8, display: &mut DisplaySurface<D>) {
        let mut text: Text<10> = Text::new();
        let _ = write!(text, "{:02}/{:02}/{}", self.day, self.month, self.year);
        display.write_at(COL, VALUE_ROW, text.as_bytes());
    }

    fn draw_cursor<D: CharLcd>(&self, field: u8, display: &mut DisplaySurface<D>) {
        match field {
            0 => display.write_at(COL, VALUE_ROW, [CURSOR; 2]),
            1 => display.write_at(COL + 3, VALUE_ROW, [CURSOR; 2]),
            _ => display.write_at(COL + 6, VALUE_ROW, [CURSOR; 4]),
        }
    }

    fn value(&self) -> (u8, u8, u16) {
        (self.day, self.month, self.year)
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
    fn test_day_and_month_wrap() {
        let mut ctx = context(tapping(&[Increment, Confirm, Decrement, Confirm, Confirm]));
        let mut editor = Editor::new(DateForm::new(31, 1, 2024));
        assert_eq!(
            drive(&mut ctx, &mut editor, 5_000),
            Some(Edit::Saved((1, 12, 2024)))
        );
    }

    #[test]
    fn test_year_clamps() {
        let mut form = DateForm::new(1, 1, 9999);
        form.adjust(2, true);
        assert_eq!(form.value().2, 9999);
        let mut form = DateForm::new(1, 1, 1000);
        form.adjust(2, false);
        assert_eq!(form.value().2, 1000);
        form.adjust(2, true);
        assert_eq!(form.value().2, 1001);
    }

    #[test]
    fn test_year_cursor_is_four_wide() {
        let mut ctx = context(tapping(&[Confirm, Confirm]));
        let mut editor = Editor::new(DateForm::new(14, 3, 2024));
        drive(&mut ctx, &mut editor, 800);
        assert_eq!(editor.field(), 2);
        assert_eq!(&ctx.display.row(2).unwrap()[5..15], b"14/03/\x01\x01\x01\x01");
    }
}
