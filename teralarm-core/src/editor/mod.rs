//! Settings editors
//!
//! Every editor shares one shape: the active field blinks between its value
//! and a block cursor every 250 ms, Confirm moves to the next field (saving
//! on the last), Cancel discards, and Increment/Decrement adjust the active
//! field within its domain. After any adjustment the value is repainted at
//! once so the user sees it immediately.
//!
//! The field layout and value domain come from a [`Form`]; [`Editor`] runs
//! the shared state machine around it. Editors draw only their value row,
//! so the caller clears the screen and draws a title first.

use core::task::Poll;

use teralarm_display::{CharLcd, DisplaySurface};

use crate::board::{Board, ButtonId};
use crate::context::{Activity, AppContext};
use crate::time::Interval;

pub mod challenge;
pub mod choice;
pub mod date;
pub mod period;
pub mod time;

pub use challenge::ChallengeForm;
pub use choice::ChoiceForm;
pub use date::DateForm;
pub use period::PeriodForm;
pub use time::TimeForm;

/// Blink half-period of the active field
pub const BLINK_MS: u32 = 250;

/// Row every editor draws its value on
pub const VALUE_ROW: u8 = 2;

/// How an editor finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edit<T> {
    Saved(T),
    Cancelled,
}

impl<T> Edit<T> {
    pub fn is_saved(&self) -> bool {
        matches!(self, Edit::Saved(_))
    }
}

/// Field layout and value domain of an editor
pub trait Form {
    type Value;

    /// Number of fields edited in turn
    fn fields(&self) -> u8;

    /// Step `field` up or down, wrapping or clamping at its bounds
    fn adjust(&mut self, field: u8, up: bool);

    /// Paint the whole value
    fn draw_value<D: CharLcd>(&self, field: u8, display: &mut DisplaySurface<D>);

    /// Paint the block cursor over `field`
    fn draw_cursor<D: CharLcd>(&self, field: u8, display: &mut DisplaySurface<D>);

    fn value(&self) -> Self::Value;
}

/// Blinking multi-field editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Editor<F> {
    form: F,
    field: u8,
    blink: Interval,
    show_cursor: bool,
}

impl<F: Form> Editor<F> {
    pub fn new(form: F) -> Self {
        Self {
            form,
            field: 0,
            blink: Interval::new(BLINK_MS),
            show_cursor: false,
        }
    }

    /// Index of the field being edited
    pub fn field(&self) -> u8 {
        self.field
    }

    /// Current form state
    pub fn form(&self) -> &F {
        &self.form
    }

    fn repaint_now(&mut self) {
        self.show_cursor = false;
        self.blink.expire();
    }
}

impl<F: Form> Activity for Editor<F> {
    type Output = Edit<F::Value>;

    fn step<B: Board, D: CharLcd>(&mut self, ctx: &mut AppContext<B, D>) -> Poll<Self::Output> {
        let now = ctx.now();
        if self.blink.ready(now) {
            if self.show_cursor {
                self.form.draw_cursor(self.field, &mut ctx.display);
            } else {
                self.form.draw_value(self.field, &mut ctx.display);
            }
            self.show_cursor = !self.show_cursor;
        }

        match ctx.poll() {
            Some(ButtonId::Confirm) => {
                if self.field + 1 >= self.form.fields() {
                    return Poll::Ready(Edit::Saved(self.form.value()));
                }
                self.field += 1;
                self.repaint_now();
                ctx.consume_pending_press();
            }
            Some(ButtonId::Cancel) => return Poll::Ready(Edit::Cancelled),
            Some(ButtonId::Increment) => {
                self.form.adjust(self.field, true);
                self.repaint_now();
            }
            Some(ButtonId::Decrement) => {
                self.form.adjust(self.field, false);
                self.repaint_now();
            }
            None => {}
        }
        Poll::Pending
    }
}

/// Step `value` within `0..modulus`, wrapping at both ends
pub(crate) fn wrap(value: u8, modulus: u8, up: bool) -> u8 {
    if modulus == 0 {
        return value;
    }
    let value = value % modulus;
    if up {
        (value + 1) % modulus
    } else {
        (value + modulus - 1) % modulus
    }
}

/// Step `value` within `1..=max`, wrapping at both ends
pub(crate) fn wrap_one_based(value: u8, max: u8, up: bool) -> u8 {
    wrap(value.wrapping_sub(1), max, up) + 1
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::testing::{context, FakeBoard, TestContext};

    /// Step `editor` until it finishes or time reaches `until`
    pub fn drive<F: Form>(
        ctx: &mut TestContext,
        editor: &mut Editor<F>,
        until: u32,
    ) -> Option<Edit<F::Value>> {
        while ctx.board.now < until {
            if let Poll::Ready(edit) = editor.step(ctx) {
                return Some(edit);
            }
        }
        None
    }

    /// Board with taps of `buttons` 300 ms apart starting at 100 ms
    pub fn tapping(buttons: &[ButtonId]) -> FakeBoard {
        let mut board = FakeBoard::new();
        for (i, &b) in buttons.iter().enumerate() {
            let start = 100 + 300 * i as u32;
            board.press(b, start, start + 150);
        }
        board
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap(23, 24, true), 0);
        assert_eq!(wrap(0, 24, false), 23);
        assert_eq!(wrap(5, 0, true), 5);
        assert_eq!(wrap_one_based(31, 31, true), 1);
        assert_eq!(wrap_one_based(1, 31, false), 31);
        assert_eq!(wrap_one_based(12, 12, true), 1);
    }

    #[test]
    fn test_cancel_returns_immediately() {
        let mut ctx = context(tapping(&[ButtonId::Increment, ButtonId::Cancel]));
        let mut editor = Editor::new(TimeForm::new(7, 30));
        let edit = drive(&mut ctx, &mut editor, 5_000);
        assert_eq!(edit, Some(Edit::Cancelled));
        assert!(ctx.board.now < 600);
    }

    #[test]
    fn test_blink_alternates_value_and_cursor() {
        let mut ctx = context(FakeBoard::new());
        let mut editor = Editor::new(TimeForm::new(7, 30));
        drive(&mut ctx, &mut editor, 100);
        assert_eq!(&ctx.display.row(2).unwrap()[7..12], b"07:30");
        drive(&mut ctx, &mut editor, 300);
        assert_eq!(&ctx.display.row(2).unwrap()[7..12], b"\x01\x01:30");
        drive(&mut ctx, &mut editor, 550);
        assert_eq!(&ctx.display.row(2).unwrap()[7..12], b"07:30");
    }

    #[test]
    fn test_adjust_repaints_immediately() {
        let mut ctx = context(tapping(&[ButtonId::Increment]));
        let mut editor = Editor::new(TimeForm::new(7, 30));
        // before the first blink at 250 ms
        drive(&mut ctx, &mut editor, 240);
        assert_eq!(&ctx.display.row(2).unwrap()[7..12], b"08:30");
    }
}
