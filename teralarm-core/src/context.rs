//! Shared application context and cooperative scheduling
//!
//! Every screen is an [`Activity`]: a state machine that does a small,
//! bounded amount of work per [`Activity::step`] and reports when it is
//! finished. The firmware loop steps the active one; code that wants a
//! synchronous result calls [`AppContext::run`]. Waits that must stay
//! responsive go through [`AppContext::run_for`], which keeps sampling the
//! buttons and the light sensor while time passes.

use core::task::Poll;

use teralarm_display::{CharLcd, DisplaySurface};

use crate::board::{Board, ButtonId};
use crate::brightness::{BrightnessMode, BrightnessSampler};
use crate::input::InputPoller;
use crate::time::elapsed;

/// Hardware and cross-screen state handed to every activity
pub struct AppContext<B, D> {
    pub board: B,
    pub display: DisplaySurface<D>,
    pub input: InputPoller,
    pub brightness: BrightnessSampler,
}

/// A resumable unit of UI work
pub trait Activity {
    type Output;

    /// Advance by one tick
    fn step<B: Board, D: CharLcd>(&mut self, ctx: &mut AppContext<B, D>) -> Poll<Self::Output>;
}

impl<B: Board, D: CharLcd> AppContext<B, D> {
    /// Build the context, clearing the LCD and applying `mode`
    pub fn new(board: B, lcd: D, mode: BrightnessMode) -> Self {
        let mut ctx = Self {
            board,
            display: DisplaySurface::new(lcd),
            input: InputPoller::new(),
            brightness: BrightnessSampler::new(mode),
        };
        ctx.brightness.set_mode(mode, &mut ctx.board);
        ctx
    }

    /// Current monotonic time
    pub fn now(&mut self) -> u32 {
        self.board.now_ms()
    }

    /// One scheduler tick: sample light, then buttons
    pub fn poll(&mut self) -> Option<ButtonId> {
        self.brightness.tick(&mut self.board);
        self.input.poll_and_consume_new_press(&mut self.board)
    }

    /// Swallow a press still in progress
    pub fn consume_pending_press(&mut self) {
        self.input.consume_pending_press();
    }

    /// Raw check that every button is held
    pub fn all_buttons_down(&mut self) -> bool {
        ButtonId::ALL.into_iter().all(|b| self.board.button_down(b))
    }

    /// Wait `ms` milliseconds while background tasks keep running
    ///
    /// Presses that arrive during the wait are absorbed.
    pub fn run_for(&mut self, ms: u32) {
        let start = self.now();
        while elapsed(self.now(), start) < ms {
            let _ = self.poll();
        }
    }

    /// Step `activity` until it finishes
    pub fn run<A: Activity>(&mut self, mut activity: A) -> A::Output {
        loop {
            if let Poll::Ready(output) = activity.step(self) {
                return output;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, FakeBoard};

    struct Countdown(u8);

    impl Activity for Countdown {
        type Output = &'static str;

        fn step<B: Board, D: CharLcd>(&mut self, ctx: &mut AppContext<B, D>) -> Poll<Self::Output> {
            let _ = ctx.poll();
            match self.0.checked_sub(1) {
                Some(n) => {
                    self.0 = n;
                    Poll::Pending
                }
                None => Poll::Ready("done"),
            }
        }
    }

    #[test]
    fn test_run_drives_activity_to_completion() {
        let mut ctx = context(FakeBoard::new());
        assert_eq!(ctx.run(Countdown(5)), "done");
    }

    #[test]
    fn test_run_for_waits_duration() {
        let mut ctx = context(FakeBoard::new());
        ctx.board.now = 1_000;
        ctx.run_for(500);
        assert!(ctx.board.now >= 1_500);
        assert!(ctx.board.now < 1_510);
    }

    #[test]
    fn test_run_for_across_counter_wrap() {
        let mut ctx = context(FakeBoard::new());
        ctx.board.now = u32::MAX - 100;
        ctx.run_for(300);
        assert!(ctx.board.now >= 199 && ctx.board.now < 210);
    }

    #[test]
    fn test_run_for_absorbs_presses() {
        let mut board = FakeBoard::new();
        board.press(ButtonId::Confirm, 100, 300);
        let mut ctx = context(board);
        ctx.run_for(800);
        while ctx.board.now < 1_500 {
            assert_eq!(ctx.poll(), None);
        }
    }

    #[test]
    fn test_run_for_keeps_brightness_running() {
        let mut board = FakeBoard::new();
        board.light = 800;
        let mut ctx = context(board);
        ctx.board.backlight.clear();
        ctx.run_for(2_500);
        assert_eq!(ctx.board.backlight, vec![255, 255]);
    }

    #[test]
    fn test_all_buttons_down() {
        let mut board = FakeBoard::new();
        for b in ButtonId::ALL {
            board.press(b, 0, 100);
        }
        board.press(ButtonId::Cancel, 0, 200);
        let mut ctx = context(board);
        assert!(ctx.all_buttons_down());
        ctx.board.now = 150;
        let _ = ctx.now();
        assert!(!ctx.all_buttons_down());
    }
}
