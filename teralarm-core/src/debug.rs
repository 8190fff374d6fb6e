//! Diagnostics screen
//!
//! Row 0 cycles through stored settings and RTC data, two seconds each;
//! rows 1-3 show live temperature, light level and uptime. Any press
//! leaves.

use core::fmt::Write;
use core::task::Poll;

use teralarm_display::glyphs::{CURSOR, DEGREE};
use teralarm_display::{CharLcd, Line, Text};

use crate::board::Board;
use crate::brightness::{curve, MAX_LEVEL};
use crate::clockface::weekday_name;
use crate::context::{Activity, AppContext};
use crate::settings::Settings;
use crate::time::Interval;

const REDRAW_MS: u32 = 1000;

/// Carousel pages, each shown for two redraws
const PAGES: u8 = 7;

pub struct DebugScreen {
    settings: Settings,
    carousel: u8,
    redraw: Interval,
}

impl DebugScreen {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            carousel: 0,
            redraw: Interval::new(REDRAW_MS),
        }
    }

    fn carousel_line<B: Board>(&self, board: &mut B) -> Line {
        let mut line = Line::<20>::blank();
        let mut text: Text<20> = Text::new();
        let s = &self.settings;
        match self.carousel / 2 {
            0 => {
                line.put(0, [CURSOR; 5]).put(5, "DEBUG MODE").put(15, [CURSOR; 5]);
                return line;
            }
            1 => {
                let _ = write!(text, "UNIX: {}", board.wall_clock().unix_time());
            }
            2 => {
                let weekday = board.wall_clock().weekday;
                let _ = write!(text, "DAY: {} ({})", weekday, weekday_name(weekday));
            }
            3 => {
                let _ = write!(text, "ALARM TIME: {:02}:{:02}", s.alarm_hour, s.alarm_minute);
            }
            4 => {
                let _ = write!(text, "ALARM CHALLENGE: {}", s.challenge);
            }
            5 => {
                let _ = text.push_str(if s.alarm_enabled {
                    "ALARM STATE: 1 (ON)"
                } else {
                    "ALARM STATE: 0 (OFF)"
                });
            }
            _ => {
                let _ = write!(text, "BRIGHTNESS: {}", s.brightness);
                let suffix = match s.brightness {
                    0 => " (AUTO)",
                    1 => " (OFF)",
                    MAX_LEVEL => " (MAX)",
                    _ => "",
                };
                let _ = text.push_str(suffix);
            }
        }
        line.put(0, text.as_bytes());
        line
    }

    fn draw<B: Board, D: CharLcd>(&mut self, ctx: &mut AppContext<B, D>, now: u32) {
        let top = self.carousel_line(&mut ctx.board);
        ctx.display.write_at(0, 0, top);
        self.carousel = (self.carousel + 1) % (PAGES * 2);

        let mut text: Text<20> = Text::new();
        let tenths = ctx.board.temperature_tenths();
        let sign = if tenths < 0 { "-" } else { "" };
        let abs = tenths.unsigned_abs();
        let _ = write!(text, "TEMPERATURE: {}{}.{}", sign, abs / 10, abs % 10);
        let mut line = Line::<20>::blank();
        line.put(0, text.as_bytes()).put(text.len(), [DEGREE, b'C']);
        ctx.display.write_at(0, 1, line);

        let light = ctx.board.light_level();
        text.clear();
        let _ = write!(text, "LIGHT: {} ({})", light, curve(light));
        ctx.display.write_at(0, 2, Line::<20>::blank().put(0, text.as_bytes()).as_bytes());

        let secs = now / 1000;
        text.clear();
        let _ = write!(
            text,
            "UPTIME: {}d{}h{}m{}s",
            secs / 86_400,
            secs % 86_400 / 3_600,
            secs % 3_600 / 60,
            secs % 60
        );
        ctx.display.write_at(0, 3, Line::<20>::blank().put(0, text.as_bytes()).as_bytes());
    }
}

impl Activity for DebugScreen {
    type Output = ();

    fn step<B: Board, D: CharLcd>(&mut self, ctx: &mut AppContext<B, D>) -> Poll<()> {
        if ctx.poll().is_some() {
            return Poll::Ready(());
        }
        let now = ctx.now();
        if self.redraw.ready(now) {
            self.draw(ctx, now);
        }
        Poll::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ButtonId;
    use crate::testing::{context, row, FakeBoard, TestContext};

    fn run_until(ctx: &mut TestContext, screen: &mut DebugScreen, until: u32) -> bool {
        while ctx.board.now < until {
            if screen.step(ctx).is_ready() {
                return true;
            }
        }
        false
    }

    #[test]
    fn test_carousel_pages() {
        let mut ctx = context(FakeBoard::new());
        let settings = Settings {
            alarm_hour: 6,
            alarm_minute: 45,
            alarm_enabled: true,
            challenge: 3,
            brightness: 17,
            ..Settings::default()
        };
        let mut screen = DebugScreen::new(settings);

        let mut tops = Vec::new();
        for second in 0..14 {
            assert!(!run_until(&mut ctx, &mut screen, second * 1_000 + 500));
            tops.push(row(&ctx, 0));
        }
        assert_eq!(tops[0], "\u{1}\u{1}\u{1}\u{1}\u{1}DEBUG MODE\u{1}\u{1}\u{1}\u{1}\u{1}");
        assert_eq!(tops[1], tops[0]);
        assert_eq!(tops[2].trim_end(), "UNIX: 1710399570");
        assert_eq!(tops[4].trim_end(), "DAY: 4 (THURSDAY)");
        assert_eq!(tops[6].trim_end(), "ALARM TIME: 06:45");
        assert_eq!(tops[8].trim_end(), "ALARM CHALLENGE: 3");
        assert_eq!(tops[10].trim_end(), "ALARM STATE: 1 (ON)");
        assert_eq!(tops[12].trim_end(), "BRIGHTNESS: 17 (MAX)");

        assert!(!run_until(&mut ctx, &mut screen, 14_500));
        assert_eq!(row(&ctx, 0), tops[0]);
    }

    #[test]
    fn test_live_rows() {
        let mut board = FakeBoard::new();
        board.light = 420;
        board.temperature = 231;
        board.now = 90_061_000;
        let mut ctx = context(board);
        let mut screen = DebugScreen::new(Settings::default());
        assert!(!run_until(&mut ctx, &mut screen, 90_061_100));
        assert_eq!(row(&ctx, 1).trim_end(), "TEMPERATURE: 23.1\u{df}C");
        assert_eq!(row(&ctx, 2).trim_end(), "LIGHT: 420 (25)");
        assert_eq!(row(&ctx, 3).trim_end(), "UPTIME: 1d1h1m1s");
    }

    #[test]
    fn test_any_press_exits() {
        let mut board = FakeBoard::new();
        board.press(ButtonId::Decrement, 2_000, 2_200);
        let mut ctx = context(board);
        let mut screen = DebugScreen::new(Settings::default());
        assert!(run_until(&mut ctx, &mut screen, 5_000));
        assert!(ctx.board.now < 2_200);
    }
}
