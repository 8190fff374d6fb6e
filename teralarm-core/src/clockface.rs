//! Idle clock face
//!
//! ```text
//! 07:00          21°C
//!       06:59:30
//!  THURSDAY 14 MARCH
//!         2024
//! ```
//!
//! Every row is written in full on every tick; the display surface drops
//! the writes that would not change anything.

use core::fmt::Write;

use teralarm_display::glyphs::DEGREE;
use teralarm_display::{CharLcd, Line, Text};
use teralarm_hal::DateTime;

use crate::board::Board;
use crate::context::AppContext;
use crate::settings::Settings;

/// ISO weekday names, Monday first
pub const WEEKDAYS: [&str; 7] = [
    "MONDAY",
    "TUESDAY",
    "WEDNESDAY",
    "THURSDAY",
    "FRIDAY",
    "SATURDAY",
    "SUNDAY",
];

pub const MONTHS: [&str; 12] = [
    "JANUARY",
    "FEBRUARY",
    "MARCH",
    "APRIL",
    "MAY",
    "JUNE",
    "JULY",
    "AUGUST",
    "SEPTEMBER",
    "OCTOBER",
    "NOVEMBER",
    "DECEMBER",
];

/// Longest date that still puts the month on the upper line
const DATE_SPLIT_LEN: usize = 25;

/// Name of ISO weekday `weekday`
pub fn weekday_name(weekday: u8) -> &'static str {
    WEEKDAYS
        .get(usize::from(weekday.wrapping_sub(1)))
        .copied()
        .unwrap_or("???")
}

pub fn month_name(month: u8) -> &'static str {
    MONTHS
        .get(usize::from(month.wrapping_sub(1)))
        .copied()
        .unwrap_or("???")
}

/// The two centred date lines
///
/// "THURSDAY 14 MARCH" / "2024" when it fits, otherwise
/// "WEDNESDAY 25" / "SEPTEMBER 2024".
pub fn date_lines(time: &DateTime) -> (Text<20>, Text<20>) {
    let weekday = weekday_name(time.weekday);
    let month = month_name(time.month);

    let mut upper: Text<20> = Text::new();
    let mut lower: Text<20> = Text::new();
    let _ = write!(upper, "{} {}", weekday, time.day);
    let mut year: Text<6> = Text::new();
    let _ = write!(year, "{}", time.year);

    if upper.len() + 1 + month.len() + 1 + year.len() > DATE_SPLIT_LEN {
        let _ = write!(lower, "{} {}", month, year);
    } else {
        let _ = write!(upper, " {}", month);
        let _ = lower.push_str(&year);
    }
    (upper, lower)
}

/// Draw the clock face and return the time it shows
pub fn draw<B: Board, D: CharLcd>(ctx: &mut AppContext<B, D>, settings: &Settings) -> DateTime {
    let time = ctx.board.wall_clock();
    let tenths = ctx.board.temperature_tenths();
    // whole degrees, half away from zero
    let temperature = (tenths + 5 * tenths.signum()) / 10;

    let mut alarm: Text<5> = Text::new();
    if settings.alarm_enabled {
        let _ = write!(alarm, "{:02}:{:02}", settings.alarm_hour, settings.alarm_minute);
    } else {
        let _ = alarm.push_str("OFF  ");
    }
    ctx.display.write_at(0, 0, alarm.as_bytes());

    let mut degrees: Text<6> = Text::new();
    let _ = write!(degrees, "{}", temperature);
    let mut temp: heapless::Vec<u8, 8> = heapless::Vec::new();
    let _ = temp.extend_from_slice(degrees.as_bytes());
    let _ = temp.push(DEGREE);
    let _ = temp.push(b'C');
    ctx.display.write_at(5, 0, Line::<15>::right_aligned(&temp));

    let mut clock: Text<8> = Text::new();
    let _ = write!(clock, "{:02}:{:02}:{:02}", time.hour, time.minute, time.second);
    ctx.display.write_at(6, 1, clock.as_bytes());

    let (upper, lower) = date_lines(&time);
    ctx.display.write_at(0, 2, Line::<20>::centered(upper.as_bytes()));
    ctx.display.write_at(0, 3, Line::<20>::centered(lower.as_bytes()));

    time
}
