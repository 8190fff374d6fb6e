//! Simulated hardware for host tests

use teralarm_display::{CharLcd, DisplayError};
use teralarm_hal::{DateTime, RtcError};

use crate::board::{Board, ButtonId, Buzzer, Led};
use crate::brightness::BrightnessMode;
use crate::context::AppContext;

/// Board with a scripted clock and recorded outputs
///
/// Every `now_ms` call advances the clock by `step` milliseconds, so busy
/// loops terminate. Buttons are evaluated at the last returned instant.
pub struct FakeBoard {
    /// Next value `now_ms` returns
    pub now: u32,
    /// Last value `now_ms` returned
    pub last_now: u32,
    pub step: u32,
    /// Scripted holds: button is down for `start <= t < end`
    pub holds: Vec<(ButtonId, u32, u32)>,
    pub light: u16,
    /// Every backlight duty written
    pub backlight: Vec<u8>,
    pub red: bool,
    pub blue: bool,
    pub buzzer: Buzzer,
    /// Every buzzer change with its timestamp
    pub buzzer_log: Vec<(u32, Buzzer)>,
    /// Blue LED switch-on timestamps
    pub blue_on_log: Vec<u32>,
    pub time: DateTime,
    pub written_time: Option<DateTime>,
    /// Rejects every wall clock write when set
    pub rtc_fails: bool,
    /// Tenths of a degree Celsius
    pub temperature: i16,
}

impl FakeBoard {
    pub fn new() -> Self {
        Self {
            now: 0,
            last_now: 0,
            step: 1,
            holds: Vec::new(),
            light: 420,
            backlight: Vec::new(),
            red: false,
            blue: false,
            buzzer: Buzzer::Silent,
            buzzer_log: Vec::new(),
            blue_on_log: Vec::new(),
            time: DateTime::new(2024, 3, 14, 6, 59, 30),
            written_time: None,
            rtc_fails: false,
            temperature: 213,
        }
    }

    /// Hold `button` from `start` until `end`
    pub fn press(&mut self, button: ButtonId, start: u32, end: u32) {
        self.holds.push((button, start, end));
    }
}

impl Board for FakeBoard {
    fn now_ms(&mut self) -> u32 {
        self.last_now = self.now;
        self.now = self.now.wrapping_add(self.step);
        self.last_now
    }

    fn button_down(&mut self, button: ButtonId) -> bool {
        let t = self.last_now;
        self.holds
            .iter()
            .any(|&(b, start, end)| b == button && start <= t && t < end)
    }

    fn light_level(&mut self) -> u16 {
        self.light
    }

    fn set_backlight(&mut self, duty: u8) {
        self.backlight.push(duty);
    }

    fn set_led(&mut self, led: Led, on: bool) {
        match led {
            Led::Red => self.red = on,
            Led::Blue => {
                if on && !self.blue {
                    self.blue_on_log.push(self.last_now);
                }
                self.blue = on;
            }
        }
    }

    fn set_buzzer(&mut self, buzzer: Buzzer) {
        if buzzer != self.buzzer {
            self.buzzer_log.push((self.last_now, buzzer));
        }
        self.buzzer = buzzer;
    }

    fn wall_clock(&mut self) -> DateTime {
        self.time
    }

    fn set_wall_clock(&mut self, time: DateTime) -> Result<(), RtcError> {
        if self.rtc_fails {
            return Err(RtcError::InvalidData);
        }
        self.time = time;
        self.written_time = Some(time);
        Ok(())
    }

    fn temperature_tenths(&mut self) -> i16 {
        self.temperature
    }
}

/// LCD that accepts everything and counts hardware traffic
#[derive(Default)]
pub struct FakeLcd {
    pub clears: usize,
    pub prints: usize,
}

impl CharLcd for FakeLcd {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.clears += 1;
        Ok(())
    }

    fn set_cursor(&mut self, _col: u8, _row: u8) -> Result<(), DisplayError> {
        Ok(())
    }

    fn print(&mut self, _text: &[u8]) -> Result<(), DisplayError> {
        self.prints += 1;
        Ok(())
    }
}

pub type TestContext = AppContext<FakeBoard, FakeLcd>;

/// Context over `board` with automatic brightness
pub fn context(board: FakeBoard) -> TestContext {
    AppContext::new(board, FakeLcd::default(), BrightnessMode::Auto)
}

/// Mirrored text of a display row
pub fn row(ctx: &TestContext, y: usize) -> String {
    ctx.display
        .row(y)
        .map(|r| r.iter().map(|&b| char::from(b)).collect())
        .unwrap_or_default()
}
