//! Board facade
//!
//! The interaction engine talks to hardware only through [`Board`]. The
//! firmware builds a [`HalBoard`] from the HAL traits; tests substitute a
//! simulated board.

use teralarm_hal::{
    AnalogInput, DateTime, InputPin, MonotonicClock, OutputPin, PwmOutput, RealTimeClock,
    RtcError, ToneOutput,
};

/// One of the four front-panel buttons
///
/// Declaration order is the sampling priority when several are held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    /// Button 1: confirm / next field
    Confirm,
    /// Button 2: cancel / discard
    Cancel,
    /// Button 3: increment
    Increment,
    /// Button 4: decrement
    Decrement,
}

impl ButtonId {
    /// All buttons in priority order
    pub const ALL: [ButtonId; 4] = [
        ButtonId::Confirm,
        ButtonId::Cancel,
        ButtonId::Increment,
        ButtonId::Decrement,
    ];

    /// Physical button number, 1-4
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    /// Button with physical number `n`
    pub fn from_number(n: u8) -> Option<Self> {
        n.checked_sub(1)
            .and_then(|i| Self::ALL.get(usize::from(i)))
            .copied()
    }
}

/// Status LEDs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Led {
    Red,
    Blue,
}

/// Buzzer drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Buzzer {
    Silent,
    /// Steady buzz from the buzzer's own oscillator
    On,
    /// Square wave at the given frequency in Hz
    Tone(u16),
}

/// Everything the engine needs from the hardware
pub trait Board {
    /// Wrapping millisecond counter
    fn now_ms(&mut self) -> u32;

    /// Raw (undebounced) state of a button
    fn button_down(&mut self, button: ButtonId) -> bool;

    /// Ambient light reading, 0-1023
    fn light_level(&mut self) -> u16;

    /// LCD backlight duty, 0 = off
    fn set_backlight(&mut self, duty: u8);

    fn set_led(&mut self, led: Led, on: bool);

    fn set_buzzer(&mut self, buzzer: Buzzer);

    /// Current wall-clock time
    fn wall_clock(&mut self) -> DateTime;

    /// Set the wall clock; the RTC may refuse dates it cannot hold
    fn set_wall_clock(&mut self, time: DateTime) -> Result<(), RtcError>;

    /// RTC temperature in tenths of a degree Celsius
    fn temperature_tenths(&mut self) -> i16;
}

/// [`Board`] assembled from HAL trait implementations
///
/// Buttons are active-low. RTC failures are logged and answered with the
/// last good reading.
pub struct HalBoard<C, I, A, P, O, T, R> {
    clock: C,
    buttons: [I; 4],
    light: A,
    backlight: P,
    leds: [O; 2],
    buzzer: T,
    rtc: R,
    last_time: DateTime,
    last_temperature: i16,
}

impl<C, I, A, P, O, T, R> HalBoard<C, I, A, P, O, T, R>
where
    C: MonotonicClock,
    I: InputPin,
    A: AnalogInput,
    P: PwmOutput,
    O: OutputPin,
    T: ToneOutput,
    R: RealTimeClock,
{
    /// Create a board
    ///
    /// - `buttons`: pins in [`ButtonId::ALL`] order
    /// - `leds`: red, then blue
    pub fn new(
        clock: C,
        buttons: [I; 4],
        light: A,
        backlight: P,
        leds: [O; 2],
        buzzer: T,
        rtc: R,
    ) -> Self {
        Self {
            clock,
            buttons,
            light,
            backlight,
            leds,
            buzzer,
            rtc,
            last_time: DateTime::default(),
            last_temperature: 0,
        }
    }
}

impl<C, I, A, P, O, T, R> Board for HalBoard<C, I, A, P, O, T, R>
where
    C: MonotonicClock,
    I: InputPin,
    A: AnalogInput,
    P: PwmOutput,
    O: OutputPin,
    T: ToneOutput,
    R: RealTimeClock,
{
    fn now_ms(&mut self) -> u32 {
        self.clock.now_ms()
    }

    fn button_down(&mut self, button: ButtonId) -> bool {
        self.buttons[button as usize].is_low()
    }

    fn light_level(&mut self) -> u16 {
        self.light.read()
    }

    fn set_backlight(&mut self, duty: u8) {
        self.backlight.set_duty(duty);
    }

    fn set_led(&mut self, led: Led, on: bool) {
        self.leds[led as usize].set_state(on);
    }

    fn set_buzzer(&mut self, buzzer: Buzzer) {
        match buzzer {
            Buzzer::Silent => self.buzzer.off(),
            Buzzer::On => self.buzzer.on(),
            Buzzer::Tone(hz) => self.buzzer.tone(hz),
        }
    }

    fn wall_clock(&mut self) -> DateTime {
        match self.rtc.read() {
            Ok(time) => {
                self.last_time = time;
                time
            }
            Err(e) => {
                warn!("RTC read failed: {}", e);
                self.last_time
            }
        }
    }

    fn set_wall_clock(&mut self, time: DateTime) -> Result<(), RtcError> {
        match self.rtc.write(&time) {
            Ok(()) => {
                info!(
                    "Clock set to {}-{}-{} {}:{}",
                    time.year, time.month, time.day, time.hour, time.minute
                );
                self.last_time = time;
                Ok(())
            }
            Err(e) => {
                warn!("RTC write failed: {}", e);
                Err(e)
            }
        }
    }

    fn temperature_tenths(&mut self) -> i16 {
        match self.rtc.temperature_tenths() {
            Ok(t) => {
                self.last_temperature = t;
                t
            }
            Err(e) => {
                warn!("RTC temperature read failed: {}", e);
                self.last_temperature
            }
        }
    }
}
