//! PWM backlight and buzzer
//!
//! Both outputs sit on channel A of their own PWM slice. The backlight runs
//! an 8-bit period; the buzzer slice is re-timed for every tone.

use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config, Pwm};

/// Integer clock divider for the buzzer slice
const TONE_DIVIDER: u8 = 64;

/// Period used while the buzzer is driven steadily or silenced
const STEADY_TOP: u16 = 255;

/// Counter wrap value that yields `hz` with the slice clocked at `clk / divider`
///
/// Returns `None` if the tone is out of the counter's reach.
pub fn tone_top(clk_hz: u32, divider: u8, hz: u16) -> Option<u16> {
    if hz == 0 || divider == 0 {
        return None;
    }
    let ticks = clk_hz / divider as u32 / hz as u32;
    if ticks < 2 {
        return None;
    }
    u16::try_from(ticks - 1).ok()
}

/// LCD backlight driver
pub struct Backlight<'d> {
    pwm: Pwm<'d>,
    config: Config,
}

impl<'d> Backlight<'d> {
    /// Take a slice configured with [`Pwm::new_output_a`]; starts dark
    pub fn new(mut pwm: Pwm<'d>) -> Self {
        let mut config = Config::default();
        config.top = STEADY_TOP;
        config.compare_a = 0;
        pwm.set_config(&config);
        Self { pwm, config }
    }
}

impl teralarm_hal::PwmOutput for Backlight<'_> {
    fn set_duty(&mut self, duty: u8) {
        // compare == top + 1 keeps the output high for the whole period
        self.config.compare_a = match duty {
            u8::MAX => STEADY_TOP + 1,
            d => d as u16,
        };
        self.pwm.set_config(&self.config);
    }
}

/// Piezo buzzer driver
pub struct PwmBuzzer<'d> {
    pwm: Pwm<'d>,
    config: Config,
}

impl<'d> PwmBuzzer<'d> {
    /// Take a slice configured with [`Pwm::new_output_a`]; starts silent
    pub fn new(mut pwm: Pwm<'d>) -> Self {
        let mut config = Config::default();
        config.divider = TONE_DIVIDER.into();
        config.top = STEADY_TOP;
        config.compare_a = 0;
        pwm.set_config(&config);
        Self { pwm, config }
    }
}

impl teralarm_hal::ToneOutput for PwmBuzzer<'_> {
    fn tone(&mut self, hz: u16) {
        match tone_top(clk_sys_freq(), TONE_DIVIDER, hz) {
            Some(top) => {
                self.config.top = top;
                self.config.compare_a = top / 2;
                self.pwm.set_config(&self.config);
            }
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Tone {} Hz out of range", hz);
                self.off();
            }
        }
    }

    fn on(&mut self) {
        self.config.top = STEADY_TOP;
        self.config.compare_a = STEADY_TOP + 1;
        self.pwm.set_config(&self.config);
    }

    fn off(&mut self) {
        self.config.top = STEADY_TOP;
        self.config.compare_a = 0;
        self.pwm.set_config(&self.config);
    }
}
