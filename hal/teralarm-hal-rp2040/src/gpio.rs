//! Buttons and status LEDs
//!
//! The four front-panel buttons pull their pin to ground when pressed, so
//! they are configured with internal pull-ups.

use embassy_rp::gpio::{AnyPin, Input, Level, Output, Pull};
use embassy_rp::Peri;

/// Front-panel button input
pub struct Button<'d> {
    pin: Input<'d>,
}

impl<'d> Button<'d> {
    /// Configure `pin` as a pulled-up input
    pub fn new(pin: Peri<'d, AnyPin>) -> Self {
        Self {
            pin: Input::new(pin, Pull::Up),
        }
    }
}

impl teralarm_hal::InputPin for Button<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

/// Status LED output, lit when high
pub struct StatusLed<'d> {
    pin: Output<'d>,
}

impl<'d> StatusLed<'d> {
    /// Configure `pin` as an output, initially off
    pub fn new(pin: Peri<'d, AnyPin>) -> Self {
        Self {
            pin: Output::new(pin, Level::Low),
        }
    }
}

impl teralarm_hal::OutputPin for StatusLed<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}
