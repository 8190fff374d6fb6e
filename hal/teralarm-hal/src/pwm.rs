//! PWM output abstraction

/// 8-bit PWM output
///
/// Used for the LCD backlight. A duty of 0 is fully off and 255 fully on.
pub trait PwmOutput {
    /// Set the output duty cycle
    fn set_duty(&mut self, duty: u8);
}
