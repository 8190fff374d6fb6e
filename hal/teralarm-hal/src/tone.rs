//! Buzzer abstraction

/// Buzzer output
///
/// The buzzer can either be driven steadily (its own oscillator) or with a
/// square wave of a given frequency. Implementations take care of the
/// pin polarity of the particular board.
pub trait ToneOutput {
    /// Play a square wave at `hz`
    fn tone(&mut self, hz: u16);

    /// Sound the buzzer steadily
    fn on(&mut self);

    /// Silence the buzzer
    fn off(&mut self);
}
