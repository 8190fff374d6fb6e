//! Analog input abstraction

/// Full-scale value of an [`AnalogInput`] reading
///
/// Readings are normalised to a 10-bit range regardless of the converter's
/// native resolution, so the brightness curve thresholds stay portable.
pub const ANALOG_FULL_SCALE: u16 = 1023;

/// Analog input channel
///
/// Reads the photoresistor divider that measures ambient light.
pub trait AnalogInput {
    /// Sample the channel, returning a value in `0..=ANALOG_FULL_SCALE`
    ///
    /// Takes `&mut self` because ADC conversions typically require mutable
    /// access to the converter.
    fn read(&mut self) -> u16;
}
