//! Light sensor on the RP2040 ADC
//!
//! RP2040 has a single 12-bit ADC with 4 external channels:
//! - ADC0: GPIO26
//! - ADC1: GPIO27
//! - ADC2: GPIO28
//! - ADC3: GPIO29

use embassy_rp::adc::{Adc, Blocking, Channel};

use teralarm_hal::analog::ANALOG_FULL_SCALE;

/// Shift from the native 12-bit range down to the 10-bit HAL range
const RESOLUTION_SHIFT: u32 = 2;

/// Scale a raw 12-bit conversion to `0..=ANALOG_FULL_SCALE`
pub fn scale_reading(raw: u16) -> u16 {
    (raw >> RESOLUTION_SHIFT).min(ANALOG_FULL_SCALE)
}

/// Photoresistor divider on one ADC channel
pub struct LightSensor<'d> {
    adc: Adc<'d, Blocking>,
    channel: Channel<'d>,
    last: u16,
}

impl<'d> LightSensor<'d> {
    pub fn new(adc: Adc<'d, Blocking>, channel: Channel<'d>) -> Self {
        Self {
            adc,
            channel,
            last: 0,
        }
    }
}

impl teralarm_hal::AnalogInput for LightSensor<'_> {
    fn read(&mut self) -> u16 {
        match self.adc.blocking_read(&mut self.channel) {
            Ok(raw) => self.last = scale_reading(raw),
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("ADC read failed: {:?}", _e);
            }
        }
        self.last
    }
}
