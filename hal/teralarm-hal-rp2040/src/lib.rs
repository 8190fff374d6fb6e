//! RP2040-specific HAL for the alarm clock firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `teralarm-hal` traits on top of `embassy-rp`:
//!
//! - GPIO buttons and status LEDs
//! - PWM backlight and buzzer
//! - ADC light sensor
//! - Monotonic millisecond clock
//! - Flash settings store (implements `teralarm_hal::SettingsStore`)

#![no_std]

pub mod adc;
pub mod clock;
pub mod flash;
pub mod gpio;
pub mod pwm;

// Re-export shared traits from teralarm-hal for convenience
pub use teralarm_hal::{SettingsStore as SettingsStoreTrait, StorageKey};

pub use adc::LightSensor;
pub use clock::EmbassyClock;
pub use flash::Rp2040SettingsStore;
pub use gpio::{Button, StatusLed};
pub use pwm::{Backlight, PwmBuzzer};
