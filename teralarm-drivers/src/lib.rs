//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the display and clock
//! traits over `embedded-hal` 1.0 blocking I²C:
//!
//! - HD44780 character LCD behind a PCF8574 I²C backpack
//! - DS3231 real-time clock with its temperature sensor

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod lcd;
pub mod rtc;

#[cfg(test)]
mod mock;

pub use lcd::Hd44780;
pub use rtc::Ds3231;
