//! Teralarm Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the alarm clock
//! firmware is written against. Chip-specific crates implement them, and
//! the interaction engine in `teralarm-core` consumes them through its
//! `Board` facade.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  teralarm-core (interaction engine)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  teralarm-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ teralarm-hal- │       │   teralarm-   │
//! │    rp2040     │       │    drivers    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`pwm::PwmOutput`] - Backlight duty cycle
//! - [`analog::AnalogInput`] - Light sensor sampling
//! - [`tone::ToneOutput`] - Buzzer
//! - [`time::MonotonicClock`] - Wrapping millisecond counter
//! - [`rtc::RealTimeClock`] - Wall-clock time and temperature
//! - [`storage::SettingsStore`] - Persistent settings

#![no_std]
#![deny(unsafe_code)]

pub mod analog;
pub mod gpio;
pub mod pwm;
pub mod rtc;
pub mod storage;
pub mod time;
pub mod tone;

// Re-export key traits at crate root for convenience
pub use analog::AnalogInput;
pub use gpio::{InputPin, OutputPin};
pub use pwm::PwmOutput;
pub use rtc::{DateTime, RealTimeClock, RtcError};
pub use storage::{SettingsStore, StorageError, StorageKey};
pub use time::MonotonicClock;
pub use tone::ToneOutput;
