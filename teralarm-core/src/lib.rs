//! Board-agnostic interaction engine for the Teralarm alarm clock
//!
//! Everything the clock does runs on one thread with no scheduler: each
//! screen is a resumable state machine that does a little work per tick
//! and never blocks. This crate contains:
//!
//! - The `Board` facade over the HAL traits
//! - Wrap-safe timing primitives and the button debouncer
//! - Automatic backlight control
//! - `AppContext`, `run_for` and the `Activity` trait
//! - Settings editors, clock face, brightness panel and debug screen
//! - The alarm session (disarm challenge, snooze countdown, snooze alert)
//! - Persisted settings and the top-level mode state machine

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// This must go first so the logging macros are visible everywhere
#[macro_use]
mod fmt;

pub mod alarm;
pub mod app;
pub mod board;
pub mod brightness;
pub mod chime;
pub mod clockface;
pub mod context;
pub mod debug;
pub mod editor;
pub mod feedback;
pub mod input;
pub mod panel;
pub mod settings;
pub mod state;
pub mod time;

#[cfg(test)]
mod testing;

// Re-export key types
pub use app::App;
pub use board::{Board, ButtonId, Buzzer, HalBoard, Led};
pub use brightness::{BrightnessMode, BrightnessSampler};
pub use context::{Activity, AppContext};
pub use input::InputPoller;
pub use settings::Settings;
pub use state::{Event, Mode};
