//! Top-level mode state machine
//!
//! Which screen owns the display is a pure function of the current mode
//! and an event. The [`App`](crate::app::App) turns screen outcomes into
//! events and builds the activity for the resulting mode.

pub mod events;
pub mod machine;

pub use events::{Event, MenuItem};
pub use machine::Mode;
