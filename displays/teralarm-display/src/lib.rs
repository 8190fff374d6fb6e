//! Character display abstraction and shared components for Teralarm
//!
//! This crate provides:
//! - `CharLcd` trait for character-cell displays (HD44780 and friends)
//! - `DisplaySurface`, a mirror of the display contents that only forwards
//!   writes which actually change what is shown
//! - `Line` helpers for composing fixed-width rows
//! - Custom glyph codes and bitmaps used by the UI
//!
//! # Architecture
//!
//! Character LCD writes are slow and visibly flicker, while most UI loops
//! repaint their whole frame on every tick. Routing every write through a
//! `DisplaySurface` turns those repaints into no-ops unless a cell changed.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod backend;
pub mod glyphs;
pub mod line;
pub mod surface;

// Re-export key types
pub use backend::{CharLcd, DisplayError};
pub use line::{Line, Text};
pub use surface::{DisplaySurface, LCD_COLS, LCD_ROWS};
