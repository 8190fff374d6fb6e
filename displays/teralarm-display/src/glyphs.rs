//! Custom glyph codes
//!
//! The HD44780 reserves character codes 0-7 for user-defined bitmaps. The
//! UI uses four of them; drivers load [`CUSTOM_GLYPHS`] at init.

/// Solid block drawn over the field being edited
pub const CURSOR: u8 = 0x01;

/// Left end cap of a progress bar
pub const BAR_LEFT: u8 = 0x02;

/// Lit progress bar cell
pub const BAR_CELL: u8 = 0x03;

/// Right end cap of a progress bar
pub const BAR_RIGHT: u8 = 0x04;

/// Degree sign in the HD44780 A00 ROM
pub const DEGREE: u8 = 0xDF;

/// Bitmaps (5x8, one byte per pixel row) for the custom glyph codes
pub const CUSTOM_GLYPHS: [(u8, [u8; 8]); 4] = [
    (CURSOR, [0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F]),
    (BAR_LEFT, [0x1F, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F]),
    (BAR_CELL, [0x1F, 0x00, 0x1F, 0x1F, 0x1F, 0x1F, 0x00, 0x1F]),
    (BAR_RIGHT, [0x1F, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x1F]),
];
