//! Character display backend trait
//!
//! Defines the interface a concrete LCD transport implements.

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates
    InvalidCoordinates,
}

/// Character-cell display
///
/// Mirrors the HD44780 command set the UI relies on. Printing advances the
/// hardware cursor, but callers of [`crate::DisplaySurface`] never depend
/// on that and always position the cursor explicitly.
pub trait CharLcd {
    /// Clear the entire display and home the cursor
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Move the cursor
    ///
    /// - `col`: Column number (0-based)
    /// - `row`: Row number (0-based)
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError>;

    /// Print raw character codes at the cursor
    ///
    /// Codes 0-7 address the custom glyphs loaded into CGRAM.
    fn print(&mut self, text: &[u8]) -> Result<(), DisplayError>;
}
