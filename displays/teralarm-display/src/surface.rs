//! Diff-based display surface
//!
//! Keeps a mirror of every character cell and forwards a write to the
//! hardware only when it changes at least one cell.

use crate::backend::CharLcd;

/// Number of character rows on the clock's LCD
pub const LCD_ROWS: usize = 4;

/// Number of character columns on the clock's LCD
pub const LCD_COLS: usize = 20;

/// Mirror of a character display with write-if-changed semantics
///
/// Invariant: after any call returns, `cells[i]` equals what the hardware
/// shows at linear position `i = row * COLS + col`.
///
/// Unlike the hardware, the surface does not advance its cursor after a
/// write. Callers position the cursor before every write.
pub struct DisplaySurface<B, const COLS: usize = LCD_COLS, const ROWS: usize = LCD_ROWS> {
    backend: B,
    cells: [[u8; COLS]; ROWS],
    cursor: usize,
}

impl<B: CharLcd, const COLS: usize, const ROWS: usize> DisplaySurface<B, COLS, ROWS> {
    /// Total number of cells
    pub const CAPACITY: usize = COLS * ROWS;

    /// Wrap a backend, clearing it so that hardware and mirror agree
    pub fn new(backend: B) -> Self {
        let mut surface = Self {
            backend,
            cells: [[b' '; COLS]; ROWS],
            cursor: 0,
        };
        surface.clear();
        surface
    }

    /// Move the write position to column `x`, row `y`
    ///
    /// Out-of-range positions are ignored and leave the cursor where it was.
    pub fn move_cursor(&mut self, x: u8, y: u8) {
        let (col, row) = (usize::from(x), usize::from(y));
        if col >= COLS || row >= ROWS {
            return;
        }
        match self.backend.set_cursor(x, y) {
            Ok(()) => self.cursor = row * COLS + col,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("LCD set_cursor({}, {}) failed: {}", x, y, _e);
            }
        }
    }

    /// Write `text` at the cursor if it differs from what is shown
    ///
    /// A write that would run past the last cell is dropped entirely. The
    /// mirror is only updated once the hardware accepted the write, so a
    /// failed write is retried by the next identical repaint.
    pub fn write(&mut self, text: impl AsRef<[u8]>) {
        let text = text.as_ref();
        let start = self.cursor;
        let end = match start.checked_add(text.len()) {
            Some(end) if end <= Self::CAPACITY => end,
            _ => return,
        };

        if (start..end).zip(text).all(|(i, &b)| self.cell_at(i) == b) {
            return;
        }

        match self.backend.print(text) {
            Ok(()) => {
                for (i, &b) in (start..end).zip(text) {
                    self.cells[i / COLS][i % COLS] = b;
                }
            }
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("LCD print failed: {}", _e);
            }
        }
    }

    /// Move the cursor and write, skipping the write if the move is invalid
    pub fn write_at(&mut self, x: u8, y: u8, text: impl AsRef<[u8]>) {
        if usize::from(x) >= COLS || usize::from(y) >= ROWS {
            return;
        }
        self.move_cursor(x, y);
        self.write(text);
    }

    /// Clear the display
    ///
    /// Always reaches the hardware; resets the mirror to blanks and the
    /// cursor to the origin.
    pub fn clear(&mut self) {
        if let Err(_e) = self.backend.clear() {
            #[cfg(feature = "defmt")]
            defmt::warn!("LCD clear failed: {}", _e);
        }
        self.cells = [[b' '; COLS]; ROWS];
        self.cursor = 0;
    }

    /// Current linear write position
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Mirrored content of a row
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        self.cells.get(y).map(|r| r.as_slice())
    }

    /// Mirrored character at a linear position
    pub fn cell(&self, index: usize) -> Option<u8> {
        (index < Self::CAPACITY).then(|| self.cell_at(index))
    }

    /// Check whether `text` appears anywhere in a mirrored row
    pub fn row_contains(&self, y: usize, text: &[u8]) -> bool {
        self.row(y)
            .is_some_and(|r| text.is_empty() || r.windows(text.len()).any(|w| w == text))
    }

    /// Borrow the backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutably borrow the backend
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn cell_at(&self, index: usize) -> u8 {
        self.cells[index / COLS][index % COLS]
    }
}
