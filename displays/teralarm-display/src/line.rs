//! Fixed-width row composition

use crate::surface::LCD_COLS;

/// Small stack-allocated string for formatted fields
///
/// Fill it with `core::fmt::Write`; a field that does not fit is truncated
/// at the capacity by the formatter returning an error.
pub type Text<const N: usize> = heapless::String<N>;

/// One full display row
///
/// Writing a whole row at once also blanks whatever a previous, longer
/// message left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<const W: usize = LCD_COLS> {
    bytes: [u8; W],
}

impl<const W: usize> Default for Line<W> {
    fn default() -> Self {
        Self::blank()
    }
}

impl<const W: usize> Line<W> {
    /// A row of spaces
    pub const fn blank() -> Self {
        Self { bytes: [b' '; W] }
    }

    /// Place `text` at `col`, truncating at the right edge
    pub fn put(&mut self, col: usize, text: impl AsRef<[u8]>) -> &mut Self {
        if let Some(dst) = self.bytes.get_mut(col..) {
            for (d, &s) in dst.iter_mut().zip(text.as_ref()) {
                *d = s;
            }
        }
        self
    }

    /// `text` centred, rounding toward the left
    pub fn centered(text: impl AsRef<[u8]>) -> Self {
        let text = text.as_ref();
        let mut line = Self::blank();
        line.put(W.saturating_sub(text.len()) / 2, text);
        line
    }

    /// `text` flush against the right edge
    pub fn right_aligned(text: impl AsRef<[u8]>) -> Self {
        let text = text.as_ref();
        let mut line = Self::blank();
        line.put(W.saturating_sub(text.len()), text);
        line
    }

    /// Raw character codes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl<const W: usize> AsRef<[u8]> for Line<W> {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
