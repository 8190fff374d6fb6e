//! List choice editor
//!
//! Shows one entry of a list centred on the value row. The index is
//! 1-based and wraps within `1..=bound`.

use teralarm_display::glyphs::CURSOR;
use teralarm_display::{CharLcd, DisplaySurface, Line};

use super::{wrap_one_based, Form, VALUE_ROW};

/// Pick an entry from `items[..bound]`
///
/// A bound of zero (or an index outside the bound) leaves the editor
/// inert: nothing is drawn and the arrows do nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceForm {
    items: &'static [&'static str],
    bound: u8,
    index: u8,
}

impl ChoiceForm {
    /// Choose among all of `items`, starting at 1-based `index`
    pub fn new(items: &'static [&'static str], index: u8) -> Self {
        let bound = u8::try_from(items.len()).unwrap_or(u8::MAX);
        Self::bounded(items, bound, index)
    }

    /// Choose among the first `bound` entries
    pub fn bounded(items: &'static [&'static str], bound: u8, index: u8) -> Self {
        let bound = bound.min(u8::try_from(items.len()).unwrap_or(u8::MAX));
        Self {
            items,
            bound,
            index,
        }
    }

    fn current(&self) -> Option<&'static str> {
        if self.index == 0 || self.index > self.bound {
            return None;
        }
        self.items.get(usize::from(self.index - 1)).copied()
    }
}

impl Form for ChoiceForm {
    /// 1-based index
    type Value = u8;

    fn fields(&self) -> u8 {
        1
    }

    fn adjust(&mut self, _field: u8, up: bool) {
        if self.current().is_some() {
            self.index = wrap_one_based(self.index, self.bound, up);
        }
    }

    fn draw_value<D: CharLcd>(&self, _field: u8, display: &mut DisplaySurface<D>) {
        if let Some(item) = self.current() {
            display.write_at(0, VALUE_ROW, Line::<20>::centered(item));
        }
    }

    fn draw_cursor<D: CharLcd>(&self, _field: u8, display: &mut DisplaySurface<D>) {
        if let Some(item) = self.current() {
            let block = [CURSOR; 20];
            let len = item.len().min(block.len());
            display.write_at(0, VALUE_ROW, Line::<20>::centered(&block[..len]));
        }
    }

    fn value(&self) -> u8 {
        self.index
    }
}
