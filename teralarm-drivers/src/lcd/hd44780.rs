//! HD44780 character LCD behind a PCF8574 I²C backpack
//!
//! The backpack exposes the LCD bus as an 8-bit port:
//!
//! | PCF8574 | LCD        |
//! |---------|------------|
//! | P0      | RS         |
//! | P1      | RW (low)   |
//! | P2      | E          |
//! | P3      | Backlight  |
//! | P4-P7   | D4-D7      |
//!
//! so every byte goes out as two 4-bit nibbles, each latched by pulsing E.
//! The backlight transistor is left on; brightness is a separate PWM pin.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use teralarm_display::glyphs::CUSTOM_GLYPHS;
use teralarm_display::{CharLcd, DisplayError, LCD_COLS, LCD_ROWS};

/// Most common backpack address; some boards use 0x3F
pub const DEFAULT_ADDRESS: u8 = 0x27;

const RS: u8 = 0x01;
const ENABLE: u8 = 0x04;
const BACKLIGHT: u8 = 0x08;

/// HD44780 instruction set
pub mod cmd {
    pub const CLEAR: u8 = 0x01;
    /// Increment cursor, no display shift
    pub const ENTRY_MODE: u8 = 0x06;
    /// Display on, cursor off, blink off
    pub const DISPLAY_ON: u8 = 0x0C;
    /// 4-bit bus, 2 lines, 5x8 font
    pub const FUNCTION_SET: u8 = 0x28;
    pub const SET_CGRAM: u8 = 0x40;
    pub const SET_DDRAM: u8 = 0x80;
}

/// DDRAM address of the first cell of each row on a 20x4 panel
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// HD44780 driver
pub struct Hd44780<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
}

impl<I2C: I2c, D: DelayNs> Hd44780<I2C, D> {
    /// Initialize the panel and load the custom glyphs
    pub fn new(i2c: I2C, delay: D, address: u8) -> Result<Self, DisplayError> {
        let mut lcd = Self {
            i2c,
            delay,
            address,
        };
        lcd.init()?;
        Ok(lcd)
    }

    /// Give back the bus and delay
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn write_port(&mut self, data: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, &[data])
            .map_err(|_| DisplayError::Communication)
    }

    fn write_nibble(&mut self, nibble: u8, rs: bool) -> Result<(), DisplayError> {
        let rs_bit = if rs { RS } else { 0 };
        let data = (nibble << 4) | BACKLIGHT | rs_bit;

        self.write_port(data | ENABLE)?;
        self.delay.delay_us(1);
        self.write_port(data)?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn write_byte(&mut self, byte: u8, rs: bool) -> Result<(), DisplayError> {
        self.write_nibble(byte >> 4, rs)?;
        self.write_nibble(byte & 0x0F, rs)
    }

    fn command(&mut self, command: u8) -> Result<(), DisplayError> {
        self.write_byte(command, false)
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        self.delay.delay_ms(50);

        // Reset into 8-bit mode three times, then switch to 4-bit
        self.write_nibble(0x03, false)?;
        self.delay.delay_ms(5);
        self.write_nibble(0x03, false)?;
        self.delay.delay_us(150);
        self.write_nibble(0x03, false)?;
        self.write_nibble(0x02, false)?;

        self.command(cmd::FUNCTION_SET)?;
        self.command(cmd::DISPLAY_ON)?;
        self.command(cmd::CLEAR)?;
        self.delay.delay_ms(2);
        self.command(cmd::ENTRY_MODE)?;

        for (code, bitmap) in CUSTOM_GLYPHS {
            self.load_glyph(code, &bitmap)?;
        }
        self.command(cmd::SET_DDRAM)
    }

    /// Store a 5x8 bitmap for character code `code` (0-7)
    ///
    /// Leaves the address counter in CGRAM; position the cursor before
    /// printing again.
    pub fn load_glyph(&mut self, code: u8, bitmap: &[u8; 8]) -> Result<(), DisplayError> {
        self.command(cmd::SET_CGRAM | ((code & 0x07) << 3))?;
        for &row in bitmap {
            self.write_byte(row & 0x1F, true)?;
        }
        Ok(())
    }
}

impl<I2C: I2c, D: DelayNs> CharLcd for Hd44780<I2C, D> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(cmd::CLEAR)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        if usize::from(col) >= LCD_COLS || usize::from(row) >= LCD_ROWS {
            return Err(DisplayError::InvalidCoordinates);
        }
        let offset = ROW_OFFSETS[usize::from(row)];
        self.command(cmd::SET_DDRAM | (offset + col))
    }

    fn print(&mut self, text: &[u8]) -> Result<(), DisplayError> {
        for &b in text {
            self.write_byte(b, true)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockDelay, MockI2c};

    /// Port values latched by E pulses
    fn strobes(i2c: &MockI2c) -> Vec<u8> {
        i2c.writes
            .iter()
            .filter_map(|(_, bytes)| bytes.first().copied())
            .filter(|b| b & ENABLE != 0)
            .collect()
    }

    /// Reassemble (rs, byte) pairs from strobes, skipping the init nibbles
    fn bytes(i2c: &MockI2c) -> Vec<(bool, u8)> {
        strobes(i2c)[4..]
            .chunks(2)
            .map(|pair| (pair[0] & RS != 0, (pair[0] & 0xF0) | (pair[1] >> 4)))
            .collect()
    }

    fn lcd() -> Hd44780<MockI2c, MockDelay> {
        match Hd44780::new(MockI2c::default(), MockDelay::default(), DEFAULT_ADDRESS) {
            Ok(lcd) => lcd,
            Err(e) => panic!("init failed: {:?}", e),
        }
    }

    #[test]
    fn test_init_sequence() {
        let (i2c, delay) = lcd().release();
        assert!(i2c.writes.iter().all(|(addr, bytes)| *addr == 0x27 && bytes.len() == 1));

        let nibbles: Vec<u8> = strobes(&i2c)[..4].iter().map(|b| b >> 4).collect();
        assert_eq!(nibbles, vec![3, 3, 3, 2]);

        let sent = bytes(&i2c);
        assert_eq!(
            &sent[..4],
            &[(false, 0x28), (false, 0x0C), (false, 0x01), (false, 0x06)]
        );
        assert!(delay.total_ns >= 57_000_000);
    }

    #[test]
    fn test_init_loads_glyphs() {
        let (i2c, _) = lcd().release();
        let sent = bytes(&i2c);
        // four glyphs of one address command and eight rows each
        let glyphs = &sent[4..4 + 4 * 9];
        for (i, (code, bitmap)) in CUSTOM_GLYPHS.iter().enumerate() {
            let chunk = &glyphs[i * 9..(i + 1) * 9];
            assert_eq!(chunk[0], (false, 0x40 | (code << 3)));
            let rows: Vec<u8> = chunk[1..].iter().map(|&(rs, b)| {
                assert!(rs);
                b
            }).collect();
            assert_eq!(rows, bitmap.to_vec());
        }
        assert_eq!(sent.last(), Some(&(false, 0x80)));
    }

    #[test]
    fn test_set_cursor_row_offsets() {
        let mut lcd = lcd();
        for (row, offset) in ROW_OFFSETS.iter().enumerate() {
            lcd.i2c.writes.clear();
            assert!(lcd.set_cursor(3, row as u8).is_ok());
            let port: Vec<u8> = strobes(&lcd.i2c);
            let byte = (port[0] & 0xF0) | (port[1] >> 4);
            assert_eq!(byte, 0x80 | (offset + 3));
        }
        assert_eq!(lcd.set_cursor(20, 0), Err(DisplayError::InvalidCoordinates));
        assert_eq!(lcd.set_cursor(0, 4), Err(DisplayError::InvalidCoordinates));
    }

    #[test]
    fn test_print_sends_data_bytes() {
        let mut lcd = lcd();
        lcd.i2c.writes.clear();
        assert!(lcd.print(b"A\x01").is_ok());
        let port = strobes(&lcd.i2c);
        assert_eq!(port.len(), 4);
        assert!(port.iter().all(|b| b & RS != 0 && b & BACKLIGHT != 0));
        assert_eq!((port[0] & 0xF0) | (port[1] >> 4), b'A');
        assert_eq!((port[2] & 0xF0) | (port[3] >> 4), 0x01);
    }

    #[test]
    fn test_bus_failure_reported() {
        let mut lcd = lcd();
        lcd.i2c.fail = true;
        assert_eq!(lcd.clear(), Err(DisplayError::Communication));
        assert_eq!(lcd.print(b"X"), Err(DisplayError::Communication));

        let failing = MockI2c {
            fail: true,
            ..MockI2c::default()
        };
        assert!(Hd44780::new(failing, MockDelay::default(), DEFAULT_ADDRESS).is_err());
    }
}
