//! DS3231 real-time clock
//!
//! Timekeeping registers 0x00-0x06 hold BCD seconds, minutes, hours,
//! day of week, date, month (with the century flag in bit 7) and year.
//! The temperature sensor sits at 0x11-0x12 as a 10-bit two's complement
//! value in quarter degrees, left-aligned.

use embedded_hal::i2c::I2c;
use teralarm_hal::{DateTime, RealTimeClock, RtcError};

/// Fixed bus address
pub const ADDRESS: u8 = 0x68;

/// DS3231 register addresses
pub mod reg {
    pub const SECONDS: u8 = 0x00;
    pub const MINUTES: u8 = 0x01;
    pub const HOURS: u8 = 0x02;
    pub const DAY: u8 = 0x03;
    pub const DATE: u8 = 0x04;
    pub const MONTH: u8 = 0x05;
    pub const YEAR: u8 = 0x06;
    pub const TEMP_MSB: u8 = 0x11;
    pub const TEMP_LSB: u8 = 0x12;
}

const HOURS_12H: u8 = 0x40;
const HOURS_PM: u8 = 0x20;
const CENTURY: u8 = 0x80;

fn from_bcd(value: u8) -> u8 {
    (value >> 4) * 10 + (value & 0x0F)
}

fn to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

/// DS3231 driver
pub struct Ds3231<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Ds3231<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    fn read_registers(&mut self, start: u8, buf: &mut [u8]) -> Result<(), RtcError> {
        self.i2c
            .write_read(ADDRESS, &[start], buf)
            .map_err(|_| RtcError::Bus)
    }

    fn decode_hours(raw: u8) -> u8 {
        if raw & HOURS_12H != 0 {
            let hour = from_bcd(raw & 0x1F) % 12;
            if raw & HOURS_PM != 0 {
                hour + 12
            } else {
                hour
            }
        } else {
            from_bcd(raw & 0x3F)
        }
    }
}

impl<I2C: I2c> RealTimeClock for Ds3231<I2C> {
    fn read(&mut self) -> Result<DateTime, RtcError> {
        let mut regs = [0u8; 7];
        self.read_registers(reg::SECONDS, &mut regs)?;

        let second = from_bcd(regs[usize::from(reg::SECONDS)] & 0x7F);
        let minute = from_bcd(regs[usize::from(reg::MINUTES)] & 0x7F);
        let hour = Self::decode_hours(regs[usize::from(reg::HOURS)]);
        let day = from_bcd(regs[usize::from(reg::DATE)] & 0x3F);
        let month_reg = regs[usize::from(reg::MONTH)];
        let month = from_bcd(month_reg & 0x1F);
        let century = if month_reg & CENTURY != 0 { 100 } else { 0 };
        let year = 2000 + century + u16::from(from_bcd(regs[usize::from(reg::YEAR)]));

        let valid = second < 60
            && minute < 60
            && hour < 24
            && (1..=12).contains(&month)
            && day >= 1
            && day <= DateTime::days_in_month(year, month);
        if !valid {
            return Err(RtcError::InvalidData);
        }

        // weekday is derived from the date rather than trusted from DAY
        Ok(DateTime::new(year, month, day, hour, minute, second))
    }

    fn write(&mut self, time: &DateTime) -> Result<(), RtcError> {
        if !(2000..2200).contains(&time.year) {
            return Err(RtcError::InvalidData);
        }
        let century = if time.year >= 2100 { CENTURY } else { 0 };
        let year = (time.year % 100) as u8;
        let frame = [
            reg::SECONDS,
            to_bcd(time.second),
            to_bcd(time.minute),
            to_bcd(time.hour),
            time.weekday,
            to_bcd(time.day),
            to_bcd(time.month) | century,
            to_bcd(year),
        ];
        self.i2c.write(ADDRESS, &frame).map_err(|_| RtcError::Bus)
    }

    fn temperature_tenths(&mut self) -> Result<i16, RtcError> {
        let mut raw = [0u8; 2];
        self.read_registers(reg::TEMP_MSB, &mut raw)?;
        let quarters = i16::from_be_bytes(raw) >> 6;
        // quarter degrees to tenths, half away from zero
        let bias = if quarters < 0 { -2 } else { 2 };
        Ok((quarters * 10 + bias) / 4)
    }
}
