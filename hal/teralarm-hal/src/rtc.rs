//! Real-time clock abstraction
//!
//! The RTC keeps wall-clock time across power cycles and, on the boards we
//! support, also carries a temperature sensor.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors from real-time clock access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RtcError {
    /// Bus transaction failed
    Bus,
    /// Registers held a value outside the calendar range
    InvalidData,
}

/// Calendar date and time of day
///
/// `weekday` is ISO numbered: 1 = Monday ... 7 = Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub weekday: u8,
}

impl Default for DateTime {
    fn default() -> Self {
        // 2000-01-01 was a Saturday
        Self {
            year: 2000,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
            weekday: 6,
        }
    }
}

impl DateTime {
    /// Create a date-time, deriving the weekday from the date
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        let mut dt = Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            weekday: 1,
        };
        dt.weekday = dt.compute_weekday();
        dt
    }

    /// Replace the time of day, keeping the date
    pub fn with_time(self, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
            ..self
        }
    }

    /// Replace the date, keeping the time of day and recomputing the weekday
    pub fn with_date(self, year: u16, month: u8, day: u8) -> Self {
        Self::new(year, month, day, self.hour, self.minute, self.second)
    }

    /// Days since 1970-01-01 (negative before the epoch)
    pub fn days_since_epoch(&self) -> i64 {
        // Proleptic Gregorian conversion, eras of 400 years
        let month = i64::from(self.month.clamp(1, 12));
        let year = i64::from(self.year) - i64::from(month <= 2);
        let era = year.div_euclid(400);
        let yoe = year - era * 400;
        let mp = (month + 9) % 12;
        let doy = (153 * mp + 2) / 5 + i64::from(self.day) - 1;
        let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
        era * 146_097 + doe - 719_468
    }

    /// Seconds since the unix epoch, saturating at the `u32` range
    pub fn unix_time(&self) -> u32 {
        let secs = self.days_since_epoch() * 86_400
            + i64::from(self.hour) * 3_600
            + i64::from(self.minute) * 60
            + i64::from(self.second);
        secs.clamp(0, i64::from(u32::MAX)) as u32
    }

    /// Whether `year` is a Gregorian leap year
    pub fn is_leap_year(year: u16) -> bool {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    }

    /// Number of days in `month` of `year`, 0 for an invalid month
    pub fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }

    /// ISO weekday for the stored date
    pub fn compute_weekday(&self) -> u8 {
        // 1970-01-01 was a Thursday
        ((self.days_since_epoch() + 3).rem_euclid(7) + 1) as u8
    }
}

/// Real-time clock
pub trait RealTimeClock {
    /// Read the current date and time
    fn read(&mut self) -> Result<DateTime, RtcError>;

    /// Set the date and time
    fn write(&mut self, time: &DateTime) -> Result<(), RtcError>;

    /// Read the on-chip temperature sensor in tenths of a degree Celsius
    fn temperature_tenths(&mut self) -> Result<i16, RtcError>;
}
