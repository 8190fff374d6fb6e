//! Persisted user settings
//!
//! Each field lives under its own [`StorageKey`] as a single byte. Loading
//! validates every byte against its range and falls back to the default
//! for anything missing or corrupt, so a fresh or damaged store still
//! boots into a usable clock.

use teralarm_hal::{SettingsStore, StorageKey};

use crate::alarm::AlarmConfig;
use crate::brightness::{BrightnessMode, MAX_LEVEL};
use crate::editor::challenge::MAX_CHALLENGE;

/// Runtime configuration of the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Settings {
    pub alarm_hour: u8,
    pub alarm_minute: u8,
    pub alarm_enabled: bool,
    /// Correct answers needed to disarm, 0 for none
    pub challenge: u8,
    pub snooze_minutes: u8,
    pub snooze_seconds: u8,
    /// 0 = auto, 1 = off, 2-17 manual level
    pub brightness: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            alarm_hour: 7,
            alarm_minute: 0,
            alarm_enabled: false,
            challenge: 0,
            snooze_minutes: 0,
            snooze_seconds: 0,
            brightness: BrightnessMode::Auto.as_setting(),
        }
    }
}

impl Settings {
    /// Read every key from `store`, keeping defaults for bad entries
    pub fn load<S: SettingsStore>(store: &mut S) -> Self {
        let mut settings = Self::default();
        for key in StorageKey::ALL {
            match store.load(key) {
                Ok(Some(value)) => {
                    if !settings.set(key, value) {
                        warn!("Setting {} out of range ({}), using default", key, value);
                    }
                }
                Ok(None) => debug!("Setting {} not stored, using default", key),
                Err(e) => warn!("Failed to load setting {}: {}", key, e),
            }
        }
        info!("Settings loaded");
        settings
    }

    /// Stored byte for `key`
    pub fn value(&self, key: StorageKey) -> u8 {
        match key {
            StorageKey::AlarmMinutes => self.alarm_minute,
            StorageKey::AlarmHours => self.alarm_hour,
            StorageKey::AlarmChallenge => self.challenge,
            StorageKey::AlarmState => u8::from(self.alarm_enabled),
            StorageKey::Brightness => self.brightness,
            StorageKey::SnoozeMinutes => self.snooze_minutes,
            StorageKey::SnoozeSeconds => self.snooze_seconds,
        }
    }

    /// Set `key` from its stored byte
    ///
    /// Returns false and leaves the field untouched if `value` is out of
    /// range for the key.
    pub fn set(&mut self, key: StorageKey, value: u8) -> bool {
        if !Self::in_range(key, value) {
            return false;
        }
        match key {
            StorageKey::AlarmMinutes => self.alarm_minute = value,
            StorageKey::AlarmHours => self.alarm_hour = value,
            StorageKey::AlarmChallenge => self.challenge = value,
            StorageKey::AlarmState => self.alarm_enabled = value == 1,
            StorageKey::Brightness => self.brightness = value,
            StorageKey::SnoozeMinutes => self.snooze_minutes = value,
            StorageKey::SnoozeSeconds => self.snooze_seconds = value,
        }
        true
    }

    /// Valid byte range of each key
    pub fn in_range(key: StorageKey, value: u8) -> bool {
        let max = match key {
            StorageKey::AlarmMinutes | StorageKey::SnoozeMinutes | StorageKey::SnoozeSeconds => 59,
            StorageKey::AlarmHours => 23,
            StorageKey::AlarmChallenge => MAX_CHALLENGE,
            StorageKey::AlarmState => 1,
            StorageKey::Brightness => MAX_LEVEL,
        };
        value <= max
    }

    /// Write the current value of each key in `keys`
    ///
    /// Failures are logged and the in-memory value is kept.
    pub fn persist<S: SettingsStore>(&self, store: &mut S, keys: &[StorageKey]) {
        for &key in keys {
            let value = self.value(key);
            match store.persist(key, value) {
                Ok(()) => debug!("Persisted {} = {}", key, value),
                Err(e) => warn!("Failed to persist {}: {}", key, e),
            }
        }
    }

    /// Snooze period in milliseconds
    pub fn snooze_ms(&self) -> u32 {
        (u32::from(self.snooze_minutes) * 60 + u32::from(self.snooze_seconds)) * 1000
    }

    pub fn brightness_mode(&self) -> BrightnessMode {
        BrightnessMode::from_setting(self.brightness)
    }

    /// What an alarm session needs
    pub fn alarm_config(&self) -> AlarmConfig {
        AlarmConfig {
            challenge: self.challenge,
            snooze_ms: self.snooze_ms(),
        }
    }
}
