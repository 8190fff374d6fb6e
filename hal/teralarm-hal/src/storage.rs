//! Settings storage abstractions
//!
//! Settings are persisted as one byte per key, the layout the clock has
//! always used. The storage implementation handles wear leveling and data
//! integrity.

/// Storage keys for persisted settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Alarm minute (0-59)
    AlarmMinutes = 0,
    /// Alarm hour (0-23)
    AlarmHours = 1,
    /// Number of correct answers needed to disarm (0-99)
    AlarmChallenge = 2,
    /// Alarm enabled flag (0/1)
    AlarmState = 3,
    /// Backlight setting (0 = auto, 1 = off, 2-17 manual)
    Brightness = 4,
    /// Snooze period minutes (0-59)
    SnoozeMinutes = 5,
    /// Snooze period seconds (0-59)
    SnoozeSeconds = 6,
}

impl StorageKey {
    /// Every key, in storage order
    pub const ALL: [StorageKey; 7] = [
        StorageKey::AlarmMinutes,
        StorageKey::AlarmHours,
        StorageKey::AlarmChallenge,
        StorageKey::AlarmState,
        StorageKey::Brightness,
        StorageKey::SnoozeMinutes,
        StorageKey::SnoozeSeconds,
    ];

    /// Get the key as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a key from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }
}

/// Errors from settings storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Flash/EEPROM operation failed
    Device,
    /// Storage is full
    Full,
    /// Stored data corrupted or invalid
    Corrupted,
}

/// Persistent key-value storage for settings
///
/// Calls are synchronous: the interaction engine runs on a single
/// cooperative thread and settings writes are rare.
pub trait SettingsStore {
    /// Read the value stored under `key`, `Ok(None)` if never written
    fn load(&mut self, key: StorageKey) -> Result<Option<u8>, StorageError>;

    /// Store `value` under `key`
    ///
    /// Implementations should skip the write if the stored value is
    /// already equal, to spare flash cycles.
    fn persist(&mut self, key: StorageKey, value: u8) -> Result<(), StorageError>;
}

// Implement the sequential-storage Key trait when the feature is enabled
#[cfg(feature = "sequential-storage")]
impl sequential_storage::map::Key for StorageKey {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        if buffer.is_empty() {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        buffer[0] = self.as_u8();
        Ok(1)
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        if buffer.is_empty() {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        match StorageKey::from_u8(buffer[0]) {
            Some(key) => Ok((key, 1)),
            None => Err(sequential_storage::map::SerializationError::InvalidFormat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_byte_mapping() {
        for key in StorageKey::ALL {
            assert_eq!(StorageKey::from_u8(key.as_u8()), Some(key));
        }
        assert_eq!(StorageKey::Brightness.as_u8(), 4);
        assert_eq!(StorageKey::from_u8(7), None);
    }
}
