//! Flash settings store for RP2040
//!
//! Uses sequential-storage for wear-leveled key-value storage
//! in the last 64KB of flash. One byte is stored per [`StorageKey`].
//!
//! Implements the synchronous `SettingsStore` trait from `teralarm-hal` by
//! driving the async flash operations to completion in place.

use embassy_futures::block_on;
use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

pub use teralarm_hal::storage::{StorageError, StorageKey};

/// Flash storage configuration
pub const FLASH_SIZE: usize = 2 * 1024 * 1024; // 2MB flash on the Pico
pub const SETTINGS_PARTITION_SIZE: usize = 64 * 1024;
pub const SETTINGS_PARTITION_START: usize = FLASH_SIZE - SETTINGS_PARTITION_SIZE;

/// Flash range for the settings partition
pub const SETTINGS_RANGE: core::ops::Range<u32> =
    (SETTINGS_PARTITION_START as u32)..(FLASH_SIZE as u32);

/// Scratch space for one key/value item
const ITEM_BUFFER_SIZE: usize = 32;

/// RP2040 flash settings store
pub struct Rp2040SettingsStore<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
}

impl<'d> Rp2040SettingsStore<'d> {
    /// Create a new settings store instance
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
        }
    }

    async fn fetch(&mut self, key: StorageKey) -> Result<Option<u8>, StorageError> {
        let mut buffer = [0u8; ITEM_BUFFER_SIZE];
        map::fetch_item::<StorageKey, u8, _>(
            &mut self.flash,
            SETTINGS_RANGE,
            &mut NoCache::new(),
            &mut buffer,
            &key,
        )
        .await
        .map_err(map_error)
    }

    async fn store(&mut self, key: StorageKey, value: u8) -> Result<(), StorageError> {
        if self.fetch(key).await? == Some(value) {
            return Ok(());
        }

        let mut buffer = [0u8; ITEM_BUFFER_SIZE];
        map::store_item(
            &mut self.flash,
            SETTINGS_RANGE,
            &mut NoCache::new(),
            &mut buffer,
            &key,
            &value,
        )
        .await
        .map_err(map_error)
    }
}

fn map_error<E>(e: sequential_storage::Error<E>) -> StorageError {
    match e {
        sequential_storage::Error::Storage { .. } => StorageError::Device,
        sequential_storage::Error::FullStorage => StorageError::Full,
        _ => StorageError::Corrupted,
    }
}

impl teralarm_hal::SettingsStore for Rp2040SettingsStore<'_> {
    fn load(&mut self, key: StorageKey) -> Result<Option<u8>, StorageError> {
        block_on(self.fetch(key))
    }

    fn persist(&mut self, key: StorageKey, value: u8) -> Result<(), StorageError> {
        block_on(self.store(key, value))
    }
}
