//! RP2040-specific HAL for the cleaning robot firmware
//!
//! - Flash storage driver (implements `mopbot_hal::FlashStorage`)

#![no_std]

pub mod flash;

// Re-export shared traits from mopbot-hal for convenience
pub use mopbot_hal::{FlashStorage as FlashStorageTrait, StorageKey};
