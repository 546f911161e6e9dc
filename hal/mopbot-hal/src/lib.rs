//! Mopbot Hardware Abstraction Layer
//!
//! Chip-agnostic persistent storage: the storage keys the firmware uses and
//! the async key-value trait a chip HAL implements on its flash.
//!
//! ```text
//! ┌─────────────────────────────────┐
//! │  mopbot-firmware                │
//! └─────────────────────────────────┘
//!                 │
//!                 ▼
//! ┌─────────────────────────────────┐
//! │  mopbot-hal (this crate)        │
//! └─────────────────────────────────┘
//!                 │
//!                 ▼
//! ┌─────────────────────────────────┐
//! │  mopbot-hal-rp2040              │
//! └─────────────────────────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod flash;

pub use flash::{FlashError, FlashStorage, StorageKey};
