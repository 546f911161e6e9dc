//! Configuration persistence
//!
//! The robot configuration is a postcard record in the flash key-value store.

pub mod loader;

pub use loader::{ConfigPersistence, PersistenceError};
