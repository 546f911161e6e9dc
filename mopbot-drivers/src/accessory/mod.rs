//! Accessory outputs

pub mod pump;

pub use pump::Pump;
