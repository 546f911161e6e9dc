//! Board-agnostic core logic for the cleaning robot firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (drive, pump, range sensors, remote link)
//! - Mode arbitration between remote driving and autonomous navigation
//! - Autonomous navigation state machine
//! - Link health monitoring
//! - The per-tick robot controller
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

// Must come first so the logging macros are visible to every module below
#[macro_use]
mod fmt;

pub mod config;
pub mod controller;
pub mod link;
pub mod mode;
pub mod nav;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{Input, RobotController, RobotIo, TickReport};
pub use mopbot_protocol::{Command, SpeedPreset};
