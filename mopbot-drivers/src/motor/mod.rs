//! Drive train driver
//!
//! Two brushed DC motors on a dual H-bridge (L298N style): two direction
//! inputs per side and one PWM speed line shared by both sides.

pub mod hbridge;

pub use hbridge::{HBridge, HBridgePins};
