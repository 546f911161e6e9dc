//! Hardware driver implementations
//!
//! This crate provides `embedded-hal` 1.0 implementations of the traits
//! defined in mopbot-core:
//!
//! - Dual H-bridge drive with a shared PWM speed line
//! - Liquid pump switch
//! - HC-SR04 ultrasonic rangers
//!
//! Pin errors never abort an operation. Each driver counts them instead,
//! and a ranger that cannot read its echo pin reports no echo.

#![no_std]
#![deny(unsafe_code)]

pub mod accessory;
pub mod motor;
pub mod outputs;
pub mod sensor;

pub use accessory::Pump;
pub use motor::HBridge;
pub use outputs::RobotOutputs;
pub use sensor::{Hcsr04, RangerArray};
