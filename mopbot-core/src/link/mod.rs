//! Remote link supervision
//!
//! Tracks when the next connectivity check is due, how many checks in a
//! row found the link down, and the robot's mirror of the network bridge.

pub mod bridge;
pub mod monitor;

pub use bridge::BridgeState;
pub use monitor::{LinkMonitor, LinkStatus};
