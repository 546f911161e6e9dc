//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod drive;
pub mod range;
pub mod remote;
pub mod time;

pub use drive::{DriveCommand, DriveOutput, DriveSignals, PumpOutput};
pub use range::{Distance, RangeSensors, SensorId, SensorReading};
pub use remote::{RemoteChannel, RemoteError};
pub use time::TimeSource;

/// Everything on the robot that the command arbiter may actuate
pub trait Actuators: DriveOutput + PumpOutput {}

// Blanket implementation
impl<T: DriveOutput + PumpOutput> Actuators for T {}
