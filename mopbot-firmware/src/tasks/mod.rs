//! Embassy async tasks
//!
//! The serial and bridge tasks only parse and forward. The control task
//! owns the robot state and every actuator.

pub mod bridge_rx;
pub mod bridge_tx;
pub mod control;
pub mod serial_rx;

pub use bridge_rx::bridge_rx_task;
pub use bridge_tx::bridge_tx_task;
pub use control::control_task;
pub use serial_rx::serial_rx_task;
