//! Inter-task communication channels
//!
//! Both command channels feed one input channel; only the control task
//! touches the robot state.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use mopbot_core::controller::INPUT_QUEUE_SIZE;
use mopbot_core::Input;
use mopbot_protocol::RobotMessage;

/// Channel capacity for requests to the bridge
const BRIDGE_TX_SIZE: usize = 4;

/// Parsed commands and stream events from the serial and bridge tasks
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, Input, INPUT_QUEUE_SIZE> =
    Channel::new();

/// Requests for the network bridge (command reset, resubscribe, reconnect)
pub static BRIDGE_TX: Channel<CriticalSectionRawMutex, RobotMessage, BRIDGE_TX_SIZE> =
    Channel::new();
