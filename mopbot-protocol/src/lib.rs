//! Mopbot command and link protocol
//!
//! Everything that crosses a wire lives here:
//!
//! - [`Command`]: the closed command vocabulary, parsed once at the channel
//!   boundary from a local serial byte or a remote database token
//! - [`remote`]: the path contract of the remote real-time database
//! - [`Frame`] and [`messages`]: the UART link to the network bridge that
//!   hosts the database client
//!
//! # Bridge link framing
//!
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────┐
//! │ START │ LENGTH │ TYPE │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 1B     │ 1B   │ 0–32B       │ 1B       │
//! └───────┴────────┴──────┴─────────────┴──────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod frame;
pub mod messages;
pub mod remote;

pub use command::{Command, SpeedPreset};
pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_PAYLOAD_SIZE};
pub use messages::{BridgeMessage, RobotMessage, MAX_TOKEN_LEN};
