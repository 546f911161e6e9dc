//! Message types for the network bridge link
//!
//! Message types are divided into two categories:
//! - Bridge → Robot: stream notifications, speed value, link status
//! - Robot → Bridge: database writes and connection management requests

use heapless::String;

use crate::frame::{Frame, FrameError};

// Message type IDs: Bridge → Robot
pub const MSG_COMMAND: u8 = 0x01;
pub const MSG_SPEED: u8 = 0x02;
pub const MSG_SPEED_UNAVAILABLE: u8 = 0x03;
pub const MSG_LINK: u8 = 0x04;
pub const MSG_STREAM_LOST: u8 = 0x05;

// Message type IDs: Robot → Bridge
pub const MSG_RESET_COMMAND: u8 = 0x20;
pub const MSG_RESUBSCRIBE: u8 = 0x21;
pub const MSG_RECONNECT: u8 = 0x22;

/// Longest command token the bridge forwards
pub const MAX_TOKEN_LEN: usize = 16;

/// Messages from the bridge to the robot
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeMessage {
    /// The command slot changed; payload is the raw string value
    Command(String<MAX_TOKEN_LEN>),
    /// The speed slot holds this value
    Speed(i32),
    /// The speed slot could not be read
    SpeedUnavailable,
    /// Network and database session state changed
    Link { up: bool },
    /// The command stream timed out or disconnected
    StreamLost { timeout: bool },
}

impl BridgeMessage {
    /// Parse a message from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        let payload = frame.payload.as_slice();
        match frame.msg_type {
            MSG_COMMAND => {
                let text = core::str::from_utf8(payload).map_err(|_| FrameError::InvalidFrame)?;
                let token = String::try_from(text).map_err(|_| FrameError::PayloadTooLarge)?;
                Ok(BridgeMessage::Command(token))
            }
            MSG_SPEED => {
                let bytes: [u8; 4] = payload.try_into().map_err(|_| FrameError::InvalidFrame)?;
                Ok(BridgeMessage::Speed(i32::from_le_bytes(bytes)))
            }
            MSG_SPEED_UNAVAILABLE => Ok(BridgeMessage::SpeedUnavailable),
            MSG_LINK => match payload {
                [flag] => Ok(BridgeMessage::Link { up: *flag != 0 }),
                _ => Err(FrameError::InvalidFrame),
            },
            MSG_STREAM_LOST => match payload {
                [flag] => Ok(BridgeMessage::StreamLost {
                    timeout: *flag != 0,
                }),
                _ => Err(FrameError::InvalidFrame),
            },
            _ => Err(FrameError::InvalidFrame),
        }
    }

    /// Encode this message into a frame (bridge side and tests)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            BridgeMessage::Command(token) => Frame::new(MSG_COMMAND, token.as_bytes()),
            BridgeMessage::Speed(value) => Frame::new(MSG_SPEED, &value.to_le_bytes()),
            BridgeMessage::SpeedUnavailable => Ok(Frame::empty(MSG_SPEED_UNAVAILABLE)),
            BridgeMessage::Link { up } => Frame::new(MSG_LINK, &[*up as u8]),
            BridgeMessage::StreamLost { timeout } => Frame::new(MSG_STREAM_LOST, &[*timeout as u8]),
        }
    }
}

/// Requests from the robot to the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RobotMessage {
    /// Write the idle sentinel to the command slot
    ResetCommand,
    /// Restart the command stream subscription
    Resubscribe,
    /// Tear down and re-establish the network session
    Reconnect,
}

impl RobotMessage {
    /// Encode this request into a frame
    pub fn to_frame(self) -> Frame {
        match self {
            RobotMessage::ResetCommand => Frame::empty(MSG_RESET_COMMAND),
            RobotMessage::Resubscribe => Frame::empty(MSG_RESUBSCRIBE),
            RobotMessage::Reconnect => Frame::empty(MSG_RECONNECT),
        }
    }

    /// Parse a request from a frame (bridge side and tests)
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_RESET_COMMAND => Ok(RobotMessage::ResetCommand),
            MSG_RESUBSCRIBE => Ok(RobotMessage::Resubscribe),
            MSG_RECONNECT => Ok(RobotMessage::Reconnect),
            _ => Err(FrameError::InvalidFrame),
        }
    }
}
