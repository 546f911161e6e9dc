//! Robot-side view of the network bridge
//!
//! The bridge reports link state and the speed slot; the robot answers with
//! requests. Requests that need a live session wait here while the link is
//! down. A resubscribe is never dropped: it stays pending until the link
//! reports up and the request has been handed to the transmitter.

use mopbot_protocol::{BridgeMessage, RobotMessage};

use crate::traits::RemoteError;

/// Mirrored bridge state plus deferred requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BridgeState {
    link_up: bool,
    speed: Option<Result<i32, RemoteError>>,
    resubscribe_pending: bool,
}

impl Default for BridgeState {
    fn default() -> Self {
        Self::new()
    }
}

impl BridgeState {
    /// Link down, nothing mirrored, nothing pending
    pub const fn new() -> Self {
        Self {
            link_up: false,
            speed: None,
            resubscribe_pending: false,
        }
    }

    pub fn is_link_up(&self) -> bool {
        self.link_up
    }

    pub fn is_resubscribe_pending(&self) -> bool {
        self.resubscribe_pending
    }

    /// Last mirrored speed slot
    pub fn fetch_speed(&self) -> Result<i32, RemoteError> {
        if !self.link_up {
            return Err(RemoteError::LinkDown);
        }
        self.speed.unwrap_or(Err(RemoteError::NoValue))
    }

    /// Record a bridge report
    ///
    /// Returns a deferred request that can go out now that the link is up.
    /// Command and stream reports carry no state and are ignored.
    pub fn apply(&mut self, message: &BridgeMessage) -> Option<RobotMessage> {
        match message {
            BridgeMessage::Speed(value) => self.speed = Some(Ok(*value)),
            BridgeMessage::SpeedUnavailable => self.speed = Some(Err(RemoteError::NoValue)),
            BridgeMessage::Link { up } => {
                self.link_up = *up;
                return self.take_pending();
            }
            BridgeMessage::Command(_) | BridgeMessage::StreamLost { .. } => {}
        }
        None
    }

    /// Decide what to do with an outgoing request
    ///
    /// `Ok(Some(message))` goes out now and `Ok(None)` was deferred.
    /// Command resets are only meaningful with a session and fail with
    /// [`RemoteError::LinkDown`]. Reconnects always go out.
    pub fn request(&mut self, message: RobotMessage) -> Result<Option<RobotMessage>, RemoteError> {
        match message {
            RobotMessage::Reconnect => Ok(Some(message)),
            RobotMessage::ResetCommand if self.link_up => Ok(Some(message)),
            RobotMessage::ResetCommand => Err(RemoteError::LinkDown),
            RobotMessage::Resubscribe if self.link_up => {
                self.resubscribe_pending = false;
                Ok(Some(message))
            }
            RobotMessage::Resubscribe => {
                debug!("link down, resubscribe deferred");
                self.resubscribe_pending = true;
                Ok(None)
            }
        }
    }

    /// Put a resubscribe back after the transmitter refused it
    pub fn defer_resubscribe(&mut self) {
        self.resubscribe_pending = true;
    }

    /// Pending resubscribe, if the link is up to carry it
    pub fn take_pending(&mut self) -> Option<RobotMessage> {
        if self.link_up && self.resubscribe_pending {
            self.resubscribe_pending = false;
            Some(RobotMessage::Resubscribe)
        } else {
            None
        }
    }
}
