//! Drive and pump output traits
//!
//! The drive train is two brushed DC motors on a dual H-bridge: each side
//! has a forward and a backward input, and one PWM line sets the speed of
//! both sides.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The four H-bridge direction inputs
///
/// A side with neither input set coasts. A side with both set would short
/// the bridge into brake/shoot-through depending on the driver, so no
/// [`DriveCommand`] ever produces that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveSignals {
    pub left_forward: bool,
    pub left_backward: bool,
    pub right_forward: bool,
    pub right_backward: bool,
}

impl DriveSignals {
    /// Check that no side is driven in both directions at once
    pub fn is_consistent(&self) -> bool {
        !(self.left_forward && self.left_backward) && !(self.right_forward && self.right_backward)
    }

    /// Check if any side is being driven
    pub fn is_moving(&self) -> bool {
        self.left_forward || self.left_backward || self.right_forward || self.right_backward
    }
}

/// Whole-robot drive commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DriveCommand {
    /// Both sides forward
    Forward,
    /// Both sides backward
    Backward,
    /// Left side back, right side forward (spin left in place)
    TurnLeft,
    /// Left side forward, right side back (spin right in place)
    TurnRight,
    /// Both sides released
    Stop,
}

impl DriveCommand {
    /// H-bridge inputs for this command
    pub const fn signals(self) -> DriveSignals {
        let (left_forward, left_backward, right_forward, right_backward) = match self {
            DriveCommand::Forward => (true, false, true, false),
            DriveCommand::Backward => (false, true, false, true),
            DriveCommand::TurnLeft => (false, true, true, false),
            DriveCommand::TurnRight => (true, false, false, true),
            DriveCommand::Stop => (false, false, false, false),
        };
        DriveSignals {
            left_forward,
            left_backward,
            right_forward,
            right_backward,
        }
    }
}

/// Drive train output
pub trait DriveOutput {
    /// Set the four direction inputs
    fn set_drive(&mut self, signals: DriveSignals);

    /// Set the PWM duty shared by both sides (0-255)
    fn set_speed(&mut self, duty: u8);

    /// Apply a whole-robot drive command
    fn drive(&mut self, command: DriveCommand) {
        self.set_drive(command.signals());
    }
}

/// Liquid pump output
pub trait PumpOutput {
    /// Switch the pump on or off
    fn set_pump(&mut self, on: bool);

    /// Check if the pump is currently on
    fn is_pump_on(&self) -> bool;
}
