//! Robot command vocabulary
//!
//! Both command channels speak the same single-character vocabulary. The
//! local serial link sends one byte per command; the remote database stream
//! delivers the same characters as text tokens, plus the `speed` token.

/// Drive speed presets selectable from the local serial link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpeedPreset {
    Low,
    Medium,
    Fast,
    Max,
}

impl SpeedPreset {
    /// PWM duty for this preset (0-255)
    pub const fn duty(self) -> u8 {
        match self {
            SpeedPreset::Low => 100,
            SpeedPreset::Medium => 150,
            SpeedPreset::Fast => 200,
            SpeedPreset::Max => 255,
        }
    }

    /// Human-readable preset name for status lines
    pub const fn label(self) -> &'static str {
        match self {
            SpeedPreset::Low => "Low",
            SpeedPreset::Medium => "Medium",
            SpeedPreset::Fast => "Fast",
            SpeedPreset::Max => "Max",
        }
    }
}

/// A single robot command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Drive both sides forward
    Forward,
    /// Drive both sides backward
    Backward,
    /// Spin left in place
    Left,
    /// Spin right in place
    Right,
    /// Release both drive sides
    Stop,
    /// Switch the liquid pump on
    PumpOn,
    /// Switch the liquid pump off
    PumpOff,
    /// Hand the drive over to the autonomous navigator
    AutonomousOn,
    /// Take the drive back from the autonomous navigator
    AutonomousOff,
    /// Fetch a new drive speed from the remote database
    SpeedQuery,
    /// Apply a fixed speed preset (local link only)
    SpeedPreset(SpeedPreset),
    /// Anything outside the vocabulary
    Unrecognized,
}

// Wire characters shared by both channels
const CMD_FORWARD: u8 = b'F';
const CMD_BACKWARD: u8 = b'B';
const CMD_LEFT: u8 = b'L';
const CMD_RIGHT: u8 = b'R';
const CMD_STOP: u8 = b'S';
const CMD_PUMP_ON: u8 = b'W';
const CMD_PUMP_OFF: u8 = b'w';
const CMD_AUTO_ON: u8 = b'A';
const CMD_AUTO_OFF: u8 = b'a';

/// Remote token asking the robot to fetch the speed value
pub const SPEED_TOKEN: &str = "speed";

impl Command {
    /// Parse a byte from the local serial link
    ///
    /// Returns `None` for line terminators so a terminal that appends
    /// `\r\n` does not produce spurious unrecognized commands.
    pub fn from_byte(byte: u8) -> Option<Self> {
        let cmd = match byte {
            b'\r' | b'\n' => return None,
            CMD_FORWARD => Command::Forward,
            CMD_BACKWARD => Command::Backward,
            CMD_LEFT => Command::Left,
            CMD_RIGHT => Command::Right,
            CMD_STOP => Command::Stop,
            CMD_PUMP_ON => Command::PumpOn,
            CMD_PUMP_OFF => Command::PumpOff,
            CMD_AUTO_ON => Command::AutonomousOn,
            CMD_AUTO_OFF => Command::AutonomousOff,
            b'1' => Command::SpeedPreset(SpeedPreset::Low),
            b'2' => Command::SpeedPreset(SpeedPreset::Medium),
            b'3' => Command::SpeedPreset(SpeedPreset::Fast),
            b'4' => Command::SpeedPreset(SpeedPreset::Max),
            _ => Command::Unrecognized,
        };
        Some(cmd)
    }

    /// Parse a token delivered by the remote command stream
    ///
    /// Returns `None` for the idle sentinel and for empty values: the robot
    /// writes the sentinel back after a speed query and the stream echoes
    /// that write.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() || token == crate::remote::IDLE_COMMAND {
            return None;
        }
        if token == SPEED_TOKEN {
            return Some(Command::SpeedQuery);
        }

        match token.as_bytes() {
            // Presets are a local-link feature only
            [b'1'..=b'4'] => Some(Command::Unrecognized),
            [byte] => Command::from_byte(*byte),
            _ => Some(Command::Unrecognized),
        }
    }

    /// Short name for status lines
    pub fn name(&self) -> &'static str {
        match self {
            Command::Forward => "forward",
            Command::Backward => "backward",
            Command::Left => "left",
            Command::Right => "right",
            Command::Stop => "stop",
            Command::PumpOn => "pump-on",
            Command::PumpOff => "pump-off",
            Command::AutonomousOn => "autonomous-on",
            Command::AutonomousOff => "autonomous-off",
            Command::SpeedQuery => "speed-query",
            Command::SpeedPreset(_) => "speed-preset",
            Command::Unrecognized => "unrecognized",
        }
    }
}
