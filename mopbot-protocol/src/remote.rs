//! Remote database path contract
//!
//! The robot's node in the real-time database looks like:
//!
//! ```text
//! /esp32_cleaning_bot/triggers/command   string, one command per change
//! /esp32_cleaning_bot/triggers/speed     integer PWM duty
//! ```

/// Root node of this robot in the remote database
pub const ROOT_PATH: &str = "/esp32_cleaning_bot";

/// Subscribed command slot
pub const COMMAND_PATH: &str = "/esp32_cleaning_bot/triggers/command";

/// Speed value read on a speed query
pub const SPEED_PATH: &str = "/esp32_cleaning_bot/triggers/speed";

/// Value written to the command slot once a speed query has been handled
pub const IDLE_COMMAND: &str = "none";
