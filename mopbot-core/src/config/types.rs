//! Configuration type definitions
//!
//! These types represent the robot configuration. Configuration is stored
//! in flash as postcard-serialized binary data and validated before use.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use mopbot_protocol::SpeedPreset;

/// Current configuration layout version
pub const CONFIG_VERSION: u8 = 1;

/// Upper bound for a serialized [`RobotConfig`]
pub const MAX_CONFIG_SIZE: usize = 64;

/// Longest blocking hold accepted for turns and steer pulses
pub const MAX_HOLD_MS: u32 = 5_000;

/// Largest distance threshold accepted (beyond the ranger's reach)
pub const MAX_THRESHOLD_CM: u16 = 400;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Serialization failed or buffer too small
    Serialize,
    /// Stored bytes could not be decoded
    Deserialize,
    /// Stored layout version differs from [`CONFIG_VERSION`]
    VersionMismatch,
    /// A field is out of its accepted range
    Invalid(&'static str),
}

/// Drive train settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DriveConfig {
    /// PWM duty applied at boot (0-255)
    pub boot_speed: u8,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            boot_speed: SpeedPreset::Medium.duty(),
        }
    }
}

/// Autonomous navigation thresholds and timings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavigationConfig {
    /// Obstacle ahead when front reads below this (cm)
    pub min_front_cm: u16,
    /// Side too close when it reads below this (cm)
    pub min_side_cm: u16,
    /// A wall is present on a side reading below this (cm)
    pub max_wall_cm: u16,
    /// Minimum time between two evaluations (ms)
    pub eval_interval_ms: u32,
    /// Blocking hold for a full turn (ms)
    pub turn_hold_ms: u32,
    /// Blocking hold for a wall-follow steering correction (ms)
    pub steer_pulse_ms: u32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            min_front_cm: 50,
            min_side_cm: 35,
            max_wall_cm: 40,
            eval_interval_ms: 500,
            turn_hold_ms: 500,
            steer_pulse_ms: 150,
        }
    }
}

/// Remote link supervision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkConfig {
    /// Time between two connectivity checks (ms)
    pub check_interval_ms: u32,
    /// Re-apply stop on every check while in manual mode
    pub stop_on_check: bool,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            check_interval_ms: 30_000,
            stop_on_check: true,
        }
    }
}

/// Complete robot configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RobotConfig {
    /// Layout version for compatibility checks
    pub version: u8,
    pub drive: DriveConfig,
    pub navigation: NavigationConfig,
    pub link: LinkConfig,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            drive: DriveConfig::default(),
            navigation: NavigationConfig::default(),
            link: LinkConfig::default(),
        }
    }
}

impl RobotConfig {
    /// Check every field against its accepted range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::VersionMismatch);
        }

        let nav = &self.navigation;
        for (value, name) in [
            (nav.min_front_cm, "min_front_cm"),
            (nav.min_side_cm, "min_side_cm"),
            (nav.max_wall_cm, "max_wall_cm"),
        ] {
            if value == 0 || value > MAX_THRESHOLD_CM {
                return Err(ConfigError::Invalid(name));
            }
        }
        if nav.eval_interval_ms == 0 {
            return Err(ConfigError::Invalid("eval_interval_ms"));
        }
        if nav.turn_hold_ms > MAX_HOLD_MS {
            return Err(ConfigError::Invalid("turn_hold_ms"));
        }
        if nav.steer_pulse_ms > MAX_HOLD_MS {
            return Err(ConfigError::Invalid("steer_pulse_ms"));
        }
        if self.link.check_interval_ms == 0 {
            return Err(ConfigError::Invalid("check_interval_ms"));
        }
        Ok(())
    }

    /// Serialize into `buf`, returning the used prefix
    #[cfg(feature = "serde")]
    pub fn to_bytes<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Serialize)
    }

    /// Decode and validate a stored configuration
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RobotConfig::default();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.drive.boot_speed, 150);
        assert_eq!(config.navigation.min_front_cm, 50);
        assert_eq!(config.navigation.min_side_cm, 35);
        assert_eq!(config.navigation.max_wall_cm, 40);
        assert_eq!(config.navigation.eval_interval_ms, 500);
        assert_eq!(config.navigation.turn_hold_ms, 500);
        assert_eq!(config.link.check_interval_ms, 30_000);
        assert!(config.link.stop_on_check);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let mut config = RobotConfig::default();
        config.navigation.min_front_cm = 0;
        assert_eq!(config.validate(), Err(ConfigError::Invalid("min_front_cm")));

        let mut config = RobotConfig::default();
        config.navigation.turn_hold_ms = MAX_HOLD_MS + 1;
        assert_eq!(config.validate(), Err(ConfigError::Invalid("turn_hold_ms")));

        let mut config = RobotConfig::default();
        config.link.check_interval_ms = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::Invalid("check_interval_ms"))
        );

        let mut config = RobotConfig::default();
        config.version = CONFIG_VERSION + 1;
        assert_eq!(config.validate(), Err(ConfigError::VersionMismatch));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_stored_config_is_validated() {
        let mut config = RobotConfig::default();
        config.navigation.max_wall_cm = 25;
        config.link.stop_on_check = false;

        let mut buf = [0u8; MAX_CONFIG_SIZE];
        let used = config.to_bytes(&mut buf).unwrap().len();
        assert_eq!(RobotConfig::from_bytes(&buf[..used]), Ok(config));

        config.navigation.eval_interval_ms = 0;
        let used = config.to_bytes(&mut buf).unwrap().len();
        assert_eq!(
            RobotConfig::from_bytes(&buf[..used]),
            Err(ConfigError::Invalid("eval_interval_ms"))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_garbage_is_rejected() {
        assert_eq!(
            RobotConfig::from_bytes(&[]),
            Err(ConfigError::Deserialize)
        );
    }
}
