//! Load and store the robot configuration record

use defmt::*;

use mopbot_core::config::{ConfigError, RobotConfig, MAX_CONFIG_SIZE};
use mopbot_hal_rp2040::flash::{FlashError, FlashStorage, StorageKey};
use mopbot_hal_rp2040::FlashStorageTrait;

/// Configuration persistence errors
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PersistenceError {
    /// Flash operation failed
    Flash(FlashError),
    /// Record could not be encoded, decoded or validated
    Config(ConfigError),
}

impl From<FlashError> for PersistenceError {
    fn from(e: FlashError) -> Self {
        PersistenceError::Flash(e)
    }
}

impl From<ConfigError> for PersistenceError {
    fn from(e: ConfigError) -> Self {
        PersistenceError::Config(e)
    }
}

/// Configuration persistence manager
pub struct ConfigPersistence<'d> {
    storage: FlashStorage<'d>,
}

impl<'d> ConfigPersistence<'d> {
    pub fn new(storage: FlashStorage<'d>) -> Self {
        Self { storage }
    }

    /// Load and validate the stored configuration
    pub async fn load(&mut self) -> Result<RobotConfig, PersistenceError> {
        let mut buffer = [0u8; MAX_CONFIG_SIZE];
        let len = self
            .storage
            .read(StorageKey::RobotConfig, &mut buffer)
            .await?;

        debug!("Read {} bytes of config from flash", len);

        let config = RobotConfig::from_bytes(&buffer[..len])?;
        log_config_summary(&config);
        Ok(config)
    }

    /// Validate and store a configuration
    pub async fn store(&mut self, config: &RobotConfig) -> Result<(), PersistenceError> {
        config.validate()?;

        let mut buffer = [0u8; MAX_CONFIG_SIZE];
        let bytes = config.to_bytes(&mut buffer)?;
        self.storage.write(StorageKey::RobotConfig, bytes).await?;

        info!("Stored {} bytes of config", bytes.len());
        Ok(())
    }

    /// Erase the partition and store `config` as the only record
    pub async fn reset(&mut self, config: &RobotConfig) -> Result<(), PersistenceError> {
        warn!("Erasing config partition");
        self.storage.erase_all().await?;
        self.store(config).await
    }
}

fn log_config_summary(config: &RobotConfig) {
    info!("Configuration loaded (version {})", config.version);
    debug!("  boot speed {}", config.drive.boot_speed);
    debug!(
        "  front {} cm, side {} cm, wall {} cm, every {} ms",
        config.navigation.min_front_cm,
        config.navigation.min_side_cm,
        config.navigation.max_wall_cm,
        config.navigation.eval_interval_ms
    );
    debug!(
        "  link check every {} ms, stop on check {}",
        config.link.check_interval_ms, config.link.stop_on_check
    );
}
