//! Mopbot - Floor Cleaning Robot Firmware
//!
//! Main firmware binary for an RP2040 board driving an L298N-style
//! H-bridge, a liquid pump and three HC-SR04 rangers. Commands arrive one
//! byte at a time on the local serial port, or as tokens from the remote
//! database through a UART network bridge.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::{UART0, UART1};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use mopbot_core::config::RobotConfig;
use mopbot_drivers::{HBridge, Hcsr04, Pump, RangerArray, RobotOutputs};
use mopbot_drivers::motor::HBridgePins;
use mopbot_hal_rp2040::flash::{FlashError, FlashStorage};

use crate::config::{ConfigPersistence, PersistenceError};
use crate::hardware::{EmbassyClock, Outputs, Rangers};

mod bridge;
mod channels;
mod config;
mod hardware;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

/// PWM wrap value; 125 MHz / 62_500 is a 2 kHz carrier
const PWM_TOP: u16 = 62_499;

/// Bridge link baud rate
const BRIDGE_BAUD: u32 = 115_200;

// UART ring buffers (must live forever)
static SERIAL_TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static SERIAL_RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static BRIDGE_TX_BUF: StaticCell<[u8; 128]> = StaticCell::new();
static BRIDGE_RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Mopbot firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config(FlashStorage::new(p.FLASH, p.DMA_CH0)).await;

    // Drive: IN1..IN4 on GP2..GP5, speed PWM on GP6 (slice 3, channel A)
    let direction = HBridgePins {
        left_forward: Output::new(p.PIN_2, Level::Low),
        left_backward: Output::new(p.PIN_3, Level::Low),
        right_forward: Output::new(p.PIN_4, Level::Low),
        right_backward: Output::new(p.PIN_5, Level::Low),
    };
    let mut pwm_config = PwmConfig::default();
    pwm_config.top = PWM_TOP;
    let (speed_pwm, _) = Pwm::new_output_a(p.PWM_SLICE3, p.PIN_6, pwm_config).split();
    let Some(speed_pwm) = speed_pwm else {
        defmt::panic!("speed PWM channel unavailable");
    };

    let outputs: Outputs = RobotOutputs::new(
        HBridge::new(direction, speed_pwm),
        Pump::new_active_high(Output::new(p.PIN_7, Level::Low)),
    );

    // Rangers: trigger/echo pairs on GP10/11, GP12/13, GP14/15
    let rangers: Rangers = RangerArray::new(
        Hcsr04::new(
            Output::new(p.PIN_10, Level::Low),
            Input::new(p.PIN_11, Pull::Down),
        ),
        Hcsr04::new(
            Output::new(p.PIN_12, Level::Low),
            Input::new(p.PIN_13, Pull::Down),
        ),
        Hcsr04::new(
            Output::new(p.PIN_14, Level::Low),
            Input::new(p.PIN_15, Pull::Down),
        ),
        Delay,
        EmbassyClock,
    );
    info!("Drive, pump and rangers initialized");

    // Local serial console on UART0 (GP0 TX, GP1 RX), 115200 default
    let serial = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default())
        .into_buffered(
            Irqs,
            SERIAL_TX_BUF.init([0u8; 64]),
            SERIAL_RX_BUF.init([0u8; 64]),
        );
    let (_serial_tx, serial_rx) = serial.split();

    // Network bridge on UART1 (GP8 TX, GP9 RX)
    let bridge_config = {
        let mut cfg = UartConfig::default();
        cfg.baudrate = BRIDGE_BAUD;
        cfg
    };
    let bridge = Uart::new_blocking(p.UART1, p.PIN_8, p.PIN_9, bridge_config).into_buffered(
        Irqs,
        BRIDGE_TX_BUF.init([0u8; 128]),
        BRIDGE_RX_BUF.init([0u8; 256]),
    );
    let (bridge_tx, bridge_rx) = bridge.split();
    info!("UARTs initialized");

    spawner.spawn(unwrap!(tasks::serial_rx_task(serial_rx)));
    spawner.spawn(unwrap!(tasks::bridge_rx_task(bridge_rx)));
    spawner.spawn(unwrap!(tasks::bridge_tx_task(bridge_tx)));
    spawner.spawn(unwrap!(tasks::control_task(config, outputs, rangers)));

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Load the stored configuration, or fall back to the compiled defaults
///
/// Defaults are written back when the store is empty, and the partition
/// is wiped first when the storage map itself is corrupt.
async fn load_config(storage: FlashStorage<'static>) -> RobotConfig {
    let mut persistence = ConfigPersistence::new(storage);

    match persistence.load().await {
        Ok(config) => config,
        Err(PersistenceError::Flash(FlashError::NotFound)) => {
            info!("No configuration in flash, storing defaults");
            let config = RobotConfig::default();
            if let Err(e) = persistence.store(&config).await {
                warn!("Failed to store default configuration: {:?}", e);
            }
            config
        }
        Err(PersistenceError::Flash(FlashError::Storage)) => {
            warn!("Config partition corrupt, resetting to defaults");
            let config = RobotConfig::default();
            if let Err(e) = persistence.reset(&config).await {
                warn!("Failed to reset config partition: {:?}", e);
            }
            config
        }
        Err(e) => {
            warn!("Stored configuration unusable ({:?}), using defaults", e);
            RobotConfig::default()
        }
    }
}
