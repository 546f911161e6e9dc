//! Control loop task
//!
//! Every tick moves pending inputs into the controller queue, then runs one
//! controller tick: dispatch, navigation, link check. Navigation holds block
//! the executor; the UART ring buffers absorb bytes in the meantime.

use defmt::*;
use embassy_time::{Delay, Duration, Instant, Ticker};

use mopbot_core::config::RobotConfig;
use mopbot_core::{RobotController, RobotIo};

use crate::bridge::BridgeRemote;
use crate::channels::INPUT_CHANNEL;
use crate::hardware::{Outputs, Rangers};

/// Control loop period in milliseconds
pub const TICK_INTERVAL_MS: u64 = 10;

fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

#[embassy_executor::task]
pub async fn control_task(config: RobotConfig, actuators: Outputs, sensors: Rangers) {
    info!("Control task started");

    let mut controller = RobotController::new(&config);
    let mut io = RobotIo {
        actuators,
        sensors,
        remote: BridgeRemote,
        delay: Delay,
    };

    controller.boot(now_ms(), &mut io.actuators);
    info!("Boot speed {}, drive stopped, pump off", controller.speed());

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));
    let mut reported_faults = 0u32;

    loop {
        ticker.next().await;

        while !controller.is_queue_full() {
            let Ok(input) = INPUT_CHANNEL.try_receive() else {
                break;
            };
            if controller.enqueue(input).is_err() {
                warn!("Input queue full, dropping {:?}", input);
            }
        }

        let report = controller.tick(now_ms(), &mut io);
        if report.commands > 0 || report.navigation.transitioned() {
            trace!("Tick: {:?}", report);
        }

        let faults = io.actuators.faults() + io.sensors.faults();
        if faults != reported_faults {
            warn!("{} pin faults since boot", faults);
            reported_faults = faults;
        }
    }
}
