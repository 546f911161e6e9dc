//! Concrete hardware types for the RP2040 board

use embassy_rp::gpio::{Input, Output};
use embassy_rp::pwm::PwmOutput;
use embassy_time::{Delay, Instant};

use mopbot_core::traits::TimeSource;
use mopbot_drivers::{RangerArray, RobotOutputs};

/// Microsecond clock backed by the embassy time driver
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl TimeSource for EmbassyClock {
    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }
}

/// H-bridge plus pump
pub type Outputs = RobotOutputs<Output<'static>, PwmOutput<'static>, Output<'static>>;

/// Front, left and right HC-SR04 rangers
pub type Rangers = RangerArray<Output<'static>, Input<'static>, Delay, EmbassyClock>;
