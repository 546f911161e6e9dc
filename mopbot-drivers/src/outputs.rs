//! Combined robot outputs
//!
//! The command arbiter drives and switches the pump through one value, so
//! the drive train and the pump are bundled here.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use mopbot_core::traits::{DriveOutput, DriveSignals, PumpOutput};

use crate::accessory::Pump;
use crate::motor::HBridge;

/// Drive train plus pump
pub struct RobotOutputs<P, M, Q> {
    pub drive: HBridge<P, M>,
    pub pump: Pump<Q>,
}

impl<P, M, Q> RobotOutputs<P, M, Q>
where
    P: OutputPin,
    M: SetDutyCycle,
    Q: OutputPin,
{
    pub fn new(drive: HBridge<P, M>, pump: Pump<Q>) -> Self {
        Self { drive, pump }
    }

    /// Output faults across drive and pump
    pub fn faults(&self) -> u32 {
        self.drive.faults() as u32 + self.pump.faults() as u32
    }
}

impl<P: OutputPin, M: SetDutyCycle, Q> DriveOutput for RobotOutputs<P, M, Q> {
    fn set_drive(&mut self, signals: DriveSignals) {
        self.drive.set_drive(signals);
    }

    fn set_speed(&mut self, duty: u8) {
        self.drive.set_speed(duty);
    }
}

impl<P, M, Q: OutputPin> PumpOutput for RobotOutputs<P, M, Q> {
    fn set_pump(&mut self, on: bool) {
        self.pump.set_pump(on);
    }

    fn is_pump_on(&self) -> bool {
        self.pump.is_pump_on()
    }
}
