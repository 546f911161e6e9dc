//! Recording test doubles for the hardware traits

use std::collections::VecDeque;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::traits::{
    Distance, DriveCommand, DriveOutput, DriveSignals, PumpOutput, RangeSensors, RemoteChannel,
    RemoteError, SensorId, SensorReading,
};

/// One write to the actuators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveEvent {
    Drive(DriveSignals),
    Speed(u8),
    Pump(bool),
}

/// Actuators that log every write
#[derive(Debug, Default)]
pub struct MockActuators {
    pub events: Vec<DriveEvent>,
    pub pump: bool,
}

impl MockActuators {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drive writes mapped back to commands
    pub fn drives(&self) -> Vec<DriveCommand> {
        const ALL: [DriveCommand; 5] = [
            DriveCommand::Forward,
            DriveCommand::Backward,
            DriveCommand::TurnLeft,
            DriveCommand::TurnRight,
            DriveCommand::Stop,
        ];

        self.events
            .iter()
            .filter_map(|event| match event {
                DriveEvent::Drive(signals) => Some(
                    *ALL.iter()
                        .find(|cmd| cmd.signals() == *signals)
                        .expect("drive signals outside the command set"),
                ),
                _ => None,
            })
            .collect()
    }
}

impl DriveOutput for MockActuators {
    fn set_drive(&mut self, signals: DriveSignals) {
        self.events.push(DriveEvent::Drive(signals));
    }

    fn set_speed(&mut self, duty: u8) {
        self.events.push(DriveEvent::Speed(duty));
    }
}

impl PumpOutput for MockActuators {
    fn set_pump(&mut self, on: bool) {
        self.pump = on;
        self.events.push(DriveEvent::Pump(on));
    }

    fn is_pump_on(&self) -> bool {
        self.pump
    }
}

/// Sensors that replay queued readings, then report nothing in range
#[derive(Debug, Default)]
pub struct ScriptedSensors {
    script: VecDeque<SensorReading>,
    current: Option<SensorReading>,
    /// Full samples taken
    pub samples: usize,
}

impl ScriptedSensors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, reading: SensorReading) {
        self.script.push_back(reading);
    }
}

impl RangeSensors for ScriptedSensors {
    fn measure(&mut self, sensor: SensorId) -> Distance {
        let reading = self.current.unwrap_or_else(SensorReading::clear);
        match sensor {
            SensorId::Front => reading.front,
            SensorId::Left => reading.left,
            SensorId::Right => reading.right,
        }
    }

    fn sample(&mut self) -> SensorReading {
        self.samples += 1;
        let reading = self.script.pop_front().unwrap_or_else(SensorReading::clear);
        self.current = Some(reading);
        reading
    }
}

/// Remote channel with scripted results and call counters
#[derive(Debug)]
pub struct MockRemote {
    pub speed: Result<i32, RemoteError>,
    pub reset_result: Result<(), RemoteError>,
    pub resubscribe_result: Result<(), RemoteError>,
    pub alive: bool,
    pub fetches: usize,
    pub resets: usize,
    pub reconnects: usize,
    pub resubscribes: usize,
}

impl MockRemote {
    pub fn new() -> Self {
        Self {
            speed: Ok(150),
            reset_result: Ok(()),
            resubscribe_result: Ok(()),
            alive: true,
            fetches: 0,
            resets: 0,
            reconnects: 0,
            resubscribes: 0,
        }
    }
}

impl RemoteChannel for MockRemote {
    fn fetch_speed(&mut self) -> Result<i32, RemoteError> {
        self.fetches += 1;
        self.speed
    }

    fn reset_command(&mut self) -> Result<(), RemoteError> {
        self.resets += 1;
        self.reset_result
    }

    fn is_alive(&mut self) -> bool {
        self.alive
    }

    fn reconnect(&mut self) -> Result<(), RemoteError> {
        self.reconnects += 1;
        Ok(())
    }

    fn resubscribe(&mut self) -> Result<(), RemoteError> {
        self.resubscribes += 1;
        self.resubscribe_result
    }
}

/// Delay that records millisecond holds instead of sleeping
#[derive(Debug, Default)]
pub struct MockDelay {
    pub holds: Vec<u32>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.holds.push(ms);
    }
}
