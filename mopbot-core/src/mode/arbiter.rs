//! Command dispatch
//!
//! The arbiter owns the drive mode and the speed setting. Each command is
//! routed to its effect exactly once; manual drive commands always win the
//! drive back from the navigator.

use mopbot_protocol::Command;

use crate::traits::{Actuators, DriveCommand, RemoteChannel};

/// Who owns the drive train
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RobotMode {
    /// Driven by the most recent remote or local command
    #[default]
    Manual,
    /// Driven by the navigator
    Autonomous,
}

/// Effects of dispatching one command that the control loop cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dispatch {
    /// A drive command was written this dispatch
    pub drove: bool,
    /// The navigator must restart from cruising
    pub engage_navigator: bool,
}

impl Dispatch {
    const NONE: Self = Self {
        drove: false,
        engage_navigator: false,
    };

    const DROVE: Self = Self {
        drove: true,
        engage_navigator: false,
    };
}

/// Mode arbiter
#[derive(Debug, Clone)]
pub struct ModeArbiter {
    mode: RobotMode,
    speed: u8,
}

impl ModeArbiter {
    /// Create an arbiter in manual mode with the given speed
    pub fn new(speed: u8) -> Self {
        Self {
            mode: RobotMode::Manual,
            speed,
        }
    }

    pub fn mode(&self) -> RobotMode {
        self.mode
    }

    /// Current PWM duty
    pub fn speed(&self) -> u8 {
        self.speed
    }

    pub fn is_autonomous(&self) -> bool {
        self.mode == RobotMode::Autonomous
    }

    /// Route one command to its effects
    pub fn dispatch<A, R>(&mut self, command: Command, actuators: &mut A, remote: &mut R) -> Dispatch
    where
        A: Actuators,
        R: RemoteChannel,
    {
        match command {
            Command::Forward => self.manual(DriveCommand::Forward, actuators),
            Command::Backward => self.manual(DriveCommand::Backward, actuators),
            Command::Left => self.manual(DriveCommand::TurnLeft, actuators),
            Command::Right => self.manual(DriveCommand::TurnRight, actuators),
            Command::Stop => self.manual(DriveCommand::Stop, actuators),

            Command::PumpOn | Command::PumpOff => {
                let on = command == Command::PumpOn;
                actuators.set_pump(on);
                info!("pump {}", if on { "on" } else { "off" });
                Dispatch::NONE
            }

            Command::AutonomousOn => {
                self.mode = RobotMode::Autonomous;
                info!("autonomous mode on");
                Dispatch {
                    drove: false,
                    engage_navigator: true,
                }
            }

            Command::AutonomousOff => {
                self.mode = RobotMode::Manual;
                actuators.drive(DriveCommand::Stop);
                info!("autonomous mode off");
                Dispatch::DROVE
            }

            Command::SpeedQuery => {
                self.query_speed(actuators, remote);
                Dispatch::NONE
            }

            Command::SpeedPreset(preset) => {
                self.apply_speed(preset.duty(), actuators);
                info!("speed preset {}: {}", preset.label(), preset.duty());
                Dispatch::NONE
            }

            Command::Unrecognized => {
                warn!("unrecognized command");
                if self.is_autonomous() {
                    Dispatch::NONE
                } else {
                    actuators.drive(DriveCommand::Stop);
                    Dispatch::DROVE
                }
            }
        }
    }

    /// Write the stored speed to the drive PWM
    pub fn restore_speed<A: Actuators>(&self, actuators: &mut A) {
        actuators.set_speed(self.speed);
    }

    fn manual<A: Actuators>(&mut self, drive: DriveCommand, actuators: &mut A) -> Dispatch {
        if self.is_autonomous() {
            info!("manual command, leaving autonomous mode");
        }
        self.mode = RobotMode::Manual;
        actuators.drive(drive);
        trace!("manual {:?}", drive);
        Dispatch::DROVE
    }

    fn apply_speed<A: Actuators>(&mut self, duty: u8, actuators: &mut A) {
        self.speed = duty;
        actuators.set_speed(duty);
    }

    fn query_speed<A: Actuators, R: RemoteChannel>(&mut self, actuators: &mut A, remote: &mut R) {
        match remote.fetch_speed() {
            Ok(value) => {
                let duty = value.clamp(0, u8::MAX as i32) as u8;
                self.apply_speed(duty, actuators);
                info!("speed set to {} (requested {})", duty, value);
            }
            Err(e) => warn!("speed fetch failed: {:?}", e),
        }

        // Always clear the command slot so the query is not processed again
        if let Err(e) = remote.reset_command() {
            warn!("command reset failed: {:?}", e);
        }
    }
}
