//! Robot controller
//!
//! The controller is the body of the control loop. Every tick it:
//! - Drains queued inputs through the mode arbiter
//! - Runs the navigator when autonomous and nothing else drove this tick
//! - Runs the periodic link check
//!
//! All robot state lives here and hardware is passed in by the caller, so
//! the whole loop runs on the host against test doubles.

use embedded_hal::delay::DelayNs;
use heapless::Deque;

use mopbot_protocol::Command;

use crate::config::RobotConfig;
use crate::link::{LinkMonitor, LinkStatus};
use crate::mode::{ModeArbiter, RobotMode};
use crate::nav::{Evaluation, NavigationState, Navigator};
use crate::traits::{Actuators, DriveCommand, RangeSensors, RemoteChannel};

/// Inputs queued between ticks
pub const INPUT_QUEUE_SIZE: usize = 8;

/// Something that happened on a command channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Input {
    /// A parsed command from either channel
    Command(Command),
    /// The remote command stream ended and must be resubscribed
    StreamLost {
        /// Ended by a timeout rather than a disconnect
        timeout: bool,
    },
}

impl From<Command> for Input {
    fn from(command: Command) -> Self {
        Input::Command(command)
    }
}

/// The hardware one tick works on
pub struct RobotIo<A, S, R, W> {
    pub actuators: A,
    pub sensors: S,
    pub remote: R,
    pub delay: W,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Commands dispatched
    pub commands: u8,
    /// The arbiter wrote a drive command
    pub arbiter_drove: bool,
    /// Navigator outcome; `Skipped` when it was not called
    pub navigation: Evaluation,
    /// Link check result, if one was due
    pub link: Option<LinkStatus>,
}

impl TickReport {
    fn new() -> Self {
        Self {
            commands: 0,
            arbiter_drove: false,
            navigation: Evaluation::Skipped,
            link: None,
        }
    }
}

/// Process-wide robot state
pub struct RobotController {
    arbiter: ModeArbiter,
    navigator: Navigator,
    link: LinkMonitor,
    stop_on_check: bool,
    queue: Deque<Input, INPUT_QUEUE_SIZE>,
}

impl RobotController {
    /// Create a controller from a validated configuration
    pub fn new(config: &RobotConfig) -> Self {
        Self {
            arbiter: ModeArbiter::new(config.drive.boot_speed),
            navigator: Navigator::new(config.navigation),
            link: LinkMonitor::new(config.link.check_interval_ms, 0),
            stop_on_check: config.link.stop_on_check,
            queue: Deque::new(),
        }
    }

    /// Put the outputs in their power-on state
    ///
    /// Applies the boot speed, releases the drive and switches the pump off.
    /// The first link check is due one interval after `now_ms`.
    pub fn boot<A: Actuators>(&mut self, now_ms: u32, actuators: &mut A) {
        self.arbiter.restore_speed(actuators);
        actuators.drive(DriveCommand::Stop);
        actuators.set_pump(false);
        self.link.restart(now_ms);
        info!("robot ready, speed {}", self.arbiter.speed());
    }

    /// Queue an input for the next tick
    ///
    /// Returns the input back when the queue is full.
    pub fn enqueue(&mut self, input: Input) -> Result<(), Input> {
        self.queue.push_back(input)
    }

    /// Check if the input queue is full
    pub fn is_queue_full(&self) -> bool {
        self.queue.is_full()
    }

    pub fn mode(&self) -> RobotMode {
        self.arbiter.mode()
    }

    pub fn nav_state(&self) -> NavigationState {
        self.navigator.state()
    }

    /// Current PWM duty
    pub fn speed(&self) -> u8 {
        self.arbiter.speed()
    }

    /// Run one control loop iteration
    pub fn tick<A, S, R, W>(&mut self, now_ms: u32, io: &mut RobotIo<A, S, R, W>) -> TickReport
    where
        A: Actuators,
        S: RangeSensors,
        R: RemoteChannel,
        W: DelayNs,
    {
        let mut report = TickReport::new();

        while let Some(input) = self.queue.pop_front() {
            match input {
                Input::Command(command) => {
                    debug!("command {}", command.name());
                    let dispatch = self.arbiter.dispatch(command, &mut io.actuators, &mut io.remote);
                    report.commands = report.commands.saturating_add(1);
                    report.arbiter_drove |= dispatch.drove;
                    if dispatch.engage_navigator {
                        self.navigator.reset();
                    }
                }
                Input::StreamLost { timeout } => {
                    warn!("command stream lost (timeout: {}), resubscribing", timeout);
                    if let Err(e) = io.remote.resubscribe() {
                        warn!("resubscribe failed: {:?}", e);
                    }
                }
            }
        }

        // Only one of arbiter and navigator may drive within a tick
        if self.arbiter.is_autonomous() && !report.arbiter_drove {
            report.navigation =
                self.navigator
                    .evaluate(now_ms, &mut io.actuators, &mut io.sensors, &mut io.delay);
        }

        if self.link.is_due(now_ms) {
            report.link = Some(self.check_link(now_ms, io));
        }

        report
    }

    fn check_link<A, S, R, W>(&mut self, now_ms: u32, io: &mut RobotIo<A, S, R, W>) -> LinkStatus
    where
        A: Actuators,
        R: RemoteChannel,
    {
        let status = self.link.record(now_ms, io.remote.is_alive());
        match status {
            LinkStatus::Alive => debug!("link alive"),
            LinkStatus::Down { consecutive } => {
                warn!("link down ({} checks), reconnecting", consecutive);
                if let Err(e) = io.remote.reconnect() {
                    warn!("reconnect failed: {:?}", e);
                }
            }
        }

        if self.stop_on_check && !self.arbiter.is_autonomous() {
            io.actuators.drive(DriveCommand::Stop);
        }
        status
    }
}
