//! Rate-limited navigator
//!
//! Owns the current [`NavigationState`] and runs one evaluation per
//! interval: sample all three rangers once, then execute the plan for the
//! current state. Holds block on the injected delay, so nothing is sampled
//! and no command is taken in while a turn is in progress.

use embedded_hal::delay::DelayNs;

use super::state::{Hold, Maneuver, NavigationState};
use crate::config::NavigationConfig;
use crate::traits::{DriveOutput, RangeSensors, SensorReading};

/// Result of a call to [`Navigator::evaluate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Evaluation {
    /// Called inside the evaluation interval; nothing happened
    Skipped,
    /// One evaluation ran
    Ran {
        reading: SensorReading,
        from: NavigationState,
        to: NavigationState,
    },
}

impl Evaluation {
    /// Check if the state changed during this evaluation
    pub fn transitioned(&self) -> bool {
        matches!(self, Evaluation::Ran { from, to, .. } if from != to)
    }
}

/// Autonomous navigator
#[derive(Debug, Clone)]
pub struct Navigator {
    config: NavigationConfig,
    state: NavigationState,
    /// Start of the last evaluation, `None` until the first one
    last_eval_ms: Option<u32>,
}

impl Navigator {
    pub fn new(config: NavigationConfig) -> Self {
        Self {
            config,
            state: NavigationState::Cruise,
            last_eval_ms: None,
        }
    }

    /// Current navigation state
    pub fn state(&self) -> NavigationState {
        self.state
    }

    /// Return to cruising; the next call evaluates immediately
    pub fn reset(&mut self) {
        self.state = NavigationState::Cruise;
        self.last_eval_ms = None;
    }

    /// Check if an evaluation would run at `now_ms`
    pub fn is_due(&self, now_ms: u32) -> bool {
        match self.last_eval_ms {
            Some(last) => now_ms.wrapping_sub(last) >= self.config.eval_interval_ms,
            None => true,
        }
    }

    /// Run one evaluation if the interval has elapsed
    pub fn evaluate<D, S, W>(
        &mut self,
        now_ms: u32,
        drive: &mut D,
        sensors: &mut S,
        delay: &mut W,
    ) -> Evaluation
    where
        D: DriveOutput,
        S: RangeSensors,
        W: DelayNs,
    {
        if !self.is_due(now_ms) {
            return Evaluation::Skipped;
        }
        self.last_eval_ms = Some(now_ms);

        let reading = sensors.sample();
        let from = self.state;
        let step = from.step(&reading, &self.config);

        for maneuver in step.plan {
            match *maneuver {
                Maneuver::Drive(command) => drive.drive(command),
                Maneuver::Hold(hold) => delay.delay_ms(self.hold_ms(hold)),
            }
        }

        self.state = step.next;
        if from != step.next {
            debug!(
                "nav {:?} -> {:?} (F={} L={} R={})",
                from,
                step.next,
                reading.front.as_signed_cm(),
                reading.left.as_signed_cm(),
                reading.right.as_signed_cm()
            );
        }

        Evaluation::Ran {
            reading,
            from,
            to: step.next,
        }
    }

    fn hold_ms(&self, hold: Hold) -> u32 {
        match hold {
            Hold::Turn => self.config.turn_hold_ms,
            Hold::SteerPulse => self.config.steer_pulse_ms,
        }
    }
}
