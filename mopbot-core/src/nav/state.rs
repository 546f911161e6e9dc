//! Navigation state machine definition
//!
//! Every action and transition is a pure function of the current state,
//! one sensor reading and the thresholds. Executing the resulting plan is
//! left to the [`Navigator`](super::Navigator).

use crate::config::NavigationConfig;
use crate::traits::{Distance, DriveCommand, SensorReading};

/// Navigation states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavigationState {
    /// Drive forward, nudging away from walls that get too close
    #[default]
    Cruise,
    /// Turning right away from an obstacle ahead
    TurningRight,
    /// Driving forward until a wall appears on the left
    SeekLeftWall,
    /// Turning left away from an obstacle ahead
    TurningLeft,
    /// Driving forward until a wall appears on the right
    SeekRightWall,
}

/// Blocking holds inside a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Hold {
    /// Full turn duration
    Turn,
    /// Short wall-follow correction
    SteerPulse,
}

/// One step of an action plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Maneuver {
    /// Apply a drive command
    Drive(DriveCommand),
    /// Keep the last drive command for a while, without sampling
    Hold(Hold),
}

/// Outcome of one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step {
    /// State after this evaluation
    pub next: NavigationState,
    /// Actions to execute, in order
    pub plan: &'static [Maneuver],
}

use DriveCommand::{Forward, Stop, TurnLeft, TurnRight};

const STOP: &[Maneuver] = &[Maneuver::Drive(Stop)];
const FORWARD: &[Maneuver] = &[Maneuver::Drive(Forward)];
const FORWARD_THEN_STOP: &[Maneuver] = &[Maneuver::Drive(Forward), Maneuver::Drive(Stop)];
const STEER_RIGHT: &[Maneuver] = &[
    Maneuver::Drive(Forward),
    Maneuver::Drive(TurnRight),
    Maneuver::Hold(Hold::SteerPulse),
    Maneuver::Drive(Forward),
];
const STEER_LEFT: &[Maneuver] = &[
    Maneuver::Drive(Forward),
    Maneuver::Drive(TurnLeft),
    Maneuver::Hold(Hold::SteerPulse),
    Maneuver::Drive(Forward),
];
const TURN_RIGHT: &[Maneuver] = &[Maneuver::Drive(TurnRight), Maneuver::Hold(Hold::Turn)];
const TURN_LEFT: &[Maneuver] = &[Maneuver::Drive(TurnLeft), Maneuver::Hold(Hold::Turn)];

impl NavigationState {
    /// Check if this state spins in place for a fixed hold
    pub fn is_turning(&self) -> bool {
        matches!(self, NavigationState::TurningRight | NavigationState::TurningLeft)
    }

    /// Decide the actions and next state for one sensor reading
    pub fn step(self, reading: &SensorReading, config: &NavigationConfig) -> Step {
        use NavigationState::*;

        let front_blocked = reading.front.is_within(config.min_front_cm);
        let wall = |d: Distance| d.is_within(config.max_wall_cm);
        let too_close = |d: Distance| wall(d) && d.is_within(config.min_side_cm);

        let (next, plan) = match self {
            // Turn toward the side with strictly more clearance; ties go left
            Cruise if front_blocked => {
                let next = if reading.right > reading.left {
                    TurningRight
                } else {
                    TurningLeft
                };
                (next, STOP)
            }
            Cruise if too_close(reading.left) => (Cruise, STEER_RIGHT),
            Cruise if too_close(reading.right) => (Cruise, STEER_LEFT),
            Cruise => (Cruise, FORWARD),

            TurningRight => (SeekLeftWall, TURN_RIGHT),
            TurningLeft => (SeekRightWall, TURN_LEFT),

            SeekLeftWall if wall(reading.left) => (Cruise, FORWARD),
            SeekLeftWall if front_blocked => (TurningLeft, FORWARD_THEN_STOP),
            SeekLeftWall => (SeekLeftWall, FORWARD),

            SeekRightWall if wall(reading.right) => (Cruise, FORWARD),
            SeekRightWall if front_blocked => (TurningRight, FORWARD_THEN_STOP),
            SeekRightWall => (SeekRightWall, FORWARD),
        };

        Step { next, plan }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use NavigationState::*;

    const ALL_STATES: [NavigationState; 5] =
        [Cruise, TurningRight, SeekLeftWall, TurningLeft, SeekRightWall];

    fn cfg() -> NavigationConfig {
        NavigationConfig::default()
    }

    fn reading(front: i32, left: i32, right: i32) -> SensorReading {
        SensorReading::from_signed_cm(front, left, right)
    }

    fn drives(plan: &[Maneuver]) -> impl Iterator<Item = DriveCommand> + '_ {
        plan.iter().filter_map(|m| match m {
            Maneuver::Drive(cmd) => Some(*cmd),
            Maneuver::Hold(_) => None,
        })
    }

    #[test]
    fn test_cruise_obstacle_turns_toward_open_side() {
        let step = Cruise.step(&reading(30, 60, 20), &cfg());
        assert_eq!(step.next, TurningLeft);
        assert_eq!(step.plan, STOP);

        let step = Cruise.step(&reading(30, 20, 60), &cfg());
        assert_eq!(step.next, TurningRight);
        assert_eq!(step.plan, STOP);
    }

    #[test]
    fn test_cruise_tie_goes_left() {
        assert_eq!(Cruise.step(&reading(10, 45, 45), &cfg()).next, TurningLeft);
        assert_eq!(Cruise.step(&reading(10, -1, -1), &cfg()).next, TurningLeft);
    }

    #[test]
    fn test_no_echo_counts_as_most_clearance() {
        // Nothing on the right beats any measured left distance
        assert_eq!(Cruise.step(&reading(10, 300, -1), &cfg()).next, TurningRight);
        assert_eq!(Cruise.step(&reading(10, -1, 300), &cfg()).next, TurningLeft);
    }

    #[test]
    fn test_front_threshold_is_strict() {
        assert_eq!(Cruise.step(&reading(50, 100, 100), &cfg()).plan, FORWARD);
        assert_eq!(Cruise.step(&reading(49, 100, 100), &cfg()).plan, STOP);
        // No echo ahead is open road
        assert_eq!(Cruise.step(&reading(-1, 100, 100), &cfg()).plan, FORWARD);
    }

    #[test]
    fn test_cruise_wall_follow_steering() {
        let step = Cruise.step(&reading(100, 20, 100), &cfg());
        assert_eq!(step.next, Cruise);
        assert_eq!(step.plan, STEER_RIGHT);

        let step = Cruise.step(&reading(100, 100, 20), &cfg());
        assert_eq!(step.next, Cruise);
        assert_eq!(step.plan, STEER_LEFT);

        // Left wins when both sides are close
        assert_eq!(Cruise.step(&reading(100, 20, 20), &cfg()).plan, STEER_RIGHT);

        // Inside the wall band but not too close: just forward
        assert_eq!(Cruise.step(&reading(100, 38, 37), &cfg()).plan, FORWARD);
    }

    #[test]
    fn test_turns_always_advance() {
        for r in [reading(10, 10, 10), reading(-1, -1, -1), reading(200, 5, 300)] {
            let step = TurningRight.step(&r, &cfg());
            assert_eq!(step.next, SeekLeftWall);
            assert_eq!(step.plan, TURN_RIGHT);

            let step = TurningLeft.step(&r, &cfg());
            assert_eq!(step.next, SeekRightWall);
            assert_eq!(step.plan, TURN_LEFT);
        }
    }

    #[test]
    fn test_seek_left_wall() {
        let step = SeekLeftWall.step(&reading(100, 25, 100), &cfg());
        assert_eq!(step.next, Cruise);
        assert_eq!(step.plan, FORWARD);

        // Wall found takes priority over an obstacle ahead
        assert_eq!(SeekLeftWall.step(&reading(10, 25, 100), &cfg()).next, Cruise);

        let step = SeekLeftWall.step(&reading(10, 100, 100), &cfg());
        assert_eq!(step.next, TurningLeft);
        assert_eq!(step.plan, FORWARD_THEN_STOP);

        let step = SeekLeftWall.step(&reading(-1, -1, -1), &cfg());
        assert_eq!(step.next, SeekLeftWall);
        assert_eq!(step.plan, FORWARD);
    }

    #[test]
    fn test_seek_right_wall() {
        assert_eq!(SeekRightWall.step(&reading(100, 100, 39), &cfg()).next, Cruise);
        assert_eq!(SeekRightWall.step(&reading(100, 100, 40), &cfg()).next, SeekRightWall);

        let step = SeekRightWall.step(&reading(10, 100, 100), &cfg());
        assert_eq!(step.next, TurningRight);
        assert_eq!(step.plan, FORWARD_THEN_STOP);
    }

    #[test]
    fn test_default_state() {
        assert_eq!(NavigationState::default(), Cruise);
        assert!(TurningLeft.is_turning());
        assert!(!SeekLeftWall.is_turning());
    }

    fn distance() -> impl Strategy<Value = Distance> {
        prop_oneof![Just(Distance::NoEcho), (0u16..500).prop_map(Distance::Cm)]
    }

    fn any_reading() -> impl Strategy<Value = SensorReading> {
        (distance(), distance(), distance())
            .prop_map(|(front, left, right)| SensorReading { front, left, right })
    }

    fn any_state() -> impl Strategy<Value = NavigationState> {
        prop::sample::select(ALL_STATES.to_vec())
    }

    proptest! {
        #[test]
        fn prop_plans_are_never_empty_or_conflicting(state in any_state(), r in any_reading()) {
            let step = state.step(&r, &cfg());
            prop_assert!(!step.plan.is_empty());
            for cmd in drives(step.plan) {
                prop_assert!(cmd.signals().is_consistent());
            }
        }

        #[test]
        fn prop_turn_states_ignore_sensors(r in any_reading()) {
            prop_assert_eq!(TurningRight.step(&r, &cfg()).next, SeekLeftWall);
            prop_assert_eq!(TurningLeft.step(&r, &cfg()).next, SeekRightWall);
        }

        #[test]
        fn prop_clear_front_never_enters_a_turn(state in any_state(), left in distance(), right in distance()) {
            let r = SensorReading { front: Distance::NoEcho, left, right };
            if !state.is_turning() {
                prop_assert!(!state.step(&r, &cfg()).next.is_turning());
            }
        }

        #[test]
        fn prop_blocked_front_never_ends_driving(state in any_state(), r in any_reading()) {
            // An obstacle ahead outside a turn always leaves the drive stopped
            if r.front.is_within(cfg().min_front_cm) && !state.is_turning() {
                let step = state.step(&r, &cfg());
                if step.next.is_turning() {
                    prop_assert_eq!(drives(step.plan).last(), Some(Stop));
                }
            }
        }
    }
}
