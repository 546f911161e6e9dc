//! Mode arbitration between remote driving and autonomous navigation

pub mod arbiter;

pub use arbiter::{Dispatch, ModeArbiter, RobotMode};
