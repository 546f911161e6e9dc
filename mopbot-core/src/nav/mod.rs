//! Autonomous navigation
//!
//! A five-state reactive controller: cruise forward, turn away from an
//! obstacle ahead, then drive until a wall shows up on the side it turned
//! away from.

pub mod navigator;
pub mod state;

pub use navigator::{Evaluation, Navigator};
pub use state::{Hold, Maneuver, NavigationState, Step};
