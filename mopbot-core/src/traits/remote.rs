//! Remote database channel trait
//!
//! The robot's view of the real-time database: a subscribed command slot
//! (delivered separately as [`crate::Input`]s), a readable speed slot, and
//! connection management. All calls are synchronous and may fail; a failure
//! is logged by the caller and never retried within the same tick.

/// Errors from remote channel operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RemoteError {
    /// Network or database session is down
    LinkDown,
    /// The requested value is missing or not an integer
    NoValue,
    /// Outgoing request queue is full
    Busy,
}

/// Remote database channel
pub trait RemoteChannel {
    /// Read the integer at the speed path
    fn fetch_speed(&mut self) -> Result<i32, RemoteError>;

    /// Write the idle sentinel to the command path
    fn reset_command(&mut self) -> Result<(), RemoteError>;

    /// Check if the network session is up
    fn is_alive(&mut self) -> bool;

    /// Tear down and re-establish the network session
    fn reconnect(&mut self) -> Result<(), RemoteError>;

    /// Restart the command stream after a timeout or disconnect
    fn resubscribe(&mut self) -> Result<(), RemoteError>;
}
