//! Time source abstraction
//!
//! Lets the drivers time echo pulses against Embassy's clock on target and
//! a controllable clock in host tests.

/// Monotonic microsecond clock
pub trait TimeSource {
    /// Microseconds since system start
    fn now_us(&self) -> u64;

    /// Microseconds elapsed since `reference_us`, saturating at zero
    fn elapsed_since(&self, reference_us: u64) -> u64 {
        self.now_us().saturating_sub(reference_us)
    }
}
