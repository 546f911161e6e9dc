//! HC-SR04 ultrasonic ranger
//!
//! A 10 µs trigger pulse starts a measurement; the sensor answers with an
//! echo pulse whose width is the sound round-trip time. Measuring is
//! blocking: the echo is polled against a microsecond clock until it falls
//! or the timeout runs out.
//!
//! ```ignore
//! let mut rangers = RangerArray::new(front, left, right, Delay, clock);
//! let reading = rangers.sample();
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use mopbot_core::traits::range::ECHO_TIMEOUT_US;
use mopbot_core::traits::{Distance, RangeSensors, SensorId, TimeSource};

/// Settle time before the trigger pulse
const TRIGGER_SETTLE_US: u32 = 2;

/// Trigger pulse width
const TRIGGER_PULSE_US: u32 = 10;

/// One HC-SR04 ranger
pub struct Hcsr04<T, E> {
    trigger: T,
    echo: E,
    faults: u16,
}

impl<T: OutputPin, E: InputPin> Hcsr04<T, E> {
    pub fn new(trigger: T, echo: E) -> Self {
        Self {
            trigger,
            echo,
            faults: 0,
        }
    }

    /// Pin reads or writes that failed since creation
    pub fn faults(&self) -> u16 {
        self.faults
    }

    /// Fire the trigger and time the echo pulse
    ///
    /// The timeout covers both waiting for the echo to rise and the echo
    /// itself, so a call never blocks longer than [`ECHO_TIMEOUT_US`].
    pub fn measure<D: DelayNs, C: TimeSource>(&mut self, delay: &mut D, clock: &C) -> Distance {
        match self.echo_width_us(delay, clock) {
            Ok(Some(width_us)) => Distance::from_echo_us(width_us),
            Ok(None) => Distance::NoEcho,
            Err(()) => {
                self.faults = self.faults.saturating_add(1);
                Distance::NoEcho
            }
        }
    }

    fn echo_width_us<D: DelayNs, C: TimeSource>(
        &mut self,
        delay: &mut D,
        clock: &C,
    ) -> Result<Option<u32>, ()> {
        self.trigger.set_low().map_err(|_| ())?;
        delay.delay_us(TRIGGER_SETTLE_US);
        self.trigger.set_high().map_err(|_| ())?;
        delay.delay_us(TRIGGER_PULSE_US);
        self.trigger.set_low().map_err(|_| ())?;

        let start = clock.now_us();
        let timed_out = |clock: &C| clock.elapsed_since(start) >= ECHO_TIMEOUT_US as u64;

        while !self.echo.is_high().map_err(|_| ())? {
            if timed_out(clock) {
                return Ok(None);
            }
        }

        let rise = clock.now_us();
        while self.echo.is_high().map_err(|_| ())? {
            if timed_out(clock) {
                return Ok(None);
            }
        }

        let width = clock.elapsed_since(rise);
        Ok(Some(width.min(u32::MAX as u64) as u32))
    }
}

/// Front, left and right rangers sharing one delay and clock
pub struct RangerArray<T, E, D, C> {
    front: Hcsr04<T, E>,
    left: Hcsr04<T, E>,
    right: Hcsr04<T, E>,
    delay: D,
    clock: C,
}

impl<T, E, D, C> RangerArray<T, E, D, C>
where
    T: OutputPin,
    E: InputPin,
    D: DelayNs,
    C: TimeSource,
{
    pub fn new(
        front: Hcsr04<T, E>,
        left: Hcsr04<T, E>,
        right: Hcsr04<T, E>,
        delay: D,
        clock: C,
    ) -> Self {
        Self {
            front,
            left,
            right,
            delay,
            clock,
        }
    }

    /// Total pin faults across all three rangers
    pub fn faults(&self) -> u32 {
        self.front.faults() as u32 + self.left.faults() as u32 + self.right.faults() as u32
    }
}

impl<T, E, D, C> RangeSensors for RangerArray<T, E, D, C>
where
    T: OutputPin,
    E: InputPin,
    D: DelayNs,
    C: TimeSource,
{
    fn measure(&mut self, sensor: SensorId) -> Distance {
        let ranger = match sensor {
            SensorId::Front => &mut self.front,
            SensorId::Left => &mut self.left,
            SensorId::Right => &mut self.right,
        };
        ranger.measure(&mut self.delay, &self.clock)
    }
}
