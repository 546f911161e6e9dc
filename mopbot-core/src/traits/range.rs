//! Ultrasonic range sensor trait
//!
//! Three rangers look front, left and right. A reading is either a distance
//! in centimetres or [`Distance::NoEcho`] when nothing returned before the
//! echo timeout.

/// Echo timeout for one measurement
pub const ECHO_TIMEOUT_US: u32 = 20_000;

/// Signed value reported for a reading with no echo
pub const NO_ECHO_CM: i32 = -1;

/// One range measurement
///
/// Ordering follows clearance: every measurement is smaller than
/// `NoEcho`, so "nothing in range" compares as the most open side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Distance {
    /// Obstacle measured at this many centimetres
    Cm(u16),
    /// No return edge before the timeout
    NoEcho,
}

impl Distance {
    /// Convert an echo pulse width to a distance
    ///
    /// Speed of sound is 0.034 cm/µs and the pulse covers the round trip,
    /// so `cm = µs * 0.034 / 2`.
    pub fn from_echo_us(echo_us: u32) -> Self {
        let cm = echo_us.saturating_mul(17) / 1000;
        Distance::Cm(cm.min(u16::MAX as u32) as u16)
    }

    /// Check if an obstacle was measured strictly closer than `limit_cm`
    ///
    /// `NoEcho` is never within any limit.
    pub fn is_within(&self, limit_cm: u16) -> bool {
        matches!(self, Distance::Cm(cm) if *cm < limit_cm)
    }

    /// Distance as a signed value, with `-1` for no echo
    pub fn as_signed_cm(&self) -> i32 {
        match self {
            Distance::Cm(cm) => *cm as i32,
            Distance::NoEcho => NO_ECHO_CM,
        }
    }
}

/// Which ranger to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorId {
    Front,
    Left,
    Right,
}

/// One sample of all three rangers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorReading {
    pub front: Distance,
    pub left: Distance,
    pub right: Distance,
}

impl SensorReading {
    /// Build a reading from centimetre values, negative meaning no echo
    pub fn from_signed_cm(front: i32, left: i32, right: i32) -> Self {
        fn convert(cm: i32) -> Distance {
            if cm < 0 {
                Distance::NoEcho
            } else {
                Distance::Cm(cm.min(u16::MAX as i32) as u16)
            }
        }
        Self {
            front: convert(front),
            left: convert(left),
            right: convert(right),
        }
    }

    /// A reading with nothing in range on any side
    pub const fn clear() -> Self {
        Self {
            front: Distance::NoEcho,
            left: Distance::NoEcho,
            right: Distance::NoEcho,
        }
    }
}

/// Set of range sensors
///
/// `measure` blocks for up to [`ECHO_TIMEOUT_US`]. A timeout is a valid
/// reading, not an error.
pub trait RangeSensors {
    /// Measure one ranger
    fn measure(&mut self, sensor: SensorId) -> Distance;

    /// Measure all three rangers, front first
    fn sample(&mut self) -> SensorReading {
        let front = self.measure(SensorId::Front);
        let left = self.measure(SensorId::Left);
        let right = self.measure(SensorId::Right);
        SensorReading { front, left, right }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_conversion() {
        // 1 ms round trip is 17 cm
        assert_eq!(Distance::from_echo_us(1000), Distance::Cm(17));
        // Timeout bound is roughly 3.4 m
        assert_eq!(Distance::from_echo_us(ECHO_TIMEOUT_US), Distance::Cm(340));
        // Truncates like the integer conversion on the wire
        assert_eq!(Distance::from_echo_us(2940), Distance::Cm(49));
    }

    #[test]
    fn test_no_echo_is_never_in_range() {
        assert!(!Distance::NoEcho.is_within(u16::MAX));
        assert!(Distance::Cm(0).is_within(1));
        assert!(!Distance::Cm(50).is_within(50));
        assert!(Distance::Cm(49).is_within(50));
    }

    #[test]
    fn test_no_echo_is_widest_clearance() {
        assert!(Distance::NoEcho > Distance::Cm(u16::MAX));
        assert!(Distance::Cm(60) > Distance::Cm(20));
    }

    #[test]
    fn test_signed_view() {
        assert_eq!(Distance::NoEcho.as_signed_cm(), -1);
        assert_eq!(Distance::Cm(42).as_signed_cm(), 42);

        let reading = SensorReading::from_signed_cm(30, -1, 20);
        assert_eq!(reading.front, Distance::Cm(30));
        assert_eq!(reading.left, Distance::NoEcho);
        assert_eq!(reading.right, Distance::Cm(20));
    }

    struct Fixed(SensorReading);

    impl RangeSensors for Fixed {
        fn measure(&mut self, sensor: SensorId) -> Distance {
            match sensor {
                SensorId::Front => self.0.front,
                SensorId::Left => self.0.left,
                SensorId::Right => self.0.right,
            }
        }
    }

    #[test]
    fn test_default_sample_reads_each_side() {
        let reading = SensorReading::from_signed_cm(10, 20, 30);
        assert_eq!(Fixed(reading).sample(), reading);
    }
}
