//! GPIO pump output
//!
//! Switches the liquid pump through a MOSFET or relay on one GPIO pin.

use embedded_hal::digital::OutputPin;
use mopbot_core::traits::PumpOutput;

/// Pump switched by one GPIO pin
///
/// The pin can be active-high (default) or active-low.
pub struct Pump<P> {
    pin: P,
    /// If true, pump ON = pin LOW
    inverted: bool,
    on: bool,
    faults: u16,
}

impl<P: OutputPin> Pump<P> {
    /// Create a pump output, switched off
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut pump = Self {
            pin,
            inverted,
            on: false,
            faults: 0,
        };
        pump.set_pump(false);
        pump
    }

    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    /// Pin writes that failed since creation
    pub fn faults(&self) -> u16 {
        self.faults
    }
}

impl<P: OutputPin> PumpOutput for Pump<P> {
    fn set_pump(&mut self, on: bool) {
        self.on = on;
        let result = if on != self.inverted {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if result.is_err() {
            self.faults = self.faults.saturating_add(1);
        }
    }

    fn is_pump_on(&self) -> bool {
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::{ErrorKind, ErrorType};

    struct MockPin {
        high: bool,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }
    }

    struct BrokenPin;

    impl ErrorType for BrokenPin {
        type Error = ErrorKind;
    }

    impl OutputPin for BrokenPin {
        fn set_low(&mut self) -> Result<(), ErrorKind> {
            Err(ErrorKind::Other)
        }

        fn set_high(&mut self) -> Result<(), ErrorKind> {
            Err(ErrorKind::Other)
        }
    }

    #[test]
    fn test_active_high_pump() {
        let mut pump = Pump::new_active_high(MockPin { high: true });
        assert!(!pump.is_pump_on());
        assert!(!pump.pin.high);

        pump.set_pump(true);
        assert!(pump.is_pump_on());
        assert!(pump.pin.high);
    }

    #[test]
    fn test_active_low_pump() {
        let mut pump = Pump::new_active_low(MockPin { high: false });
        assert!(pump.pin.high);

        pump.set_pump(true);
        assert!(pump.is_pump_on());
        assert!(!pump.pin.high);
    }

    #[test]
    fn test_pin_errors_are_counted() {
        let mut pump = Pump::new_active_high(BrokenPin);
        pump.set_pump(true);
        assert_eq!(pump.faults(), 2);
        // Logical state still follows the request
        assert!(pump.is_pump_on());
    }
}
