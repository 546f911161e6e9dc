//! Dual H-bridge drive
//!
//! Direction comes from four GPIO inputs, speed from one PWM channel. The
//! 8-bit duty from the core is scaled to the PWM channel's own range.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use mopbot_core::traits::{DriveOutput, DriveSignals};

/// The four H-bridge direction inputs
pub struct HBridgePins<P> {
    /// IN1: left side forward
    pub left_forward: P,
    /// IN2: left side backward
    pub left_backward: P,
    /// IN3: right side forward
    pub right_forward: P,
    /// IN4: right side backward
    pub right_backward: P,
}

/// Dual H-bridge driver
pub struct HBridge<P, M> {
    pins: HBridgePins<P>,
    pwm: M,
    signals: DriveSignals,
    duty: u8,
    faults: u16,
}

impl<P: OutputPin, M: SetDutyCycle> HBridge<P, M> {
    /// Create the driver with both sides released and zero duty
    pub fn new(pins: HBridgePins<P>, pwm: M) -> Self {
        let mut bridge = Self {
            pins,
            pwm,
            signals: DriveSignals::default(),
            duty: 0,
            faults: 0,
        };
        bridge.set_drive(DriveSignals::default());
        bridge.set_speed(0);
        bridge
    }

    /// Direction inputs last written
    pub fn signals(&self) -> DriveSignals {
        self.signals
    }

    /// Duty last written (0-255)
    pub fn duty(&self) -> u8 {
        self.duty
    }

    /// Pin or PWM writes that failed since creation
    pub fn faults(&self) -> u16 {
        self.faults
    }

    fn write<E>(faults: &mut u16, result: Result<(), E>) {
        if result.is_err() {
            *faults = faults.saturating_add(1);
        }
    }

    fn write_pin(pin: &mut P, level: bool, faults: &mut u16) {
        let result = if level { pin.set_high() } else { pin.set_low() };
        Self::write(faults, result);
    }
}

/// Scale an 8-bit duty to a PWM channel's range
pub fn scale_duty(duty: u8, max_duty: u16) -> u16 {
    ((duty as u32 * max_duty as u32) / u8::MAX as u32) as u16
}

impl<P: OutputPin, M: SetDutyCycle> DriveOutput for HBridge<P, M> {
    fn set_drive(&mut self, signals: DriveSignals) {
        // Never energise both inputs of one side
        let signals = if signals.is_consistent() {
            signals
        } else {
            self.faults = self.faults.saturating_add(1);
            DriveSignals::default()
        };

        let pins = &mut self.pins;
        let faults = &mut self.faults;
        Self::write_pin(&mut pins.left_forward, signals.left_forward, faults);
        Self::write_pin(&mut pins.left_backward, signals.left_backward, faults);
        Self::write_pin(&mut pins.right_forward, signals.right_forward, faults);
        Self::write_pin(&mut pins.right_backward, signals.right_backward, faults);
        self.signals = signals;
    }

    fn set_speed(&mut self, duty: u8) {
        let raw = scale_duty(duty, self.pwm.max_duty_cycle());
        let result = self.pwm.set_duty_cycle(raw);
        Self::write(&mut self.faults, result);
        self.duty = duty;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;
    use mopbot_core::traits::DriveCommand;

    #[derive(Default)]
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

    struct MockPwm {
        max: u16,
        duty: u16,
    }

    impl embedded_hal::pwm::ErrorType for MockPwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            self.max
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
            self.duty = duty;
            Ok(())
        }
    }

    fn bridge() -> HBridge<MockPin, MockPwm> {
        let pins = HBridgePins {
            left_forward: MockPin::default(),
            left_backward: MockPin::default(),
            right_forward: MockPin::default(),
            right_backward: MockPin::default(),
        };
        HBridge::new(pins, MockPwm { max: 1000, duty: 7 })
    }

    fn levels(bridge: &HBridge<MockPin, MockPwm>) -> [bool; 4] {
        [
            bridge.pins.left_forward.high,
            bridge.pins.left_backward.high,
            bridge.pins.right_forward.high,
            bridge.pins.right_backward.high,
        ]
    }

    #[test]
    fn test_starts_released() {
        let bridge = bridge();
        assert_eq!(levels(&bridge), [false; 4]);
        assert_eq!(bridge.pwm.duty, 0);
    }

    #[test]
    fn test_commands_reach_pins() {
        let mut bridge = bridge();

        bridge.drive(DriveCommand::Forward);
        assert_eq!(levels(&bridge), [true, false, true, false]);

        bridge.drive(DriveCommand::TurnLeft);
        assert_eq!(levels(&bridge), [false, true, true, false]);

        bridge.drive(DriveCommand::TurnRight);
        assert_eq!(levels(&bridge), [true, false, false, true]);

        bridge.drive(DriveCommand::Stop);
        assert_eq!(levels(&bridge), [false; 4]);
    }

    #[test]
    fn test_conflicting_signals_release_the_bridge() {
        let mut bridge = bridge();
        bridge.drive(DriveCommand::Forward);
        bridge.set_drive(DriveSignals {
            right_forward: true,
            right_backward: true,
            ..Default::default()
        });
        assert_eq!(levels(&bridge), [false; 4]);
        assert_eq!(bridge.faults(), 1);
    }

    #[test]
    fn test_speed_scaling() {
        let mut bridge = bridge();
        bridge.set_speed(255);
        assert_eq!(bridge.pwm.duty, 1000);
        bridge.set_speed(150);
        assert_eq!(bridge.pwm.duty, 588);
        assert_eq!(bridge.duty(), 150);

        assert_eq!(scale_duty(100, 65535), 25700);
        assert_eq!(scale_duty(0, 65535), 0);
    }
}
