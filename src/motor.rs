//! Brushed DC motor behind an H-bridge with enable/fault and current-sense lines.
//!
//! ## Drive truth table
//!
//! | speed | A    | B    | PWM      |
//! |-------|------|------|----------|
//! | > 0   | High | Low  | \|duty\| |
//! | < 0   | Low  | High | \|duty\| |
//! | 0     | Low  | Low  | 0        |
//!
//! The driver pulls its enable line to the fault level when it trips (over-current,
//! over-temperature). The motor latches that into a sticky error flag which only
//! [`Motor::clear_error`] resets. While the flag is set the bridge is driven as
//! for speed 0, whatever the animated speed says.

use core::fmt::Write;

use crate::animatable::Animatable;
use crate::device::{Actuator, Device, Lifecycle};
use crate::io::{Io, Level, Pin};
use crate::time::Instant;
use crate::types::Range;

/// Speed bounds of every motor. Negative is reverse.
pub const SPEED_RANGE: Range = Range::new(-99, 99);

/// Pins wiring one motor to its driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorPins {
    /// Direction input A (high for forward).
    pub a: Pin,
    /// Direction input B (high for reverse).
    pub b: Pin,
    /// PWM speed input.
    pub pwm: Pin,
    /// Analog current-sense output of the driver.
    pub current_sense: Pin,
    /// Enable/diagnostic line of the driver.
    pub enable: Pin,
}

/// One drive motor.
#[derive(Debug, Clone)]
pub struct Motor {
    pins: MotorPins,
    fault_level: Level,
    speed: Animatable,
    error: bool,
    current_sample: u16,
    duty: i32,
    lifecycle: Lifecycle,
}

impl Motor {
    /// Creates a stopped motor. `fault_level` is the enable-line level that signals a driver fault.
    pub fn new(pins: MotorPins, fault_level: Level) -> Self {
        Self {
            pins,
            fault_level,
            speed: Animatable::new(SPEED_RANGE, 0),
            error: false,
            current_sample: 0,
            duty: 0,
            lifecycle: Lifecycle::new(),
        }
    }

    /// Pin assignment.
    pub fn pins(&self) -> &MotorPins {
        &self.pins
    }

    /// Current speed, `-99..=99`.
    pub fn speed(&self) -> i32 {
        self.speed.value()
    }

    /// True once a driver fault has been seen, until [`Motor::clear_error`].
    pub fn has_error(&self) -> bool {
        self.error
    }

    /// Resets the sticky error flag. Speed and animation are left alone.
    pub fn clear_error(&mut self) {
        if self.error {
            log_info!("motor on pwm pin {} error cleared", self.pins.pwm);
        }
        self.error = false;
    }

    /// Current-sense reading taken on the last tick.
    pub fn current_sample(&self) -> u16 {
        self.current_sample
    }

    /// Signed duty written on the last tick, in `-ANALOG_MAX..=ANALOG_MAX`. Zero while faulted.
    pub fn duty(&self) -> i32 {
        self.duty
    }

    fn drive<IO: Io>(&mut self, io: &mut IO) {
        self.duty = if self.error {
            0
        } else {
            self.speed.value() * i32::from(IO::ANALOG_MAX) / SPEED_RANGE.max()
        };

        let (a, b) = match self.duty.signum() {
            1 => (Level::High, Level::Low),
            -1 => (Level::Low, Level::High),
            _ => (Level::Low, Level::Low),
        };
        io.write_digital(self.pins.a, a);
        io.write_digital(self.pins.b, b);
        io.write_analog(self.pins.pwm, self.duty.unsigned_abs() as u16);
    }
}

impl Device for Motor {
    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.lifecycle
    }

    fn on_init<IO: Io>(&mut self, io: &mut IO) {
        io.configure_output(self.pins.a);
        io.configure_output(self.pins.b);
        io.configure_output(self.pins.pwm);
        io.configure_input(self.pins.enable);
        io.configure_input(self.pins.current_sense);
    }

    fn on_sync<IO: Io>(&mut self, now: Instant, io: &mut IO) {
        self.speed.tick(now);

        if io.read_digital(self.pins.enable) == self.fault_level && !self.error {
            log_warn!(
                "motor on pwm pin {} reports a driver fault at {} ms",
                self.pins.pwm,
                now.as_millis()
            );
            self.error = true;
        }

        self.current_sample = io.read_analog(self.pins.current_sense);
        self.drive(io);
    }

    fn describe<W: Write>(&self, out: &mut W) -> core::fmt::Result {
        let status = if self.error { "ERR" } else { "OK" };
        write!(out, "{};I{};", status, self.current_sample)
    }
}

impl Actuator for Motor {
    fn animatable(&self) -> &Animatable {
        &self.speed
    }

    fn animatable_mut(&mut self) -> &mut Animatable {
        &mut self.speed
    }
}
