//! Board wiring and behavior timings.
//!
//! Configuration is compile-time data handed to [`TankState::new`](crate::TankState::new);
//! nothing is persisted.

use crate::io::{Level, Pin};
use crate::motor::MotorPins;

/// Wiring of one motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorConfig {
    /// Driver pins.
    pub pins: MotorPins,
    /// Enable-line level that means "driver fault".
    pub fault_level: Level,
}

/// Durations and duty cycles of the built-in light behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Period of the alarm blink shown while a motor fault is active.
    pub fault_blink_period_ms: u32,
    /// Duty cycle of the alarm blink.
    pub fault_blink_duty: u8,
    /// Period of the turn-indicator blink.
    pub turn_blink_period_ms: u32,
    /// Duty cycle of the turn-indicator blink.
    pub turn_blink_duty: u8,
    /// Fade time of `lights(on/off)`.
    pub lights_fade_ms: u32,
}

/// Motor speeds used by the canned drive commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpeedConfig {
    /// Speed of `FullForward`.
    pub full: i32,
    /// Magnitude of `SlowBackward`.
    pub slow: i32,
    /// Magnitude of each track during `RotateLeft`/`RotateRight`.
    pub rotate: i32,
}

/// Complete tank configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TankConfig {
    /// Left track motor.
    pub left_motor: MotorConfig,
    /// Right track motor.
    pub right_motor: MotorConfig,
    /// LED pins: left-front, right-front, left-rear, right-rear.
    pub led_pins: [Pin; 4],
    /// Light behavior timings.
    pub timing: TimingConfig,
    /// Drive command speeds.
    pub speeds: SpeedConfig,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fault_blink_period_ms: 500,
            fault_blink_duty: 50,
            turn_blink_period_ms: 1000,
            turn_blink_duty: 50,
            lights_fade_ms: 1000,
        }
    }
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            full: 99,
            slow: 40,
            rotate: 60,
        }
    }
}

/// Dual VNH2SP30 shield layout: the enable/diagnostic lines pull low on a fault.
impl Default for TankConfig {
    fn default() -> Self {
        Self {
            left_motor: MotorConfig {
                pins: MotorPins {
                    a: 7,
                    b: 8,
                    pwm: 5,
                    current_sense: 16,
                    enable: 14,
                },
                fault_level: Level::Low,
            },
            right_motor: MotorConfig {
                pins: MotorPins {
                    a: 4,
                    b: 9,
                    pwm: 6,
                    current_sense: 17,
                    enable: 15,
                },
                fault_level: Level::Low,
            },
            led_pins: [3, 10, 11, 13],
            timing: TimingConfig::default(),
            speeds: SpeedConfig::default(),
        }
    }
}
