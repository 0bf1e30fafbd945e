#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Animation`**: A pure function of time producing an integer setpoint (`Const`, `Linear`, `Blink`)
//! - **`Animatable`**: A value bounded by a `Range`, driven by exactly one replaceable `Animation`
//! - **`Device`**: Init-once, sync-every-tick lifecycle implemented by all hardware
//! - **`Actuator`**: A `Device` whose output follows an `Animatable` (`Led`, `Motor`)
//! - **`HallSensor`**: Optional wheel sensor fed by an interrupt-safe `RevolutionCounter`
//! - **`TankState`**: Owns all devices, ticks them in a fixed order and handles motor faults
//! - **`TankCommand`**: The discrete operator commands
//! - **`Io`**: Trait to implement for your pin-level hardware access
//! - **`TimeSource`**: Trait to implement for your millisecond clock
//!
//! Values are plain integers: LED brightness spans `0..=99`, motor speed `-99..=99`.
//! Out-of-range inputs are clamped, never rejected.

#[macro_use]
mod logging;

pub mod animatable;
pub mod animation;
pub mod command;
pub mod config;
pub mod device;
pub mod hall;
pub mod io;
pub mod led;
pub mod motor;
pub mod tank;
pub mod time;
pub mod types;

pub use animatable::Animatable;
pub use animation::Animation;
pub use command::TankCommand;
pub use config::{MotorConfig, SpeedConfig, TankConfig, TimingConfig};
pub use device::{Actuator, Device, Lifecycle, Phase};
pub use hall::{HallSensor, RevolutionCounter};
pub use io::{Io, Level, Pin};
pub use led::{BRIGHTNESS_RANGE, Led};
pub use motor::{Motor, MotorPins, SPEED_RANGE};
pub use tank::{LedPosition, MAX_HALL_SENSORS, Side, TankState};
pub use time::{Instant, TimeSource};
pub use types::{Range, TankError};
