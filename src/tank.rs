//! The tank orchestrator.
//!
//! Provides [`TankState`], which owns the fixed device set (two motors, four LEDs,
//! up to four hall sensors), advances every device once per tick in registration
//! order, and turns motor faults into a forced stop plus an alarm blink.

use core::fmt::Write;

use heapless::Vec;

use crate::command::TankCommand;
use crate::config::{SpeedConfig, TankConfig, TimingConfig};
use crate::device::{Actuator, Device};
use crate::hall::HallSensor;
use crate::io::Io;
use crate::led::{BRIGHTNESS_RANGE, Led};
use crate::motor::Motor;
use crate::time::{Instant, TimeSource};
use crate::types::TankError;

/// Maximum number of hall sensors a tank can carry.
pub const MAX_HALL_SENSORS: usize = 4;

/// A track side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Side {
    /// Left track.
    Left,
    /// Right track.
    Right,
}

impl Side {
    fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Mounting position of a status LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedPosition {
    /// Left front.
    LeftFront,
    /// Right front.
    RightFront,
    /// Left rear.
    LeftRear,
    /// Right rear.
    RightRear,
}

impl LedPosition {
    /// All positions in registration order.
    pub const ALL: [LedPosition; 4] = [
        LedPosition::LeftFront,
        LedPosition::RightFront,
        LedPosition::LeftRear,
        LedPosition::RightRear,
    ];

    fn index(self) -> usize {
        match self {
            LedPosition::LeftFront => 0,
            LedPosition::RightFront => 1,
            LedPosition::LeftRear => 2,
            LedPosition::RightRear => 3,
        }
    }

    /// Short label used in status output.
    pub fn label(self) -> &'static str {
        match self {
            LedPosition::LeftFront => "LF",
            LedPosition::RightFront => "RF",
            LedPosition::LeftRear => "LR",
            LedPosition::RightRear => "RR",
        }
    }

    fn side(self) -> Side {
        match self {
            LedPosition::LeftFront | LedPosition::LeftRear => Side::Left,
            LedPosition::RightFront | LedPosition::RightRear => Side::Right,
        }
    }
}

/// Owns and drives all tank devices.
///
/// Commands only change animation targets. Hardware is written exclusively by
/// [`TankState::sync`] in a fixed order: motors, then LEDs, then hall sensors.
/// Each device is synced once per tick, except on the tick a motor fault is first
/// seen, when motors and LEDs are synced a second time so the stop and the alarm
/// blink reach the hardware in that same tick.
///
/// While a fault is latched, every `sync` zeroes both motors and keeps the LEDs in
/// the alarm blink before anything is written. Motor commands are still accepted
/// in that state but never reach the drivers, until [`TankState::recover`].
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `IO` - Hardware access
/// * `T` - Time source used to stamp animation starts
/// * `W` - Diagnostics sink for status snapshots
pub struct TankState<'t, IO: Io, T: TimeSource, W: Write> {
    io: IO,
    time_source: &'t T,
    diagnostics: W,
    motors: [Motor; 2],
    leds: [Led; 4],
    hall_sensors: Vec<HallSensor, MAX_HALL_SENSORS>,
    timing: TimingConfig,
    speeds: SpeedConfig,
    initialized: bool,
    status_requested: bool,
    fault_active: bool,
}

impl<'t, IO: Io, T: TimeSource, W: Write> TankState<'t, IO, T, W> {
    /// Builds the device set from `config`. Call [`TankState::init`] before ticking.
    pub fn new(config: &TankConfig, io: IO, time_source: &'t T, diagnostics: W) -> Self {
        Self {
            io,
            time_source,
            diagnostics,
            motors: [
                Motor::new(config.left_motor.pins, config.left_motor.fault_level),
                Motor::new(config.right_motor.pins, config.right_motor.fault_level),
            ],
            leds: config.led_pins.map(Led::new),
            hall_sensors: Vec::new(),
            timing: config.timing,
            speeds: config.speeds,
            initialized: false,
            status_requested: false,
            fault_active: false,
        }
    }

    /// Registers a hall sensor. Sensors are synced after all actuators.
    ///
    /// # Errors
    /// * `AlreadyInitialized` - `init` has already run
    /// * `CapacityExceeded` - [`MAX_HALL_SENSORS`] are already registered
    pub fn add_hall_sensor(&mut self, sensor: HallSensor) -> Result<(), TankError> {
        if self.initialized {
            return Err(TankError::AlreadyInitialized);
        }
        self.hall_sensors
            .push(sensor)
            .map_err(|_| TankError::CapacityExceeded {
                capacity: MAX_HALL_SENSORS,
            })
    }

    /// Initialises every device in registration order. Later calls do nothing.
    pub fn init(&mut self) {
        if self.initialized {
            log_warn!("tank already initialised");
            return;
        }

        for motor in &mut self.motors {
            motor.init(&mut self.io);
        }
        for led in &mut self.leds {
            led.init(&mut self.io);
        }
        for sensor in &mut self.hall_sensors {
            sensor.init(&mut self.io);
        }

        self.initialized = true;
        log_info!(
            "tank initialised: 2 motors, 4 leds, {} hall sensors",
            self.hall_sensors.len()
        );
    }

    /// Advances every device to `now`, applies the fault override and emits a
    /// pending status snapshot.
    pub fn sync(&mut self, now: Instant) {
        if !self.initialized {
            log_warn!("sync before init, initialising first");
            self.init();
        }

        let latched = self.motors.iter().any(Motor::has_error);
        if latched {
            self.hold_fault_outputs(now);
        }

        self.sync_actuators(now);
        for sensor in &mut self.hall_sensors {
            sensor.sync(now, &mut self.io);
        }

        let faulted = self.motors.iter().any(Motor::has_error);
        if faulted && !latched {
            log_warn!("motor fault at {} ms, stopping", now.as_millis());
            self.start_fault_outputs(now);
        } else if !faulted && self.fault_active {
            log_info!("motor fault cleared at {} ms", now.as_millis());
        }
        self.fault_active = faulted;

        if self.status_requested {
            self.status_requested = false;
            if self.write_status().is_err() {
                log_warn!("status snapshot dropped by diagnostics sink");
            }
        }
    }

    /// Syncs at the time source's current time.
    pub fn service(&mut self) {
        let now = self.time_source.now();
        self.sync(now);
    }

    /// Dispatches a command to the matching operation.
    pub fn handle_command(&mut self, command: TankCommand) {
        log_debug!("command {}", command_name(command));
        match command {
            TankCommand::Stop => self.stop(),
            TankCommand::RotateRight => {
                self.left_motor(self.speeds.rotate);
                self.right_motor(-self.speeds.rotate);
            }
            TankCommand::RotateLeft => {
                self.left_motor(-self.speeds.rotate);
                self.right_motor(self.speeds.rotate);
            }
            TankCommand::FullForward => {
                self.left_motor(self.speeds.full);
                self.right_motor(self.speeds.full);
            }
            TankCommand::SlowBackward => {
                self.left_motor(-self.speeds.slow);
                self.right_motor(-self.speeds.slow);
            }
            TankCommand::LightsOn => self.lights(true),
            TankCommand::LightsOff => self.lights(false),
            TankCommand::BlinkLeft => self.blink_left(),
            TankCommand::BlinkRight => self.blink_right(),
            TankCommand::Recover => self.recover(),
            TankCommand::Status => self.status(),
            TankCommand::LeftMotor(speed) => self.left_motor(speed),
            TankCommand::RightMotor(speed) => self.right_motor(speed),
        }
    }

    /// Stops both motors immediately.
    pub fn stop(&mut self) {
        for motor in &mut self.motors {
            motor.set_value_now(0);
        }
    }

    /// Sets the left motor speed (clamped to `-99..=99`).
    pub fn left_motor(&mut self, speed: i32) {
        self.motors[Side::Left.index()].set_value_now(speed);
    }

    /// Sets the right motor speed (clamped to `-99..=99`).
    pub fn right_motor(&mut self, speed: i32) {
        self.motors[Side::Right.index()].set_value_now(speed);
    }

    /// Fades all LEDs fully on or off.
    pub fn lights(&mut self, on: bool) {
        let now = self.time_source.now();
        let target = if on { BRIGHTNESS_RANGE.max() } else { BRIGHTNESS_RANGE.min() };
        for led in &mut self.leds {
            led.animate_linearly(target, self.timing.lights_fade_ms, now);
        }
    }

    /// Blinks the left LEDs and turns the right ones off.
    pub fn blink_left(&mut self) {
        self.blink_side(Side::Left);
    }

    /// Blinks the right LEDs and turns the left ones off.
    pub fn blink_right(&mut self) {
        self.blink_side(Side::Right);
    }

    /// Clears both motors' fault flags. Motion is not restored.
    pub fn recover(&mut self) {
        log_info!("recover requested");
        for motor in &mut self.motors {
            motor.clear_error();
        }
    }

    /// Requests a status snapshot on the next [`TankState::sync`].
    pub fn status(&mut self) {
        self.status_requested = true;
    }

    /// Returns true if the last `sync` saw a motor fault.
    pub fn is_faulted(&self) -> bool {
        self.fault_active
    }

    /// Returns true once [`TankState::init`] has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Returns true if a status snapshot is pending.
    pub fn is_status_requested(&self) -> bool {
        self.status_requested
    }

    /// The motor on `side`.
    pub fn motor(&self, side: Side) -> &Motor {
        &self.motors[side.index()]
    }

    /// The left motor.
    pub fn left(&self) -> &Motor {
        self.motor(Side::Left)
    }

    /// The right motor.
    pub fn right(&self) -> &Motor {
        self.motor(Side::Right)
    }

    /// The LED at `position`.
    pub fn led(&self, position: LedPosition) -> &Led {
        &self.leds[position.index()]
    }

    /// Registered hall sensors, in registration order.
    pub fn hall_sensors(&self) -> &[HallSensor] {
        &self.hall_sensors
    }

    /// Hardware access.
    pub fn io(&self) -> &IO {
        &self.io
    }

    /// Mutable hardware access.
    pub fn io_mut(&mut self) -> &mut IO {
        &mut self.io
    }

    /// Diagnostics sink.
    pub fn diagnostics(&self) -> &W {
        &self.diagnostics
    }

    /// Mutable diagnostics sink.
    pub fn diagnostics_mut(&mut self) -> &mut W {
        &mut self.diagnostics
    }

    fn sync_actuators(&mut self, now: Instant) {
        for motor in &mut self.motors {
            motor.sync(now, &mut self.io);
        }
        for led in &mut self.leds {
            led.sync(now, &mut self.io);
        }
    }

    fn blink_side(&mut self, side: Side) {
        let now = self.time_source.now();
        for position in LedPosition::ALL {
            let led = &mut self.leds[position.index()];
            if position.side() == side {
                led.animate_meander(
                    self.timing.turn_blink_period_ms,
                    self.timing.turn_blink_duty,
                    now,
                );
            } else {
                led.set_value_now(0);
            }
        }
    }

    /// Keeps a latched fault in force before the actuators are written: motors
    /// zeroed, LEDs in the alarm blink. A running alarm blink keeps its phase.
    fn hold_fault_outputs(&mut self, now: Instant) {
        self.stop();

        let period = self.timing.fault_blink_period_ms;
        let duty = self.timing.fault_blink_duty;
        for led in &mut self.leds {
            if !led.animatable().animation().is_blink(period, duty) {
                led.animate_meander(period, duty, now);
            }
        }
    }

    /// Reacts to a fault first seen this tick: zeroes the motors, restarts the
    /// alarm blink at `now` and pushes both to the hardware within the same tick.
    fn start_fault_outputs(&mut self, now: Instant) {
        self.stop();

        let period = self.timing.fault_blink_period_ms;
        let duty = self.timing.fault_blink_duty;
        for led in &mut self.leds {
            led.animate_meander(period, duty, now);
        }

        self.sync_actuators(now);
    }

    fn write_status(&mut self) -> core::fmt::Result {
        let Self {
            diagnostics: out,
            motors,
            leds,
            hall_sensors,
            ..
        } = self;
        let [left, right] = motors;

        writeln!(out, "Motor(L={},R={})", left.speed(), right.speed())?;

        out.write_str("LED(")?;
        for position in LedPosition::ALL {
            write!(
                out,
                "{}={},",
                position.label(),
                leds[position.index()].brightness()
            )?;
        }
        out.write_str(")\n")?;

        out.write_str("L:")?;
        left.describe(&mut *out)?;
        out.write_str("\nR:")?;
        right.describe(&mut *out)?;
        out.write_str("\n")?;

        if !hall_sensors.is_empty() {
            out.write_str("Hall(")?;
            for sensor in hall_sensors.iter() {
                write!(out, "{}={},", sensor.id(), sensor.rpm())?;
            }
            out.write_str(")\n")?;
        }
        Ok(())
    }
}

fn command_name(command: TankCommand) -> &'static str {
    match command {
        TankCommand::Stop => "stop",
        TankCommand::RotateRight => "rotateRight",
        TankCommand::RotateLeft => "rotateLeft",
        TankCommand::FullForward => "fullForward",
        TankCommand::SlowBackward => "slowBackward",
        TankCommand::LightsOn => "lightsOn",
        TankCommand::LightsOff => "lightsOff",
        TankCommand::BlinkLeft => "blinkLeft",
        TankCommand::BlinkRight => "blinkRight",
        TankCommand::Recover => "recover",
        TankCommand::Status => "status",
        TankCommand::LeftMotor(_) => "leftMotor",
        TankCommand::RightMotor(_) => "rightMotor",
    }
}
