//! Shared test infrastructure for tank-actuation integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::Cell;
use std::collections::{HashMap, HashSet};

use tank_actuation::{Instant, Io, Level, Pin, TankConfig, TimeSource};

// ============================================================================
// Mock Io
// ============================================================================

/// Mock pin bank that records every write and serves scripted inputs
#[derive(Debug, Default)]
pub struct MockIo {
    pub outputs: HashSet<Pin>,
    pub inputs: HashSet<Pin>,
    pub digital_out: HashMap<Pin, Level>,
    pub analog_out: HashMap<Pin, u16>,
    pub digital_in: HashMap<Pin, Level>,
    pub analog_in: HashMap<Pin, u16>,
    pub interrupts: HashSet<Pin>,
    pub analog_writes: Vec<(Pin, u16)>,
}

impl MockIo {
    /// Creates a pin bank where every enable line reads healthy (High)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_digital_input(&mut self, pin: Pin, level: Level) {
        self.digital_in.insert(pin, level);
    }

    pub fn set_analog_input(&mut self, pin: Pin, sample: u16) {
        self.analog_in.insert(pin, sample);
    }

    pub fn digital(&self, pin: Pin) -> Option<Level> {
        self.digital_out.get(&pin).copied()
    }

    pub fn analog(&self, pin: Pin) -> Option<u16> {
        self.analog_out.get(&pin).copied()
    }
}

impl Io for MockIo {
    fn configure_output(&mut self, pin: Pin) {
        self.outputs.insert(pin);
    }

    fn configure_input(&mut self, pin: Pin) {
        self.inputs.insert(pin);
    }

    fn write_digital(&mut self, pin: Pin, level: Level) {
        self.digital_out.insert(pin, level);
    }

    fn write_analog(&mut self, pin: Pin, level: u16) {
        assert!(level <= Self::ANALOG_MAX, "analog level {level} out of range");
        self.analog_out.insert(pin, level);
        self.analog_writes.push((pin, level));
    }

    fn read_digital(&mut self, pin: Pin) -> Level {
        self.digital_in.get(&pin).copied().unwrap_or(Level::High)
    }

    fn read_analog(&mut self, pin: Pin) -> u16 {
        self.analog_in.get(&pin).copied().unwrap_or(0)
    }

    fn enable_edge_interrupt(&mut self, pin: Pin) {
        self.interrupts.insert(pin);
    }

    fn disable_edge_interrupt(&mut self, pin: Pin) {
        self.interrupts.remove(&pin);
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<Instant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(Instant::ZERO),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time
            .set(Instant::from_millis(current.as_millis() + millis));
    }

    pub fn set_time(&self, millis: u64) {
        self.current_time.set(Instant::from_millis(millis));
    }
}

impl TimeSource for MockTimeSource {
    fn now(&self) -> Instant {
        self.current_time.get()
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub fn at(millis: u64) -> Instant {
    Instant::from_millis(millis)
}

/// Default wiring used by every integration test
pub fn config() -> TankConfig {
    TankConfig::default()
}

/// Makes the left motor's driver report a fault
pub fn trip_left_driver(io: &mut MockIo) {
    let pins = config().left_motor.pins;
    io.set_digital_input(pins.enable, Level::Low);
}

/// Makes the left motor's driver report healthy again
pub fn heal_left_driver(io: &mut MockIo) {
    let pins = config().left_motor.pins;
    io.set_digital_input(pins.enable, Level::High);
}
