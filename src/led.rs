//! Status LED with perceptual brightness.

use crate::animatable::Animatable;
use crate::device::{Actuator, Device, Lifecycle};
use crate::io::{Io, Pin};
use crate::time::Instant;
use crate::types::Range;

/// Brightness bounds of every LED.
pub const BRIGHTNESS_RANGE: Range = Range::new(0, 99);

/// Maps a linear brightness onto a PWM level so that equal brightness steps look
/// equally bright.
///
/// `level = round(2^(brightness / f)) - 1` with
/// `f = max_brightness * log10(2) / log10(output_max + 1)`, so `0` maps to `0`
/// and `max_brightness` maps to `output_max`.
pub fn perceptual_level(brightness: i32, max_brightness: i32, output_max: u16) -> u16 {
    if brightness <= 0 || max_brightness <= 0 {
        return 0;
    }
    let factor = log_factor(max_brightness, output_max);
    let level = libm::roundf(libm::powf(2.0, brightness as f32 / factor)) - 1.0;
    level.clamp(0.0, f32::from(output_max)) as u16
}

fn log_factor(max_brightness: i32, output_max: u16) -> f32 {
    max_brightness as f32 * libm::log10f(2.0) / libm::log10f(f32::from(output_max) + 1.0)
}

/// A single PWM-dimmed LED.
#[derive(Debug, Clone)]
pub struct Led {
    pin: Pin,
    brightness: Animatable,
    level: u16,
    lifecycle: Lifecycle,
}

impl Led {
    /// Creates an LED on `pin`, initially off.
    pub fn new(pin: Pin) -> Self {
        Self {
            pin,
            brightness: Animatable::new(BRIGHTNESS_RANGE, 0),
            level: 0,
            lifecycle: Lifecycle::new(),
        }
    }

    /// Output pin.
    pub fn pin(&self) -> Pin {
        self.pin
    }

    /// Current brightness, `0..=99`.
    pub fn brightness(&self) -> i32 {
        self.brightness.value()
    }

    /// PWM level written on the last tick.
    pub fn level(&self) -> u16 {
        self.level
    }
}

impl Device for Led {
    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.lifecycle
    }

    fn on_init<IO: Io>(&mut self, io: &mut IO) {
        io.configure_output(self.pin);
    }

    fn on_sync<IO: Io>(&mut self, now: Instant, io: &mut IO) {
        let brightness = self.brightness.tick(now);
        self.level = perceptual_level(brightness, BRIGHTNESS_RANGE.max(), IO::ANALOG_MAX);
        io.write_analog(self.pin, self.level);
    }
}

impl Actuator for Led {
    fn animatable(&self) -> &Animatable {
        &self.brightness
    }

    fn animatable_mut(&mut self) -> &mut Animatable {
        &mut self.brightness
    }
}
