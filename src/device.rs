//! Device lifecycle and the actuator capability.
//!
//! Every piece of hardware the tank drives is a [`Device`]: initialised once,
//! then synced on every tick with a non-decreasing timestamp. Devices whose output
//! follows an animated setpoint additionally implement [`Actuator`], which exposes
//! the animation controls of the [`Animatable`] they hold.

use crate::animatable::Animatable;
use crate::io::Io;
use crate::time::Instant;
use crate::types::Range;
use core::fmt::Write;

/// Capacity of the string returned by [`Device::state`].
pub const STATE_CAPACITY: usize = 32;

/// Where a device is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Constructed, `init` not yet called.
    Uninitialized,
    /// `init` done, no tick yet.
    Initialized,
    /// Synced at least once.
    Ticking,
}

/// Lifecycle bookkeeping embedded in every device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Lifecycle {
    phase: Phase,
    last_sync: Option<Instant>,
}

impl Lifecycle {
    /// A fresh, uninitialised lifecycle.
    pub const fn new() -> Self {
        Self {
            phase: Phase::Uninitialized,
            last_sync: None,
        }
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Timestamp of the most recent sync, `None` if never synced.
    #[inline]
    pub fn last_sync(&self) -> Option<Instant> {
        self.last_sync
    }

    fn mark_initialized(&mut self) {
        if self.phase == Phase::Uninitialized {
            self.phase = Phase::Initialized;
        }
    }

    fn record_sync(&mut self, now: Instant) {
        if let Some(last) = self.last_sync
            && now < last
        {
            log_warn!(
                "sync time went backwards: {} ms after {} ms",
                now.as_millis(),
                last.as_millis()
            );
        }
        self.phase = Phase::Ticking;
        self.last_sync = Some(now);
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

/// Init/tick contract implemented by every device.
pub trait Device {
    /// Lifecycle bookkeeping.
    fn lifecycle(&self) -> &Lifecycle;

    /// Mutable lifecycle bookkeeping.
    fn lifecycle_mut(&mut self) -> &mut Lifecycle;

    /// Device-specific initialisation (pin modes, interrupts).
    fn on_init<IO: Io>(&mut self, io: &mut IO);

    /// Device-specific per-tick work. Must not block.
    fn on_sync<IO: Io>(&mut self, now: Instant, io: &mut IO);

    /// Initialises the device. Call once, before the first [`Device::sync`].
    fn init<IO: Io>(&mut self, io: &mut IO) {
        self.on_init(io);
        self.lifecycle_mut().mark_initialized();
    }

    /// Advances the device to `now`: records the sync time, then runs [`Device::on_sync`].
    fn sync<IO: Io>(&mut self, now: Instant, io: &mut IO) {
        self.lifecycle_mut().record_sync(now);
        self.on_sync(now, io);
    }

    /// Timestamp of the most recent sync.
    fn last_sync(&self) -> Option<Instant> {
        self.lifecycle().last_sync()
    }

    /// Writes a short diagnostic of the device state. Writes nothing by default.
    fn describe<W: Write>(&self, _out: &mut W) -> core::fmt::Result {
        Ok(())
    }

    /// The diagnostic written by [`Device::describe`], truncated to [`STATE_CAPACITY`].
    fn state(&self) -> heapless::String<STATE_CAPACITY> {
        let mut text = heapless::String::new();
        if self.describe(&mut text).is_err() {
            log_warn!("device state truncated to {} bytes", STATE_CAPACITY);
        }
        text
    }
}

/// A device whose output follows an animated value.
///
/// Implementors only expose their [`Animatable`]; the animation controls are
/// provided.
pub trait Actuator: Device {
    /// The animated value.
    fn animatable(&self) -> &Animatable;

    /// Mutable access to the animated value.
    fn animatable_mut(&mut self) -> &mut Animatable;

    /// Value produced by the latest tick.
    fn value(&self) -> i32 {
        self.animatable().value()
    }

    /// Bounds of the value.
    fn range(&self) -> Range {
        self.animatable().range()
    }

    /// Holds `value` (clamped) from the next tick on.
    fn set_value_now(&mut self, value: i32) {
        self.animatable_mut().set_value_now(value);
    }

    /// Ramps linearly to `target` over `duration_ms`, starting at `now`.
    fn animate_linearly(&mut self, target: i32, duration_ms: u32, now: Instant) {
        self.animatable_mut().animate_linearly(target, duration_ms, now);
    }

    /// Blinks between the range bounds, starting at `now`.
    fn animate_meander(&mut self, period_ms: u32, duty_cycle: u8, now: Instant) {
        self.animatable_mut().animate_meander(period_ms, duty_cycle, now);
    }

    /// Freezes the value where it is.
    fn stop_animation(&mut self) {
        self.animatable_mut().stop_animation();
    }
}
