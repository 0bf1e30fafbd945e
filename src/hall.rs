//! Wheel hall sensor with interrupt-driven revolution counting.
//!
//! The sensor magnet passes twice per revolution, so the interrupt handler counts
//! half revolutions into a [`RevolutionCounter`]. The first tick starts the
//! measurement window. After that, once per update period, the tick reads and
//! resets that counter inside a critical section and derives RPM.

use core::cell::Cell;
use core::fmt::Write;

use critical_section::Mutex;

use crate::device::{Device, Lifecycle};
use crate::io::{Io, Pin};
use crate::time::Instant;

const EDGES_PER_REVOLUTION: u64 = 2;
const MILLIS_PER_MINUTE: u64 = 60_000;

/// Half-revolution edge counter shared between an interrupt handler and a sensor tick.
///
/// Place one in a `static` per sensor and call [`RevolutionCounter::record_edge`]
/// from the pin's edge interrupt.
pub struct RevolutionCounter {
    edges: Mutex<Cell<u32>>,
}

impl RevolutionCounter {
    /// Creates a zeroed counter.
    pub const fn new() -> Self {
        Self {
            edges: Mutex::new(Cell::new(0)),
        }
    }

    /// Counts one edge. Call from the interrupt handler.
    pub fn record_edge(&self) {
        critical_section::with(|cs| {
            let edges = self.edges.borrow(cs);
            edges.set(edges.get().wrapping_add(1));
        });
    }

    /// Edges counted since the last [`RevolutionCounter::take`].
    pub fn peek(&self) -> u32 {
        critical_section::with(|cs| self.edges.borrow(cs).get())
    }

    /// Reads and resets the count atomically with respect to the interrupt.
    pub fn take(&self) -> u32 {
        critical_section::with(|cs| self.edges.borrow(cs).replace(0))
    }
}

impl Default for RevolutionCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// RPM derived from `edges` half-revolutions counted over `elapsed_ms`.
pub fn rpm_from_edges(edges: u32, elapsed_ms: u64) -> u32 {
    if elapsed_ms == 0 {
        return 0;
    }
    let rpm = u64::from(edges) * MILLIS_PER_MINUTE / (EDGES_PER_REVOLUTION * elapsed_ms);
    rpm.min(u64::from(u32::MAX)) as u32
}

/// A wheel speed sensor.
pub struct HallSensor {
    id: u8,
    pin: Pin,
    update_period_ms: u32,
    last_update: Option<Instant>,
    rpm: u32,
    counter: &'static RevolutionCounter,
    lifecycle: Lifecycle,
}

impl HallSensor {
    /// Creates a sensor on `pin` that recomputes RPM every `update_period_ms`.
    pub fn new(
        id: u8,
        pin: Pin,
        update_period_ms: u32,
        counter: &'static RevolutionCounter,
    ) -> Self {
        Self {
            id,
            pin,
            update_period_ms,
            last_update: None,
            rpm: 0,
            counter,
            lifecycle: Lifecycle::new(),
        }
    }

    /// Sensor identifier used in diagnostics.
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Input pin.
    pub fn pin(&self) -> Pin {
        self.pin
    }

    /// Last computed RPM.
    pub fn rpm(&self) -> u32 {
        self.rpm
    }

    /// When RPM was last recomputed, or when counting started if it has not been yet.
    pub fn last_update(&self) -> Option<Instant> {
        self.last_update
    }

    /// Stops counting by disabling the edge interrupt.
    pub fn shutdown<IO: Io>(&mut self, io: &mut IO) {
        io.disable_edge_interrupt(self.pin);
    }
}

impl Device for HallSensor {
    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.lifecycle
    }

    fn on_init<IO: Io>(&mut self, io: &mut IO) {
        io.configure_input(self.pin);
        let _ = self.counter.take();
        io.enable_edge_interrupt(self.pin);
    }

    fn on_sync<IO: Io>(&mut self, now: Instant, _io: &mut IO) {
        // The first tick opens the measurement window
        let Some(last_update) = self.last_update else {
            let _ = self.counter.take();
            self.last_update = Some(now);
            return;
        };

        let elapsed = now.saturating_duration_since(last_update);
        if elapsed == 0 || elapsed < u64::from(self.update_period_ms) {
            return;
        }

        let edges = self.counter.take();
        self.rpm = rpm_from_edges(edges, elapsed);
        self.last_update = Some(now);
        log_debug!("hall sensor {}: {} edges in {} ms, {} rpm", self.id, edges, elapsed, self.rpm);
    }

    fn describe<W: Write>(&self, out: &mut W) -> core::fmt::Result {
        write!(out, "RPM{};", self.rpm)
    }
}
