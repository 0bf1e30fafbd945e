//! Hardware I/O boundary.
//!
//! Devices never touch registers directly. They receive an [`Io`] implementation on
//! every `init`/`sync` call and address pins by number, so the whole core runs
//! unchanged against a board HAL or a host-side mock.

/// A board pin number.
pub type Pin = u8;

/// Digital logic level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0.
    Low,
    /// Logic 1.
    High,
}

/// Trait for abstracting pin-level hardware access.
///
/// All operations are fire-and-forget: they must not block, and they cannot
/// fail. Handle any hardware errors internally.
pub trait Io {
    /// Highest level accepted by [`Io::write_analog`]. 255 for an 8-bit PWM channel.
    const ANALOG_MAX: u16 = 255;

    /// Configures `pin` as a push-pull output.
    fn configure_output(&mut self, pin: Pin);

    /// Configures `pin` as an input.
    fn configure_input(&mut self, pin: Pin);

    /// Drives a digital output.
    fn write_digital(&mut self, pin: Pin, level: Level);

    /// Sets a PWM output to `level` in `0..=ANALOG_MAX`.
    fn write_analog(&mut self, pin: Pin, level: u16);

    /// Reads a digital input.
    fn read_digital(&mut self, pin: Pin) -> Level;

    /// Samples an analog input.
    fn read_analog(&mut self, pin: Pin) -> u16;

    /// Enables the edge interrupt bound to `pin`.
    ///
    /// The platform's handler is expected to call
    /// [`RevolutionCounter::record_edge`](crate::hall::RevolutionCounter::record_edge)
    /// for the matching sensor.
    fn enable_edge_interrupt(&mut self, pin: Pin);

    /// Disables the edge interrupt bound to `pin`.
    fn disable_edge_interrupt(&mut self, pin: Pin);
}
