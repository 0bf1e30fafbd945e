//! Core value types shared by animations and actuators.

/// A closed integer interval `[min, max]`.
///
/// Each actuator reports one fixed range for its controlled value. Every value
/// written to the actuator is clamped through [`Range::fit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Range {
    min: i32,
    max: i32,
}

impl Range {
    /// Creates a range.
    ///
    /// # Panics
    /// Panics if `min > max`. In a `const` context this is a compile error.
    pub const fn new(min: i32, max: i32) -> Self {
        assert!(min <= max, "range minimum exceeds maximum");
        Self { min, max }
    }

    /// Lower bound (inclusive).
    #[inline]
    pub const fn min(&self) -> i32 {
        self.min
    }

    /// Upper bound (inclusive).
    #[inline]
    pub const fn max(&self) -> i32 {
        self.max
    }

    /// Clamps `value` into the range.
    #[inline]
    pub fn fit(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }

    /// Returns true if `value` lies within the range.
    #[inline]
    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Errors raised while assembling a [`TankState`](crate::TankState).
///
/// Runtime operations never fail; these only cover setup mistakes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TankError {
    /// No room for another device of this kind.
    CapacityExceeded {
        /// Maximum number of devices of this kind.
        capacity: usize,
    },

    /// Devices cannot be registered after `init` has run.
    AlreadyInitialized,
}

impl core::fmt::Display for TankError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TankError::CapacityExceeded { capacity } => {
                write!(f, "device capacity of {} exceeded", capacity)
            }
            TankError::AlreadyInitialized => {
                write!(f, "devices cannot be added after init")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TankError {}
