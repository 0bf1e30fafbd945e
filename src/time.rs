//! Monotonic millisecond time used by animations and device ticks.

/// Trait for abstracting time sources.
///
/// Implement this for your platform's millisecond counter (SysTick,
/// `embassy_time`, a host clock in simulations).
pub trait TimeSource {
    /// Returns the current time instant.
    fn now(&self) -> Instant;
}

/// A point in time, in milliseconds since an arbitrary epoch (usually boot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Instant(u64);

impl Instant {
    /// The epoch. Also the "never synced" reference point.
    pub const ZERO: Self = Instant(0);

    /// Creates an instant from milliseconds since the epoch.
    #[inline]
    pub const fn from_millis(millis: u64) -> Self {
        Instant(millis)
    }

    /// Returns the instant as milliseconds since the epoch.
    #[inline]
    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`, or `None` if `earlier` is later than `self`.
    #[inline]
    pub fn checked_duration_since(&self, earlier: Instant) -> Option<u64> {
        self.0.checked_sub(earlier.0)
    }

    /// Milliseconds elapsed since `earlier`, zero if `earlier` is later than `self`.
    #[inline]
    pub fn saturating_duration_since(&self, earlier: Instant) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Adds milliseconds to the instant, returns None on overflow.
    #[inline]
    pub fn checked_add(self, millis: u64) -> Option<Self> {
        self.0.checked_add(millis).map(Instant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_since_earlier_instant() {
        let a = Instant::from_millis(100);
        let b = Instant::from_millis(350);
        assert_eq!(b.checked_duration_since(a), Some(250));
        assert_eq!(a.checked_duration_since(b), None);
        assert_eq!(a.saturating_duration_since(b), 0);
    }

    #[test]
    fn checked_add_overflows_to_none() {
        assert_eq!(Instant::from_millis(u64::MAX).checked_add(1), None);
        assert_eq!(
            Instant::ZERO.checked_add(42),
            Some(Instant::from_millis(42))
        );
    }
}
