//! Time-based value animations.

use crate::time::Instant;
use crate::types::Range;

/// A function of time producing an integer setpoint.
///
/// Animations are plain values: immutable once built and evaluated with
/// [`Animation::value_at`], which depends only on the construction parameters
/// and the time passed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Animation {
    /// Hold a fixed value.
    Const {
        /// The value returned at every instant.
        value: i32,
    },

    /// Ramp linearly from `from` to `to` over `duration_ms`, starting at `start`.
    Linear {
        /// When the ramp begins. Earlier instants return `from`.
        start: Instant,
        /// Value at `start`.
        from: i32,
        /// Value at and after `start + duration_ms`.
        to: i32,
        /// Ramp length. Zero jumps straight to `to`.
        duration_ms: u32,
    },

    /// Square wave between `range.max` (high phase) and `range.min` (low phase).
    Blink {
        /// Phase reference; each period starts with the high phase.
        start: Instant,
        /// Bounds to oscillate between.
        range: Range,
        /// Length of one full cycle.
        period_ms: u32,
        /// Share of the period spent high, `0..=100`.
        duty_cycle: u8,
    },
}

impl Animation {
    /// Constant animation.
    #[inline]
    pub const fn constant(value: i32) -> Self {
        Animation::Const { value }
    }

    /// Linear ramp from `from` at `start` to `to` after `duration_ms`.
    #[inline]
    pub const fn linear(start: Instant, from: i32, to: i32, duration_ms: u32) -> Self {
        Animation::Linear {
            start,
            from,
            to,
            duration_ms,
        }
    }

    /// Blink between the bounds of `range`. `duty_cycle` is clamped to 100.
    #[inline]
    pub fn blink(start: Instant, range: Range, period_ms: u32, duty_cycle: u8) -> Self {
        Animation::Blink {
            start,
            range,
            period_ms,
            duty_cycle: duty_cycle.min(100),
        }
    }

    /// Calculates the animated value at `now`.
    pub fn value_at(&self, now: Instant) -> i32 {
        match *self {
            Animation::Const { value } => value,
            Animation::Linear {
                start,
                from,
                to,
                duration_ms,
            } => {
                let Some(elapsed) = now.checked_duration_since(start) else {
                    return from;
                };
                if elapsed >= u64::from(duration_ms) {
                    return to;
                }

                // elapsed < duration_ms <= u32::MAX, so the product fits in i64
                let delta = i64::from(to) - i64::from(from);
                let step = (elapsed as i64 * delta) / i64::from(duration_ms);
                (i64::from(from) + step) as i32
            }
            Animation::Blink {
                start,
                range,
                period_ms,
                duty_cycle,
            } => {
                if period_ms == 0 {
                    return if duty_cycle > 0 { range.max() } else { range.min() };
                }

                let period = u64::from(period_ms);
                let phase = now.saturating_duration_since(start) % period;
                let high_window = period * u64::from(duty_cycle) / 100;

                if phase < high_window {
                    range.max()
                } else {
                    range.min()
                }
            }
        }
    }

    /// Returns true if this is a blink with the given period and duty cycle,
    /// regardless of its phase.
    pub fn is_blink(&self, period_ms: u32, duty_cycle: u8) -> bool {
        matches!(
            *self,
            Animation::Blink { period_ms: p, duty_cycle: d, .. }
                if p == period_ms && d == duty_cycle.min(100)
        )
    }

    /// Returns true if the animation no longer changes after `now`.
    pub fn is_settled(&self, now: Instant) -> bool {
        match *self {
            Animation::Const { .. } => true,
            Animation::Linear {
                start, duration_ms, ..
            } => now
                .checked_duration_since(start)
                .is_some_and(|elapsed| elapsed >= u64::from(duration_ms)),
            Animation::Blink {
                period_ms,
                duty_cycle,
                ..
            } => period_ms == 0 || duty_cycle == 0 || duty_cycle == 100,
        }
    }
}

impl Default for Animation {
    fn default() -> Self {
        Animation::Const { value: 0 }
    }
}
