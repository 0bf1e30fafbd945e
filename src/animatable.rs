//! A bounded value driven by a replaceable animation.

use crate::animation::Animation;
use crate::time::Instant;
use crate::types::Range;

/// Holds an actuator's controlled value and the one animation driving it.
///
/// Every mutator replaces the current animation outright; there is no queue and
/// no blending. The value itself only changes on [`Animatable::tick`], and it
/// always lies within the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Animatable {
    range: Range,
    value: i32,
    animation: Animation,
}

impl Animatable {
    /// Creates an animatable value holding `initial` (clamped) until told otherwise.
    pub fn new(range: Range, initial: i32) -> Self {
        let value = range.fit(initial);
        Self {
            range,
            value,
            animation: Animation::constant(value),
        }
    }

    /// The value produced by the most recent tick.
    #[inline]
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Bounds of the value.
    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }

    /// The animation currently driving the value.
    #[inline]
    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Holds `value` (clamped) from the next tick on.
    pub fn set_value_now(&mut self, value: i32) {
        self.animation = Animation::constant(self.range.fit(value));
    }

    /// Ramps from the current value to `target` (clamped) over `duration_ms`, starting at `now`.
    pub fn animate_linearly(&mut self, target: i32, duration_ms: u32, now: Instant) {
        self.animation =
            Animation::linear(now, self.value, self.range.fit(target), duration_ms);
    }

    /// Blinks between the range bounds, starting with the high phase at `now`.
    pub fn animate_meander(&mut self, period_ms: u32, duty_cycle: u8, now: Instant) {
        self.animation = Animation::blink(now, self.range, period_ms, duty_cycle);
    }

    /// Freezes at the current value.
    pub fn stop_animation(&mut self) {
        self.set_value_now(self.value);
    }

    /// Replaces the animation with a prepared one.
    pub fn set_animation(&mut self, animation: Animation) {
        self.animation = animation;
    }

    /// Evaluates the animation at `now` and stores the clamped result.
    pub fn tick(&mut self, now: Instant) -> i32 {
        self.value = self.range.fit(self.animation.value_at(now));
        self.value
    }

    /// Returns true if the value may still change after `now`.
    pub fn is_animating(&self, now: Instant) -> bool {
        !self.animation.is_settled(now)
    }
}
