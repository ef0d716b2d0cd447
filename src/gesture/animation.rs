// SPDX-License-Identifier: MPL-2.0
//! Double-tap zoom animation: fixed-duration transform interpolation.

use crate::config::defaults::DOUBLE_TAP_ANIMATION_DURATION;
use crate::geometry::Transform;
use std::time::{Duration, Instant};

/// A running transform animation.
///
/// Sampled on animation ticks; cancellation is dropping the value. Time is
/// passed in rather than read from the clock so sampling stays
/// deterministic under test.
#[derive(Debug, Clone, Copy)]
pub struct ZoomAnimation {
    from: Transform,
    to: Transform,
    started_at: Instant,
    duration: Duration,
}

impl ZoomAnimation {
    /// Starts an animation between two transforms.
    #[must_use]
    pub fn new(from: Transform, to: Transform, started_at: Instant) -> Self {
        Self {
            from,
            to,
            started_at,
            duration: DOUBLE_TAP_ANIMATION_DURATION,
        }
    }

    /// The transform the animation is heading toward.
    #[must_use]
    pub fn target(&self) -> Transform {
        self.to
    }

    /// Samples the animation at `now`. Returns the interpolated transform
    /// and whether the animation has finished.
    #[must_use]
    pub fn sample(&self, now: Instant) -> (Transform, bool) {
        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed >= self.duration {
            return (self.to, true);
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        (self.from.lerp(&self.to, ease_out_cubic(t)), false)
    }
}

/// Ease-out cubic: fast start, gentle landing.
fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;
    use iced::Vector;

    fn target() -> Transform {
        Transform {
            scale: 3.0,
            translation: Vector::new(-40.0, 10.0),
        }
    }

    #[test]
    fn sample_at_start_is_the_origin_transform() {
        let start = Instant::now();
        let animation = ZoomAnimation::new(Transform::IDENTITY, target(), start);

        let (transform, finished) = animation.sample(start);
        assert!(!finished);
        assert_abs_diff_eq!(transform.scale, 1.0);
    }

    #[test]
    fn sample_after_duration_is_the_target() {
        let start = Instant::now();
        let animation = ZoomAnimation::new(Transform::IDENTITY, target(), start);

        let (transform, finished) = animation.sample(start + DOUBLE_TAP_ANIMATION_DURATION);
        assert!(finished);
        assert_eq!(transform, target());
    }

    #[test]
    fn sample_midway_is_between_endpoints() {
        let start = Instant::now();
        let animation = ZoomAnimation::new(Transform::IDENTITY, target(), start);

        let (transform, finished) = animation.sample(start + DOUBLE_TAP_ANIMATION_DURATION / 2);
        assert!(!finished);
        assert!(transform.scale > 1.0 && transform.scale < 3.0);
    }

    #[test]
    fn easing_is_monotonic_over_the_unit_interval() {
        let mut last = 0.0;
        for step in 0..=10 {
            let eased = ease_out_cubic(step as f32 / 10.0);
            assert!(eased >= last);
            last = eased;
        }
        assert_abs_diff_eq!(ease_out_cubic(1.0), 1.0);
    }
}
