// SPDX-License-Identifier: MPL-2.0
//! Pinch sub-state: ratio-based scaling anchored at the focal point.

use crate::config::ScaleBounds;
use crate::geometry::Transform;
use iced::Point;

/// Finger distances below this are too noisy to derive a stable ratio.
const MIN_PINCH_DISTANCE: f32 = 10.0;

/// Snapshot of the state at the moment a pinch begins.
#[derive(Debug, Clone, Copy)]
struct Snapshot {
    /// Transform when the pinch started.
    transform: Transform,
    /// Focal midpoint in container coordinates at gesture start.
    focal: Point,
    /// Pointer distance at gesture start.
    distance: f32,
}

/// Manages an in-flight pinch gesture.
#[derive(Debug, Clone, Default)]
pub struct State {
    snapshot: Option<Snapshot>,
}

impl State {
    /// Starts a pinch from the current transform.
    pub fn start(&mut self, transform: Transform, focal: Point, distance: f32) {
        self.snapshot = Some(Snapshot {
            transform,
            focal,
            distance,
        });
    }

    /// Stops the pinch.
    pub fn stop(&mut self) {
        self.snapshot = None;
    }

    /// Whether a pinch is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Computes the transform for the current pinch geometry.
    ///
    /// The scale is the start scale multiplied by the distance ratio and
    /// clamped into `bounds` on every update. The image point under the
    /// start focal point stays anchored, and focal midpoint movement pans
    /// on top of it.
    #[must_use]
    pub fn transform_for(
        &self,
        focal: Point,
        distance: f32,
        bounds: ScaleBounds,
        center: Point,
    ) -> Option<Transform> {
        let snapshot = self.snapshot?;
        if snapshot.distance < MIN_PINCH_DISTANCE {
            return None;
        }

        let new_scale = bounds.clamp(snapshot.transform.scale * (distance / snapshot.distance));
        let anchored = snapshot
            .transform
            .scale_about(new_scale, snapshot.focal, center);
        Some(anchored.pan_by(focal - snapshot.focal))
    }
}
