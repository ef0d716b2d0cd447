// SPDX-License-Identifier: MPL-2.0
//! Pan sub-state: pointer-count-gated translation tracking.

use iced::{Point, Vector};

/// Manages an in-flight pan gesture.
///
/// A pan snapshots the translation at gesture start and derives the new
/// translation from the pointer centroid's movement since then.
#[derive(Debug, Clone, Default)]
pub struct State {
    /// Whether a pan is currently active.
    active: bool,
    /// Centroid position where the pan started.
    start_position: Option<Point>,
    /// Transform translation when the pan started.
    start_translation: Vector,
}

impl State {
    /// Starts a pan at the given centroid with the current translation.
    pub fn start(&mut self, position: Point, translation: Vector) {
        self.active = true;
        self.start_position = Some(position);
        self.start_translation = translation;
    }

    /// Stops the pan.
    pub fn stop(&mut self) {
        self.active = false;
        self.start_position = None;
        self.start_translation = Vector::new(0.0, 0.0);
    }

    /// Whether a pan is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Computes the translation for the current centroid position.
    #[must_use]
    pub fn translation_for(&self, position: Point) -> Option<Vector> {
        if !self.active {
            return None;
        }
        let start = self.start_position?;
        Some(self.start_translation + (position - start))
    }
}
