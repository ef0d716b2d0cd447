// SPDX-License-Identifier: MPL-2.0
//! Layout measurement and transform math for the zoomable image.
//!
//! [`LayoutState`] is the measured geometry of the image inside its
//! container; [`Transform`] is the scale/translation the gestures drive.
//! Both are plain `Copy` value types replaced wholesale on every update, so
//! a consumer can never observe a half-written snapshot.

use iced::{Point, Rectangle, Size, Vector};

/// Measured position and size of the image relative to its container.
///
/// The center is exposed as a computed accessor over the canonical
/// rectangle, so it can never drift out of sync with `x`/`y`/`width`/
/// `height`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutState {
    /// The x-coordinate of the image's top-left corner relative to the
    /// container's top-left corner.
    pub x: f32,
    /// The y-coordinate of the image's top-left corner relative to the
    /// container's top-left corner.
    pub y: f32,
    /// The measured width of the image.
    pub width: f32,
    /// The measured height of the image.
    pub height: f32,
}

impl LayoutState {
    /// The state before any measurement has arrived.
    pub const UNMEASURED: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Computes the layout from the container's and image's measured
    /// rectangles.
    ///
    /// Pure; all fields are recomputed together. Measurements with
    /// negative or non-finite dimensions yield [`Self::UNMEASURED`]
    /// instead of negative geometry.
    #[must_use]
    pub fn measure(container: Rectangle, image: Rectangle) -> Self {
        let dims = [
            container.width,
            container.height,
            image.width,
            image.height,
        ];
        if dims.iter().any(|d| !d.is_finite() || *d < 0.0) {
            return Self::UNMEASURED;
        }

        Self {
            x: image.x - container.x,
            y: image.y - container.y,
            width: image.width,
            height: image.height,
        }
    }

    /// Whether real geometry has been measured.
    #[must_use]
    pub fn is_measured(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// The center point of the image relative to the container's top-left
    /// corner.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// The measured size.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The measured rectangle in container coordinates.
    #[must_use]
    pub fn rect(&self) -> Rectangle {
        Rectangle::new(Point::new(self.x, self.y), self.size())
    }
}

/// Scale and translation applied to the laid-out image.
///
/// Scaling is defined around the layout center: a container point `p`
/// maps to `center + (p - center) * scale + translation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Uniform zoom scale.
    pub scale: f32,
    /// Translation in container coordinates.
    pub translation: Vector,
}

impl Transform {
    /// Scale 1, translation (0, 0).
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translation: Vector::new(0.0, 0.0),
    };

    /// Whether this transform is the identity.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.scale == 1.0 && self.translation == Vector::new(0.0, 0.0)
    }

    /// Returns the transform shifted by the given delta.
    #[must_use]
    pub fn pan_by(&self, delta: Vector) -> Self {
        Self {
            scale: self.scale,
            translation: self.translation + delta,
        }
    }

    /// Returns the transform at `new_scale` with the translation adjusted
    /// so the image point currently under `focal` stays under it.
    ///
    /// `center` is the layout center the scale is defined around.
    #[must_use]
    pub fn scale_about(&self, new_scale: f32, focal: Point, center: Point) -> Self {
        let rel = focal - center;

        // Image-space point under the focal point before the scale change.
        let image_x = (rel.x - self.translation.x) / self.scale;
        let image_y = (rel.y - self.translation.y) / self.scale;

        Self {
            scale: new_scale,
            translation: Vector::new(rel.x - image_x * new_scale, rel.y - image_y * new_scale),
        }
    }

    /// Maps the laid-out rectangle through this transform.
    #[must_use]
    pub fn apply_to(&self, layout: &LayoutState) -> Rectangle {
        let center = layout.center();
        let origin = Point::new(
            center.x + (layout.x - center.x) * self.scale + self.translation.x,
            center.y + (layout.y - center.y) * self.scale + self.translation.y,
        );
        Rectangle::new(
            origin,
            Size::new(layout.width * self.scale, layout.height * self.scale),
        )
    }

    /// Linear interpolation between two transforms.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            scale: self.scale + (other.scale - self.scale) * t,
            translation: Vector::new(
                self.translation.x + (other.translation.x - self.translation.x) * t,
                self.translation.y + (other.translation.y - self.translation.y) * t,
            ),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
