// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Scale**: zoom scale bounds and double-tap target
//! - **Pan**: pointer-count bounds for panning
//! - **Tap**: tap timing and movement thresholds
//! - **Animation**: double-tap animation timing

use std::time::Duration;

// ==========================================================================
// Scale Defaults
// ==========================================================================

/// Minimum zoom scale applied when none is configured (1.0 = original size).
pub const DEFAULT_MIN_SCALE: f32 = 1.0;

/// Maximum zoom scale applied when none is configured.
pub const DEFAULT_MAX_SCALE: f32 = 5.0;

/// Scale targeted by a double-tap gesture when none is configured.
pub const DEFAULT_DOUBLE_TAP_SCALE: f32 = 3.0;

/// Zoom factor applied per mouse-wheel step.
pub const WHEEL_ZOOM_FACTOR: f32 = 1.1;

// ==========================================================================
// Pan Defaults
// ==========================================================================

/// Minimum number of simultaneous pointers required to enable panning.
pub const DEFAULT_MIN_PAN_POINTERS: u8 = 2;

/// Maximum number of simultaneous pointers allowed while panning.
pub const DEFAULT_MAX_PAN_POINTERS: u8 = 2;

// ==========================================================================
// Tap Defaults
// ==========================================================================

/// Maximum delay between two taps for them to count as a double tap.
pub const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(350);

/// Maximum press duration for a press/release pair to count as a tap.
pub const TAP_MAX_DURATION: Duration = Duration::from_millis(250);

/// Movement threshold in logical pixels.
///
/// A pointer that travels further than this from its press position stops
/// being a tap candidate and becomes a drag. 8 px is a common touch slop
/// that ignores finger jitter while staying responsive for intentional
/// drags.
pub const TOUCH_SLOP: f32 = 8.0;

/// Maximum distance between two taps for them to count as a double tap.
pub const DOUBLE_TAP_SLOP: f32 = 32.0;

// ==========================================================================
// Animation Defaults
// ==========================================================================

/// Duration of the double-tap zoom animation.
pub const DOUBLE_TAP_ANIMATION_DURATION: Duration = Duration::from_millis(250);

/// Interval between animation frames (roughly 60 fps).
pub const ANIMATION_FRAME_INTERVAL: Duration = Duration::from_millis(16);
