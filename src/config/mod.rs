// SPDX-License-Identifier: MPL-2.0
//! Gesture configuration: the user-facing option record, its validated
//! resolution, and optional persistence of gesture presets to a
//! `gestures.toml` file.
//!
//! Options follow the "resolve once" rule: optional fields with documented
//! defaults are collapsed into a [`GestureConfig`] before any gesture math
//! runs, so downstream code never threads `Option` values around. Malformed
//! combinations (inverted bounds, non-positive scales) are repaired rather
//! than rejected; a bad preset must not crash the host application.

pub mod defaults;

pub use defaults::{
    DEFAULT_DOUBLE_TAP_SCALE, DEFAULT_MAX_PAN_POINTERS, DEFAULT_MAX_SCALE,
    DEFAULT_MIN_PAN_POINTERS, DEFAULT_MIN_SCALE,
};

use crate::error::Result;
use crate::geometry::LayoutState;
use iced::{Point, Size};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "gestures.toml";
const APP_DIR: &str = "iced_image_zoom";

/// User-supplied zoom and gesture options.
///
/// Every field is optional; unset fields fall back to the documented
/// defaults during [`GestureConfig::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoomOptions {
    /// The minimum scale allowed for zooming. Defaults to 1.
    pub min_scale: Option<f32>,
    /// The maximum scale allowed for zooming. Defaults to 5.
    pub max_scale: Option<f32>,
    /// The scale applied when a double-tap gesture is detected. Defaults to 3.
    pub double_tap_scale: Option<f32>,
    /// The minimum number of pointers required to enable panning. Defaults to 2.
    pub min_pan_pointers: Option<u8>,
    /// The maximum number of pointers allowed while panning. Defaults to 2.
    pub max_pan_pointers: Option<u8>,
    /// Whether panning is enabled within the pan pointer range. Defaults to true.
    #[serde(default)]
    pub is_pan_enabled: Option<bool>,
    /// Whether pinching is enabled. Defaults to true.
    #[serde(default)]
    pub is_pinch_enabled: Option<bool>,
    /// Whether double-tap zooming is enabled. Defaults to true.
    #[serde(default)]
    pub is_double_tap_enabled: Option<bool>,
    /// When enabled, a double tap always zooms in toward the double-tap
    /// scale instead of toggling back to the original size. Defaults to
    /// false.
    #[serde(default)]
    pub zoom_in_mode: Option<bool>,
}

/// Inclusive zoom scale bounds, guaranteed ordered and positive.
///
/// Construction repairs malformed input instead of failing: non-positive
/// values fall back to the defaults and an inverted ordering collapses to
/// `min == max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleBounds {
    min: f32,
    max: f32,
}

impl ScaleBounds {
    /// Creates scale bounds, repairing invalid input.
    #[must_use]
    pub fn new(min: f32, max: f32) -> Self {
        let min = if min.is_finite() && min > 0.0 {
            min
        } else {
            DEFAULT_MIN_SCALE
        };
        let max = if max.is_finite() && max > 0.0 {
            max
        } else {
            DEFAULT_MAX_SCALE
        };
        if min > max {
            Self { min, max: min }
        } else {
            Self { min, max }
        }
    }

    /// The lower bound.
    #[must_use]
    pub fn min(self) -> f32 {
        self.min
    }

    /// The upper bound.
    #[must_use]
    pub fn max(self) -> f32 {
        self.max
    }

    /// Clamps a scale into the bounds. This is the single clamping
    /// primitive for the whole crate.
    #[must_use]
    pub fn clamp(self, scale: f32) -> f32 {
        if scale.is_finite() {
            scale.clamp(self.min, self.max)
        } else {
            self.min
        }
    }

    /// Whether a scale lies within the bounds.
    #[must_use]
    pub fn contains(self, scale: f32) -> bool {
        scale >= self.min && scale <= self.max
    }
}

impl Default for ScaleBounds {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SCALE, DEFAULT_MAX_SCALE)
    }
}

/// Inclusive pointer-count bounds for panning, guaranteed ordered and >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerBounds {
    min: u8,
    max: u8,
}

impl PointerBounds {
    /// Creates pointer bounds, repairing invalid input.
    #[must_use]
    pub fn new(min: u8, max: u8) -> Self {
        let min = min.max(1);
        let max = max.max(1);
        if min > max {
            Self { min, max: min }
        } else {
            Self { min, max }
        }
    }

    /// The lower bound.
    #[must_use]
    pub fn min(self) -> u8 {
        self.min
    }

    /// The upper bound.
    #[must_use]
    pub fn max(self) -> u8 {
        self.max
    }

    /// Whether the given pointer count enables panning.
    #[must_use]
    pub fn contains(self, pointers: u8) -> bool {
        pointers >= self.min && pointers <= self.max
    }
}

impl Default for PointerBounds {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_PAN_POINTERS, DEFAULT_MAX_PAN_POINTERS)
    }
}

/// The resolved, validated parameter set the gesture state machine
/// consumes.
///
/// Derived fresh from [`ZoomOptions`] plus the latest [`LayoutState`]
/// whenever either changes; it has no mutable state of its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Zoom scale bounds.
    pub scale_bounds: ScaleBounds,
    /// Scale targeted by a double tap, clamped into `scale_bounds`.
    pub double_tap_scale: f32,
    /// Pointer-count bounds for panning.
    pub pan_pointers: PointerBounds,
    /// Whether panning is enabled.
    pub is_pan_enabled: bool,
    /// Whether pinching is enabled.
    pub is_pinch_enabled: bool,
    /// Whether double-tap zooming is enabled.
    pub is_double_tap_enabled: bool,
    /// Double taps always zoom in when set.
    pub zoom_in_mode: bool,
    /// Measured content size from the current layout.
    pub content_size: Size,
    /// Measured content center from the current layout.
    pub content_center: Point,
}

impl GestureConfig {
    /// Projects user options merged with the current layout into the
    /// validated parameter set. Pure; no side effects.
    #[must_use]
    pub fn resolve(options: &ZoomOptions, layout: &LayoutState) -> Self {
        let scale_bounds = ScaleBounds::new(
            options.min_scale.unwrap_or(DEFAULT_MIN_SCALE),
            options.max_scale.unwrap_or(DEFAULT_MAX_SCALE),
        );
        let double_tap_scale =
            scale_bounds.clamp(options.double_tap_scale.unwrap_or(DEFAULT_DOUBLE_TAP_SCALE));
        let pan_pointers = PointerBounds::new(
            options.min_pan_pointers.unwrap_or(DEFAULT_MIN_PAN_POINTERS),
            options.max_pan_pointers.unwrap_or(DEFAULT_MAX_PAN_POINTERS),
        );

        Self {
            scale_bounds,
            double_tap_scale,
            pan_pointers,
            is_pan_enabled: options.is_pan_enabled.unwrap_or(true),
            is_pinch_enabled: options.is_pinch_enabled.unwrap_or(true),
            is_double_tap_enabled: options.is_double_tap_enabled.unwrap_or(true),
            zoom_in_mode: options.zoom_in_mode.unwrap_or(false),
            content_size: layout.size(),
            content_center: layout.center(),
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self::resolve(&ZoomOptions::default(), &LayoutState::UNMEASURED)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_DIR);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the gesture preset from the default location, falling back to
/// defaults when no file exists.
pub fn load() -> Result<ZoomOptions> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(ZoomOptions::default())
}

/// Saves the gesture preset to the default location.
pub fn save(options: &ZoomOptions) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(options, &path);
    }
    Ok(())
}

/// Loads a gesture preset from a specific path. Invalid TOML yields the
/// defaults rather than an error.
pub fn load_from_path(path: &Path) -> Result<ZoomOptions> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

/// Saves a gesture preset to a specific path, creating parent directories
/// as needed.
pub fn save_to_path(options: &ZoomOptions, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(options)?;
    fs::write(path, content)?;
    Ok(())
}
