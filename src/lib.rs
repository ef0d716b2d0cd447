// SPDX-License-Identifier: MPL-2.0
//! `iced_image_zoom` is a pan/zoom image component for the Iced GUI
//! framework.
//!
//! It displays an image and maps pointer gestures - pinch, pan, single
//! and double taps, mouse-wheel steps - onto a clamped scale/translation
//! transform, with a validated configuration surface, typed event
//! callbacks, and an imperative reset.

#![doc(html_root_url = "https://docs.rs/iced_image_zoom/0.1.0")]

pub mod component;
pub mod config;
pub mod error;
pub mod events;
pub mod gesture;
pub mod geometry;
pub mod media;

#[cfg(test)]
pub mod test_utils;

pub use component::{Message, State};
pub use config::{GestureConfig, PointerBounds, ScaleBounds, ZoomOptions};
pub use error::{Error, Result};
pub use events::{Event, EventHandlers};
pub use gesture::Phase;
pub use geometry::{LayoutState, Transform};
pub use media::{ImageData, ImageSource};
