// SPDX-License-Identifier: MPL-2.0
//! Image sources and loading.
//!
//! The component accepts an image as a filesystem path, an HTTP(S) URI,
//! encoded bytes, or raw RGBA pixels. Loading is async and reports back
//! through a message; decoding goes through the `image` crate so the
//! dimensions needed for layout measurement are always known.

use crate::error::{Error, Result};
use iced::widget::image;
use image_rs::GenericImageView;
use std::path::PathBuf;

/// Where the image comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// A file on disk.
    Path(PathBuf),
    /// An `http`/`https` URI.
    Uri(String),
    /// Already-encoded bytes (PNG, JPEG, ...).
    Bytes(Vec<u8>),
    /// Raw RGBA pixels.
    Rgba {
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    },
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        ImageSource::Path(path)
    }
}

impl From<&str> for ImageSource {
    fn from(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            ImageSource::Uri(value.to_string())
        } else {
            ImageSource::Path(PathBuf::from(value))
        }
    }
}

/// A decoded image ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    /// Handle consumed by the renderer.
    pub handle: image::Handle,
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
}

impl ImageData {
    /// Creates an `ImageData` from raw RGBA pixels.
    ///
    /// Fails when the pixel buffer does not match the dimensions.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(Error::Image(format!(
                "expected {expected} RGBA bytes for {width}x{height}, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            handle: image::Handle::from_rgba(width, height, pixels),
            width,
            height,
        })
    }

    /// Decodes encoded bytes (PNG, JPEG, ...) into an `ImageData`.
    pub fn from_encoded(bytes: Vec<u8>) -> Result<Self> {
        let decoded = image_rs::load_from_memory(&bytes)?;
        let (width, height) = decoded.dimensions();
        Ok(Self {
            handle: image::Handle::from_bytes(bytes),
            width,
            height,
        })
    }

    /// The image size as floating-point dimensions.
    #[must_use]
    pub fn size(&self) -> iced::Size {
        iced::Size::new(self.width as f32, self.height as f32)
    }
}

/// Loads an image from the given source.
pub async fn load(source: ImageSource) -> Result<ImageData> {
    match source {
        ImageSource::Path(path) => {
            let bytes = tokio::fs::read(&path).await?;
            ImageData::from_encoded(bytes)
        }
        ImageSource::Uri(uri) => {
            let response = reqwest::get(&uri).await?.error_for_status()?;
            let bytes = response.bytes().await?;
            ImageData::from_encoded(bytes.to_vec())
        }
        ImageSource::Bytes(bytes) => ImageData::from_encoded(bytes),
        ImageSource::Rgba {
            width,
            height,
            pixels,
        } => ImageData::from_rgba(width, height, pixels),
    }
}
