//! Convenience helpers for loading and saving images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Files move through RGB;
//! only Magnitude-domain buffers correspond to real colors, so saving a
//! Difference buffer is refused.

use crate::image::{Domain, PixelBuffer, CHANNELS};
use crate::util::{PyrBlendError, PyrBlendResult};
use std::path::Path;

/// Creates a Magnitude buffer from an RGB image buffer.
pub fn buffer_from_rgb_image(img: &image::RgbImage) -> PyrBlendResult<PixelBuffer> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img.as_raw().iter().map(|&v| i16::from(v)).collect();
    PixelBuffer::from_vec(data, width, height, Domain::Magnitude)
}

/// Creates a Magnitude buffer from a dynamic image, converting to RGB.
pub fn buffer_from_dynamic_image(img: &image::DynamicImage) -> PyrBlendResult<PixelBuffer> {
    let rgb = img.to_rgb8();
    buffer_from_rgb_image(&rgb)
}

/// Loads an image from disk into a Magnitude buffer.
pub fn load_rgb_image<P: AsRef<Path>>(path: P) -> PyrBlendResult<PixelBuffer> {
    let img = image::open(path).map_err(|err| PyrBlendError::ImageIo {
        reason: err.to_string(),
    })?;
    buffer_from_dynamic_image(&img)
}

/// Converts a Magnitude buffer into an RGB image buffer.
pub fn rgb_image_from_buffer(buffer: &PixelBuffer) -> PyrBlendResult<image::RgbImage> {
    if buffer.domain() != Domain::Magnitude {
        return Err(PyrBlendError::DomainMismatch {
            left: Domain::Magnitude,
            right: buffer.domain(),
        });
    }
    let data: Vec<u8> = buffer.data().iter().map(|&v| v as u8).collect();
    image::RgbImage::from_raw(buffer.width() as u32, buffer.height() as u32, data).ok_or(
        PyrBlendError::BufferTooSmall {
            needed: buffer.width() * buffer.height() * CHANNELS,
            got: buffer.data().len(),
        },
    )
}

/// Saves a Magnitude buffer to disk; the format follows the file extension.
pub fn save_rgb_image<P: AsRef<Path>>(buffer: &PixelBuffer, path: P) -> PyrBlendResult<()> {
    let img = rgb_image_from_buffer(buffer)?;
    img.save(path).map_err(|err| PyrBlendError::ImageIo {
        reason: err.to_string(),
    })
}
