//! Resampling primitives: smoothing halving, interpolating upsample, and
//! arbitrary-size resize.
//!
//! Downsampling uses a 2x2 box filter with symmetric integer rounding; this
//! keeps the halving rule deterministic (`floor(w/2), floor(h/2)`) for both
//! sample domains. Upsampling and resizing use center-aligned bilinear
//! interpolation and produce exactly the requested dimensions, including
//! non-power-of-two targets.

use crate::image::{Domain, PixelBuffer, CHANNELS};
use crate::util::{PyrBlendError, PyrBlendResult};

/// Halves a buffer with a 2x2 box filter.
///
/// Output dimensions are `floor(width/2), floor(height/2)`; inputs smaller
/// than 2x2 are rejected. The sample domain is preserved.
pub fn downsample(src: &PixelBuffer) -> PyrBlendResult<PixelBuffer> {
    let dst_width = src.width() / 2;
    let dst_height = src.height() / 2;
    if dst_width == 0 || dst_height == 0 {
        return Err(PyrBlendError::InvalidSize {
            width: dst_width,
            height: dst_height,
        });
    }
    let out = PixelBuffer::from_fn(dst_width, dst_height, src.domain(), |x, y| {
        let p00 = src.pixel(2 * x, 2 * y);
        let p10 = src.pixel(2 * x + 1, 2 * y);
        let p01 = src.pixel(2 * x, 2 * y + 1);
        let p11 = src.pixel(2 * x + 1, 2 * y + 1);
        let mut px = [0i16; CHANNELS];
        for c in 0..CHANNELS {
            let sum = i32::from(p00[c]) + i32::from(p10[c]) + i32::from(p01[c]) + i32::from(p11[c]);
            px[c] = round_quarter(sum);
        }
        px
    });
    Ok(out)
}

/// Upsamples a buffer to the exact target dimensions.
///
/// The expand and reconstruct steps request the finer layer's dimensions
/// directly, so the target is not required to be a clean doubling.
pub fn upsample(
    src: &PixelBuffer,
    target_width: usize,
    target_height: usize,
) -> PyrBlendResult<PixelBuffer> {
    bilinear(src, target_width, target_height)
}

/// Resizes a buffer to arbitrary dimensions.
///
/// Used when a pyramid's working size changes; per-layer resampling goes
/// through [`downsample`] and [`upsample`].
pub fn resize(src: &PixelBuffer, width: usize, height: usize) -> PyrBlendResult<PixelBuffer> {
    bilinear(src, width, height)
}

fn bilinear(src: &PixelBuffer, width: usize, height: usize) -> PyrBlendResult<PixelBuffer> {
    if width == 0 || height == 0 {
        return Err(PyrBlendError::InvalidSize { width, height });
    }
    if src.is_empty() {
        return Err(PyrBlendError::EmptyImage);
    }
    if src.width() == width && src.height() == height {
        return Ok(src.clone());
    }

    let domain = src.domain();
    let x_scale = src.width() as f32 / width as f32;
    let y_scale = src.height() as f32 / height as f32;
    let out = PixelBuffer::from_fn(width, height, domain, |x, y| {
        let sx = ((x as f32 + 0.5) * x_scale - 0.5).max(0.0);
        let sy = ((y as f32 + 0.5) * y_scale - 0.5).max(0.0);
        let x0 = (sx as usize).min(src.width() - 1);
        let y0 = (sy as usize).min(src.height() - 1);
        let x1 = (x0 + 1).min(src.width() - 1);
        let y1 = (y0 + 1).min(src.height() - 1);
        let fx = sx - x0 as f32;
        let fy = sy - y0 as f32;

        let p00 = src.pixel(x0, y0);
        let p10 = src.pixel(x1, y0);
        let p01 = src.pixel(x0, y1);
        let p11 = src.pixel(x1, y1);
        let mut px = [0i16; CHANNELS];
        for c in 0..CHANNELS {
            let top = f32::from(p00[c]) * (1.0 - fx) + f32::from(p10[c]) * fx;
            let bottom = f32::from(p01[c]) * (1.0 - fx) + f32::from(p11[c]) * fx;
            let value = (top * (1.0 - fy) + bottom * fy).round() as i32;
            px[c] = domain.clamp(value);
        }
        px
    });
    Ok(out)
}

/// Rounds `sum / 4` half away from zero.
///
/// Difference-domain sums can be negative, where truncating division would
/// bias residuals toward zero.
fn round_quarter(sum: i32) -> i16 {
    if sum >= 0 {
        ((sum + 2) / 4) as i16
    } else {
        (-((-sum + 2) / 4)) as i16
    }
}
