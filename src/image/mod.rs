//! Pixel buffers and domain-aware arithmetic.
//!
//! `PixelBuffer` is an owned contiguous 3-channel image whose samples are
//! stored as `i16` regardless of domain. Magnitude buffers hold ordinary
//! colors in `[0, 255]`; Difference buffers hold signed residuals in
//! `[-128, 127]`. Keeping one storage type with an explicit domain tag means
//! residual arithmetic never goes through a signed/unsigned byte
//! reinterpretation.

use crate::mask::Mask;
use crate::util::{PyrBlendError, PyrBlendResult};

#[cfg(feature = "image-io")]
pub mod io;
pub mod resample;

/// Number of interleaved channels per pixel.
pub const CHANNELS: usize = 3;

/// Value domain of a buffer's samples.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Domain {
    /// Ordinary image color, channels in `[0, 255]`.
    Magnitude,
    /// Signed residual between two resolution levels, channels in `[-128, 127]`.
    Difference,
}

impl Domain {
    /// Smallest representable sample value.
    pub fn min(self) -> i16 {
        match self {
            Domain::Magnitude => 0,
            Domain::Difference => -128,
        }
    }

    /// Largest representable sample value.
    pub fn max(self) -> i16 {
        match self {
            Domain::Magnitude => 255,
            Domain::Difference => 127,
        }
    }

    /// Clamps an intermediate result into this domain's range.
    pub(crate) fn clamp(self, value: i32) -> i16 {
        value.clamp(i32::from(self.min()), i32::from(self.max())) as i16
    }

    fn contains(self, value: i16) -> bool {
        value >= self.min() && value <= self.max()
    }
}

/// Owned contiguous 3-channel image buffer with a domain tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<i16>,
    width: usize,
    height: usize,
    domain: Domain,
}

impl PixelBuffer {
    /// Creates a buffer from interleaved samples.
    ///
    /// The vector length must be exactly `width * height * 3` and every
    /// sample must lie within `domain`'s range. Zero-sized buffers are
    /// representable; pyramid constructors reject them separately.
    pub fn from_vec(
        data: Vec<i16>,
        width: usize,
        height: usize,
        domain: Domain,
    ) -> PyrBlendResult<Self> {
        let needed = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(CHANNELS))
            .ok_or(PyrBlendError::InvalidSize { width, height })?;
        if data.len() != needed {
            return Err(PyrBlendError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if let Some((index, &value)) = data
            .iter()
            .enumerate()
            .find(|(_, &value)| !domain.contains(value))
        {
            return Err(PyrBlendError::SampleOutOfRange {
                value,
                index,
                domain,
            });
        }
        Ok(Self {
            data,
            width,
            height,
            domain,
        })
    }

    /// Creates a buffer with every channel of every pixel set to `value`.
    pub fn filled(width: usize, height: usize, value: i16, domain: Domain) -> PyrBlendResult<Self> {
        if !domain.contains(value) {
            return Err(PyrBlendError::SampleOutOfRange {
                value,
                index: 0,
                domain,
            });
        }
        let needed = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(CHANNELS))
            .ok_or(PyrBlendError::InvalidSize { width, height })?;
        Ok(Self {
            data: vec![value; needed],
            width,
            height,
            domain,
        })
    }

    pub(crate) fn from_fn(
        width: usize,
        height: usize,
        domain: Domain,
        mut f: impl FnMut(usize, usize) -> [i16; CHANNELS],
    ) -> Self {
        let mut data = Vec::with_capacity(width * height * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self {
            data,
            width,
            height,
            domain,
        }
    }

    /// Returns the buffer width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the buffer height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the sample domain.
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Returns true when the buffer has zero pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the interleaved samples.
    pub fn data(&self) -> &[i16] {
        &self.data
    }

    /// Returns the pixel at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<[i16; CHANNELS]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixel(x, y))
    }

    pub(crate) fn pixel(&self, x: usize, y: usize) -> [i16; CHANNELS] {
        debug_assert!(x < self.width && y < self.height);
        let idx = (y * self.width + x) * CHANNELS;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }
}

fn check_dims(a: &PixelBuffer, b: &PixelBuffer) -> PyrBlendResult<()> {
    if a.width != b.width || a.height != b.height {
        return Err(PyrBlendError::DimensionMismatch {
            expected_width: a.width,
            expected_height: a.height,
            width: b.width,
            height: b.height,
        });
    }
    Ok(())
}

fn check_domains(a: &PixelBuffer, b: &PixelBuffer) -> PyrBlendResult<()> {
    if a.domain != b.domain {
        return Err(PyrBlendError::DomainMismatch {
            left: a.domain,
            right: b.domain,
        });
    }
    Ok(())
}

/// Per-channel saturating subtraction into the Difference domain.
///
/// Both operands must share a domain; the result holds
/// `clamp(a - b, -128, 127)` per channel.
pub fn saturating_sub(a: &PixelBuffer, b: &PixelBuffer) -> PyrBlendResult<PixelBuffer> {
    check_dims(a, b)?;
    check_domains(a, b)?;
    let data = a
        .data
        .iter()
        .zip(&b.data)
        .map(|(&av, &bv)| Domain::Difference.clamp(i32::from(av) - i32::from(bv)))
        .collect();
    Ok(PixelBuffer {
        data,
        width: a.width,
        height: a.height,
        domain: Domain::Difference,
    })
}

/// Per-channel saturating addition into the Magnitude domain.
///
/// Operand domains may differ; adding a Difference residual back onto a
/// Magnitude image is the reconstruction step. The result holds
/// `clamp(a + b, 0, 255)` per channel.
pub fn saturating_add(a: &PixelBuffer, b: &PixelBuffer) -> PyrBlendResult<PixelBuffer> {
    check_dims(a, b)?;
    let data = a
        .data
        .iter()
        .zip(&b.data)
        .map(|(&av, &bv)| Domain::Magnitude.clamp(i32::from(av) + i32::from(bv)))
        .collect();
    Ok(PixelBuffer {
        data,
        width: a.width,
        height: a.height,
        domain: Domain::Magnitude,
    })
}

/// Blends two same-domain buffers under a mask.
///
/// Per channel the result is `round(m * a + (1 - m) * b)` clamped to the
/// shared domain's bounds, computed on the true signed sample values. The
/// mask holds the fraction of `a` at each pixel.
pub fn masked_combine(
    a: &PixelBuffer,
    b: &PixelBuffer,
    mask: &Mask,
) -> PyrBlendResult<PixelBuffer> {
    check_dims(a, b)?;
    check_domains(a, b)?;
    if mask.width() != a.width || mask.height() != a.height {
        return Err(PyrBlendError::DimensionMismatch {
            expected_width: a.width,
            expected_height: a.height,
            width: mask.width(),
            height: mask.height(),
        });
    }
    let domain = a.domain;
    let mut data = Vec::with_capacity(a.data.len());
    for y in 0..a.height {
        for x in 0..a.width {
            let m = mask.value(x, y);
            let idx = (y * a.width + x) * CHANNELS;
            for c in 0..CHANNELS {
                let av = f32::from(a.data[idx + c]);
                let bv = f32::from(b.data[idx + c]);
                let blended = (m * av + (1.0 - m) * bv).round() as i32;
                data.push(domain.clamp(blended));
            }
        }
    }
    Ok(PixelBuffer {
        data,
        width: a.width,
        height: a.height,
        domain,
    })
}
