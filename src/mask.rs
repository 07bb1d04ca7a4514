//! Blend masks.
//!
//! A mask stores, per pixel, the fraction of the first image in a blend;
//! `1 - value` is implicitly the fraction of the second. The reference shape
//! is a horizontal ramp (a vertical seam), but the blend engine only needs
//! the grid of values, so arbitrary masks built with [`Mask::from_vec`] work
//! the same way.

use crate::util::{PyrBlendError, PyrBlendResult};

/// Single-channel grid of blend fractions in `[0.0, 1.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    data: Vec<f32>,
    width: usize,
    height: usize,
}

impl Mask {
    /// Creates a mask from raw fractions.
    ///
    /// The vector length must be exactly `width * height`; values are
    /// clamped into `[0.0, 1.0]`.
    pub fn from_vec(data: Vec<f32>, width: usize, height: usize) -> PyrBlendResult<Self> {
        if width == 0 || height == 0 {
            return Err(PyrBlendError::InvalidSize { width, height });
        }
        let needed = width
            .checked_mul(height)
            .ok_or(PyrBlendError::InvalidSize { width, height })?;
        if data.len() != needed {
            return Err(PyrBlendError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        let data = data.into_iter().map(|v| v.clamp(0.0, 1.0)).collect();
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates a mask with every pixel set to `value` (clamped to `[0, 1]`).
    pub fn filled(width: usize, height: usize, value: f32) -> PyrBlendResult<Self> {
        if width == 0 || height == 0 {
            return Err(PyrBlendError::InvalidSize { width, height });
        }
        Ok(Self {
            data: vec![value.clamp(0.0, 1.0); width * height],
            width,
            height,
        })
    }

    /// Creates a horizontal gradient mask: 1.0 on the left, 0.0 on the
    /// right, with a linear ramp between the two column boundaries
    /// `start_fraction * width` and `end_fraction * width`.
    ///
    /// If `start_fraction > end_fraction` the mask is computed with the two
    /// swapped and then complemented, turning the left-to-right ramp into a
    /// right-to-left one. An empty band (`start == end`) degenerates to a
    /// hard step at the shared boundary, with the boundary column itself on
    /// the 0.0 side. Fractions are clamped into `[0, 1]`; all rows are
    /// identical.
    pub fn horizontal_ramp(
        width: usize,
        height: usize,
        start_fraction: f32,
        end_fraction: f32,
    ) -> PyrBlendResult<Self> {
        if width == 0 || height == 0 {
            return Err(PyrBlendError::InvalidSize { width, height });
        }
        let start_fraction = start_fraction.clamp(0.0, 1.0);
        let end_fraction = end_fraction.clamp(0.0, 1.0);
        if start_fraction > end_fraction {
            let swapped = Self::horizontal_ramp(width, height, end_fraction, start_fraction)?;
            return Ok(swapped.complemented());
        }

        let start = start_fraction * width as f32;
        let end = end_fraction * width as f32;
        let mut row = Vec::with_capacity(width);
        for col in 0..width {
            let x = col as f32;
            // Guard the empty band explicitly: the ramp divides by (end - start).
            let value = if end - start <= f32::EPSILON {
                if x >= end {
                    0.0
                } else {
                    1.0
                }
            } else if x <= start {
                1.0
            } else if x >= end {
                0.0
            } else {
                (end - x) / (end - start)
            };
            row.push(value);
        }

        let mut data = Vec::with_capacity(width * height);
        for _ in 0..height {
            data.extend_from_slice(&row);
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns the mask width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the mask height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the raw fractions.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Returns the fraction at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.value(x, y))
    }

    pub(crate) fn value(&self, x: usize, y: usize) -> f32 {
        debug_assert!(x < self.width && y < self.height);
        self.data[y * self.width + x]
    }

    /// Returns the pixel-wise complement (`1 - value`).
    pub fn complemented(&self) -> Mask {
        Mask {
            data: self.data.iter().map(|v| 1.0 - v).collect(),
            width: self.width,
            height: self.height,
        }
    }

    /// Returns a half-resolution mask by plain decimation.
    ///
    /// Dimensions follow the layer halving rule (`floor(n/2)`, never below
    /// 1). The mask is not re-smoothed before decimation; the blend engine
    /// trades a little coarse-level quality for lock-step simplicity.
    pub fn halved(&self) -> Mask {
        let width = (self.width / 2).max(1);
        let height = (self.height / 2).max(1);
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(self.value((2 * x).min(self.width - 1), (2 * y).min(self.height - 1)));
            }
        }
        Mask {
            data,
            width,
            height,
        }
    }
}
