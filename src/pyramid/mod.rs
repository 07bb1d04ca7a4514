//! Laplacian pyramids with runtime-adjustable depth.
//!
//! A [`Pyramid`] owns a source image, a working-resolution copy of it, and
//! an ordered layer list. Layer 0 is the finest resolution; the last layer
//! is a genuine downsampled image (Magnitude domain), every other layer
//! holds the signed residual lost between its resolution and the next
//! coarser one (Difference domain). Depth changes grow or shrink the layer
//! list incrementally; source or size changes regenerate it from scratch.

use crate::image::{resample, saturating_add, saturating_sub, Domain, PixelBuffer};
use crate::trace::{trace_event, trace_span};
use crate::util::{PyrBlendError, PyrBlendResult};

pub mod blend;
pub mod reconstruct;

pub use reconstruct::reconstruct;

/// One level of a pyramid's decomposition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    index: usize,
    buffer: PixelBuffer,
}

impl Layer {
    pub(crate) fn new(index: usize, buffer: PixelBuffer) -> Self {
        Self { index, buffer }
    }

    /// Position in the layer list; 0 is the finest resolution.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The layer's pixel data.
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Layer width in pixels.
    pub fn width(&self) -> usize {
        self.buffer.width()
    }

    /// Layer height in pixels.
    pub fn height(&self) -> usize {
        self.buffer.height()
    }

    /// Sample domain: Difference for residual layers, Magnitude for the base.
    pub fn domain(&self) -> Domain {
        self.buffer.domain()
    }
}

/// A multiresolution decomposition of one image.
#[derive(Debug, Clone)]
pub struct Pyramid {
    source: PixelBuffer,
    working_width: usize,
    working_height: usize,
    resized: PixelBuffer,
    layers: Vec<Layer>,
}

impl Pyramid {
    /// Creates a depth-1 pyramid adopting the source image's own dimensions
    /// as the working size.
    pub fn new(source: PixelBuffer) -> PyrBlendResult<Self> {
        check_source(&source)?;
        let working_width = source.width();
        let working_height = source.height();
        let resized = source.clone();
        let layers = vec![Layer::new(0, resized.clone())];
        Ok(Self {
            source,
            working_width,
            working_height,
            resized,
            layers,
        })
    }

    /// Creates a depth-1 pyramid with an explicit working size.
    pub fn with_size(source: PixelBuffer, width: usize, height: usize) -> PyrBlendResult<Self> {
        let mut pyramid = Self::new(source)?;
        pyramid.set_working_size(width, height)?;
        Ok(pyramid)
    }

    pub(crate) fn from_blended_layers(
        layers: Vec<Layer>,
        working_width: usize,
        working_height: usize,
    ) -> PyrBlendResult<Self> {
        let image = reconstruct(&layers)?;
        Ok(Self {
            source: image.clone(),
            working_width,
            working_height,
            resized: image,
            layers,
        })
    }

    /// Returns a copy of the original source image at its native size.
    pub fn source_image(&self) -> PixelBuffer {
        self.source.clone()
    }

    /// Returns a copy of the working-resolution image.
    pub fn resized_image(&self) -> PixelBuffer {
        self.resized.clone()
    }

    /// Returns the working size as `(width, height)`.
    pub fn working_size(&self) -> (usize, usize) {
        (self.working_width, self.working_height)
    }

    /// Working width in pixels.
    pub fn width(&self) -> usize {
        self.working_width
    }

    /// Working height in pixels.
    pub fn height(&self) -> usize {
        self.working_height
    }

    /// Number of layers.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Returns a copy of the layer at `index`, or `None` when out of range.
    pub fn layer(&self, index: usize) -> Option<Layer> {
        self.layers.get(index).cloned()
    }

    pub(crate) fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Maximum depth the current working size supports.
    ///
    /// One more halving is allowed while both dimensions are even and at
    /// least 32 pixels; below that the smoothing kernel has inadequate
    /// support.
    pub fn max_depth(&self) -> usize {
        max_depth_for(self.working_width, self.working_height)
    }

    /// Replaces the source image and regenerates the layers.
    ///
    /// With `keep_current_size` the new source is resampled into the
    /// existing working size; otherwise its own dimensions become the
    /// working size. Depth carries over, clamped to the new maximum.
    pub fn set_source_image(
        &mut self,
        source: PixelBuffer,
        keep_current_size: bool,
    ) -> PyrBlendResult<()> {
        check_source(&source)?;
        let resized = if keep_current_size {
            resample::resize(&source, self.working_width, self.working_height)?
        } else {
            source.clone()
        };
        self.working_width = resized.width();
        self.working_height = resized.height();
        self.resized = resized;
        self.source = source;
        self.regenerate()
    }

    /// Changes the working size, resamples the source into it, and
    /// regenerates the layers at the carried-over depth (clamped to the new
    /// maximum).
    pub fn set_working_size(&mut self, width: usize, height: usize) -> PyrBlendResult<()> {
        if width == 0 || height == 0 {
            return Err(PyrBlendError::InvalidSize { width, height });
        }
        let resized = resample::resize(&self.source, width, height)?;
        self.working_width = width;
        self.working_height = height;
        self.resized = resized;
        self.regenerate()
    }

    /// Grows or shrinks the layer list to exactly `depth` layers.
    ///
    /// No-op when the pyramid is already at the requested depth. Fails
    /// without touching the layers when the depth is out of range.
    pub fn set_depth(&mut self, depth: usize) -> PyrBlendResult<()> {
        if depth < 1 {
            return Err(PyrBlendError::DepthTooSmall { requested: depth });
        }
        let max = self.max_depth();
        if depth > max {
            return Err(PyrBlendError::DepthTooLarge {
                requested: depth,
                max,
            });
        }
        let _span = trace_span!("set_depth", from = self.depth(), to = depth).entered();
        while self.layers.len() < depth {
            self.expand()?;
        }
        while self.layers.len() > depth {
            self.shrink()?;
        }
        Ok(())
    }

    /// Rebuilds the layer list from `resized` at the current depth.
    fn regenerate(&mut self) -> PyrBlendResult<()> {
        let depth = self.depth().min(self.max_depth()).max(1);
        let _span = trace_span!(
            "generate",
            width = self.working_width,
            height = self.working_height,
            depth = depth
        )
        .entered();
        self.layers.clear();
        self.layers.push(Layer::new(0, self.resized.clone()));
        while self.layers.len() < depth {
            self.expand()?;
        }
        Ok(())
    }

    /// Splits the coarsest layer into its high-frequency residual and a new
    /// half-resolution base. Depth grows by one.
    fn expand(&mut self) -> PyrBlendResult<()> {
        let coarsest = self.layers.last().expect("layer list is never empty");
        let base = resample::downsample(coarsest.buffer())?;
        let upsampled = resample::upsample(&base, coarsest.width(), coarsest.height())?;
        let residual = saturating_sub(coarsest.buffer(), &upsampled)?;

        let index = coarsest.index();
        self.layers.pop();
        self.layers.push(Layer::new(index, residual));
        self.layers.push(Layer::new(index + 1, base));
        trace_event!(
            "expand",
            depth = self.layers.len(),
            base_width = self.layers[self.layers.len() - 1].width(),
            base_height = self.layers[self.layers.len() - 1].height(),
        );
        Ok(())
    }

    /// Merges the two coarsest layers back into one Magnitude layer. Depth
    /// shrinks by one.
    ///
    /// This is the intended near-inverse of `expand`, not an exact one:
    /// repeated expand/shrink cycles can accumulate rounding drift wherever
    /// a residual saturated.
    fn shrink(&mut self) -> PyrBlendResult<()> {
        debug_assert!(self.layers.len() >= 2);
        let base = self.layers.last().expect("layer list is never empty");
        let diff = &self.layers[self.layers.len() - 2];
        let upsampled = resample::upsample(base.buffer(), diff.width(), diff.height())?;
        let merged = saturating_add(diff.buffer(), &upsampled)?;

        let index = diff.index();
        self.layers.pop();
        self.layers.pop();
        self.layers.push(Layer::new(index, merged));
        trace_event!("shrink", depth = self.layers.len());
        Ok(())
    }
}

fn check_source(source: &PixelBuffer) -> PyrBlendResult<()> {
    if source.is_empty() {
        return Err(PyrBlendError::EmptyImage);
    }
    if source.domain() != Domain::Magnitude {
        return Err(PyrBlendError::DomainMismatch {
            left: Domain::Magnitude,
            right: source.domain(),
        });
    }
    Ok(())
}

/// Maximum depth for a working size: one plus the number of times both
/// dimensions can be halved while staying even and at least 32 pixels.
pub fn max_depth_for(width: usize, height: usize) -> usize {
    let mut depth = 1;
    let (mut width, mut height) = (width, height);
    while width % 2 == 0 && height % 2 == 0 && width >= 32 && height >= 32 {
        width /= 2;
        height /= 2;
        depth += 1;
    }
    depth
}
