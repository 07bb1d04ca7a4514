//! Collapsing a layer list back into a single image.

use crate::image::{resample, saturating_add, PixelBuffer};
use crate::pyramid::Layer;
use crate::trace::trace_span;
use crate::util::{PyrBlendError, PyrBlendResult};

/// Reconstructs the working-resolution image from a layer list.
///
/// Starts from the coarsest layer (the Magnitude base) and walks toward
/// layer 0, upsampling the running image to each finer layer's resolution
/// and saturating-adding that layer's residual onto it. One upsample and
/// one full-buffer add per layer.
pub fn reconstruct(layers: &[Layer]) -> PyrBlendResult<PixelBuffer> {
    let Some(base) = layers.last() else {
        return Err(PyrBlendError::DepthTooSmall { requested: 0 });
    };
    let _span = trace_span!("reconstruct", depth = layers.len()).entered();

    let mut image = base.buffer().clone();
    for layer in layers[..layers.len() - 1].iter().rev() {
        let upsampled = resample::upsample(&image, layer.width(), layer.height())?;
        image = saturating_add(&upsampled, layer.buffer())?;
    }
    Ok(image)
}
