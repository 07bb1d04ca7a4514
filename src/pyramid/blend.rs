//! Masked blending of two pyramids.

use crate::image::masked_combine;
use crate::mask::Mask;
use crate::pyramid::{Layer, Pyramid};
use crate::trace::{trace_event, trace_span};
use crate::util::{PyrBlendError, PyrBlendResult};

impl Pyramid {
    /// Combines two same-depth pyramids under a mask into a new pyramid.
    ///
    /// The mask holds the fraction of `a` at each pixel and must match the
    /// pyramids' layer-0 resolution; it is decimated in lock-step with the
    /// layer halving. The result's working image is the reconstruction of
    /// the blended layers. Validation happens before any work, so a failed
    /// call mutates neither input.
    pub fn combine(a: &Pyramid, b: &Pyramid, mask: &Mask) -> PyrBlendResult<Pyramid> {
        if a.depth() != b.depth() {
            return Err(PyrBlendError::DepthMismatch {
                left: a.depth(),
                right: b.depth(),
            });
        }
        if a.working_size() != b.working_size() {
            return Err(PyrBlendError::DimensionMismatch {
                expected_width: a.width(),
                expected_height: a.height(),
                width: b.width(),
                height: b.height(),
            });
        }
        if (mask.width(), mask.height()) != a.working_size() {
            return Err(PyrBlendError::DimensionMismatch {
                expected_width: a.width(),
                expected_height: a.height(),
                width: mask.width(),
                height: mask.height(),
            });
        }

        let _span = trace_span!(
            "combine",
            width = a.width(),
            height = a.height(),
            depth = a.depth()
        )
        .entered();
        let layers = blend_layers(a.layers(), b.layers(), mask)?;
        Pyramid::from_blended_layers(layers, a.width(), a.height())
    }
}

/// Blends two layer lists pixel-wise, halving the mask between layers.
pub(crate) fn blend_layers(
    a: &[Layer],
    b: &[Layer],
    mask: &Mask,
) -> PyrBlendResult<Vec<Layer>> {
    let mut mask = mask.clone();
    let mut blended = Vec::with_capacity(a.len());
    for (index, (layer_a, layer_b)) in a.iter().zip(b).enumerate() {
        let buffer = masked_combine(layer_a.buffer(), layer_b.buffer(), &mask)?;
        trace_event!(
            "blend_layer",
            layer = index,
            width = buffer.width(),
            height = buffer.height(),
        );
        blended.push(Layer::new(index, buffer));
        if index + 1 < a.len() {
            mask = mask.halved();
        }
    }
    Ok(blended)
}
