//! PyrBlend seamlessly composites two images with Laplacian pyramid
//! blending.
//!
//! This crate provides the pyramid engine: building a multiresolution
//! decomposition of an image, growing or shrinking its depth on demand,
//! combining two decompositions under a spatial mask, and collapsing the
//! result back into a single image. File I/O is available behind the
//! `image-io` feature; spans and events behind the `tracing` feature.

pub mod image;
pub mod mask;
pub mod pyramid;
pub(crate) mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use image::io;
pub use image::{masked_combine, saturating_add, saturating_sub, Domain, PixelBuffer};
pub use mask::Mask;
pub use pyramid::{max_depth_for, reconstruct, Layer, Pyramid};
pub use util::{PyrBlendError, PyrBlendResult};
