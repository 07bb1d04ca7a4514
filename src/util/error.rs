//! Error types for pyrblend.

use crate::image::Domain;
use thiserror::Error;

/// Result alias for pyrblend operations.
pub type PyrBlendResult<T> = std::result::Result<T, PyrBlendError>;

/// Errors that can occur when building, mutating, or blending pyramids.
///
/// Every variant is a precondition violation on a single call; nothing here
/// is transient or retryable. Operations validate before mutating, so a
/// returned error means the receiver is unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PyrBlendError {
    /// The source image has zero pixels.
    #[error("source image has zero pixels")]
    EmptyImage,
    /// A requested size has a non-positive dimension.
    #[error("invalid size {width}x{height}: both dimensions must be positive")]
    InvalidSize { width: usize, height: usize },
    /// The requested pyramid depth is below the minimum of 1.
    #[error("depth {requested} is too small: a pyramid has at least 1 layer")]
    DepthTooSmall { requested: usize },
    /// The requested pyramid depth exceeds what the working size supports.
    #[error("depth {requested} is too large: maximum for the current size is {max}")]
    DepthTooLarge { requested: usize, max: usize },
    /// Two pyramids being combined have different depths.
    #[error("depth mismatch: {left} vs {right} layers")]
    DepthMismatch { left: usize, right: usize },
    /// Buffer or mask dimensions do not match what the operation requires.
    #[error(
        "dimension mismatch: expected {expected_width}x{expected_height}, got {width}x{height}"
    )]
    DimensionMismatch {
        expected_width: usize,
        expected_height: usize,
        width: usize,
        height: usize,
    },
    /// Arithmetic was attempted across incompatible pixel domains.
    #[error("domain mismatch: {left:?} vs {right:?}")]
    DomainMismatch { left: Domain, right: Domain },
    /// A backing buffer is too small for the stated dimensions.
    #[error("buffer too small: needed {needed} samples, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A sample lies outside its domain's value range.
    #[error("sample {value} at index {index} is outside the {domain:?} range")]
    SampleOutOfRange {
        value: i16,
        index: usize,
        domain: Domain,
    },
    /// Image decoding or encoding failed.
    #[error("image I/O failed: {reason}")]
    ImageIo { reason: String },
}
