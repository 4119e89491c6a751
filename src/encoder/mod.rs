//! Feature encoders turning captured drawings into feature vectors.
//!
//! Two input shapes are supported: a tile-sized grayscale raster
//! ([`image`]) and an ordered stream of touch coordinates ([`strokes`]).
//! Encoding is deterministic and free of I/O. Vector-length validation is
//! enforced at the client boundary, not here: an encoder may hand back a
//! sentinel or variable-length vector, and the client refuses to transmit
//! anything that does not match the configured dimension.

pub mod image;
pub mod strokes;

pub use image::{GrayImage, ImageEncoder};
pub use strokes::{Point, Screen, StrokeEncoder, StrokeMode};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Square raster resolution all drawings are normalised to.
pub const DEFAULT_TILE_SIZE: usize = 32;

/// Minimum touch points for a submittable drawing. Captures with fewer
/// points must re-prompt the learner instead of reaching the network layer.
pub const MIN_STROKE_POINTS: usize = 5;

/// Whether a captured stroke sequence has enough points to submit.
///
/// # Examples
///
/// ```
/// use mashq::encoder::{Point, submittable};
///
/// let points = vec![Point { x: 1.0, y: 2.0 }; 4];
/// assert!(!submittable(&points));
/// ```
#[must_use]
pub fn submittable(points: &[Point]) -> bool {
    points.len() >= MIN_STROKE_POINTS
}

/// Pixel intensity scaling applied by the image encoder.
///
/// Both scalings exist in the field; the training server's expected input
/// scale is a per-deployment decision, so the choice is always explicit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelScale {
    /// Raw 0–255 intensity.
    Raw,
    /// Intensity divided by 255 into `[0, 1]`.
    #[default]
    Normalised,
}

impl PixelScale {
    /// Convert one pixel intensity to a feature value.
    #[must_use]
    pub fn apply(self, intensity: u8) -> f32 {
        match self {
            Self::Raw => f32::from(intensity),
            #[expect(clippy::float_arithmetic, reason = "intensity normalisation")]
            Self::Normalised => f32::from(intensity) / 255.0,
        }
    }
}

/// Behaviour of the image encoder when the input is not tile-sized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchPolicy {
    /// Fail with [`EncodeError::DimensionMismatch`].
    #[default]
    Error,
    /// Warn and return the empty sentinel vector, whose length can never
    /// equal the configured dimension. The client's precondition check
    /// rejects it before transmission.
    Sentinel,
}

/// Errors produced by the image encoder.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// The image is not the configured tile size.
    #[error("image is {width}x{height} but the configured tile size is {expected}")]
    DimensionMismatch {
        expected: usize,
        width: usize,
        height: usize,
    },
    /// The pixel buffer does not hold one byte per pixel.
    #[error("pixel buffer holds {actual} bytes but {width}x{height} requires {expected}")]
    PixelBufferMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::approx_eq;
    use rstest::rstest;

    #[rstest]
    #[case(PixelScale::Raw, 255, 255.0)]
    #[case(PixelScale::Raw, 0, 0.0)]
    #[case(PixelScale::Normalised, 255, 1.0)]
    #[case(PixelScale::Normalised, 51, 0.2)]
    fn pixel_scaling(#[case] scale: PixelScale, #[case] intensity: u8, #[case] expected: f32) {
        assert!(approx_eq(scale.apply(intensity), expected, 1e-6));
    }

    #[rstest]
    #[case(4, false)]
    #[case(5, true)]
    #[case(200, true)]
    fn submittable_boundary(#[case] count: usize, #[case] expected: bool) {
        let points = vec![Point { x: 0.0, y: 0.0 }; count];
        assert_eq!(submittable(&points), expected);
    }
}
