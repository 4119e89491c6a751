//! Image-based feature encoding.
//!
//! Reads a tile-sized grayscale raster row-major, one scalar per pixel.
//! The UI layer is responsible for cropping and resizing the captured
//! drawing to the tile size before encoding.

use super::{DEFAULT_TILE_SIZE, EncodeError, MismatchPolicy, PixelScale};
use crate::feature::FeatureVector;

/// Owned 8-bit grayscale raster, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    width: usize,
    height: usize,
    pixels: Box<[u8]>,
}

impl GrayImage {
    /// Wrap a row-major pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::PixelBufferMismatch`] if `pixels` does not
    /// hold exactly `width * height` bytes.
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self, EncodeError> {
        let expected = width * height;
        if pixels.len() == expected {
            Ok(Self {
                width,
                height,
                pixels: pixels.into_boxed_slice(),
            })
        } else {
            Err(EncodeError::PixelBufferMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            })
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Encoder for tile-sized grayscale rasters.
///
/// # Examples
///
/// ```
/// use mashq::{GrayImage, ImageEncoder};
///
/// # fn main() -> Result<(), mashq::EncodeError> {
/// let encoder = ImageEncoder::default();
/// let image = GrayImage::new(32, 32, vec![0; 1024])?;
/// let vector = encoder.encode(&image)?;
/// assert_eq!(vector.len(), 1024);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ImageEncoder {
    tile_size: usize,
    scale: PixelScale,
    mismatch: MismatchPolicy,
}

impl Default for ImageEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_SIZE, PixelScale::default(), MismatchPolicy::default())
    }
}

impl ImageEncoder {
    /// Create an encoder for `tile_size` rasters. A zero tile size is
    /// clamped to one.
    #[must_use]
    pub fn new(tile_size: usize, scale: PixelScale, mismatch: MismatchPolicy) -> Self {
        Self {
            tile_size: tile_size.max(1),
            scale,
            mismatch,
        }
    }

    #[must_use]
    pub fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Encode one raster into a feature vector of length `tile_size²`.
    ///
    /// # Errors
    ///
    /// Under [`MismatchPolicy::Error`], returns
    /// [`EncodeError::DimensionMismatch`] if the image is not tile-sized.
    /// Under [`MismatchPolicy::Sentinel`] a mismatched image yields the
    /// empty sentinel vector instead.
    pub fn encode(&self, image: &GrayImage) -> Result<FeatureVector, EncodeError> {
        if image.width() != self.tile_size || image.height() != self.tile_size {
            return match self.mismatch {
                MismatchPolicy::Error => Err(EncodeError::DimensionMismatch {
                    expected: self.tile_size,
                    width: image.width(),
                    height: image.height(),
                }),
                MismatchPolicy::Sentinel => {
                    tracing::warn!(
                        width = image.width(),
                        height = image.height(),
                        expected = self.tile_size,
                        "image is not tile-sized; returning sentinel vector"
                    );
                    Ok(FeatureVector::empty())
                }
            };
        }
        let values = image
            .pixels()
            .iter()
            .map(|&intensity| self.scale.apply(intensity))
            .collect();
        Ok(FeatureVector::new(values))
    }
}
