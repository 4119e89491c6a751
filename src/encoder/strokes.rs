//! Coordinate-stream feature encoding.
//!
//! Normalises an ordered sequence of screen-space touch points either into
//! a flattened coordinate list (variable length, raw upload paths only) or
//! onto a tile×tile occupancy grid compatible with the image encoding.

use super::DEFAULT_TILE_SIZE;
use crate::feature::FeatureVector;
use serde::{Deserialize, Serialize};

/// A captured touch point in screen-space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Dimensions of the capture surface used for normalisation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    pub width: f32,
    pub height: f32,
}

/// Sub-strategy for stroke encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum StrokeMode {
    /// Normalised `x, y` pairs flattened into a sequence of length
    /// `2 × point count`. Variable length, so never valid model input.
    Flatten {
        /// Scale normalised coordinates by the tile size instead of
        /// leaving them in `[0, 1]`.
        #[serde(default)]
        tile_scaled: bool,
    },
    /// Mark each hit cell in a tile×tile grid with `1.0` and flatten
    /// row-major. Fixed length `tile_size²`, interchangeable with the
    /// image encoding.
    Rasterise,
}

impl Default for StrokeMode {
    fn default() -> Self {
        Self::Rasterise
    }
}

/// Encoder for ordered touch-point sequences.
///
/// Encoding is total: an empty sequence rasterises to an all-zero grid,
/// and non-finite coordinates are skipped. Whether a capture has enough
/// points to submit at all is the caller's check via
/// [`submittable`](super::submittable).
///
/// # Examples
///
/// ```
/// use mashq::{Point, Screen, StrokeEncoder, StrokeMode};
///
/// let encoder = StrokeEncoder::new(32, StrokeMode::Rasterise);
/// let screen = Screen { width: 390.0, height: 844.0 };
/// let vector = encoder.encode(&[Point { x: 0.0, y: 0.0 }], screen);
/// assert_eq!(vector.len(), 1024);
/// ```
#[derive(Debug, Clone)]
pub struct StrokeEncoder {
    tile_size: usize,
    mode: StrokeMode,
}

impl Default for StrokeEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_SIZE, StrokeMode::default())
    }
}

impl StrokeEncoder {
    /// Create an encoder for `tile_size` grids. A zero tile size is
    /// clamped to one.
    #[must_use]
    pub fn new(tile_size: usize, mode: StrokeMode) -> Self {
        Self {
            tile_size: tile_size.max(1),
            mode,
        }
    }

    /// Encode a point sequence according to the configured mode.
    #[must_use]
    pub fn encode(&self, points: &[Point], screen: Screen) -> FeatureVector {
        match self.mode {
            StrokeMode::Flatten { tile_scaled } => self.flatten(points, screen, tile_scaled),
            StrokeMode::Rasterise => self.rasterise(points, screen),
        }
    }

    /// Normalise and flatten `x, y` pairs; output length `2 × points.len()`.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "coordinate normalisation")]
    #[expect(
        clippy::cast_precision_loss,
        reason = "tile sizes are far below f32 precision limits"
    )]
    pub fn flatten(&self, points: &[Point], screen: Screen, tile_scaled: bool) -> FeatureVector {
        let scale = if tile_scaled {
            self.tile_size as f32
        } else {
            1.0
        };
        let values = points
            .iter()
            .flat_map(|p| [p.x / screen.width * scale, p.y / screen.height * scale])
            .collect();
        FeatureVector::new(values)
    }

    /// Mark hit grid cells; output length `tile_size²`. Cell indices are
    /// clamped into range, so out-of-bounds points land on the border.
    #[must_use]
    pub fn rasterise(&self, points: &[Point], screen: Screen) -> FeatureVector {
        let tile = self.tile_size;
        let mut grid = vec![0.0f32; tile * tile];
        for point in points {
            let Some(col) = cell(point.x, screen.width, tile) else {
                continue;
            };
            let Some(row) = cell(point.y, screen.height, tile) else {
                continue;
            };
            grid[row * tile + col] = 1.0;
        }
        FeatureVector::new(grid)
    }
}

/// Map a screen coordinate onto a grid cell, clamped into `[0, tile - 1]`.
/// Returns `None` when the scaled value is non-finite (NaN input or a
/// zero-extent screen).
#[expect(clippy::float_arithmetic, reason = "grid cell computation")]
#[expect(
    clippy::cast_precision_loss,
    reason = "tile sizes are far below f32 precision limits"
)]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is clamped into [0, tile - 1] before the cast"
)]
fn cell(coord: f32, extent: f32, tile: usize) -> Option<usize> {
    let scaled = coord / extent * tile as f32;
    if !scaled.is_finite() {
        return None;
    }
    let clamped = scaled.floor().clamp(0.0, (tile - 1) as f32);
    Some(clamped as usize)
}
