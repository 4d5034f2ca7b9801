//! Luminance Frame View
//!
//! The decision engine only ever looks at the luminance plane. [`LumaFrame`]
//! borrows an 8-bit, row-major, tightly packed buffer from whatever the
//! sensor binding captured, so scoring never copies pixels.
//!
//! ## Sharpness
//!
//! Focus quality is measured as the variance of the discrete Laplacian:
//!
//! ```text
//!        [ 0  1  0 ]
//! L  =   [ 1 -4  1 ]     sharpness = Var(L * I) over interior pixels
//!        [ 0  1  0 ]
//! ```
//!
//! In-focus edges produce large positive and negative responses; blur
//! flattens them towards zero, so the variance drops. Border pixels are
//! skipped rather than padded.

use crate::errors::{DecisionError, DecisionResult};

/// Borrowed 8-bit luminance image
#[derive(Debug, Clone, Copy)]
pub struct LumaFrame<'a> {
    width: u32,
    height: u32,
    pixels: &'a [u8],
}

impl<'a> LumaFrame<'a> {
    /// Wrap a packed `width * height` buffer
    pub fn new(width: u32, height: u32, pixels: &'a [u8]) -> DecisionResult<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(DecisionError::FrameSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    /// Zero-sized frame; scores as undetected
    pub const fn empty() -> Self {
        Self { width: 0, height: 0, pixels: &[] }
    }

    /// Frame width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw row-major pixels
    pub fn pixels(&self) -> &'a [u8] {
        self.pixels
    }

    /// True when the frame holds no pixels
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Mean luminance in 8-bit units, 0 for an empty frame
    pub fn mean_luminance(&self) -> f32 {
        if self.pixels.is_empty() {
            return 0.0;
        }
        let sum: u64 = self.pixels.iter().map(|&p| p as u64).sum();
        (sum as f64 / self.pixels.len() as f64) as f32
    }

    /// Variance of the 4-neighbour Laplacian response
    ///
    /// Returns 0 for frames smaller than 3×3, which have no interior.
    pub fn laplacian_variance(&self) -> f32 {
        if self.width < 3 || self.height < 3 {
            return 0.0;
        }

        let w = self.width as usize;
        let h = self.height as usize;
        let px = |x: usize, y: usize| self.pixels[y * w + x] as i32;

        // Single pass; f64 keeps sum of squares exact enough for 8-bit input
        let mut sum = 0.0f64;
        let mut sum_sq = 0.0f64;
        for y in 1..h - 1 {
            for x in 1..w - 1 {
                let response = px(x, y - 1) + px(x - 1, y) + px(x + 1, y) + px(x, y + 1)
                    - 4 * px(x, y);
                let r = response as f64;
                sum += r;
                sum_sq += r * r;
            }
        }

        let n = ((w - 2) * (h - 2)) as f64;
        let mean = sum / n;
        let variance = sum_sq / n - mean * mean;
        variance.max(0.0) as f32
    }
}

/// Anything that can expose a luminance view of itself
///
/// Implemented by sensor frame types so the engine can score them without
/// knowing how they were captured.
pub trait AsLuma {
    /// Borrow the luminance plane
    fn as_luma(&self) -> LumaFrame<'_>;
}

impl AsLuma for LumaFrame<'_> {
    fn as_luma(&self) -> LumaFrame<'_> {
        *self
    }
}
