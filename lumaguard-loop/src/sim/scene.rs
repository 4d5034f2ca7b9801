//! Simulated lighting and imaging model
//!
//! The scene is a printed marker under ambient light. Exposure is expressed
//! in the usual log2 units, so each ladder step doubles the captured
//! brightness:
//!
//! ```text
//! brightness = min(255, ambient × 2^(exposure - reference_ev))
//! contrast   = 200 × (1 - |brightness - 128| / 128)
//! ```
//!
//! Contrast peaks at mid-grey and collapses when the frame is crushed to
//! black or blown out to white.

use image::{GrayImage, Luma};

/// Exposure value that leaves ambient light unscaled
pub const REFERENCE_EV: f32 = -8.0;

/// Brightness with the best contrast
pub const MID_GREY: f32 = 128.0;

/// Piecewise-constant ambient light over frame numbers
#[derive(Debug, Clone, PartialEq)]
pub struct LightingSchedule {
    /// `(first_frame, ambient)`, sorted by frame
    steps: Vec<(u64, f32)>,
}

impl LightingSchedule {
    /// Same light for the whole run
    pub fn constant(ambient: f32) -> Self {
        Self {
            steps: vec![(0, ambient)],
        }
    }

    /// Switch to `ambient` from `frame` on
    pub fn then(mut self, frame: u64, ambient: f32) -> Self {
        self.steps.retain(|&(f, _)| f != frame);
        self.steps.push((frame, ambient));
        self.steps.sort_by_key(|&(f, _)| f);
        self
    }

    pub fn ambient_at(&self, frame: u64) -> f32 {
        self.steps
            .iter()
            .take_while(|&&(f, _)| f <= frame)
            .last()
            .or_else(|| self.steps.first())
            .map_or(0.0, |&(_, a)| a)
    }
}

/// Everything both halves of the simulated camera see
#[derive(Debug, Clone)]
pub struct SceneState {
    pub width: u32,
    pub height: u32,
    /// Current ambient light
    pub ambient: f32,
    /// Exposure currently in effect
    pub exposure: f32,
    /// Marker side length in pixels
    pub marker_side: u32,
    /// Drop exposure writes on the floor, like a locked auto-exposure camera
    pub ignores_writes: bool,
    /// Exposure writes received
    pub writes: u32,
    /// Sensor released by the loop
    pub released: bool,
}

impl SceneState {
    pub fn new(width: u32, height: u32, exposure: f32) -> Self {
        Self {
            width,
            height,
            ambient: 0.0,
            exposure,
            marker_side: width.min(height) / 2,
            ignores_writes: false,
            writes: 0,
            released: false,
        }
    }

    pub fn brightness(&self) -> f32 {
        (self.ambient * (self.exposure - REFERENCE_EV).exp2()).clamp(0.0, 255.0)
    }

    pub fn contrast(&self) -> f32 {
        let b = self.brightness();
        (200.0 * (1.0 - (b - MID_GREY).abs() / MID_GREY)).max(0.0)
    }

    /// Capture one frame
    ///
    /// A centred checkerboard marker on a flat background of the same mean
    /// brightness.
    pub fn render(&self) -> GrayImage {
        let b = self.brightness();
        let c = self.contrast();
        let lo = (b - c / 2.0).clamp(0.0, 255.0) as u8;
        let hi = (b + c / 2.0).clamp(0.0, 255.0) as u8;
        let background = b.round() as u8;

        let side = self.marker_side.max(1);
        let x0 = (self.width.saturating_sub(side)) / 2;
        let y0 = (self.height.saturating_sub(side)) / 2;
        let cell = (side / 6).max(1);

        GrayImage::from_fn(self.width, self.height, |x, y| {
            let inside = x >= x0 && x < x0 + side && y >= y0 && y < y0 + side;
            if !inside {
                return Luma([background]);
            }
            let on = ((x - x0) / cell + (y - y0) / cell) % 2 == 0;
            Luma([if on { hi } else { lo }])
        })
    }
}
