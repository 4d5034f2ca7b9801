//! Synthetic exposure scenes
//!
//! A scene has an ambient light level. The exposure ladder multiplies it by
//! `2^index`, so index 0 is the darkest setting. The captured frame is a
//! checkerboard around that brightness whose contrast peaks at mid-grey and
//! collapses towards black or white, which is what a fiducial detector sees
//! when a camera is badly exposed.

use lumaguard_core::{DetectionResult, LumaFrame};

/// Contrast below which the detector loses the marker
pub const DETECTION_CONTRAST: f32 = 40.0;

/// Brightness with the best contrast
pub const MID_GREY: f32 = 128.0;

/// Frame plus what the detector made of it
pub struct Capture {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    pub detection: DetectionResult,
}

impl Capture {
    pub fn frame(&self) -> LumaFrame<'_> {
        LumaFrame::new(self.width, self.height, &self.pixels).expect("capture dimensions")
    }

    pub fn brightness(&self) -> f32 {
        self.frame().mean_luminance()
    }
}

/// Lit scene in front of a camera with an exposure ladder
#[derive(Debug, Clone, Copy)]
pub struct ExposureScene {
    pub ambient: f32,
    pub width: u32,
    pub height: u32,
    pub marker_area: f32,
}

impl ExposureScene {
    pub fn new(ambient: f32) -> Self {
        Self {
            ambient,
            width: 64,
            height: 64,
            marker_area: 100_000.0,
        }
    }

    pub fn brightness_at(&self, index: usize) -> f32 {
        (self.ambient * (1u32 << index) as f32).min(255.0)
    }

    pub fn contrast_at(&self, index: usize) -> f32 {
        let b = self.brightness_at(index);
        (200.0 * (1.0 - (b - MID_GREY).abs() / MID_GREY)).max(0.0)
    }

    /// Ladder index whose brightness lands closest to mid-grey
    pub fn ideal_index(&self, levels: usize) -> usize {
        (0..levels)
            .min_by(|&a, &b| {
                let da = (self.brightness_at(a) - MID_GREY).abs();
                let db = (self.brightness_at(b) - MID_GREY).abs();
                da.total_cmp(&db)
            })
            .unwrap_or(0)
    }

    pub fn capture(&self, index: usize) -> Capture {
        let b = self.brightness_at(index);
        let c = self.contrast_at(index);
        let lo = (b - c / 2.0).clamp(0.0, 255.0) as u8;
        let hi = (b + c / 2.0).clamp(0.0, 255.0) as u8;

        let pixels = checkerboard(self.width, self.height, 4, lo, hi);
        let detection = if c > DETECTION_CONTRAST {
            DetectionResult::found(self.marker_area, [7])
        } else {
            DetectionResult::none()
        };

        Capture {
            width: self.width,
            height: self.height,
            pixels,
            detection,
        }
    }
}

/// Checkerboard of `cell`-pixel squares
pub fn checkerboard(width: u32, height: u32, cell: u32, lo: u8, hi: u8) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            let on = (x / cell + y / cell) % 2 == 0;
            pixels.push(if on { hi } else { lo });
        }
    }
    pixels
}

/// Uniform frame
pub fn flat(width: u32, height: u32, value: u8) -> Vec<u8> {
    vec![value; (width * height) as usize]
}
