//! Contrast-threshold stand-in for a fiducial detector
//!
//! A marker is "found" when the frame holds enough contrast to decode it.
//! Its area is the number of pixels that stand out from the background
//! (sampled at the top-left corner), which for the simulated scene is the
//! printed marker.

use lumaguard_core::{AsLuma, DetectionResult, Detector, MarkerId};

/// Minimum max-min spread needed to decode a marker
pub const DEFAULT_MIN_CONTRAST: u8 = 40;

pub struct SimulatedDetector {
    min_contrast: u8,
    marker_id: MarkerId,
    detections: u64,
    visualized: u64,
}

impl SimulatedDetector {
    pub fn new(marker_id: MarkerId) -> Self {
        Self {
            min_contrast: DEFAULT_MIN_CONTRAST,
            marker_id,
            detections: 0,
            visualized: 0,
        }
    }

    pub fn with_min_contrast(mut self, min_contrast: u8) -> Self {
        self.min_contrast = min_contrast;
        self
    }

    /// Frames in which a marker was found
    pub fn detections(&self) -> u64 {
        self.detections
    }

    /// Calls to [`Detector::visualize`] with a detection to draw
    pub fn visualized(&self) -> u64 {
        self.visualized
    }
}

impl Default for SimulatedDetector {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<F: AsLuma> Detector<F> for SimulatedDetector {
    fn detect(&mut self, frame: &F) -> DetectionResult {
        let luma = frame.as_luma();
        let pixels = luma.pixels();
        let (Some(&min), Some(&max)) = (pixels.iter().min(), pixels.iter().max()) else {
            return DetectionResult::none();
        };

        let contrast = max - min;
        if contrast <= self.min_contrast {
            return DetectionResult::none();
        }

        let background = pixels[0] as i16;
        let tolerance = (contrast / 4) as i16;
        let area = pixels
            .iter()
            .filter(|&&p| (p as i16 - background).abs() > tolerance)
            .count();

        self.detections += 1;
        DetectionResult::found(area as f32, [self.marker_id])
    }

    fn visualize(&mut self, _frame: &F, detection: &DetectionResult) {
        if detection.detected {
            self.visualized += 1;
        }
    }
}
