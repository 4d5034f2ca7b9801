//! Per-Frame Uncertainty Scoring
//!
//! ## Overview
//!
//! Turns one frame and its detection result into a scalar in [0, 1] that
//! estimates how unreliable the current perception is:
//!
//! - `0.0`: fully confident
//! - `1.0`: blind
//!
//! ## Scoring
//!
//! Two image-quality factors are normalised with the same clamp:
//!
//! ```text
//! quality(v, low, high) = 0                       v <= low
//!                       = 1                       v >= high
//!                       = (v - low) / (high - low) otherwise
//! ```
//!
//! - sharpness: Laplacian variance of the luminance plane
//! - size: pixel area of the primary marker
//!
//! Then:
//!
//! ```text
//! no detection:  score = 0.9
//! detection:     score = 0.1 + 0.4 × (1 - q_sharp) + 0.4 × (1 - q_size)
//! ```
//!
//! The undetected constant stays below 1.0 so one missed frame is not read
//! as total blindness. The 0.1 floor is the residual uncertainty of even a
//! perfect detection.
//!
//! The engine is stateless; temporal behaviour lives in
//! [`TemporalSmoother`](crate::TemporalSmoother).

use crate::{
    config::UncertaintyConfig,
    constants::{BLUR_PENALTY_WEIGHT, RESIDUAL_UNCERTAINTY, SIZE_PENALTY_WEIGHT, UNDETECTED_SCORE},
    detection::DetectionResult,
    frame::LumaFrame,
};

/// Uncertainty in [0, 1]; 0 = confident, 1 = blind
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UncertaintyScore(f32);

impl UncertaintyScore {
    /// Score reported for frames without a detection
    pub const UNDETECTED: Self = Self(UNDETECTED_SCORE);

    /// Clamp into [0, 1]; NaN maps to 1 (blind)
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self(1.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Raw value
    pub fn value(self) -> f32 {
        self.0
    }
}

/// Diagnostic record recomputed every frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    /// Whether the detector found a marker
    pub detected: bool,
    /// Laplacian variance of the frame
    pub sharpness: f32,
    /// Primary marker area in px²
    pub target_area: f32,
    /// Normalised sharpness in [0, 1]
    pub quality_sharpness: f32,
    /// Normalised size in [0, 1]
    pub quality_size: f32,
}

/// Linear clamp-normalise `value` between `low` and `high`
///
/// Callers guarantee `low < high` (see [`UncertaintyConfig::validate`]).
pub fn quality(value: f32, low: f32, high: f32) -> f32 {
    if value <= low {
        return 0.0;
    }
    if value >= high {
        return 1.0;
    }
    (value - low) / (high - low)
}

/// Stateless per-frame scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct UncertaintyEngine {
    config: UncertaintyConfig,
}

impl UncertaintyEngine {
    /// Scorer with the given thresholds
    pub fn new(config: UncertaintyConfig) -> Self {
        Self { config }
    }

    /// Active thresholds
    pub fn config(&self) -> &UncertaintyConfig {
        &self.config
    }

    /// Score one frame
    ///
    /// A missing or empty frame takes the undetected branch with zeroed
    /// metrics; it never errors.
    pub fn compute(
        &self,
        frame: Option<&LumaFrame<'_>>,
        detection: &DetectionResult,
    ) -> (UncertaintyScore, Metrics) {
        let frame = match frame {
            Some(f) if !f.is_empty() => f,
            _ => return (UncertaintyScore::UNDETECTED, Metrics::default()),
        };

        self.score_measurements(frame.laplacian_variance(), detection)
    }

    /// Score from an already measured sharpness
    ///
    /// Split out so hosts that compute focus elsewhere (e.g. on a GPU) can
    /// reuse the scoring rule.
    pub fn score_measurements(
        &self,
        sharpness: f32,
        detection: &DetectionResult,
    ) -> (UncertaintyScore, Metrics) {
        let c = &self.config;
        let area = if detection.detected { detection.scoring_area() } else { 0.0 };

        let quality_sharpness = quality(sharpness, c.sharpness_low, c.sharpness_high);
        let quality_size = quality(area, c.area_low, c.area_high);

        let score = if detection.detected {
            let penalty_blur = (1.0 - quality_sharpness) * BLUR_PENALTY_WEIGHT;
            let penalty_size = (1.0 - quality_size) * SIZE_PENALTY_WEIGHT;
            UncertaintyScore::new(RESIDUAL_UNCERTAINTY + penalty_blur + penalty_size)
        } else {
            UncertaintyScore::UNDETECTED
        };

        let metrics = Metrics {
            detected: detection.detected,
            sharpness,
            target_area: area,
            quality_sharpness,
            quality_size,
        };

        (score, metrics)
    }
}
