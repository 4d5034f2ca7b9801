//! Engine Configuration
//!
//! Plain structs with `Default` impls built from [`crate::constants`], plus a
//! few named presets. With the `serde` feature (on by default through `std`)
//! every struct is (de)serialisable, so a host can load them from a file.
//!
//! ```rust
//! use lumaguard_core::{EngineConfig, UncertaintyConfig};
//!
//! let config = EngineConfig {
//!     uncertainty: UncertaintyConfig::close_range(),
//!     ..EngineConfig::default()
//! };
//! config.validate()?;
//! # Ok::<(), lumaguard_core::ConfigError>(())
//! ```

use crate::{
    constants::{
        AREA_HIGH, AREA_LOW, BRIGHTNESS_CHANGE_FLOOR, BRIGHTNESS_CHANGE_RATIO,
        DEFAULT_SMOOTHING_WINDOW, DEFAULT_START_INDEX, MAX_SMOOTHING_WINDOW, SETTLING_FRAMES,
        SHARPNESS_HIGH, SHARPNESS_LOW, TIE_EPSILON, TRIGGER_THRESHOLD,
    },
    errors::ConfigError,
};

/// Thresholds for the per-frame uncertainty score
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UncertaintyConfig {
    /// Laplacian variance mapped to quality 0
    pub sharpness_low: f32,
    /// Laplacian variance mapped to quality 1
    pub sharpness_high: f32,
    /// Marker area (px²) mapped to quality 0
    pub area_low: f32,
    /// Marker area (px²) mapped to quality 1
    pub area_high: f32,
}

impl Default for UncertaintyConfig {
    fn default() -> Self {
        Self {
            sharpness_low: SHARPNESS_LOW,
            sharpness_high: SHARPNESS_HIGH,
            area_low: AREA_LOW,
            area_high: AREA_HIGH,
        }
    }
}

impl UncertaintyConfig {
    /// Markers held close to the lens: larger areas before size stops mattering
    pub fn close_range() -> Self {
        Self {
            area_low: 4_000.0,
            area_high: 200_000.0,
            ..Self::default()
        }
    }

    /// Check that both threshold pairs are finite and strictly increasing
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.sharpness_low.is_finite()
            && self.sharpness_high.is_finite()
            && self.sharpness_low < self.sharpness_high)
        {
            return Err(ConfigError::InvertedThresholds { name: "sharpness" });
        }
        if !(self.area_low.is_finite() && self.area_high.is_finite() && self.area_low < self.area_high) {
            return Err(ConfigError::InvertedThresholds { name: "area" });
        }
        Ok(())
    }
}

/// Temporal smoothing window
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SmootherConfig {
    /// Number of raw scores averaged
    pub window: usize,
}

impl Default for SmootherConfig {
    fn default() -> Self {
        Self { window: DEFAULT_SMOOTHING_WINDOW }
    }
}

impl SmootherConfig {
    /// Check `1 <= window <= MAX_SMOOTHING_WINDOW`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window == 0 || self.window > MAX_SMOOTHING_WINDOW {
            return Err(ConfigError::InvalidWindow {
                window: self.window,
                max: MAX_SMOOTHING_WINDOW,
            });
        }
        Ok(())
    }
}

/// MONITOR/EXPLORE parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecisionConfig {
    /// Smoothed uncertainty that must be exceeded to explore
    pub trigger_threshold: f32,
    /// Relative brightness change counted as a lighting shift
    pub brightness_change_ratio: f32,
    /// Absolute floor of the brightness-change threshold
    pub brightness_change_floor: f32,
    /// Frames ignored after committing a sweep winner
    pub settling_frames: u64,
    /// Tie band around the sweep minimum
    pub tie_epsilon: f32,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            trigger_threshold: TRIGGER_THRESHOLD,
            brightness_change_ratio: BRIGHTNESS_CHANGE_RATIO,
            brightness_change_floor: BRIGHTNESS_CHANGE_FLOOR,
            settling_frames: SETTLING_FRAMES,
            tie_epsilon: TIE_EPSILON,
        }
    }
}

impl DecisionConfig {
    /// Slow cameras (e.g. USB 2.0 at 15 fps): longer settling, wider change band
    pub fn slow_camera() -> Self {
        Self {
            brightness_change_ratio: 0.15,
            settling_frames: 20,
            ..Self::default()
        }
    }

    /// Check every parameter is in its domain
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.trigger_threshold.is_finite() && (0.0..=1.0).contains(&self.trigger_threshold)) {
            return Err(ConfigError::InvalidParameter { name: "trigger_threshold" });
        }
        if !(self.brightness_change_ratio.is_finite() && self.brightness_change_ratio >= 0.0) {
            return Err(ConfigError::InvalidParameter { name: "brightness_change_ratio" });
        }
        if !(self.brightness_change_floor.is_finite() && self.brightness_change_floor >= 0.0) {
            return Err(ConfigError::InvalidParameter { name: "brightness_change_floor" });
        }
        if !(self.tie_epsilon.is_finite() && self.tie_epsilon > 0.0) {
            return Err(ConfigError::InvalidParameter { name: "tie_epsilon" });
        }
        Ok(())
    }
}

/// Complete decision-engine configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Per-frame scoring
    pub uncertainty: UncertaintyConfig,
    /// Score smoothing
    pub smoother: SmootherConfig,
    /// State machine
    pub decision: DecisionConfig,
    /// Action index applied at startup
    pub start_index: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            uncertainty: UncertaintyConfig::default(),
            smoother: SmootherConfig::default(),
            decision: DecisionConfig::default(),
            start_index: DEFAULT_START_INDEX,
        }
    }
}

impl EngineConfig {
    /// Validate all sections
    ///
    /// `start_index` is checked against the action space when the engine is
    /// built, since the space comes from the actuator.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.uncertainty.validate()?;
        self.smoother.validate()?;
        self.decision.validate()
    }
}
