//! Constants for LumaGuard Core
//!
//! Centralised numeric values used by the decision engine. Every tunable
//! here has a matching field in [`crate::config`]; the constants are the
//! defaults those configs start from.
//!
//! ## Organization
//!
//! - **Quality**: uncertainty scoring thresholds and weights
//! - **Decision**: state-machine trigger and settling parameters
//! - **Buffers**: fixed capacities for the allocation-free containers
//! - **Actions**: the default exposure ladder

/// Uncertainty scoring thresholds and penalty weights.
pub mod quality;

/// MONITOR/EXPLORE trigger, change-detection and settling parameters.
pub mod decision;

/// Capacities of the fixed-size containers.
pub mod buffers;

/// Default exposure ladder and starting level.
pub mod actions;

// Re-export commonly used constants for convenience
pub use quality::{
    SHARPNESS_LOW, SHARPNESS_HIGH, AREA_LOW, AREA_HIGH,
    UNDETECTED_SCORE, RESIDUAL_UNCERTAINTY, BLUR_PENALTY_WEIGHT, SIZE_PENALTY_WEIGHT,
};

pub use decision::{
    TRIGGER_THRESHOLD, BRIGHTNESS_CHANGE_RATIO, BRIGHTNESS_CHANGE_FLOOR,
    SETTLING_FRAMES, TIE_EPSILON,
};

pub use buffers::{
    MAX_ACTIONS, MAX_MARKERS, MAX_SMOOTHING_WINDOW, DEFAULT_SMOOTHING_WINDOW,
};

pub use actions::{DEFAULT_EXPOSURE_LEVELS, DEFAULT_START_INDEX};
