//! Decision State Machine Parameters

/// Smoothed uncertainty above which exploration may be triggered.
///
/// Exploration also requires an environmental change, see
/// [`BRIGHTNESS_CHANGE_RATIO`].
pub const TRIGGER_THRESHOLD: f32 = 0.6;

/// Relative brightness change (vs. baseline) that counts as a lighting shift.
pub const BRIGHTNESS_CHANGE_RATIO: f32 = 0.10;

/// Absolute lower bound on the brightness-change threshold (8-bit luma units).
///
/// A pure ratio collapses near zero brightness, where sensor noise alone
/// would exceed 10% of the baseline.
pub const BRIGHTNESS_CHANGE_FLOOR: f32 = 5.0;

/// Frames to ignore after committing a new action.
///
/// Webcam auto-exposure pipelines typically take 3-8 frames to converge
/// after a manual exposure write.
pub const SETTLING_FRAMES: u64 = 10;

/// Scores within this distance of the sweep minimum are treated as tied.
pub const TIE_EPSILON: f32 = 0.01;
