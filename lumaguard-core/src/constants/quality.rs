//! Uncertainty Scoring Thresholds
//!
//! Thresholds for the two image-quality factors and the weights that turn
//! them into a single uncertainty score in [0, 1].

// ===== SHARPNESS =====

/// Laplacian variance at or below which a frame counts as fully blurred.
///
/// Typical values for a 640×480 webcam frame:
/// - Motion-blurred or defocused: < 20
/// - Soft but usable: 50-150
/// - Crisp edges on a printed marker: > 300
pub const SHARPNESS_LOW: f32 = 20.0;

/// Laplacian variance at or above which a frame counts as fully sharp.
pub const SHARPNESS_HIGH: f32 = 300.0;

// ===== TARGET SIZE =====

/// Marker area (px²) at or below which the marker is too small to trust.
///
/// Roughly a 28×28 px square, where the inner bit cells of a 6×6 marker
/// shrink to ~3 px and decoding becomes fragile.
pub const AREA_LOW: f32 = 800.0;

/// Marker area (px²) at or above which size no longer adds uncertainty.
///
/// Roughly a 316×316 px square.
pub const AREA_HIGH: f32 = 100_000.0;

// ===== SCORE COMPOSITION =====

/// Score reported when no marker is detected.
///
/// Deliberately below 1.0 so a single missed frame does not read as total
/// blindness.
pub const UNDETECTED_SCORE: f32 = 0.9;

/// Floor of uncertainty that remains even for a perfect detection.
pub const RESIDUAL_UNCERTAINTY: f32 = 0.1;

/// Maximum penalty contributed by blur.
pub const BLUR_PENALTY_WEIGHT: f32 = 0.4;

/// Maximum penalty contributed by a small apparent target.
pub const SIZE_PENALTY_WEIGHT: f32 = 0.4;
