//! Default Action Ladder

/// Default exposure levels, darkest first.
///
/// Values are the UVC/DirectShow log2 exposure convention: `-8` is
/// 2⁻⁸ s ≈ 3.9 ms, `-2` is 2⁻² s = 250 ms.
pub const DEFAULT_EXPOSURE_LEVELS: [f32; 7] = [-8.0, -7.0, -6.0, -5.0, -4.0, -3.0, -2.0];

/// Index applied at startup (`-6`, a mid-range indoor exposure).
pub const DEFAULT_START_INDEX: usize = 2;
