//! Container Capacities
//!
//! All containers in the tick path are fixed-size. These capacities bound
//! memory use at compile time.

/// Maximum number of discrete actions in an [`ActionSpace`](crate::ActionSpace).
///
/// Bounds the exploration ledger as well. UVC exposure controls expose
/// 8-13 discrete log2 steps on common hardware.
pub const MAX_ACTIONS: usize = 16;

/// Maximum number of distinct marker ids kept per detection.
///
/// Must be a power of two (backing index set requirement).
pub const MAX_MARKERS: usize = 32;

/// Largest supported smoothing window.
pub const MAX_SMOOTHING_WINDOW: usize = 32;

/// Default smoothing window (frames).
///
/// At 30 fps this averages over ~170 ms.
pub const DEFAULT_SMOOTHING_WINDOW: usize = 5;
