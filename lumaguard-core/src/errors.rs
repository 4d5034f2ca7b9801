//! Error Types for the Decision Engine
//!
//! ## Design Philosophy
//!
//! Errors follow the same rules as the rest of the tick path:
//!
//! 1. **Small Size**: variants carry a few scalars or a `&'static str`.
//! 2. **No Heap Allocation**: no `String` payloads, so errors can be produced
//!    on targets without an allocator.
//! 3. **Copy Semantics**: errors are `Copy` and cheap to return.
//!
//! ## Error Categories
//!
//! ### Contract Violations ([`DecisionError`])
//! - `EmptyLedger`: a sweep was resolved without a single recorded score
//! - `ActionIndexOutOfRange`: an index outside the action space was used
//! - `FrameSizeMismatch`: a pixel buffer does not match its declared size
//!
//! These indicate a caller bug. They are returned from
//! [`DecisionEngine::tick`](crate::DecisionEngine::tick) rather than being
//! clamped away, and the driving loop is expected to stop on them.
//!
//! ### Invalid Configuration ([`ConfigError`])
//! Rejected thresholds, windows or action ladders at construction time.
//!
//! ### Sensor Failures ([`SensorError`])
//! End-of-stream and disconnects. Fatal for the loop, never seen by the
//! decision logic itself.
//!
//! Detector misses and actuator write failures are *not* errors: they are
//! absorbed into the uncertainty score as evidence.
//!
//! ```rust
//! use lumaguard_core::{DecisionError, ExplorationLedger};
//!
//! let ledger = ExplorationLedger::new(7);
//! match ledger.resolve() {
//!     Ok(winner) => println!("keep level {}", winner),
//!     Err(DecisionError::EmptyLedger) => {
//!         // Caller resolved before probing anything
//!     }
//!     Err(e) => println!("unexpected: {}", e),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for decision-engine operations
pub type DecisionResult<T> = Result<T, DecisionError>;

/// Contract violations raised by the decision engine
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum DecisionError {
    /// Resolve was called on a ledger with no recorded scores
    #[error("Exploration ledger is empty")]
    EmptyLedger,

    /// Action index outside `[0, len)`
    #[error("Action index {index} out of range for {len} actions")]
    ActionIndexOutOfRange {
        /// The offending index
        index: usize,
        /// Number of actions in the space
        len: usize,
    },

    /// Pixel buffer length disagrees with the declared frame geometry
    #[error("Frame buffer holds {actual} bytes, geometry needs {expected}")]
    FrameSizeMismatch {
        /// `width * height`
        expected: usize,
        /// Bytes actually supplied
        actual: usize,
    },

    /// Configuration rejected while building the engine
    #[error("Invalid configuration: {0}")]
    Config(ConfigError),
}

impl From<ConfigError> for DecisionError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Configuration errors
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// A `low`/`high` threshold pair is not strictly increasing
    #[error("Threshold pair for {name} must satisfy low < high")]
    InvertedThresholds {
        /// Which pair was rejected
        name: &'static str,
    },

    /// Smoothing window outside `1..=max`
    #[error("Smoothing window {window} outside 1..={max}")]
    InvalidWindow {
        /// Requested window
        window: usize,
        /// Largest supported window
        max: usize,
    },

    /// Action ladder rejected
    #[error("Invalid action space: {reason}")]
    InvalidActionSpace {
        /// Why the ladder was rejected
        reason: &'static str,
    },

    /// A scalar parameter is out of its valid domain
    #[error("Invalid parameter {name}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
    },

    /// Starting action does not exist in the action space
    #[error("Start action {index} out of range for {len} actions")]
    StartIndexOutOfRange {
        /// Requested start index
        index: usize,
        /// Number of actions available
        len: usize,
    },
}

/// Failures reported by a [`Sensor`](crate::Sensor)
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SensorError {
    /// No more frames will be produced
    #[error("Sensor reached end of stream")]
    EndOfStream,

    /// The device went away or failed irrecoverably
    #[error("Sensor disconnected: {reason}")]
    Disconnected {
        /// Device-specific description
        reason: &'static str,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for DecisionError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::EmptyLedger =>
                defmt::write!(fmt, "Empty exploration ledger"),
            Self::ActionIndexOutOfRange { index, len } =>
                defmt::write!(fmt, "Action {} out of range ({})", index, len),
            Self::FrameSizeMismatch { expected, actual } =>
                defmt::write!(fmt, "Frame needs {} bytes, got {}", expected, actual),
            Self::Config(err) =>
                defmt::write!(fmt, "Config: {}", err),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvertedThresholds { name } =>
                defmt::write!(fmt, "Inverted thresholds: {}", name),
            Self::InvalidWindow { window, max } =>
                defmt::write!(fmt, "Window {} outside 1..={}", window, max),
            Self::InvalidActionSpace { reason } =>
                defmt::write!(fmt, "Action space: {}", reason),
            Self::InvalidParameter { name } =>
                defmt::write!(fmt, "Invalid parameter {}", name),
            Self::StartIndexOutOfRange { index, len } =>
                defmt::write!(fmt, "Start action {} out of range ({})", index, len),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SensorError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::EndOfStream => defmt::write!(fmt, "End of stream"),
            Self::Disconnected { reason } => defmt::write!(fmt, "Disconnected: {}", reason),
        }
    }
}
