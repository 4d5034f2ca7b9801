//! Core decision engine for LumaGuard
//!
//! Keeps a camera's exposure tuned so a fiducial-marker detector stays
//! reliable under changing light. Each frame is scored for perceptual
//! uncertainty, the score stream is smoothed, and a MONITOR/EXPLORE state
//! machine decides when to sweep the exposure ladder and which level to keep.
//!
//! Key constraints:
//! - No heap allocation in the tick path
//! - `no_std` capable (disable the default `std` feature)
//! - Hardware bindings live behind the [`Sensor`], [`Detector`] and
//!   [`Actuator`] traits
//!
//! ```no_run
//! use lumaguard_core::{ActionSpace, DecisionEngine, DetectionResult, EngineConfig, LumaFrame};
//! # use lumaguard_core::Actuator;
//! # struct Camera(ActionSpace);
//! # impl Actuator for Camera {
//! #     fn probe_support(&mut self) -> bool { true }
//! #     fn apply(&mut self, _index: usize) -> bool { true }
//! #     fn action_space(&self) -> &ActionSpace { &self.0 }
//! # }
//! # let camera = Camera(ActionSpace::default());
//!
//! let mut engine = DecisionEngine::with_probe(EngineConfig::default(), camera)?;
//!
//! let pixels = [128u8; 64 * 48];
//! let frame = LumaFrame::new(64, 48, &pixels)?;
//! let report = engine.tick(Some(&frame), &DetectionResult::none(), frame.mean_luminance(), 1)?;
//! println!("{:?} u={:.2}", report.state, report.smoothed_uncertainty);
//! # Ok::<(), lumaguard_core::DecisionError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod action;
pub mod buffer;
pub mod config;
pub mod constants;
pub mod detection;
pub mod engine;
pub mod errors;
pub mod frame;
pub mod ledger;
pub mod machine;
pub mod smoother;
pub mod traits;
pub mod uncertainty;

// Public API
pub use action::{ActionCommand, ActionSpace, CommandKind};
pub use config::{DecisionConfig, EngineConfig, SmootherConfig, UncertaintyConfig};
pub use detection::{DetectionResult, MarkerId};
pub use engine::{ActuationMode, DecisionEngine, TickReport};
pub use errors::{ConfigError, DecisionError, DecisionResult, SensorError};
pub use frame::{AsLuma, LumaFrame};
pub use ledger::ExplorationLedger;
pub use machine::{ControllerState, DecisionStateMachine, EnvironmentBaseline, Phase};
pub use smoother::TemporalSmoother;
pub use traits::{Actuator, Detector, Sensor};
pub use uncertainty::{quality, Metrics, UncertaintyEngine, UncertaintyScore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
