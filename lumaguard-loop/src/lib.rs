//! Closed-loop driver for the LumaGuard decision engine
//!
//! Wires a [`Sensor`](lumaguard_core::Sensor), a
//! [`Detector`](lumaguard_core::Detector) and an
//! [`Actuator`](lumaguard_core::Actuator) to a
//! [`DecisionEngine`](lumaguard_core::DecisionEngine) and runs the tick loop:
//!
//! - [`runner`]: the loop itself, sensor teardown guard, run summary
//! - [`config`]: JSON-loadable [`LoopConfig`]
//! - [`actuator`]: get/set property adapter with the read-back probe
//! - [`hud`]: status overlay and log line
//! - [`stop`]: cooperative cancellation
//! - [`sim`]: simulated camera, exposure and detector
//!
//! ```rust
//! use lumaguard_loop::{
//!     sim::{simulated_loop, LightingSchedule, SimulatedCamera},
//!     LoopConfig, NeverStop, StopReason,
//! };
//!
//! let mut camera = SimulatedCamera::new(160, 120, -6.0, LightingSchedule::constant(32.0)).end_after(30);
//! let mut control = simulated_loop(&LoopConfig::headless(), &camera)?;
//! let summary = control.run(&mut camera, &mut NeverStop)?;
//!
//! assert_eq!(summary.stop_reason, StopReason::EndOfStream);
//! assert_eq!(summary.frames, 30);
//! # Ok::<(), lumaguard_loop::LoopError>(())
//! ```

pub mod actuator;
pub mod config;
pub mod error;
pub mod hud;
pub mod runner;
pub mod sim;
pub mod stop;

pub use actuator::{ExposureControl, PropertyActuator};
pub use config::LoopConfig;
pub use error::{LoopError, LoopResult};
pub use hud::Hud;
pub use runner::{ControlLoop, LoopSummary, SensorGuard, StopReason};
pub use stop::{ManualStop, NeverStop, StopSignal};
