//! Simulation rig
//!
//! A software camera, exposure property and marker detector that stand in
//! for real hardware in tests and the `closed_loop` demo.
//!
//! ```rust
//! use lumaguard_loop::sim::{LightingSchedule, SimulatedCamera};
//!
//! // Lights drop to an eighth at frame 40
//! let camera = SimulatedCamera::new(160, 120, -6.0, LightingSchedule::constant(32.0).then(40, 4.0));
//! let exposure = camera.exposure_control();
//! assert_eq!(exposure.exposure(), -6.0);
//! ```

pub mod camera;
pub mod detector;
pub mod scene;

pub use camera::{CapturedFrame, SimulatedCamera, SimulatedExposure};
pub use detector::SimulatedDetector;
pub use scene::{LightingSchedule, SceneState};

use crate::{actuator::PropertyActuator, config::LoopConfig, error::LoopResult, runner::ControlLoop};

/// Loop wired to the simulated exposure property and detector
pub type SimulatedLoop = ControlLoop<PropertyActuator<SimulatedExposure>, SimulatedDetector>;

/// Build a loop that controls `camera`'s exposure
///
/// Runs the startup probe against the camera, so a camera built with
/// [`SimulatedCamera::with_locked_exposure`] yields a perception-only loop.
pub fn simulated_loop(config: &LoopConfig, camera: &SimulatedCamera) -> LoopResult<SimulatedLoop> {
    let actuator = PropertyActuator::new(
        camera.exposure_control(),
        config.action_space()?,
        config.probe_wait(),
    );
    ControlLoop::new(config, actuator, SimulatedDetector::new(7))
}
