//! Collaborator Traits
//!
//! The decision engine consumes three capabilities. Each is a thin binding
//! over hardware or a vision library and can be swapped without touching the
//! control logic.
//!
//! - [`Sensor`]: produces frames, reports brightness, shows the annotated view
//! - [`Detector`]: finds fiducial markers in a frame
//! - [`Actuator`]: probes and applies discrete imaging settings
//!
//! ## Design Philosophy
//!
//! - **Static Dispatch**: the engine and loop are generic over these traits
//! - **Pull-based Sensing**: [`Sensor::read`] uses `nb::Result`, like the
//!   rest of the embedded ecosystem, so a binding can report "no frame yet"
//!   without blocking
//! - **Fire-and-forget Actuation**: [`Actuator::apply`] reports success but
//!   nothing retries or verifies beyond the startup probe

pub mod actuator;
pub mod detector;
pub mod sensor;

pub use actuator::Actuator;
pub use detector::Detector;
pub use sensor::Sensor;
