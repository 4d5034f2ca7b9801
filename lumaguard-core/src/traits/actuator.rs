//! Imaging-Parameter Actuator Trait
//!
//! ## Capability Probe
//!
//! [`Actuator::probe_support`] runs once at startup. The reference procedure:
//!
//! 1. Read the current value
//! 2. Write a different value from the action space
//! 3. Wait for the device to react
//! 4. Read back; supported if the value changed
//!
//! Cameras that silently ignore manual exposure writes (many UVC devices
//! with auto-exposure locked on) fail this probe.
//!
//! ## Applying Actions
//!
//! [`Actuator::apply`] is best-effort. Indices past the end of the space are
//! clamped (see [`ActionSpace::clamp_index`]) and the return value only says
//! whether the write was accepted by the driver.

use crate::action::ActionSpace;

/// Device that can apply discrete settings from an [`ActionSpace`]
pub trait Actuator {
    /// One-time check that writes actually take effect
    fn probe_support(&mut self) -> bool;

    /// Apply the setting at `index` (clamped into range)
    fn apply(&mut self, index: usize) -> bool;

    /// The immutable ladder of settings
    fn action_space(&self) -> &ActionSpace;
}

impl<A: Actuator + ?Sized> Actuator for &mut A {
    fn probe_support(&mut self) -> bool {
        (**self).probe_support()
    }

    fn apply(&mut self, index: usize) -> bool {
        (**self).apply(index)
    }

    fn action_space(&self) -> &ActionSpace {
        (**self).action_space()
    }
}
