//! Property-based actuator
//!
//! Most camera APIs expose exposure as a single get/set property. This adapts
//! such a property to the core [`Actuator`] trait and implements the
//! read-back capability probe on top of it.

use std::{thread, time::Duration};

use lumaguard_core::{ActionSpace, Actuator};

/// Raw get/set access to one imaging property
pub trait ExposureControl {
    /// Current value as reported by the driver
    fn read_exposure(&mut self) -> f32;

    /// Request a new value; `true` if the driver accepted the call
    fn write_exposure(&mut self, value: f32) -> bool;
}

/// [`Actuator`] over an [`ExposureControl`] and a ladder of values
pub struct PropertyActuator<C> {
    control: C,
    space: ActionSpace,
    probe_wait: Duration,
}

impl<C: ExposureControl> PropertyActuator<C> {
    pub fn new(control: C, space: ActionSpace, probe_wait: Duration) -> Self {
        Self {
            control,
            space,
            probe_wait,
        }
    }

    pub fn control(&self) -> &C {
        &self.control
    }

    pub fn control_mut(&mut self) -> &mut C {
        &mut self.control
    }

    /// Ladder value the probe writes: the middle rung, or its neighbour if
    /// the device already sits there
    fn probe_value(&self, initial: f32) -> Option<f32> {
        let levels = self.space.levels();
        let mid = levels.len() / 2;
        let candidates = [Some(mid), mid.checked_add(1), mid.checked_sub(1)];
        candidates
            .into_iter()
            .flatten()
            .filter_map(|i| levels.get(i).copied())
            .find(|&v| v != initial)
    }
}

impl<C: ExposureControl> Actuator for PropertyActuator<C> {
    fn probe_support(&mut self) -> bool {
        let initial = self.control.read_exposure();
        let Some(test_value) = self.probe_value(initial) else {
            log::warn!("Exposure probe: ladder has no value different from {}", initial);
            return false;
        };

        self.control.write_exposure(test_value);
        if !self.probe_wait.is_zero() {
            thread::sleep(self.probe_wait);
        }
        let read_back = self.control.read_exposure();

        let supported = read_back != initial;
        log::info!(
            "Exposure probe: {} -> wrote {} -> read {} ({})",
            initial,
            test_value,
            read_back,
            if supported { "supported" } else { "not supported" }
        );
        supported
    }

    fn apply(&mut self, index: usize) -> bool {
        let index = self.space.clamp_index(index);
        let Ok(value) = self.space.get(index) else {
            return false;
        };
        log::debug!("Setting exposure to {} (level {})", value, index);
        self.control.write_exposure(value)
    }

    fn action_space(&self) -> &ActionSpace {
        &self.space
    }
}
