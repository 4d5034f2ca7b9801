//! Discrete Action Space
//!
//! The controller commands a single physical axis (exposure) through an
//! ordered ladder of setting values. Index 0 is the weakest/darkest setting
//! and the last index the strongest/brightest; the exploration tie-break
//! relies on that ordering.

use heapless::Vec;

use crate::{
    constants::{DEFAULT_EXPOSURE_LEVELS, MAX_ACTIONS},
    errors::{ConfigError, DecisionError, DecisionResult},
};

/// Ordered, immutable ladder of setting values
#[derive(Debug, Clone, PartialEq)]
pub struct ActionSpace {
    levels: Vec<f32, MAX_ACTIONS>,
}

impl ActionSpace {
    /// Build a ladder from strictly increasing, finite values
    pub fn new(levels: &[f32]) -> Result<Self, ConfigError> {
        if levels.is_empty() {
            return Err(ConfigError::InvalidActionSpace { reason: "no levels" });
        }
        if levels.len() > MAX_ACTIONS {
            return Err(ConfigError::InvalidActionSpace { reason: "too many levels" });
        }
        if levels.iter().any(|l| !l.is_finite()) {
            return Err(ConfigError::InvalidActionSpace { reason: "non-finite level" });
        }
        if levels.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(ConfigError::InvalidActionSpace {
                reason: "levels must be strictly increasing",
            });
        }

        let levels = Vec::from_slice(levels)
            .map_err(|_| ConfigError::InvalidActionSpace { reason: "too many levels" })?;
        Ok(Self { levels })
    }

    /// Number of actions
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false for a constructed space
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Setting value at `index`
    ///
    /// Out-of-range indices are a contract violation, not clamped.
    pub fn get(&self, index: usize) -> DecisionResult<f32> {
        self.levels
            .get(index)
            .copied()
            .ok_or(DecisionError::ActionIndexOutOfRange {
                index,
                len: self.levels.len(),
            })
    }

    /// Clamp an index into `[0, len - 1]`
    ///
    /// Used by actuator bindings, whose `apply` is specified as clamping.
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.levels.len().saturating_sub(1))
    }

    /// Index of the strongest setting
    pub fn last_index(&self) -> usize {
        self.levels.len() - 1
    }

    /// All levels, weakest first
    pub fn levels(&self) -> &[f32] {
        &self.levels
    }
}

const _: () = assert!(DEFAULT_EXPOSURE_LEVELS.len() <= MAX_ACTIONS);

impl Default for ActionSpace {
    /// The seven-step exposure ladder `-8 ..= -2`
    fn default() -> Self {
        // Fits by the assertion above
        let levels = Vec::from_slice(&DEFAULT_EXPOSURE_LEVELS).unwrap_or_default();
        Self { levels }
    }
}

/// Why an action was commanded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandKind {
    /// Initial setting applied at startup
    Initial,
    /// Trying the next level during a sweep
    Probe,
    /// Committing the sweep winner
    Commit,
}

/// Actuator command produced by the decision engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionCommand {
    /// Action index within the space
    pub index: usize,
    /// Setting value at that index
    pub value: f32,
    /// Purpose of the command
    pub kind: CommandKind,
    /// Whether the actuator reported success
    pub accepted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ladder() {
        let space = ActionSpace::default();
        assert_eq!(space.len(), 7);
        assert_eq!(space.get(0), Ok(-8.0));
        assert_eq!(space.get(6), Ok(-2.0));
        assert_eq!(space.last_index(), 6);
        assert_eq!(space.levels(), &DEFAULT_EXPOSURE_LEVELS[..]);
    }

    #[test]
    fn out_of_range_is_an_error() {
        let space = ActionSpace::default();
        assert_eq!(
            space.get(7),
            Err(DecisionError::ActionIndexOutOfRange { index: 7, len: 7 })
        );
    }

    #[test]
    fn clamp_index_saturates() {
        let space = ActionSpace::new(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(space.clamp_index(0), 0);
        assert_eq!(space.clamp_index(2), 2);
        assert_eq!(space.clamp_index(40), 2);
    }

    #[test]
    fn rejects_bad_ladders() {
        assert!(ActionSpace::new(&[]).is_err());
        assert!(ActionSpace::new(&[1.0, 1.0]).is_err());
        assert!(ActionSpace::new(&[3.0, 2.0]).is_err());
        assert!(ActionSpace::new(&[1.0, f32::NAN]).is_err());
        assert!(ActionSpace::new(&[0.0; MAX_ACTIONS + 1]).is_err());
    }
}
