//! Exploration Ledger
//!
//! Records the smoothed uncertainty observed at each action index during one
//! sweep and picks the winner.
//!
//! ## Resolution
//!
//! ```text
//! m          = min(recorded scores)
//! candidates = { i : |score_i - m| < ε }
//! winner     = max(candidates)
//! ```
//!
//! Among near-ties the strongest (brightest) setting wins: a slightly
//! brighter exposure is more robust than a quality difference this small.
//!
//! Storage is a fixed array indexed by action, sized by
//! [`MAX_ACTIONS`](crate::constants::MAX_ACTIONS).

use crate::{
    constants::{MAX_ACTIONS, TIE_EPSILON},
    errors::{DecisionError, DecisionResult},
};

/// Per-action scores for one exploration episode
#[derive(Debug, Clone)]
pub struct ExplorationLedger {
    slots: [Option<f32>; MAX_ACTIONS],
    action_count: usize,
    epsilon: f32,
}

impl ExplorationLedger {
    /// Ledger for `action_count` actions with the default tie band
    ///
    /// `action_count` is capped at [`MAX_ACTIONS`].
    pub fn new(action_count: usize) -> Self {
        Self::with_epsilon(action_count, TIE_EPSILON)
    }

    /// Ledger with an explicit tie band
    pub fn with_epsilon(action_count: usize, epsilon: f32) -> Self {
        Self {
            slots: [None; MAX_ACTIONS],
            action_count: action_count.min(MAX_ACTIONS),
            epsilon,
        }
    }

    /// Record the score seen at `index`, replacing any earlier entry
    pub fn record(&mut self, index: usize, score: f32) -> DecisionResult<()> {
        if index >= self.action_count {
            return Err(DecisionError::ActionIndexOutOfRange {
                index,
                len: self.action_count,
            });
        }
        self.slots[index] = Some(score);
        Ok(())
    }

    /// Clear all entries for a new episode
    pub fn reset(&mut self) {
        self.slots = [None; MAX_ACTIONS];
    }

    /// Number of indices with a recorded score
    pub fn recorded(&self) -> usize {
        self.entries().count()
    }

    /// Recorded `(index, score)` pairs in index order
    pub fn entries(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.slots[..self.action_count]
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|score| (i, score)))
    }

    /// Score recorded at `index`
    pub fn get(&self, index: usize) -> Option<f32> {
        self.slots.get(index).copied().flatten()
    }

    /// Pick the winning index
    ///
    /// Fails with [`DecisionError::EmptyLedger`] when nothing was recorded.
    pub fn resolve(&self) -> DecisionResult<usize> {
        let min = self
            .entries()
            .map(|(_, score)| score)
            .fold(None, |acc: Option<f32>, s| Some(acc.map_or(s, |m| m.min(s))))
            .ok_or(DecisionError::EmptyLedger)?;

        self.entries()
            .filter(|&(_, score)| libm::fabsf(score - min) < self.epsilon)
            .map(|(i, _)| i)
            .max()
            .ok_or(DecisionError::EmptyLedger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ledger_fails() {
        let ledger = ExplorationLedger::new(7);
        assert_eq!(ledger.resolve(), Err(DecisionError::EmptyLedger));
    }

    #[test]
    fn near_tie_prefers_brighter() {
        let mut ledger = ExplorationLedger::new(3);
        ledger.record(0, 0.50).unwrap();
        ledger.record(1, 0.50).unwrap();
        ledger.record(2, 0.52).unwrap();
        assert_eq!(ledger.resolve(), Ok(1));
    }

    #[test]
    fn clear_minimum_wins() {
        let mut ledger = ExplorationLedger::new(5);
        for (i, s) in [0.9, 0.4, 0.2, 0.6, 0.9].into_iter().enumerate() {
            ledger.record(i, s).unwrap();
        }
        assert_eq!(ledger.resolve(), Ok(2));
    }

    #[test]
    fn tie_band_is_strict() {
        let mut ledger = ExplorationLedger::with_epsilon(2, 0.25);
        ledger.record(0, 0.25).unwrap();
        ledger.record(1, 0.75).unwrap();
        // |0.75 - 0.25| = 0.5, outside the band
        assert_eq!(ledger.resolve(), Ok(0));
    }

    #[test]
    fn record_out_of_range() {
        let mut ledger = ExplorationLedger::new(7);
        assert_eq!(
            ledger.record(7, 0.1),
            Err(DecisionError::ActionIndexOutOfRange { index: 7, len: 7 })
        );
    }

    #[test]
    fn reset_clears_entries() {
        let mut ledger = ExplorationLedger::new(4);
        ledger.record(0, 0.3).unwrap();
        ledger.record(3, 0.4).unwrap();
        assert_eq!(ledger.recorded(), 2);

        ledger.reset();
        assert_eq!(ledger.recorded(), 0);
        assert!(ledger.get(0).is_none());
    }

    #[test]
    fn partial_sweep_resolves_over_visited() {
        let mut ledger = ExplorationLedger::new(7);
        ledger.record(0, 0.8).unwrap();
        ledger.record(1, 0.6).unwrap();
        assert_eq!(ledger.resolve(), Ok(1));
    }
}
