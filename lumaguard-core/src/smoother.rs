//! Sliding-window smoothing of the raw score stream
//!
//! A plain moving average over the last *W* raw scores, no decay weighting.
//! The result always lies within [min, max] of the values in the window.

use crate::{
    buffer::CircularBuffer,
    config::SmootherConfig,
    constants::MAX_SMOOTHING_WINDOW,
    errors::ConfigError,
    uncertainty::UncertaintyScore,
};

/// Bounded FIFO moving average
#[derive(Debug, Clone)]
pub struct TemporalSmoother {
    history: CircularBuffer<f32, MAX_SMOOTHING_WINDOW>,
}

impl TemporalSmoother {
    /// Smoother with a validated window
    pub fn new(config: SmootherConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            history: CircularBuffer::with_limit(config.window),
        })
    }

    /// Append a raw score and return the mean of the window
    pub fn update(&mut self, raw: UncertaintyScore) -> f32 {
        self.history.push(raw.value());
        // Non-empty after the push
        self.history.mean().unwrap_or(raw.value())
    }

    /// Current mean, `None` before the first update
    pub fn current(&self) -> Option<f32> {
        self.history.mean()
    }

    /// Forget all scores
    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Scores currently held
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// True before the first update
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Configured window size
    pub fn window(&self) -> usize {
        self.history.limit()
    }
}

impl Default for TemporalSmoother {
    fn default() -> Self {
        Self {
            history: CircularBuffer::with_limit(SmootherConfig::default().window),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(v: f32) -> UncertaintyScore {
        UncertaintyScore::new(v)
    }

    #[test]
    fn constant_input_is_unchanged() {
        let mut smoother = TemporalSmoother::default();
        let mut last = 0.0;
        for _ in 0..5 {
            last = smoother.update(score(0.9));
        }
        assert!((last - 0.9).abs() < 1e-6);
        assert_eq!(smoother.len(), 5);
    }

    #[test]
    fn sixth_value_evicts_first() {
        let mut smoother = TemporalSmoother::default();
        for v in [0.5, 0.1, 0.1, 0.1, 0.1] {
            smoother.update(score(v));
        }
        // Window now [0.1, 0.1, 0.1, 0.1, 0.6]; the leading 0.5 is gone
        let smoothed = smoother.update(score(0.6));
        assert!((smoothed - 0.2).abs() < 1e-6);
        assert_eq!(smoother.len(), 5);
    }

    #[test]
    fn partial_window_averages_what_it_has() {
        let mut smoother = TemporalSmoother::default();
        smoother.update(score(0.2));
        let smoothed = smoother.update(score(0.4));
        assert!((smoothed - 0.3).abs() < 1e-6);
    }

    #[test]
    fn window_of_one_passes_through() {
        let mut smoother = TemporalSmoother::new(SmootherConfig { window: 1 }).unwrap();
        assert_eq!(smoother.update(score(0.3)), 0.3);
        assert_eq!(smoother.update(score(0.8)), 0.8);
    }

    #[test]
    fn reset_forgets_history() {
        let mut smoother = TemporalSmoother::default();
        smoother.update(score(0.9));
        smoother.reset();
        assert!(smoother.is_empty());
        assert_eq!(smoother.update(score(0.1)), 0.1);
    }

    #[test]
    fn invalid_window_rejected() {
        assert!(TemporalSmoother::new(SmootherConfig { window: 0 }).is_err());
    }
}
