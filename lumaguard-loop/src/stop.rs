//! Cooperative cancellation
//!
//! The loop polls its [`StopSignal`] once per iteration, before reading the
//! next frame. Replaces the interactive "press q" exit of a windowed build.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Polled once per tick; `true` ends the run cleanly
pub trait StopSignal {
    fn should_stop(&mut self) -> bool;
}

impl<F: FnMut() -> bool> StopSignal for F {
    fn should_stop(&mut self) -> bool {
        self()
    }
}

/// Shared flag that can be raised from another thread or a signal handler
#[derive(Debug, Clone, Default)]
pub struct ManualStop {
    flag: Arc<AtomicBool>,
}

impl ManualStop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop at the next poll
    pub fn trigger(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

impl StopSignal for ManualStop {
    fn should_stop(&mut self) -> bool {
        self.is_triggered()
    }
}

/// Never stops; the run ends on end-of-stream or the frame limit
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverStop;

impl StopSignal for NeverStop {
    fn should_stop(&mut self) -> bool {
        false
    }
}
