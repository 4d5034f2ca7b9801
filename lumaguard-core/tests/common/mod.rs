//! Common test utilities for integration tests
//!
//! This module provides:
//! - A scripted actuator that records every write
//! - Synthetic exposure scenes (see [`scenarios`])
//! - A closed-loop driver that feeds scene captures through an engine

#![allow(dead_code)]

pub mod harness;
pub mod scenarios;

use lumaguard_core::{
    ActionSpace, Actuator, DecisionEngine, DecisionResult, Phase, TickReport,
};

use scenarios::ExposureScene;

/// Actuator over the default exposure ladder that remembers what it was told
pub struct ScriptedActuator {
    space: ActionSpace,
    pub current: usize,
    pub supported: bool,
    pub applied: Vec<usize>,
}

impl ScriptedActuator {
    pub fn new(start: usize) -> Self {
        Self {
            space: ActionSpace::default(),
            current: start,
            supported: true,
            applied: Vec::new(),
        }
    }

    pub fn unsupported(start: usize) -> Self {
        Self {
            supported: false,
            ..Self::new(start)
        }
    }
}

impl Actuator for ScriptedActuator {
    fn probe_support(&mut self) -> bool {
        self.supported
    }

    fn apply(&mut self, index: usize) -> bool {
        let index = self.space.clamp_index(index);
        self.applied.push(index);
        if self.supported {
            self.current = index;
        }
        self.supported
    }

    fn action_space(&self) -> &ActionSpace {
        &self.space
    }
}

/// Drives an engine against a scene, one captured frame per tick
pub struct ClosedLoop {
    pub engine: DecisionEngine<ScriptedActuator>,
    pub frame_count: u64,
    pub reports: Vec<TickReport>,
}

impl ClosedLoop {
    pub fn new(engine: DecisionEngine<ScriptedActuator>) -> Self {
        Self {
            engine,
            frame_count: 0,
            reports: Vec::new(),
        }
    }

    /// Capture at the actuator's current level and tick once
    pub fn tick(&mut self, scene: &ExposureScene) -> DecisionResult<TickReport> {
        self.frame_count += 1;
        let capture = scene.capture(self.engine.actuator().current);
        let frame = capture.frame();
        let report = self.engine.tick(
            Some(&frame),
            &capture.detection,
            frame.mean_luminance(),
            self.frame_count,
        )?;
        self.reports.push(report);
        Ok(report)
    }

    /// Tick `n` times under the same scene
    pub fn run(&mut self, scene: &ExposureScene, n: usize) -> DecisionResult<()> {
        for _ in 0..n {
            self.tick(scene)?;
        }
        Ok(())
    }

    /// Number of EXPLORE episodes started so far
    pub fn episodes(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| r.state == (Phase::Explore { step: 0 }))
            .count()
    }
}
