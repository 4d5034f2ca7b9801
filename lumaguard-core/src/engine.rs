//! Decision Engine
//!
//! Composes the per-tick chain
//!
//! ```text
//! frame + detection ──▶ UncertaintyEngine ──▶ TemporalSmoother ──▶ DecisionStateMachine ──▶ Actuator
//!                           raw score            smoothed score        action request          apply()
//! ```
//!
//! and owns the [`ControllerState`] between ticks. Hardware writes are
//! fire-and-forget: a rejected `apply` is logged and reported in the
//! [`TickReport`] but never stops the loop.
//!
//! ## Actuation Modes
//!
//! When the actuator fails its startup probe the engine runs in
//! [`ActuationMode::PerceptionOnly`]: scoring, smoothing and change detection
//! continue, exploration is suppressed and no command is ever issued.

use crate::{
    action::{ActionCommand, CommandKind},
    config::EngineConfig,
    detection::DetectionResult,
    errors::{ConfigError, DecisionResult},
    frame::LumaFrame,
    machine::{ActionRequest, ControllerState, DecisionStateMachine, Phase},
    smoother::TemporalSmoother,
    traits::Actuator,
    uncertainty::{Metrics, UncertaintyEngine},
};

/// Whether corrective action is available
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActuationMode {
    /// Actuator passed its probe
    Active,
    /// Actuator unsupported; observe only
    PerceptionOnly,
}

/// Outcome of one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Frame number this report belongs to
    pub frame_count: u64,
    /// Mode after the tick
    pub state: Phase,
    /// Unsmoothed score of this frame
    pub raw_uncertainty: f32,
    /// Moving average fed to the state machine
    pub smoothed_uncertainty: f32,
    /// Per-frame diagnostics
    pub metrics: Metrics,
    /// Brightness passed in for this tick
    pub brightness: f32,
    /// Action last committed
    pub current_action_index: usize,
    /// MONITOR is inside its stabilisation gate
    pub settling: bool,
    /// Command sent to the actuator this tick
    pub command_issued: Option<ActionCommand>,
}

/// Uncertainty-driven controller over an [`Actuator`]
pub struct DecisionEngine<A: Actuator> {
    scorer: UncertaintyEngine,
    smoother: TemporalSmoother,
    machine: DecisionStateMachine,
    state: ControllerState,
    actuator: A,
    mode: ActuationMode,
}

impl<A: Actuator> DecisionEngine<A> {
    /// Build an engine with an explicit actuation mode
    pub fn new(config: EngineConfig, actuator: A, mode: ActuationMode) -> DecisionResult<Self> {
        config.validate()?;

        let action_count = actuator.action_space().len();
        if config.start_index >= action_count {
            return Err(ConfigError::StartIndexOutOfRange {
                index: config.start_index,
                len: action_count,
            }
            .into());
        }

        let machine = match mode {
            ActuationMode::Active => DecisionStateMachine::new(config.decision, action_count),
            ActuationMode::PerceptionOnly => {
                DecisionStateMachine::perception_only(config.decision, action_count)
            }
        };

        Ok(Self {
            scorer: UncertaintyEngine::new(config.uncertainty),
            smoother: TemporalSmoother::new(config.smoother)?,
            machine,
            state: ControllerState::initial(config.start_index),
            actuator,
            mode,
        })
    }

    /// Probe the actuator and pick the mode from the result
    pub fn with_probe(config: EngineConfig, mut actuator: A) -> DecisionResult<Self> {
        let mode = if actuator.probe_support() {
            log_info!("Actuator probe passed, exploration enabled");
            ActuationMode::Active
        } else {
            log_warn!("Actuator probe failed, running perception-only");
            ActuationMode::PerceptionOnly
        };
        Self::new(config, actuator, mode)
    }

    /// Apply the configured starting action
    ///
    /// Returns `None` in perception-only mode.
    pub fn start(&mut self) -> DecisionResult<Option<ActionCommand>> {
        if self.mode == ActuationMode::PerceptionOnly {
            return Ok(None);
        }
        let request = ActionRequest {
            index: self.state.current_action_index,
            kind: CommandKind::Initial,
        };
        self.issue(request).map(Some)
    }

    /// Process one frame
    ///
    /// `frame` may be `None` when the binding delivered nothing usable; it
    /// scores as an undetected frame. Errors are contract violations.
    pub fn tick(
        &mut self,
        frame: Option<&LumaFrame<'_>>,
        detection: &DetectionResult,
        brightness: f32,
        frame_count: u64,
    ) -> DecisionResult<TickReport> {
        let (raw, metrics) = self.scorer.compute(frame, detection);
        let smoothed = self.smoother.update(raw);

        let transition = self.machine.step(self.state, smoothed, brightness, frame_count)?;
        self.state = transition.state;

        let command_issued = match transition.request {
            Some(request) => Some(self.issue(request)?),
            None => None,
        };

        Ok(TickReport {
            frame_count,
            state: self.state.phase,
            raw_uncertainty: raw.value(),
            smoothed_uncertainty: smoothed,
            metrics,
            brightness,
            current_action_index: self.state.current_action_index,
            settling: self.state.is_settling(),
            command_issued,
        })
    }

    fn issue(&mut self, request: ActionRequest) -> DecisionResult<ActionCommand> {
        let value = self.actuator.action_space().get(request.index)?;
        let accepted = self.actuator.apply(request.index);
        if !accepted {
            log_warn!("Actuator rejected level {} ({})", request.index, value);
        }
        Ok(ActionCommand {
            index: request.index,
            value,
            kind: request.kind,
            accepted,
        })
    }

    /// Controller state after the last tick
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Active or perception-only
    pub fn mode(&self) -> ActuationMode {
        self.mode
    }

    /// State machine (ledger, suppressed trigger count)
    pub fn machine(&self) -> &DecisionStateMachine {
        &self.machine
    }

    /// Smoother state
    pub fn smoother(&self) -> &TemporalSmoother {
        &self.smoother
    }

    /// Borrow the actuator
    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    /// Mutably borrow the actuator
    pub fn actuator_mut(&mut self) -> &mut A {
        &mut self.actuator
    }

    /// Tear down, returning the actuator
    pub fn into_actuator(self) -> A {
        self.actuator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionSpace;

    /// Records every apply; optionally rejects writes
    struct RecordingActuator {
        space: ActionSpace,
        supported: bool,
        accept: bool,
        applied: Vec<usize>,
    }

    impl RecordingActuator {
        fn new() -> Self {
            Self {
                space: ActionSpace::default(),
                supported: true,
                accept: true,
                applied: Vec::new(),
            }
        }
    }

    impl Actuator for RecordingActuator {
        fn probe_support(&mut self) -> bool {
            self.supported
        }

        fn apply(&mut self, index: usize) -> bool {
            self.applied.push(index);
            self.accept
        }

        fn action_space(&self) -> &ActionSpace {
            &self.space
        }
    }

    fn sharp_frame(pixels: &mut [u8; 64 * 64]) -> LumaFrame<'_> {
        for y in 0..64 {
            for x in 0..64 {
                pixels[y * 64 + x] = if (x / 4 + y / 4) % 2 == 0 { 30 } else { 220 };
            }
        }
        LumaFrame::new(64, 64, pixels).unwrap()
    }

    #[test]
    fn start_applies_initial_level() {
        let mut engine =
            DecisionEngine::new(EngineConfig::default(), RecordingActuator::new(), ActuationMode::Active)
                .unwrap();
        let command = engine.start().unwrap().unwrap();
        assert_eq!(command.index, 2);
        assert_eq!(command.value, -6.0);
        assert_eq!(command.kind, CommandKind::Initial);
        assert_eq!(engine.actuator().applied, vec![2]);
    }

    #[test]
    fn start_index_must_exist() {
        let config = EngineConfig { start_index: 7, ..EngineConfig::default() };
        let result = DecisionEngine::new(config, RecordingActuator::new(), ActuationMode::Active);
        assert!(matches!(
            result,
            Err(crate::DecisionError::Config(ConfigError::StartIndexOutOfRange { index: 7, len: 7 }))
        ));
    }

    #[test]
    fn failed_probe_means_perception_only() {
        let mut actuator = RecordingActuator::new();
        actuator.supported = false;
        let mut engine = DecisionEngine::with_probe(EngineConfig::default(), actuator).unwrap();

        assert_eq!(engine.mode(), ActuationMode::PerceptionOnly);
        assert_eq!(engine.start().unwrap(), None);

        // Blind frames plus a big lighting jump would trigger in active mode
        engine.tick(None, &DetectionResult::none(), 100.0, 1).unwrap();
        let report = engine.tick(None, &DetectionResult::none(), 200.0, 2).unwrap();
        assert_eq!(report.state, Phase::Monitor);
        assert!(report.command_issued.is_none());
        assert!(engine.actuator().applied.is_empty());
        assert_eq!(engine.machine().suppressed_triggers(), 1);
    }

    #[test]
    fn full_episode_through_engine() {
        let mut engine =
            DecisionEngine::new(EngineConfig::default(), RecordingActuator::new(), ActuationMode::Active)
                .unwrap();
        let none = DetectionResult::none();

        engine.tick(None, &none, 100.0, 1).unwrap();
        let trigger = engine.tick(None, &none, 150.0, 2).unwrap();
        assert_eq!(trigger.state, Phase::Explore { step: 0 });
        assert!(trigger.command_issued.is_none());
        assert!(engine.actuator().applied.is_empty());

        let mut pixels = [0u8; 64 * 64];
        let frame = sharp_frame(&mut pixels);
        let good = DetectionResult::found(50_000.0, [3]);

        let mut last = trigger;
        for frame_count in 3..10 {
            last = engine.tick(Some(&frame), &good, 150.0, frame_count).unwrap();
        }

        assert_eq!(engine.machine().ledger().recorded(), 7);
        assert_eq!(last.state, Phase::Monitor);
        let commit = last.command_issued.unwrap();
        assert_eq!(commit.kind, CommandKind::Commit);
        assert_eq!(engine.state().current_action_index, commit.index);
        assert_eq!(engine.state().ignore_until_frame, 9 + 10);
        assert!(last.settling);
        // probes 1..=6, then the commit
        let applied = &engine.actuator().applied;
        assert_eq!(applied[..6], [1, 2, 3, 4, 5, 6]);
        assert_eq!(applied.len(), 7);
        assert_eq!(applied[6], commit.index);
    }

    #[test]
    fn rejected_write_is_reported_not_fatal() {
        let mut actuator = RecordingActuator::new();
        actuator.accept = false;
        let mut engine =
            DecisionEngine::new(EngineConfig::default(), actuator, ActuationMode::Active).unwrap();

        let command = engine.start().unwrap().unwrap();
        assert!(!command.accepted);

        let none = DetectionResult::none();
        engine.tick(None, &none, 100.0, 1).unwrap();
        let trigger = engine.tick(None, &none, 150.0, 2).unwrap();
        assert!(trigger.state != Phase::Monitor);
        let report = engine.tick(None, &none, 150.0, 3).unwrap();
        let probe = report.command_issued.unwrap();
        assert_eq!(probe.index, 1);
        assert!(!probe.accepted);
        assert_eq!(report.state, Phase::Explore { step: 1 });
    }
}
