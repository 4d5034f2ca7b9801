//! MONITOR/EXPLORE Decision State Machine
//!
//! ## States
//!
//! ```text
//!              smoothed > trigger AND lighting shifted
//!   ┌─────────┐ ─────────────────────────────────────▶ ┌─────────┐
//!   │ MONITOR │                                        │ EXPLORE │ ◀─┐ probe step+1
//!   └─────────┘ ◀───────────────────────────────────── └─────────┘ ──┘
//!                 sweep complete: commit winner,
//!                 settle for N frames, re-learn baseline
//! ```
//!
//! MONITOR is initial; there is no terminal state.
//!
//! ## MONITOR
//!
//! 1. Inside the stabilisation gate (`frame_count < ignore_until_frame`) the
//!    tick is ignored.
//! 2. With no baseline, the current brightness becomes the baseline.
//! 3. `env_changed = |b - baseline| > max(baseline × ratio, floor)`.
//! 4. Exploration starts only when the smoothed uncertainty exceeds the
//!    trigger **and** the environment changed. A scene that is hard but
//!    stable never triggers, so the controller cannot loop forever on it.
//!
//! ## EXPLORE
//!
//! One action per tick: record the score for the current step, advance, and
//! either probe the next action or resolve the ledger and commit. The trigger
//! itself issues nothing, so step 0 is scored at whatever setting was in
//! effect when the sweep began.
//!
//! The machine never talks to hardware. Each transition returns the action
//! it wants applied and the [`DecisionEngine`](crate::DecisionEngine) issues
//! it.

use crate::{
    action::CommandKind,
    config::DecisionConfig,
    errors::{DecisionError, DecisionResult},
    ledger::ExplorationLedger,
};

/// Controller mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Watching uncertainty and brightness
    Monitor,
    /// Sweeping the action space; `step` is the action being measured
    Explore {
        /// Index whose score is recorded on the next tick
        step: usize,
    },
}

impl Phase {
    /// Short label for displays
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Monitor => "MONITOR",
            Phase::Explore { .. } => "EXPLORE",
        }
    }
}

/// Brightness the controller last stabilised around
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnvironmentBaseline {
    brightness_reference: Option<f32>,
}

/// Outcome of comparing a brightness sample against the baseline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrightnessShift {
    /// `|brightness - baseline|`
    pub diff: f32,
    /// `max(baseline × ratio, floor)`
    pub threshold: f32,
    /// `diff > threshold`
    pub changed: bool,
}

impl EnvironmentBaseline {
    /// No reference yet
    pub const fn unset() -> Self {
        Self { brightness_reference: None }
    }

    /// Reference brightness, if captured
    pub fn reference(&self) -> Option<f32> {
        self.brightness_reference
    }

    /// True once a reference was captured
    pub fn is_set(&self) -> bool {
        self.brightness_reference.is_some()
    }

    /// Adopt `brightness` as normal
    pub fn capture(&mut self, brightness: f32) {
        self.brightness_reference = Some(brightness);
    }

    /// Forget the reference
    pub fn clear(&mut self) {
        self.brightness_reference = None;
    }

    /// Compare against the reference; `None` when unset
    ///
    /// The floor keeps the threshold meaningful near zero brightness.
    pub fn shift(&self, brightness: f32, ratio: f32, floor: f32) -> Option<BrightnessShift> {
        let reference = self.brightness_reference?;
        let diff = libm::fabsf(brightness - reference);
        let threshold = (reference * ratio).max(floor);
        Some(BrightnessShift {
            diff,
            threshold,
            changed: diff > threshold,
        })
    }
}

/// Complete controller state, owned by value and replaced every tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerState {
    /// Current mode
    pub phase: Phase,
    /// Action last committed
    pub current_action_index: usize,
    /// Frame number of the last processed tick
    pub frame_count: u64,
    /// MONITOR ignores ticks before this frame
    pub ignore_until_frame: u64,
    /// Lighting reference
    pub baseline: EnvironmentBaseline,
}

impl ControllerState {
    /// MONITOR, no baseline, no gate
    pub fn initial(current_action_index: usize) -> Self {
        Self {
            phase: Phase::Monitor,
            current_action_index,
            frame_count: 0,
            ignore_until_frame: 0,
            baseline: EnvironmentBaseline::unset(),
        }
    }

    /// True while in EXPLORE
    pub fn is_exploring(&self) -> bool {
        matches!(self.phase, Phase::Explore { .. })
    }

    /// True while the stabilisation gate suppresses MONITOR
    pub fn is_settling(&self) -> bool {
        self.frame_count < self.ignore_until_frame
    }
}

/// Action the machine wants applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionRequest {
    /// Index into the action space
    pub index: usize,
    /// Probe or commit
    pub kind: CommandKind,
}

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// State after the tick
    pub state: ControllerState,
    /// Action to issue, if any
    pub request: Option<ActionRequest>,
}

impl Transition {
    fn hold(state: ControllerState) -> Self {
        Self { state, request: None }
    }

    fn with_request(state: ControllerState, index: usize, kind: CommandKind) -> Self {
        Self {
            state,
            request: Some(ActionRequest { index, kind }),
        }
    }
}

/// Transition logic plus the exploration ledger it owns
#[derive(Debug, Clone)]
pub struct DecisionStateMachine {
    config: DecisionConfig,
    ledger: ExplorationLedger,
    action_count: usize,
    exploration_enabled: bool,
    suppressed_triggers: u32,
}

impl DecisionStateMachine {
    /// Machine for an action space of `action_count` entries
    pub fn new(config: DecisionConfig, action_count: usize) -> Self {
        Self {
            config,
            ledger: ExplorationLedger::with_epsilon(action_count, config.tie_epsilon),
            action_count,
            exploration_enabled: true,
            suppressed_triggers: 0,
        }
    }

    /// Machine that watches but never explores
    ///
    /// Used when the actuator failed its capability probe. Triggers are
    /// counted and logged, and the new lighting is adopted as baseline so
    /// the same shift is not reported on every frame.
    pub fn perception_only(config: DecisionConfig, action_count: usize) -> Self {
        Self {
            exploration_enabled: false,
            ..Self::new(config, action_count)
        }
    }

    /// Advance one tick
    ///
    /// Takes the state by value and returns its successor together with the
    /// action to issue. Errors are contract violations only.
    pub fn step(
        &mut self,
        mut state: ControllerState,
        smoothed: f32,
        brightness: f32,
        frame_count: u64,
    ) -> DecisionResult<Transition> {
        state.frame_count = frame_count;
        match state.phase {
            Phase::Monitor => Ok(self.on_monitor(state, smoothed, brightness)),
            Phase::Explore { step } => self.on_explore(state, step, smoothed),
        }
    }

    fn on_monitor(&mut self, mut state: ControllerState, smoothed: f32, brightness: f32) -> Transition {
        if state.is_settling() {
            return Transition::hold(state);
        }
        if !brightness.is_finite() {
            log_warn!("Ignoring non-finite brightness sample");
            return Transition::hold(state);
        }

        let c = &self.config;
        let shift = match state.baseline.shift(brightness, c.brightness_change_ratio, c.brightness_change_floor) {
            Some(shift) => shift,
            None => {
                state.baseline.capture(brightness);
                log_info!("Baseline brightness set: {:.1}", brightness);
                return Transition::hold(state);
            }
        };

        if shift.changed {
            log_info!(
                "Lighting changed: diff {:.1} vs threshold {:.1} (baseline {:.1})",
                shift.diff,
                shift.threshold,
                state.baseline.reference().unwrap_or_default()
            );
        }

        if !(smoothed > c.trigger_threshold && shift.changed) {
            return Transition::hold(state);
        }

        if !self.exploration_enabled {
            self.suppressed_triggers = self.suppressed_triggers.saturating_add(1);
            log_warn!(
                "Exploration suppressed (no actuation), uncertainty {:.2}; adopting brightness {:.1}",
                smoothed,
                brightness
            );
            state.baseline.capture(brightness);
            return Transition::hold(state);
        }

        log_info!("Triggering EXPLORE (uncertainty {:.2})", smoothed);
        state.phase = Phase::Explore { step: 0 };
        state.baseline.clear();
        self.ledger.reset();
        Transition::hold(state)
    }

    fn on_explore(&mut self, mut state: ControllerState, step: usize, smoothed: f32) -> DecisionResult<Transition> {
        if step >= self.action_count {
            return Err(DecisionError::ActionIndexOutOfRange {
                index: step,
                len: self.action_count,
            });
        }

        self.ledger.record(step, smoothed)?;
        log_debug!("Probe level {}: uncertainty {:.2}", step, smoothed);

        let next = step + 1;
        if next < self.action_count {
            state.phase = Phase::Explore { step: next };
            return Ok(Transition::with_request(state, next, CommandKind::Probe));
        }

        let winner = self.ledger.resolve()?;
        log_info!(
            "Exploration done: level {} (uncertainty {:.2})",
            winner,
            self.ledger.get(winner).unwrap_or_default()
        );

        state.phase = Phase::Monitor;
        state.current_action_index = winner;
        state.baseline.clear();
        state.ignore_until_frame = state.frame_count + self.config.settling_frames;
        Ok(Transition::with_request(state, winner, CommandKind::Commit))
    }

    /// Ledger of the current or last episode
    pub fn ledger(&self) -> &ExplorationLedger {
        &self.ledger
    }

    /// Number of actions swept per episode
    pub fn action_count(&self) -> usize {
        self.action_count
    }

    /// False in perception-only mode
    pub fn exploration_enabled(&self) -> bool {
        self.exploration_enabled
    }

    /// Triggers swallowed in perception-only mode
    pub fn suppressed_triggers(&self) -> u32 {
        self.suppressed_triggers
    }

    /// Active parameters
    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }
}
