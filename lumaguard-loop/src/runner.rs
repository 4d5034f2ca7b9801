//! Closed-loop driver
//!
//! ## Tick Order
//!
//! ```text
//! stop? ─▶ read ─▶ detect ─▶ brightness ─▶ engine.tick ─▶ visualize ─▶ display ─▶ settle
//! ```
//!
//! One frame per iteration, single-threaded. The sensor is borrowed through
//! a [`SensorGuard`] so it is released on every exit path: a stop request,
//! end of stream, a fatal error, or a panic unwinding through the loop.
//! A loop runs once. The released sensor is never read again.
//!
//! ## Exit Conditions
//!
//! | Cause | Result |
//! |-------|--------|
//! | [`StopSignal`] raised | `Ok`, [`StopReason::Requested`] |
//! | `max_frames` reached | `Ok`, [`StopReason::FrameLimit`] |
//! | `SensorError::EndOfStream` | `Ok`, [`StopReason::EndOfStream`] |
//! | other sensor error | `Err(LoopError::Sensor)` |
//! | engine contract violation | `Err(LoopError::Decision)` |
//! | second call to `run` | `Err(LoopError::AlreadyRun)` |

use std::{
    ops::{Deref, DerefMut},
    thread,
    time::Duration,
};

use lumaguard_core::{
    ActionCommand, ActuationMode, Actuator, AsLuma, CommandKind, DecisionEngine, Detector, Phase,
    Sensor, SensorError, TickReport,
};

use crate::{config::LoopConfig, error::{LoopError, LoopResult}, hud::Hud, stop::StopSignal};

/// Why a run ended without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Requested,
    FrameLimit,
    EndOfStream,
}

/// What happened during a run
#[derive(Debug, Clone, PartialEq)]
pub struct LoopSummary {
    pub frames: u64,
    /// EXPLORE episodes started
    pub episodes: u32,
    /// Sweep winners, in order
    pub commits: Vec<ActionCommand>,
    /// Commands the actuator refused
    pub rejected_commands: u32,
    pub final_action_index: usize,
    pub mode: ActuationMode,
    pub suppressed_triggers: u32,
    pub stop_reason: StopReason,
    pub last_report: Option<TickReport>,
}

/// Borrow of a sensor that releases it when dropped
pub struct SensorGuard<'a, S: Sensor> {
    sensor: &'a mut S,
}

impl<'a, S: Sensor> SensorGuard<'a, S> {
    pub fn new(sensor: &'a mut S) -> Self {
        Self { sensor }
    }
}

impl<S: Sensor> Deref for SensorGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.sensor
    }
}

impl<S: Sensor> DerefMut for SensorGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.sensor
    }
}

impl<S: Sensor> Drop for SensorGuard<'_, S> {
    fn drop(&mut self) {
        self.sensor.release();
    }
}

/// Decision engine plus detector, driven one frame at a time
pub struct ControlLoop<A: Actuator, D> {
    engine: DecisionEngine<A>,
    detector: D,
    settle_delay: Duration,
    max_frames: Option<u64>,
    frame_count: u64,
    episodes: u32,
    commits: Vec<ActionCommand>,
    rejected_commands: u32,
    ran: bool,
}

impl<A: Actuator, D> ControlLoop<A, D> {
    /// Probe the actuator, build the engine and apply the start level
    pub fn new(config: &LoopConfig, actuator: A, detector: D) -> LoopResult<Self> {
        config.validate()?;
        let engine = DecisionEngine::with_probe(config.engine, actuator)?;

        let mut control = Self {
            engine,
            detector,
            settle_delay: config.settle_delay(),
            max_frames: config.max_frames,
            frame_count: 0,
            episodes: 0,
            commits: Vec::new(),
            rejected_commands: 0,
            ran: false,
        };

        if let Some(command) = control.engine.start()? {
            log::info!("Start level {} ({})", command.index, command.value);
            control.after_command(&command);
        }
        Ok(control)
    }

    /// Run until stopped, out of frames, or failed
    ///
    /// The sensor is released when this returns, so a loop runs at most
    /// once. Later calls fail with [`LoopError::AlreadyRun`] without
    /// touching the sensor.
    pub fn run<S, T>(&mut self, sensor: &mut S, stop: &mut T) -> LoopResult<LoopSummary>
    where
        S: Sensor,
        D: Detector<S::Frame>,
        T: StopSignal + ?Sized,
    {
        if self.ran {
            return Err(LoopError::AlreadyRun);
        }
        self.ran = true;

        log::info!("Control loop started ({:?})", self.engine.mode());
        let mut sensor = SensorGuard::new(sensor);
        let mut last_report = None;

        let stop_reason = loop {
            if stop.should_stop() {
                break StopReason::Requested;
            }
            if self.max_frames.map_or(false, |limit| self.frame_count >= limit) {
                break StopReason::FrameLimit;
            }

            let frame = match sensor.read() {
                Ok(frame) => frame,
                Err(nb::Error::WouldBlock) => {
                    thread::yield_now();
                    continue;
                }
                Err(nb::Error::Other(SensorError::EndOfStream)) => break StopReason::EndOfStream,
                Err(nb::Error::Other(e)) => {
                    log::error!("Sensor failed after {} frames: {}", self.frame_count, e);
                    return Err(e.into());
                }
            };

            self.frame_count += 1;
            last_report = Some(self.process(&mut *sensor, &frame)?);
        };

        log::info!("Control loop stopped: {:?} after {} frames", stop_reason, self.frame_count);
        Ok(LoopSummary {
            frames: self.frame_count,
            episodes: self.episodes,
            commits: self.commits.clone(),
            rejected_commands: self.rejected_commands,
            final_action_index: self.engine.state().current_action_index,
            mode: self.engine.mode(),
            suppressed_triggers: self.engine.machine().suppressed_triggers(),
            stop_reason,
            last_report,
        })
    }

    fn process<S>(&mut self, sensor: &mut S, frame: &S::Frame) -> LoopResult<TickReport>
    where
        S: Sensor,
        D: Detector<S::Frame>,
    {
        let detection = self.detector.detect(frame);
        let brightness = sensor.current_brightness(frame);
        let luma = frame.as_luma();
        let luma = (!luma.is_empty()).then_some(&luma);

        let report = self
            .engine
            .tick(luma, &detection, brightness, self.frame_count)
            .map_err(|e| {
                log::error!("Decision engine stopped at frame {}: {}", self.frame_count, e);
                e
            })?;

        self.detector.visualize(frame, &detection);
        sensor.display(frame, &report);
        log::debug!("{}", Hud::status_line(&report));

        if report.state == (Phase::Explore { step: 0 }) {
            self.episodes += 1;
        }
        if let Some(command) = report.command_issued {
            if command.kind == CommandKind::Commit {
                self.commits.push(command);
            }
            self.after_command(&command);
        }
        Ok(report)
    }

    /// Count refusals and give the device time to react
    fn after_command(&mut self, command: &ActionCommand) {
        if !command.accepted {
            self.rejected_commands += 1;
            return;
        }
        if !self.settle_delay.is_zero() {
            thread::sleep(self.settle_delay);
        }
    }

    pub fn engine(&self) -> &DecisionEngine<A> {
        &self.engine
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Frames processed so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
