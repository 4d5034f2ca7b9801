//! Simulated camera
//!
//! Two handles over one shared [`SceneState`]: [`SimulatedCamera`] is the
//! frame [`Sensor`], [`SimulatedExposure`] the writable exposure property.
//! The loop is single-threaded, so the state lives in an `Rc<RefCell<_>>`.

use std::{cell::RefCell, rc::Rc};

use image::GrayImage;
use lumaguard_core::{AsLuma, LumaFrame, Sensor, SensorError, TickReport};

use crate::{actuator::ExposureControl, hud::Hud};

use super::scene::{LightingSchedule, SceneState};

/// Frame captured by the simulated camera
#[derive(Debug, Clone)]
pub struct CapturedFrame(pub GrayImage);

impl AsLuma for CapturedFrame {
    fn as_luma(&self) -> LumaFrame<'_> {
        let (width, height) = self.0.dimensions();
        LumaFrame::new(width, height, self.0.as_raw()).unwrap_or(LumaFrame::empty())
    }
}

/// Frame source over a lit scene
pub struct SimulatedCamera {
    scene: Rc<RefCell<SceneState>>,
    schedule: LightingSchedule,
    hud: Hud,
    frames: u64,
    end_after: Option<u64>,
    disconnect_at: Option<u64>,
    stalls_per_frame: u32,
    pending_stalls: u32,
    ended: bool,
    displayed: u64,
    last_view: Option<GrayImage>,
}

impl SimulatedCamera {
    pub fn new(width: u32, height: u32, initial_exposure: f32, schedule: LightingSchedule) -> Self {
        Self {
            scene: Rc::new(RefCell::new(SceneState::new(width, height, initial_exposure))),
            schedule,
            hud: Hud::default(),
            frames: 0,
            end_after: None,
            disconnect_at: None,
            stalls_per_frame: 0,
            pending_stalls: 0,
            ended: false,
            displayed: 0,
            last_view: None,
        }
    }

    /// Report end-of-stream after `frames` frames
    pub fn end_after(mut self, frames: u64) -> Self {
        self.end_after = Some(frames);
        self
    }

    /// Fail with a disconnect instead of delivering frame `frame`
    pub fn disconnect_at(mut self, frame: u64) -> Self {
        self.disconnect_at = Some(frame);
        self
    }

    /// Answer `WouldBlock` this many times before each frame
    pub fn with_stalls(mut self, stalls_per_frame: u32) -> Self {
        self.stalls_per_frame = stalls_per_frame;
        self.pending_stalls = stalls_per_frame;
        self
    }

    /// Accept exposure writes but never act on them
    pub fn with_locked_exposure(self) -> Self {
        self.scene.borrow_mut().ignores_writes = true;
        self
    }

    /// Writable exposure property sharing this camera's scene
    pub fn exposure_control(&self) -> SimulatedExposure {
        SimulatedExposure {
            scene: Rc::clone(&self.scene),
        }
    }

    /// Snapshot of the shared scene
    pub fn scene(&self) -> SceneState {
        self.scene.borrow().clone()
    }

    /// Frames delivered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Frames shown through [`Sensor::display`]
    pub fn displayed(&self) -> u64 {
        self.displayed
    }

    /// Last annotated view
    pub fn last_view(&self) -> Option<&GrayImage> {
        self.last_view.as_ref()
    }
}

impl Sensor for SimulatedCamera {
    type Frame = CapturedFrame;

    fn read(&mut self) -> nb::Result<CapturedFrame, SensorError> {
        if self.ended {
            return Err(nb::Error::Other(SensorError::EndOfStream));
        }

        let next = self.frames + 1;
        if self.disconnect_at == Some(next) {
            return Err(nb::Error::Other(SensorError::Disconnected {
                reason: "simulated cable pull",
            }));
        }
        if self.end_after.map_or(false, |limit| next > limit) {
            self.ended = true;
            return Err(nb::Error::Other(SensorError::EndOfStream));
        }
        if self.pending_stalls > 0 {
            self.pending_stalls -= 1;
            return Err(nb::Error::WouldBlock);
        }

        self.pending_stalls = self.stalls_per_frame;
        self.frames = next;

        let mut scene = self.scene.borrow_mut();
        scene.ambient = self.schedule.ambient_at(next);
        Ok(CapturedFrame(scene.render()))
    }

    fn display(&mut self, frame: &CapturedFrame, report: &TickReport) {
        let mut view = frame.0.clone();
        self.hud.annotate(&mut view, report);
        self.last_view = Some(view);
        self.displayed += 1;
    }

    fn release(&mut self) {
        self.scene.borrow_mut().released = true;
        log::info!("Simulated camera released after {} frames", self.frames);
    }
}

/// Exposure property of a [`SimulatedCamera`]
#[derive(Clone)]
pub struct SimulatedExposure {
    scene: Rc<RefCell<SceneState>>,
}

impl SimulatedExposure {
    /// Exposure currently in effect
    pub fn exposure(&self) -> f32 {
        self.scene.borrow().exposure
    }

    /// Writes received, including ignored ones
    pub fn writes(&self) -> u32 {
        self.scene.borrow().writes
    }
}

impl ExposureControl for SimulatedExposure {
    fn read_exposure(&mut self) -> f32 {
        self.scene.borrow().exposure
    }

    fn write_exposure(&mut self, value: f32) -> bool {
        let mut scene = self.scene.borrow_mut();
        scene.writes += 1;
        if !scene.ignores_writes {
            scene.exposure = value;
        }
        true
    }
}
