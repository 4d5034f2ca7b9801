//! Shared fixtures for loop integration tests

#![allow(dead_code)]

use lumaguard_core::SmootherConfig;
use lumaguard_loop::{sim::LightingSchedule, LoopConfig};

pub const WIDTH: u32 = 160;
pub const HEIGHT: u32 = 120;

/// Frame at which the lights drop
pub const DIM_AT: u64 = 31;

/// Mid-grey at the start level, then an eighth of the light from `DIM_AT`
pub fn dimming_room() -> LightingSchedule {
    LightingSchedule::constant(32.0).then(DIM_AT, 4.0)
}

/// No pauses, single-frame smoothing so each probe is scored on its own frame
pub fn fast_config(max_frames: u64) -> LoopConfig {
    let mut config = LoopConfig::headless();
    config.engine.smoother = SmootherConfig { window: 1 };
    config.max_frames = Some(max_frames);
    config
}

/// Route `log` output through the test harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
