//! Loop Configuration
//!
//! Everything the driver needs besides the hardware bindings. Loaded from a
//! JSON document; every field is optional and falls back to its default:
//!
//! ```json
//! {
//!   "engine": { "decision": { "settling_frames": 20 } },
//!   "action_levels": [-8, -7, -6, -5, -4, -3, -2],
//!   "settle_delay_ms": 100,
//!   "probe_wait_ms": 500,
//!   "max_frames": null
//! }
//! ```

use std::{fs, path::Path, time::Duration};

use lumaguard_core::{
    constants::DEFAULT_EXPOSURE_LEVELS, ActionSpace, ConfigError, EngineConfig,
};
use serde::{Deserialize, Serialize};

use crate::error::{LoopError, LoopResult};

/// Default pause after a physical command, in milliseconds
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 100;

/// Default wait between the probe write and its read-back
pub const DEFAULT_PROBE_WAIT_MS: u64 = 500;

/// Driver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    /// Decision engine parameters
    pub engine: EngineConfig,
    /// Exposure ladder, darkest first
    pub action_levels: Vec<f32>,
    /// Pause after each accepted command so the device can react
    pub settle_delay_ms: u64,
    /// Wait inside the startup capability probe
    pub probe_wait_ms: u64,
    /// Stop after this many frames
    pub max_frames: Option<u64>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            action_levels: DEFAULT_EXPOSURE_LEVELS.to_vec(),
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            probe_wait_ms: DEFAULT_PROBE_WAIT_MS,
            max_frames: None,
        }
    }
}

impl LoopConfig {
    /// No pauses; for simulation and tests
    pub fn headless() -> Self {
        Self {
            settle_delay_ms: 0,
            probe_wait_ms: 0,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> LoopResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> LoopResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| LoopError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check the engine section, the ladder and the start index together
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        let space = self.action_space()?;
        if self.engine.start_index >= space.len() {
            return Err(ConfigError::StartIndexOutOfRange {
                index: self.engine.start_index,
                len: space.len(),
            });
        }
        Ok(())
    }

    /// Ladder built from `action_levels`
    pub fn action_space(&self) -> Result<ActionSpace, ConfigError> {
        ActionSpace::new(&self.action_levels)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn probe_wait(&self) -> Duration {
        Duration::from_millis(self.probe_wait_ms)
    }
}
