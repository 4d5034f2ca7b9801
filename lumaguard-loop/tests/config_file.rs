//! Loading loop configuration from disk

mod common;

use std::io::Write;

use lumaguard_core::ConfigError;
use lumaguard_loop::{
    sim::{simulated_loop, SimulatedCamera},
    LoopConfig, LoopError, NeverStop, StopReason,
};
use tempfile::NamedTempFile;

use common::{dimming_room, HEIGHT, WIDTH};

fn write_config(json: &str) -> anyhow::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(json.as_bytes())?;
    file.flush()?;
    Ok(file)
}

#[test]
fn test_run_from_config_file() -> anyhow::Result<()> {
    let file = write_config(
        r#"{
            "engine": {
                "smoother": { "window": 1 },
                "decision": { "settling_frames": 5 }
            },
            "settle_delay_ms": 0,
            "probe_wait_ms": 0,
            "max_frames": 60
        }"#,
    )?;

    let config = LoopConfig::from_path(file.path())?;
    assert_eq!(config.engine.decision.settling_frames, 5);
    assert_eq!(config.action_levels.len(), 7);

    let mut camera = SimulatedCamera::new(WIDTH, HEIGHT, -6.0, dimming_room());
    let mut control = simulated_loop(&config, &camera)?;
    let summary = control.run(&mut camera, &mut NeverStop)?;

    assert_eq!(summary.stop_reason, StopReason::FrameLimit);
    assert_eq!(summary.commits.len(), 1);
    // Trigger 31, sweep 32..=38, settle 5 frames
    assert_eq!(control.engine().state().ignore_until_frame, 38 + 5);
    Ok(())
}

#[test]
fn test_custom_ladder() -> anyhow::Result<()> {
    let file = write_config(
        r#"{ "action_levels": [-7, -5, -3], "engine": { "start_index": 1 }, "settle_delay_ms": 0, "probe_wait_ms": 0 }"#,
    )?;
    let config = LoopConfig::from_path(file.path())?;
    let space = config.action_space()?;
    assert_eq!(space.levels(), &[-7.0, -5.0, -3.0]);
    assert_eq!(config.engine.start_index, 1);
    Ok(())
}

#[test]
fn test_invalid_file_contents() -> anyhow::Result<()> {
    let file = write_config(r#"{ "engine": { "smoother": { "window": 0 } } }"#)?;
    let err = LoopConfig::from_path(file.path()).unwrap_err();
    assert!(matches!(err, LoopError::Config(ConfigError::InvalidWindow { window: 0, .. })));
    Ok(())
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = LoopConfig::from_path(&path).unwrap_err();
    match err {
        LoopError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
}
