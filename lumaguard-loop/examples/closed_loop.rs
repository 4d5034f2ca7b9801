//! Closed-loop exposure control against a simulated room
//!
//! The lights drop to an eighth at frame 60 and come back at frame 200. Each
//! change leaves the marker undetectable at the current exposure, so the
//! controller sweeps the ladder and settles on a new level.
//!
//! ```text
//! cargo run -p lumaguard-loop --example closed_loop
//! cargo run -p lumaguard-loop --example closed_loop -- path/to/config.json
//! RUST_LOG=debug cargo run -p lumaguard-loop --example closed_loop
//! ```

use anyhow::{Context, Result};
use lumaguard_loop::{
    sim::{simulated_loop, LightingSchedule, SimulatedCamera},
    LoopConfig, ManualStop,
};

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => LoopConfig::from_path(&path).with_context(|| format!("loading {}", path))?,
        None => LoopConfig {
            settle_delay_ms: 0,
            probe_wait_ms: 0,
            max_frames: Some(320),
            ..LoopConfig::default()
        },
    };

    let schedule = LightingSchedule::constant(32.0).then(60, 4.0).then(200, 32.0);
    let mut camera = SimulatedCamera::new(320, 240, -6.0, schedule);
    let exposure = camera.exposure_control();

    let mut control = simulated_loop(&config, &camera)?;
    let summary = control.run(&mut camera, &mut ManualStop::new())?;

    println!("\nRun summary");
    println!("===========");
    println!("Frames:     {}", summary.frames);
    println!("Mode:       {:?}", summary.mode);
    println!("Episodes:   {}", summary.episodes);
    for commit in &summary.commits {
        println!("  committed level {} (exposure {})", commit.index, commit.value);
    }
    println!("Exposure:   {}", exposure.exposure());
    println!("Stopped by: {:?}", summary.stop_reason);
    Ok(())
}
