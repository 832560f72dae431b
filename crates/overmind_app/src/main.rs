//! # overmind_app: scenario driver
//!
//! Runs the production scheduler frame by frame against a scripted
//! scenario, standing in for the game engine and the strategy layer.
//! Directives are logged instead of sent to units.
//!
//! ## Startup Sequence
//!
//! 1. Parse the command line and initialise logging.
//! 2. Load and validate the scenario file.
//! 3. Run the frame loop, paced to the frame rate unless `--unpaced`.

mod scenario;
mod tick;

use std::path::PathBuf;

use anyhow::{Result, ensure};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use scenario::Scenario;
use tick::{TickConfig, TickLoop};

#[derive(Parser)]
#[command(name = "overmind_app", about = "Production scheduler scenario driver")]
struct Args {
    /// Path to the scenario JSON file
    #[arg(default_value = "scenarios/nine_pool.json")]
    scenario: PathBuf,

    /// Frames per second when paced
    #[arg(short, long, default_value_t = 24.0)]
    frame_rate: f64,

    /// Frames to run; defaults to just past the last scripted event
    #[arg(short, long)]
    max_frames: Option<u32>,

    /// Run frames back to back instead of at the frame rate
    #[arg(long)]
    unpaced: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("overmind_app=info".parse()?))
        .init();

    let args = Args::parse();
    ensure!(
        args.frame_rate.is_finite() && args.frame_rate > 0.0,
        "frame rate must be positive, got {}",
        args.frame_rate
    );

    info!(path = %args.scenario.display(), "loading scenario");
    let scenario = Scenario::load(&args.scenario)?;
    info!(
        actors = scenario.actors.len(),
        events = scenario.events.len(),
        submissions = scenario.submissions(),
        morph_routes = scenario.morphs.len(),
        "scenario loaded"
    );

    let config = TickConfig {
        frame_rate: args.frame_rate,
        max_frames: args
            .max_frames
            .unwrap_or_else(|| scenario.last_frame().saturating_add(1)),
    };
    let mut tick_loop = TickLoop::new(config, scenario)?;

    if args.unpaced {
        tick_loop.run()?;
    } else {
        tick_loop.run_paced().await?;
    }

    let world = tick_loop.world();
    info!(
        frames = tick_loop.frame(),
        bound_actors = world.bindings().len(),
        "driver shut down"
    );
    Ok(())
}
