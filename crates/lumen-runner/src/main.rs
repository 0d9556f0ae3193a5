//! Headless simulation runner
//!
//! Runs the particle simulation without a window and logs what each frame
//! produced. Configuration comes from `LUMEN_CONFIG` / `LUMEN_*` (see
//! `lumen_sim::SimConfig`), plus:
//!
//! - `LUMEN_FRAMES` - number of frames to run (default 600)
//! - `RUST_LOG` - log filter, e.g. `lumen_runner=debug,lumen_tick=debug`

use std::time::{Duration, Instant};

use lumen_sim::{SimConfig, Simulation};
use lumen_tick::FrameStats;
use tracing::{debug, info};

const DEFAULT_FRAMES: u64 = 600;
const FRAME_DT: f32 = 1.0 / 60.0;

#[derive(Default)]
struct Totals {
    edges: u64,
    parallel_frames: u64,
    busy: Duration,
    slowest: Duration,
}

impl Totals {
    fn record(&mut self, stats: &FrameStats, elapsed: Duration) {
        self.edges += stats.edges as u64;
        self.parallel_frames += u64::from(stats.path.is_parallel());
        self.busy += elapsed;
        self.slowest = self.slowest.max(elapsed);
    }
}

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lumen_runner=info".parse()?)
                .add_directive("lumen_sim=info".parse()?),
        )
        .init();

    let config = SimConfig::from_env()?;
    let frames: u64 = std::env::var("LUMEN_FRAMES")
        .ok()
        .and_then(|f| f.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);

    info!(?config, frames, "starting headless run");

    let mut sim = Simulation::new(config)?;
    let mut totals = Totals::default();

    for frame in 0..frames {
        let start = Instant::now();
        let stats = sim.frame(FRAME_DT);
        let elapsed = start.elapsed();
        totals.record(&stats, elapsed);

        debug!(
            frame,
            path = %stats.path,
            edges = stats.edges,
            weight_sum = stats.weight_sum,
            micros = elapsed.as_micros() as u64,
            "frame"
        );
    }

    let per_frame = totals.busy.checked_div(frames as u32).unwrap_or_default();
    info!(
        frames,
        parallel_frames = totals.parallel_frames,
        mean_edges = totals.edges.checked_div(frames).unwrap_or(0),
        mean_frame_us = per_frame.as_micros() as u64,
        slowest_frame_us = totals.slowest.as_micros() as u64,
        "run complete"
    );

    Ok(())
}
