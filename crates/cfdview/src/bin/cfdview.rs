//! # CFDVIEW Headless Viewer
//!
//! Runs the reference channel-flow engine through the scheduler, painting
//! into an in-memory raster, and optionally writes the last frame as PNG.
//!
//! ```bash
//! # 300 frames with default settings, final frame to disk
//! cfdview --frames 300 --output flow.png
//!
//! # Custom config, more logging
//! RUST_LOG=cfdview=debug cfdview --config cfdview.toml
//! ```

use std::path::PathBuf;

use anyhow::Context;
use cfdview::{Scheduler, ThreadHost, TracingSink, ViewerConfig};
use cfdview_core::Grid;
use cfdview_rendering::{CanvasGeometry, PixelBuffer, Rgb};
use cfdview_sim::ChannelFlow;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "cfdview", version, about = "Headless viewer for the reference channel-flow engine")]
struct Args {
    /// TOML config file (defaults apply when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// stop after this many frames
    #[arg(long)]
    frames: Option<u64>,

    /// target frames per second
    #[arg(long)]
    fps: Option<f64>,

    /// write the final frame to this PNG file
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cfdview=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ViewerConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ViewerConfig::default(),
    };
    if let Some(frames) = args.frames {
        config.max_frames = Some(frames);
    }
    if let Some(fps) = args.fps {
        config.target_fps = fps;
    }
    config.validate()?;

    let engine = ChannelFlow::new(config.engine.clone()).context("building engine")?;
    let grid = Grid::new(config.engine.width, config.engine.height)?;
    let geometry = CanvasGeometry::new(grid, config.cell_size)?;
    let surface = PixelBuffer::new(geometry.surface_width(), geometry.surface_height(), Rgb::WHITE);

    tracing::info!(
        width = config.engine.width,
        height = config.engine.height,
        fps = config.target_fps,
        max_frames = ?config.max_frames,
        "starting viewer"
    );

    let mut scheduler = Scheduler::new(engine, surface, TracingSink, config.scheduler_settings())?;
    let mut host = config
        .display_refresh()
        .map_or_else(ThreadHost::new, ThreadHost::with_refresh);
    let stats = scheduler.run(&mut host)?;

    tracing::info!(
        ticks = stats.total_ticks,
        late = stats.late_ticks,
        avg_tick_us = stats.avg_tick_us,
        max_tick_us = stats.max_tick_us,
        "viewer stopped"
    );

    if let Some(output) = &args.output {
        scheduler
            .surface()
            .save_png(output)
            .with_context(|| format!("writing {}", output.display()))?;
        tracing::info!(path = %output.display(), "final frame written");
    }

    Ok(())
}
