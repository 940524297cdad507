mod demo;
mod headless;

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use twinloop_common::Vector2D;
use twinloop_kernel::{Driver, DriverConfig};

use crate::demo::DemoWorld;
use crate::headless::TraceDisplay;

#[derive(Parser)]
#[command(name = "twinloop", about = "Run the demo world on a headless display")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Surface width in pixels
    #[arg(long, default_value = "800")]
    width: u32,

    /// Surface height in pixels
    #[arg(long, default_value = "600")]
    height: u32,

    /// Milliseconds between simulation ticks
    #[arg(long, default_value = "1000")]
    tick_ms: u64,

    /// Frames to present before the display closes
    #[arg(long, default_value = "300")]
    frames: u64,

    /// Minimum milliseconds per frame
    #[arg(long, default_value = "16")]
    frame_ms: u64,

    /// Scripted left click at X,Y (surface coordinates); repeatable
    #[arg(long = "click", value_parser = parse_point)]
    clicks: Vec<Vector2D>,
}

fn parse_point(s: &str) -> Result<Vector2D, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok(Vector2D::new(x, y))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("twinloop starting");

    let world = DemoWorld::new(cli.width, cli.height)?;
    let driver = Driver::new(DriverConfig {
        tick_interval: Duration::from_millis(cli.tick_ms),
        tick_step: 1,
        frame_interval: Some(Duration::from_millis(cli.frame_ms)),
    });

    let (width, height, frames, clicks) = (cli.width, cli.height, cli.frames, cli.clicks);
    let summary = driver.run(world, move || {
        TraceDisplay::open(width, height, frames, clicks)
    })?;

    println!(
        "ticks={} frames={} events={}",
        summary.ticks, summary.frames, summary.events
    );
    Ok(())
}
