//! Headless frame driver: draws a level for a number of frames while the
//! player turns on the spot, and logs what the surface pool did.
//!
//! ```bash
//! cargo run --release --bin quadview -- --frames 120 maps/demo.txt
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use glam::Vec2;
use tracing_subscriber::EnvFilter;

use quadview_rs::{
    renderer::{LayerTree, Renderer, Software},
    view::{ViewConfig, draw_world},
    world::{DEMO_LEVEL, TextureBank, parse_level},
};

#[derive(Parser)]
#[command(name = "quadview", about = "Draw a tile level headlessly and report pool usage")]
struct Cli {
    /// ASCII level file; the built-in demo level when omitted
    map: Option<PathBuf>,

    /// Number of frames to draw
    #[arg(short, long, default_value_t = 60)]
    frames: u32,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 320)]
    width: usize,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 200)]
    height: usize,

    /// Also rasterise every frame with the software compositor
    #[arg(long)]
    raster: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    // ─────────── load level ────────────
    let text = match &cli.map {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => DEMO_LEVEL.to_string(),
    };
    let mut scene = parse_level(&text)?;
    tracing::info!(
        width = scene.map.width(),
        height = scene.map.height(),
        sprites = scene.sprites.len(),
        "level loaded"
    );

    let config = ViewConfig::default();
    config.validate()?;
    let textures = TextureBank::procedural();
    for missing in textures.missing() {
        tracing::warn!(texture = missing.name(), "no image, surfaces will be blank");
    }
    let mut layers = LayerTree::new(cli.width, cli.height);
    let mut software = Software::default();

    // ─────────── draw ────────────
    let step = std::f32::consts::TAU / cli.frames.max(1) as f32;
    for frame in 0..cli.frames {
        let angle = step * frame as f32;
        scene.player.direction = Vec2::from_angle(angle).rotate(Vec2::NEG_Y);

        let summary = draw_world(&scene, &textures, &mut layers, &config);
        let stats = layers.pool().stats();
        tracing::debug!(
            frame,
            surfaces = summary.total(),
            created = stats.created,
            reused = stats.reused,
            disposed = stats.disposed,
            "frame"
        );

        if cli.raster {
            let viewport = layers.viewport();
            software.begin_frame(viewport.x as usize, viewport.y as usize);
            software.composite(&layers, &textures);
            software.end_frame(|_, _, _| {});
        }
    }

    let pool = layers.pool();
    println!(
        "{} frames, {} surfaces live, peak {}",
        cli.frames,
        pool.live_len(),
        pool.peak()
    );
    Ok(())
}
