//! Interactive software view of a tile level.
//!
//! Controls  ↑/↓ or W/S = move  ←/→ = turn  A/D = strafe
//!           Space = fade out / in  F = flip switches  Esc = quit
//!
//! ```bash
//! cargo run --release --bin view_sw -- [level.txt]
//! ```

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use glam::Vec2;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use tracing_subscriber::EnvFilter;

use quadview_rs::{
    renderer::{LayerTree, Software},
    view::{ViewConfig, draw_world},
    world::{
        Billboard, Color, DEMO_LEVEL, Effect, EffectKind, Snapshot, Switch, Texture, TextureBank,
        parse_level,
    },
};

const MOVE_SPEED: f32 = 2.5; // cells per second
const TURN_SPEED: f32 = std::f32::consts::PI; // radians per second
const FADE_TIME: f32 = 0.5;

#[derive(Parser)]
#[command(name = "view_sw", about = "Walk a tile level drawn from pooled quads")]
struct Cli {
    /// ASCII level file; the built-in demo level when omitted
    map: Option<PathBuf>,

    #[arg(long, default_value_t = 640)]
    width: usize,

    #[arg(long, default_value_t = 400)]
    height: usize,

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

    let text = match &cli.map {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => DEMO_LEVEL.to_string(),
    };
    let mut scene = parse_level(&text)?;

    let textures = TextureBank::procedural();
    for missing in textures.missing() {
        tracing::warn!(texture = missing.name(), "no image, surfaces will be blank");
    }

    let config = ViewConfig::default();
    config.validate()?;
    let mut layers = LayerTree::new(cli.width, cli.height);
    let mut software = Software::default();

    let mut win = Window::new(
        "Tile world, quad renderer",
        cli.width,
        cli.height,
        WindowOptions::default(),
    )?;
    win.set_target_fps(60);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();
    let mut last_tick = Instant::now();

    scene
        .effects
        .push(Effect::new(EffectKind::FadeIn, Color::BLACK, FADE_TIME));

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let dt = last_tick.elapsed().as_secs_f32();
        last_tick = Instant::now();

        handle_input(&win, &mut scene, dt);
        tick(&mut scene, dt);

        let t0 = Instant::now();
        draw_world(&scene, &textures, &mut layers, &config);
        software.begin_frame(cli.width, cli.height);
        software.composite(&layers, &textures);

        let mut result = Ok(());
        software.end_frame(|fb, w, h| {
            acc_time += t0.elapsed();
            acc_frames += 1;
            result = win.update_with_buffer(fb, w, h);
        });
        result?;

        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames.max(1) as f64;
            tracing::info!(
                avg_ms = format!("{avg_ms:.2}"),
                surfaces = layers.pool().live_len(),
                "render stats"
            );
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}

/// Free camera: no collision, the view code does not care where we stand.
fn handle_input(win: &Window, scene: &mut Snapshot, dt: f32) {
    let player = &mut scene.player;

    let mut turn = 0.0;
    if win.is_key_down(Key::Left) {
        turn -= 1.0;
    }
    if win.is_key_down(Key::Right) {
        turn += 1.0;
    }
    player.direction = Vec2::from_angle(turn * TURN_SPEED * dt).rotate(player.direction);

    let mut forward = 0.0;
    if win.is_key_down(Key::Up) || win.is_key_down(Key::W) {
        forward += 1.0;
    }
    if win.is_key_down(Key::Down) || win.is_key_down(Key::S) {
        forward -= 1.0;
    }
    let mut strafe = 0.0;
    if win.is_key_down(Key::A) {
        strafe -= 1.0;
    }
    if win.is_key_down(Key::D) {
        strafe += 1.0;
    }
    let right = -player.direction.perp();
    player.position += (player.direction * forward + right * strafe) * MOVE_SPEED * dt;

    if win.is_key_pressed(Key::Space, KeyRepeat::No) && scene.effects.is_empty() {
        scene
            .effects
            .push(Effect::new(EffectKind::FadeOut, Color::RED, FADE_TIME));
    }
    if win.is_key_pressed(Key::F, KeyRepeat::No) {
        for switch in scene.switches.values_mut() {
            *switch = Switch::flipped();
        }
    }
}

/// Advance the bits of world state that only exist to be looked at.
fn tick(scene: &mut Snapshot, dt: f32) {
    let fading_out = scene
        .effects
        .iter()
        .any(|fx| fx.kind == EffectKind::FadeOut && fx.time + dt >= fx.duration);
    scene.advance_effects(dt);
    if fading_out {
        scene
            .effects
            .push(Effect::new(EffectKind::FadeIn, Color::RED, FADE_TIME));
    }

    for switch in scene.switches.values_mut() {
        switch.animation.advance(dt);
    }

    // monsters keep facing the player
    let eye = scene.player.position;
    for sprite in &mut scene.sprites {
        if sprite.texture == Texture::Monster {
            let center = sprite.center();
            let normal = (eye - center).normalize_or_zero();
            let length = (sprite.end - sprite.start).length();
            *sprite = Billboard::facing(center, normal, length, sprite.texture);
        }
    }
}
