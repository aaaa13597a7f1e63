//! Tile-world renderer built from pooled, transformed quads.
//!
//! * [`world`]: the read-only snapshot the renderer consumes.
//! * [`view`]: turns a snapshot into oriented quads, once per frame.
//! * [`renderer`]: the surface pool, the in-memory render target and a
//!   software compositor.

pub mod renderer;
pub mod view;
pub mod world;
