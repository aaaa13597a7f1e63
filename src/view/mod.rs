//! Quad view of the tile world.
//!
//! One call to [`draw_world`] turns one [`Scene`] snapshot into a root
//! transform plus one pooled surface per primitive:
//!
//! ```text
//! begin_frame → camera → map faces → switch faces → sprites
//!             → weapon → effect overlays → release_unused
//! ```
//!
//! Depth sorting is the compositor's job; emission order only decides which
//! pooled surface each primitive lands on.

use glam::{Mat4, Vec2};

use crate::{
    renderer::Renderer,
    world::{Scene, Texture, TextureResolver},
};

pub mod camera;
pub mod config;
pub mod faces;
pub mod orientation;
pub mod overlay;
pub mod sprites;

pub use camera::Camera;
pub use config::{ConfigError, ViewConfig};
pub use orientation::{Orientation, face_transform};

/// What one frame put on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameSummary {
    pub map_faces: usize,
    pub switch_faces: usize,
    pub sprites: usize,
    pub effects: usize,
}

impl FrameSummary {
    /// Surfaces checked out by the frame; the weapon always counts once.
    pub fn total(&self) -> usize {
        self.map_faces + self.switch_faces + self.sprites + 1 + self.effects
    }
}

/// Draw one frame.  Never fails: missing textures leave blank quads.
pub fn draw_world<S, T, R>(
    scene: &S,
    textures: &T,
    renderer: &mut R,
    config: &ViewConfig,
) -> FrameSummary
where
    S: Scene + ?Sized,
    T: TextureResolver + ?Sized,
    R: Renderer + ?Sized,
{
    let _span = tracing::trace_span!("draw_world").entered();

    renderer.begin_frame();

    let scale = renderer.viewport().y;
    let view = Camera::for_player(scene.player(), scale).transform(config.perspective_distance);
    renderer.set_root_transform(view);

    let map_faces = faces::emit_map(scene, textures, renderer, config);
    let switch_faces = faces::emit_switches(scene, textures, renderer);
    let sprite_count = sprites::emit_sprites(scene, textures, renderer);
    sprites::emit_weapon(scene.player(), textures, renderer, view, config.weapon_depth);
    let effects = overlay::emit_effects(scene.effects(), renderer, view, config.overlay_depth);

    let summary = FrameSummary {
        map_faces,
        switch_faces,
        sprites: sprite_count,
        effects,
    };

    renderer.release_unused();
    tracing::trace!(surfaces = summary.total(), "frame emitted");
    summary
}

/// Check out a surface showing `texture`: `scale` pixels tall, width from the
/// image's aspect ratio, centred on the viewport.
pub(crate) fn add_textured<T, R>(
    renderer: &mut R,
    textures: &T,
    texture: Texture,
    transform: Mat4,
    double_sided: bool,
) where
    T: TextureResolver + ?Sized,
    R: Renderer + ?Sized,
{
    let viewport = renderer.viewport();
    let scale = viewport.y;
    let aspect = textures.aspect_ratio(texture);

    let surface = renderer.acquire_surface();
    surface.size = Vec2::new(scale * aspect, scale);
    surface.contents = textures.resolve(texture).map(|_| texture);
    surface.position = viewport / 2.0;
    surface.set_double_sided(double_sided);
    surface.transform = transform;
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
