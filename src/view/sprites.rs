use glam::{Mat4, Vec3};

use crate::{
    renderer::Renderer,
    view::add_textured,
    world::{Billboard, Player, Scene, TextureResolver},
};

/// Stand the billboard on its midpoint and spin it about the vertical axis
/// so its width runs along `direction`.
pub fn sprite_transform(sprite: &Billboard, scale: f32) -> Mat4 {
    let center = sprite.center();
    let angle = (-sprite.direction.y).atan2(sprite.direction.x);
    Mat4::from_translation(Vec3::new(center.x * scale, 0.0, center.y * scale))
        * Mat4::from_rotation_y(angle)
}

/// Billboards are double-sided: the player may walk round them.
pub fn emit_sprites<S, T, R>(scene: &S, textures: &T, renderer: &mut R) -> usize
where
    S: Scene + ?Sized,
    T: TextureResolver + ?Sized,
    R: Renderer + ?Sized,
{
    let scale = renderer.viewport().y;
    for sprite in scene.sprites() {
        add_textured(
            renderer,
            textures,
            sprite.texture,
            sprite_transform(sprite, scale),
            true,
        );
    }
    scene.sprites().len()
}

/// Weapon pinned to the screen: undo the camera, then push it `depth` units
/// towards the viewer.
pub fn weapon_transform(camera: Mat4, depth: f32) -> Mat4 {
    camera.inverse() * Mat4::from_translation(Vec3::new(0.0, 0.0, depth))
}

pub fn emit_weapon<T, R>(player: &Player, textures: &T, renderer: &mut R, camera: Mat4, depth: f32)
where
    T: TextureResolver + ?Sized,
    R: Renderer + ?Sized,
{
    add_textured(
        renderer,
        textures,
        player.weapon.texture(),
        weapon_transform(camera, depth),
        false,
    );
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        renderer::LayerTree,
        view::camera::Camera,
        world::{Snapshot, Texture, TextureBank, Tile, Tilemap},
    };
    use glam::{Vec2, Vec4};

    const S: f32 = 200.0;

    #[test]
    fn sprite_sits_on_midpoint() {
        let b = Billboard {
            start: Vec2::new(1.0, 1.0),
            end: Vec2::new(2.0, 3.0),
            direction: Vec2::X,
            texture: Texture::Monster,
        };
        let m = sprite_transform(&b, S);
        let c = m.transform_point3(Vec3::ZERO);
        assert!((c - Vec3::new(1.5 * S, 0.0, 2.0 * S)).length() < 1e-3);
    }

    #[test]
    fn sprite_width_runs_along_direction() {
        for dir in [Vec2::X, Vec2::Y, Vec2::NEG_X, Vec2::new(0.6, -0.8)] {
            let b = Billboard::across(Vec2::ZERO, dir, 1.0, Texture::Monster);
            let width_axis = sprite_transform(&b, S).transform_vector3(Vec3::X);
            // grid (x, y) ↔ world (x, z)
            let expect = Vec3::new(dir.x, 0.0, dir.y);
            assert!((width_axis - expect).length() < 1e-5, "{dir:?}: {width_axis:?}");
        }
    }

    #[test]
    fn weapon_cancels_camera() {
        let camera = Camera::new(Vec2::new(3.5, 2.5), Vec2::new(0.6, 0.8), S).transform(500.0);
        let m = camera * weapon_transform(camera, 4900.0);
        let p = m * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((p.truncate() / p.w - Vec3::new(0.0, 0.0, 4900.0)).length() < 0.5);
    }

    #[test]
    fn sprites_are_double_sided_weapon_is_not() {
        let mut snap = Snapshot::new(
            Tilemap::filled(1, 1, Tile::Floor),
            crate::world::Player::new(Vec2::splat(0.5), Vec2::NEG_Y),
        );
        snap.sprites
            .push(Billboard::across(Vec2::splat(0.5), Vec2::X, 1.0, Texture::Monster));

        let bank = TextureBank::procedural();
        let mut tree = LayerTree::new(64, 48);
        tree.begin_frame();
        assert_eq!(emit_sprites(&snap, &bank, &mut tree), 1);
        emit_weapon(&snap.player, &bank, &mut tree, Mat4::IDENTITY, 4900.0);
        tree.release_unused();

        let flags: Vec<bool> = tree.surfaces().map(|s| s.is_double_sided()).collect();
        assert_eq!(flags, vec![true, false]);
        let weapon = tree.surfaces().last().map(|s| s.contents);
        assert_eq!(weapon, Some(Some(Texture::Pistol)));
    }
}
