use glam::{Mat4, Vec2, Vec3};

use crate::world::Player;

/// Player view-point projected onto the quad scene.
///
/// * Only **yaw** is simulated; the camera never rolls or pitches.
/// * `scale` is the viewport height: one grid unit spans that many pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    position: Vec2,  // grid units
    direction: Vec2, // need not be normalised, only its angle matters
    scale: f32,
}

impl Camera {
    pub fn new(position: Vec2, direction: Vec2, scale: f32) -> Self {
        Self {
            position,
            direction,
            scale,
        }
    }

    pub fn for_player(player: &Player, scale: f32) -> Self {
        Self::new(player.position, player.direction, scale)
    }

    /// Rotation about the vertical axis that aligns `direction` with the
    /// view axis (`-z`).  Grid north (`-y`) is zero.
    #[inline]
    pub fn yaw(&self) -> f32 {
        self.direction.x.atan2(-self.direction.y)
    }

    /// World → view transform.  Applied once, to the root of the scene.
    ///
    /// ```text
    /// P(distance) · T(0, 0, scale) · Ry(yaw) · T(-px·scale, 0, -py·scale)
    /// ```
    pub fn transform(&self, perspective_distance: f32) -> Mat4 {
        perspective(perspective_distance)
            * Mat4::from_translation(Vec3::new(0.0, 0.0, self.scale))
            * Mat4::from_rotation_y(self.yaw())
            * Mat4::from_translation(Vec3::new(
                -self.position.x * self.scale,
                0.0,
                -self.position.y * self.scale,
            ))
    }
}

/// Identity with `m34 = -1 / distance`: points move towards the vanishing
/// point as `z` decreases.  A non-positive distance disables the divide.
pub fn perspective(distance: f32) -> Mat4 {
    let mut m = Mat4::IDENTITY;
    if distance > 0.0 {
        m.z_axis.w = -1.0 / distance;
    }
    m
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
