use glam::Vec2;

use crate::world::texture::Texture;

/// Viewer pose plus the texture currently shown for the held weapon.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub position: Vec2, // grid units
    pub direction: Vec2, // unit vector on the X-Y grid plane
    pub weapon: Animation,
}

impl Player {
    pub fn new(position: Vec2, direction: Vec2) -> Self {
        Self {
            position,
            direction,
            weapon: Animation::still(Texture::Pistol),
        }
    }
}

/// Flat textured segment standing on the floor.
///
/// `direction` runs from `start` towards `end`; the texture plane is oriented
/// by it alone, never by the view ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Billboard {
    pub start: Vec2,
    pub end: Vec2,
    pub direction: Vec2,
    pub texture: Texture,
}

impl Billboard {
    /// Segment of `length` centred on `position`, running along `direction`.
    pub fn across(position: Vec2, direction: Vec2, length: f32, texture: Texture) -> Self {
        let direction = direction.normalize_or_zero();
        let half = direction * (length * 0.5);
        Self {
            start: position - half,
            end: position + half,
            direction,
            texture,
        }
    }

    /// Segment whose face points along `normal`, e.g. towards a viewer.
    pub fn facing(position: Vec2, normal: Vec2, length: f32, texture: Texture) -> Self {
        Self::across(position, normal.perp(), length, texture)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.start + (self.end - self.start) / 2.0
    }
}

/// Looping or one-shot frame sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    pub frames: Vec<Texture>,
    pub duration: f32,
    pub time: f32,
}

impl Animation {
    pub fn new(frames: Vec<Texture>, duration: f32) -> Self {
        Self {
            frames,
            duration,
            time: 0.0,
        }
    }

    /// Single-frame animation.
    pub fn still(texture: Texture) -> Self {
        Self::new(vec![texture], 0.0)
    }

    /// Frame for the current `time`.  Past the end it holds the last frame;
    /// an empty sequence falls back to [`Texture::Wall`].
    pub fn texture(&self) -> Texture {
        let Some(last) = self.frames.len().checked_sub(1) else {
            return Texture::Wall;
        };
        if self.duration <= 0.0 {
            return self.frames[0];
        }
        let t = (self.time / self.duration).max(0.0);
        let index = ((t * self.frames.len() as f32) as usize).min(last);
        self.frames[index]
    }

    pub fn advance(&mut self, dt: f32) {
        self.time += dt;
    }

    pub fn is_completed(&self) -> bool {
        self.time >= self.duration
    }
}

/// Wall-mounted switch; only its current frame matters for drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct Switch {
    pub animation: Animation,
}

impl Switch {
    pub fn off() -> Self {
        Self {
            animation: Animation::still(Texture::Switch1),
        }
    }

    /// The flip sequence, played once.
    pub fn flipped() -> Self {
        Self {
            animation: Animation::new(
                vec![
                    Texture::Switch1,
                    Texture::Switch2,
                    Texture::Switch3,
                    Texture::Switch4,
                ],
                0.4,
            ),
        }
    }
}

/// 8-bit RGBA.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    FadeIn,
    FadeOut,
    FizzleOut,
}

/// Screen-space transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Effect {
    pub kind: EffectKind,
    pub color: Color,
    pub duration: f32,
    pub time: f32,
}

impl Effect {
    pub fn new(kind: EffectKind, color: Color, duration: f32) -> Self {
        Self {
            kind,
            color,
            duration,
            time: 0.0,
        }
    }

    /// Fraction completed in `0..=1`.  Zero duration counts as finished.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.time / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_completed(&self) -> bool {
        self.time >= self.duration
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn billboard_center_is_midpoint() {
        let b = Billboard {
            start: Vec2::new(1.0, 2.0),
            end: Vec2::new(3.0, 6.0),
            direction: Vec2::X,
            texture: Texture::Monster,
        };
        assert_eq!(b.center(), Vec2::new(2.0, 4.0));
    }

    #[test]
    fn facing_billboard_spans_perpendicular_to_normal() {
        let b = Billboard::facing(Vec2::new(5.0, 5.0), Vec2::Y, 1.0, Texture::Monster);
        assert!((b.center() - Vec2::new(5.0, 5.0)).length() < 1e-6);
        assert!((b.end - b.start).dot(Vec2::Y).abs() < 1e-6);
        assert!(((b.end - b.start).length() - 1.0).abs() < 1e-6);
        assert!((b.direction - (b.end - b.start)).length() < 1e-6);
    }

    #[test]
    fn animation_frames_follow_time() {
        let mut anim = Animation::new(
            vec![Texture::Switch1, Texture::Switch2, Texture::Switch3, Texture::Switch4],
            0.4,
        );
        assert_eq!(anim.texture(), Texture::Switch1);
        anim.advance(0.25);
        assert_eq!(anim.texture(), Texture::Switch3);
        anim.advance(1.0);
        assert_eq!(anim.texture(), Texture::Switch4);
        assert!(anim.is_completed());
    }

    #[test]
    fn empty_animation_does_not_panic() {
        let anim = Animation::new(Vec::new(), 1.0);
        assert_eq!(anim.texture(), Texture::Wall);
    }

    #[test]
    fn effect_progress_clamped() {
        let mut fx = Effect::new(EffectKind::FadeIn, Color::RED, 2.0);
        fx.time = 0.5;
        assert_eq!(fx.progress(), 0.25);
        fx.time = 5.0;
        assert_eq!(fx.progress(), 1.0);
        assert_eq!(Effect::new(EffectKind::FadeOut, Color::BLACK, 0.0).progress(), 1.0);
    }
}
