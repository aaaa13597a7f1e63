use glam::{Mat4, Vec3, Vec4};

use crate::{
    renderer::Renderer,
    world::{Color, Effect, EffectKind},
};

/// Overlay opacity for `effect` at its current progress.
///
/// `FizzleOut` shares the fade-out ramp; no dissolve pattern at this layer.
pub fn overlay_opacity(kind: EffectKind, progress: f32) -> f32 {
    match kind {
        EffectKind::FadeIn => 1.0 - progress,
        EffectKind::FadeOut | EffectKind::FizzleOut => progress,
    }
}

/// Straight-alpha fill for `color` scaled by `opacity`.
pub fn overlay_fill(color: Color, opacity: f32) -> Vec4 {
    Vec4::new(
        color.r as f32 / 255.0,
        color.g as f32 / 255.0,
        color.b as f32 / 255.0,
        color.a as f32 / 255.0 * opacity,
    )
}

/// One full-viewport quad per effect, in order; they stack, never merge.
pub fn emit_effects<R>(effects: &[Effect], renderer: &mut R, camera: Mat4, depth: f32) -> usize
where
    R: Renderer + ?Sized,
{
    if effects.is_empty() {
        return 0;
    }
    let viewport = renderer.viewport();
    let transform = camera.inverse() * Mat4::from_translation(Vec3::new(0.0, 0.0, depth));

    for effect in effects {
        let opacity = overlay_opacity(effect.kind, effect.progress());
        let surface = renderer.acquire_surface();
        surface.transform = transform;
        surface.size = viewport;
        surface.position = viewport / 2.0;
        surface.set_double_sided(false);
        surface.background = Some(overlay_fill(effect.color, opacity));
    }
    effects.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::LayerTree;

    fn at(kind: EffectKind, progress: f32) -> Effect {
        let mut fx = Effect::new(kind, Color::RED, 1.0);
        fx.time = progress;
        fx
    }

    #[test]
    fn fade_ramps() {
        assert_eq!(overlay_opacity(EffectKind::FadeIn, 0.25), 0.75);
        assert_eq!(overlay_opacity(EffectKind::FadeOut, 0.25), 0.25);
        assert_eq!(overlay_opacity(EffectKind::FizzleOut, 0.25), 0.25);
    }

    #[test]
    fn fill_scales_color_alpha() {
        let c = Color {
            r: 255,
            g: 0,
            b: 51,
            a: 255,
        };
        let fill = overlay_fill(c, 0.5);
        assert_eq!(fill.x, 1.0);
        assert!((fill.z - 0.2).abs() < 1e-6);
        assert_eq!(fill.w, 0.5);
    }

    #[test]
    fn effects_stack_as_full_screen_quads() {
        let mut tree = LayerTree::new(320, 200);
        tree.begin_frame();
        let fx = [at(EffectKind::FadeIn, 0.25), at(EffectKind::FadeOut, 0.25)];
        assert_eq!(emit_effects(&fx, &mut tree, Mat4::IDENTITY, 5000.0), 2);
        tree.release_unused();

        let alphas: Vec<f32> = tree
            .surfaces()
            .filter_map(|s| s.background.map(|b| b.w))
            .collect();
        assert_eq!(alphas, vec![0.75, 0.25]);
        for s in tree.surfaces() {
            assert_eq!(s.size, glam::Vec2::new(320.0, 200.0));
            assert_eq!(s.contents, None);
            assert_eq!(s.transform.w_axis.z, 5000.0);
        }
    }
}
