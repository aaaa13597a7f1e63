//! ---------------------------------------------------------------------------
//! Software (CPU) quad compositor
//!
//! * Fills a `Vec<u32>` frame-buffer in **0xAARRGGBB** format.
//! * Every surface is a plane, so the local→screen map is a 3×3 homography;
//!   each covered pixel is mapped back onto the quad and sampled there.
//! * A depth buffer on view-space `z` resolves overlap, so draw order only
//!   matters between equal depths and for alpha blending.
//! ---------------------------------------------------------------------------

use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};

use crate::{
    renderer::{LayerTree, Rgba, Surface},
    world::TextureResolver,
};

/// Homogeneous `w` below this is treated as behind the eye.
const NEAR_W: f32 = 1e-3;
/// Texels with less alpha than this are holes (sprite cut-outs).
const ALPHA_CUTOFF: u32 = 0x80;

const CLEAR: Rgba = 0xFF_202020;

/// Quad compositor with its own scratch and depth buffers.
#[derive(Default)]
pub struct Software {
    scratch: Vec<Rgba>,
    depth: Vec<f32>,
    width: usize,
    height: usize,
}

impl Software {
    /// (Re)allocate for the requested resolution and clear.
    pub fn begin_frame(&mut self, w: usize, h: usize) {
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.scratch.resize(w * h, 0);
            self.depth.resize(w * h, 0.0);
        }
        self.scratch.fill(CLEAR);
        self.depth.fill(f32::NEG_INFINITY);
    }

    /// Rasterise every checked-out surface of `layers`.
    pub fn composite<T>(&mut self, layers: &LayerTree, textures: &T)
    where
        T: TextureResolver + ?Sized,
    {
        let root = layers.root();
        for surface in layers.surfaces() {
            self.draw_surface(surface, root, textures);
        }
    }

    /// Finish the frame and **loan** the buffer to `submit`.
    pub fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.scratch, self.width, self.height);
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width {
            return None;
        }
        self.scratch.get(y * self.width + x).copied()
    }

    fn draw_surface<T>(&mut self, surface: &Surface, root: Mat4, textures: &T)
    where
        T: TextureResolver + ?Sized,
    {
        let image = surface.contents.and_then(|t| textures.resolve(t));
        if image.is_none() && surface.background.is_none() {
            return; // blank
        }
        let Some(plane) = QuadPlane::new(root * surface.transform, surface.size) else {
            return; // seen edge-on
        };
        if !surface.is_double_sided() && !plane.front_facing {
            return;
        }

        let (x0, y0, x1, y1) = plane.screen_bounds(surface.position, self.width, self.height);
        for py in y0..y1 {
            for px in x0..x1 {
                let screen = Vec2::new(px as f32 + 0.5, py as f32 + 0.5) - surface.position;
                let Some((uv, z)) = plane.unproject(screen) else {
                    continue;
                };
                let idx = py * self.width + px;
                if z < self.depth[idx] {
                    continue;
                }
                if let Some(img) = image {
                    let texel = img.sample(uv.x, uv.y);
                    if texel >> 24 < ALPHA_CUTOFF {
                        continue;
                    }
                    self.scratch[idx] = texel | 0xFF_000000;
                    self.depth[idx] = z;
                } else if let Some(fill) = surface.background {
                    self.scratch[idx] = blend(self.scratch[idx], fill);
                    self.depth[idx] = z;
                }
            }
        }
    }
}

/*──────────────────────── plane projection ────────────────────────────*/

/// A quad's `z = 0` plane pushed through a full 4×4 transform.
struct QuadPlane {
    m: Mat4,
    /// local (x, y, 1) → screen (X, Y, W)
    h: Mat3,
    h_inv: Mat3,
    half: Vec2,
    front_facing: bool,
}

impl QuadPlane {
    fn new(m: Mat4, size: Vec2) -> Option<Self> {
        let h = Mat3::from_cols(
            Vec3::new(m.x_axis.x, m.x_axis.y, m.x_axis.w),
            Vec3::new(m.y_axis.x, m.y_axis.y, m.y_axis.w),
            Vec3::new(m.w_axis.x, m.w_axis.y, m.w_axis.w),
        );
        let det = h.determinant();
        if det.abs() < f32::EPSILON || !det.is_finite() {
            return None;
        }
        Some(Self {
            m,
            h,
            h_inv: h.inverse(),
            half: size * 0.5,
            // Jacobian of the projection is det / w³, and w > 0 where visible
            front_facing: det > 0.0,
        })
    }

    /// Pixel rectangle that can contain the quad, clamped to the screen.
    fn screen_bounds(&self, origin: Vec2, w: usize, h: usize) -> (usize, usize, usize, usize) {
        let corners = [
            Vec2::new(-self.half.x, -self.half.y),
            Vec2::new(self.half.x, -self.half.y),
            Vec2::new(self.half.x, self.half.y),
            Vec2::new(-self.half.x, self.half.y),
        ];
        let mut lo = Vec2::splat(f32::INFINITY);
        let mut hi = Vec2::splat(f32::NEG_INFINITY);
        for c in corners {
            let p = self.h * c.extend(1.0);
            if p.z <= NEAR_W {
                // straddles the eye: no finite bound
                return (0, 0, w, h);
            }
            let s = origin + p.truncate() / p.z;
            lo = lo.min(s);
            hi = hi.max(s);
        }
        let clamp = |v: f32, max: usize| (v.max(0.0) as usize).min(max);
        (
            clamp(lo.x.floor(), w),
            clamp(lo.y.floor(), h),
            clamp(hi.x.ceil(), w),
            clamp(hi.y.ceil(), h),
        )
    }

    /// Screen offset from the anchor → (`uv` in `0..1`, view-space z), or
    /// `None` if the pixel misses the quad or lies behind the eye.
    fn unproject(&self, screen: Vec2) -> Option<(Vec2, f32)> {
        let l = self.h_inv * screen.extend(1.0);
        if l.z.abs() < f32::EPSILON {
            return None;
        }
        let local = l.truncate() / l.z;
        if local.x.abs() > self.half.x || local.y.abs() > self.half.y {
            return None;
        }
        let p = self.m * Vec4::new(local.x, local.y, 0.0, 1.0);
        if p.w <= NEAR_W {
            return None;
        }
        let uv = (local + self.half) / (self.half * 2.0);
        Some((uv, p.z))
    }
}

/// Straight-alpha `src` over opaque `dst`.
fn blend(dst: Rgba, src: Vec4) -> Rgba {
    let a = src.w.clamp(0.0, 1.0);
    let channel = |shift: u32, s: f32| {
        let d = ((dst >> shift) & 0xFF) as f32 / 255.0;
        ((s * a + d * (1.0 - a)) * 255.0).round() as u32
    };
    0xFF_000000 | channel(16, src.x) << 16 | channel(8, src.y) << 8 | channel(0, src.z)
}

/*──────────────────────────────── Tests ───────────────────────────────*/
