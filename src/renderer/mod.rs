//! Rendering abstraction layer.
//!
//! *The view code never touches a pixel buffer directly.*
//! It checks out [`Surface`]s from a type implementing [`Renderer`], places
//! each one with a 3-D transform and hands the finished tree to whatever
//! compositor the host uses.
//!
//! * [`LayerTree`] is the in-memory render target backed by a
//!   [`SurfacePool`] arena.
//! * [`Software`] rasterises a `LayerTree` into a 0xAARRGGBB frame-buffer.

use bitflags::bitflags;
use glam::{Mat4, Vec2, Vec4};

use crate::world::Texture;

mod layers;
mod pool;
pub mod software;

pub use layers::LayerTree;
pub use pool::{PoolStats, SurfaceId, SurfacePool};
pub use software::Software;

/// Pixel format of the software frame-buffer (0xAARRGGBB).
pub type Rgba = u32;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SurfaceFlags: u8 {
        /// Visible from behind as well as from the front.
        const DOUBLE_SIDED = 0x01;
        /// Nearest-neighbour magnification.
        const NEAREST      = 0x02;
    }
}

/// One drawable quad.  Its local plane is `z = 0`, centred on the origin,
/// `size.x × size.y` pixels, front face towards `+z`.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    /// Image drawn on the quad; `None` leaves it blank.
    pub contents: Option<Texture>,
    /// Straight-alpha RGBA fill in `0..1`, drawn where there is no image.
    pub background: Option<Vec4>,
    pub size: Vec2,
    /// Screen-space anchor of the quad centre.
    pub position: Vec2,
    pub transform: Mat4,
    pub flags: SurfaceFlags,
}

impl Surface {
    /// Baseline configuration of a freshly created surface.
    pub fn new() -> Self {
        Self {
            contents: None,
            background: None,
            size: Vec2::ZERO,
            position: Vec2::ZERO,
            transform: Mat4::IDENTITY,
            flags: SurfaceFlags::NEAREST,
        }
    }

    /// Forget whatever the previous owner drew.
    #[inline]
    pub fn clear_visuals(&mut self) {
        self.contents = None;
        self.background = None;
    }

    #[inline]
    pub fn is_double_sided(&self) -> bool {
        self.flags.contains(SurfaceFlags::DOUBLE_SIDED)
    }

    #[inline]
    pub fn set_double_sided(&mut self, on: bool) {
        self.flags.set(SurfaceFlags::DOUBLE_SIDED, on);
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

/// The host drawing system as seen by the view code.
///
/// Frame protocol:
/// 1. `begin_frame`: every existing surface becomes reclaimable.
/// 2. `set_root_transform` once, `acquire_surface` once per primitive.
/// 3. `release_unused`: surfaces nobody reclaimed are destroyed.
pub trait Renderer {
    /// Viewport size in pixels.
    fn viewport(&self) -> Vec2;

    fn begin_frame(&mut self);

    /// Transform applied to every surface (the camera).
    fn set_root_transform(&mut self, transform: Mat4);

    /// Check out a surface with cleared visuals for this frame.
    fn acquire_surface(&mut self) -> &mut Surface;

    /// Dispose every surface that was not checked out since `begin_frame`.
    fn release_unused(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_surface_is_single_sided_nearest() {
        let s = Surface::new();
        assert!(!s.is_double_sided());
        assert!(s.flags.contains(SurfaceFlags::NEAREST));
        assert_eq!(s.transform, Mat4::IDENTITY);
    }

    #[test]
    fn clear_keeps_configuration() {
        let mut s = Surface::new();
        s.contents = Some(Texture::Wall);
        s.background = Some(Vec4::ONE);
        s.set_double_sided(true);
        s.clear_visuals();
        assert_eq!(s.contents, None);
        assert_eq!(s.background, None);
        assert!(s.is_double_sided());
    }
}
