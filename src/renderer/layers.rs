use glam::{Mat4, Vec2};

use crate::renderer::{Renderer, Surface, SurfacePool};

/// In-memory render target: a root transform plus pooled child surfaces.
///
/// Compositors (see [`crate::renderer::Software`]) read it back after the
/// view code has filled it.
#[derive(Debug)]
pub struct LayerTree {
    viewport: Vec2,
    root: Mat4,
    pool: SurfacePool,
}

impl LayerTree {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            viewport: Vec2::new(width as f32, height as f32),
            root: Mat4::IDENTITY,
            pool: SurfacePool::new(),
        }
    }

    /// Change the viewport; surfaces are re-laid out on the next frame.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.viewport = Vec2::new(width as f32, height as f32);
    }

    #[inline]
    pub fn root(&self) -> Mat4 {
        self.root
    }

    #[inline]
    pub fn pool(&self) -> &SurfacePool {
        &self.pool
    }

    /// Surfaces of the last frame in draw order.
    pub fn surfaces(&self) -> impl Iterator<Item = &Surface> + '_ {
        self.pool.checked_out()
    }
}

impl Renderer for LayerTree {
    fn viewport(&self) -> Vec2 {
        self.viewport
    }

    fn begin_frame(&mut self) {
        self.pool.reset();
    }

    fn set_root_transform(&mut self, transform: Mat4) {
        self.root = transform;
    }

    fn acquire_surface(&mut self) -> &mut Surface {
        self.pool.acquire()
    }

    fn release_unused(&mut self) {
        self.pool.release_unused();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_protocol_round_trip() {
        let mut tree = LayerTree::new(320, 200);
        assert_eq!(tree.viewport(), Vec2::new(320.0, 200.0));

        tree.begin_frame();
        tree.set_root_transform(Mat4::from_translation(glam::Vec3::X));
        tree.acquire_surface().size = Vec2::splat(8.0);
        tree.acquire_surface();
        tree.release_unused();

        assert_eq!(tree.surfaces().count(), 2);
        assert_eq!(tree.surfaces().next().map(|s| s.size), Some(Vec2::splat(8.0)));
        assert_eq!(tree.root().w_axis.x, 1.0);

        tree.resize(640, 400);
        assert_eq!(tree.viewport().y, 400.0);
    }
}
