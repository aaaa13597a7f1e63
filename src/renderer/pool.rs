use std::collections::VecDeque;

use crate::renderer::Surface;

/// Stable handle of a surface inside its [`SurfacePool`].
///
/// Handles of disposed surfaces are recycled for later creations.
pub type SurfaceId = u32;

/// Per-frame bookkeeping, reset by [`SurfacePool::reset`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub created: usize,
    pub reused: usize,
    pub disposed: usize,
}

/// Arena of surfaces recycled from one frame to the next.
///
/// Every live surface is either *idle* (reclaimable this frame) or
/// *checked out* (drawn this frame), never both.  Idle surfaces that
/// survive until [`SurfacePool::release_unused`] are destroyed.
#[derive(Debug, Default)]
pub struct SurfacePool {
    slots: Vec<Option<Surface>>,
    vacant: Vec<SurfaceId>,
    idle: VecDeque<SurfaceId>,
    checked_out: Vec<SurfaceId>,
    live: usize,
    stats: PoolStats,
    peak: usize,
}

impl SurfacePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a frame: every live surface becomes reclaimable, in slot order.
    pub fn reset(&mut self) {
        self.checked_out.clear();
        self.idle.clear();
        self.idle.extend(
            self.slots
                .iter()
                .enumerate()
                .filter(|(_, s)| s.is_some())
                .map(|(i, _)| i as SurfaceId),
        );
        self.stats = PoolStats::default();
    }

    /// Reuse an idle surface or create one.  Visual state is cleared either way.
    pub fn acquire(&mut self) -> &mut Surface {
        let id = match self.idle.pop_front() {
            Some(id) => {
                self.stats.reused += 1;
                id
            }
            None => self.create(),
        };
        self.checked_out.push(id);
        self.peak = self.peak.max(self.live);

        let surface = self.slots[id as usize].get_or_insert_with(Surface::new);
        surface.clear_visuals();
        surface
    }

    /// Destroy every surface still idle.  Returns how many went away.
    pub fn release_unused(&mut self) -> usize {
        let mut disposed = 0;
        while let Some(id) = self.idle.pop_front() {
            self.slots[id as usize] = None;
            self.vacant.push(id);
            disposed += 1;
        }
        self.live -= disposed;
        self.stats.disposed += disposed;
        if self.stats.created > 0 || disposed > 0 {
            tracing::debug!(
                created = self.stats.created,
                disposed,
                live = self.live_len(),
                "pool resized"
            );
        }
        debug_assert!(self.is_consistent());
        disposed
    }

    fn create(&mut self) -> SurfaceId {
        self.stats.created += 1;
        self.live += 1;
        match self.vacant.pop() {
            Some(id) => {
                self.slots[id as usize] = Some(Surface::new());
                id
            }
            None => {
                self.slots.push(Some(Surface::new()));
                (self.slots.len() - 1) as SurfaceId
            }
        }
    }

    /*──────────────────────── queries ────────────────────────*/

    pub fn get(&self, id: SurfaceId) -> Option<&Surface> {
        self.slots.get(id as usize).and_then(Option::as_ref)
    }

    /// Surfaces drawn this frame, in checkout order.
    pub fn checked_out(&self) -> impl Iterator<Item = &Surface> + '_ {
        self.checked_out.iter().filter_map(|&id| self.get(id))
    }

    pub fn checked_out_ids(&self) -> &[SurfaceId] {
        &self.checked_out
    }

    pub fn checked_out_len(&self) -> usize {
        self.checked_out.len()
    }

    pub fn idle_len(&self) -> usize {
        self.idle.len()
    }

    pub fn live_len(&self) -> usize {
        self.live
    }

    /// Most surfaces ever alive at once.
    pub fn peak(&self) -> usize {
        self.peak
    }

    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    /// Idle and checked-out sets are disjoint, cover every live slot and
    /// reference only live slots.  The live counter matches the slots.
    pub fn is_consistent(&self) -> bool {
        let mut seen = vec![false; self.slots.len()];
        for &id in self.idle.iter().chain(&self.checked_out) {
            let i = id as usize;
            if self.get(id).is_none() || seen[i] {
                return false;
            }
            seen[i] = true;
        }
        let occupied = self.slots.iter().filter(|s| s.is_some()).count();
        occupied == self.live
            && seen
                .iter()
                .zip(&self.slots)
                .all(|(seen, slot)| *seen == slot.is_some())
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Texture;

    fn frame(pool: &mut SurfacePool, n: usize) {
        pool.reset();
        for _ in 0..n {
            pool.acquire();
        }
        pool.release_unused();
    }

    #[test]
    fn first_frame_creates_lazily() {
        let mut pool = SurfacePool::new();
        assert_eq!(pool.live_len(), 0);
        frame(&mut pool, 3);
        assert_eq!(pool.stats().created, 3);
        assert_eq!(pool.checked_out_len(), 3);
        assert_eq!(pool.idle_len(), 0);
        assert!(pool.is_consistent());
    }

    #[test]
    fn steady_frames_reuse_everything() {
        let mut pool = SurfacePool::new();
        frame(&mut pool, 4);
        frame(&mut pool, 4);
        assert_eq!(
            pool.stats(),
            PoolStats {
                created: 0,
                reused: 4,
                disposed: 0
            }
        );
    }

    #[test]
    fn shrinking_frame_disposes_leftovers() {
        let mut pool = SurfacePool::new();
        frame(&mut pool, 5);
        frame(&mut pool, 2);
        assert_eq!(pool.stats().disposed, 3);
        assert_eq!(pool.live_len(), 2);
        assert_eq!(pool.peak(), 5);
        assert!(pool.is_consistent());

        // disposed handles are recycled before the arena grows
        frame(&mut pool, 4);
        assert_eq!(pool.stats().created, 2);
        assert!(pool.checked_out_ids().iter().all(|&id| id < 5));
    }

    #[test]
    fn acquire_clears_previous_visuals() {
        let mut pool = SurfacePool::new();
        pool.reset();
        let s = pool.acquire();
        s.contents = Some(Texture::Wall);
        s.set_double_sided(true);
        pool.release_unused();

        pool.reset();
        let s = pool.acquire();
        assert_eq!(s.contents, None);
        assert_eq!(s.background, None);
    }

    #[test]
    fn live_counter_tracks_slots() {
        let occupied = |pool: &SurfacePool| pool.slots.iter().filter(|s| s.is_some()).count();
        let mut pool = SurfacePool::new();
        for n in [6, 2, 0, 9, 3, 9] {
            frame(&mut pool, n);
            assert_eq!(pool.live_len(), n);
            assert_eq!(pool.live_len(), occupied(&pool));
        }
        assert_eq!(pool.peak(), 9);
        assert_eq!(pool.slots.len(), 9);
    }

    #[test]
    fn idle_and_checked_out_are_disjoint_mid_frame() {
        let mut pool = SurfacePool::new();
        frame(&mut pool, 3);
        pool.reset();
        pool.acquire();
        assert_eq!(pool.idle_len(), 2);
        assert_eq!(pool.checked_out_len(), 1);
        assert!(pool.is_consistent());
    }
}
