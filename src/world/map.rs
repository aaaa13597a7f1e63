use crate::world::texture::Texture;

/// One grid cell.  Walls occupy the whole unit cube, everything else is an
/// open cell with a floor and a ceiling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Floor,
    CrackFloor,
    Wall,
    CrackWall,
    SlimeWall,
    ElevatorFloor,
    ElevatorBackWall,
    ElevatorSideWall,
}

impl Tile {
    #[inline]
    pub fn is_wall(self) -> bool {
        match self {
            Tile::Wall
            | Tile::CrackWall
            | Tile::SlimeWall
            | Tile::ElevatorBackWall
            | Tile::ElevatorSideWall => true,
            Tile::Floor | Tile::CrackFloor | Tile::ElevatorFloor => false,
        }
    }

    /// Per-face textures.
    ///
    /// * walls: `[0]` faces normal to the X axis, `[1]` faces normal to Y
    /// * open cells: `[0]` floor, `[1]` ceiling
    pub fn textures(self) -> [Texture; 2] {
        match self {
            Tile::Floor => [Texture::Floor, Texture::Ceiling],
            Tile::CrackFloor => [Texture::CrackFloor, Texture::Ceiling],
            Tile::Wall => [Texture::Wall, Texture::Wall2],
            Tile::CrackWall => [Texture::CrackWall, Texture::CrackWall2],
            Tile::SlimeWall => [Texture::SlimeWall, Texture::SlimeWall2],
            Tile::ElevatorFloor => [Texture::ElevatorFloor, Texture::Ceiling],
            Tile::ElevatorBackWall => [Texture::ElevatorBackWall, Texture::ElevatorBackWall],
            Tile::ElevatorSideWall => [Texture::ElevatorSideWall, Texture::ElevatorSideWall],
        }
    }
}

/// Row-major grid of tiles, immutable for the duration of a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Tilemap {
    width: usize,
    tiles: Vec<Tile>,
}

impl Tilemap {
    /// Build from row-major `tiles`.  A trailing partial row is dropped.
    pub fn new(width: usize, mut tiles: Vec<Tile>) -> Self {
        if width == 0 {
            tiles.clear();
        } else {
            tiles.truncate(tiles.len() / width * width);
        }
        Self { width, tiles }
    }

    /// A `width × height` map filled with `tile`.
    pub fn filled(width: usize, height: usize, tile: Tile) -> Self {
        Self::new(width, vec![tile; width * height])
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.tiles.len() / self.width
        }
    }

    /// Bounds-checked lookup.  Signed so callers can probe `x - 1` freely.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> Option<Tile> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height() {
            return None;
        }
        self.tiles.get(y as usize * self.width + x as usize).copied()
    }

    pub fn set(&mut self, x: usize, y: usize, tile: Tile) {
        if x < self.width && y < self.height() {
            self.tiles[y * self.width + x] = tile;
        }
    }

    /// Iterate `(x, y, tile)` in row-major order (y outer, x inner).
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        let w = self.width.max(1);
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, t)| (i % w, i / w, *t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_is_none() {
        let map = Tilemap::filled(3, 2, Tile::Floor);
        assert_eq!(map.height(), 2);
        assert_eq!(map.get(-1, 0), None);
        assert_eq!(map.get(0, -1), None);
        assert_eq!(map.get(3, 0), None);
        assert_eq!(map.get(0, 2), None);
        assert_eq!(map.get(2, 1), Some(Tile::Floor));
    }

    #[test]
    fn cells_are_row_major() {
        let mut map = Tilemap::filled(2, 2, Tile::Floor);
        map.set(1, 0, Tile::Wall);
        let order: Vec<_> = map.cells().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(order, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
        assert_eq!(map.get(1, 0), Some(Tile::Wall));
    }

    #[test]
    fn ragged_tail_dropped() {
        let map = Tilemap::new(2, vec![Tile::Floor; 5]);
        assert_eq!(map.height(), 2);
        assert_eq!(Tilemap::new(0, vec![Tile::Wall; 3]).height(), 0);
    }

    #[test]
    fn wall_textures_split_by_axis() {
        let [x_faces, y_faces] = Tile::Wall.textures();
        assert_eq!(x_faces, Texture::Wall);
        assert_eq!(y_faces, Texture::Wall2);
        assert!(!Tile::CrackFloor.is_wall());
        assert!(Tile::ElevatorSideWall.is_wall());
    }
}
