//! Map and switch faces.
//!
//! A wall shows a side only towards an in-bounds, non-wall neighbour; an open
//! cell always shows its floor and ceiling.  The map is re-walked every frame,
//! nothing is cached between frames.

use smallvec::SmallVec;

use crate::{
    renderer::Renderer,
    view::{
        add_textured,
        config::ViewConfig,
        orientation::{Orientation, face_transform},
    },
    world::{Scene, TextureResolver, Tilemap},
};

/// Side of a wall cell that borders open space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibleSide {
    pub orientation: Orientation,
    /// Grid coordinates of the open neighbour.
    pub neighbour: (usize, usize),
}

/// Sides of `(x, y)` facing open, in-bounds cells, in emission order.
pub fn visible_sides(map: &Tilemap, x: usize, y: usize) -> SmallVec<[VisibleSide; 4]> {
    let mut sides = SmallVec::new();
    for orientation in Orientation::SIDES {
        let Some((dx, dy)) = orientation.neighbour_offset() else {
            continue;
        };
        let (nx, ny) = (x as i64 + dx, y as i64 + dy);
        if matches!(map.get(nx, ny), Some(tile) if !tile.is_wall()) {
            sides.push(VisibleSide {
                orientation,
                neighbour: (nx as usize, ny as usize),
            });
        }
    }
    sides
}

/// Walls, floors and ceilings.  Returns the number of quads emitted.
pub fn emit_map<S, T, R>(scene: &S, textures: &T, renderer: &mut R, config: &ViewConfig) -> usize
where
    S: Scene + ?Sized,
    T: TextureResolver + ?Sized,
    R: Renderer + ?Sized,
{
    let map = scene.map();
    let scale = renderer.viewport().y;
    let mut emitted = 0;

    for (x, y, tile) in map.cells() {
        let tile_textures = tile.textures();
        if tile.is_wall() {
            for side in visible_sides(map, x, y) {
                let slot = side.orientation.texture_slot();
                let (nx, ny) = side.neighbour;
                let texture = if scene.is_door(nx, ny) {
                    config.door_jambs[slot]
                } else {
                    tile_textures[slot]
                };
                let transform = face_transform(x, y, side.orientation, scale);
                add_textured(renderer, textures, texture, transform, false);
                emitted += 1;
            }
        } else {
            for orientation in [Orientation::Up, Orientation::Down] {
                let texture = tile_textures[orientation.texture_slot()];
                let transform = face_transform(x, y, orientation, scale);
                add_textured(renderer, textures, texture, transform, false);
                emitted += 1;
            }
        }
    }
    emitted
}

/// Switch faces, drawn over the wall faces of their cell.
pub fn emit_switches<S, T, R>(scene: &S, textures: &T, renderer: &mut R) -> usize
where
    S: Scene + ?Sized,
    T: TextureResolver + ?Sized,
    R: Renderer + ?Sized,
{
    let map = scene.map();
    let scale = renderer.viewport().y;
    let mut emitted = 0;

    for (x, y, _) in map.cells() {
        let Some(switch) = scene.switch_at(x, y) else {
            continue;
        };
        let texture = switch.animation.texture();
        for side in visible_sides(map, x, y) {
            let transform = face_transform(x, y, side.orientation, scale);
            add_textured(renderer, textures, texture, transform, false);
            emitted += 1;
        }
    }
    emitted
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        renderer::LayerTree,
        world::{Player, Snapshot, Switch, Texture, TextureBank, Tile},
    };
    use glam::Vec2;

    fn snapshot(rows: &[&str]) -> Snapshot {
        let width = rows[0].len();
        let tiles = rows
            .iter()
            .flat_map(|r| r.chars())
            .map(|c| if c == '#' { Tile::Wall } else { Tile::Floor })
            .collect();
        Snapshot::new(
            Tilemap::new(width, tiles),
            Player::new(Vec2::splat(0.5), Vec2::NEG_Y),
        )
    }

    fn draw_map(snap: &Snapshot) -> (usize, Vec<Option<Texture>>) {
        let bank = TextureBank::procedural();
        let mut tree = LayerTree::new(64, 48);
        tree.begin_frame();
        let n = emit_map(snap, &bank, &mut tree, &ViewConfig::default());
        tree.release_unused();
        (n, tree.surfaces().map(|s| s.contents).collect())
    }

    #[test]
    fn wall_counts_only_open_in_bounds_neighbours() {
        let snap = snapshot(&["#.#", "...", "###"]);
        let map = snap.map();
        assert_eq!(visible_sides(map, 0, 0).len(), 2); // right, below
        assert_eq!(visible_sides(map, 1, 2).len(), 1); // only above
        assert_eq!(visible_sides(map, 0, 2).len(), 1);
        let sides = visible_sides(map, 2, 0);
        assert_eq!(sides[0].orientation, Orientation::Forwards);
        assert_eq!(sides[1].orientation, Orientation::Left);
    }

    #[test]
    fn isolated_wall_shows_nothing() {
        let snap = snapshot(&["#"]);
        assert!(visible_sides(snap.map(), 0, 0).is_empty());
        assert_eq!(draw_map(&snap).0, 0);
    }

    #[test]
    fn open_cells_emit_floor_then_ceiling() {
        let snap = snapshot(&["."]);
        let (n, contents) = draw_map(&snap);
        assert_eq!(n, 2);
        assert_eq!(contents, vec![Some(Texture::Floor), Some(Texture::Ceiling)]);
    }

    #[test]
    fn door_neighbour_swaps_in_jamb() {
        // wall, door cell, wall along x; open cells above and below
        let mut snap = snapshot(&["...", "#.#", "..."]);
        snap.doors.insert((1, 1));
        let (_, contents) = draw_map(&snap);
        // both X-normal faces towards the door use the jamb
        let jambs = contents
            .iter()
            .filter(|c| **c == Some(Texture::DoorJamb))
            .count();
        assert_eq!(jambs, 2);
        assert!(!contents.contains(&Some(Texture::Wall)));
        // Y-normal faces border plain floor
        assert!(contents.contains(&Some(Texture::Wall2)));
    }

    #[test]
    fn door_above_uses_y_jamb() {
        let mut snap = snapshot(&[".", "#"]);
        snap.doors.insert((0, 0));
        let (_, contents) = draw_map(&snap);
        assert!(contents.contains(&Some(Texture::DoorJamb2)));
    }

    #[test]
    fn switch_faces_follow_wall_visibility() {
        let mut snap = snapshot(&["...", ".#.", "..."]);
        let mut flipping = Switch::flipped();
        flipping.animation.time = 10.0;
        snap.switches.insert((1, 1), flipping);
        snap.doors.insert((1, 0)); // no jamb substitution for switches

        let bank = TextureBank::procedural();
        let mut tree = LayerTree::new(64, 48);
        tree.begin_frame();
        let n = emit_switches(&snap, &bank, &mut tree);
        tree.release_unused();

        assert_eq!(n, 4);
        assert!(tree.surfaces().all(|s| s.contents == Some(Texture::Switch4)));
    }
}
