//! ASCII level format.
//!
//! ```text
//! #####
//! #P.M#
//! #.#D#
//! #..S#
//! #####
//! ```
//!
//! | glyph | meaning                                   |
//! |-------|-------------------------------------------|
//! | `#`   | wall                                      |
//! | `/`   | cracked wall                              |
//! | `~`   | slime wall                                |
//! | `.`   | floor                                     |
//! | `,`   | cracked floor                             |
//! | `P`   | floor + player start (facing north, -Y)   |
//! | `M`   | floor + monster billboard                 |
//! | `D`   | floor + door                              |
//! | `S`   | wall + switch                             |
//!
//! Blank lines are ignored; every other line must have the same width.

use glam::Vec2;
use thiserror::Error;

use crate::world::{
    map::{Tile, Tilemap},
    snapshot::Snapshot,
    texture::Texture,
    things::{Billboard, Player, Switch},
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MapError {
    #[error("map has no rows")]
    Empty,

    #[error("row {row} is {found} cells wide, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown glyph `{glyph}` at ({x}, {y})")]
    UnknownGlyph { glyph: char, x: usize, y: usize },

    #[error("map has no player start `P`")]
    NoPlayer,
}

/// Parse the text format above into a ready-to-draw snapshot.
pub fn parse_level(text: &str) -> Result<Snapshot, MapError> {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .collect();
    let Some(first) = rows.first() else {
        return Err(MapError::Empty);
    };
    let width = first.chars().count();

    let mut tiles = Vec::with_capacity(width * rows.len());
    let mut player = None;
    let mut monsters = Vec::new();
    let mut doors = Vec::new();
    let mut switches = Vec::new();

    for (y, row) in rows.iter().enumerate() {
        let found = row.chars().count();
        if found != width {
            return Err(MapError::Ragged {
                row: y,
                expected: width,
                found,
            });
        }
        for (x, glyph) in row.chars().enumerate() {
            let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let tile = match glyph {
                '#' => Tile::Wall,
                '/' => Tile::CrackWall,
                '~' => Tile::SlimeWall,
                '.' => Tile::Floor,
                ',' => Tile::CrackFloor,
                'P' => {
                    player = Some(center);
                    Tile::Floor
                }
                'M' => {
                    monsters.push(center);
                    Tile::Floor
                }
                'D' => {
                    doors.push((x, y));
                    Tile::Floor
                }
                'S' => {
                    switches.push((x, y));
                    Tile::Wall
                }
                _ => return Err(MapError::UnknownGlyph { glyph, x, y }),
            };
            tiles.push(tile);
        }
    }

    let position = player.ok_or(MapError::NoPlayer)?;
    let map = Tilemap::new(width, tiles);
    let mut snap = Snapshot::new(map, Player::new(position, Vec2::NEG_Y));

    for &(x, y) in &doors {
        snap.doors.insert((x, y));
        snap.sprites.push(door_billboard(&snap.map, x, y));
    }
    for pos in switches {
        snap.switches.insert(pos, Switch::off());
    }
    for pos in monsters {
        let facing = (snap.player.position - pos).normalize_or_zero();
        snap.sprites
            .push(Billboard::facing(pos, facing, 1.0, Texture::Monster));
    }
    Ok(snap)
}

/// Closed door panel spanning the cell between its two wall neighbours.
fn door_billboard(map: &Tilemap, x: usize, y: usize) -> Billboard {
    let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
    let (xi, yi) = (x as i64, y as i64);
    let walls_left_right = map.get(xi - 1, yi).is_some_and(Tile::is_wall)
        && map.get(xi + 1, yi).is_some_and(Tile::is_wall);
    // panel runs from wall to wall
    let direction = if walls_left_right { Vec2::X } else { Vec2::Y };
    Billboard::across(center, direction, 1.0, Texture::Door)
}

/// Small level used when no map file is given.
pub const DEMO_LEVEL: &str = "\
##########
#P.,.....#
#.#####D##
#.#..M...#
#.D..#...#
#.#..#.M.S
#~#......#
#.####/###
#........#
##########
";

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::snapshot::Scene;

    #[test]
    fn demo_level_parses() {
        let snap = parse_level(DEMO_LEVEL).unwrap();
        assert_eq!(snap.map().width(), 10);
        assert_eq!(snap.map().height(), 10);
        assert_eq!(snap.player().position, Vec2::new(1.5, 1.5));
        assert!(snap.is_door(7, 2));
        assert!(snap.is_door(2, 4));
        assert!(snap.switch_at(9, 5).is_some());
        // two doors + two monsters
        assert_eq!(snap.sprites().len(), 4);
    }

    #[test]
    fn door_between_horizontal_walls_runs_along_x() {
        let snap = parse_level("#D#\n.P.\n").unwrap();
        let door = snap.sprites()[0];
        assert_eq!(door.direction, Vec2::X);
        assert_eq!(door.start, Vec2::new(1.0, 0.5));
        assert_eq!(door.texture, Texture::Door);
    }

    #[test]
    fn errors_are_reported() {
        assert_eq!(parse_level("\n\n").unwrap_err(), MapError::Empty);
        assert_eq!(
            parse_level("P..\n..\n").unwrap_err(),
            MapError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            }
        );
        assert_eq!(
            parse_level("P?\n").unwrap_err(),
            MapError::UnknownGlyph {
                glyph: '?',
                x: 1,
                y: 0
            }
        );
        assert_eq!(parse_level("...\n").unwrap_err(), MapError::NoPlayer);
    }
}
