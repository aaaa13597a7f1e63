use std::collections::{HashMap, HashSet};

use crate::world::{
    map::Tilemap,
    things::{Billboard, Effect, Player, Switch},
};

/// Read-only view of the world handed to the renderer once per frame.
///
/// The simulation owns the real state; the renderer only ever sees it
/// through this trait.
pub trait Scene {
    fn player(&self) -> &Player;
    fn map(&self) -> &Tilemap;
    fn sprites(&self) -> &[Billboard];
    fn effects(&self) -> &[Effect];
    fn is_door(&self, x: usize, y: usize) -> bool;
    fn switch_at(&self, x: usize, y: usize) -> Option<&Switch>;
}

/// Plain-data [`Scene`] used by the binaries and tests.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub player: Player,
    pub map: Tilemap,
    pub sprites: Vec<Billboard>,
    pub effects: Vec<Effect>,
    pub doors: HashSet<(usize, usize)>,
    pub switches: HashMap<(usize, usize), Switch>,
}

impl Snapshot {
    pub fn new(map: Tilemap, player: Player) -> Self {
        Self {
            player,
            map,
            sprites: Vec::new(),
            effects: Vec::new(),
            doors: HashSet::new(),
            switches: HashMap::new(),
        }
    }

    /// Step effect clocks and drop the finished ones.
    pub fn advance_effects(&mut self, dt: f32) {
        for fx in &mut self.effects {
            fx.time += dt;
        }
        self.effects.retain(|fx| !fx.is_completed());
    }
}

impl Scene for Snapshot {
    fn player(&self) -> &Player {
        &self.player
    }

    fn map(&self) -> &Tilemap {
        &self.map
    }

    fn sprites(&self) -> &[Billboard] {
        &self.sprites
    }

    fn effects(&self) -> &[Effect] {
        &self.effects
    }

    fn is_door(&self, x: usize, y: usize) -> bool {
        self.doors.contains(&(x, y))
    }

    fn switch_at(&self, x: usize, y: usize) -> Option<&Switch> {
        self.switches.get(&(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{
        map::Tile,
        things::{Color, EffectKind},
    };
    use glam::Vec2;

    #[test]
    fn lookups_hit_only_registered_cells() {
        let mut snap = Snapshot::new(
            Tilemap::filled(3, 3, Tile::Floor),
            Player::new(Vec2::splat(1.5), Vec2::NEG_Y),
        );
        snap.doors.insert((1, 0));
        snap.switches.insert((2, 2), Switch::off());

        assert!(snap.is_door(1, 0));
        assert!(!snap.is_door(0, 1));
        assert!(snap.switch_at(2, 2).is_some());
        assert!(snap.switch_at(1, 1).is_none());
    }

    #[test]
    fn finished_effects_are_dropped() {
        let mut snap = Snapshot::new(
            Tilemap::filled(1, 1, Tile::Floor),
            Player::new(Vec2::splat(0.5), Vec2::X),
        );
        snap.effects
            .push(Effect::new(EffectKind::FadeIn, Color::BLACK, 0.5));
        snap.effects
            .push(Effect::new(EffectKind::FadeOut, Color::RED, 2.0));
        snap.advance_effects(1.0);
        assert_eq!(snap.effects().len(), 1);
        assert_eq!(snap.effects()[0].kind, EffectKind::FadeOut);
    }
}
