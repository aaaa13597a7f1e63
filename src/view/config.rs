use thiserror::Error;

use crate::world::Texture;

/// Tunables of the quad view.  `Default` gives the classic look.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewConfig {
    /// Eye distance of the perspective divide (`m34 = -1 / distance`).
    pub perspective_distance: f32,
    /// Depth of the weapon sprite in front of the un-transformed camera.
    pub weapon_depth: f32,
    /// Depth of full-screen overlays; must be nearer than the weapon.
    pub overlay_depth: f32,
    /// Substitutes for wall faces next to a door, indexed like
    /// [`crate::world::Tile::textures`]: `[0]` X-normal faces, `[1]` Y-normal.
    pub door_jambs: [Texture; 2],
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            perspective_distance: 500.0,
            weapon_depth: 4900.0,
            overlay_depth: 5000.0,
            door_jambs: [Texture::DoorJamb, Texture::DoorJamb2],
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("perspective distance must be positive, got {0}")]
    Perspective(f32),

    #[error("overlay depth {overlay} must exceed weapon depth {weapon}")]
    OverlayBehindWeapon { overlay: f32, weapon: f32 },
}

impl ViewConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.perspective_distance > 0.0) {
            return Err(ConfigError::Perspective(self.perspective_distance));
        }
        if self.overlay_depth <= self.weapon_depth {
            return Err(ConfigError::OverlayBehindWeapon {
                overlay: self.overlay_depth,
                weapon: self.weapon_depth,
            });
        }
        Ok(())
    }
}
