mod loader;
mod map;
mod snapshot;
mod texture;
mod things;

pub use loader::{DEMO_LEVEL, MapError, parse_level};
pub use map::{Tile, Tilemap};
pub use snapshot::{Scene, Snapshot};
pub use texture::{Image, Texture, TextureBank, TextureError, TextureResolver};
pub use things::{Animation, Billboard, Color, Effect, EffectKind, Player, Switch};
