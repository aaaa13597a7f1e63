// Named textures of the tile world and the bank that maps them to pixels.
// Emitters only ever see `Texture`; pixels are looked up through
// `TextureResolver` so the bank can be swapped for a real asset loader.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Every texture the world can reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Texture {
    Wall,
    Wall2,
    CrackWall,
    CrackWall2,
    SlimeWall,
    SlimeWall2,
    Door,
    Door2,
    DoorJamb,
    DoorJamb2,
    Floor,
    CrackFloor,
    Ceiling,
    ElevatorFloor,
    ElevatorBackWall,
    ElevatorSideWall,
    Switch1,
    Switch2,
    Switch3,
    Switch4,
    Monster,
    MonsterWalk1,
    MonsterWalk2,
    Pistol,
    PistolFire1,
    PistolFire2,
}

impl Texture {
    pub const ALL: [Texture; 26] = [
        Texture::Wall,
        Texture::Wall2,
        Texture::CrackWall,
        Texture::CrackWall2,
        Texture::SlimeWall,
        Texture::SlimeWall2,
        Texture::Door,
        Texture::Door2,
        Texture::DoorJamb,
        Texture::DoorJamb2,
        Texture::Floor,
        Texture::CrackFloor,
        Texture::Ceiling,
        Texture::ElevatorFloor,
        Texture::ElevatorBackWall,
        Texture::ElevatorSideWall,
        Texture::Switch1,
        Texture::Switch2,
        Texture::Switch3,
        Texture::Switch4,
        Texture::Monster,
        Texture::MonsterWalk1,
        Texture::MonsterWalk2,
        Texture::Pistol,
        Texture::PistolFire1,
        Texture::PistolFire2,
    ];

    /// Asset name, as an image loader would look it up.
    pub fn name(self) -> &'static str {
        match self {
            Texture::Wall => "wall",
            Texture::Wall2 => "wall2",
            Texture::CrackWall => "crackWall",
            Texture::CrackWall2 => "crackWall2",
            Texture::SlimeWall => "slimeWall",
            Texture::SlimeWall2 => "slimeWall2",
            Texture::Door => "door",
            Texture::Door2 => "door2",
            Texture::DoorJamb => "doorjamb",
            Texture::DoorJamb2 => "doorjamb2",
            Texture::Floor => "floor",
            Texture::CrackFloor => "crackFloor",
            Texture::Ceiling => "ceiling",
            Texture::ElevatorFloor => "elevatorFloor",
            Texture::ElevatorBackWall => "elevatorBackWall",
            Texture::ElevatorSideWall => "elevatorSideWall",
            Texture::Switch1 => "switch1",
            Texture::Switch2 => "switch2",
            Texture::Switch3 => "switch3",
            Texture::Switch4 => "switch4",
            Texture::Monster => "monster",
            Texture::MonsterWalk1 => "monsterWalk1",
            Texture::MonsterWalk2 => "monsterWalk2",
            Texture::Pistol => "pistol",
            Texture::PistolFire1 => "pistolFire1",
            Texture::PistolFire2 => "pistolFire2",
        }
    }

    /// Reverse of [`Texture::name`].
    pub fn by_name(name: &str) -> Option<Texture> {
        BY_NAME.get(name).copied()
    }
}

static BY_NAME: Lazy<HashMap<&'static str, Texture>> =
    Lazy::new(|| Texture::ALL.iter().map(|t| (t.name(), *t)).collect());

/// CPU-side pixels: 32-bit **ARGB** (0xAARRGGBB) in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    pub w: usize,
    pub h: usize,
    pub pixels: Vec<u32>,
}

impl Image {
    /// Natural width / height.  A zero-height image reports `1.0`.
    #[inline]
    pub fn aspect_ratio(&self) -> f32 {
        if self.h == 0 {
            return 1.0;
        }
        self.w as f32 / self.h as f32
    }

    /// Nearest-neighbour lookup with `u`, `v` in `0..1`.  Texels outside a
    /// short pixel buffer read as transparent.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> u32 {
        if self.w == 0 || self.h == 0 {
            return 0;
        }
        let x = ((u * self.w as f32) as usize).min(self.w - 1);
        let y = ((v * self.h as f32) as usize).min(self.h - 1);
        self.pixels.get(y * self.w + x).copied().unwrap_or(0)
    }
}

/// Anything that can turn a [`Texture`] into pixels.
///
/// Returning `None` is not an error: the surface is simply left blank.
pub trait TextureResolver {
    fn resolve(&self, texture: Texture) -> Option<&Image>;

    /// Aspect ratio of `texture`, `1.0` when it cannot be resolved.
    fn aspect_ratio(&self, texture: Texture) -> f32 {
        self.resolve(texture).map_or(1.0, Image::aspect_ratio)
    }
}

/// Things that can go wrong when filling the bank.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    /// Attempted to insert a second image for the same texture.
    #[error("texture `{0}` already present in bank")]
    Duplicate(&'static str),

    /// Pixel buffer does not hold `w * h` texels.
    #[error("texture `{texture}` needs {expected} pixels, got {found}")]
    BadSize {
        texture: &'static str,
        expected: usize,
        found: usize,
    },
}

/// A format-agnostic cache of decoded textures.
///
/// * Does **not** know about PNG or any file format, that's the loader's job.
/// * Stores at most one image per [`Texture`].
#[derive(Default)]
pub struct TextureBank {
    data: HashMap<Texture, Image>,
}

impl TextureBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// A bank with a generated placeholder for every texture, so the
    /// binaries run without any asset files.
    pub fn procedural() -> Self {
        let mut bank = Self::new();
        for tex in Texture::ALL {
            bank.data.insert(tex, placeholder(tex));
        }
        bank
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Insert the image for `texture`.  Fails on a second insert or a pixel
    /// buffer that does not match the image size.
    pub fn insert(&mut self, texture: Texture, image: Image) -> Result<(), TextureError> {
        if self.data.contains_key(&texture) {
            return Err(TextureError::Duplicate(texture.name()));
        }
        let expected = image.w * image.h;
        if image.pixels.len() != expected {
            return Err(TextureError::BadSize {
                texture: texture.name(),
                expected,
                found: image.pixels.len(),
            });
        }
        self.data.insert(texture, image);
        Ok(())
    }

    /// Textures that have no image yet.
    pub fn missing(&self) -> impl Iterator<Item = Texture> + '_ {
        Texture::ALL
            .into_iter()
            .filter(|t| !self.data.contains_key(t))
    }
}

impl TextureResolver for TextureBank {
    fn resolve(&self, texture: Texture) -> Option<&Image> {
        self.data.get(&texture)
    }
}

/*──────────────────────── procedural art ────────────────────────────*/

const TILE: usize = 16;

fn placeholder(tex: Texture) -> Image {
    let (light, dark) = palette(tex);
    // sprites are drawn with a transparent border, everything else is solid
    let sprite = matches!(
        tex,
        Texture::Monster
            | Texture::MonsterWalk1
            | Texture::MonsterWalk2
            | Texture::Pistol
            | Texture::PistolFire1
            | Texture::PistolFire2
    );
    let mut pixels = vec![0u32; TILE * TILE];
    for y in 0..TILE {
        for x in 0..TILE {
            let edge = x < 3 || x >= TILE - 3 || y < 2;
            pixels[y * TILE + x] = if sprite && edge {
                0x00_000000
            } else if (x / 4 + y / 4) % 2 == 0 {
                light
            } else {
                dark
            };
        }
    }
    Image {
        w: TILE,
        h: TILE,
        pixels,
    }
}

fn palette(tex: Texture) -> (u32, u32) {
    match tex {
        Texture::Wall | Texture::Wall2 => (0xFF_7070A0, 0xFF_505080),
        Texture::CrackWall | Texture::CrackWall2 => (0xFF_808080, 0xFF_404040),
        Texture::SlimeWall | Texture::SlimeWall2 => (0xFF_60A060, 0xFF_306030),
        Texture::Door | Texture::Door2 => (0xFF_A08040, 0xFF_806020),
        Texture::DoorJamb | Texture::DoorJamb2 => (0xFF_909090, 0xFF_707070),
        Texture::Floor | Texture::CrackFloor | Texture::ElevatorFloor => {
            (0xFF_604830, 0xFF_483420)
        }
        Texture::Ceiling => (0xFF_404040, 0xFF_303030),
        Texture::ElevatorBackWall | Texture::ElevatorSideWall => (0xFF_A0A0B0, 0xFF_8080A0),
        Texture::Switch1 | Texture::Switch2 => (0xFF_C04040, 0xFF_802020),
        Texture::Switch3 | Texture::Switch4 => (0xFF_40C040, 0xFF_208020),
        Texture::Monster | Texture::MonsterWalk1 | Texture::MonsterWalk2 => {
            (0xFF_C0A080, 0xFF_906040)
        }
        Texture::Pistol | Texture::PistolFire1 | Texture::PistolFire2 => {
            (0xFF_303030, 0xFF_202020)
        }
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
