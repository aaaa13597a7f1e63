use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Mat4, Vec3};

/// Which face of a grid cell a quad covers, by outward normal.
///
/// Grid `x` maps to world `x`, grid `y` to world `z`; world `y` points down
/// the screen, so `Up` is the floor and `Down` the ceiling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Up,
    Down,
    Forwards,
    Backwards,
    Left,
    Right,
}

/// Placement of one face inside the unit cube, in cell units.
struct Face {
    offset: Vec3,
    axis: Vec3,
    angle: f32,
}

// indexed by `Orientation as usize`
const FACES: [Face; 6] = [
    // Up: floor plane, lying flat
    Face {
        offset: Vec3::new(0.5, 0.5, 0.5),
        axis: Vec3::X,
        angle: FRAC_PI_2,
    },
    // Down: ceiling plane
    Face {
        offset: Vec3::new(0.5, -0.5, 0.5),
        axis: Vec3::X,
        angle: -FRAC_PI_2,
    },
    // Forwards: far edge (+y)
    Face {
        offset: Vec3::new(0.5, 0.0, 1.0),
        axis: Vec3::Y,
        angle: 0.0,
    },
    // Backwards: near edge (-y), turned to face inward
    Face {
        offset: Vec3::new(0.5, 0.0, 0.0),
        axis: Vec3::Y,
        angle: PI,
    },
    // Left: -x edge
    Face {
        offset: Vec3::new(0.0, 0.0, 0.5),
        axis: Vec3::Y,
        angle: -FRAC_PI_2,
    },
    // Right: +x edge
    Face {
        offset: Vec3::new(1.0, 0.0, 0.5),
        axis: Vec3::Y,
        angle: FRAC_PI_2,
    },
];

impl Orientation {
    /// The four side faces a wall may show, in emission order.
    pub const SIDES: [Orientation; 4] = [
        Orientation::Backwards,
        Orientation::Forwards,
        Orientation::Left,
        Orientation::Right,
    ];

    /// Grid step to the cell that shares this face, for side faces.
    pub fn neighbour_offset(self) -> Option<(i64, i64)> {
        match self {
            Orientation::Backwards => Some((0, -1)),
            Orientation::Forwards => Some((0, 1)),
            Orientation::Left => Some((-1, 0)),
            Orientation::Right => Some((1, 0)),
            Orientation::Up | Orientation::Down => None,
        }
    }

    /// Texture slot for side faces: `0` normal to grid X, `1` normal to grid Y.
    pub fn texture_slot(self) -> usize {
        match self {
            Orientation::Left | Orientation::Right | Orientation::Up => 0,
            Orientation::Forwards | Orientation::Backwards | Orientation::Down => 1,
        }
    }

    fn face(self) -> &'static Face {
        &FACES[self as usize]
    }
}

/// Local transform that lays a `scale`-sized quad on `orientation`'s face of
/// cell `(x, y)`.
pub fn face_transform(x: usize, y: usize, orientation: Orientation, scale: f32) -> Mat4 {
    let face = orientation.face();
    let cell = Vec3::new(x as f32 * scale, 0.0, y as f32 * scale);
    Mat4::from_translation(cell)
        * Mat4::from_translation(face.offset * scale)
        * Mat4::from_axis_angle(face.axis, face.angle)
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
