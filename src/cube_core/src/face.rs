use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::lattice::Vec3;

/// One side of the cube.
///
/// The discriminants are the positions of the faces in a [`CubeState`] and
/// therefore in the wire format: Right, Left, Up, Down, Front, Back. Never
/// reorder the variants.
///
/// [`CubeState`]: crate::CubeState
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    Right,
    Left,
    Up,
    Down,
    Front,
    Back,
}

impl Face {
    pub const ALL: [Self; 6] = {
        use Face::*;
        let v = [Right, Left, Up, Down, Front, Back];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    /// Position of the face in the canonical face order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Single letter used in move notation.
    pub fn letter(self) -> char {
        match self {
            Face::Right => 'R',
            Face::Left => 'L',
            Face::Up => 'U',
            Face::Down => 'D',
            Face::Front => 'F',
            Face::Back => 'B',
        }
    }

    pub fn from_letter(letter: char) -> Option<Face> {
        Face::ALL.into_iter().find(|face| face.letter() == letter)
    }

    pub fn opposite(self) -> Face {
        match self {
            Face::Right => Face::Left,
            Face::Left => Face::Right,
            Face::Up => Face::Down,
            Face::Down => Face::Up,
            Face::Front => Face::Back,
            Face::Back => Face::Front,
        }
    }

    /// Unit vector pointing out of the cube through this face.
    pub fn normal(self) -> Vec3 {
        match self {
            Face::Right => [1, 0, 0],
            Face::Left => [-1, 0, 0],
            Face::Up => [0, 1, 0],
            Face::Down => [0, -1, 0],
            Face::Front => [0, 0, 1],
            Face::Back => [0, 0, -1],
        }
    }

    /// Direction of increasing column when the face is viewed from outside.
    pub fn right(self) -> Vec3 {
        match self {
            Face::Right => [0, 0, -1],
            Face::Left => [0, 0, 1],
            Face::Up | Face::Down | Face::Front => [1, 0, 0],
            Face::Back => [-1, 0, 0],
        }
    }

    /// Direction of increasing row when the face is viewed from outside.
    ///
    /// Side faces are upright. The top row of U touches B and the top row of
    /// D touches F, as in the usual unfolded net.
    pub fn down(self) -> Vec3 {
        match self {
            Face::Right | Face::Left | Face::Front | Face::Back => [0, -1, 0],
            Face::Up => [0, 0, 1],
            Face::Down => [0, 0, -1],
        }
    }

    /// The face whose outward normal is `normal`, if any.
    pub fn from_normal(normal: Vec3) -> Option<Face> {
        Face::ALL.into_iter().find(|face| face.normal() == normal)
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Face {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Face::from_letter(letter).ok_or(()),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::{cross, dot};

    #[test]
    fn opposite_faces_have_opposite_normals() {
        for face in Face::ALL {
            let n = face.normal();
            assert_eq!(face.opposite().normal(), [-n[0], -n[1], -n[2]]);
            assert_eq!(face.opposite().opposite(), face);
        }
    }

    #[test]
    fn layouts_are_seen_from_outside() {
        // right × up must point out of the cube, otherwise the face is mirrored
        for face in Face::ALL {
            let up = face.down().map(|c| -c);
            assert_eq!(cross(face.right(), up), face.normal(), "{face:?}");
            assert_eq!(dot(face.right(), face.normal()), 0);
        }
    }

    #[test]
    fn letters_round_trip() {
        for face in Face::ALL {
            assert_eq!(face.letter().to_string().parse::<Face>(), Ok(face));
        }
        assert!("X".parse::<Face>().is_err());
        assert!("RR".parse::<Face>().is_err());
    }
}
