//! Piece coordinates and the mapping from a piece on a face to a facelet slot.

use std::fmt;

use crate::face::Face;

/// An integer vector. Every vector used by the cube has components in
/// `{-1, 0, 1}`.
pub type Vec3 = [i8; 3];

pub fn dot(a: Vec3, b: Vec3) -> i8 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Turn `v` a quarter turn clockwise around `axis`, looking at the origin from
/// the tip of `axis`.
///
/// This is a rotation by -90° under the right hand rule: `v × n + n (n · v)`.
pub fn quarter_turn_clockwise(v: Vec3, axis: Vec3) -> Vec3 {
    let along = dot(axis, v);
    let turned = cross(v, axis);
    [
        turned[0] + axis[0] * along,
        turned[1] + axis[1] * along,
        turned[2] + axis[2] * along,
    ]
}

/// One of the 27 sub-cube positions.
///
/// x points right, y points up and z points out of the front face.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lattice {
    pub x: i8,
    pub y: i8,
    pub z: i8,
}

impl Lattice {
    pub const CORE: Lattice = Lattice { x: 0, y: 0, z: 0 };

    /// # Panics
    ///
    /// Panics if a coordinate lies outside `-1..=1`.
    pub fn new(x: i8, y: i8, z: i8) -> Lattice {
        assert!(
            [x, y, z].iter().all(|c| (-1..=1).contains(c)),
            "lattice coordinates must be in -1..=1, got ({x}, {y}, {z})"
        );
        Lattice { x, y, z }
    }

    /// All 27 positions, the core included, in x-major order.
    pub fn all() -> impl Iterator<Item = Lattice> {
        (-1..=1).flat_map(|x| {
            (-1..=1).flat_map(move |y| (-1..=1).map(move |z| Lattice { x, y, z }))
        })
    }

    pub fn to_vec(self) -> Vec3 {
        [self.x, self.y, self.z]
    }

    pub(crate) fn from_vec(v: Vec3) -> Lattice {
        Lattice::new(v[0], v[1], v[2])
    }

    /// Whether this piece touches the plane of `face`.
    pub fn is_on(self, face: Face) -> bool {
        dot(self.to_vec(), face.normal()) == 1
    }

    /// The faces this piece shows stickers on. The core shows none, centers
    /// one, edges two and corners three.
    pub fn faces(self) -> impl Iterator<Item = Face> {
        Face::ALL.into_iter().filter(move |&face| self.is_on(face))
    }
}

impl fmt::Display for Lattice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// The facelet slot `pos` occupies on `face`, or `None` if the piece is not on
/// that face.
pub fn try_face_index(pos: Lattice, face: Face) -> Option<usize> {
    if !pos.is_on(face) {
        return None;
    }

    let v = pos.to_vec();
    let row = 1 + dot(v, face.down());
    let col = 1 + dot(v, face.right());
    Some(usize::try_from(row * 3 + col).expect("row and col are in 0..=2"))
}

/// The facelet slot `pos` occupies on `face`, in `0..=8`.
///
/// # Panics
///
/// Panics if `pos` is not on the plane of `face`.
pub fn face_index(pos: Lattice, face: Face) -> usize {
    try_face_index(pos, face).unwrap_or_else(|| panic!("{pos} is not on the {face:?} face"))
}

/// The piece whose sticker sits in slot `index` of `face`. Inverse of
/// [`face_index`].
///
/// # Panics
///
/// Panics if `index` is not in `0..=8`.
pub fn facelet_position(face: Face, index: usize) -> Lattice {
    assert!(index < 9, "facelet index {index} out of range");

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let (row, col) = ((index / 3) as i8 - 1, (index % 3) as i8 - 1);
    let (n, r, d) = (face.normal(), face.right(), face.down());
    Lattice::from_vec([
        n[0] + r[0] * col + d[0] * row,
        n[1] + r[1] * col + d[1] * row,
        n[2] + r[2] * col + d[2] * row,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn front_face_reads_like_a_page() {
        assert_eq!(face_index(Lattice::new(-1, 1, 1), Face::Front), 0);
        assert_eq!(face_index(Lattice::new(1, 1, 1), Face::Front), 2);
        assert_eq!(face_index(Lattice::new(0, 0, 1), Face::Front), 4);
        assert_eq!(face_index(Lattice::new(-1, -1, 1), Face::Front), 6);
    }

    #[test]
    fn mirrored_faces() {
        // Back is seen from behind, so its left column is on the +x side
        assert_eq!(face_index(Lattice::new(1, 1, -1), Face::Back), 0);
        // Right face: left column touches the front
        assert_eq!(face_index(Lattice::new(1, 1, 1), Face::Right), 0);
        assert_eq!(face_index(Lattice::new(1, 1, -1), Face::Right), 2);
        // Left face: left column touches the back
        assert_eq!(face_index(Lattice::new(-1, 1, -1), Face::Left), 0);
        // Up: top row touches the back, Down: top row touches the front
        assert_eq!(face_index(Lattice::new(-1, 1, -1), Face::Up), 0);
        assert_eq!(face_index(Lattice::new(-1, 1, 1), Face::Up), 6);
        assert_eq!(face_index(Lattice::new(-1, -1, 1), Face::Down), 0);
        assert_eq!(face_index(Lattice::new(-1, -1, -1), Face::Down), 6);
    }

    #[test]
    fn index_and_position_are_inverse() {
        for face in Face::ALL {
            for index in 0..9 {
                let pos = facelet_position(face, index);
                assert!(pos.is_on(face));
                assert_eq!(face_index(pos, face), index);
            }
        }
    }

    #[test]
    fn every_sticker_has_a_slot() {
        let mut seen = [[false; 9]; 6];
        for pos in Lattice::all() {
            for face in pos.faces() {
                let slot = &mut seen[face.index()][face_index(pos, face)];
                assert!(!*slot);
                *slot = true;
            }
        }
        assert!(seen.iter().flatten().all(|&s| s));
    }

    #[test]
    fn pieces_show_the_right_number_of_faces() {
        assert_eq!(Lattice::CORE.faces().count(), 0);
        assert_eq!(Lattice::new(0, 0, 1).faces().count(), 1);
        assert_eq!(Lattice::new(0, 1, 1).faces().count(), 2);
        assert_eq!(Lattice::new(1, 1, 1).faces().count(), 3);
        assert_eq!(Lattice::all().count(), 27);
    }

    #[test]
    fn off_plane_is_none() {
        assert_eq!(try_face_index(Lattice::new(0, 1, 1), Face::Right), None);
        assert_eq!(try_face_index(Lattice::CORE, Face::Up), None);
    }

    #[test]
    #[should_panic(expected = "not on the Left face")]
    fn off_plane_panics() {
        face_index(Lattice::new(1, 0, 0), Face::Left);
    }

    #[test]
    fn quarter_turn_is_clockwise_from_outside() {
        // Seen from the front, the top of the face moves to the right
        assert_eq!(quarter_turn_clockwise([0, 1, 0], [0, 0, 1]), [1, 0, 0]);
        // Seen from above, the front moves to the left
        assert_eq!(quarter_turn_clockwise([0, 0, 1], [0, 1, 0]), [-1, 0, 0]);
        // Components along the axis are untouched
        assert_eq!(quarter_turn_clockwise([1, 1, 0], [1, 0, 0]), [1, 0, -1]);
    }
}
