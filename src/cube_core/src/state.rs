use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    color::{Color, ColorScheme},
    face::Face,
    lattice::{Lattice, face_index},
};

pub const FACE_COUNT: usize = 6;
pub const FACELETS_PER_FACE: usize = 9;
pub const FACELET_COUNT: usize = FACE_COUNT * FACELETS_PER_FACE;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedStateError {
    #[error("Expected {expected} faces but got {actual}")]
    WrongFaceCount { expected: usize, actual: usize },
    #[error("Expected {expected} facelets on the {face:?} face but got {actual}")]
    WrongFaceletCount {
        face: Face,
        expected: usize,
        actual: usize,
    },
    #[error("Unknown color {name:?} at facelet {index} of the {face:?} face")]
    UnknownColor {
        face: Face,
        index: usize,
        name: String,
    },
}

/// The colors of all 54 facelets.
///
/// Faces are stored in canonical order (Right, Left, Up, Down, Front, Back),
/// each as a row-major 3×3 grid seen from outside the cube. See
/// [`face_index`](crate::face_index) for the exact layout.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<String>>", into = "Vec<Vec<Color>>")]
pub struct CubeState {
    faces: [[Color; FACELETS_PER_FACE]; FACE_COUNT],
}

impl CubeState {
    /// Every face a single color, as given by `scheme`.
    pub fn solved(scheme: &ColorScheme) -> CubeState {
        CubeState {
            faces: scheme.colors().map(|color| [color; FACELETS_PER_FACE]),
        }
    }

    pub fn from_faces(faces: [[Color; FACELETS_PER_FACE]; FACE_COUNT]) -> CubeState {
        CubeState { faces }
    }

    pub fn faces(&self) -> &[[Color; FACELETS_PER_FACE]; FACE_COUNT] {
        &self.faces
    }

    pub fn face(&self, face: Face) -> &[Color; FACELETS_PER_FACE] {
        &self.faces[face.index()]
    }

    /// # Panics
    ///
    /// Panics if `index` is not in `0..=8`.
    pub fn facelet(&self, face: Face, index: usize) -> Color {
        self.faces[face.index()][index]
    }

    /// The stickers shown by the piece at `pos`, one per face it touches:
    /// three for a corner, two for an edge, one for a center and none for the
    /// core.
    pub fn piece_colors(&self, pos: Lattice) -> impl Iterator<Item = (Face, Color)> + '_ {
        pos.faces()
            .map(move |face| (face, self.facelet(face, face_index(pos, face))))
    }

    /// Facelet by its flat slot `face * 9 + index`.
    pub(crate) fn slot(&self, slot: usize) -> Color {
        self.faces[slot / FACELETS_PER_FACE][slot % FACELETS_PER_FACE]
    }

    pub(crate) fn slot_mut(&mut self, slot: usize) -> &mut Color {
        &mut self.faces[slot / FACELETS_PER_FACE][slot % FACELETS_PER_FACE]
    }

    /// All 54 facelets in slot order.
    pub fn facelets(&self) -> impl Iterator<Item = Color> + '_ {
        self.faces.iter().flatten().copied()
    }

    /// How many facelets show each color, indexed like [`Color::ALL`].
    pub fn color_counts(&self) -> [usize; 6] {
        let mut counts = [0; 6];
        for color in self.facelets() {
            counts[color as usize] += 1;
        }
        counts
    }

    /// Whether every color appears exactly 9 times. Holds for every state
    /// reachable from a solved cube.
    pub fn has_valid_color_counts(&self) -> bool {
        self.color_counts() == [FACELETS_PER_FACE; 6]
    }

    /// Whether every face shows a single color, whatever the color scheme.
    pub fn is_solved(&self) -> bool {
        self.faces
            .iter()
            .all(|face| face.iter().all(|&color| color == face[0]))
    }

    /// Whether this is exactly the solved state of `scheme`.
    pub fn is_default(&self, scheme: &ColorScheme) -> bool {
        *self == CubeState::solved(scheme)
    }
}

impl Default for CubeState {
    fn default() -> Self {
        CubeState::solved(&ColorScheme::default())
    }
}

impl TryFrom<Vec<Vec<String>>> for CubeState {
    type Error = MalformedStateError;

    fn try_from(value: Vec<Vec<String>>) -> Result<Self, Self::Error> {
        if value.len() != FACE_COUNT {
            return Err(MalformedStateError::WrongFaceCount {
                expected: FACE_COUNT,
                actual: value.len(),
            });
        }

        let mut faces = [[Color::White; FACELETS_PER_FACE]; FACE_COUNT];
        for ((face, names), out) in Face::ALL.into_iter().zip(&value).zip(&mut faces) {
            if names.len() != FACELETS_PER_FACE {
                return Err(MalformedStateError::WrongFaceletCount {
                    face,
                    expected: FACELETS_PER_FACE,
                    actual: names.len(),
                });
            }

            for (index, (name, slot)) in names.iter().zip(out.iter_mut()).enumerate() {
                *slot = name
                    .parse()
                    .map_err(|()| MalformedStateError::UnknownColor {
                        face,
                        index,
                        name: name.clone(),
                    })?;
            }
        }

        Ok(CubeState { faces })
    }
}

impl From<CubeState> for Vec<Vec<Color>> {
    fn from(value: CubeState) -> Self {
        value.faces.iter().map(|face| face.to_vec()).collect()
    }
}

/// Lay the state out as an unfolded net:
///
/// ```text
///       U
///     L F R B
///       D
/// ```
///
/// `cell` renders one facelet and must produce two columns of output.
pub fn write_net(
    state: &CubeState,
    f: &mut impl fmt::Write,
    mut cell: impl FnMut(Color) -> String,
) -> fmt::Result {
    const PAD: &str = "       ";
    let mut row = |f: &mut dyn fmt::Write, faces: &[Face], r: usize| -> fmt::Result {
        for (i, &face) in faces.iter().enumerate() {
            if i > 0 {
                f.write_char(' ')?;
            }
            for c in 0..3 {
                f.write_str(&cell(state.facelet(face, r * 3 + c)))?;
            }
        }
        f.write_char('\n')
    };

    for r in 0..3 {
        f.write_str(PAD)?;
        row(&mut *f, &[Face::Up], r)?;
    }
    for r in 0..3 {
        row(&mut *f, &[Face::Left, Face::Front, Face::Right, Face::Back], r)?;
    }
    for r in 0..3 {
        f.write_str(PAD)?;
        row(&mut *f, &[Face::Down], r)?;
    }

    Ok(())
}

impl fmt::Display for CubeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_net(self, f, |color| format!("{} ", color.letter()))
    }
}
