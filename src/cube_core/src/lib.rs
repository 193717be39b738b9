//! A 3×3×3 cube as 54 facelets, with quarter turns applied as permutations.
//!
//! Faces are always stored in the order Right, Left, Up, Down, Front, Back,
//! and each face is a row-major 3×3 grid seen from outside the cube.

#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate, clippy::missing_panics_doc)]

pub mod color;
pub mod engine;
pub mod face;
pub mod lattice;
pub mod moves;
pub mod permutation;
pub mod session;
pub mod state;

pub use color::{Color, ColorScheme, SchemeError};
pub use engine::{CubeEngine, Scramble};
pub use face::Face;
pub use lattice::{Lattice, face_index, facelet_position, try_face_index};
pub use moves::{Direction, InvalidMoveError, Move, parse_sequence};
pub use permutation::{
    Permutation, RingSegment, apply_move, apply_moves, move_permutation, ring, sequence_permutation,
};
pub use session::{SessionError, SessionId, SessionStore};
pub use state::{CubeState, MalformedStateError};
