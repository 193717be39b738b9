use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    face::Face,
    lattice::{Lattice, Vec3, quarter_turn_clockwise},
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid move {token:?}, expected one of F B L R U D optionally followed by '")]
pub struct InvalidMoveError {
    pub token: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    #[must_use]
    pub fn reversed(self) -> Direction {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// A quarter turn of one face.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Move {
    pub face: Face,
    pub direction: Direction,
}

impl Move {
    /// Every move, clockwise turns first, each group in canonical face order.
    pub const ALL: [Move; 12] = {
        let mut out = [Move {
            face: Face::Right,
            direction: Direction::Clockwise,
        }; 12];

        let mut i = 0;
        while i < 6 {
            out[i].face = Face::ALL[i];
            out[i + 6].face = Face::ALL[i];
            out[i + 6].direction = Direction::CounterClockwise;
            i += 1;
        }

        out
    };

    pub fn new(face: Face, direction: Direction) -> Move {
        Move { face, direction }
    }

    pub fn clockwise(face: Face) -> Move {
        Move::new(face, Direction::Clockwise)
    }

    pub fn counter_clockwise(face: Face) -> Move {
        Move::new(face, Direction::CounterClockwise)
    }

    /// Position of this move in [`Move::ALL`].
    pub fn index(self) -> usize {
        match self.direction {
            Direction::Clockwise => self.face.index(),
            Direction::CounterClockwise => self.face.index() + 6,
        }
    }

    #[must_use]
    pub fn inverse(self) -> Move {
        Move::new(self.face, self.direction.reversed())
    }

    /// The axis the slice turns around: the outward normal of the turned face.
    pub fn rotation_axis(self) -> Vec3 {
        self.face.normal()
    }

    /// `+1` for clockwise and `-1` for counterclockwise, seen from outside the
    /// cube looking along the negative of [`Move::rotation_axis`]. Under the right
    /// hand rule the turn angle is `-sign * 90°`.
    pub fn rotation_sign(self) -> i8 {
        match self.direction {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    /// The 9 pieces in the turning slice.
    pub fn affected_positions(self) -> [Lattice; 9] {
        let n = self.rotation_axis();
        let axis = n.iter().position(|&c| c != 0).expect("normals are nonzero");
        let mut out = [Lattice::CORE; 9];
        for (slot, (a, b)) in out.iter_mut().zip(
            (-1..=1).flat_map(|a| (-1..=1).map(move |b| (a, b))),
        ) {
            let v = match axis {
                0 => [n[0], a, b],
                1 => [a, n[1], b],
                _ => [a, b, n[2]],
            };
            *slot = Lattice::from_vec(v);
        }
        out
    }

    /// Whether `pos` turns with this move.
    pub fn affects(self, pos: Lattice) -> bool {
        pos.is_on(self.face)
    }

    /// Where this move carries a vector anchored at the cube's center. The
    /// caller decides whether the vector belongs to the slice.
    pub(crate) fn turn_vec(self, v: Vec3) -> Vec3 {
        let axis = self.rotation_axis();
        match self.direction {
            Direction::Clockwise => quarter_turn_clockwise(v, axis),
            Direction::CounterClockwise => {
                let twice = quarter_turn_clockwise(quarter_turn_clockwise(v, axis), axis);
                quarter_turn_clockwise(twice, axis)
            }
        }
    }
}

impl Lattice {
    /// The position this piece ends up in after `move_`. Pieces outside the
    /// slice stay put.
    #[must_use]
    pub fn rotated(self, move_: Move) -> Lattice {
        if move_.affects(self) {
            Lattice::from_vec(move_.turn_vec(self.to_vec()))
        } else {
            self
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Clockwise => write!(f, "{}", self.face),
            Direction::CounterClockwise => write!(f, "{}'", self.face),
        }
    }
}

impl FromStr for Move {
    type Err = InvalidMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidMoveError {
            token: s.to_owned(),
        };

        let (face, direction) = match s.strip_suffix('\'') {
            Some(rest) => (rest, Direction::CounterClockwise),
            None => (s, Direction::Clockwise),
        };

        let face = face.parse::<Face>().map_err(|()| invalid())?;
        Ok(Move::new(face, direction))
    }
}

impl TryFrom<String> for Move {
    type Error = InvalidMoveError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Move> for String {
    fn from(value: Move) -> Self {
        value.to_string()
    }
}

/// Parse a whitespace separated move sequence such as `"R U R' U'"`.
///
/// # Errors
///
/// On the first token that is not a move.
pub fn parse_sequence(sequence: &str) -> Result<Vec<Move>, InvalidMoveError> {
    sequence.split_whitespace().map(str::parse).collect()
}
