//! Turning moves into permutations of the 54 facelet slots.
//!
//! A slot is `face * 9 + index`, with faces in canonical order and indices as
//! given by [`face_index`].

use std::sync::LazyLock;

use itertools::Itertools;
use log::trace;

use crate::{
    face::Face,
    lattice::{face_index, facelet_position},
    moves::{Direction, Move},
    state::{CubeState, FACELET_COUNT, FACELETS_PER_FACE},
};

/// Where every facelet slot goes: the sticker in slot `i` lands in `targets[i]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Permutation {
    targets: Vec<usize>,
}

impl Permutation {
    pub fn identity(facelet_count: usize) -> Permutation {
        Permutation {
            targets: (0..facelet_count).collect(),
        }
    }

    /// Each cycle `[a, b, c]` carries the sticker in `a` to `b`, `b` to `c`, and
    /// `c` back to `a`. Slots in no cycle stay put.
    ///
    /// # Panics
    ///
    /// Panics if a slot is out of range or appears twice.
    pub fn from_cycles(facelet_count: usize, cycles: &[Vec<usize>]) -> Permutation {
        let mut targets = (0..facelet_count).collect_vec();
        for (&from, &to) in cycles
            .iter()
            .flat_map(|cycle| cycle.iter().circular_tuple_windows())
        {
            targets[from] = to;
        }
        Permutation::from_mapping(targets)
    }

    /// `targets[i]` is the slot the sticker in slot `i` moves to.
    ///
    /// # Panics
    ///
    /// Panics if `targets` is not a bijection on `0..targets.len()`.
    pub fn from_mapping(targets: Vec<usize>) -> Permutation {
        let mut hit = vec![false; targets.len()];
        for &to in &targets {
            assert!(to < targets.len() && !hit[to], "not a permutation of slots");
            hit[to] = true;
        }
        Permutation { targets }
    }

    pub fn facelet_count(&self) -> usize {
        self.targets.len()
    }

    pub fn mapping(&self) -> &[usize] {
        &self.targets
    }

    /// Slots this permutation moves.
    pub fn support(&self) -> usize {
        self.targets
            .iter()
            .enumerate()
            .filter(|&(from, &to)| from != to)
            .count()
    }

    /// `self` followed by `next`.
    ///
    /// # Panics
    ///
    /// Panics if the two act on different numbers of slots.
    #[must_use]
    pub fn then(&self, next: &Permutation) -> Permutation {
        assert_eq!(self.facelet_count(), next.facelet_count());
        Permutation {
            targets: self.targets.iter().map(|&mid| next.targets[mid]).collect(),
        }
    }

    #[must_use]
    pub fn inverse(&self) -> Permutation {
        let mut sources = vec![0; self.targets.len()];
        for (from, &to) in self.targets.iter().enumerate() {
            sources[to] = from;
        }
        Permutation { targets: sources }
    }

    /// Move the facelets of `state` as described by this permutation.
    ///
    /// # Panics
    ///
    /// Panics if the permutation does not act on exactly 54 slots.
    pub fn apply(&self, state: &CubeState) -> CubeState {
        assert_eq!(self.facelet_count(), FACELET_COUNT);

        let mut out = *state;
        for (from, &to) in self.targets.iter().enumerate() {
            *out.slot_mut(to) = state.slot(from);
        }
        out
    }
}

/// Three facelets of a face next to the turned face.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RingSegment {
    pub face: Face,
    pub indices: [usize; 3],
}

impl RingSegment {
    fn slots(self) -> [usize; 3] {
        self.indices
            .map(|index| self.face.index() * FACELETS_PER_FACE + index)
    }
}

/// The twelve facelets around `face` that a turn of `face` carries along.
///
/// Under a clockwise turn, facelet `j` of segment `k` moves to facelet `j` of
/// segment `k + 1` (mod 4). The segment order is chosen so the triplets copy
/// over verbatim. Where two neighbouring faces see a shared edge from mirrored
/// directions, this shows up as a reversed index triplet.
pub fn ring(face: Face) -> [RingSegment; 4] {
    RINGS[face.index()]
}

static RINGS: LazyLock<[[RingSegment; 4]; 6]> = LazyLock::new(|| Face::ALL.map(derive_ring));

fn derive_ring(face: Face) -> [RingSegment; 4] {
    let turn = Move::clockwise(face);
    let start = Face::ALL
        .into_iter()
        .find(|&f| f != face && f != face.opposite())
        .expect("every face has neighbours");

    let mut indices = (0..FACELETS_PER_FACE)
        .filter(|&i| turn.affects(facelet_position(start, i)));
    let mut segment = RingSegment {
        face: start,
        indices: [(); 3].map(|()| {
            indices
                .next()
                .expect("a face shares three facelets with a slice")
        }),
    };

    let mut out = [segment; 4];
    for slot in out.iter_mut().skip(1) {
        let next_face = Face::from_normal(turn.turn_vec(segment.face.normal()))
            .expect("turning a normal gives a normal");
        segment = RingSegment {
            face: next_face,
            indices: segment.indices.map(|index| {
                let pos = facelet_position(segment.face, index).rotated(turn);
                face_index(pos, next_face)
            }),
        };
        *slot = segment;
    }

    trace!(target: "permutation", "Ring of {face:?}: {out:?}");
    out
}

/// The slot cycles of the turned face itself under a clockwise turn: corners,
/// then edges. The center stays put.
const FACE_CYCLES: [[usize; 4]; 2] = [[0, 2, 8, 6], [1, 5, 7, 3]];

fn compile_move(move_: Move) -> Permutation {
    let base = move_.face.index() * FACELETS_PER_FACE;
    let mut cycles = FACE_CYCLES
        .iter()
        .map(|cycle| cycle.iter().map(|i| base + i).collect_vec())
        .collect_vec();

    let ring_slots = ring(move_.face).map(RingSegment::slots);
    for j in 0..3 {
        cycles.push(ring_slots.iter().map(|slots| slots[j]).collect_vec());
    }

    let clockwise = Permutation::from_cycles(FACELET_COUNT, &cycles);
    match move_.direction {
        Direction::Clockwise => clockwise,
        Direction::CounterClockwise => clockwise.inverse(),
    }
}

static MOVE_TABLE: LazyLock<Vec<Permutation>> = LazyLock::new(|| {
    Move::ALL
        .into_iter()
        .map(|move_| {
            let perm = compile_move(move_);
            trace!(target: "permutation", "{move_} moves {} facelets", perm.support());
            perm
        })
        .collect()
});

/// The permutation of facelet slots performed by `move_`.
pub fn move_permutation(move_: Move) -> &'static Permutation {
    &MOVE_TABLE[move_.index()]
}

/// The state after turning `move_` on `state`. The input is left untouched.
pub fn apply_move(state: &CubeState, move_: Move) -> CubeState {
    move_permutation(move_).apply(state)
}

/// The single permutation performed by a whole move sequence.
pub fn sequence_permutation(moves: impl IntoIterator<Item = Move>) -> Permutation {
    moves
        .into_iter()
        .fold(Permutation::identity(FACELET_COUNT), |acc, move_| {
            acc.then(move_permutation(move_))
        })
}

/// The state after turning every move of `moves` in order. The moves are
/// composed first and the stickers are moved once.
pub fn apply_moves(state: &CubeState, moves: impl IntoIterator<Item = Move>) -> CubeState {
    sequence_permutation(moves).apply(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{color::Color, lattice::Lattice};

    /// Where each sticker goes when its piece is physically turned.
    fn sticker_permutation(move_: Move) -> Permutation {
        let mapping = (0..FACELET_COUNT)
            .map(|slot| {
                let face = Face::ALL[slot / FACELETS_PER_FACE];
                let pos = facelet_position(face, slot % FACELETS_PER_FACE);
                if !move_.affects(pos) {
                    return slot;
                }
                let to_face = Face::from_normal(move_.turn_vec(face.normal())).unwrap();
                let to_pos: Lattice = pos.rotated(move_);
                to_face.index() * FACELETS_PER_FACE + face_index(to_pos, to_face)
            })
            .collect();
        Permutation::from_mapping(mapping)
    }

    #[test]
    fn ring_moves_match_physical_turns() {
        for move_ in Move::ALL {
            assert_eq!(
                move_permutation(move_),
                &sticker_permutation(move_),
                "{move_}"
            );
        }
    }

    #[test]
    fn rings_touch_the_four_neighbours() {
        for face in Face::ALL {
            let segments = ring(face);
            let faces = segments.map(|s| s.face);
            assert!(!faces.contains(&face));
            assert!(!faces.contains(&face.opposite()));
            assert_eq!(faces.iter().unique().count(), 4);
        }
    }

    #[test]
    fn up_and_down_rings_are_plain_rows() {
        for segment in ring(Face::Up) {
            assert_eq!(segment.indices, [0, 1, 2]);
        }
        for segment in ring(Face::Down) {
            assert_eq!(segment.indices, [6, 7, 8]);
        }
        let order = ring(Face::Up).map(|s| s.face);
        assert_eq!(order, [Face::Right, Face::Front, Face::Left, Face::Back]);
    }

    #[test]
    fn front_ring_reverses_across_mirrored_edges() {
        assert_eq!(
            ring(Face::Front),
            [
                RingSegment {
                    face: Face::Right,
                    indices: [0, 3, 6]
                },
                RingSegment {
                    face: Face::Down,
                    indices: [2, 1, 0]
                },
                RingSegment {
                    face: Face::Left,
                    indices: [8, 5, 2]
                },
                RingSegment {
                    face: Face::Up,
                    indices: [6, 7, 8]
                },
            ]
        );
    }

    #[test]
    fn quarter_turns_have_order_four() {
        let identity = Permutation::identity(FACELET_COUNT);
        for move_ in Move::ALL {
            let perm = move_permutation(move_);
            // 8 stickers on the face, 12 around it
            assert_eq!(perm.support(), 20);
            assert_ne!(perm.then(perm), identity);
            assert_eq!(sequence_permutation([move_; 4]), identity, "{move_}");
        }
    }

    #[test]
    fn inverse_move_is_inverse_permutation() {
        for move_ in Move::ALL {
            let perm = move_permutation(move_);
            let inverse = move_permutation(move_.inverse());
            assert_eq!(perm.then(inverse), Permutation::identity(FACELET_COUNT));
            assert_eq!(&perm.inverse(), inverse);
        }
    }

    #[test]
    fn composed_sequence_matches_turning_one_by_one() {
        let moves = crate::moves::parse_sequence("R U F' L D' B R' U'").unwrap();
        let mut state = CubeState::default();
        for &move_ in &moves {
            state = apply_move(&state, move_);
        }
        assert_eq!(apply_moves(&CubeState::default(), moves.iter().copied()), state);
        assert_eq!(sequence_permutation(Vec::<Move>::new()), Permutation::identity(FACELET_COUNT));
    }

    #[test]
    fn face_rotation_pattern() {
        // Label every facelet of F by its index and turn once
        let mut faces = *CubeState::default().faces();
        faces[Face::Front.index()] = [
            Color::White,
            Color::Yellow,
            Color::Red,
            Color::Orange,
            Color::Blue,
            Color::Green,
            Color::White,
            Color::Yellow,
            Color::Red,
        ];
        let state = CubeState::from_faces(faces);
        let turned = apply_move(&state, Move::clockwise(Face::Front));
        let before = state.face(Face::Front);
        let after = turned.face(Face::Front);
        for (new, old) in [6, 3, 0, 7, 4, 1, 8, 5, 2].into_iter().enumerate() {
            assert_eq!(after[new], before[old]);
        }
    }

    #[test]
    fn apply_does_not_mutate_input() {
        let state = CubeState::default();
        let copy = state;
        let turned = apply_move(&state, Move::clockwise(Face::Right));
        assert_eq!(state, copy);
        assert_ne!(turned, state);
    }

    #[test]
    fn cycles_build_the_mapping() {
        let perm = Permutation::from_cycles(5, &[vec![0, 3], vec![1, 2, 4], vec![]]);
        assert_eq!(perm.mapping(), &[3, 2, 4, 0, 1]);
        assert_eq!(perm.support(), 5);
        assert_eq!(perm.inverse().mapping(), &[3, 4, 1, 0, 2]);
        assert_eq!(perm.then(&perm.inverse()), Permutation::identity(5));
        // a then b is b applied to a's targets
        let swap = Permutation::from_cycles(5, &[vec![0, 1]]);
        assert_eq!(perm.then(&swap).mapping(), &[3, 2, 4, 1, 0]);
    }

    #[test]
    #[should_panic(expected = "not a permutation of slots")]
    fn repeated_slots_are_rejected() {
        Permutation::from_mapping(vec![0, 0, 1]);
    }
}
