use log::{debug, info};

use crate::{
    color::ColorScheme,
    moves::{InvalidMoveError, Move},
    permutation::apply_move,
    state::CubeState,
};

/// Result of [`CubeEngine::scramble`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scramble {
    pub state: CubeState,
    pub moves: Vec<Move>,
}

/// Holds the current state of one cube and the moves that led to it.
///
/// All transitions are synchronous: every call returns the complete new state.
#[derive(Debug, Clone)]
pub struct CubeEngine {
    scheme: ColorScheme,
    state: CubeState,
    history: Vec<Move>,
}

impl CubeEngine {
    pub fn new(scheme: ColorScheme) -> CubeEngine {
        CubeEngine {
            scheme,
            state: CubeState::solved(&scheme),
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> &CubeState {
        &self.state
    }

    pub fn scheme(&self) -> &ColorScheme {
        &self.scheme
    }

    /// Moves applied since the last reset or load.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn is_solved(&self) -> bool {
        self.state.is_solved()
    }

    pub fn reset(&mut self) -> &CubeState {
        debug!(target: "engine", "Resetting after {} moves", self.history.len());
        self.state = CubeState::solved(&self.scheme);
        self.history.clear();
        &self.state
    }

    /// Replace the held state, e.g. with one sent by a client. Clears the history.
    pub fn load_state(&mut self, state: CubeState) -> &CubeState {
        debug!(target: "engine", "Loading state, solved={}", state.is_solved());
        self.state = state;
        self.history.clear();
        &self.state
    }

    pub fn apply_move(&mut self, move_: Move) -> &CubeState {
        self.state = apply_move(&self.state, move_);
        self.history.push(move_);
        debug!(target: "engine", "Applied {move_}, {} moves in history", self.history.len());
        &self.state
    }

    /// Parse and apply a single move token.
    ///
    /// # Errors
    ///
    /// If `token` is not a move. The state is left unchanged.
    pub fn apply_token(&mut self, token: &str) -> Result<&CubeState, InvalidMoveError> {
        let move_ = token.parse()?;
        Ok(self.apply_move(move_))
    }

    /// Apply a sequence of moves, stopping at the first invalid token. Moves
    /// before the invalid token stay applied.
    ///
    /// # Errors
    ///
    /// On the first token that is not a move.
    pub fn apply_sequence(&mut self, sequence: &str) -> Result<&CubeState, InvalidMoveError> {
        for token in sequence.split_whitespace() {
            self.apply_token(token)?;
        }
        Ok(&self.state)
    }

    /// Undo the last move in the history, returning it.
    pub fn undo(&mut self) -> Option<Move> {
        let move_ = self.history.pop()?;
        self.state = apply_move(&self.state, move_.inverse());
        debug!(target: "engine", "Undid {move_}");
        Some(move_)
    }

    /// Apply `count` moves drawn uniformly from all 12 moves, starting from the
    /// current state. The same seed gives the same moves.
    pub fn scramble(&mut self, count: usize, rng: &mut fastrand::Rng) -> Scramble {
        let moves = (0..count)
            .map(|_| Move::ALL[rng.usize(..Move::ALL.len())])
            .collect::<Vec<_>>();

        for &move_ in &moves {
            self.apply_move(move_);
        }

        info!(
            target: "engine",
            "Scrambled with {count} moves: {}",
            itertools::join(&moves, " ")
        );

        Scramble {
            state: self.state,
            moves,
        }
    }
}

impl Default for CubeEngine {
    fn default() -> Self {
        CubeEngine::new(ColorScheme::default())
    }
}
