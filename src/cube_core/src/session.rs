//! Independent cubes keyed by session, for hosting the engine behind a service.

use std::{
    collections::HashMap,
    fmt,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

use log::{debug, warn};
use thiserror::Error;

use crate::{
    color::ColorScheme,
    engine::CubeEngine,
    moves::{InvalidMoveError, Move},
    state::{CubeState, MalformedStateError},
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("No such session: {0}")]
    UnknownSession(SessionId),
    #[error(transparent)]
    InvalidMove(#[from] InvalidMoveError),
    #[error(transparent)]
    MalformedState(#[from] MalformedStateError),
}

/// A collection of cubes, one per session.
///
/// Sessions never share state. Each one sits behind its own lock, so moves on
/// the same session are applied one at a time in arrival order while other
/// sessions proceed independently.
#[derive(Debug, Default)]
pub struct SessionStore {
    scheme: ColorScheme,
    next_id: AtomicU64,
    sessions: Mutex<HashMap<SessionId, Arc<Mutex<CubeEngine>>>>,
}

// Engines swap in whole states, so a poisoned lock still guards a consistent cube
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SessionStore {
    pub fn new(scheme: ColorScheme) -> SessionStore {
        SessionStore {
            scheme,
            next_id: AtomicU64::new(0),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Start a new session with a solved cube.
    pub fn create(&self) -> SessionId {
        let id = SessionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        lock(&self.sessions).insert(id, Arc::new(Mutex::new(CubeEngine::new(self.scheme))));
        debug!(target: "session", "Created {id}");
        id
    }

    /// Drop a session. Returns whether it existed.
    pub fn remove(&self, id: SessionId) -> bool {
        let existed = lock(&self.sessions).remove(&id).is_some();
        if existed {
            debug!(target: "session", "Removed {id}");
        }
        existed
    }

    pub fn len(&self) -> usize {
        lock(&self.sessions).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn engine(&self, id: SessionId) -> Result<Arc<Mutex<CubeEngine>>, SessionError> {
        lock(&self.sessions).get(&id).cloned().ok_or_else(|| {
            warn!(target: "session", "Request for unknown {id}");
            SessionError::UnknownSession(id)
        })
    }

    /// Run `f` with exclusive access to the session's engine. The store-wide
    /// lock is only held for the lookup.
    ///
    /// # Errors
    ///
    /// If the session does not exist.
    pub fn with_engine<T>(
        &self,
        id: SessionId,
        f: impl FnOnce(&mut CubeEngine) -> T,
    ) -> Result<T, SessionError> {
        let engine = self.engine(id)?;
        let mut guard = lock(&engine);
        Ok(f(&mut guard))
    }

    /// # Errors
    ///
    /// If the session does not exist.
    pub fn current_state(&self, id: SessionId) -> Result<CubeState, SessionError> {
        self.with_engine(id, |engine| *engine.state())
    }

    /// # Errors
    ///
    /// If the session does not exist or `token` is not a move. An invalid move
    /// leaves the session's state unchanged.
    pub fn apply_move(&self, id: SessionId, token: &str) -> Result<CubeState, SessionError> {
        self.with_engine(id, |engine| engine.apply_token(token).copied())?
            .map_err(SessionError::from)
    }

    /// # Errors
    ///
    /// If the session does not exist.
    pub fn reset(&self, id: SessionId) -> Result<CubeState, SessionError> {
        self.with_engine(id, |engine| *engine.reset())
    }

    /// Replace a session's state with one received from a client.
    ///
    /// # Errors
    ///
    /// If the session does not exist or the state is not 6 faces of 9 known
    /// colors. A malformed state leaves the session untouched.
    pub fn load_state(
        &self,
        id: SessionId,
        wire: Vec<Vec<String>>,
    ) -> Result<CubeState, SessionError> {
        let state = CubeState::try_from(wire)?;
        self.with_engine(id, |engine| *engine.load_state(state))
    }

    /// Apply `token` to the state a client last saw, or to the session's own
    /// state when `wire` is `None`. Loading and turning happen under one lock,
    /// so no other move on the session can land in between.
    ///
    /// # Errors
    ///
    /// If the session does not exist, the state is malformed or `token` is not
    /// a move. The session is left untouched in every case.
    pub fn apply_move_to(
        &self,
        id: SessionId,
        wire: Option<Vec<Vec<String>>>,
        token: &str,
    ) -> Result<CubeState, SessionError> {
        let state = wire.map(CubeState::try_from).transpose()?;
        let move_ = token.parse::<Move>()?;
        self.with_engine(id, |engine| {
            if let Some(state) = state {
                engine.load_state(state);
            }
            *engine.apply_move(move_)
        })
    }
}
