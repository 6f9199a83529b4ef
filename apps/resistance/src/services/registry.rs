//! Maps user identities to their game and enforces one active game per user.
//!
//! Each session sits behind its own mutex, so actions within one game are
//! serialized while distinct games proceed in parallel. Never hold a map
//! guard while locking a session.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::debug;

use crate::domain::player::{Player, PlayerId};
use crate::domain::session::{GameSession, SessionId};
use crate::errors::domain::GameError;
use crate::errors::ErrorCode;
use crate::notify::SessionClosed;

pub type SharedSession = Arc<Mutex<GameSession>>;

#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<SessionId, SharedSession>,
    players: DashMap<PlayerId, SessionId>,
    pending_end: DashMap<PlayerId, Instant>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a session so its players can be registered against it.
    pub fn insert_session(&self, session_id: SessionId, session: SharedSession) {
        self.sessions.insert(session_id, session);
    }

    /// Map `player` to `session_id`. Fails if the player already has a game.
    pub fn register(&self, player: &PlayerId, session_id: SessionId) -> Result<(), GameError> {
        match self.players.entry(player.clone()) {
            Entry::Occupied(_) => Err(GameError::invalid_state(
                ErrorCode::AlreadyInGame,
                "You are already in an existing game.",
            )),
            Entry::Vacant(slot) => {
                slot.insert(session_id);
                debug!(%player, %session_id, "Player registered");
                Ok(())
            }
        }
    }

    pub fn is_registered(&self, player: &PlayerId) -> bool {
        self.players.contains_key(player)
    }

    pub fn session_id_of(&self, player: &PlayerId) -> Option<SessionId> {
        self.players.get(player).map(|entry| *entry.value())
    }

    /// The session `player` belongs to, if any.
    pub fn lookup(&self, player: &PlayerId) -> Option<SharedSession> {
        let session_id = self.session_id_of(player)?;
        self.sessions.get(&session_id).map(|entry| entry.value().clone())
    }

    pub fn release(&self, player: &PlayerId) {
        self.players.remove(player);
        self.pending_end.remove(player);
        debug!(%player, "Player released");
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Arm an end request, or confirm one armed within `window`.
    ///
    /// Returns `true` when this call confirms a previous request.
    pub fn confirm_end(&self, player: &PlayerId, window: Duration) -> bool {
        let now = Instant::now();
        let armed_at = self.pending_end.get(player).map(|entry| *entry.value());
        match armed_at {
            Some(at) if now.duration_since(at) <= window => {
                self.pending_end.remove(player);
                true
            }
            _ => {
                self.pending_end.insert(player.clone(), now);
                false
            }
        }
    }

    pub fn disarm_end(&self, player: &PlayerId) {
        self.pending_end.remove(player);
    }
}

impl SessionClosed for SessionRegistry {
    fn session_closed(&self, session_id: SessionId, players: &[Player]) {
        for player in players {
            self.release(player.id());
        }
        self.sessions.remove(&session_id);
        debug!(%session_id, released = players.len(), "Session closed");
    }
}
