//! Front desk: creates, joins, starts and ends games, and routes everything
//! else into the sender's game.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use super::registry::{SessionRegistry, SharedSession};
use crate::config::TableConfig;
use crate::domain::player::{Player, PlayerId};
use crate::domain::session::{GameSession, SessionId};
use crate::errors::domain::{GameError, NotFoundKind};
use crate::notify::{Notifier, SessionClosed};
use crate::protocol::lobby_commands::{self, LobbyCommand};

pub struct Lobby {
    registry: Arc<SessionRegistry>,
    notifier: Arc<dyn Notifier>,
    config: TableConfig,
    sessions_created: AtomicU64,
}

impl Lobby {
    pub fn new(notifier: Arc<dyn Notifier>, config: TableConfig) -> Self {
        Self {
            registry: Arc::new(SessionRegistry::new()),
            notifier,
            config,
            sessions_created: AtomicU64::new(0),
        }
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Handle one line from `sender`. Errors are reported to the sender only.
    pub fn handle_message(&self, sender: &PlayerId, text: &str) {
        if let Err(err) = self.try_handle(sender, text) {
            debug!(player = %sender, code = %err.code(), error = %err, "Command rejected");
            self.notifier.notify(sender, &format!("ERROR: {err}"));
        }
    }

    pub fn try_handle(&self, sender: &PlayerId, text: &str) -> Result<(), GameError> {
        match lobby_commands::parse(text)? {
            Some(LobbyCommand::New) => self.new_game(sender),
            Some(LobbyCommand::Join(host)) => self.join_game(sender, &host),
            Some(LobbyCommand::Leave) => self.leave_game(sender),
            Some(LobbyCommand::Start) => self.start_game(sender),
            Some(LobbyCommand::End) => self.end_game(sender),
            None => self.route(sender, text),
        }
    }

    fn next_session(&self) -> GameSession {
        let n = self.sessions_created.fetch_add(1, Ordering::Relaxed);
        let closed: Arc<dyn SessionClosed> = self.registry.clone();
        let session = GameSession::new(self.notifier.clone()).on_closed(closed);
        match self.config.seed {
            Some(seed) => session.with_seed(seed.wrapping_add(n)),
            None => session,
        }
    }

    fn new_game(&self, sender: &PlayerId) -> Result<(), GameError> {
        let session = self.next_session();
        let session_id = session.id();
        self.registry.register(sender, session_id)?;

        let shared: SharedSession = Arc::new(Mutex::new(session));
        if let Err(err) = shared.lock().add_player(Player::new(sender.clone())) {
            self.registry.release(sender);
            return Err(err);
        }
        self.registry.insert_session(session_id, shared);

        info!(%session_id, player = %sender, "Game created");
        self.notifier
            .notify(sender, "Successfully created a new game.");
        Ok(())
    }

    fn join_game(&self, sender: &PlayerId, host: &PlayerId) -> Result<(), GameError> {
        let Some(session_id) = self.registry.session_id_of(host) else {
            return Err(GameError::not_found(
                NotFoundKind::Game,
                "The requested player is not currently part of a game.",
            ));
        };
        let Some(shared) = self.registry.lookup(host) else {
            return Err(GameError::not_found(
                NotFoundKind::Game,
                "The requested player is not currently part of a game.",
            ));
        };

        self.registry.register(sender, session_id)?;
        if let Err(err) = shared.lock().add_player(Player::new(sender.clone())) {
            self.registry.release(sender);
            return Err(err);
        }

        debug!(%session_id, player = %sender, "Player joined");
        self.notifier.notify(sender, "Successfully joined the game.");
        Ok(())
    }

    fn leave_game(&self, sender: &PlayerId) -> Result<(), GameError> {
        let (session_id, shared) = self.require_game(sender)?;
        let mut session = shared.lock();
        session.remove_player(sender)?;
        self.registry.release(sender);

        // Ended under the lock so a racing join fails with GameEnded and is released.
        if session.players().is_empty() {
            session.end();
            debug!(%session_id, "Empty game discarded");
        }
        Ok(())
    }

    fn start_game(&self, sender: &PlayerId) -> Result<(), GameError> {
        let (_, shared) = self.require_game(sender)?;
        shared.lock().start()?;
        self.registry.disarm_end(sender);
        Ok(())
    }

    fn end_game(&self, sender: &PlayerId) -> Result<(), GameError> {
        let (session_id, shared) = self.require_game(sender)?;
        if !self
            .registry
            .confirm_end(sender, self.config.end_confirm_window)
        {
            self.notifier
                .notify(sender, "Message \"end\" again to confirm.");
            return Ok(());
        }

        info!(%session_id, player = %sender, "Game ended by player");
        shared.lock().end();
        Ok(())
    }

    fn route(&self, sender: &PlayerId, text: &str) -> Result<(), GameError> {
        let Some(shared) = self.registry.lookup(sender) else {
            self.notifier
                .notify(sender, "Message \"new\" to create a new game.");
            return Ok(());
        };
        let mut session = shared.lock();
        session.handle_message(sender, text)
    }

    fn require_game(&self, sender: &PlayerId) -> Result<(SessionId, SharedSession), GameError> {
        let not_in_game = || {
            GameError::not_found(
                NotFoundKind::Game,
                "You are not currently participating in a game.",
            )
        };
        let session_id = self.registry.session_id_of(sender).ok_or_else(not_in_game)?;
        let shared = self.registry.lookup(sender).ok_or_else(not_in_game)?;
        Ok((session_id, shared))
    }
}
