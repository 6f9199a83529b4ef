//! A single game: roster, leader rotation, spy assignment, rounds and win detection.

use std::fmt;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::SeedableRng;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::help;
use crate::domain::player::{mention_lines, Player, PlayerId};
use crate::domain::round::{next_seat, Round, RoundProgress, Table};
use crate::domain::rules::{self, MAX_PLAYERS, MIN_PLAYERS, VICTORY_COUNT};
use crate::domain::state::{Faction, Score};
use crate::errors::domain::{GameError, NotFoundKind};
use crate::errors::ErrorCode;
use crate::logging::events;
use crate::notify::{Notifier, SessionClosed};
use crate::protocol::commands::{self, Command};

/// Opaque identifier of one game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub struct GameSession {
    id: SessionId,
    players: Vec<Player>,
    started: bool,
    ended: bool,
    /// Seat index of the current leader; meaningful once started.
    leader: usize,
    rounds: Vec<Round>,
    notifier: Arc<dyn Notifier>,
    on_closed: Option<Arc<dyn SessionClosed>>,
    rng: StdRng,
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("id", &self.id)
            .field("players", &self.players.len())
            .field("started", &self.started)
            .field("ended", &self.ended)
            .field("leader", &self.leader)
            .field("rounds", &self.rounds.len())
            .finish()
    }
}

impl GameSession {
    /// Empty, not-started session drawing randomness from OS entropy.
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            id: SessionId::new(),
            players: Vec::with_capacity(MAX_PLAYERS),
            started: false,
            ended: false,
            leader: 0,
            rounds: Vec::with_capacity(rules::ROUNDS),
            notifier,
            on_closed: None,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Use a deterministic shuffle for seating and spy selection.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Register the collaborator told about termination.
    pub fn on_closed(mut self, observer: Arc<dyn SessionClosed>) -> Self {
        self.on_closed = Some(observer);
        self
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Roster in seating order (shuffled once at start).
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn spies(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_spy())
    }

    /// Current leader, once the game has started.
    pub fn leader(&self) -> Option<&PlayerId> {
        if !self.started || self.ended {
            return None;
        }
        self.players.get(self.leader).map(Player::id)
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.rounds.last()
    }

    /// Round wins per faction so far.
    pub fn score(&self) -> Score {
        let mut score = Score::default();
        for faction in self.rounds.iter().filter_map(Round::result) {
            score.record(faction);
        }
        score
    }

    fn ensure_active(&self) -> Result<(), GameError> {
        if self.ended {
            return Err(GameError::invalid_state(
                ErrorCode::GameEnded,
                "This game has ended.",
            ));
        }
        Ok(())
    }

    pub fn add_player(&mut self, player: Player) -> Result<(), GameError> {
        self.ensure_active()?;
        if self.started {
            return Err(GameError::invalid_state(
                ErrorCode::AlreadyStarted,
                "This game has already started. Cannot add a new player.",
            ));
        }
        if self.players.len() >= MAX_PLAYERS {
            return Err(GameError::capacity(
                ErrorCode::RosterFull,
                format!("This game already has {MAX_PLAYERS} players."),
            ));
        }
        if self.player(player.id()).is_some() {
            return Err(GameError::invalid_state(
                ErrorCode::AlreadyInGame,
                "You are already in this game.",
            ));
        }

        debug!(session_id = %self.id, player = %player.id(), "Player added");
        self.players.push(player);
        Ok(())
    }

    /// Remove a player before the game starts. Absent identifiers fail with NotFound.
    pub fn remove_player(&mut self, id: &PlayerId) -> Result<Player, GameError> {
        self.ensure_active()?;
        if self.started {
            return Err(GameError::invalid_state(
                ErrorCode::AlreadyStarted,
                "This game has already started. Cannot remove a player.",
            ));
        }
        let Some(pos) = self.players.iter().position(|p| p.id() == id) else {
            return Err(GameError::not_found(
                NotFoundKind::Player,
                "That player is not part of this game.",
            ));
        };

        let removed = self.players.remove(pos);
        debug!(session_id = %self.id, player = %removed.id(), "Player removed");
        self.notifier.notify(
            removed.id(),
            &[
                "You have successfully left the game.",
                "You may rejoin this game or join any other that has not yet started.",
            ]
            .join("\n"),
        );
        Ok(removed)
    }

    pub fn start(&mut self) -> Result<(), GameError> {
        self.ensure_active()?;
        if self.started {
            return Err(GameError::invalid_state(
                ErrorCode::AlreadyStarted,
                "The game has already started.",
            ));
        }
        if self.players.len() < MIN_PLAYERS {
            return Err(GameError::InsufficientPlayers {
                required: MIN_PLAYERS,
                actual: self.players.len(),
            });
        }
        let Some(definition) = rules::definition_for(self.players.len()) else {
            return Err(GameError::capacity(
                ErrorCode::RosterFull,
                format!("This game already has {MAX_PLAYERS} players."),
            ));
        };

        self.players.shuffle(&mut self.rng);
        self.started = true;
        self.leader = 0;

        for seat in index::sample(&mut self.rng, self.players.len(), definition.spy_count) {
            self.players[seat].make_spy();
        }

        events::game_started(self.id, self.players.len(), definition.spy_count);
        self.notify_all("The game has begun!");
        self.declare_leaders();
        self.declare_spies();
        self.create_round();
        Ok(())
    }

    fn declare_leaders(&self) {
        let mut lines = vec!["The order of leaders is:".to_string()];
        lines.extend(mention_lines(self.players.iter().map(Player::id)));
        self.notify_all(&lines.join("\n"));
    }

    fn declare_spies(&self) {
        let mut lines = vec!["The spies are:".to_string()];
        lines.extend(mention_lines(self.spies().map(Player::id)));
        self.notify_spies(&lines.join("\n"));
    }

    fn table(&mut self) -> (Option<&mut Round>, Table<'_>) {
        let table = Table::new(
            self.id,
            &self.players,
            &mut self.leader,
            self.notifier.as_ref(),
        );
        (self.rounds.last_mut(), table)
    }

    fn create_round(&mut self) {
        let index = self.rounds.len();
        let Some(spec) = rules::round_spec(self.players.len(), index) else {
            warn!(session_id = %self.id, round = index + 1, "No round definition; ending game");
            self.end();
            return;
        };
        let (_, table) = self.table();
        let round = Round::begin(index + 1, spec, &table);
        self.rounds.push(round);
    }

    /// Advance the leader one seat (circular) and return the new leader.
    pub fn next_leader(&mut self) -> Option<&PlayerId> {
        if self.players.is_empty() {
            return None;
        }
        self.leader = next_seat(self.leader, self.players.len());
        self.players.get(self.leader).map(Player::id)
    }

    /// Called when the current round reaches FINISHED: ends the game on a
    /// faction's third win, otherwise opens the next round.
    pub fn round_finished(&mut self) {
        let score = self.score();
        debug!(
            session_id = %self.id,
            resistance = score.resistance,
            imperial = score.imperial,
            "Round tallied"
        );
        match score.winner(VICTORY_COUNT) {
            Some(faction) => {
                self.notify_all(faction.victory_message());
                self.finish_game(Some(faction));
            }
            None => self.create_round(),
        }
    }

    /// Terminate the session; afterwards every operation fails with InvalidState.
    pub fn end(&mut self) {
        self.finish_game(None);
    }

    fn finish_game(&mut self, winner: Option<Faction>) {
        if self.ended {
            return;
        }
        self.notify_all("The game has ended.");
        self.ended = true;
        let players = std::mem::take(&mut self.players);
        events::game_ended(self.id, winner);
        if let Some(observer) = &self.on_closed {
            observer.session_closed(self.id, &players);
        }
    }

    pub fn notify_all(&self, message: &str) {
        for player in &self.players {
            self.notifier.notify(player.id(), message);
        }
    }

    pub fn notify_spies(&self, message: &str) {
        for spy in self.spies() {
            self.notifier.notify(spy.id(), message);
        }
    }

    /// Route one line of player text: a command goes to the current round,
    /// anything else is relayed to the other players.
    pub fn handle_message(&mut self, sender: &PlayerId, text: &str) -> Result<(), GameError> {
        self.ensure_active()?;
        if self.player(sender).is_none() {
            return Err(GameError::not_found(
                NotFoundKind::Player,
                "You are not part of this game.",
            ));
        }

        match commands::parse(text)? {
            Some(command) => self.dispatch(sender, command),
            None => {
                self.relay(sender, text);
                Ok(())
            }
        }
    }

    fn dispatch(&mut self, sender: &PlayerId, command: Command) -> Result<(), GameError> {
        let session_id = self.id;
        let (round, mut table) = self.table();
        let Some(round) = round else {
            if command == Command::Help {
                table.notify(sender, &help::not_started());
                return Ok(());
            }
            return Err(GameError::invalid_state(
                ErrorCode::NotStarted,
                "The game has not yet begun.",
            ));
        };
        debug!(
            %session_id,
            player = %sender,
            round = round.number(),
            phase = %round.phase(),
            ?command,
            "Dispatching command"
        );

        let progress = match command {
            Command::Help => {
                round.show_help(&table, sender);
                RoundProgress::Continues
            }
            Command::AddTeamMember(member) => {
                round.add_team_member(&table, sender, &member)?;
                RoundProgress::Continues
            }
            Command::RemoveTeamMember(member) => {
                round.remove_team_member(&table, sender, &member)?;
                RoundProgress::Continues
            }
            Command::SubmitTeam => {
                round.submit_team(&table, sender)?;
                RoundProgress::Continues
            }
            Command::TeamVote(accept) => round.submit_team_vote(&mut table, sender, accept)?,
            Command::MissionVote(succeed) => round.submit_mission_vote(&table, sender, succeed)?,
        };

        if let RoundProgress::Finished(_) = progress {
            self.round_finished();
        }
        Ok(())
    }

    fn relay(&self, sender: &PlayerId, text: &str) {
        let message = format!("{}: {text}", sender.mention());
        for recipient in self.players.iter().filter(|p| p.id() != sender) {
            self.notifier.notify(recipient.id(), &message);
        }
    }
}
