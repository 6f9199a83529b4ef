//! One mission attempt: team selection, team approval vote, mission vote.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::help;
use crate::domain::player::{mention_lines, Player, PlayerId};
use crate::domain::rules::{RoundSpec, MAX_REJECTIONS};
use crate::domain::session::SessionId;
use crate::domain::state::{Faction, Phase};
use crate::errors::domain::{GameError, NotFoundKind};
use crate::errors::ErrorCode;
use crate::logging::events;
use crate::notify::Notifier;

/// Returns the next seat clockwise, wrapping at `seats`.
#[inline]
pub fn next_seat(seat: usize, seats: usize) -> usize {
    (seat + 1) % seats
}

/// Session state a round reads and the single piece it may advance (the leader cursor).
///
/// Built by the session for the duration of one action.
pub struct Table<'a> {
    session_id: SessionId,
    players: &'a [Player],
    leader: &'a mut usize,
    notifier: &'a dyn Notifier,
}

impl<'a> Table<'a> {
    pub(crate) fn new(
        session_id: SessionId,
        players: &'a [Player],
        leader: &'a mut usize,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            session_id,
            players,
            leader,
            notifier,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn players(&self) -> &[Player] {
        self.players
    }

    pub fn is_player(&self, id: &PlayerId) -> bool {
        self.players.iter().any(|p| p.id() == id)
    }

    pub fn leader(&self) -> &PlayerId {
        self.players[*self.leader].id()
    }

    pub fn is_leader(&self, id: &PlayerId) -> bool {
        self.leader() == id
    }

    /// Advance the leader cursor one seat and return the new leader.
    pub fn next_leader(&mut self) -> &PlayerId {
        *self.leader = next_seat(*self.leader, self.players.len());
        self.leader()
    }

    pub fn notify(&self, to: &PlayerId, message: &str) {
        self.notifier.notify(to, message);
    }

    pub fn notify_all(&self, message: &str) {
        for player in self.players {
            self.notifier.notify(player.id(), message);
        }
    }
}

/// What a vote did to the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundProgress {
    /// Still collecting votes, or moved to another non-terminal phase.
    Continues,
    /// Round reached FINISHED with this result.
    Finished(Faction),
}

#[derive(Debug, Clone)]
pub struct Round {
    /// 1-based position within the game.
    number: usize,
    spec: RoundSpec,
    phase: Phase,
    team: Vec<PlayerId>,
    votes: HashMap<PlayerId, bool>,
    rejections: u8,
    result: Option<Faction>,
}

impl Round {
    /// Open a round in TEAM_SELECTION and prompt the current leader.
    pub(crate) fn begin(number: usize, spec: RoundSpec, table: &Table<'_>) -> Self {
        debug!(
            session_id = %table.session_id(),
            round = number,
            team_size = spec.team_size,
            sabotage_threshold = spec.sabotage_threshold,
            leader = %table.leader(),
            "Round beginning"
        );
        table.notify_all("A new round is beginning!");
        table.notify(table.leader(), "Please select a mission team.");

        Self {
            number,
            spec,
            phase: Phase::TeamSelection,
            team: Vec::with_capacity(spec.team_size),
            votes: HashMap::new(),
            rejections: 0,
            result: None,
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn team_size(&self) -> usize {
        self.spec.team_size
    }

    pub fn sabotage_threshold(&self) -> usize {
        self.spec.sabotage_threshold
    }

    pub fn team(&self) -> &[PlayerId] {
        &self.team
    }

    pub fn is_on_team(&self, id: &PlayerId) -> bool {
        self.team.contains(id)
    }

    pub fn rejections(&self) -> u8 {
        self.rejections
    }

    /// Votes received in the current voting phase.
    pub fn votes_received(&self) -> usize {
        self.votes.len()
    }

    /// Result of the round; `None` until the round is FINISHED.
    pub fn result(&self) -> Option<Faction> {
        match self.phase {
            Phase::Finished => self.result,
            _ => None,
        }
    }

    fn require_phase(&self, expected: Phase, detail: &str) -> Result<(), GameError> {
        if self.phase != expected {
            return Err(GameError::invalid_state(ErrorCode::PhaseMismatch, detail));
        }
        Ok(())
    }

    fn require_leader(
        &self,
        table: &Table<'_>,
        actor: &PlayerId,
        detail: &str,
    ) -> Result<(), GameError> {
        if !table.is_leader(actor) {
            return Err(GameError::denied(ErrorCode::NotLeader, detail));
        }
        Ok(())
    }

    pub fn add_team_member(
        &mut self,
        table: &Table<'_>,
        actor: &PlayerId,
        member: &PlayerId,
    ) -> Result<(), GameError> {
        self.require_leader(
            table,
            actor,
            "Only the mission leader may add players to the team.",
        )?;
        self.require_phase(Phase::TeamSelection, "Team selection has completed.")?;

        if self.team.len() >= self.team_size() {
            return Err(GameError::capacity(
                ErrorCode::TeamFull,
                "Maximum team size reached.",
            ));
        }
        if self.is_on_team(member) {
            return Err(GameError::invalid_state(
                ErrorCode::AlreadyOnTeam,
                "Selected player has already been added to the team.",
            ));
        }
        if !table.is_player(member) {
            return Err(GameError::not_found(
                NotFoundKind::Player,
                "Selected player is not part of this game.",
            ));
        }

        self.team.push(member.clone());
        debug!(
            round = self.number,
            member = %member,
            size = self.team.len(),
            "Team member added"
        );
        table.notify_all(&format!("New team member, {}, added.", member.mention()));
        Ok(())
    }

    pub fn remove_team_member(
        &mut self,
        table: &Table<'_>,
        actor: &PlayerId,
        member: &PlayerId,
    ) -> Result<(), GameError> {
        self.require_leader(
            table,
            actor,
            "Only the mission leader may remove players from the team.",
        )?;
        self.require_phase(Phase::TeamSelection, "Team selection has completed.")?;

        let Some(pos) = self.team.iter().position(|id| id == member) else {
            return Err(GameError::not_found(
                NotFoundKind::TeamMember,
                "Selected player is not part of the team.",
            ));
        };

        self.team.remove(pos);
        debug!(
            round = self.number,
            member = %member,
            size = self.team.len(),
            "Team member removed"
        );
        table.notify_all(&format!("Team member, {}, removed.", member.mention()));
        Ok(())
    }

    pub fn submit_team(&mut self, table: &Table<'_>, actor: &PlayerId) -> Result<(), GameError> {
        self.require_leader(table, actor, "Only the mission leader may submit a team.")?;
        self.require_phase(Phase::TeamSelection, "Team has already been submitted.")?;

        if self.team.len() != self.team_size() {
            return Err(GameError::invalid_state(
                ErrorCode::IncompleteTeam,
                "Please select a full team complement.",
            ));
        }

        self.votes.clear();
        self.phase = Phase::TeamVoting;

        let mut lines = vec!["Please vote on the following selected team:".to_string()];
        lines.extend(mention_lines(&self.team));
        table.notify_all(&lines.join("\n"));
        Ok(())
    }

    /// Record a team approval vote; resolves once every player has voted.
    ///
    /// A repeat vote overwrites the voter's previous choice.
    pub fn submit_team_vote(
        &mut self,
        table: &mut Table<'_>,
        voter: &PlayerId,
        accept: bool,
    ) -> Result<RoundProgress, GameError> {
        self.require_phase(
            Phase::TeamVoting,
            "It is not time to vote on a mission team.",
        )?;
        if !table.is_player(voter) {
            return Err(GameError::not_found(
                NotFoundKind::Player,
                "You are not part of this game.",
            ));
        }

        self.votes.insert(voter.clone(), accept);
        debug!(
            round = self.number,
            voter = %voter,
            received = self.votes.len(),
            "Team vote recorded"
        );

        let vote_count = self.votes.len();
        if vote_count != table.players().len() {
            return Ok(RoundProgress::Continues);
        }

        let yes = self.votes.values().filter(|&&v| v).count();
        let no = vote_count - yes;

        let mut lines = vec!["The vote results are in:".to_string()];
        for player in table.players() {
            if let Some(&vote) = self.votes.get(player.id()) {
                let choice = if vote { "YES" } else { "NO" };
                lines.push(format!("{}: {choice}", player.id().mention()));
            }
        }
        table.notify_all(&lines.join("\n"));

        table.next_leader();
        self.votes.clear();

        // Strict majority; ties reject.
        let approved = yes * 2 > vote_count;
        if approved {
            self.phase = Phase::MissionVoting;
            events::team_vote_resolved(
                table.session_id(),
                self.number,
                yes,
                no,
                true,
                self.rejections,
            );
            table.notify_all("The team was approved. The mission will proceed.");
            for member in &self.team {
                table.notify(member, "Please vote to succeed or fail the mission.");
            }
            return Ok(RoundProgress::Continues);
        }

        self.rejections = (self.rejections + 1).min(MAX_REJECTIONS);
        self.team.clear();
        events::team_vote_resolved(
            table.session_id(),
            self.number,
            yes,
            no,
            false,
            self.rejections,
        );

        if self.rejections >= MAX_REJECTIONS {
            table.notify_all(
                "Maximum team rejections reached. The Imperial Spies win the round.",
            );
            return Ok(self.finish(table, Faction::Imperial));
        }

        self.phase = Phase::TeamSelection;
        table.notify_all("The team was rejected. A new team will be selected.");
        table.notify(table.leader(), "Please select a mission team.");
        Ok(RoundProgress::Continues)
    }

    /// Record a mission vote from a team member; resolves once the whole team has voted.
    pub fn submit_mission_vote(
        &mut self,
        table: &Table<'_>,
        voter: &PlayerId,
        succeed: bool,
    ) -> Result<RoundProgress, GameError> {
        self.require_phase(Phase::MissionVoting, "The mission has not yet begun.")?;
        if !self.is_on_team(voter) {
            return Err(GameError::denied(
                ErrorCode::NotOnTeam,
                "You are not part of the current mission team.",
            ));
        }

        self.votes.insert(voter.clone(), succeed);
        debug!(round = self.number, received = self.votes.len(), "Mission vote recorded");

        if self.votes.len() != self.team_size() {
            return Ok(RoundProgress::Continues);
        }

        let succeeded = self.votes.values().filter(|&&v| v).count();
        let failed = self.team_size() - succeeded;
        let success = failed < self.sabotage_threshold();

        events::mission_resolved(table.session_id(), self.number, succeeded, failed);
        let outcome = if success { "succeeded!" } else { "failed!" };
        table.notify_all(
            &[
                "The mission results are in:".to_string(),
                format!("Success: {succeeded}"),
                format!("Fail: {failed}"),
                format!("The mission has {outcome}"),
            ]
            .join("\n"),
        );

        let faction = if success {
            Faction::Resistance
        } else {
            Faction::Imperial
        };
        Ok(self.finish(table, faction))
    }

    /// Help text for `player` in the current phase.
    pub fn help_for(&self, table: &Table<'_>, player: &PlayerId) -> String {
        match self.phase {
            Phase::TeamSelection => help::team_selection(table.is_leader(player)),
            Phase::TeamVoting => help::team_voting(&self.team),
            Phase::MissionVoting => help::mission_voting(self.is_on_team(player)),
            Phase::Finished => help::finished(),
        }
    }

    pub fn show_help(&self, table: &Table<'_>, player: &PlayerId) {
        table.notify(player, &self.help_for(table, player));
    }

    fn finish(&mut self, table: &Table<'_>, faction: Faction) -> RoundProgress {
        debug_assert!(self.result.is_none(), "round result is write-once");
        self.votes.clear();
        self.phase = Phase::Finished;
        self.result = Some(faction);
        events::round_finished(table.session_id(), self.number, faction);
        RoundProgress::Finished(faction)
    }
}
