//! Test-only builders for domain unit tests.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::player::{Player, PlayerId};
use crate::domain::round::{Round, Table};
use crate::domain::rules::RoundSpec;
use crate::domain::session::{GameSession, SessionId};
use crate::notify::{MemoryNotifier, SessionClosed};

pub fn pid(n: usize) -> PlayerId {
    format!("U{n:08}").parse().unwrap()
}

pub fn roster(count: usize) -> Vec<Player> {
    (1..=count).map(|n| Player::new(pid(n))).collect()
}

/// Seated players plus a leader cursor, standing in for a session.
pub struct TableFixture {
    pub session_id: SessionId,
    pub players: Vec<Player>,
    pub leader: usize,
    pub notifier: MemoryNotifier,
}

impl TableFixture {
    pub fn new(count: usize) -> Self {
        Self {
            session_id: SessionId::new(),
            players: roster(count),
            leader: 0,
            notifier: MemoryNotifier::new(),
        }
    }

    pub fn table(&mut self) -> Table<'_> {
        Table::new(
            self.session_id,
            &self.players,
            &mut self.leader,
            &self.notifier,
        )
    }

    pub fn leader_id(&self) -> PlayerId {
        self.players[self.leader].id().clone()
    }

    pub fn begin(&mut self, team_size: usize, sabotage_threshold: usize) -> Round {
        let spec = RoundSpec {
            team_size,
            sabotage_threshold,
        };
        let table = self.table();
        Round::begin(1, spec, &table)
    }

    /// Leader proposes players `1..=team_size` and submits.
    pub fn propose_first(&mut self, round: &mut Round) {
        let leader = self.leader_id();
        let table = self.table();
        for n in 1..=round.team_size() {
            round.add_team_member(&table, &leader, &pid(n)).unwrap();
        }
        round.submit_team(&table, &leader).unwrap();
    }

    /// Everyone votes; the first `yes` seats approve.
    pub fn vote_team(&mut self, round: &mut Round, yes: usize) -> crate::domain::RoundProgress {
        let ids: Vec<PlayerId> = self.players.iter().map(|p| p.id().clone()).collect();
        let mut last = crate::domain::RoundProgress::Continues;
        for (seat, id) in ids.iter().enumerate() {
            let mut table = self.table();
            last = round.submit_team_vote(&mut table, id, seat < yes).unwrap();
        }
        last
    }
}

/// Records every closed session.
#[derive(Default)]
pub struct ClosedLog {
    pub closed: Mutex<Vec<(SessionId, Vec<PlayerId>)>>,
}

impl SessionClosed for ClosedLog {
    fn session_closed(&self, session_id: SessionId, players: &[Player]) {
        self.closed
            .lock()
            .push((session_id, players.iter().map(|p| p.id().clone()).collect()));
    }
}

/// Not-yet-started session with `count` players and a fixed seed.
pub fn seated_session(
    count: usize,
    seed: u64,
) -> (Arc<MemoryNotifier>, Arc<ClosedLog>, GameSession) {
    let notifier = Arc::new(MemoryNotifier::new());
    let closed = Arc::new(ClosedLog::default());
    let mut session = GameSession::new(notifier.clone())
        .with_seed(seed)
        .on_closed(closed.clone());
    for player in roster(count) {
        session.add_player(player).unwrap();
    }
    (notifier, closed, session)
}

pub fn leader_of(session: &GameSession) -> PlayerId {
    session.leader().unwrap().clone()
}

/// Current leader proposes the first `team_size` seats and submits.
pub fn propose_team(session: &mut GameSession) -> Vec<PlayerId> {
    let leader = leader_of(session);
    let team_size = session.current_round().unwrap().team_size();
    let team: Vec<PlayerId> = session
        .players()
        .iter()
        .take(team_size)
        .map(|p| p.id().clone())
        .collect();
    for member in &team {
        session
            .handle_message(&leader, &format!("add {}", member.mention()))
            .unwrap();
    }
    session.handle_message(&leader, "submit").unwrap();
    team
}

/// Every seated player votes `accept`.
pub fn everyone_votes(session: &mut GameSession, accept: bool) {
    let ids: Vec<PlayerId> = session.players().iter().map(|p| p.id().clone()).collect();
    let word = if accept { "accept" } else { "reject" };
    for id in ids {
        session.handle_message(&id, word).unwrap();
    }
}

/// Play one full round where the team is approved and the mission goes `succeed`.
pub fn play_mission(session: &mut GameSession, succeed: bool) {
    let team = propose_team(session);
    everyone_votes(session, true);
    let word = if succeed { "succeed" } else { "fail" };
    for member in team {
        session.handle_message(&member, word).unwrap();
    }
}

/// Case count comes from `PROPTEST_CASES`, defaulting to 32.
pub fn proptest_config() -> proptest::prelude::ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(32);
    proptest::prelude::ProptestConfig {
        cases,
        ..proptest::prelude::ProptestConfig::default()
    }
}
