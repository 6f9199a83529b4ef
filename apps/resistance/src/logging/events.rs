//! Structured game lifecycle events.
//!
//! Spy identities never appear in these events.

use tracing::info;

use crate::domain::session::SessionId;
use crate::domain::state::Faction;

pub fn game_started(session_id: SessionId, players: usize, spies: usize) {
    info!(
        event = "GAME_STARTED",
        %session_id,
        players,
        spies,
        "Game started"
    );
}

pub fn team_vote_resolved(
    session_id: SessionId,
    round: usize,
    yes: usize,
    no: usize,
    approved: bool,
    rejections: u8,
) {
    info!(
        event = "TEAM_VOTE_RESOLVED",
        %session_id,
        round,
        yes,
        no,
        approved,
        rejections,
        "Team vote resolved"
    );
}

pub fn mission_resolved(session_id: SessionId, round: usize, succeeded: usize, failed: usize) {
    info!(
        event = "MISSION_RESOLVED",
        %session_id,
        round,
        succeeded,
        failed,
        "Mission resolved"
    );
}

pub fn round_finished(session_id: SessionId, round: usize, result: Faction) {
    info!(
        event = "ROUND_FINISHED",
        %session_id,
        round,
        %result,
        "Round finished"
    );
}

pub fn game_ended(session_id: SessionId, winner: Option<Faction>) {
    let winner = winner.map_or_else(|| "none".to_string(), |f| f.to_string());
    info!(
        event = "GAME_ENDED",
        %session_id,
        %winner,
        "Game ended"
    );
}
