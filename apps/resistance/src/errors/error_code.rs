//! Error codes for the Resistance engine.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE.

use core::fmt;

/// Centralized error codes attached to every [`GameError`](super::GameError).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Invalid state
    /// Game has already started
    AlreadyStarted,
    /// Game has not started yet
    NotStarted,
    /// Game has ended and is inert
    GameEnded,
    /// Action does not belong to the current round phase
    PhaseMismatch,
    /// Team does not have the configured number of members
    IncompleteTeam,
    /// Player is already on the proposed team
    AlreadyOnTeam,
    /// User already belongs to a game
    AlreadyInGame,

    // Authorization
    /// Leader-only action attempted by another player
    NotLeader,
    /// Mission vote cast by a player outside the team
    NotOnTeam,

    // Capacity
    /// Roster already holds the maximum number of players
    RosterFull,
    /// Proposed team already holds the configured number of members
    TeamFull,

    // Player count
    /// Not enough players to start
    InsufficientPlayers,

    // Not found
    /// Referenced player is not part of the game
    PlayerNotFound,
    /// Referenced player is not on the proposed team
    TeamMemberNotFound,
    /// Referenced user has no game
    GameNotFound,

    // Ambient
    /// Configuration value could not be parsed
    ConfigError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AlreadyStarted => "ALREADY_STARTED",
            Self::NotStarted => "NOT_STARTED",
            Self::GameEnded => "GAME_ENDED",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::IncompleteTeam => "INCOMPLETE_TEAM",
            Self::AlreadyOnTeam => "ALREADY_ON_TEAM",
            Self::AlreadyInGame => "ALREADY_IN_GAME",

            Self::NotLeader => "NOT_LEADER",
            Self::NotOnTeam => "NOT_ON_TEAM",

            Self::RosterFull => "ROSTER_FULL",
            Self::TeamFull => "TEAM_FULL",

            Self::InsufficientPlayers => "INSUFFICIENT_PLAYERS",

            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::TeamMemberNotFound => "TEAM_MEMBER_NOT_FOUND",
            Self::GameNotFound => "GAME_NOT_FOUND",

            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
