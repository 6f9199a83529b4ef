//! Domain-level error type shared by the rules engine, the registry and the lobby.
//!
//! Every variant's `Display` output is the exact text reported back to the
//! acting player. Errors never leave a session in a modified state.

use thiserror::Error;

use super::error_code::ErrorCode;

/// Kinds of entity that a lookup can miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    /// Player not in the session roster
    Player,
    /// Player not on the proposed team
    TeamMember,
    /// User not associated with any game
    Game,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Action not valid in the current phase or lifecycle state
    #[error("{detail}")]
    InvalidState { code: ErrorCode, detail: String },
    /// Non-leader attempting a leader-only action, or non-team-member casting a mission vote
    #[error("{detail}")]
    AuthorizationDenied { code: ErrorCode, detail: String },
    /// Team full or roster full
    #[error("{detail}")]
    CapacityExceeded { code: ErrorCode, detail: String },
    /// Starting below the minimum player count
    #[error("There must be at least {required} players in the game to start.")]
    InsufficientPlayers { required: usize, actual: usize },
    /// Referenced player is not a session/team member
    #[error("{detail}")]
    NotFound { kind: NotFoundKind, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl GameError {
    pub fn invalid_state(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::InvalidState {
            code,
            detail: detail.into(),
        }
    }

    pub fn denied(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::AuthorizationDenied {
            code,
            detail: detail.into(),
        }
    }

    pub fn capacity(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::CapacityExceeded {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            GameError::InvalidState { code, .. } => *code,
            GameError::AuthorizationDenied { code, .. } => *code,
            GameError::CapacityExceeded { code, .. } => *code,
            GameError::InsufficientPlayers { .. } => ErrorCode::InsufficientPlayers,
            GameError::NotFound { kind, .. } => match kind {
                NotFoundKind::Player => ErrorCode::PlayerNotFound,
                NotFoundKind::TeamMember => ErrorCode::TeamMemberNotFound,
                NotFoundKind::Game => ErrorCode::GameNotFound,
            },
            GameError::Config { .. } => ErrorCode::ConfigError,
        }
    }
}
