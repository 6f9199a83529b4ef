use std::fmt;
use std::str::FromStr;

use lazy_regex::regex_is_match;

use crate::errors::domain::{GameError, NotFoundKind};

/// Platform user identifier: `U` followed by 8 upper-case alphanumerics.
///
/// Parsing upper-cases the input, so `u0abcdef1` and `U0ABCDEF1` name the same player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn parse(raw: &str) -> Result<Self, GameError> {
        let normalized = raw.trim().to_ascii_uppercase();
        if regex_is_match!(r"^U[A-Z0-9]{8}$", &normalized) {
            Ok(Self(normalized))
        } else {
            Err(GameError::not_found(
                NotFoundKind::Player,
                format!("\"{}\" is not a recognized player.", raw.trim()),
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Chat mention form, `<@ID>`.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.0)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PlayerId {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A seated participant. Identity is external; the session only assigns the spy flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    is_spy: bool,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Self { id, is_spy: false }
    }

    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    pub fn is_spy(&self) -> bool {
        self.is_spy
    }

    pub(crate) fn make_spy(&mut self) {
        self.is_spy = true;
    }
}

/// One mention per line, in the given order.
pub fn mention_lines<'a>(ids: impl IntoIterator<Item = &'a PlayerId>) -> Vec<String> {
    ids.into_iter().map(PlayerId::mention).collect()
}
