//! Front-desk grammar, checked before a message is routed into a game.

use lazy_regex::regex_captures;
use lazy_regex::regex_is_match;

use crate::domain::player::PlayerId;
use crate::errors::domain::GameError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LobbyCommand {
    New,
    /// Join the game of the referenced player.
    Join(PlayerId),
    Leave,
    Start,
    End,
}

pub fn parse(text: &str) -> Result<Option<LobbyCommand>, GameError> {
    if regex_is_match!(r"^\s*new\s*$"i, text) {
        return Ok(Some(LobbyCommand::New));
    }
    if let Some((_, host)) = regex_captures!(r"^\s*join\s+<@([^>\s]*)>\s*$"i, text) {
        return PlayerId::parse(host).map(|id| Some(LobbyCommand::Join(id)));
    }
    if regex_is_match!(r"^\s*leave\s*$"i, text) {
        return Ok(Some(LobbyCommand::Leave));
    }
    if regex_is_match!(r"^\s*start\s*$"i, text) {
        return Ok(Some(LobbyCommand::Start));
    }
    if regex_is_match!(r"^\s*end\s*$"i, text) {
        return Ok(Some(LobbyCommand::End));
    }
    Ok(None)
}
