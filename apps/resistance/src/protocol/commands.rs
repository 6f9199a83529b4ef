//! In-game command grammar.
//!
//! Commands are classified by an ordered rule list; the first matching rule
//! wins and text matching no rule is chat to be relayed. Matching is
//! case-insensitive and ignores surrounding whitespace.

use lazy_regex::{lazy_regex, Lazy};
use regex::{Captures, Regex};

use crate::domain::player::PlayerId;
use crate::errors::domain::GameError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    AddTeamMember(PlayerId),
    RemoveTeamMember(PlayerId),
    SubmitTeam,
    /// `true` approves the proposed team.
    TeamVote(bool),
    /// `true` votes for the mission to succeed.
    MissionVote(bool),
}

pub struct CommandRule {
    pub name: &'static str,
    pattern: &'static Lazy<Regex>,
    build: fn(&Captures<'_>) -> Result<Command, GameError>,
}

impl CommandRule {
    fn apply(&self, text: &str) -> Option<Result<Command, GameError>> {
        self.pattern.captures(text).map(|caps| (self.build)(&caps))
    }
}

static ADD: Lazy<Regex> = lazy_regex!(r"^\s*add\s+<@([^>\s]*)>\s*$"i);
static REMOVE: Lazy<Regex> = lazy_regex!(r"^\s*remove\s+<@([^>\s]*)>\s*$"i);
static SUBMIT: Lazy<Regex> = lazy_regex!(r"^\s*submit\s*$"i);
static TEAM_VOTE: Lazy<Regex> = lazy_regex!(r"^\s*(accept|yes|yea|reject|no|nay)\s*$"i);
static MISSION_VOTE: Lazy<Regex> = lazy_regex!(r"^\s*(succeed|fail)\s*$"i);
static HELP: Lazy<Regex> = lazy_regex!(r"^\s*help\s*$"i);

fn captured_player(caps: &Captures<'_>) -> Result<PlayerId, GameError> {
    PlayerId::parse(caps.get(1).map_or("", |m| m.as_str()))
}

fn captured_word(caps: &Captures<'_>) -> String {
    caps.get(1)
        .map_or_else(String::new, |m| m.as_str().to_ascii_lowercase())
}

/// Rules in priority order.
pub static COMMAND_RULES: [CommandRule; 6] = [
    CommandRule {
        name: "add",
        pattern: &ADD,
        build: |caps| captured_player(caps).map(Command::AddTeamMember),
    },
    CommandRule {
        name: "remove",
        pattern: &REMOVE,
        build: |caps| captured_player(caps).map(Command::RemoveTeamMember),
    },
    CommandRule {
        name: "submit",
        pattern: &SUBMIT,
        build: |_| Ok(Command::SubmitTeam),
    },
    CommandRule {
        name: "team_vote",
        pattern: &TEAM_VOTE,
        build: |caps| {
            let accept = matches!(captured_word(caps).as_str(), "accept" | "yes" | "yea");
            Ok(Command::TeamVote(accept))
        },
    },
    CommandRule {
        name: "mission_vote",
        pattern: &MISSION_VOTE,
        build: |caps| Ok(Command::MissionVote(captured_word(caps) == "succeed")),
    },
    CommandRule {
        name: "help",
        pattern: &HELP,
        build: |_| Ok(Command::Help),
    },
];

/// Classify one line of text.
///
/// `Ok(None)` means the text is chat. A command naming a malformed player
/// identifier fails with NotFound.
pub fn parse(text: &str) -> Result<Option<Command>, GameError> {
    COMMAND_RULES
        .iter()
        .find_map(|rule| rule.apply(text))
        .transpose()
}
