//! Contextual help text. Pure functions; callers decide who receives it.

use crate::domain::player::{mention_lines, PlayerId};

pub fn not_started() -> String {
    [
        "The game has not yet begun.",
        "After the game begins, type \"help\" for contextual help.",
    ]
    .join("\n")
}

pub fn team_selection(is_leader: bool) -> String {
    if is_leader {
        [
            "Please select a team to go on the mission:",
            "To add a team member: \"add @USER_TAG\"",
            "To remove a team member: \"remove @USER_TAG\"",
            "To submit team for vote: \"submit\"",
        ]
        .join("\n")
    } else {
        [
            "Please wait for the mission leader to select a team.",
            "In the meantime, join in conversation about the selection with the other players.",
        ]
        .join("\n")
    }
}

pub fn team_voting(team: &[PlayerId]) -> String {
    let mut lines =
        vec!["Please decide whether you want the selected team to go on the mission:".to_string()];
    lines.extend(mention_lines(team));
    lines.push("For yes, vote: \"accept\", \"yes\" or \"yea\"".to_string());
    lines.push("For no, vote: \"reject\", \"no\", or \"nay\"".to_string());
    lines.join("\n")
}

pub fn mission_voting(on_team: bool) -> String {
    if on_team {
        [
            "Please decide whether you want the mission to succeed or fail:",
            "For succeed: \"succeed\"",
            "For fail: \"fail\"",
        ]
        .join("\n")
    } else {
        [
            "Please wait for the team members to decide the fate of the mission.",
            "In the meantime, feel free to engage in some lively table-talk.",
        ]
        .join("\n")
    }
}

pub fn finished() -> String {
    "This round is over. Please wait for the next round to begin.".to_string()
}
