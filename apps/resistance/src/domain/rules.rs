use std::ops::RangeInclusive;

pub const MIN_PLAYERS: usize = 4;
pub const MAX_PLAYERS: usize = 10;
pub const ROUNDS: usize = 5;
pub const MAX_REJECTIONS: u8 = 5;
/// Round wins needed by either faction: ceil(ROUNDS / 2).
pub const VICTORY_COUNT: usize = ROUNDS.div_ceil(2);

/// Team size and sabotage threshold for one round.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RoundSpec {
    pub team_size: usize,
    /// Minimum number of "fail" mission votes that fails the mission.
    pub sabotage_threshold: usize,
}

/// Spy count and round schedule for one participant count.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameDefinition {
    pub spy_count: usize,
    pub rounds: [RoundSpec; ROUNDS],
}

const fn spec(team_size: usize, sabotage_threshold: usize) -> RoundSpec {
    RoundSpec {
        team_size,
        sabotage_threshold,
    }
}

// Indexed by participant count - MIN_PLAYERS.
const DEFINITIONS: [GameDefinition; MAX_PLAYERS - MIN_PLAYERS + 1] = [
    // 4
    GameDefinition {
        spy_count: 1,
        rounds: [spec(2, 1), spec(1, 1), spec(2, 1), spec(2, 1), spec(3, 1)],
    },
    // 5
    GameDefinition {
        spy_count: 2,
        rounds: [spec(2, 1), spec(3, 1), spec(2, 1), spec(3, 1), spec(3, 1)],
    },
    // 6
    GameDefinition {
        spy_count: 2,
        rounds: [spec(2, 1), spec(3, 1), spec(3, 1), spec(3, 1), spec(4, 1)],
    },
    // 7
    GameDefinition {
        spy_count: 3,
        rounds: [spec(2, 1), spec(3, 1), spec(3, 1), spec(4, 2), spec(4, 1)],
    },
    // 8
    GameDefinition {
        spy_count: 3,
        rounds: [spec(3, 1), spec(4, 1), spec(4, 1), spec(5, 2), spec(5, 1)],
    },
    // 9
    GameDefinition {
        spy_count: 3,
        rounds: [spec(3, 1), spec(4, 1), spec(4, 1), spec(5, 2), spec(5, 1)],
    },
    // 10
    GameDefinition {
        spy_count: 4,
        rounds: [spec(3, 1), spec(4, 1), spec(4, 1), spec(5, 2), spec(5, 1)],
    },
];

pub fn supported_player_counts() -> RangeInclusive<usize> {
    MIN_PLAYERS..=MAX_PLAYERS
}

/// Game definition for a participant count, `None` outside 4..=10.
pub fn definition_for(player_count: usize) -> Option<&'static GameDefinition> {
    if !supported_player_counts().contains(&player_count) {
        return None;
    }
    DEFINITIONS.get(player_count - MIN_PLAYERS)
}

/// Round spec for a 0-based round index.
pub fn round_spec(player_count: usize, round_index: usize) -> Option<RoundSpec> {
    definition_for(player_count).and_then(|def| def.rounds.get(round_index).copied())
}
