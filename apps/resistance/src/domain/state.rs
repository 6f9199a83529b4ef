use std::fmt;

/// Phases of a single round.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Phase {
    /// Leader assembles the mission team.
    TeamSelection,
    /// Every player votes on the proposed team.
    TeamVoting,
    /// Team members vote to succeed or sabotage the mission.
    MissionVoting,
    /// Terminal; the round has a result.
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::TeamSelection => "team_selection",
            Phase::TeamVoting => "team_voting",
            Phase::MissionVoting => "mission_voting",
            Phase::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// The two hidden teams. A round result names the faction that won it.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Faction {
    /// Majority faction; wins rounds by succeeding missions.
    Resistance,
    /// Spy faction; wins rounds by sabotage or by forcing the rejection limit.
    Imperial,
}

impl Faction {
    pub fn victory_message(self) -> &'static str {
        match self {
            Faction::Resistance => "The Resistance has won!",
            Faction::Imperial => "The Imperial Spies have won!",
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Faction::Resistance => f.write_str("resistance"),
            Faction::Imperial => f.write_str("imperial"),
        }
    }
}

/// Round wins per faction.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Score {
    pub resistance: usize,
    pub imperial: usize,
}

impl Score {
    pub fn record(&mut self, faction: Faction) {
        match faction {
            Faction::Resistance => self.resistance += 1,
            Faction::Imperial => self.imperial += 1,
        }
    }

    /// Faction that has reached `needed` wins, if any.
    pub fn winner(&self, needed: usize) -> Option<Faction> {
        if self.resistance >= needed {
            Some(Faction::Resistance)
        } else if self.imperial >= needed {
            Some(Faction::Imperial)
        } else {
            None
        }
    }
}
