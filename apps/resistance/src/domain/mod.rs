//! Domain layer: the turn-based rules engine.

pub mod help;
pub mod player;
pub mod round;
pub mod rules;
pub mod session;
pub mod state;

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests_props_rules;

// Re-exports for ergonomics
pub use player::{Player, PlayerId};
pub use round::{Round, RoundProgress, Table};
pub use rules::{definition_for, round_spec, GameDefinition, RoundSpec};
pub use session::{GameSession, SessionId};
pub use state::{Faction, Phase, Score};
