//! Text command grammar shared by the lobby and the game router.

pub mod commands;
pub mod lobby_commands;
