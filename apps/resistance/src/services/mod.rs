//! Session bookkeeping around the rules engine.

pub mod lobby;
pub mod registry;

pub use lobby::Lobby;
pub use registry::{SessionRegistry, SharedSession};
