#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod notify;
pub mod protocol;
pub mod services;

// Re-exports for public API
pub use config::TableConfig;
pub use domain::{Faction, GameSession, Phase, Player, PlayerId, Round, SessionId};
pub use errors::{ErrorCode, GameError};
pub use notify::{MemoryNotifier, Notifier, SessionClosed};
pub use services::{Lobby, SessionRegistry, SharedSession};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    resistance_test_support::logging::init();
}
