//! Outbound collaborators: player notification and session-closed callbacks.

mod memory;

pub use memory::MemoryNotifier;

use crate::domain::player::{Player, PlayerId};
use crate::domain::session::SessionId;

/// Delivers a text message to one player. Transport is the implementor's concern.
pub trait Notifier: Send + Sync {
    fn notify(&self, to: &PlayerId, message: &str);
}

/// Invoked once when a session ends so an external registry can release its players.
pub trait SessionClosed: Send + Sync {
    fn session_closed(&self, session_id: SessionId, players: &[Player]);
}
