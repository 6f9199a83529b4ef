use parking_lot::Mutex;

use super::Notifier;
use crate::domain::player::PlayerId;

/// Notifier that keeps every delivered message in memory, in delivery order.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    delivered: Mutex<Vec<(PlayerId, String)>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every message delivered so far as `(recipient, text)`.
    pub fn all(&self) -> Vec<(PlayerId, String)> {
        self.delivered.lock().clone()
    }

    pub fn messages_for(&self, player: &PlayerId) -> Vec<String> {
        self.delivered
            .lock()
            .iter()
            .filter(|(to, _)| to == player)
            .map(|(_, text)| text.clone())
            .collect()
    }

    pub fn last_for(&self, player: &PlayerId) -> Option<String> {
        self.delivered
            .lock()
            .iter()
            .rev()
            .find(|(to, _)| to == player)
            .map(|(_, text)| text.clone())
    }

    /// Whether any message to `player` contains `needle`.
    pub fn received(&self, player: &PlayerId, needle: &str) -> bool {
        self.delivered
            .lock()
            .iter()
            .any(|(to, text)| to == player && text.contains(needle))
    }

    pub fn clear(&self) {
        self.delivered.lock().clear();
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, to: &PlayerId, message: &str) {
        self.delivered.lock().push((to.clone(), message.to_string()));
    }
}
