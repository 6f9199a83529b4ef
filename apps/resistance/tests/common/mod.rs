#![allow(dead_code)]

// tests/common/mod.rs
use std::sync::Arc;
use std::time::Duration;

use resistance::{Lobby, MemoryNotifier, PlayerId, TableConfig};

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    resistance_test_support::logging::init();
}

pub fn user(n: usize) -> PlayerId {
    format!("U{n:08}")
        .parse()
        .expect("fixture ids are well formed")
}

pub fn lobby(seed: u64) -> (Arc<MemoryNotifier>, Lobby) {
    let notifier = Arc::new(MemoryNotifier::new());
    let config = TableConfig {
        end_confirm_window: Duration::from_secs(600),
        seed: Some(seed),
    };
    (notifier.clone(), Lobby::new(notifier, config))
}

/// Host `first` creates a game and `first + 1 ..= first + count - 1` join it.
pub fn seat_table(lobby: &Lobby, first: usize, count: usize) -> Vec<PlayerId> {
    let host = user(first);
    lobby.handle_message(&host, "new");
    let join = format!("join {}", host.mention());
    for n in first + 1..first + count {
        lobby.handle_message(&user(n), &join);
    }
    (first..first + count).map(user).collect()
}

/// Seating order and current leader of `member`'s game.
pub fn seating(lobby: &Lobby, member: &PlayerId) -> (Vec<PlayerId>, PlayerId) {
    let shared = lobby.registry().lookup(member).expect("member has a game");
    let session = shared.lock();
    let seats = session.players().iter().map(|p| p.id().clone()).collect();
    let leader = session.leader().expect("game has started").clone();
    (seats, leader)
}

/// Drive one approved round through the lobby.
pub fn play_round(lobby: &Lobby, member: &PlayerId, succeed: bool) {
    let (seats, leader) = seating(lobby, member);
    let team_size = {
        let shared = lobby.registry().lookup(member).expect("member has a game");
        let session = shared.lock();
        session.current_round().expect("round open").team_size()
    };

    let team: Vec<PlayerId> = seats.iter().take(team_size).cloned().collect();
    for m in &team {
        lobby.handle_message(&leader, &format!("add {}", m.mention()));
    }
    lobby.handle_message(&leader, "submit");
    for voter in &seats {
        lobby.handle_message(voter, "yes");
    }
    let word = if succeed { "succeed" } else { "fail" };
    for m in &team {
        lobby.handle_message(m, word);
    }
}
