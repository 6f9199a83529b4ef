//! Property tests for the game definition table and whole-session invariants.
//!
//! - Every supported roster size has exactly five rounds whose teams fit the roster
//! - Spy assignment always matches the table, for any seed
//! - A mission fails exactly when the fail votes reach the sabotage threshold
//! - A game never opens a sixth round and always ends on a third win

use proptest::prelude::*;

use crate::domain::rules::{definition_for, round_spec, MAX_PLAYERS, MIN_PLAYERS, ROUNDS};
use crate::domain::state::{Faction, Phase};
use crate::domain::test_helpers::{
    everyone_votes, proptest_config, propose_team, seated_session, TableFixture,
};
use crate::domain::RoundProgress;

proptest! {
    #![proptest_config(proptest_config())]

    /// Property: team sizes fit the roster and thresholds are 1 or 2.
    #[test]
    fn prop_round_specs_fit_roster(count in MIN_PLAYERS..=MAX_PLAYERS, index in 0usize..ROUNDS) {
        let spec = round_spec(count, index).unwrap();
        prop_assert!(spec.team_size >= 1 && spec.team_size < count,
            "team of {} for {count} players", spec.team_size);
        prop_assert!((1..=2).contains(&spec.sabotage_threshold));
        prop_assert!(round_spec(count, ROUNDS).is_none());
    }

    /// Property: the configured spy count is assigned for any seed.
    #[test]
    fn prop_spy_count_matches_table(count in MIN_PLAYERS..=MAX_PLAYERS, seed in any::<u64>()) {
        let (_, _, mut session) = seated_session(count, seed);
        session.start().unwrap();

        let expected = definition_for(count).unwrap().spy_count;
        prop_assert_eq!(session.spies().count(), expected);
        prop_assert!(expected * 2 < count, "spies are always a minority");
    }

    /// Property: mission outcome is `fails < threshold`.
    #[test]
    fn prop_mission_outcome_follows_threshold(
        team_size in 2usize..=5,
        threshold in 1usize..=2,
        fails in 0usize..=5,
    ) {
        prop_assume!(fails <= team_size);
        let mut fx = TableFixture::new(team_size + 2);
        let mut round = fx.begin(team_size, threshold);
        fx.propose_first(&mut round);
        let all = fx.players.len();
        fx.vote_team(&mut round, all);
        prop_assert_eq!(round.phase(), Phase::MissionVoting);

        let table = fx.table();
        let team = round.team().to_vec();
        let mut last = RoundProgress::Continues;
        for (i, member) in team.iter().enumerate() {
            last = round.submit_mission_vote(&table, member, i >= fails).unwrap();
        }

        let expected = if fails < threshold { Faction::Resistance } else { Faction::Imperial };
        prop_assert_eq!(last, RoundProgress::Finished(expected));
        prop_assert_eq!(round.result(), Some(expected));
    }

    /// Property: random play ends on the third win within five rounds.
    #[test]
    fn prop_game_ends_on_third_win(
        count in MIN_PLAYERS..=MAX_PLAYERS,
        seed in any::<u64>(),
        outcomes in proptest::collection::vec(any::<bool>(), ROUNDS),
    ) {
        let (_, closed, mut session) = seated_session(count, seed);
        session.start().unwrap();

        for succeed in outcomes {
            if session.is_ended() {
                break;
            }
            let team = propose_team(&mut session);
            everyone_votes(&mut session, true);
            let word = if succeed { "succeed" } else { "fail" };
            for member in team {
                session.handle_message(&member, word).unwrap();
            }
        }

        prop_assert!(session.is_ended());
        prop_assert!(session.rounds().len() <= ROUNDS);
        let score = session.score();
        prop_assert!(score.resistance == 3 || score.imperial == 3);
        prop_assert!(score.resistance + score.imperial == session.rounds().len());
        prop_assert_eq!(closed.closed.lock().len(), 1);
    }
}
