//! Property-based tests over random legal games in both rulesets.

use proptest::prelude::*;
use proptest::sample::Index;

use mangala::game::MoveResolution;
use mangala::rules::TOTAL_STONES;
use mangala::{MatchConfig, MatchState, Player, Ruleset};

fn ruleset() -> impl Strategy<Value = Ruleset> {
    prop::sample::select(Ruleset::ALL.to_vec())
}

fn stones_in_play(state: &MatchState) -> u32 {
    state.board().total() + state.treasury(Player::One) + state.treasury(Player::Two)
}

/// Plays random legal moves, calling `check` with each before/after pair.
fn play_random(
    config: MatchConfig,
    picks: &[Index],
    mut check: impl FnMut(&MatchState, usize, &MatchState, &MoveResolution),
) -> MatchState {
    let mut state = MatchState::new(config);
    for pick in picks {
        let legal = state.legal_moves();
        if legal.is_empty() {
            break;
        }
        let pit = *pick.get(&legal);
        let (next, resolution) = state.play(pit).expect("legal move must be accepted");
        check(&state, pit, &next, &resolution);
        state = next;
    }
    state
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// Stones are never created or destroyed.
    #[test]
    fn prop_stones_are_conserved(
        ruleset in ruleset(),
        self_sow in any::<bool>(),
        picks in prop::collection::vec(any::<Index>(), 0..200),
    ) {
        let config = MatchConfig { ruleset, self_sow };
        play_random(config, &picks, |_, _, next, _| {
            assert_eq!(stones_in_play(next), TOTAL_STONES);
            if ruleset == Ruleset::Kalah {
                assert_eq!(next.board().total(), TOTAL_STONES);
            }
        });
    }

    /// Legality rejects foreign rows, empty pits and finished matches.
    #[test]
    fn prop_legality_matches_row_and_contents(
        ruleset in ruleset(),
        picks in prop::collection::vec(any::<Index>(), 0..120),
    ) {
        let state = play_random(MatchConfig::new(ruleset), &picks, |_, _, _, _| {});
        let player = state.current_player();
        for pit in 0..ruleset.ring_size() + 2 {
            let expected = !state.is_game_over()
                && ruleset.is_own_row(pit, player)
                && state.board().get(pit) > 0;
            prop_assert_eq!(state.is_legal_move(pit), expected);
        }
    }

    /// Kalah sowing never feeds the opponent's store.
    #[test]
    fn prop_kalah_skips_opponent_store(
        picks in prop::collection::vec(any::<Index>(), 0..200),
    ) {
        play_random(MatchConfig::new(Ruleset::Kalah), &picks, |before, _, next, resolution| {
            let opponent = resolution.mover.opponent();
            let opponent_store = Ruleset::Kalah.store_of(opponent).expect("Kalah has stores");
            assert!(!resolution.path.contains(&(opponent_store as u8)));
            // Only the end-of-match sweep may add to the opponent's store.
            if resolution.outcome.is_none() {
                assert_eq!(next.score(opponent), before.score(opponent));
            }
        });
    }

    /// In Turkish the first stone always goes back to the origin pit.
    #[test]
    fn prop_turkish_first_stone_self_sows(
        picks in prop::collection::vec(any::<Index>(), 0..200),
    ) {
        play_random(MatchConfig::new(Ruleset::Turkish), &picks, |_, pit, _, resolution| {
            assert_eq!(resolution.path.first().copied(), Some(pit as u8));
            assert!(!resolution.extra_turn);
        });
    }

    /// Turn passes unless the last stone reached the mover's own store.
    #[test]
    fn prop_turn_advance(
        ruleset in ruleset(),
        picks in prop::collection::vec(any::<Index>(), 0..200),
    ) {
        play_random(MatchConfig::new(ruleset), &picks, |before, _, next, resolution| {
            let mover = before.current_player();
            let own_store = ruleset.is_own_store(resolution.last_pit, mover);
            assert_eq!(resolution.extra_turn, own_store);
            if resolution.outcome.is_none() {
                let expected = if own_store { mover } else { mover.opponent() };
                assert_eq!(next.current_player(), expected);
            }
        });
    }

    /// Captures only take what the ruleset allows.
    #[test]
    fn prop_captures_follow_ruleset(
        ruleset in ruleset(),
        picks in prop::collection::vec(any::<Index>(), 0..200),
    ) {
        play_random(MatchConfig::new(ruleset), &picks, |_, _, _, resolution| {
            let Some(capture) = &resolution.capture else { return };
            let landing = capture.pits[0];
            assert_eq!(landing, resolution.last_pit);
            match ruleset {
                Ruleset::Kalah => {
                    assert!(ruleset.is_own_row(landing, resolution.mover));
                    assert_eq!(capture.pits.get(1).copied(), ruleset.opposite(landing));
                    assert!(capture.stones >= 2);
                }
                Ruleset::Turkish => {
                    assert!(ruleset.is_own_row(landing, resolution.mover.opponent()));
                    assert_eq!(capture.stones % 2, 0);
                    assert!(capture.stones > 0);
                }
            }
        });
    }

    /// A finished match has an empty board outside the stores and
    /// all stones in the two score buckets.
    #[test]
    fn prop_terminal_sweep(
        ruleset in ruleset(),
        picks in prop::collection::vec(any::<Index>(), 300..400),
    ) {
        let state = play_random(MatchConfig::new(ruleset), &picks, |_, _, _, _| {});
        if state.is_game_over() {
            for player in Player::ALL {
                prop_assert!(state.board().row_is_empty(ruleset, player));
            }
            let one = state.score(Player::One);
            let two = state.score(Player::Two);
            prop_assert_eq!(one + two, TOTAL_STONES);
            prop_assert!(state.legal_moves().is_empty());
            let winner = state.outcome().map(|o| o.code());
            let expected = if one > two { 1 } else if two > one { 2 } else { 0 };
            prop_assert_eq!(winner, Some(expected));
        }
    }
}
