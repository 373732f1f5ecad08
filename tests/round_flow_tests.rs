//! End-to-end round flow tests: phase cycling, chance scheduling,
//! simultaneous resolution, and roller rotation.

use qwinto_engine::{
    ActionId, DiceSelection, Die, Phase, PlayerId, QwintoGame, Turn,
};

fn select_roll_accept(state: &mut qwinto_engine::QwintoState, dice: &[Die], outcome: u8) {
    state.apply_action(ActionId::new(DiceSelection::of(dice).bits()));
    state.apply_action(ActionId::new(outcome));
    state.apply_action(ActionId::ACCEPT);
}

/// The worked example: 2 players, one die selected, chance draws 4.
/// Orange cell 0 is legal for both; the roller places, the other skips.
#[test]
fn test_two_player_single_die_round() {
    let game = QwintoGame::builder().player_count(2).build();
    let mut state = game.new_initial_state();

    state.apply_action(ActionId::new(Die::Orange.bit()));
    assert_eq!(state.whose_turn(), Turn::Chance);

    state.apply_action(ActionId::new(4));
    assert_eq!(state.whose_turn(), Turn::Player(PlayerId::new(0)));

    state.apply_action(ActionId::ACCEPT);
    assert_eq!(state.whose_turn(), Turn::Simultaneous);

    // Cell 0 legal for both players.
    for player in PlayerId::all(2) {
        assert!(state.legal_actions(player).contains(&ActionId::new(0)));
    }

    state.apply_joint(&[ActionId::new(0), ActionId::SKIP]);

    assert_eq!(state.sheet(PlayerId::new(0)).cell(0), 4);
    assert!(state.sheet(PlayerId::new(1)).is_cell_empty(0));
    assert!(!state.is_terminal());
    assert_eq!(state.returns(), vec![0.0, 0.0]);
}

/// In a 1-player game the single player is always the roller.
#[test]
fn test_single_player_always_rolls() {
    let game = QwintoGame::builder().player_count(1).build();
    let mut state = game.new_initial_state();

    for _ in 0..5 {
        assert_eq!(state.roller(), PlayerId::new(0));
        assert_eq!(state.whose_turn(), Turn::Player(PlayerId::new(0)));
        select_roll_accept(&mut state, &[Die::Yellow], 3);
        let action = state.legal_actions(PlayerId::new(0))[0];
        state.apply_joint(&[action]);
    }
}

/// Roller index advances by exactly one (mod N) after every Submit
/// resolution.
#[test]
fn test_round_robin_rotation() {
    let game = QwintoGame::builder().player_count(4).build();
    let mut state = game.new_initial_state();

    for round in 0..8 {
        let expected = PlayerId::new((round % 4) as u8);
        assert_eq!(state.roller(), expected);

        select_roll_accept(&mut state, &[Die::Purple], 6);
        let mut actions = vec![ActionId::SKIP; 4];
        actions[expected.index()] = ActionId::MISS;
        state.apply_joint(&actions);
    }
}

/// Re-rolling draws a fresh chance outcome and burns budget; accepting
/// moves to the simultaneous node.
#[test]
fn test_reroll_cycle() {
    let game = QwintoGame::builder().player_count(2).build();
    let mut state = game.new_initial_state();

    state.apply_action(ActionId::new(7)); // all three dice
    state.apply_action(ActionId::new(10));
    assert_eq!(state.outcome(), 10);
    assert_eq!(state.rolls_used(), 1);

    state.apply_action(ActionId::REROLL);
    assert_eq!(state.whose_turn(), Turn::Chance);
    assert_eq!(state.chance_outcomes().len(), 16);

    state.apply_action(ActionId::new(15));
    assert_eq!(state.outcome(), 15);
    assert_eq!(state.rolls_used(), 2);

    state.apply_action(ActionId::ACCEPT);
    assert_eq!(state.phase(), Phase::SubmitPoints);
}

/// Round state (selection, outcome, rolls) resets when the phase returns
/// to SelectDice.
#[test]
fn test_round_state_resets_between_rounds() {
    let game = QwintoGame::builder().player_count(2).build();
    let mut state = game.new_initial_state();

    select_roll_accept(&mut state, &[Die::Orange, Die::Purple], 11);
    state.apply_joint(&[ActionId::MISS, ActionId::SKIP]);

    assert_eq!(state.phase(), Phase::SelectDice);
    assert_eq!(state.selection(), DiceSelection::NONE);
    assert_eq!(state.outcome(), 0);
    assert_eq!(state.rolls_used(), 0);
    assert_eq!(state.round(), 2);
}

/// The roller keeps the miss fallback even when placements exist, and
/// non-rollers may always abstain.
#[test]
fn test_fallback_actions_always_offered() {
    let game = QwintoGame::builder().player_count(3).build();
    let mut state = game.new_initial_state();

    select_roll_accept(&mut state, &[Die::Orange, Die::Yellow, Die::Purple], 9);

    let roller_moves = state.legal_actions(PlayerId::new(0));
    assert!(roller_moves.len() > 1);
    assert_eq!(*roller_moves.last().unwrap(), ActionId::MISS);

    for other in [PlayerId::new(1), PlayerId::new(2)] {
        let moves = state.legal_actions(other);
        assert_eq!(*moves.last().unwrap(), ActionId::SKIP);
    }
}

/// A legal game that spends the whole re-roll budget every round stays
/// within the game-length bound reported to host engines.
#[test]
fn test_max_game_length_covers_reroll_heavy_games() {
    let game = QwintoGame::builder().player_count(1).build();
    let mut state = game.new_initial_state();
    let mut decisions = 0usize;

    // Select, draw, re-roll twice, accept: 4 roller decisions.
    fn exhaust_rolls(state: &mut qwinto_engine::QwintoState, outcome: u8) -> usize {
        let all = DiceSelection::of(&[Die::Orange, Die::Yellow, Die::Purple]);
        state.apply_action(ActionId::new(all.bits()));
        state.apply_action(ActionId::new(outcome));
        state.apply_action(ActionId::REROLL);
        state.apply_action(ActionId::new(outcome));
        state.apply_action(ActionId::REROLL);
        state.apply_action(ActionId::new(outcome));
        state.apply_action(ActionId::ACCEPT);
        4
    }

    for (col, value) in (4..=12).enumerate() {
        decisions += exhaust_rolls(&mut state, value);
        state.apply_joint(&[ActionId::new(col as u8)]);
        decisions += 1;
    }
    for (col, value) in (6..=14).enumerate() {
        decisions += exhaust_rolls(&mut state, value);
        state.apply_joint(&[ActionId::new(9 + col as u8)]);
        decisions += 1;
    }
    while !state.is_terminal() {
        decisions += exhaust_rolls(&mut state, 10);
        state.apply_joint(&[ActionId::MISS]);
        decisions += 1;
    }

    assert_eq!(decisions, 110);
    assert!(decisions <= game.max_game_length());
}

/// A cloned state explores independently of the original.
#[test]
fn test_clone_branches_independently() {
    let game = QwintoGame::builder().player_count(2).build();
    let mut state = game.new_initial_state();
    select_roll_accept(&mut state, &[Die::Orange], 5);

    let mut branch_place = state.clone();
    let mut branch_miss = state.clone();

    branch_place.apply_joint(&[ActionId::new(2), ActionId::SKIP]);
    branch_miss.apply_joint(&[ActionId::MISS, ActionId::SKIP]);

    assert_eq!(branch_place.sheet(PlayerId::new(0)).cell(2), 5);
    assert_eq!(branch_place.sheet(PlayerId::new(0)).miss_total(), 0);
    assert!(branch_miss.sheet(PlayerId::new(0)).is_cell_empty(2));
    assert_eq!(branch_miss.sheet(PlayerId::new(0)).miss_total(), -5);

    // The fork point is untouched.
    assert_eq!(state.phase(), Phase::SubmitPoints);
    assert!(state.sheet(PlayerId::new(0)).is_cell_empty(2));
}
