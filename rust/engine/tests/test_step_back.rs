use indian_poker_engine::config::GameConfig;
use indian_poker_engine::game::Game;
use indian_poker_engine::rules::Action;

fn game(num_players: usize, allow_step_back: bool) -> Game {
    Game::new(GameConfig {
        num_players,
        dealer_id: Some(0),
        seed: Some(17),
        allow_step_back,
        ..GameConfig::default()
    })
    .unwrap()
}

#[test]
fn nothing_to_undo_after_deal() {
    let mut g = game(2, true);
    g.init_game().unwrap();
    assert!(!g.step_back());
}

#[test]
fn each_step_is_undone_exactly() {
    let mut g = game(3, true);
    g.init_game().unwrap();
    let mut seen = vec![g.snapshot().cloned()];
    let mut states = vec![g.get_state(g.get_player_id().unwrap()).unwrap()];

    for action in [Action::RaiseHalfPot, Action::Call, Action::Call] {
        assert!(!g.is_over());
        let (state, _) = g.step(action).unwrap();
        seen.push(g.snapshot().cloned());
        states.push(state);
    }
    assert!(g.is_over());
    assert_eq!(g.history_len(), 3);

    while g.step_back() {
        seen.pop();
        states.pop();
        assert_eq!(g.snapshot().cloned(), *seen.last().unwrap());
        let seat = g.get_player_id().unwrap();
        assert_eq!(g.get_state(seat).unwrap(), *states.last().unwrap());
    }
    assert_eq!(seen.len(), 1);
    assert!(!g.is_over());
}

#[test]
fn fold_can_be_taken_back() {
    let mut g = game(2, true);
    g.init_game().unwrap();
    g.step(Action::Fold).unwrap();
    assert!(g.is_over());
    assert!(g.step_back());
    assert!(!g.is_over());
    // a different line from the same spot
    g.step(Action::Call).unwrap();
    assert!(!g.is_over());
}

#[test]
fn disabled_step_back_keeps_no_history() {
    let mut g = game(2, false);
    g.init_game().unwrap();
    g.step(Action::Call).unwrap();
    assert_eq!(g.history_len(), 0);
    assert!(!g.step_back());
}

#[test]
fn settlement_clears_history() {
    let mut g = game(2, true);
    g.init_game().unwrap();
    g.step(Action::Fold).unwrap();
    let payoffs = g.get_payoffs().unwrap();
    g.update(&payoffs).unwrap();
    assert!(!g.step_back());
}
