use tracing::debug;

use crate::errors::GameError;
use crate::player::{Player, PlayerStatus};
use crate::rules::{legal_actions, validate_action, Action, ValidatedAction};

/// A single betting round: whose turn it is, what every seat has put in this
/// round, and enough bookkeeping to tell when betting is closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    num_players: usize,
    /// Minimum raise increment (the big blind)
    raise_amount: u32,
    game_pointer: usize,
    raised: Vec<u32>,
    /// Seats that called or checked since the last raise
    not_raise_num: usize,
    /// Seats that folded or went all-in
    not_playing_num: usize,
    actions_taken: usize,
}

impl Round {
    pub fn new(num_players: usize, raise_amount: u32) -> Self {
        Self {
            num_players,
            raise_amount,
            game_pointer: 0,
            raised: vec![0; num_players],
            not_raise_num: 0,
            not_playing_num: 0,
            actions_taken: 0,
        }
    }

    /// Starts betting at `game_pointer`. `raised` seeds forced bets (the
    /// blinds); without it every seat starts at zero. Seats in `players` that
    /// are already folded or all-in never act in this round.
    pub fn start_new_round(
        &mut self,
        game_pointer: usize,
        players: &[Player],
        raised: Option<Vec<u32>>,
    ) {
        self.game_pointer = game_pointer;
        self.not_raise_num = 0;
        self.not_playing_num = players
            .iter()
            .filter(|p| p.status != PlayerStatus::Alive)
            .count();
        self.actions_taken = 0;
        self.raised = match raised {
            Some(r) => {
                debug_assert_eq!(r.len(), self.num_players);
                r
            }
            None => vec![0; self.num_players],
        };
    }

    pub fn game_pointer(&self) -> usize {
        self.game_pointer
    }

    pub fn raised(&self) -> &[u32] {
        &self.raised
    }

    pub fn raise_amount(&self) -> u32 {
        self.raise_amount
    }

    pub fn max_raised(&self) -> u32 {
        self.raised.iter().copied().max().unwrap_or(0)
    }

    pub fn get_legal_actions(&self, players: &[Player]) -> Vec<Action> {
        legal_actions(players, &self.raised, self.game_pointer, self.raise_amount)
    }

    /// Applies `action` for the seat to act and moves the turn to the next
    /// seat still able to act. Returns the new pointer.
    ///
    /// # Errors
    ///
    /// [`GameError::IllegalAction`] if `action` is not currently legal; nothing
    /// is changed in that case.
    pub fn proceed_round(&mut self, players: &mut [Player], action: Action) -> Result<usize, GameError> {
        let seat = self.game_pointer;
        let previous_max = self.max_raised();
        let validated = validate_action(players, &self.raised, seat, self.raise_amount, action)?;

        let player = &mut players[seat];
        match validated {
            ValidatedAction::Fold => {
                player.status = PlayerStatus::Folded;
            }
            ValidatedAction::Check => {
                self.not_raise_num += 1;
            }
            ValidatedAction::Call(chips) => {
                self.raised[seat] += player.bet(chips);
                self.not_raise_num += 1;
            }
            ValidatedAction::Raise(chips) => {
                self.raised[seat] += player.bet(chips);
                self.not_raise_num = 1;
            }
            ValidatedAction::AllIn(chips) => {
                self.raised[seat] += player.bet(chips);
                if self.raised[seat] > previous_max {
                    // every other seat must answer the shove
                    self.not_raise_num = 0;
                } else {
                    self.not_raise_num += 1;
                }
            }
        }

        if player.remained_chips == 0 && player.status == PlayerStatus::Alive {
            player.status = PlayerStatus::AllIn;
        }
        match player.status {
            PlayerStatus::Folded => self.not_playing_num += 1,
            PlayerStatus::AllIn => {
                self.not_playing_num += 1;
                // counted as not playing from here on
                self.not_raise_num = self.not_raise_num.saturating_sub(1);
            }
            PlayerStatus::Alive => {}
        }
        self.actions_taken += 1;

        debug!(
            seat,
            %action,
            raised = ?self.raised,
            status = ?players[seat].status,
            "round action applied"
        );

        self.game_pointer = self.next_alive_seat(players, seat);
        Ok(self.game_pointer)
    }

    /// Betting is closed once somebody has acted and either every seat has
    /// answered the last raise (or left play), or at most one seat can still
    /// act and it has nothing left to match.
    pub fn is_over(&self, players: &[Player]) -> bool {
        if self.actions_taken == 0 {
            return false;
        }
        if self.not_raise_num + self.not_playing_num >= self.num_players {
            return true;
        }
        let max = self.max_raised();
        let mut alive = players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.status == PlayerStatus::Alive);
        match (alive.next(), alive.next()) {
            (None, _) => true,
            (Some((seat, _)), None) => self.raised[seat] >= max,
            _ => false,
        }
    }

    fn next_alive_seat(&self, players: &[Player], from: usize) -> usize {
        (1..=self.num_players)
            .map(|step| (from + step) % self.num_players)
            .find(|&i| players[i].status == PlayerStatus::Alive)
            .unwrap_or((from + 1) % self.num_players)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blinds(stacks: &[u32], sb: usize, bb: usize) -> (Vec<Player>, Round) {
        let mut players: Vec<Player> = stacks
            .iter()
            .enumerate()
            .map(|(i, &s)| Player::new(i, s))
            .collect();
        players[bb].bet(2);
        players[sb].bet(1);
        let mut round = Round::new(players.len(), 2);
        let first = (bb + 1) % players.len();
        let raised = players.iter().map(|p| p.in_chips).collect();
        round.start_new_round(first, &players, Some(raised));
        (players, round)
    }

    #[test]
    fn call_then_check_closes_heads_up_round() {
        let (mut players, mut round) = blinds(&[100, 100], 1, 0);
        assert_eq!(round.game_pointer(), 1);
        let next = round.proceed_round(&mut players, Action::Call).unwrap();
        assert_eq!(next, 0);
        assert!(!round.is_over(&players), "big blind still has the option");
        round.proceed_round(&mut players, Action::Check).unwrap();
        assert!(round.is_over(&players));
        assert_eq!(round.raised(), &[2, 2]);
    }

    #[test]
    fn raise_reopens_action() {
        let (mut players, mut round) = blinds(&[100, 100], 1, 0);
        round.proceed_round(&mut players, Action::Call).unwrap();
        // pot 4, half pot 2 -> big blind raises to 4
        round.proceed_round(&mut players, Action::RaiseHalfPot).unwrap();
        assert_eq!(round.raised(), &[4, 2]);
        assert!(!round.is_over(&players));
        assert_eq!(round.game_pointer(), 1);
        round.proceed_round(&mut players, Action::Call).unwrap();
        assert!(round.is_over(&players));
        assert_eq!(players[1].in_chips, 4);
    }

    #[test]
    fn short_call_commits_what_is_left_and_goes_all_in() {
        let mut players = vec![Player::new(0, 10), Player::new(1, 1)];
        players[0].bet(2);
        let mut round = Round::new(2, 2);
        round.start_new_round(1, &players, Some(vec![2, 0]));

        assert!(round.get_legal_actions(&players).contains(&Action::Call));
        round.proceed_round(&mut players, Action::Call).unwrap();
        assert_eq!(players[1].in_chips, 1);
        assert_eq!(players[1].remained_chips, 0);
        assert_eq!(players[1].status, PlayerStatus::AllIn);
        assert_eq!(round.raised(), &[2, 1]);
        // the big blind is the only actor left and has already matched
        assert!(round.is_over(&players));
    }

    #[test]
    fn shove_must_be_answered() {
        let (mut players, mut round) = blinds(&[100, 50], 1, 0);
        round.proceed_round(&mut players, Action::AllIn).unwrap();
        assert_eq!(players[1].status, PlayerStatus::AllIn);
        assert!(!round.is_over(&players));
        assert_eq!(round.game_pointer(), 0);
        let legal = round.get_legal_actions(&players);
        assert!(legal.contains(&Action::Call));
        assert!(legal.contains(&Action::Fold));
        assert!(!legal.iter().any(|a| a.is_raise()));
        round.proceed_round(&mut players, Action::Call).unwrap();
        assert!(round.is_over(&players));
        assert_eq!(players[0].in_chips, 50);
    }

    #[test]
    fn fold_skips_pointer_past_folded_seat() {
        let (mut players, mut round) = blinds(&[100, 100, 100], 1, 2);
        assert_eq!(round.game_pointer(), 0);
        round.proceed_round(&mut players, Action::Fold).unwrap();
        assert_eq!(round.game_pointer(), 1);
        round.proceed_round(&mut players, Action::Call).unwrap();
        assert_eq!(round.game_pointer(), 2);
        assert!(!round.is_over(&players));
        round.proceed_round(&mut players, Action::Check).unwrap();
        assert!(round.is_over(&players));
    }

    #[test]
    fn illegal_action_leaves_round_untouched() {
        let (mut players, mut round) = blinds(&[100, 100], 1, 0);
        let before = (round.clone(), players.clone());
        assert!(round.proceed_round(&mut players, Action::Check).is_err());
        assert_eq!((round, players), before);
    }

    #[test]
    fn seat_out_before_the_deal_does_not_hold_the_round_open() {
        let mut players = vec![Player::new(0, 100), Player::new(1, 100), Player::new(2, 0)];
        players[2].status = PlayerStatus::Folded;
        players[1].bet(2);
        players[0].bet(1);
        let mut round = Round::new(3, 2);
        round.start_new_round(0, &players, Some(vec![1, 2, 0]));

        round.proceed_round(&mut players, Action::Call).unwrap();
        assert_eq!(round.game_pointer(), 1);
        assert!(!round.is_over(&players));
        round.proceed_round(&mut players, Action::Check).unwrap();
        assert!(round.is_over(&players));
    }

    #[test]
    fn blind_all_in_counts_as_out_of_play() {
        // the big blind is all-in from posting
        let mut players = vec![Player::new(0, 100), Player::new(1, 100), Player::new(2, 2)];
        players[2].bet(2);
        players[2].status = PlayerStatus::AllIn;
        players[1].bet(1);
        let mut round = Round::new(3, 2);
        round.start_new_round(0, &players, Some(vec![0, 1, 2]));

        round.proceed_round(&mut players, Action::Call).unwrap();
        round.proceed_round(&mut players, Action::Call).unwrap();
        assert!(round.is_over(&players));
        assert_eq!(round.raised(), &[2, 2, 2]);
    }

    #[test]
    fn not_over_before_anyone_acts() {
        let (players, round) = blinds(&[100, 100], 1, 0);
        assert!(!round.is_over(&players));
    }
}
