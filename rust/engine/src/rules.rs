use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::{Player, PlayerStatus};

/// The fixed action set. Discriminants are the stable integer encodings
/// numeric policies map their outputs onto.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Call = 0,
    RaiseHalfPot = 1,
    RaisePot = 2,
    AllIn = 3,
    Check = 4,
    Fold = 5,
}

impl Action {
    pub const COUNT: usize = 6;

    pub const ALL: [Action; Action::COUNT] = [
        Action::Call,
        Action::RaiseHalfPot,
        Action::RaisePot,
        Action::AllIn,
        Action::Check,
        Action::Fold,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Option<Action> {
        Self::ALL.get(i).copied()
    }

    pub fn is_raise(self) -> bool {
        matches!(self, Action::RaiseHalfPot | Action::RaisePot)
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::Call => "call",
            Action::RaiseHalfPot => "raise_half_pot",
            Action::RaisePot => "raise_pot",
            Action::AllIn => "all_in",
            Action::Check => "check",
            Action::Fold => "fold",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An action resolved against the current table, carrying the chips the
/// acting seat is about to commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    /// Matching the outstanding bet; may be short when the stack cannot cover it.
    Call(u32),
    /// Amount needed to match plus the raise increment.
    Raise(u32),
    AllIn(u32),
}

/// Chips added on top of a call by a pot-sized raise. Never below `min_raise`.
pub fn raise_increment(action: Action, pot: u32, min_raise: u32) -> Option<u32> {
    match action {
        Action::RaiseHalfPot => Some((pot / 2).max(min_raise)),
        Action::RaisePot => Some(pot.max(min_raise)),
        _ => None,
    }
}

/// Total chips committed by every seat this hand.
pub fn pot_of(players: &[Player]) -> u32 {
    players.iter().map(|p| p.in_chips).sum()
}

/// Chips `seat` must add to match the largest amount raised this round.
pub fn to_call(raised: &[u32], seat: usize) -> u32 {
    let max = raised.iter().copied().max().unwrap_or(0);
    max.saturating_sub(raised.get(seat).copied().unwrap_or(0))
}

/// Legal actions for `seat`, in encoding order. Empty unless the seat is alive.
///
/// # Examples
///
/// ```
/// use indian_poker_engine::player::Player;
/// use indian_poker_engine::rules::{legal_actions, Action};
///
/// let mut players = vec![Player::new(0, 100), Player::new(1, 100)];
/// players[0].bet(2);
/// players[1].bet(1);
/// let legal = legal_actions(&players, &[2, 1], 1, 2);
/// assert!(legal.contains(&Action::Call));
/// assert!(!legal.contains(&Action::Check));
/// ```
pub fn legal_actions(players: &[Player], raised: &[u32], seat: usize, min_raise: u32) -> Vec<Action> {
    let Some(player) = players.get(seat) else {
        return Vec::new();
    };
    match player.status {
        PlayerStatus::Alive => {}
        PlayerStatus::Folded | PlayerStatus::AllIn => return Vec::new(),
    }

    let diff = to_call(raised, seat);
    let stack = player.remained_chips;
    let pot = pot_of(players);
    let others_can_respond = players
        .iter()
        .enumerate()
        .any(|(i, p)| i != seat && p.status == PlayerStatus::Alive);

    Action::ALL
        .into_iter()
        .filter(|&action| match action {
            Action::Fold | Action::Call => diff > 0,
            Action::Check => diff == 0,
            Action::AllIn => stack > 0,
            Action::RaiseHalfPot | Action::RaisePot => {
                others_can_respond
                    && raise_increment(action, pot, min_raise)
                        .is_some_and(|inc| u64::from(stack) > u64::from(diff) + u64::from(inc))
            }
        })
        .collect()
}

/// Resolves `action` for `seat` into the chips it commits, or explains why it
/// is not allowed.
///
/// # Errors
///
/// [`GameError::IllegalAction`] when `action` is not in [`legal_actions`];
/// the error carries the legal set but no state view.
pub fn validate_action(
    players: &[Player],
    raised: &[u32],
    seat: usize,
    min_raise: u32,
    action: Action,
) -> Result<ValidatedAction, GameError> {
    let legal = legal_actions(players, raised, seat, min_raise);
    if !legal.contains(&action) {
        return Err(GameError::IllegalAction {
            action,
            legal,
            state: None,
        });
    }
    let diff = to_call(raised, seat);
    let stack = players[seat].remained_chips;
    Ok(match action {
        Action::Fold => ValidatedAction::Fold,
        Action::Check => ValidatedAction::Check,
        Action::Call => ValidatedAction::Call(diff.min(stack)),
        Action::AllIn => ValidatedAction::AllIn(stack),
        Action::RaiseHalfPot | Action::RaisePot => {
            let inc = raise_increment(action, pot_of(players), min_raise).unwrap_or(min_raise);
            ValidatedAction::Raise(diff + inc)
        }
    })
}
