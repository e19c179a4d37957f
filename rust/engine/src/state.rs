use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::rules::Action;

/// What one seat is allowed to see: every other seat's cards, `None` in its
/// own slot.
pub type RivalView = Vec<Option<Vec<Card>>>;

/// Observation handed to the agent acting (or observing) at `player_id`.
/// The seat's own hand is never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// Seat this view was built for
    pub player_id: usize,
    pub rival_cards: RivalView,
    /// Chips the viewer has committed this hand
    pub my_chips: u32,
    /// Chips committed by every seat
    pub all_chips: Vec<u32>,
    /// Legal actions of the seat to act; empty once the hand is over
    pub legal_actions: Vec<Action>,
    /// Uncommitted stacks of every seat
    pub stakes: Vec<u32>,
    pub current_player: usize,
    pub pot: u32,
}

impl State {
    /// Highest visible rival rank strength, if any rival card is visible.
    pub fn max_rival_strength(&self) -> Option<u8> {
        self.rival_cards
            .iter()
            .flatten()
            .flatten()
            .map(|c| c.rank.strength())
            .max()
    }
}

/// Full table information, including the cards each seat cannot see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerfectInformation {
    pub chips: Vec<u32>,
    pub rival_cards: Vec<RivalView>,
    pub hand_cards: Vec<Vec<Card>>,
    pub current_player: usize,
    pub legal_actions: Vec<Action>,
}
