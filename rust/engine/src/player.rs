use crate::cards::Card;
use crate::errors::GameError;
use serde::{Deserialize, Serialize};

/// Where a seat stands in the current hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PlayerStatus {
    /// Still able to act
    Alive,
    /// Gave up the hand; not eligible at showdown
    Folded,
    /// Committed the whole stack; cannot act but still contests the pot
    AllIn,
}

impl PlayerStatus {
    /// Folded seats are the only ones excluded from the showdown.
    pub fn in_hand(self) -> bool {
        match self {
            PlayerStatus::Alive | PlayerStatus::AllIn => true,
            PlayerStatus::Folded => false,
        }
    }
}

/// A seat at the table: its hand, chips committed this hand and the rest of
/// its stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    player_id: usize,
    /// Cards dealt to this seat. Every other seat sees them; this seat never does.
    pub hand: Vec<Card>,
    pub status: PlayerStatus,
    /// Chips committed to the pot this hand
    pub in_chips: u32,
    /// Stack not yet committed
    pub remained_chips: u32,
}

impl Player {
    pub fn new(player_id: usize, init_chips: u32) -> Self {
        Self {
            player_id,
            hand: Vec::new(),
            status: PlayerStatus::Alive,
            in_chips: 0,
            remained_chips: init_chips,
        }
    }

    pub fn player_id(&self) -> usize {
        self.player_id
    }

    /// Clears the hand for the next deal, keeping the stack.
    pub fn reset(&mut self) -> Result<(), GameError> {
        if self.in_chips != 0 {
            return Err(GameError::ResetWithChipsInPlay {
                seat: self.player_id,
                in_chips: self.in_chips,
            });
        }
        self.hand.clear();
        self.status = PlayerStatus::Alive;
        Ok(())
    }

    /// Moves up to `chips` from the stack into the pot and returns the amount
    /// actually committed. Asking for more than the stack commits the whole
    /// stack; marking the seat all-in is left to the caller.
    pub fn bet(&mut self, chips: u32) -> u32 {
        let quantity = chips.min(self.remained_chips);
        self.in_chips += quantity;
        self.remained_chips -= quantity;
        quantity
    }

    /// Settles the hand: committed chips come back, the payoff is applied and
    /// nothing stays in play. Returns whether the seat still has chips.
    pub fn update(&mut self, payoff: i64) -> bool {
        let total = i64::from(self.remained_chips) + i64::from(self.in_chips) + payoff;
        debug_assert!(total >= 0, "seat {} settled below zero", self.player_id);
        self.remained_chips = u32::try_from(total.max(0)).unwrap_or(u32::MAX);
        self.in_chips = 0;
        self.remained_chips > 0
    }
}
