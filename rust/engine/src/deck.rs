use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// A shuffled 52-card deck dealt from the top.
///
/// The card order is fixed once shuffled, so it lives behind an `Arc` and
/// cloning a deck (as every history snapshot does) only copies the position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Arc<[Card]>,
    position: usize,
}

impl Deck {
    /// Unshuffled deck in suit-major order.
    pub fn ordered() -> Self {
        Self {
            cards: full_deck().into(),
            position: 0,
        }
    }

    /// Fresh permutation drawn from `rng`.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cards = full_deck();
        cards.shuffle(rng);
        Self {
            cards: cards.into(),
            position: 0,
        }
    }

    /// Deals `top` first, in order, then the rest of the ordered deck. A card
    /// repeated in `top` is only dealt at its first position.
    pub fn stacked(top: &[Card]) -> Self {
        let mut cards: Vec<Card> = Vec::with_capacity(52);
        for &c in top {
            if !cards.contains(&c) {
                cards.push(c);
            }
        }
        let rest: Vec<Card> = full_deck().into_iter().filter(|c| !cards.contains(c)).collect();
        cards.extend(rest);
        Self {
            cards: cards.into(),
            position: 0,
        }
    }

    pub fn deal_card(&mut self) -> Result<Card, GameError> {
        let c = *self
            .cards
            .get(self.position)
            .ok_or(GameError::DeckExhausted)?;
        self.position += 1;
        Ok(c)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}

/// Owns the deck for one hand and keeps the pot total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dealer {
    deck: Deck,
    pub pot: u32,
}

impl Dealer {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::with_deck(Deck::shuffled(rng))
    }

    /// Dealer over a prepared deck; used to script deals.
    pub fn with_deck(deck: Deck) -> Self {
        Self { deck, pot: 0 }
    }

    pub fn deal_card(&mut self) -> Result<Card, GameError> {
        self.deck.deal_card()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }
}
