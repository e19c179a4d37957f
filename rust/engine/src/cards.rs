use std::fmt;

use serde::{Deserialize, Serialize};

/// Represents one of the four suits in a standard 52-card deck.
/// Used as a component of [`Card`] to fully define a playing card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Spades suit (♠)
    Spades,
    /// Hearts suit (♥)
    Hearts,
    /// Diamonds suit (♦)
    Diamonds,
    /// Clubs suit (♣)
    Clubs,
}

impl Suit {
    /// Single-letter code used in card indices.
    pub fn letter(self) -> char {
        match self {
            Suit::Spades => 'S',
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
        }
    }

    pub fn from_letter(c: char) -> Option<Suit> {
        match c {
            'S' => Some(Suit::Spades),
            'H' => Some(Suit::Hearts),
            'D' => Some(Suit::Diamonds),
            'C' => Some(Suit::Clubs),
            _ => None,
        }
    }
}

/// Rank of a card. Indian poker ranks the ace low, so the discriminants run
/// from Ace (1) up to King (13) and the derived ordering is the showdown order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Ace (1), the lowest card
    Ace = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    /// King (13), the highest card
    King,
}

impl Rank {
    /// Rank letters in ascending showdown order.
    pub const LETTERS: &'static str = "A23456789TJQK";

    pub fn letter(self) -> char {
        Self::LETTERS.as_bytes()[self.strength() as usize] as char
    }

    pub fn from_letter(c: char) -> Option<Rank> {
        Self::LETTERS
            .find(c)
            .and_then(|i| all_ranks().get(i).copied())
    }

    /// Zero-based showdown strength (Ace = 0, King = 12).
    pub fn strength(self) -> u8 {
        self as u8 - 1
    }
}

/// Represents a single playing card with a suit and rank.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Canonical two-character index: suit letter followed by rank letter,
    /// e.g. `"SA"` for the ace of spades or `"HT"` for the ten of hearts.
    pub fn index(&self) -> String {
        let mut s = String::with_capacity(2);
        s.push(self.suit.letter());
        s.push(self.rank.letter());
        s
    }

    pub fn from_index(index: &str) -> Option<Card> {
        let mut chars = index.chars();
        let suit = Suit::from_letter(chars.next()?)?;
        let rank = Rank::from_letter(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Card { suit, rank })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.suit.letter(), self.rank.letter())
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ]
}

pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card { suit: s, rank: r });
        }
    }
    v
}
