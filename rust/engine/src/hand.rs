use crate::cards::Card;

/// Showdown strength of a hand: the rank of its first card, ace low.
/// `None` (a folded or eliminated seat) ranks below every real hand.
pub fn evaluate_hand(hand: Option<&[Card]>) -> Option<u8> {
    hand.and_then(|cards| cards.first()).map(|c| c.rank.strength())
}

/// Marks every seat holding the best hand. Ties all win; if no seat holds a
/// hand every seat is marked.
pub fn compare_hands(hands: &[Option<&[Card]>]) -> Vec<bool> {
    let ranks: Vec<Option<u8>> = hands.iter().map(|h| evaluate_hand(*h)).collect();
    let best = ranks.iter().copied().max().flatten();
    ranks.into_iter().map(|r| r == best).collect()
}
