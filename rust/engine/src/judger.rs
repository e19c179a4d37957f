use crate::cards::Card;
use crate::errors::GameError;
use crate::hand::compare_hands;
use crate::player::Player;

/// Decides who wins at the end of a hand and how the pot is shared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Judger;

impl Judger {
    pub fn new() -> Self {
        Self
    }

    /// Chip payoff per seat. `hands[i]` is `None` for seats that folded or sat
    /// out. The best hand takes the pot; ties split it. A seat can only win
    /// from each opponent as much as it put in itself, so whatever a short
    /// all-in cannot claim goes to the next best hand.
    ///
    /// Payoffs always sum to zero.
    ///
    /// # Errors
    ///
    /// - [`GameError::PayoffLength`] if `hands` and `players` differ in length
    /// - [`GameError::NoContenders`] if every hand is `None`
    /// - [`GameError::EmptyHand`] if a contending seat holds no cards
    pub fn judge_game(
        &self,
        players: &[Player],
        hands: &[Option<Vec<Card>>],
    ) -> Result<Vec<i64>, GameError> {
        if hands.len() != players.len() {
            return Err(GameError::PayoffLength {
                expected: players.len(),
                actual: hands.len(),
            });
        }
        if hands.iter().all(Option::is_none) {
            return Err(GameError::NoContenders);
        }
        if let Some(seat) = hands
            .iter()
            .position(|h| h.as_ref().is_some_and(|cards| cards.is_empty()))
        {
            return Err(GameError::EmptyHand { seat });
        }

        let n = players.len();
        let mut hands: Vec<Option<&[Card]>> = hands.iter().map(|h| h.as_deref()).collect();
        let mut in_chips: Vec<u32> = players.iter().map(|p| p.in_chips).collect();
        let mut remaining: u32 = in_chips.iter().sum();
        let mut payoffs = vec![0i64; n];

        while remaining > 0 {
            let winners = compare_hands(&hands);
            let each_win = split_pots_among_players(&in_chips, &winners);
            for i in 0..n {
                if winners[i] {
                    remaining -= each_win[i];
                    payoffs[i] += i64::from(each_win[i]) - i64::from(in_chips[i]);
                    hands[i] = None;
                    in_chips[i] = 0;
                } else if in_chips[i] > 0 {
                    payoffs[i] += i64::from(each_win[i]) - i64::from(in_chips[i]);
                    in_chips[i] = each_win[i];
                }
            }
        }

        debug_assert_eq!(payoffs.iter().sum::<i64>(), 0);
        Ok(payoffs)
    }
}

/// Splits the lowest pot layer: every contributor puts in the smallest
/// contribution, the winners inside the layer share it. If nobody in the
/// layer is a winner (or everybody is), contributions are handed back.
/// Returns chips allocated per seat and what each seat still has in play.
fn split_pot_among_players(in_chips: &[u32], winners: &[bool]) -> (Vec<u32>, Vec<u32>) {
    let n = in_chips.len();
    let in_pot = |i: usize| in_chips[i] > 0;
    let players_in_pot = (0..n).filter(|&i| in_pot(i)).count();
    let winners_in_pot: Vec<usize> = (0..n).filter(|&i| in_pot(i) && winners[i]).collect();

    if winners_in_pot.is_empty() || winners_in_pot.len() == players_in_pot {
        return (in_chips.to_vec(), vec![0; n]);
    }

    let layer = in_chips.iter().copied().filter(|&v| v > 0).min().unwrap_or(0);
    let layer_total = layer * players_in_pot as u32;
    let share = layer_total / winners_in_pot.len() as u32;
    let odd_chips = layer_total % winners_in_pot.len() as u32;

    let mut allocated = vec![0u32; n];
    let mut in_chips_after = in_chips.to_vec();
    for i in (0..n).filter(|&i| in_pot(i)) {
        if winners[i] {
            allocated[i] += share;
        }
        in_chips_after[i] -= layer;
    }
    // odd chips go to the first winner by seat order
    allocated[winners_in_pot[0]] += odd_chips;
    (allocated, in_chips_after)
}

fn split_pots_among_players(in_chips: &[u32], winners: &[bool]) -> Vec<u32> {
    let mut in_chips = in_chips.to_vec();
    let mut allocated = vec![0u32; in_chips.len()];
    while in_chips.iter().any(|&v| v > 0) {
        let (layer, rest) = split_pot_among_players(&in_chips, winners);
        for (total, won) in allocated.iter_mut().zip(layer) {
            *total += won;
        }
        in_chips = rest;
    }
    allocated
}
