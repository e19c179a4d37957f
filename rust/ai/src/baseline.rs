//! Baseline rule agent.
//!
//! A seat never sees its own card, so the only signal is the best card it can
//! see across the table. Facing a strong rival card it backs off; facing only
//! weak ones it raises; anything in between it calls.

use crate::Agent;
use indian_poker_engine::rules::Action;
use indian_poker_engine::state::State;

/// Rank strength above which a visible rival card counts as strong (ten and up).
pub const STRONG_RIVAL: u8 = 8;
/// Rank strength below which every visible rival card counts as weak (six and down).
pub const WEAK_RIVAL: u8 = 6;

const CAUTIOUS: &[Action] = &[Action::Check, Action::Fold];
const AGGRESSIVE: &[Action] = &[Action::RaiseHalfPot, Action::Call, Action::Check];
const PASSIVE: &[Action] = &[Action::Call, Action::RaiseHalfPot, Action::Check];

#[derive(Debug, Clone, Copy, Default)]
pub struct RuleAgent;

impl RuleAgent {
    pub fn new() -> Self {
        Self
    }

    /// Preferred actions for `state`, best first.
    fn preferences(state: &State) -> &'static [Action] {
        match state.max_rival_strength() {
            Some(s) if s > STRONG_RIVAL => CAUTIOUS,
            Some(s) if s < WEAK_RIVAL => AGGRESSIVE,
            Some(_) => PASSIVE,
            // nothing visible: play it straight
            None => PASSIVE,
        }
    }
}

impl Agent for RuleAgent {
    fn step(&mut self, state: &State) -> Action {
        let legal = &state.legal_actions;
        Self::preferences(state)
            .iter()
            .copied()
            .find(|a| legal.contains(a))
            .or_else(|| legal.first().copied())
            .unwrap_or(Action::Fold)
    }

    fn name(&self) -> &str {
        "RuleAgent"
    }
}
