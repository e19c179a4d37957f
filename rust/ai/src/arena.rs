//! Runs hands between agents and collects what each seat saw and did.

use indian_poker_engine::config::GameConfig;
use indian_poker_engine::game::Game;
use indian_poker_engine::logger::{ActionRecord, HandLogger, HandRecord};
use indian_poker_engine::rules::Action;
use indian_poker_engine::state::State;
use tracing::{info, warn};

use crate::{Agent, ArenaError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Carry stacks from hand to hand until one seat holds every chip;
    /// otherwise every hand starts a fresh session.
    pub continue_session: bool,
    /// Log a summary line per settled hand.
    pub log_results: bool,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            continue_session: true,
            log_results: false,
        }
    }
}

/// One seat's view of a hand: `states[i]` was followed by `actions[i]`, and
/// the last state is the seat's view once the hand was over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trajectory {
    pub states: Vec<State>,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArenaStats {
    pub hands_played: u64,
    /// Hands each seat finished ahead
    pub wins: Vec<u64>,
    /// Current stacks
    pub chips: Vec<u32>,
}

pub struct Arena {
    game: Game,
    agents: Vec<Box<dyn Agent>>,
    config: ArenaConfig,
    /// A session is running and has not been decided yet
    session_live: bool,
    logger: Option<HandLogger>,
    hands_played: u64,
    wins: Vec<u64>,
}

impl Arena {
    pub fn new(
        game_config: GameConfig,
        agents: Vec<Box<dyn Agent>>,
        config: ArenaConfig,
    ) -> Result<Self, ArenaError> {
        if agents.len() != game_config.num_players {
            return Err(ArenaError::AgentCount {
                expected: game_config.num_players,
                actual: agents.len(),
            });
        }
        let n = agents.len();
        Ok(Self {
            game: Game::new(game_config)?,
            agents,
            config,
            session_live: false,
            logger: None,
            hands_played: 0,
            wins: vec![0; n],
        })
    }

    /// Records every settled hand to `logger`.
    pub fn with_logger(mut self, logger: HandLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Deals the next hand. Continues the running session when configured
    /// to and nobody has won it yet; starts a new session otherwise.
    pub fn reset(&mut self) -> Result<(State, usize), ArenaError> {
        let dealt = if self.config.continue_session && self.session_live {
            self.game.continue_game()?
        } else {
            self.game.init_game()?
        };
        self.session_live = true;
        Ok(dealt)
    }

    /// Plays one hand to the end and settles it. Returns each seat's
    /// trajectory and the payoffs. `training` selects [`Agent::step`] over
    /// [`Agent::eval_step`].
    ///
    /// An agent answering with an illegal action is given Check when that is
    /// legal, Fold otherwise.
    pub fn run(&mut self, training: bool) -> Result<(Vec<Trajectory>, Vec<i64>), ArenaError> {
        let n = self.agents.len();
        let mut trajectories = vec![Trajectory::default(); n];
        let mut actions = Vec::new();

        let (mut state, mut seat) = self.reset()?;
        if !self.game.is_over() {
            trajectories[seat].states.push(state.clone());
        }
        while !self.game.is_over() {
            let agent = &mut self.agents[seat];
            let chosen = if training {
                agent.step(&state)
            } else {
                agent.eval_step(&state)
            };
            let action = substitute_illegal(chosen, &state.legal_actions);
            if action != chosen {
                warn!(seat, agent = agent.name(), %chosen, %action, "illegal agent action replaced");
            }
            trajectories[seat].actions.push(action);
            actions.push(ActionRecord {
                player_id: seat,
                action,
            });

            (state, seat) = self.game.step(action)?;
            if !self.game.is_over() {
                trajectories[seat].states.push(state.clone());
            }
        }
        for (p, trajectory) in trajectories.iter_mut().enumerate() {
            trajectory.states.push(self.game.get_state(p)?);
        }

        let payoffs = self.game.get_payoffs()?;
        let hands = self.game.get_perfect_information()?.hand_cards;
        let settlement = self.game.update(&payoffs)?;
        self.session_live = !settlement.decided;

        self.hands_played += 1;
        let winners: Vec<usize> = (0..n).filter(|&i| payoffs[i] > 0).collect();
        for &w in &winners {
            self.wins[w] += 1;
        }
        if self.config.log_results {
            let chips: Vec<u32> = self.game.players().iter().map(|p| p.remained_chips).collect();
            info!(
                hand = self.hands_played,
                ?payoffs,
                ?chips,
                decided = settlement.decided,
                "hand result"
            );
        }
        if let Some(logger) = self.logger.as_mut() {
            let record = HandRecord {
                hand_id: logger.next_id(),
                seed: self.game.config().seed,
                dealer_id: self.game.dealer_id().unwrap_or(0),
                hands,
                actions,
                payoffs: payoffs.clone(),
                winners,
                ts: None,
            };
            logger.write(&record)?;
        }

        Ok((trajectories, payoffs))
    }

    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            hands_played: self.hands_played,
            wins: self.wins.clone(),
            chips: self.game.players().iter().map(|p| p.remained_chips).collect(),
        }
    }
}

fn substitute_illegal(chosen: Action, legal: &[Action]) -> Action {
    if legal.contains(&chosen) {
        chosen
    } else if legal.contains(&Action::Check) {
        Action::Check
    } else {
        Action::Fold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_agent;
    use crate::logging::TestLogSubscriber;
    use indian_poker_engine::logger::read_records;
    use tracing::Level;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    struct Stubborn(Action);

    impl Agent for Stubborn {
        fn step(&mut self, _state: &State) -> Action {
            self.0
        }

        fn name(&self) -> &str {
            "Stubborn"
        }
    }

    fn config(seed: u64) -> GameConfig {
        GameConfig {
            dealer_id: Some(0),
            seed: Some(seed),
            ..GameConfig::default()
        }
    }

    #[test]
    fn agent_count_must_match_seats() {
        let agents = vec![create_agent("rule", None).unwrap()];
        assert!(matches!(
            Arena::new(config(1), agents, ArenaConfig::default()),
            Err(ArenaError::AgentCount {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn trajectories_alternate_and_end_with_a_final_state() {
        let agents = vec![
            create_agent("random", Some(1)).unwrap(),
            create_agent("random", Some(2)).unwrap(),
        ];
        let mut arena = Arena::new(config(5), agents, ArenaConfig::default()).unwrap();
        for _ in 0..20 {
            let (trajectories, payoffs) = arena.run(true).unwrap();
            assert_eq!(payoffs.iter().sum::<i64>(), 0);
            for t in &trajectories {
                assert_eq!(t.states.len(), t.actions.len() + 1);
                let last = t.states.last().unwrap();
                assert!(last.legal_actions.is_empty());
            }
        }
        assert_eq!(arena.stats().hands_played, 20);
    }

    #[test]
    fn session_continues_until_decided() {
        let agents = vec![
            create_agent("rule", None).unwrap(),
            create_agent("random", Some(4)).unwrap(),
        ];
        let mut arena = Arena::new(config(8), agents, ArenaConfig::default()).unwrap();
        arena.run(false).unwrap();
        let stats = arena.stats();
        assert_eq!(stats.chips.iter().sum::<u32>(), 200);
        // stacks carry into the next hand
        let before = stats.chips.clone();
        arena.run(false).unwrap();
        let after = arena.stats().chips;
        assert_eq!(after.iter().sum::<u32>(), 200);
        if before.iter().all(|&c| c > 0) {
            assert_eq!(arena.game().dealer_id(), Some(1));
        }
    }

    #[test]
    fn fresh_session_each_hand_when_not_continuing() {
        let agents = vec![
            Box::new(Stubborn(Action::AllIn)) as Box<dyn Agent>,
            Box::new(Stubborn(Action::Call)),
        ];
        let cfg = ArenaConfig {
            continue_session: false,
            log_results: true,
        };
        let mut arena = Arena::new(config(3), agents, cfg).unwrap();
        for _ in 0..3 {
            arena.run(false).unwrap();
            // every hand is all-in and called from fresh stacks
            assert_eq!(arena.game().dealer_id(), Some(0));
            let chips = arena.stats().chips;
            assert_eq!(chips.iter().sum::<u32>(), 200);
        }
    }

    #[test]
    fn illegal_choices_are_replaced_and_reported() {
        let subscriber = TestLogSubscriber::new();
        let registry = Registry::default().with(subscriber.clone());

        let agents = vec![
            Box::new(Stubborn(Action::Check)) as Box<dyn Agent>,
            Box::new(Stubborn(Action::Check)),
        ];
        let mut arena = Arena::new(config(2), agents, ArenaConfig::default()).unwrap();
        let (trajectories, payoffs) =
            tracing::subscriber::with_default(registry, || arena.run(false)).unwrap();

        // seat 1 faces the big blind, cannot check, and is folded
        assert_eq!(trajectories[1].actions, vec![Action::Fold]);
        assert!(trajectories[0].actions.is_empty());
        assert_eq!(payoffs, vec![1, -1]);
        assert!(subscriber.entries().iter().any(|e| {
            e.level == Level::WARN && e.message.contains("illegal agent action replaced")
        }));
    }

    #[test]
    fn settled_hands_are_written_to_the_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("selfplay.jsonl");
        let agents = vec![
            create_agent("rule", None).unwrap(),
            create_agent("rule", None).unwrap(),
        ];
        let logger = HandLogger::create(&path).unwrap();
        let mut arena = Arena::new(config(6), agents, ArenaConfig::default())
            .unwrap()
            .with_logger(logger);
        arena.run(false).unwrap();
        arena.run(false).unwrap();

        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].hand_id.ends_with("-000001"));
        assert_eq!(records[0].seed, Some(6));
        assert_eq!(records[0].hands.len(), 2);
        assert!(!records[0].actions.is_empty());
        assert_eq!(records[1].payoffs.iter().sum::<i64>(), 0);
    }
}
