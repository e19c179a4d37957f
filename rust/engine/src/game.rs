use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::deck::{Dealer, Deck};
use crate::errors::GameError;
use crate::judger::Judger;
use crate::player::{Player, PlayerStatus};
use crate::round::Round;
use crate::rules::{pot_of, Action};
use crate::state::{PerfectInformation, RivalView, State};

/// Everything that changes while a hand is played. The live table and every
/// history entry are values of this type; `step_back` swaps one back in.
///
/// `rival_cards` is fixed once the cards are dealt, so snapshots share it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub round: Round,
    pub game_pointer: usize,
    pub round_counter: usize,
    pub dealer: Dealer,
    pub rival_cards: Arc<Vec<RivalView>>,
    pub players: Vec<Player>,
}

/// Result of applying payoffs to the stacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    /// Seats that still have chips
    pub solvent: Vec<bool>,
    /// Exactly one seat has chips left, so the session is decided
    pub decided: bool,
}

/// Indian poker for two or more seats: one card each, everyone sees the
/// others' cards but not their own, a single betting round, then showdown.
///
/// # Examples
///
/// ```
/// use indian_poker_engine::config::GameConfig;
/// use indian_poker_engine::game::Game;
/// use indian_poker_engine::rules::Action;
///
/// let config = GameConfig { dealer_id: Some(0), seed: Some(7), ..GameConfig::default() };
/// let mut game = Game::new(config).unwrap();
/// let (state, seat) = game.init_game().unwrap();
/// assert_eq!(seat, 1);
/// assert_eq!(state.pot, 3);
///
/// game.step(Action::Fold).unwrap();
/// assert!(game.is_over());
/// assert_eq!(game.get_payoffs().unwrap(), vec![1, -1]);
/// ```
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    rng: ChaCha20Rng,
    dealer_id: Option<usize>,
    judger: Judger,
    table: Option<Snapshot>,
    history: Vec<Snapshot>,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let rng = seeded_rng(config.seed);
        Ok(Self {
            dealer_id: config.dealer_id,
            config,
            rng,
            judger: Judger::new(),
            table: None,
            history: Vec::new(),
        })
    }

    /// Replaces the configuration and drops any session in progress.
    pub fn configure(&mut self, config: GameConfig) -> Result<(), GameError> {
        config.validate()?;
        if config.seed.is_some() {
            self.rng = seeded_rng(config.seed);
        }
        self.dealer_id = config.dealer_id;
        self.config = config;
        self.table = None;
        self.history.clear();
        Ok(())
    }

    /// Starts a fresh session: new stacks for every seat and the first hand dealt.
    pub fn init_game(&mut self) -> Result<(State, usize), GameError> {
        self.init_session();
        let players = self.fresh_players();
        let deck = Deck::shuffled(&mut self.rng);
        self.start_hand(players, deck)
    }

    /// Like [`Game::init_game`] but deals from `deck` in order.
    pub fn init_game_with_deck(&mut self, deck: Deck) -> Result<(State, usize), GameError> {
        self.init_session();
        let players = self.fresh_players();
        self.start_hand(players, deck)
    }

    /// Deals the next hand of the current session. Stacks carry over and the
    /// dealer button moves one seat. Seats without chips sit the hand out.
    ///
    /// # Errors
    ///
    /// - [`GameError::SessionNotInitialized`] before any `init_game`
    /// - [`GameError::ResetWithChipsInPlay`] if the last hand was not settled
    /// - [`GameError::SessionOver`] when fewer than two seats have chips
    pub fn continue_game(&mut self) -> Result<(State, usize), GameError> {
        let players = self.next_hand_players()?;
        let deck = Deck::shuffled(&mut self.rng);
        self.start_hand(players, deck)
    }

    /// Like [`Game::continue_game`] but deals from `deck` in order.
    pub fn continue_game_with_deck(&mut self, deck: Deck) -> Result<(State, usize), GameError> {
        let players = self.next_hand_players()?;
        self.start_hand(players, deck)
    }

    /// Stacks for the next hand of the session; moves the button.
    fn next_hand_players(&mut self) -> Result<Vec<Player>, GameError> {
        let (Some(dealer_id), Some(table)) = (self.dealer_id, self.table.as_ref()) else {
            return Err(GameError::SessionNotInitialized);
        };
        let mut players = table.players.clone();
        for p in players.iter_mut() {
            p.reset()?;
        }
        let solvent = players.iter().filter(|p| p.remained_chips > 0).count();
        if solvent < 2 {
            return Err(GameError::SessionOver { solvent });
        }
        for p in players.iter_mut().filter(|p| p.remained_chips == 0) {
            p.status = PlayerStatus::Folded;
        }
        self.dealer_id = Some((dealer_id + 1) % players.len());
        Ok(players)
    }

    fn init_session(&mut self) {
        let n = self.config.num_players;
        let dealer_id = match self.config.dealer_id {
            Some(d) => d,
            None => self.rng.random_range(0..n),
        };
        self.dealer_id = Some(dealer_id);
    }

    fn fresh_players(&self) -> Vec<Player> {
        (0..self.config.num_players)
            .map(|i| Player::new(i, self.config.chips_for_each))
            .collect()
    }

    fn start_hand(&mut self, mut players: Vec<Player>, deck: Deck) -> Result<(State, usize), GameError> {
        let n = players.len();
        let dealer_id = self.dealer_id.ok_or(GameError::SessionNotInitialized)?;

        let mut dealer = Dealer::with_deck(deck);
        for p in players.iter_mut() {
            p.hand.push(dealer.deal_card()?);
        }
        let rival_cards = Arc::new(rival_views(&players));

        let small = next_alive(&players, dealer_id).unwrap_or((dealer_id + 1) % n);
        let big = next_alive(&players, small).unwrap_or((small + 1) % n);
        post_blind(&mut players[big], self.config.big_blind());
        post_blind(&mut players[small], self.config.small_blind);

        // the seat after the big blind opens the betting
        let game_pointer = next_alive(&players, big).unwrap_or((big + 1) % n);
        let mut round = Round::new(n, self.config.big_blind());
        let raised = players.iter().map(|p| p.in_chips).collect();
        round.start_new_round(game_pointer, &players, Some(raised));
        dealer.pot = pot_of(&players);

        // short stacks can be all-in from the blinds alone
        let round_counter = if bypassed_seats(&round, &players).iter().all(|&b| b) {
            debug!("no seat can act after the blinds; going to showdown");
            1
        } else {
            0
        };

        info!(
            dealer_id,
            small_blind_seat = small,
            big_blind_seat = big,
            first_to_act = game_pointer,
            "hand dealt"
        );

        self.table = Some(Snapshot {
            round,
            game_pointer,
            round_counter,
            dealer,
            rival_cards,
            players,
        });
        self.history.clear();

        let state = self.get_state(game_pointer)?;
        Ok((state, game_pointer))
    }

    pub fn get_legal_actions(&self) -> Result<Vec<Action>, GameError> {
        let table = self.table()?;
        if self.is_over() {
            return Ok(Vec::new());
        }
        Ok(table.round.get_legal_actions(&table.players))
    }

    /// Plays `action` for the seat to act and returns the next seat's state.
    ///
    /// # Errors
    ///
    /// - [`GameError::NoHandInProgress`] before the first deal
    /// - [`GameError::HandAlreadyComplete`] once the hand is over
    /// - [`GameError::IllegalAction`] with the legal set and the acting seat's
    ///   state; the game is left untouched
    pub fn step(&mut self, action: Action) -> Result<(State, usize), GameError> {
        let pointer = self.table()?.game_pointer;
        if self.is_over() {
            return Err(GameError::HandAlreadyComplete);
        }
        let legal = self.get_legal_actions()?;
        if !legal.contains(&action) {
            let state = self.get_state(pointer)?;
            warn!(seat = pointer, %action, ?legal, "illegal action rejected");
            return Err(GameError::IllegalAction {
                action,
                legal,
                state: Some(Box::new(state)),
            });
        }

        let dealer_id = self.dealer_id.ok_or(GameError::SessionNotInitialized)?;
        let allow_step_back = self.config.allow_step_back;
        let table = self.table.as_mut().ok_or(GameError::NoHandInProgress)?;
        let snapshot = allow_step_back.then(|| table.clone());

        table.game_pointer = table.round.proceed_round(&mut table.players, action)?;
        if let Some(s) = snapshot {
            self.history.push(s);
        }
        let table = self.table.as_mut().ok_or(GameError::NoHandInProgress)?;

        let bypassed = bypassed_seats(&table.round, &table.players);
        if table.round.is_over(&table.players) {
            let n = table.players.len();
            let mut pointer = (dealer_id + 1) % n;
            if bypassed.iter().any(|b| !b) {
                while bypassed[pointer] {
                    pointer = (pointer + 1) % n;
                }
            }
            table.game_pointer = pointer;
            table.round_counter += 1;
            table.round.start_new_round(pointer, &table.players, None);
        }
        table.dealer.pot = pot_of(&table.players);

        let next = table.game_pointer;
        debug!(
            seat = pointer,
            %action,
            next,
            pot = table.dealer.pot,
            round_counter = table.round_counter,
            "step"
        );
        let state = self.get_state(next)?;
        Ok((state, next))
    }

    /// Undoes the last `step`. Returns `false` when there is nothing to undo.
    pub fn step_back(&mut self) -> bool {
        match self.history.pop() {
            Some(snapshot) => {
                self.table = Some(snapshot);
                true
            }
            None => false,
        }
    }

    /// The hand ends after its single betting round, or as soon as only one
    /// seat is left contesting the pot.
    pub fn is_over(&self) -> bool {
        let Some(table) = self.table.as_ref() else {
            return false;
        };
        let in_hand = table.players.iter().filter(|p| p.status.in_hand()).count();
        in_hand <= 1 || table.round_counter >= 1
    }

    /// Observation for `player_id`.
    pub fn get_state(&self, player_id: usize) -> Result<State, GameError> {
        let table = self.table()?;
        let n = table.players.len();
        if player_id >= n {
            return Err(GameError::InvalidSeat {
                seat: player_id,
                num_players: n,
            });
        }
        Ok(State {
            player_id,
            rival_cards: table.rival_cards[player_id].clone(),
            my_chips: table.players[player_id].in_chips,
            all_chips: table.players.iter().map(|p| p.in_chips).collect(),
            legal_actions: self.get_legal_actions()?,
            stakes: table.players.iter().map(|p| p.remained_chips).collect(),
            current_player: table.game_pointer,
            pot: pot_of(&table.players),
        })
    }

    /// Signed chip result per seat for the finished hand.
    pub fn get_payoffs(&self) -> Result<Vec<i64>, GameError> {
        let table = self.table()?;
        if !self.is_over() {
            return Err(GameError::HandNotComplete);
        }
        let hands: Vec<Option<Vec<_>>> = table
            .players
            .iter()
            .map(|p| p.status.in_hand().then(|| p.hand.clone()))
            .collect();
        self.judger.judge_game(&table.players, &hands)
    }

    /// Applies `payoffs` to the stacks. Settlement cannot be undone, so the
    /// history is cleared.
    pub fn update(&mut self, payoffs: &[i64]) -> Result<Settlement, GameError> {
        let table = self.table.as_mut().ok_or(GameError::NoHandInProgress)?;
        if payoffs.len() != table.players.len() {
            return Err(GameError::PayoffLength {
                expected: table.players.len(),
                actual: payoffs.len(),
            });
        }
        let solvent: Vec<bool> = table
            .players
            .iter_mut()
            .zip(payoffs)
            .map(|(p, &payoff)| p.update(payoff))
            .collect();
        table.dealer.pot = 0;
        self.history.clear();

        let survivors = solvent.iter().filter(|&&s| s).count();
        debug_assert!(survivors > 0, "settlement left no seat with chips");
        info!(?payoffs, survivors, "hand settled");
        Ok(Settlement {
            decided: survivors == 1,
            solvent,
        })
    }

    pub fn get_perfect_information(&self) -> Result<PerfectInformation, GameError> {
        let table = self.table()?;
        Ok(PerfectInformation {
            chips: table.players.iter().map(|p| p.remained_chips).collect(),
            rival_cards: table.rival_cards.as_ref().clone(),
            hand_cards: table.players.iter().map(|p| p.hand.clone()).collect(),
            current_player: table.game_pointer,
            legal_actions: self.get_legal_actions()?,
        })
    }

    pub fn get_num_players(&self) -> usize {
        self.config.num_players
    }

    pub fn get_num_actions() -> usize {
        Action::COUNT
    }

    /// Seat to act, if a hand has been dealt.
    pub fn get_player_id(&self) -> Option<usize> {
        self.table.as_ref().map(|t| t.game_pointer)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn dealer_id(&self) -> Option<usize> {
        self.dealer_id
    }

    pub fn players(&self) -> &[Player] {
        self.table.as_ref().map(|t| t.players.as_slice()).unwrap_or(&[])
    }

    /// The live table, for inspection and equality checks.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.table.as_ref()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    fn table(&self) -> Result<&Snapshot, GameError> {
        self.table.as_ref().ok_or(GameError::NoHandInProgress)
    }
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(s) => ChaCha20Rng::seed_from_u64(s),
        None => ChaCha20Rng::from_rng(&mut rand::rng()),
    }
}

fn post_blind(player: &mut Player, chips: u32) {
    player.bet(chips);
    if player.remained_chips == 0 {
        player.status = PlayerStatus::AllIn;
    }
    debug!(seat = player.player_id(), chips = player.in_chips, "blind posted");
}

/// First seat after `from` (wrapping, excluding `from`) that can still act.
fn next_alive(players: &[Player], from: usize) -> Option<usize> {
    let n = players.len();
    (1..n)
        .map(|step| (from + step) % n)
        .find(|&i| players[i].status == PlayerStatus::Alive)
}

fn rival_views(players: &[Player]) -> Vec<RivalView> {
    (0..players.len())
        .map(|viewer| {
            players
                .iter()
                .enumerate()
                .map(|(seat, p)| (seat != viewer).then(|| p.hand.clone()))
                .collect()
        })
        .collect()
}

/// Seats that take no further part in the betting: folded and all-in seats,
/// plus a lone remaining actor that has already matched the largest bet.
fn bypassed_seats(round: &Round, players: &[Player]) -> Vec<bool> {
    let mut bypassed: Vec<bool> = players
        .iter()
        .map(|p| match p.status {
            PlayerStatus::Alive => false,
            PlayerStatus::Folded | PlayerStatus::AllIn => true,
        })
        .collect();
    let open: Vec<usize> = (0..bypassed.len()).filter(|&i| !bypassed[i]).collect();
    if let [last] = open[..] {
        if round.raised()[last] >= round.max_raised() {
            bypassed[last] = true;
        }
    }
    bypassed
}
