//! The game engine.
//!
//! `Engine` owns the rules; `GameState` owns the data. Every mutation of a
//! running game goes through [`Engine::apply`], which checks legality and
//! then resolves the action until the next decision point:
//!
//! - **Draw**: take the top card. A bomb without a Defuse eliminates the
//!   drawer; with a Defuse the drawer must place it back
//!   (`AwaitingBombResponse`). An empty pile ends the game, survivors share
//!   the win.
//! - **Attack**: end the turn; the next alive seat owes two draws, or the
//!   attacker's outstanding draws plus two when the attacker was already
//!   under attack.
//! - **Skip**: settle one owed draw without drawing.
//! - **See the Future / Shuffle / Favor / cat pair**: no effect on owed
//!   draws; the turn continues.
//!
//! [`Engine::play`] drives a whole game, classifying each decision point
//! and asking a [`Controller`] for the action.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Deck, Hand};
use crate::core::{
    Action, ActionList, ConfigError, GameConfig, GameRng, GameState, InteractionRules, Phase, Seat,
    SimError,
};
use crate::policy::Policy;
use crate::triggers::{self, Trigger};

/// Outcome of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Last player standing.
    Winner(Seat),
    /// The pile ran out; everyone still alive shares the win.
    Survivors(Vec<Seat>),
}

impl GameResult {
    /// Check if a seat won.
    #[must_use]
    pub fn is_winner(&self, seat: Seat) -> bool {
        match self {
            GameResult::Winner(s) => *s == seat,
            GameResult::Survivors(seats) => seats.contains(&seat),
        }
    }
}

/// A decision point handed to a controller.
#[derive(Clone, Copy, Debug)]
pub struct Decision<'a> {
    pub state: &'a GameState,
    /// Seat that must act.
    pub seat: Seat,
    /// Classified situation of `seat`.
    pub trigger: Trigger,
    /// Every legal action, never empty.
    pub legal: &'a [Action],
}

impl Decision<'_> {
    #[must_use]
    pub fn hand(&self) -> &Hand {
        self.state.hand(self.seat)
    }

    #[must_use]
    pub fn is_legal(&self, action: Action) -> bool {
        self.legal.contains(&action)
    }
}

/// Picks actions for every seat during [`Engine::play`].
///
/// Every [`Policy`] is a controller. Stateful controllers (such as the
/// evaluator's override) implement this directly.
pub trait Controller {
    fn decide(&mut self, decision: &Decision<'_>, rng: &mut GameRng) -> Action;
}

impl<P: Policy + ?Sized> Controller for P {
    fn decide(&mut self, decision: &Decision<'_>, rng: &mut GameRng) -> Action {
        self.choose_action(decision, rng)
    }
}

/// Rules of play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Engine {
    rules: InteractionRules,
    max_decisions: u32,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(InteractionRules::default())
    }
}

impl Engine {
    #[must_use]
    pub fn new(rules: InteractionRules) -> Self {
        Self { rules, max_decisions: 10_000 }
    }

    /// Engine with the rules and decision cap of `config`.
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self { rules: config.rules, max_decisions: config.max_decisions }
    }

    #[must_use]
    pub fn with_max_decisions(mut self, max_decisions: u32) -> Self {
        self.max_decisions = max_decisions;
        self
    }

    #[must_use]
    pub fn rules(&self) -> InteractionRules {
        self.rules
    }

    /// Deal a fresh game.
    ///
    /// The recipe is shuffled and dealt, each player gets their Defuses,
    /// then the remaining Defuses and the bombs are shuffled into the pile.
    pub fn new_game(&self, config: &GameConfig, rng: &mut GameRng) -> Result<GameState, ConfigError> {
        config.validate()?;

        let mut pool = config.recipe.expand();
        rng.shuffle(&mut pool);

        let mut hands = Vec::with_capacity(config.player_count);
        for _ in 0..config.player_count {
            let mut hand = Hand::new();
            for card in pool.drain(pool.len() - config.hand_size..) {
                hand.add(card);
            }
            for _ in 0..config.defuses_per_player {
                hand.add(Card::Defuse);
            }
            hands.push(hand);
        }

        pool.extend(std::iter::repeat(Card::Defuse).take(config.defuses_in_deck));
        pool.extend(std::iter::repeat(Card::Bomb).take(config.bomb_count()));
        let mut deck = Deck::from_top(pool);
        deck.shuffle(rng);

        Ok(GameState::from_parts(deck, hands))
    }

    // =========================================================================
    // Legality
    // =========================================================================

    /// All legal actions for the seat that must act. Empty once the game is over.
    #[must_use]
    pub fn legal_actions(&self, state: &GameState) -> ActionList {
        let mut actions = ActionList::new();
        let seat = state.active;
        match state.phase {
            Phase::AwaitingTurnAction => {
                let hand = state.hand(seat);
                actions.push(Action::Draw);
                for (card, action) in [
                    (Card::Attack, Action::Attack),
                    (Card::Skip, Action::Skip),
                    (Card::SeeFuture, Action::SeeFuture),
                    (Card::Shuffle, Action::Shuffle),
                ] {
                    if hand.has(card) {
                        actions.push(action);
                    }
                }
                if self.rules.favor && hand.has(Card::Favor) {
                    for target in steal_targets(state, seat) {
                        actions.push(Action::Favor { target });
                    }
                }
                if self.rules.cat_pairs {
                    for kind in hand.cat_pairs() {
                        for target in steal_targets(state, seat) {
                            actions.push(Action::CatPair { kind, target });
                        }
                    }
                }
            }
            Phase::AwaitingBombResponse => {
                let len = state.deck.len();
                actions.push(Action::PlaceBombTop);
                for k in 1..len.min(usize::from(u8::MAX) + 1) {
                    actions.push(Action::PlaceBombPosition(k as u8));
                }
                actions.push(Action::PlaceBombBottom);
                actions.push(Action::UseDefuse);
            }
            Phase::AwaitingDrawResolution | Phase::GameOver(_) => {}
        }
        actions
    }

    /// Whether `action` is legal for the seat that must act.
    #[must_use]
    pub fn is_legal(&self, state: &GameState, action: Action) -> bool {
        let seat = state.active;
        let hand = state.hand(seat);
        match (&state.phase, action) {
            (Phase::AwaitingTurnAction, Action::Draw) => true,
            (
                Phase::AwaitingTurnAction,
                Action::Attack | Action::Skip | Action::SeeFuture | Action::Shuffle,
            ) => action.card().is_some_and(|card| hand.has(card)),
            (Phase::AwaitingTurnAction, Action::Favor { target }) => {
                self.rules.favor && hand.has(Card::Favor) && is_steal_target(state, seat, target)
            }
            (Phase::AwaitingTurnAction, Action::CatPair { kind, target }) => {
                self.rules.cat_pairs
                    && hand.count(Card::Cat(kind)) >= 2
                    && is_steal_target(state, seat, target)
            }
            (
                Phase::AwaitingBombResponse,
                Action::PlaceBombTop | Action::PlaceBombBottom | Action::UseDefuse,
            ) => true,
            (Phase::AwaitingBombResponse, Action::PlaceBombPosition(k)) => {
                k >= 1 && usize::from(k) < state.deck.len()
            }
            _ => false,
        }
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Apply one action for the seat that must act and resolve it.
    pub fn apply(&self, state: &mut GameState, action: Action, rng: &mut GameRng) -> Result<(), SimError> {
        if state.is_over() {
            return Err(SimError::GameOver);
        }
        let seat = state.active;
        if !self.is_legal(state, action) {
            return Err(SimError::IllegalAction { seat, action });
        }

        match action {
            Action::Draw => self.draw(state)?,
            Action::Attack => {
                spend(state, seat, Card::Attack);
                let victim = state.next_alive(seat);
                if !self.noped(state, seat, victim) {
                    let owed = if state.required_draws >= 2 { state.required_draws + 2 } else { 2 };
                    pass_turn(state, owed);
                }
            }
            Action::Skip => {
                spend(state, seat, Card::Skip);
                settle_draw(state);
            }
            Action::SeeFuture => {
                spend(state, seat, Card::SeeFuture);
                for (depth, card) in state.deck.peek_top(3).into_iter().enumerate() {
                    state.players[seat].reveal(depth, card);
                }
            }
            Action::Shuffle => {
                spend(state, seat, Card::Shuffle);
                state.deck.shuffle(rng);
                state.sight_after_shuffle();
            }
            Action::Favor { target } => {
                spend(state, seat, Card::Favor);
                if !self.noped(state, seat, target) {
                    steal(state, seat, target, rng);
                }
            }
            Action::CatPair { kind, target } => {
                spend(state, seat, Card::Cat(kind));
                spend(state, seat, Card::Cat(kind));
                if !self.noped(state, seat, target) {
                    steal(state, seat, target, rng);
                }
            }
            Action::PlaceBombTop => place_bomb(state, 0)?,
            Action::PlaceBombPosition(k) => place_bomb(state, usize::from(k))?,
            Action::PlaceBombBottom => {
                let bottom = state.deck.len();
                place_bomb(state, bottom)?;
            }
            Action::UseDefuse => {
                let depth = rng.gen_range_inclusive(0..=state.deck.len());
                place_bomb(state, depth)?;
            }
        }
        Ok(())
    }

    /// Draw for the active seat.
    fn draw(&self, state: &mut GameState) -> Result<(), SimError> {
        state.phase = Phase::AwaitingDrawResolution;
        if state.deck.is_empty() {
            let survivors = state.alive_seats().collect();
            state.phase = Phase::GameOver(GameResult::Survivors(survivors));
            return Ok(());
        }

        let seat = state.active;
        let card = state.deck.draw()?;
        state.sight_after_draw();

        if card != Card::Bomb {
            state.players[seat].hand.add(card);
            settle_draw(state);
        } else if state.hand(seat).has(Card::Defuse) {
            state.pending_bomb = true;
            state.phase = Phase::AwaitingBombResponse;
        } else {
            eliminate(state, seat);
        }
        Ok(())
    }

    /// Resolve a Nope exchange between `actor` and `target`.
    ///
    /// The target answers first; each side keeps playing Nope while the
    /// last one went against it. Returns true if the action is cancelled.
    fn noped(&self, state: &mut GameState, actor: Seat, target: Seat) -> bool {
        if !self.rules.nope || actor == target {
            return false;
        }
        let mut cancelled = false;
        loop {
            let responder = if cancelled { actor } else { target };
            if !state.players[responder].hand.remove(Card::Nope) {
                return cancelled;
            }
            state.discard.push(Card::Nope);
            cancelled = !cancelled;
        }
    }

    // =========================================================================
    // Whole games
    // =========================================================================

    /// Classify the decision point the game is waiting on.
    ///
    /// A gap is a defect in the classifier and is logged before it is returned.
    pub fn classify(&self, state: &GameState) -> Result<Trigger, SimError> {
        triggers::classify(state, state.active).map_err(|gap| {
            log::error!("classification gap at turn {}: {gap}", state.turn);
            SimError::from(gap)
        })
    }

    /// Play until the game ends.
    pub fn play<C: Controller + ?Sized>(
        &self,
        state: &mut GameState,
        controller: &mut C,
        rng: &mut GameRng,
    ) -> Result<GameResult, SimError> {
        loop {
            if let Some(result) = state.result() {
                return Ok(result.clone());
            }
            if state.decisions >= self.max_decisions {
                return Err(SimError::DecisionLimit(self.max_decisions));
            }

            let trigger = self.classify(state)?;
            let legal = self.legal_actions(state);
            let decision = Decision { state: &*state, seat: state.active, trigger, legal: &legal };
            let action = controller.decide(&decision, rng);

            self.apply(state, action, rng)?;
            state.decisions += 1;
        }
    }
}

/// Alive players other than `seat` with something to steal.
fn steal_targets(state: &GameState, seat: Seat) -> impl Iterator<Item = Seat> + '_ {
    state.alive_seats().filter(move |&s| s != seat && !state.hand(s).is_empty())
}

fn is_steal_target(state: &GameState, seat: Seat, target: Seat) -> bool {
    target != seat
        && target.index() < state.player_count()
        && state.is_alive(target)
        && !state.hand(target).is_empty()
}

fn spend(state: &mut GameState, seat: Seat, card: Card) {
    if state.players[seat].hand.remove(card) {
        state.discard.push(card);
    }
}

fn steal(state: &mut GameState, thief: Seat, target: Seat, rng: &mut GameRng) {
    if let Some(card) = state.players[target].hand.take_random(rng) {
        state.players[thief].hand.add(card);
    }
}

/// One owed draw is settled. Passes the turn when none remain.
fn settle_draw(state: &mut GameState) {
    state.required_draws = state.required_draws.saturating_sub(1);
    if state.required_draws == 0 {
        pass_turn(state, 1);
    } else {
        state.phase = Phase::AwaitingTurnAction;
    }
}

/// Hand the turn to the next alive seat, who owes `owed` draws.
fn pass_turn(state: &mut GameState, owed: u32) {
    state.active = state.next_alive(state.active);
    state.required_draws = owed;
    state.turn += 1;
    state.phase = Phase::AwaitingTurnAction;
}

fn place_bomb(state: &mut GameState, depth: usize) -> Result<(), SimError> {
    let seat = state.active;
    state.deck.insert_at(Card::Bomb, depth)?;
    spend(state, seat, Card::Defuse);
    state.pending_bomb = false;
    state.sight_after_insert(seat, depth, Card::Bomb);
    settle_draw(state);
    Ok(())
}

fn eliminate(state: &mut GameState, seat: Seat) {
    state.discard.push(Card::Bomb);
    let player = &mut state.players[seat];
    player.alive = false;
    player.sight.clear();

    let alive: Vec<Seat> = state.alive_seats().collect();
    match alive.as_slice() {
        [winner] => state.phase = Phase::GameOver(GameResult::Winner(*winner)),
        [] => state.phase = Phase::GameOver(GameResult::Survivors(Vec::new())),
        _ => pass_turn(state, 1),
    }
}
