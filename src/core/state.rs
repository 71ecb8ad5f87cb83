//! Game state.
//!
//! ## GameState
//!
//! Everything one running game needs: draw pile, discard, seats, whose
//! turn it is, how many draws they still owe and what phase the turn is in.
//! Only [`crate::rules::Engine`] mutates it during play.
//!
//! ## Sight
//!
//! Each player keeps a `Sight`: what they know about the top of the draw
//! pile, by depth. See the Future fills the first three depths; placing a
//! bomb records its depth for the placer. The engine keeps every sight in
//! step with the pile (draws pop depth 0, insertions shift deeper entries,
//! shuffles wipe everything), so a known card is always the real card.
//!
//! ## Card conservation
//!
//! `deck + hands + discard + pending bomb` is constant for a game's
//! lifetime. `card_count()` computes the left side.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::{Seat, SeatMap};
use crate::cards::{Card, Deck, Hand};
use crate::rules::GameResult;

/// Known cards at the top of the pile, indexed by depth.
pub type Sight = SmallVec<[Option<Card>; 4]>;

/// Where the current turn stands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// The active player picks a card to play, or draws.
    AwaitingTurnAction,
    /// A draw is being resolved. Transient inside the engine.
    AwaitingDrawResolution,
    /// The active player drew a bomb, holds a Defuse and must place it.
    AwaitingBombResponse,
    /// Finished.
    GameOver(GameResult),
}

/// One seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub seat: Seat,
    pub hand: Hand,
    pub alive: bool,
    pub sight: Sight,
}

impl Player {
    #[must_use]
    pub fn new(seat: Seat, hand: Hand) -> Self {
        Self { seat, hand, alive: true, sight: Sight::new() }
    }

    /// What this player knows is at `depth`.
    #[must_use]
    pub fn knows(&self, depth: usize) -> Option<Card> {
        self.sight.get(depth).copied().flatten()
    }

    /// Record a known card at `depth`.
    pub fn reveal(&mut self, depth: usize, card: Card) {
        if self.sight.len() <= depth {
            self.sight.resize(depth + 1, None);
        }
        self.sight[depth] = Some(card);
    }
}

/// Complete state of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub deck: Deck,
    pub discard: Vec<Card>,
    pub players: SeatMap<Player>,

    /// Whose turn it is. Also the seat answering a drawn bomb.
    pub active: Seat,

    /// Draws the active player still owes this turn.
    pub required_draws: u32,

    /// Turn counter, starting at 1.
    pub turn: u32,

    /// Decisions taken so far.
    pub decisions: u32,

    pub phase: Phase,

    /// A drawn bomb waiting for placement.
    pub pending_bomb: bool,

    /// Deck size right after the deal.
    pub initial_deck_len: usize,

    total_cards: usize,
}

impl GameState {
    /// A game in progress from an explicit pile and hands. Seat 0 starts,
    /// owing one draw.
    ///
    /// Used for dealt games and for constructing scenarios directly.
    #[must_use]
    pub fn from_parts(deck: Deck, hands: Vec<Hand>) -> Self {
        let players = SeatMap::new(hands.len(), {
            let mut hands = hands.into_iter();
            move |seat| Player::new(seat, hands.next().unwrap_or_default())
        });
        let initial_deck_len = deck.len();
        let total_cards = deck.len() + players.values().map(|p| p.hand.len()).sum::<usize>();
        Self {
            deck,
            discard: Vec::new(),
            players,
            active: Seat(0),
            required_draws: 1,
            turn: 1,
            decisions: 0,
            phase: Phase::AwaitingTurnAction,
            pending_bomb: false,
            initial_deck_len,
            total_cards,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.seat_count()
    }

    #[must_use]
    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat]
    }

    #[must_use]
    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.players[seat].hand
    }

    #[must_use]
    pub fn is_alive(&self, seat: Seat) -> bool {
        self.players[seat].alive
    }

    pub fn alive_seats(&self) -> impl Iterator<Item = Seat> + '_ {
        self.players.iter().filter(|(_, p)| p.alive).map(|(s, _)| s)
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.players.values().filter(|p| p.alive).count()
    }

    /// First alive seat after `from`, clockwise. `from` itself if nobody else is alive.
    #[must_use]
    pub fn next_alive(&self, from: Seat) -> Seat {
        let n = self.player_count();
        let mut seat = from.next(n);
        for _ in 0..n {
            if self.players[seat].alive {
                return seat;
            }
            seat = seat.next(n);
        }
        from
    }

    /// Card `seat` knows to be at `depth`.
    #[must_use]
    pub fn known_card(&self, seat: Seat, depth: usize) -> Option<Card> {
        self.players[seat].knows(depth)
    }

    /// Bombs remaining over cards remaining; zero for an empty pile.
    #[must_use]
    pub fn bomb_risk(&self) -> f64 {
        if self.deck.is_empty() {
            0.0
        } else {
            self.deck.bombs() as f64 / self.deck.len() as f64
        }
    }

    /// Fraction of the dealt pile still undrawn.
    #[must_use]
    pub fn deck_fraction_remaining(&self) -> f64 {
        if self.initial_deck_len == 0 {
            0.0
        } else {
            self.deck.len() as f64 / self.initial_deck_len as f64
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver(_))
    }

    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        match &self.phase {
            Phase::GameOver(result) => Some(result),
            _ => None,
        }
    }

    /// Cards currently accounted for.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.deck.len()
            + self.discard.len()
            + self.players.values().map(|p| p.hand.len()).sum::<usize>()
            + usize::from(self.pending_bomb)
    }

    /// Cards in play when the game started.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.total_cards
    }

    // === Sight bookkeeping ===

    /// The top card left the pile.
    pub(crate) fn sight_after_draw(&mut self) {
        for player in self.players.values_mut() {
            if !player.sight.is_empty() {
                player.sight.remove(0);
            }
        }
    }

    /// A card was inserted at `depth` by `placer`.
    pub(crate) fn sight_after_insert(&mut self, placer: Seat, depth: usize, card: Card) {
        for (seat, player) in self.players.iter_mut() {
            if depth <= player.sight.len() {
                player.sight.insert(depth, None);
            }
            if seat == placer {
                player.reveal(depth, card);
            }
        }
    }

    /// The pile was shuffled.
    pub(crate) fn sight_after_shuffle(&mut self) {
        for player in self.players.values_mut() {
            player.sight.clear();
        }
    }

    /// True when every known card matches the pile.
    #[must_use]
    pub fn sight_is_consistent(&self) -> bool {
        self.players.values().all(|p| {
            p.sight
                .iter()
                .enumerate()
                .all(|(depth, known)| known.map_or(true, |card| self.deck.peek(depth) == Some(card)))
        })
    }
}
