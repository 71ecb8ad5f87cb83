//! Game setup configuration.
//!
//! - `DeckRecipe`: which non-bomb, non-defuse cards make up the deck
//! - `InteractionRules`: capability flags for the interactive cards
//!   (Nope, Favor, cat pairs), all off by default
//! - `GameConfig`: player count, deal sizes, bomb/defuse counts, rules
//!
//! Configs are built with `Default` plus `with_*` methods and checked with
//! `validate()` before a game is dealt.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::cards::{Card, CatKind};

/// Supported table sizes.
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 5;

/// Card counts for the dealable part of the deck.
///
/// Bombs and Defuses are not part of the recipe; `GameConfig` adds them
/// around the deal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckRecipe {
    pub counts: Vec<(Card, u8)>,
}

impl DeckRecipe {
    /// The base game: 4 Attack, 4 Skip, 4 Favor, 4 Shuffle, 5 See the
    /// Future, 5 Nope and 4 of each cat.
    #[must_use]
    pub fn standard() -> Self {
        let mut counts = vec![
            (Card::Attack, 4),
            (Card::Skip, 4),
            (Card::Favor, 4),
            (Card::Shuffle, 4),
            (Card::SeeFuture, 5),
            (Card::Nope, 5),
        ];
        counts.extend(CatKind::ALL.into_iter().map(|kind| (Card::Cat(kind), 4)));
        Self { counts }
    }

    /// Recipe from explicit counts.
    #[must_use]
    pub fn custom(counts: impl IntoIterator<Item = (Card, u8)>) -> Self {
        Self { counts: counts.into_iter().collect() }
    }

    /// Total number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.iter().map(|&(_, n)| n as usize).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expand into one entry per card.
    #[must_use]
    pub fn expand(&self) -> Vec<Card> {
        self.counts
            .iter()
            .flat_map(|&(card, n)| std::iter::repeat(card).take(n as usize))
            .collect()
    }
}

impl Default for DeckRecipe {
    fn default() -> Self {
        Self::standard()
    }
}

/// Which interactive cards the engine models.
///
/// With a flag off the matching cards are inert filler: they can be held,
/// stolen and counted, but never played.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InteractionRules {
    /// Targeted players cancel Attack, Favor and cat-pair steals with Nope.
    pub nope: bool,
    /// Favor can be played to take a random card from another player.
    pub favor: bool,
    /// Two matching cats can be played to steal a random card.
    pub cat_pairs: bool,
}

impl InteractionRules {
    /// Every interactive card enabled.
    #[must_use]
    pub fn full() -> Self {
        Self { nope: true, favor: true, cat_pairs: true }
    }
}

/// Setup for one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seats (2..=5).
    pub player_count: usize,

    /// Cards dealt from the shuffled recipe to each player.
    pub hand_size: usize,

    /// Defuses dealt to each player on top of `hand_size`.
    pub defuses_per_player: usize,

    /// Defuses shuffled into the draw pile after the deal.
    pub defuses_in_deck: usize,

    /// Bombs shuffled into the draw pile. `None` means one fewer than the
    /// number of players.
    pub bombs: Option<usize>,

    /// Dealable cards.
    pub recipe: DeckRecipe,

    /// Interactive card capabilities.
    pub rules: InteractionRules,

    /// Decisions allowed before a game is declared runaway.
    pub max_decisions: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::standard(4)
    }
}

impl GameConfig {
    /// Base-game setup for `player_count` players.
    #[must_use]
    pub fn standard(player_count: usize) -> Self {
        Self {
            player_count,
            hand_size: 4,
            defuses_per_player: 1,
            defuses_in_deck: 2,
            bombs: None,
            recipe: DeckRecipe::standard(),
            rules: InteractionRules::default(),
            max_decisions: 10_000,
        }
    }

    /// Set the dealable recipe.
    #[must_use]
    pub fn with_recipe(mut self, recipe: DeckRecipe) -> Self {
        self.recipe = recipe;
        self
    }

    /// Set the cards dealt to each player.
    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Set Defuse counts in hands and in the deck.
    #[must_use]
    pub fn with_defuses(mut self, per_player: usize, in_deck: usize) -> Self {
        self.defuses_per_player = per_player;
        self.defuses_in_deck = in_deck;
        self
    }

    /// Override the bomb count.
    #[must_use]
    pub fn with_bombs(mut self, bombs: usize) -> Self {
        self.bombs = Some(bombs);
        self
    }

    /// Set interaction rules.
    #[must_use]
    pub fn with_rules(mut self, rules: InteractionRules) -> Self {
        self.rules = rules;
        self
    }

    /// Set the runaway-game decision cap.
    #[must_use]
    pub fn with_max_decisions(mut self, max_decisions: u32) -> Self {
        self.max_decisions = max_decisions;
        self
    }

    /// Bombs in the deck after resolving the default.
    #[must_use]
    pub fn bomb_count(&self) -> usize {
        self.bombs.unwrap_or(self.player_count.saturating_sub(1))
    }

    /// Total cards in play for the whole game.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.recipe.len()
            + self.player_count * self.defuses_per_player
            + self.defuses_in_deck
            + self.bomb_count()
    }

    /// Copies of each card kind in play, indexed by [`Card::kind_index`].
    #[must_use]
    pub fn kind_counts(&self) -> [usize; Card::KINDS] {
        let mut counts = [0usize; Card::KINDS];
        for &(card, n) in &self.recipe.counts {
            counts[card.kind_index()] += usize::from(n);
        }
        counts[Card::Defuse.kind_index()] += self.player_count * self.defuses_per_player + self.defuses_in_deck;
        counts[Card::Bomb.kind_index()] += self.bomb_count();
        counts
    }

    /// Check the setup can be dealt.
    ///
    /// Hands count copies per kind in a byte, so no kind may exceed 255
    /// copies across the whole game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(ConfigError::PlayerCount(self.player_count));
        }
        let needed = self.hand_size * self.player_count;
        let available = self.recipe.len();
        if needed > available {
            return Err(ConfigError::NotEnoughCards { needed, available });
        }
        if self.recipe.counts.iter().any(|&(card, _)| matches!(card, Card::Bomb)) {
            return Err(ConfigError::Invalid {
                name: "recipe",
                reason: "bombs are added by bomb count, not by recipe".to_string(),
            });
        }
        let counts = self.kind_counts();
        if let Some((card, &count)) = Card::ALL
            .iter()
            .zip(counts.iter())
            .find(|(_, count)| **count > usize::from(u8::MAX))
        {
            return Err(ConfigError::TooManyCopies { card: *card, count });
        }
        if self.max_decisions == 0 {
            return Err(ConfigError::Invalid {
                name: "max_decisions",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}
