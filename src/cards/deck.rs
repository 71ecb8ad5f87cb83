//! The draw pile.
//!
//! Cards are stored bottom-first so that drawing is a `pop`. Public
//! positions are expressed as *depth*: depth 0 is the next card drawn and
//! depth `len()` is "below the bottom card".

use serde::{Deserialize, Serialize};

use crate::core::{DeckError, GameRng};

use super::card::Card;

/// Ordered draw pile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Build a deck from cards listed top first.
    #[must_use]
    pub fn from_top(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut cards: Vec<Card> = cards.into_iter().collect();
        cards.reverse();
        Self { cards }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remove and return the top card.
    pub fn draw(&mut self) -> Result<Card, DeckError> {
        self.cards.pop().ok_or(DeckError::Empty)
    }

    /// Insert a card so that it becomes the card at `depth`.
    ///
    /// `depth == 0` puts it on top, `depth == len()` on the bottom.
    pub fn insert_at(&mut self, card: Card, depth: usize) -> Result<(), DeckError> {
        let len = self.cards.len();
        if depth > len {
            return Err(DeckError::DepthOutOfBounds { depth, len });
        }
        self.cards.insert(len - depth, card);
        Ok(())
    }

    /// Card at `depth`, if the deck is that deep.
    #[must_use]
    pub fn peek(&self, depth: usize) -> Option<Card> {
        let len = self.cards.len();
        if depth < len {
            Some(self.cards[len - 1 - depth])
        } else {
            None
        }
    }

    /// Up to `k` cards from the top, top first.
    #[must_use]
    pub fn peek_top(&self, k: usize) -> Vec<Card> {
        self.cards.iter().rev().take(k).copied().collect()
    }

    /// Uniformly permute the deck.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    /// Number of bombs still in the pile.
    #[must_use]
    pub fn bombs(&self) -> usize {
        self.count(Card::Bomb)
    }

    #[must_use]
    pub fn count(&self, card: Card) -> usize {
        self.cards.iter().filter(|&&c| c == card).count()
    }

    /// Depths of every copy of `card`, shallowest first.
    #[must_use]
    pub fn depths_of(&self, card: Card) -> Vec<usize> {
        self.cards
            .iter()
            .rev()
            .enumerate()
            .filter(|(_, &c)| c == card)
            .map(|(depth, _)| depth)
            .collect()
    }

    /// Iterate top first.
    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().rev().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CatKind;

    fn cat() -> Card {
        Card::Cat(CatKind::Tacocat)
    }

    #[test]
    fn test_draw_returns_top() {
        let mut deck = Deck::from_top([Card::Bomb, Card::Skip, cat()]);
        assert_eq!(deck.draw(), Ok(Card::Bomb));
        assert_eq!(deck.draw(), Ok(Card::Skip));
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn test_draw_empty_fails() {
        let mut deck = Deck::default();
        assert_eq!(deck.draw(), Err(DeckError::Empty));
    }

    #[test]
    fn test_insert_top_and_bottom() {
        let mut deck = Deck::from_top([Card::Skip, Card::Attack]);
        deck.insert_at(Card::Bomb, 0).unwrap();
        assert_eq!(deck.peek(0), Some(Card::Bomb));

        deck.insert_at(Card::Defuse, deck.len()).unwrap();
        assert_eq!(deck.peek_top(4), vec![Card::Bomb, Card::Skip, Card::Attack, Card::Defuse]);
    }

    #[test]
    fn test_insert_at_depth() {
        let mut deck = Deck::from_top([cat(), cat(), cat()]);
        deck.insert_at(Card::Bomb, 2).unwrap();
        assert_eq!(deck.depths_of(Card::Bomb), vec![2]);
    }

    #[test]
    fn test_insert_out_of_bounds() {
        let mut deck = Deck::from_top([cat()]);
        assert_eq!(
            deck.insert_at(Card::Bomb, 2),
            Err(DeckError::DepthOutOfBounds { depth: 2, len: 1 })
        );
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn test_insert_into_empty_deck() {
        let mut deck = Deck::default();
        deck.insert_at(Card::Bomb, 0).unwrap();
        assert_eq!(deck.peek(0), Some(Card::Bomb));
    }

    #[test]
    fn test_peek_top_short_deck() {
        let deck = Deck::from_top([Card::Skip, Card::Bomb]);
        assert_eq!(deck.peek_top(3), vec![Card::Skip, Card::Bomb]);
        assert_eq!(deck.peek(2), None);
    }

    #[test]
    fn test_shuffle_conserves_cards() {
        let mut deck = Deck::from_top([Card::Bomb, Card::Bomb, cat(), Card::Skip, Card::Defuse]);
        let mut rng = GameRng::new(7);
        deck.shuffle(&mut rng);
        assert_eq!(deck.len(), 5);
        assert_eq!(deck.bombs(), 2);
        assert_eq!(deck.count(Card::Defuse), 1);
    }
}
