//! Player hands as card-count multisets.

use serde::{Deserialize, Serialize};

use super::card::{Card, CatKind};
use crate::core::GameRng;

/// A multiset of cards. Order never matters in a hand.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hand {
    counts: [u8; Card::KINDS],
}

impl Hand {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a hand from a list of cards.
    #[must_use]
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut hand = Self::new();
        for card in cards {
            hand.add(card);
        }
        hand
    }

    pub fn add(&mut self, card: Card) {
        self.counts[card.kind_index()] += 1;
    }

    /// Remove one copy. Returns false if the hand had none.
    pub fn remove(&mut self, card: Card) -> bool {
        let slot = &mut self.counts[card.kind_index()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    #[must_use]
    pub fn count(&self, card: Card) -> usize {
        self.counts[card.kind_index()] as usize
    }

    #[must_use]
    pub fn has(&self, card: Card) -> bool {
        self.count(card) > 0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Holds Skip or Attack.
    #[must_use]
    pub fn has_escape(&self) -> bool {
        self.has(Card::Skip) || self.has(Card::Attack)
    }

    /// Cat kinds held at least twice.
    pub fn cat_pairs(&self) -> impl Iterator<Item = CatKind> + '_ {
        CatKind::ALL
            .into_iter()
            .filter(move |&kind| self.count(Card::Cat(kind)) >= 2)
    }

    /// Iterate over every card, one item per copy.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        Card::ALL
            .into_iter()
            .flat_map(move |card| std::iter::repeat(card).take(self.count(card)))
    }

    /// Remove and return a uniformly random card.
    pub fn take_random(&mut self, rng: &mut GameRng) -> Option<Card> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        let mut pick = rng.gen_range_usize(0..len);
        for card in Card::ALL {
            let n = self.count(card);
            if pick < n {
                self.remove(card);
                return Some(card);
            }
            pick -= n;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_remove() {
        let mut hand = Hand::new();
        hand.add(Card::Skip);
        hand.add(Card::Skip);
        assert_eq!(hand.count(Card::Skip), 2);
        assert!(hand.remove(Card::Skip));
        assert_eq!(hand.count(Card::Skip), 1);
        assert!(!hand.remove(Card::Attack));
    }

    #[test]
    fn test_escape() {
        assert!(Hand::from_cards([Card::Attack]).has_escape());
        assert!(Hand::from_cards([Card::Skip]).has_escape());
        assert!(!Hand::from_cards([Card::Shuffle, Card::Defuse]).has_escape());
    }

    #[test]
    fn test_cat_pairs() {
        let hand = Hand::from_cards([
            Card::Cat(CatKind::Tacocat),
            Card::Cat(CatKind::Tacocat),
            Card::Cat(CatKind::BeardCat),
        ]);
        let pairs: Vec<_> = hand.cat_pairs().collect();
        assert_eq!(pairs, vec![CatKind::Tacocat]);
    }

    #[test]
    fn test_take_random_empties_hand() {
        let mut hand = Hand::from_cards([Card::Skip, Card::Defuse, Card::Nope]);
        let mut rng = GameRng::new(3);
        let mut taken = Vec::new();
        while let Some(card) = hand.take_random(&mut rng) {
            taken.push(card);
        }
        taken.sort();
        assert_eq!(taken, vec![Card::Defuse, Card::Skip, Card::Nope]);
        assert!(hand.is_empty());
    }

    #[test]
    fn test_cards_iterates_copies() {
        let hand = Hand::from_cards([Card::Skip, Card::Skip, Card::Bomb]);
        assert_eq!(hand.cards().count(), 3);
    }
}
