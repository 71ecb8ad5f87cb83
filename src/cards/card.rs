//! Card vocabulary.

use serde::{Deserialize, Serialize};

/// Filler cat cards. Two of a kind can be played as a pair to steal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CatKind {
    Tacocat,
    Cattermelon,
    HairyPotato,
    BeardCat,
    RainbowCat,
}

impl CatKind {
    /// All cat kinds in a stable order.
    pub const ALL: [CatKind; 5] = [
        CatKind::Tacocat,
        CatKind::Cattermelon,
        CatKind::HairyPotato,
        CatKind::BeardCat,
        CatKind::RainbowCat,
    ];
}

/// A single card. Cards are plain values; a deck or hand owns copies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Card {
    Bomb,
    Defuse,
    Attack,
    Skip,
    Favor,
    Shuffle,
    SeeFuture,
    Nope,
    Cat(CatKind),
}

impl Card {
    /// Number of distinct card kinds, cat kinds counted separately.
    pub const KINDS: usize = 13;

    /// Every card kind, ordered by [`Card::kind_index`].
    pub const ALL: [Card; Card::KINDS] = [
        Card::Bomb,
        Card::Defuse,
        Card::Attack,
        Card::Skip,
        Card::Favor,
        Card::Shuffle,
        Card::SeeFuture,
        Card::Nope,
        Card::Cat(CatKind::Tacocat),
        Card::Cat(CatKind::Cattermelon),
        Card::Cat(CatKind::HairyPotato),
        Card::Cat(CatKind::BeardCat),
        Card::Cat(CatKind::RainbowCat),
    ];

    /// Dense index used by count-based containers.
    #[must_use]
    pub const fn kind_index(self) -> usize {
        match self {
            Card::Bomb => 0,
            Card::Defuse => 1,
            Card::Attack => 2,
            Card::Skip => 3,
            Card::Favor => 4,
            Card::Shuffle => 5,
            Card::SeeFuture => 6,
            Card::Nope => 7,
            Card::Cat(CatKind::Tacocat) => 8,
            Card::Cat(CatKind::Cattermelon) => 9,
            Card::Cat(CatKind::HairyPotato) => 10,
            Card::Cat(CatKind::BeardCat) => 11,
            Card::Cat(CatKind::RainbowCat) => 12,
        }
    }

    /// Attack, Skip and Shuffle: cards that change what the holder draws next.
    #[must_use]
    pub const fn is_evasive(self) -> bool {
        matches!(self, Card::Attack | Card::Skip | Card::Shuffle)
    }

    #[must_use]
    pub const fn is_cat(self) -> bool {
        matches!(self, Card::Cat(_))
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Card::Cat(kind) => write!(f, "{kind:?}"),
            Card::SeeFuture => write!(f, "See the Future"),
            Card::Bomb => write!(f, "Exploding Kitten"),
            other => write!(f, "{other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_index_matches_all() {
        for (i, card) in Card::ALL.iter().enumerate() {
            assert_eq!(card.kind_index(), i);
        }
    }

    #[test]
    fn test_evasive_cards() {
        assert!(Card::Attack.is_evasive());
        assert!(Card::Skip.is_evasive());
        assert!(Card::Shuffle.is_evasive());
        assert!(!Card::SeeFuture.is_evasive());
        assert!(!Card::Defuse.is_evasive());
    }

    #[test]
    fn test_display() {
        assert_eq!(Card::Bomb.to_string(), "Exploding Kitten");
        assert_eq!(Card::Cat(CatKind::Tacocat).to_string(), "Tacocat");
        assert_eq!(Card::Skip.to_string(), "Skip");
    }
}
