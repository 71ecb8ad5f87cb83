//! The 64 decision situations.
//!
//! A `Trigger` is recomputed from a state at every decision point and is
//! never stored as identity. Each family keys on the few facts that matter
//! for its decision:
//!
//! | Family | Count | Keys |
//! |---|---|---|
//! | Bomb Visible | 12 | depth × holding × Defuse |
//! | Bomb Unknown | 16 | risk × escape × Defuse |
//! | See Future | 6 | risk × escape |
//! | Under Attack | 11 | double: Skip × Attack × Defuse; heavy: holding |
//! | Defused | 4 | heads-up × next seat holds Defuse |
//! | Proactive | 5 | deck phase |
//! | Endgame | 10 | blind: Defuse × opponent Defuse × escape; safe top: escape |
//!
//! `index()` packs every trigger into `0..64` in the table order above.

use serde::{Deserialize, Serialize};

use crate::core::{Action, ActionList};

/// Number of triggers.
pub const TRIGGER_COUNT: usize = 64;

/// Where the seen bomb sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BombDepth {
    Top,
    Second,
}

/// Best evasive card in hand, Skip first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Holding {
    Skip,
    /// Attack or Shuffle, no Skip.
    OtherAction,
    Nothing,
}

/// Chance the next draw is a bomb.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Risk {
    /// Under 15%.
    Low,
    /// 15% to 30%.
    Medium,
    /// Over 30%, under 50%.
    High,
    /// 50% or more.
    Critical,
}

impl Risk {
    #[must_use]
    pub fn from_probability(p: f64) -> Self {
        if p < 0.15 {
            Risk::Low
        } else if p <= 0.30 {
            Risk::Medium
        } else if p < 0.50 {
            Risk::High
        } else {
            Risk::Critical
        }
    }
}

/// Risk as seen when deciding on See the Future. Same cut points, no
/// critical band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FutureRisk {
    Low,
    Medium,
    High,
}

impl FutureRisk {
    #[must_use]
    pub fn from_probability(p: f64) -> Self {
        match Risk::from_probability(p) {
            Risk::Low => FutureRisk::Low,
            Risk::Medium => FutureRisk::Medium,
            Risk::High | Risk::Critical => FutureRisk::High,
        }
    }
}

/// Best answer to three or more owed draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeavyHolding {
    Attack,
    SkipOnly,
    Nothing,
}

/// Game phase by fraction of the dealt pile still undrawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// More than 80% left.
    Opening,
    /// 60% to 80%.
    Early,
    /// 40% to 60%.
    Middle,
    /// 20% to 40%.
    Late,
    /// 20% or less.
    Final,
}

impl GamePhase {
    #[must_use]
    pub fn from_remaining(fraction: f64) -> Self {
        if fraction > 0.8 {
            GamePhase::Opening
        } else if fraction > 0.6 {
            GamePhase::Early
        } else if fraction > 0.4 {
            GamePhase::Middle
        } else if fraction > 0.2 {
            GamePhase::Late
        } else {
            GamePhase::Final
        }
    }
}

/// Trigger families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    BombVisible,
    BombUnknown,
    SeeFuture,
    UnderAttack,
    Defused,
    Proactive,
    Endgame,
}

impl Category {
    /// Triggers in this family.
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            Category::BombVisible => 12,
            Category::BombUnknown => 16,
            Category::SeeFuture => 6,
            Category::UnderAttack => 11,
            Category::Defused => 4,
            Category::Proactive => 5,
            Category::Endgame => 10,
        }
    }
}

/// One classified decision situation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trigger {
    /// A bomb is known to be on top or second.
    BombVisible { depth: BombDepth, holding: Holding, defuse: bool },
    /// Top unknown, three or more alive, no See the Future in hand.
    BombUnknown { risk: Risk, escape: bool, defuse: bool },
    /// Top unknown, holding See the Future.
    SeeFuture { risk: FutureRisk, escape: bool },
    /// Exactly two draws owed.
    DoubleAttack { skip: bool, attack: bool, defuse: bool },
    /// Three or more draws owed.
    HeavyAttack { holding: HeavyHolding },
    /// Holding a drawn bomb, choosing where it goes back.
    Defused { heads_up: bool, next_has_defuse: bool },
    /// Top known safe, three or more alive.
    Proactive { phase: GamePhase },
    /// Two alive, top unknown.
    EndgameBlind { defuse: bool, opponent_defuse: bool, escape: bool },
    /// Two alive, top known safe.
    EndgameSafeTop { escape: bool },
}

const RISKS: [Risk; 4] = [Risk::Low, Risk::Medium, Risk::High, Risk::Critical];
const FUTURE_RISKS: [FutureRisk; 3] = [FutureRisk::Low, FutureRisk::Medium, FutureRisk::High];
const HOLDINGS: [Holding; 3] = [Holding::Skip, Holding::OtherAction, Holding::Nothing];
const HEAVY: [HeavyHolding; 3] = [HeavyHolding::Attack, HeavyHolding::SkipOnly, HeavyHolding::Nothing];
const PHASES: [GamePhase; 5] = [
    GamePhase::Opening,
    GamePhase::Early,
    GamePhase::Middle,
    GamePhase::Late,
    GamePhase::Final,
];
const BOOLS: [bool; 2] = [false, true];

impl Trigger {
    /// Every trigger, ordered by `index()`.
    #[must_use]
    pub fn all() -> Vec<Trigger> {
        let mut all = Vec::with_capacity(TRIGGER_COUNT);
        for depth in [BombDepth::Top, BombDepth::Second] {
            for holding in HOLDINGS {
                for defuse in BOOLS {
                    all.push(Trigger::BombVisible { depth, holding, defuse });
                }
            }
        }
        for risk in RISKS {
            for escape in BOOLS {
                for defuse in BOOLS {
                    all.push(Trigger::BombUnknown { risk, escape, defuse });
                }
            }
        }
        for risk in FUTURE_RISKS {
            for escape in BOOLS {
                all.push(Trigger::SeeFuture { risk, escape });
            }
        }
        for skip in BOOLS {
            for attack in BOOLS {
                for defuse in BOOLS {
                    all.push(Trigger::DoubleAttack { skip, attack, defuse });
                }
            }
        }
        for holding in HEAVY {
            all.push(Trigger::HeavyAttack { holding });
        }
        for heads_up in BOOLS {
            for next_has_defuse in BOOLS {
                all.push(Trigger::Defused { heads_up, next_has_defuse });
            }
        }
        for phase in PHASES {
            all.push(Trigger::Proactive { phase });
        }
        for defuse in BOOLS {
            for opponent_defuse in BOOLS {
                for escape in BOOLS {
                    all.push(Trigger::EndgameBlind { defuse, opponent_defuse, escape });
                }
            }
        }
        for escape in BOOLS {
            all.push(Trigger::EndgameSafeTop { escape });
        }
        all
    }

    /// Dense index in `0..64`.
    #[must_use]
    pub fn index(self) -> usize {
        let b = usize::from;
        match self {
            Trigger::BombVisible { depth, holding, defuse } => {
                let d = match depth {
                    BombDepth::Top => 0,
                    BombDepth::Second => 1,
                };
                d * 6 + holding as usize * 2 + b(defuse)
            }
            Trigger::BombUnknown { risk, escape, defuse } => {
                12 + risk as usize * 4 + b(escape) * 2 + b(defuse)
            }
            Trigger::SeeFuture { risk, escape } => 28 + risk as usize * 2 + b(escape),
            Trigger::DoubleAttack { skip, attack, defuse } => {
                34 + b(skip) * 4 + b(attack) * 2 + b(defuse)
            }
            Trigger::HeavyAttack { holding } => 42 + holding as usize,
            Trigger::Defused { heads_up, next_has_defuse } => 45 + b(heads_up) * 2 + b(next_has_defuse),
            Trigger::Proactive { phase } => 49 + phase as usize,
            Trigger::EndgameBlind { defuse, opponent_defuse, escape } => {
                54 + b(defuse) * 4 + b(opponent_defuse) * 2 + b(escape)
            }
            Trigger::EndgameSafeTop { escape } => 62 + b(escape),
        }
    }

    /// Inverse of `index()`.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Trigger> {
        Self::all().get(index).copied()
    }

    #[must_use]
    pub fn category(self) -> Category {
        match self {
            Trigger::BombVisible { .. } => Category::BombVisible,
            Trigger::BombUnknown { .. } => Category::BombUnknown,
            Trigger::SeeFuture { .. } => Category::SeeFuture,
            Trigger::DoubleAttack { .. } | Trigger::HeavyAttack { .. } => Category::UnderAttack,
            Trigger::Defused { .. } => Category::Defused,
            Trigger::Proactive { .. } => Category::Proactive,
            Trigger::EndgameBlind { .. } | Trigger::EndgameSafeTop { .. } => Category::Endgame,
        }
    }

    /// Actions worth comparing in this situation.
    ///
    /// The key guarantees some cards are held; others (such as Attack in a
    /// Skip holding) may or may not be. A candidate that turns out illegal
    /// at arrival is rejected by the evaluator.
    #[must_use]
    pub fn candidates(self) -> ActionList {
        let mut out = ActionList::new();
        out.push(Action::Draw);
        match self {
            Trigger::BombVisible { holding, .. } => match holding {
                Holding::Skip => out.extend([Action::Skip, Action::Attack, Action::Shuffle]),
                Holding::OtherAction => out.extend([Action::Attack, Action::Shuffle]),
                Holding::Nothing => {}
            },
            Trigger::BombUnknown { escape, .. }
            | Trigger::EndgameBlind { escape, .. }
            | Trigger::EndgameSafeTop { escape } => {
                if escape {
                    out.extend([Action::Skip, Action::Attack]);
                }
            }
            Trigger::SeeFuture { escape, .. } => {
                out.push(Action::SeeFuture);
                if escape {
                    out.extend([Action::Skip, Action::Attack]);
                }
            }
            Trigger::DoubleAttack { skip, attack, .. } => {
                if skip {
                    out.push(Action::Skip);
                }
                if attack {
                    out.push(Action::Attack);
                }
            }
            Trigger::HeavyAttack { holding } => match holding {
                HeavyHolding::Attack => out.extend([Action::Attack, Action::Skip]),
                HeavyHolding::SkipOnly => out.push(Action::Skip),
                HeavyHolding::Nothing => {}
            },
            Trigger::Defused { .. } => {
                out.clear();
                out.extend([
                    Action::PlaceBombTop,
                    Action::PlaceBombPosition(1),
                    Action::PlaceBombPosition(2),
                    Action::PlaceBombBottom,
                    Action::UseDefuse,
                ]);
            }
            Trigger::Proactive { .. } => out.extend([Action::Attack, Action::Skip]),
        }
        out
    }

    /// Short stable label, e.g. `bomb-visible/top/skip/defuse`.
    #[must_use]
    pub fn label(self) -> String {
        let flag = |on: bool, name: &str| if on { name.to_string() } else { format!("no-{name}") };
        match self {
            Trigger::BombVisible { depth, holding, defuse } => format!(
                "bomb-visible/{}/{}/{}",
                match depth {
                    BombDepth::Top => "top",
                    BombDepth::Second => "second",
                },
                match holding {
                    Holding::Skip => "skip",
                    Holding::OtherAction => "other-action",
                    Holding::Nothing => "nothing",
                },
                flag(defuse, "defuse"),
            ),
            Trigger::BombUnknown { risk, escape, defuse } => format!(
                "bomb-unknown/{}/{}/{}",
                format!("{risk:?}").to_lowercase(),
                flag(escape, "escape"),
                flag(defuse, "defuse"),
            ),
            Trigger::SeeFuture { risk, escape } => format!(
                "see-future/{}/{}",
                format!("{risk:?}").to_lowercase(),
                flag(escape, "escape"),
            ),
            Trigger::DoubleAttack { skip, attack, defuse } => format!(
                "attacked-x2/{}/{}/{}",
                flag(skip, "skip"),
                flag(attack, "attack"),
                flag(defuse, "defuse"),
            ),
            Trigger::HeavyAttack { holding } => format!(
                "attacked-x3+/{}",
                match holding {
                    HeavyHolding::Attack => "attack",
                    HeavyHolding::SkipOnly => "skip-only",
                    HeavyHolding::Nothing => "nothing",
                }
            ),
            Trigger::Defused { heads_up, next_has_defuse } => format!(
                "defused/{}/{}",
                if heads_up { "heads-up" } else { "multiway" },
                flag(next_has_defuse, "next-defuse"),
            ),
            Trigger::Proactive { phase } => {
                format!("proactive/{}", format!("{phase:?}").to_lowercase())
            }
            Trigger::EndgameBlind { defuse, opponent_defuse, escape } => format!(
                "endgame-blind/{}/{}/{}",
                flag(defuse, "defuse"),
                flag(opponent_defuse, "opp-defuse"),
                flag(escape, "escape"),
            ),
            Trigger::EndgameSafeTop { escape } => {
                format!("endgame-safe-top/{}", flag(escape, "escape"))
            }
        }
    }
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}
