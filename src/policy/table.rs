//! Trigger → action lookup table and the policy that plays it.

use serde::{Deserialize, Serialize};

use crate::core::{Action, GameRng, TableError};
use crate::rules::Decision;
use crate::triggers::{Trigger, TRIGGER_COUNT};

use super::Policy;

/// How much an entry can be trusted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Confidence {
    /// Trials behind the chosen action's estimate.
    pub samples: u64,
    /// Estimated win rate of the chosen action.
    pub win_rate: f64,
    /// Best minus worst win rate across the tested candidates.
    pub spread: f64,
    /// Fewer samples than the confidence floor.
    pub low_confidence: bool,
    /// Chosen by precedence among statistically tied candidates.
    pub tie_broken: bool,
}

/// Resolved decision for one trigger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolicyEntry {
    pub action: Action,
    pub confidence: Confidence,
}

/// One optional entry per trigger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolicyTable {
    entries: Vec<Option<PolicyEntry>>,
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyTable {
    /// Empty table: every trigger unresolved.
    #[must_use]
    pub fn new() -> Self {
        Self { entries: vec![None; TRIGGER_COUNT] }
    }

    /// The learned action for `trigger`, if resolved.
    #[must_use]
    pub fn lookup(&self, trigger: Trigger) -> Option<Action> {
        self.entry(trigger).map(|e| e.action)
    }

    #[must_use]
    pub fn entry(&self, trigger: Trigger) -> Option<&PolicyEntry> {
        self.entries[trigger.index()].as_ref()
    }

    pub fn insert(&mut self, trigger: Trigger, entry: PolicyEntry) {
        self.entries[trigger.index()] = Some(entry);
    }

    pub fn remove(&mut self, trigger: Trigger) -> Option<PolicyEntry> {
        self.entries[trigger.index()].take()
    }

    /// Number of resolved triggers.
    #[must_use]
    pub fn resolved(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    /// Resolved entries in trigger order.
    pub fn iter(&self) -> impl Iterator<Item = (Trigger, &PolicyEntry)> + '_ {
        Trigger::all()
            .into_iter()
            .zip(self.entries.iter())
            .filter_map(|(t, e)| e.as_ref().map(|e| (t, e)))
    }

    /// Triggers whose chosen action differs (resolved vs unresolved counts).
    #[must_use]
    pub fn diff(&self, other: &PolicyTable) -> Vec<Trigger> {
        Trigger::all()
            .into_iter()
            .filter(|&t| self.lookup(t) != other.lookup(t))
            .collect()
    }

    /// Triggers flagged low confidence.
    #[must_use]
    pub fn low_confidence(&self) -> Vec<Trigger> {
        self.iter()
            .filter(|(_, e)| e.confidence.low_confidence)
            .map(|(t, _)| t)
            .collect()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, TableError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TableError> {
        let table: PolicyTable = bincode::deserialize(bytes)?;
        if table.entries.len() != TRIGGER_COUNT {
            return Err(TableError::WrongLength(table.entries.len()));
        }
        Ok(table)
    }
}

/// Plays a table, deferring to `fallback` where the table has no usable
/// entry.
///
/// An entry is unusable when the trigger is unresolved or when its action
/// is not legal here (a Defused entry asking for a depth past the bottom).
#[derive(Clone, Debug)]
pub struct TablePolicy<F> {
    table: PolicyTable,
    fallback: F,
}

impl<F: Policy> TablePolicy<F> {
    #[must_use]
    pub fn new(table: PolicyTable, fallback: F) -> Self {
        Self { table, fallback }
    }

    #[must_use]
    pub fn table(&self) -> &PolicyTable {
        &self.table
    }
}

impl<F: Policy> Policy for TablePolicy<F> {
    fn choose_action(&self, decision: &Decision<'_>, rng: &mut GameRng) -> Action {
        match self.table.lookup(decision.trigger) {
            Some(action) if decision.is_legal(action) => action,
            _ => self.fallback.choose_action(decision, rng),
        }
    }

    fn name(&self) -> &'static str {
        "table"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CatKind, Deck, Hand};
    use crate::core::{GameState, Seat};
    use crate::policy::UniformRandom;
    use crate::triggers::classify;

    fn entry(action: Action) -> PolicyEntry {
        PolicyEntry {
            action,
            confidence: Confidence {
                samples: 100,
                win_rate: 0.5,
                spread: 0.1,
                low_confidence: true,
                tie_broken: false,
            },
        }
    }

    fn endgame_state() -> GameState {
        GameState::from_parts(
            Deck::from_top([Card::Cat(CatKind::BeardCat); 6]),
            vec![Hand::from_cards([Card::Skip]), Hand::new()],
        )
    }

    #[test]
    fn test_insert_lookup_remove() {
        let trigger = Trigger::EndgameSafeTop { escape: true };
        let mut table = PolicyTable::new();
        assert_eq!(table.lookup(trigger), None);

        table.insert(trigger, entry(Action::Draw));
        assert_eq!(table.lookup(trigger), Some(Action::Draw));
        assert_eq!(table.resolved(), 1);
        assert_eq!(table.low_confidence(), vec![trigger]);

        assert!(table.remove(trigger).is_some());
        assert_eq!(table.resolved(), 0);
    }

    #[test]
    fn test_diff() {
        let a_trigger = Trigger::Proactive { phase: crate::triggers::GamePhase::Late };
        let b_trigger = Trigger::HeavyAttack { holding: crate::triggers::HeavyHolding::Attack };
        let mut a = PolicyTable::new();
        let mut b = PolicyTable::new();
        a.insert(a_trigger, entry(Action::Attack));
        b.insert(a_trigger, entry(Action::Attack));
        b.insert(b_trigger, entry(Action::Attack));

        assert_eq!(a.diff(&b), vec![b_trigger]);
        assert!(a.diff(&a).is_empty());
    }

    #[test]
    fn test_bytes_roundtrip() {
        let mut table = PolicyTable::new();
        table.insert(Trigger::EndgameSafeTop { escape: false }, entry(Action::Draw));
        let bytes = table.to_bytes().unwrap();
        assert_eq!(PolicyTable::from_bytes(&bytes).unwrap(), table);
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(PolicyTable::from_bytes(&[1, 2, 3]).is_err());
    }

    #[test]
    fn test_table_policy_uses_entry() {
        let state = endgame_state();
        let trigger = classify(&state, Seat(0)).unwrap();
        let mut table = PolicyTable::new();
        table.insert(trigger, entry(Action::Skip));

        let legal = [Action::Draw, Action::Skip];
        let decision = Decision { state: &state, seat: Seat(0), trigger, legal: &legal };
        let policy = TablePolicy::new(table, UniformRandom);
        let mut rng = GameRng::new(1);
        for _ in 0..20 {
            assert_eq!(policy.choose_action(&decision, &mut rng), Action::Skip);
        }
    }

    #[test]
    fn test_table_policy_falls_back_on_illegal_entry() {
        let state = endgame_state();
        let trigger = classify(&state, Seat(0)).unwrap();
        let mut table = PolicyTable::new();
        table.insert(trigger, entry(Action::Attack));

        let legal = [Action::Draw, Action::Skip];
        let decision = Decision { state: &state, seat: Seat(0), trigger, legal: &legal };
        let policy = TablePolicy::new(table, UniformRandom);
        let mut rng = GameRng::new(1);
        for _ in 0..20 {
            assert!(legal.contains(&policy.choose_action(&decision, &mut rng)));
        }
    }
}
