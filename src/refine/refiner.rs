//! Multi-pass policy refinement.
//!
//! A pass evaluates every candidate of every configured trigger against a
//! fixed continuation and keeps the best one per trigger. Pass 1 uses the
//! default policy as continuation; pass k uses pass k-1's table (falling
//! back to the default where it has no usable entry). Later passes
//! therefore judge each action against competent play elsewhere.
//!
//! ## Selection
//!
//! The candidate with the highest win rate is the reference. Every
//! candidate within `tie_z` standard errors of it (of the difference) is a
//! contender, and the contender earliest in [`Action::precedence`] wins.
//!
//! ## Seeds
//!
//! All candidates of one trigger in one pass share a seed, so they are
//! compared on the same dealt games. Re-running a pass with the same
//! inputs reproduces its table exactly.

use rustc_hash::FxHashMap;

use crate::core::{mix_seed, Action, ConfigError, SimError};
use crate::eval::{Estimate, Evaluator};
use crate::policy::{Confidence, Policy, PolicyEntry, PolicyTable, TablePolicy};
use crate::triggers::Trigger;

use super::config::RefineConfig;

/// One pass's table and the estimates behind it.
#[derive(Clone, Debug)]
pub struct PassReport {
    /// 1-based pass number.
    pub pass: usize,
    pub table: PolicyTable,
    /// Per trigger, every candidate with its estimate, in candidate order.
    pub estimates: FxHashMap<Trigger, Vec<(Action, Estimate)>>,
}

/// Result of a refinement run.
#[derive(Clone, Debug)]
pub struct Refinement {
    /// Table from the last pass run.
    pub table: PolicyTable,
    /// Every pass, in order.
    pub passes: Vec<PassReport>,
    /// Base seed actually used.
    pub seed: u64,
    /// The last pass changed no chosen action.
    pub converged: bool,
}

impl Refinement {
    /// Triggers whose final entry is flagged low confidence.
    #[must_use]
    pub fn low_confidence(&self) -> Vec<Trigger> {
        self.table.low_confidence()
    }
}

/// Drives the evaluator over all triggers, pass after pass.
#[derive(Clone, Debug)]
pub struct Refiner {
    config: RefineConfig,
    evaluator: Evaluator,
    seed: u64,
}

impl Refiner {
    pub fn new(config: RefineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let evaluator = Evaluator::new(config.game_config(), config.eval.clone())?;
        let seed = config.seed.unwrap_or_else(|| {
            let seed = rand::random();
            log::info!("no seed given, using {seed}");
            seed
        });
        Ok(Self { config, evaluator, seed })
    }

    #[must_use]
    pub fn config(&self) -> &RefineConfig {
        &self.config
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Run up to `passes` passes.
    pub fn run(&self) -> Result<Refinement, SimError> {
        let mut passes: Vec<PassReport> = Vec::with_capacity(self.config.passes);
        let mut converged = false;

        for pass in 1..=self.config.passes {
            let previous = passes.last().map(|p| &p.table);
            let report = self.run_pass(pass, previous)?;

            if let Some(previous) = previous {
                let changed = previous.diff(&report.table);
                log::info!("pass {pass}: {} triggers changed action", changed.len());
                converged = changed.is_empty();
            }
            passes.push(report);

            if converged && self.config.stop_when_stable {
                log::info!("policy stable after pass {pass}, stopping");
                break;
            }
        }

        let table = passes.last().map(|p| p.table.clone()).unwrap_or_default();
        Ok(Refinement { table, passes, seed: self.seed, converged })
    }

    /// Run one pass. `previous` is the table the continuation plays; `None`
    /// plays the default policy everywhere.
    pub fn run_pass(&self, pass: usize, previous: Option<&PolicyTable>) -> Result<PassReport, SimError> {
        let fallback = self.config.default_policy;
        match previous {
            Some(table) => {
                let continuation = TablePolicy::new(table.clone(), fallback);
                self.sweep(pass, &continuation)
            }
            None => self.sweep(pass, &fallback),
        }
    }

    fn sweep(&self, pass: usize, continuation: &dyn Policy) -> Result<PassReport, SimError> {
        log::info!(
            "pass {pass}: {} triggers, {} trials per action, continuation {}",
            self.config.triggers.len(),
            self.config.trials_per_action,
            continuation.name(),
        );

        let mut table = PolicyTable::new();
        let mut estimates = FxHashMap::default();

        for &trigger in &self.config.triggers {
            let seed = self.trigger_seed(pass, trigger);
            let mut results = Vec::new();
            for candidate in trigger.candidates() {
                let est = self.evaluator.evaluate(
                    trigger,
                    candidate,
                    continuation,
                    self.config.trials_per_action,
                    seed,
                )?;
                results.push((candidate, est));
            }

            match select(&results, self.config.tie_z) {
                Some(entry) => {
                    if entry.confidence.tie_broken {
                        log::info!(
                            "{trigger}: candidates within noise of the best, chose {} by precedence",
                            entry.action
                        );
                    }
                    if entry.confidence.low_confidence {
                        log::warn!(
                            "{trigger}: {} samples for {} is below the confidence floor",
                            entry.confidence.samples,
                            entry.action
                        );
                    }
                    table.insert(trigger, entry);
                }
                None => log::warn!("{trigger}: never reached with a legal candidate, left unresolved"),
            }
            estimates.insert(trigger, results);
        }

        log::info!(
            "pass {pass}: {}/{} triggers resolved, {} low confidence",
            table.resolved(),
            self.config.triggers.len(),
            table.low_confidence().len(),
        );
        Ok(PassReport { pass, table, estimates })
    }

    /// Seed shared by every candidate of `trigger` in `pass`.
    fn trigger_seed(&self, pass: usize, trigger: Trigger) -> u64 {
        let key = ((pass as u64) << 8) | trigger.index() as u64;
        mix_seed(self.seed ^ mix_seed(key))
    }
}

/// Pick the entry for one trigger from its candidates' estimates.
///
/// Candidates without trials are ignored. Returns `None` if none remain.
#[must_use]
pub fn select(results: &[(Action, Estimate)], tie_z: f64) -> Option<PolicyEntry> {
    let tested: Vec<&(Action, Estimate)> = results.iter().filter(|(_, e)| e.trials > 0).collect();

    let (_, best) = tested.iter().copied().max_by(|(a, ea), (b, eb)| {
        ea.win_rate()
            .total_cmp(&eb.win_rate())
            .then_with(|| b.precedence().cmp(&a.precedence()))
    })?;

    let contenders: Vec<&(Action, Estimate)> = tested
        .iter()
        .copied()
        .filter(|(_, e)| e.indistinguishable(best, tie_z))
        .collect();
    let (action, est) = contenders.iter().copied().min_by_key(|(a, _)| a.precedence())?;

    let rates = tested.iter().map(|(_, e)| e.win_rate());
    let hi = rates.clone().fold(f64::NEG_INFINITY, f64::max);
    let lo = rates.fold(f64::INFINITY, f64::min);

    Some(PolicyEntry {
        action: *action,
        confidence: Confidence {
            samples: est.trials,
            win_rate: est.win_rate(),
            spread: hi - lo,
            low_confidence: est.low_confidence,
            tie_broken: contenders.len() > 1,
        },
    })
}

/// Run a full refinement.
///
/// ```no_run
/// use kittens_mc::refine::{simulate, RefineConfig};
///
/// let result = simulate(&RefineConfig::new(4).with_trials(10_000).with_seed(7)).unwrap();
/// for (trigger, entry) in result.table.iter() {
///     println!("{trigger}: {} ({:.3})", entry.action, entry.confidence.win_rate);
/// }
/// ```
pub fn simulate(config: &RefineConfig) -> Result<Refinement, SimError> {
    Refiner::new(config.clone())?.run()
}
