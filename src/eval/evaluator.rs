//! Conditional Monte Carlo evaluation of one action in one situation.
//!
//! A trial deals a fresh game and plays it with the continuation policy
//! for every seat. The first time any decision classifies to the target
//! trigger, that seat plays the candidate instead; the rest of the game
//! (that seat's later decisions included) follows the continuation again.
//! The trial counts as a win if that seat is among the winners.
//!
//! Games that never reach the trigger are thrown away, as are games where
//! an action turns out illegal. Nothing is reweighted.
//!
//! Attempts are split across `EvalConfig::batches` batches run with rayon.
//! Attempt `a` of batch `b` always uses `GameRng::for_trial(seed, b, a)`,
//! so the result is the same on any number of threads, and every candidate
//! evaluated with the same seed sees the same games up to the point of
//! arrival.

use rayon::prelude::*;

use crate::core::{Action, ConfigError, GameConfig, GameRng, GameState, Seat, SimError};
use crate::policy::Policy;
use crate::rules::{Controller, Decision, Engine};
use crate::triggers::Trigger;

use super::config::EvalConfig;
use super::stats::Estimate;

/// Plays the continuation, swapping in the candidate on first arrival.
struct Branch<'a> {
    target: Trigger,
    candidate: Action,
    continuation: &'a dyn Policy,
    arrived: Option<Seat>,
}

impl Controller for Branch<'_> {
    fn decide(&mut self, decision: &Decision<'_>, rng: &mut GameRng) -> Action {
        if self.arrived.is_none() && decision.trigger == self.target {
            self.arrived = Some(decision.seat);
            return self.candidate;
        }
        self.continuation.choose_action(decision, rng)
    }
}

/// Plays the continuation and snapshots the state on first arrival.
struct Recorder<'a> {
    target: Trigger,
    continuation: &'a dyn Policy,
    snapshot: Option<GameState>,
}

impl Controller for Recorder<'_> {
    fn decide(&mut self, decision: &Decision<'_>, rng: &mut GameRng) -> Action {
        if self.snapshot.is_none() && decision.trigger == self.target {
            self.snapshot = Some(decision.state.clone());
        }
        self.continuation.choose_action(decision, rng)
    }
}

/// States that reached a trigger, and how many games it took.
#[derive(Clone, Debug, Default)]
pub struct Arrivals {
    /// Snapshots taken at the decision point, before acting.
    pub states: Vec<GameState>,
    /// Games dealt.
    pub attempts: u64,
}

impl Arrivals {
    /// Fraction of dealt games that reached the trigger.
    #[must_use]
    pub fn arrival_rate(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.states.len() as f64 / self.attempts as f64
        }
    }
}

/// Runs conditional trials for trigger/candidate pairs.
#[derive(Clone, Debug)]
pub struct Evaluator {
    game: GameConfig,
    engine: Engine,
    config: EvalConfig,
}

impl Evaluator {
    pub fn new(game: GameConfig, config: EvalConfig) -> Result<Self, ConfigError> {
        game.validate()?;
        config.validate()?;
        Ok(Self { engine: Engine::from_config(&game), game, config })
    }

    #[must_use]
    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    #[must_use]
    pub fn game(&self) -> &GameConfig {
        &self.game
    }

    /// Estimate the win rate of playing `candidate` at the first occurrence
    /// of `trigger`, over `trials` games that reach it.
    pub fn evaluate(
        &self,
        trigger: Trigger,
        candidate: Action,
        continuation: &dyn Policy,
        trials: u64,
        seed: u64,
    ) -> Result<Estimate, SimError> {
        let batches = self.config.batches as u64;

        let parts = (0..batches)
            .into_par_iter()
            .map(|batch| {
                let quota = share(trials, batches, batch);
                let budget = share(self.config.max_attempts, batches, batch);
                self.run_batch(trigger, candidate, continuation, quota, budget, seed, batch)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut total = Estimate::new();
        for part in &parts {
            total.merge(part);
        }
        total.low_confidence = total.trials < self.config.confidence_floor;

        log::debug!(
            "{trigger} / {candidate}: {}/{} won ({:.4}), {} attempts, {} unreached, {} illegal",
            total.wins,
            total.trials,
            total.win_rate(),
            total.attempts,
            total.rejected_unreached,
            total.rejected_illegal,
        );
        Ok(total)
    }

    #[allow(clippy::too_many_arguments)]
    fn run_batch(
        &self,
        trigger: Trigger,
        candidate: Action,
        continuation: &dyn Policy,
        quota: u64,
        budget: u64,
        seed: u64,
        batch: u64,
    ) -> Result<Estimate, SimError> {
        let mut est = Estimate::new();
        let mut attempt = 0;

        while est.trials < quota && attempt < budget {
            let mut rng = GameRng::for_trial(seed, batch, attempt);
            attempt += 1;
            est.attempts += 1;

            let mut state = self.engine.new_game(&self.game, &mut rng)?;
            let mut branch = Branch { target: trigger, candidate, continuation, arrived: None };

            match self.engine.play(&mut state, &mut branch, &mut rng) {
                Ok(result) => match branch.arrived {
                    Some(seat) => {
                        est.trials += 1;
                        if result.is_winner(seat) {
                            est.wins += 1;
                        }
                    }
                    None => est.rejected_unreached += 1,
                },
                Err(SimError::IllegalAction { seat, action }) => {
                    log::trace!("rejecting trial: {seat} cannot play {action} at turn {}", state.turn);
                    est.rejected_illegal += 1;
                }
                Err(err) => return Err(err),
            }
        }
        Ok(est)
    }

    /// Deal games under `continuation` until `samples` of them reach
    /// `trigger`, returning the state at each arrival.
    ///
    /// Uses the same per-attempt streams as batch 0 of [`Evaluator::evaluate`].
    pub fn sample_arrivals(
        &self,
        trigger: Trigger,
        samples: usize,
        continuation: &dyn Policy,
        seed: u64,
    ) -> Result<Arrivals, SimError> {
        let mut arrivals = Arrivals::default();

        while arrivals.states.len() < samples && arrivals.attempts < self.config.max_attempts {
            let mut rng = GameRng::for_trial(seed, 0, arrivals.attempts);
            arrivals.attempts += 1;

            let mut state = self.engine.new_game(&self.game, &mut rng)?;
            let mut recorder = Recorder { target: trigger, continuation, snapshot: None };
            self.engine.play(&mut state, &mut recorder, &mut rng)?;

            if let Some(snapshot) = recorder.snapshot {
                arrivals.states.push(snapshot);
            }
        }
        Ok(arrivals)
    }
}

/// Part `index` of `total` split over `parts`, remainder to the first parts.
fn share(total: u64, parts: u64, index: u64) -> u64 {
    total / parts + u64::from(index < total % parts)
}
