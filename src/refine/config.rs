//! Refinement run configuration.

use serde::{Deserialize, Serialize};

use crate::core::{ConfigError, GameConfig, InteractionRules, MAX_PLAYERS, MIN_PLAYERS};
use crate::eval::EvalConfig;
use crate::policy::DefaultPolicy;
use crate::triggers::Trigger;

/// Configuration for a refinement run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RefineConfig {
    /// Players at the table (2..=5).
    pub player_count: usize,

    /// Trials collected per trigger/candidate pair.
    pub trials_per_action: u64,

    /// Base seed. `None` draws one at random; the seed used is reported
    /// in the result.
    pub seed: Option<u64>,

    /// Upper bound on passes. Pass 1 plays the default policy, each later
    /// pass plays the previous pass's table.
    pub passes: usize,

    /// Stop early once a pass leaves every chosen action unchanged.
    pub stop_when_stable: bool,

    /// Standard errors within which two candidates count as tied.
    pub tie_z: f64,

    /// Continuation for pass 1 and fallback for unresolved triggers.
    pub default_policy: DefaultPolicy,

    /// Interactive card capabilities.
    pub rules: InteractionRules,

    /// Confidence floor, attempt ceiling, batches.
    pub eval: EvalConfig,

    /// Triggers to resolve, in order. All 64 by default.
    pub triggers: Vec<Trigger>,

    /// Full game setup replacing the standard deal for `player_count`.
    pub custom_game: Option<GameConfig>,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            player_count: 4,
            trials_per_action: 10_000,
            seed: None,
            passes: 2,
            stop_when_stable: true,
            tie_z: 1.96,
            default_policy: DefaultPolicy::Baseline,
            rules: InteractionRules::default(),
            eval: EvalConfig::default(),
            triggers: Trigger::all(),
            custom_game: None,
        }
    }
}

impl RefineConfig {
    /// Standard game for `player_count` players, everything else default.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self { player_count, ..Self::default() }
    }

    #[must_use]
    pub fn with_trials(mut self, trials: u64) -> Self {
        self.trials_per_action = trials;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_passes(mut self, passes: usize) -> Self {
        self.passes = passes;
        self
    }

    #[must_use]
    pub fn with_stop_when_stable(mut self, stop: bool) -> Self {
        self.stop_when_stable = stop;
        self
    }

    #[must_use]
    pub fn with_tie_z(mut self, z: f64) -> Self {
        self.tie_z = z;
        self
    }

    #[must_use]
    pub fn with_default_policy(mut self, policy: DefaultPolicy) -> Self {
        self.default_policy = policy;
        self
    }

    #[must_use]
    pub fn with_rules(mut self, rules: InteractionRules) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn with_eval(mut self, eval: EvalConfig) -> Self {
        self.eval = eval;
        self
    }

    /// Restrict the run to some triggers.
    #[must_use]
    pub fn with_triggers(mut self, triggers: impl IntoIterator<Item = Trigger>) -> Self {
        self.triggers = triggers.into_iter().collect();
        self
    }

    /// Use a custom deal. Player count and rules follow `game`.
    #[must_use]
    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.player_count = game.player_count;
        self.rules = game.rules;
        self.custom_game = Some(game);
        self
    }

    /// Game setup for every trial.
    #[must_use]
    pub fn game_config(&self) -> GameConfig {
        self.custom_game
            .clone()
            .unwrap_or_else(|| GameConfig::standard(self.player_count).with_rules(self.rules))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(ConfigError::PlayerCount(self.player_count));
        }
        if self.trials_per_action == 0 {
            return Err(ConfigError::NoTrials);
        }
        if self.passes == 0 {
            return Err(ConfigError::NoPasses);
        }
        if !self.tie_z.is_finite() || self.tie_z < 0.0 {
            return Err(ConfigError::Invalid {
                name: "tie_z",
                reason: format!("{} is not a non-negative number", self.tie_z),
            });
        }
        self.eval.validate()?;
        self.game_config().validate()
    }
}
