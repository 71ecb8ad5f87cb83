//! Win-rate estimates for diagnostics and policy selection.

use serde::{Deserialize, Serialize};

/// Aggregated trials for one trigger/candidate pair.
///
/// Counters combine by summation, so batches may be merged in any order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estimate {
    /// Trials the evaluated seat won.
    pub wins: u64,

    /// Games that reached the trigger and were played out.
    pub trials: u64,

    /// Games started, including rejected ones.
    pub attempts: u64,

    /// Games discarded because the trigger never occurred.
    pub rejected_unreached: u64,

    /// Games discarded because the candidate (or a continuation action)
    /// was illegal.
    pub rejected_illegal: u64,

    /// Fewer trials than the confidence floor.
    pub low_confidence: bool,
}

impl Estimate {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add another batch's counters.
    pub fn merge(&mut self, other: &Estimate) {
        self.wins += other.wins;
        self.trials += other.trials;
        self.attempts += other.attempts;
        self.rejected_unreached += other.rejected_unreached;
        self.rejected_illegal += other.rejected_illegal;
    }

    /// Wins over trials; zero with no trials.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.wins as f64 / self.trials as f64
        }
    }

    /// Standard error of the win rate, taken at the plus-four proportion
    /// `(wins + 2) / (trials + 4)`.
    ///
    /// Positive for any sample, so an all-win or all-loss run is never
    /// treated as exact. Infinite with no trials.
    #[must_use]
    pub fn std_error(&self) -> f64 {
        if self.trials == 0 {
            return f64::INFINITY;
        }
        let n = self.trials as f64 + 4.0;
        let p = (self.wins as f64 + 2.0) / n;
        (p * (1.0 - p) / n).sqrt()
    }

    /// Wilson score interval at `z`, within [0, 1].
    #[must_use]
    pub fn interval(&self, z: f64) -> (f64, f64) {
        if self.trials == 0 {
            return (0.0, 1.0);
        }
        let n = self.trials as f64;
        let p = self.win_rate();
        let z2 = z * z;
        let scale = 1.0 + z2 / n;
        let center = (p + z2 / (2.0 * n)) / scale;
        let half = z / scale * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt();
        ((center - half).max(0.0), (center + half).min(1.0))
    }

    /// Fraction of started games that reached the trigger.
    #[must_use]
    pub fn arrival_rate(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            (self.trials + self.rejected_illegal) as f64 / self.attempts as f64
        }
    }

    /// Whether two estimates differ by no more than `z` standard errors of
    /// their difference.
    #[must_use]
    pub fn indistinguishable(&self, other: &Estimate, z: f64) -> bool {
        let diff = (self.win_rate() - other.win_rate()).abs();
        let se = (self.std_error().powi(2) + other.std_error().powi(2)).sqrt();
        diff <= z * se
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimate(wins: u64, trials: u64) -> Estimate {
        Estimate { wins, trials, attempts: trials, ..Estimate::default() }
    }

    #[test]
    fn test_estimate_default() {
        let est = Estimate::new();
        assert_eq!(est.trials, 0);
        assert_eq!(est.win_rate(), 0.0);
        assert_eq!(est.interval(1.96), (0.0, 1.0));
    }

    #[test]
    fn test_win_rate_and_error() {
        let est = estimate(250, 1000);
        assert!((est.win_rate() - 0.25).abs() < 1e-12);
        let p = 252.0 / 1004.0;
        let expected = (p * (1.0 - p) / 1004.0f64).sqrt();
        assert!((est.std_error() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_error_positive_at_extremes() {
        assert!(estimate(10, 10).std_error() > 0.0);
        assert!(estimate(0, 10).std_error() > 0.0);
        assert!((estimate(10, 10).std_error() - estimate(0, 10).std_error()).abs() < 1e-12);
        assert!(Estimate::new().std_error().is_infinite());
    }

    #[test]
    fn test_interval_at_extremes() {
        let (lo, hi) = estimate(10, 10).interval(1.96);
        assert!(lo > 0.6 && lo < 0.8, "lower bound {lo}");
        assert!(hi > 1.0 - 1e-9);

        let (lo, hi) = estimate(0, 10).interval(1.96);
        assert!(lo < 1e-9);
        assert!(hi > 0.2 && hi < 0.4, "upper bound {hi}");
    }

    #[test]
    fn test_interval_narrows() {
        let small = estimate(50, 100);
        let large = estimate(5_000, 10_000);
        let width = |e: &Estimate| {
            let (lo, hi) = e.interval(1.96);
            hi - lo
        };
        assert!(width(&large) < width(&small));
    }

    #[test]
    fn test_merge_sums() {
        let mut a = estimate(3, 10);
        a.rejected_unreached = 4;
        let mut b = estimate(7, 10);
        b.rejected_illegal = 2;
        a.merge(&b);
        assert_eq!(a.wins, 10);
        assert_eq!(a.trials, 20);
        assert_eq!(a.rejected_unreached, 4);
        assert_eq!(a.rejected_illegal, 2);
    }

    #[test]
    fn test_indistinguishable() {
        let a = estimate(500, 1000);
        let b = estimate(510, 1000);
        let c = estimate(700, 1000);
        assert!(a.indistinguishable(&b, 1.96));
        assert!(!a.indistinguishable(&c, 1.96));
    }

    #[test]
    fn test_perfect_sample_not_certain() {
        let perfect = estimate(100, 100);
        assert!(perfect.indistinguishable(&estimate(95, 100), 1.96));
        assert!(!perfect.indistinguishable(&estimate(80, 100), 1.96));
        assert!(perfect.indistinguishable(&estimate(100, 100), 0.0));
    }

    #[test]
    fn test_stats_serialization() {
        let est = estimate(42, 100);
        let json = serde_json::to_string(&est).unwrap();
        let deserialized: Estimate = serde_json::from_str(&json).unwrap();
        assert_eq!(est, deserialized);
    }
}
