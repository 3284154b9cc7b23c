// src/analysis/monte_carlo.rs

use rayon::prelude::*;
use tracing::debug;

use crate::sampling::SeededDraws;
use crate::simulation::config::{ConfigError, SimulationConfig};
use crate::simulation::engine::{simulate, ReplicationResult};

/// Aggregate statistics over a batch of replications, together with the full
/// per-replication table the statistics were computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct MonteCarloSummary {
    pub service_mean: f64,
    pub service_ci_low: f64,
    pub service_ci_high: f64,
    pub cost_mean: f64,
    pub cost_ci_low: f64,
    pub cost_ci_high: f64,
    /// One entry per replication, ordered by replication index.
    pub replications: Vec<ReplicationResult>,
}

/// Runs `replication_count` independent replications, seeding replication
/// `i` with `base_seed + i`.
///
/// Replications share no mutable state, so they fan out on the rayon pool;
/// results are collected by index, which keeps the confidence-interval
/// computation deterministic regardless of completion order.
pub fn run_batch(
    config: &SimulationConfig,
    replication_count: usize,
    base_seed: u64,
) -> Result<MonteCarloSummary, ConfigError> {
    config.validate()?;
    if replication_count == 0 {
        return Err(ConfigError::NoReplications);
    }

    let replications: Vec<ReplicationResult> = (0..replication_count)
        .into_par_iter()
        .map(|i| {
            let mut draws = SeededDraws::new(base_seed + i as u64);
            simulate(config, &mut draws)
        })
        .collect();

    let services: Vec<f64> = replications.iter().map(|r| r.service_level).collect();
    let costs: Vec<f64> = replications.iter().map(|r| r.total_cost).collect();

    let (service_mean, service_ci_low, service_ci_high) = ci95(&services);
    let (cost_mean, cost_ci_low, cost_ci_high) = ci95(&costs);

    debug!(
        replication_count,
        base_seed, service_mean, cost_mean, "batch complete"
    );

    Ok(MonteCarloSummary {
        service_mean,
        service_ci_low,
        service_ci_high,
        cost_mean,
        cost_ci_low,
        cost_ci_high,
        replications,
    })
}

/// Mean and 95% confidence bounds under the normal approximation,
/// `half = 1.96 * sample_std / sqrt(n)` with the n-1 variance estimator.
/// A single observation collapses both bounds onto the mean.
pub(crate) fn ci95(values: &[f64]) -> (f64, f64, f64) {
    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;
    if n <= 1 {
        return (mean, mean, mean);
    }

    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let half = 1.96 * variance.sqrt() / (n as f64).sqrt();
    (mean, mean - half, mean + half)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::engine::run_replication;

    fn small_config() -> SimulationConfig {
        SimulationConfig {
            horizon_days: 30.0,
            demand_rate_per_day: 5.0,
            reorder_point: 10,
            order_up_to: 40,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn ci95_matches_hand_computation() {
        let (mean, low, high) = ci95(&[1.0, 2.0, 3.0]);
        assert_eq!(mean, 2.0);
        // sample std of [1,2,3] is 1; half width = 1.96 / sqrt(3)
        let half = 1.96 / 3.0_f64.sqrt();
        assert!((low - (2.0 - half)).abs() < 1e-12);
        assert!((high - (2.0 + half)).abs() < 1e-12);
    }

    #[test]
    fn single_observation_collapses_the_interval() {
        let (mean, low, high) = ci95(&[4.5]);
        assert_eq!((mean, low, high), (4.5, 4.5, 4.5));
    }

    #[test]
    fn single_replication_batch_collapses_both_intervals() {
        let summary = run_batch(&small_config(), 1, 9).unwrap();
        assert_eq!(summary.service_ci_low, summary.service_mean);
        assert_eq!(summary.service_ci_high, summary.service_mean);
        assert_eq!(summary.cost_ci_low, summary.cost_mean);
        assert_eq!(summary.cost_ci_high, summary.cost_mean);
        assert_eq!(summary.replications.len(), 1);
    }

    #[test]
    fn constant_batches_have_degenerate_intervals() {
        // Zero demand makes every replication identical: service 1.0 and a
        // deterministic holding cost.
        let config = SimulationConfig {
            demand_rate_per_day: 0.0,
            ..SimulationConfig::default()
        };
        let summary = run_batch(&config, 10, 0).unwrap();

        assert_eq!(summary.service_mean, 1.0);
        assert_eq!(summary.service_ci_low, 1.0);
        assert_eq!(summary.service_ci_high, 1.0);
        assert_eq!(summary.cost_ci_low, summary.cost_mean);
        assert_eq!(summary.cost_ci_high, summary.cost_mean);
    }

    #[test]
    fn replications_are_seeded_by_index() {
        let config = small_config();
        let summary = run_batch(&config, 5, 100).unwrap();

        assert_eq!(summary.replications.len(), 5);
        for (i, row) in summary.replications.iter().enumerate() {
            let expected = run_replication(&config, 100 + i as u64).unwrap();
            assert_eq!(*row, expected, "replication {i} out of order");
        }
    }

    #[test]
    fn batches_are_reproducible() {
        let config = small_config();
        let a = run_batch(&config, 20, 7).unwrap();
        let b = run_batch(&config, 20, 7).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_replications_are_rejected() {
        assert_eq!(
            run_batch(&small_config(), 0, 0),
            Err(ConfigError::NoReplications)
        );
    }

    #[test]
    fn invalid_config_is_rejected_before_any_work() {
        let config = SimulationConfig {
            demand_rate_per_day: -2.0,
            ..SimulationConfig::default()
        };
        assert_eq!(
            run_batch(&config, 10, 0),
            Err(ConfigError::NegativeDemandRate(-2.0))
        );
    }
}
