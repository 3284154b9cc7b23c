// src/analysis/scenarios.rs

use tracing::info;

use crate::analysis::monte_carlo::{run_batch, MonteCarloSummary};
use crate::simulation::config::{ConfigError, SimulationConfig};

/// One labeled scenario with its batch statistics.
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub name: String,
    pub summary: MonteCarloSummary,
}

/// Compares the same (s,S) policy under stress: the baseline conditions, a
/// demand spike of `spike_pct` percent, and a lead-time disruption that
/// stretches both distribution parameters by `lead_time_multiplier`.
///
/// Each scenario runs through the Monte Carlo harness with its own seed
/// offset (baseline + 0 / + 1000 / + 2000), so scenarios never share random
/// streams with each other.
pub fn run_scenarios(
    config: &SimulationConfig,
    spike_pct: f64,
    lead_time_multiplier: f64,
    replication_count: usize,
    base_seed: u64,
) -> Result<Vec<ScenarioOutcome>, ConfigError> {
    let baseline = run_batch(config, replication_count, base_seed)?;

    let mut spiked = config.clone();
    spiked.demand_rate_per_day *= 1.0 + spike_pct / 100.0;
    let spike = run_batch(&spiked, replication_count, base_seed + 1000)?;

    let mut disrupted = config.clone();
    disrupted.lead_time = config.lead_time.scaled(lead_time_multiplier);
    let disruption = run_batch(&disrupted, replication_count, base_seed + 2000)?;

    info!(
        spike_pct,
        lead_time_multiplier, replication_count, "scenario comparison complete"
    );

    Ok(vec![
        ScenarioOutcome {
            name: "baseline".to_string(),
            summary: baseline,
        },
        ScenarioOutcome {
            name: format!("demand +{spike_pct:.0}%"),
            summary: spike,
        },
        ScenarioOutcome {
            name: format!("lead time x{lead_time_multiplier:.1}"),
            summary: disruption,
        },
    ])
}
