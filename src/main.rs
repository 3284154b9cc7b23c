use inventory_twin::io::reporting;
use inventory_twin::{optimize, run_batch, run_scenarios, SimulationConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Inventory Digital Twin: (s,S) Simulation + Optimization in Rust ===");

    // 1. SETUP CONFIGURATION
    // Baseline: 20 units/day Poisson demand, Uniform(1,5) day lead times,
    // holding $1/unit-day, $20 stockout penalty, $50 per order, backorders on.
    let config = SimulationConfig::default();
    let replications = 80;
    let base_seed = 42;

    println!(
        "Evaluating policy (s={}, S={}) over {} days, {} replications...",
        config.reorder_point, config.order_up_to, config.horizon_days, replications
    );

    // 2. MONTE CARLO EVALUATION
    let summary = match run_batch(&config, replications, base_seed) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return;
        }
    };

    println!("\n=== Monte Carlo Results ===");
    println!(
        "Service level: {:.2}% (95% CI: [{:.2}%, {:.2}%])",
        summary.service_mean * 100.0,
        summary.service_ci_low * 100.0,
        summary.service_ci_high * 100.0
    );
    println!(
        "Total cost: {:.1} (95% CI: [{:.1}, {:.1}])",
        summary.cost_mean, summary.cost_ci_low, summary.cost_ci_high
    );

    // 3. COST ANALYSIS
    let n = summary.replications.len() as f64;
    let avg = |f: fn(&inventory_twin::ReplicationResult) -> f64| {
        summary.replications.iter().map(f).sum::<f64>() / n
    };
    println!("\n=== Cost Analysis (per-replication averages) ===");
    println!("Holding: ${:.2}", avg(|r| r.holding_cost));
    println!("Stockout: ${:.2}", avg(|r| r.stockout_cost));
    println!("Ordering: ${:.2}", avg(|r| r.ordering_cost));
    println!("Orders placed: {:.2}", avg(|r| r.orders_placed as f64));

    // 4. SCENARIO ANALYSIS
    // Same policy under stress: +30% demand, lead times stretched 1.5x.
    println!("\n=== Scenario Analysis ===");
    match run_scenarios(&config, 30.0, 1.5, replications, base_seed) {
        Ok(outcomes) => {
            for outcome in &outcomes {
                println!(
                    "{:<16} service {:.2}% | cost {:.1}",
                    outcome.name,
                    outcome.summary.service_mean * 100.0,
                    outcome.summary.cost_mean
                );
            }
        }
        Err(e) => eprintln!("Scenario analysis failed: {e}"),
    }

    // 5. OPTIMIZE POLICY
    // Small grid, 40 replications per candidate, 98% minimum service level.
    let s_values: Vec<u32> = (10..=60).step_by(5).collect();
    let order_up_to_values: Vec<u32> = (60..=140).step_by(10).collect();

    println!("\n=== Policy Optimization ===");
    let outcome = match optimize(&config, &s_values, &order_up_to_values, 40, base_seed, 0.98) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Optimization failed: {e}");
            return;
        }
    };

    println!("Evaluated {} candidate policies.", outcome.grid.len());
    match &outcome.best {
        Some(best) => println!(
            "Best feasible policy: (s={}, S={}) -> service {:.2}% | cost {:.1}",
            best.reorder_point,
            best.order_up_to,
            best.service_mean * 100.0,
            best.cost_mean
        ),
        None => println!("No policy met the service constraint. Widen the S range or relax it."),
    }

    // 6. EXPORT RESULTS
    match reporting::write_replication_log("mc_runs.csv", &summary.replications) {
        Ok(_) => println!("\nRun-level results written to ./mc_runs.csv"),
        Err(e) => eprintln!("Error writing CSV: {e}"),
    }
    match reporting::write_policy_grid("policy_grid.csv", &outcome.grid) {
        Ok(_) => println!("Optimization grid written to ./policy_grid.csv"),
        Err(e) => eprintln!("Error writing CSV: {e}"),
    }

    println!("\nSimulation Complete.");
}
