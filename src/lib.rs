//! Discrete-event simulation of a continuous-review (s,S) inventory policy:
//! single SKU, single supplier, one outstanding order at a time.
//!
//! Demand arrives as a Poisson process of unit-sized demands; replenishment
//! lead times are Uniform or Normal. Costs are holding (per unit-day),
//! stockout penalty (per unfilled unit) and a fixed charge per order placed;
//! service level is the immediate fill rate.
//!
//! Three entry points cover the whole surface:
//! - [`run_replication`] simulates one seeded replication;
//! - [`run_batch`] runs a Monte Carlo batch and reports mean + 95% CI for
//!   service level and total cost;
//! - [`optimize`] grid-searches the (s,S) space for the cheapest policy
//!   meeting a service-level constraint.

pub mod analysis;
pub mod io;
pub mod model;
pub mod sampling;
pub mod simulation;

pub use analysis::monte_carlo::{run_batch, MonteCarloSummary};
pub use analysis::optimization::{optimize, OptimizationOutcome, PolicyGridRow};
pub use analysis::scenarios::{run_scenarios, ScenarioOutcome};
pub use sampling::{DrawSource, ScriptedDraws, SeededDraws};
pub use simulation::config::{ConfigError, LeadTime, SimulationConfig};
pub use simulation::engine::{run_replication, simulate, ReplicationResult};
