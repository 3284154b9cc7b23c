// src/simulation/engine.rs

use serde::Serialize;

use crate::model::events::NextEvent;
use crate::model::state::SimulationState;
use crate::sampling::{DrawSource, SeededDraws};
use crate::simulation::config::{ConfigError, SimulationConfig};

/// Everything a single replication reports back. Immutable once produced;
/// the Monte Carlo harness aggregates these without touching them.
///
/// We make this Serialize so the per-replication table can be written to CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplicationResult {
    /// Immediate fills / total demand units; 1.0 when no demand arrived.
    pub service_level: f64,
    /// holding + stockout + ordering, exactly.
    pub total_cost: f64,
    pub holding_cost: f64,
    pub stockout_cost: f64,
    pub ordering_cost: f64,
    pub orders_placed: u32,
    pub total_demand: u32,
    pub immediate_fills: u32,
    pub ending_on_hand: u32,
    pub ending_backorders: u32,
}

/// Cost and demand counters accumulated over one replication.
#[derive(Debug, Default)]
struct RunTally {
    holding_cost: f64,
    stockout_cost: f64,
    ordering_cost: f64,
    orders_placed: u32,
    total_demand: u32,
    immediate_fills: u32,
}

/// Runs one replication of the (s,S) policy with a generator seeded from
/// `seed`. Two calls with the same config and seed produce identical results.
pub fn run_replication(
    config: &SimulationConfig,
    seed: u64,
) -> Result<ReplicationResult, ConfigError> {
    config.validate()?;
    let mut draws = SeededDraws::new(seed);
    Ok(simulate(config, &mut draws))
}

/// Runs one replication against an arbitrary draw source.
///
/// Expects a config that has already passed [`SimulationConfig::validate`];
/// the public entry points validate before calling in here. Exposed so tests
/// can drive the event loop with a [`crate::sampling::ScriptedDraws`].
pub fn simulate(config: &SimulationConfig, draws: &mut dyn DrawSource) -> ReplicationResult {
    let first_demand_time = schedule_demand(config, 0.0, draws);
    let mut state = SimulationState::new(config.order_up_to, first_demand_time);
    let mut tally = RunTally::default();

    // Reorder check before the first event. A run starts at full stock, so
    // this only matters once events begin draining the position.
    maybe_reorder(config, &mut state, &mut tally, draws);

    loop {
        let (event_time, event) = state.peek_next_event(config.horizon_days);

        // Holding cost accrues over the elapsed interval before the clock
        // moves, including the final partial interval up to the horizon.
        // Only on-hand units are charged, not backordered or on-order ones.
        accrue_holding(config, &state, &mut tally, event_time);
        state.clock = event_time;

        match event {
            NextEvent::HorizonEnd => break,
            NextEvent::Demand => on_demand(config, &mut state, &mut tally, draws),
            NextEvent::Replenishment => on_replenishment(config, &mut state, &mut tally, draws),
        }
    }

    let service_level = if tally.total_demand > 0 {
        tally.immediate_fills as f64 / tally.total_demand as f64
    } else {
        1.0
    };
    let total_cost = tally.holding_cost + tally.stockout_cost + tally.ordering_cost;

    ReplicationResult {
        service_level,
        total_cost,
        holding_cost: tally.holding_cost,
        stockout_cost: tally.stockout_cost,
        ordering_cost: tally.ordering_cost,
        orders_placed: tally.orders_placed,
        total_demand: tally.total_demand,
        immediate_fills: tally.immediate_fills,
        ending_on_hand: state.on_hand,
        ending_backorders: state.backorders,
    }
}

fn accrue_holding(
    config: &SimulationConfig,
    state: &SimulationState,
    tally: &mut RunTally,
    until: f64,
) {
    let dt = until - state.clock;
    if dt > 0.0 && state.on_hand > 0 {
        tally.holding_cost += state.on_hand as f64 * config.holding_cost_per_unit_day * dt;
    }
}

/// Next demand arrival time, or the infinite sentinel when the rate is zero.
fn schedule_demand(config: &SimulationConfig, now: f64, draws: &mut dyn DrawSource) -> f64 {
    if config.demand_rate_per_day > 0.0 {
        now + draws.exp_interarrival(config.demand_rate_per_day)
    } else {
        f64::INFINITY
    }
}

/// One unit of demand lands: fill it from stock, or charge the stockout
/// penalty and either backorder or lose the sale.
fn on_demand(
    config: &SimulationConfig,
    state: &mut SimulationState,
    tally: &mut RunTally,
    draws: &mut dyn DrawSource,
) {
    tally.total_demand += 1;

    if state.on_hand > 0 {
        state.on_hand -= 1;
        tally.immediate_fills += 1;
    } else {
        tally.stockout_cost += config.stockout_penalty_per_unit;
        if config.allow_backorders {
            state.backorders += 1;
        }
        // else: lost sale, no further bookkeeping
    }

    state.next_demand_time = schedule_demand(config, state.clock, draws);
    maybe_reorder(config, state, tally, draws);
}

/// The outstanding order lands: restock, serve the backorder queue, and
/// check the reorder rule again since a large queue can swallow the whole
/// delivery and leave the position at or below `s`.
fn on_replenishment(
    config: &SimulationConfig,
    state: &mut SimulationState,
    tally: &mut RunTally,
    draws: &mut dyn DrawSource,
) {
    state.receive_outstanding_order();
    if config.allow_backorders {
        state.fill_backorders();
    }
    maybe_reorder(config, state, tally, draws);
}

/// The (s,S) rule: order back up to `S` whenever the inventory position is
/// at or below `s` and nothing is already on order. At most one order is
/// outstanding at any time.
fn maybe_reorder(
    config: &SimulationConfig,
    state: &mut SimulationState,
    tally: &mut RunTally,
    draws: &mut dyn DrawSource,
) {
    let position = state.inventory_position();
    if position > config.reorder_point as i64 || state.has_outstanding_order() {
        return;
    }

    let qty = (config.order_up_to as i64 - position).max(0);
    if qty == 0 {
        return;
    }

    tally.orders_placed += 1;
    tally.ordering_cost += config.fixed_order_cost;
    let lead_time = config.lead_time.sample(draws);
    state.place_order(qty as u32, state.clock + lead_time);
}
