// src/simulation/config.rs

use serde::Serialize;
use thiserror::Error;

use crate::sampling::DrawSource;

/// Lead-time distribution for a replenishment order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum LeadTime {
    /// Uniform on the inclusive interval `[min, max]`, in days.
    Uniform { min: f64, max: f64 },
    /// Normal with the given mean and standard deviation, in days.
    Normal { mean: f64, std_dev: f64 },
}

impl LeadTime {
    /// Samples a lead time in days.
    ///
    /// Normal draws are clipped at zero; Uniform draws are taken as-is, even
    /// when a negative lower bound makes negative values possible.
    pub fn sample(&self, draws: &mut dyn DrawSource) -> f64 {
        match *self {
            LeadTime::Uniform { min, max } => draws.uniform(min, max),
            LeadTime::Normal { mean, std_dev } => draws.normal(mean, std_dev).max(0.0),
        }
    }

    /// Both shape parameters scaled by `factor` (disruption scenarios).
    pub fn scaled(&self, factor: f64) -> Self {
        match *self {
            LeadTime::Uniform { min, max } => LeadTime::Uniform {
                min: min * factor,
                max: max * factor,
            },
            LeadTime::Normal { mean, std_dev } => LeadTime::Normal {
                mean: mean * factor,
                std_dev: std_dev * factor,
            },
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            LeadTime::Uniform { min, max } => {
                if !min.is_finite() || !max.is_finite() {
                    return Err(ConfigError::NonFiniteParameter("lead time bounds"));
                }
                if max < min {
                    return Err(ConfigError::InvalidLeadTime(format!(
                        "uniform upper bound {max} is below lower bound {min}"
                    )));
                }
            }
            LeadTime::Normal { mean, std_dev } => {
                if !mean.is_finite() || !std_dev.is_finite() {
                    return Err(ConfigError::NonFiniteParameter("lead time parameters"));
                }
                if std_dev < 0.0 {
                    return Err(ConfigError::InvalidLeadTime(format!(
                        "normal standard deviation {std_dev} is negative"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Rejections raised before any simulation work starts. These are caller-side
/// precondition failures, not runtime faults of the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("order-up-to level S = {order_up_to} must exceed reorder point s = {reorder_point}")]
    OrderUpToNotAboveReorderPoint { reorder_point: u32, order_up_to: u32 },

    #[error("demand rate must be non-negative, got {0}")]
    NegativeDemandRate(f64),

    #[error("simulation horizon must be non-negative, got {0}")]
    NegativeHorizon(f64),

    #[error("{0} must be non-negative, got {1}")]
    NegativeCost(&'static str, f64),

    #[error("invalid lead time distribution: {0}")]
    InvalidLeadTime(String),

    #[error("{0} must be finite")]
    NonFiniteParameter(&'static str),

    #[error("replication count must be at least 1")]
    NoReplications,
}

/// Full parameterization of one replication. Built once per run and never
/// mutated; every replication of a batch sees the same values.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Length of the simulated period, in days.
    pub horizon_days: f64,
    /// Reorder point `s`: an order is placed when the inventory position
    /// falls to or below this level.
    pub reorder_point: u32,
    /// Order-up-to level `S`. Must exceed `reorder_point`.
    pub order_up_to: u32,
    /// Mean demand arrivals per day (Poisson process, unit-sized demands).
    pub demand_rate_per_day: f64,
    /// Replenishment lead-time distribution.
    pub lead_time: LeadTime,
    /// Cost per unit held in stock, per day.
    pub holding_cost_per_unit_day: f64,
    /// Penalty per unit of demand not filled immediately.
    pub stockout_penalty_per_unit: f64,
    /// Fixed cost charged each time an order is placed.
    pub fixed_order_cost: f64,
    /// Unmet demand is backordered when true, lost otherwise.
    pub allow_backorders: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            horizon_days: 365.0,
            reorder_point: 40,
            order_up_to: 120,
            demand_rate_per_day: 20.0,
            lead_time: LeadTime::Uniform { min: 1.0, max: 5.0 },
            holding_cost_per_unit_day: 1.0,
            stockout_penalty_per_unit: 20.0,
            fixed_order_cost: 50.0,
            allow_backorders: true,
        }
    }
}

impl SimulationConfig {
    /// Checks every caller-side precondition. The engine, the Monte Carlo
    /// harness and the optimizer all run this before doing any work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.horizon_days.is_finite() {
            return Err(ConfigError::NonFiniteParameter("horizon"));
        }
        if self.horizon_days < 0.0 {
            return Err(ConfigError::NegativeHorizon(self.horizon_days));
        }
        if !self.demand_rate_per_day.is_finite() {
            return Err(ConfigError::NonFiniteParameter("demand rate"));
        }
        if self.demand_rate_per_day < 0.0 {
            return Err(ConfigError::NegativeDemandRate(self.demand_rate_per_day));
        }
        if self.order_up_to <= self.reorder_point {
            return Err(ConfigError::OrderUpToNotAboveReorderPoint {
                reorder_point: self.reorder_point,
                order_up_to: self.order_up_to,
            });
        }

        let costs = [
            ("holding cost", self.holding_cost_per_unit_day),
            ("stockout penalty", self.stockout_penalty_per_unit),
            ("fixed order cost", self.fixed_order_cost),
        ];
        for (name, value) in costs {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteParameter(name));
            }
            if value < 0.0 {
                return Err(ConfigError::NegativeCost(name, value));
            }
        }

        self.lead_time.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::ScriptedDraws;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(SimulationConfig::default().validate(), Ok(()));
    }

    #[test]
    fn order_up_to_must_exceed_reorder_point() {
        let config = SimulationConfig {
            reorder_point: 50,
            order_up_to: 50,
            ..SimulationConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::OrderUpToNotAboveReorderPoint {
                reorder_point: 50,
                order_up_to: 50,
            })
        );
    }

    #[test]
    fn negative_demand_rate_is_rejected() {
        let config = SimulationConfig {
            demand_rate_per_day: -1.0,
            ..SimulationConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NegativeDemandRate(-1.0)));
    }

    #[test]
    fn negative_costs_are_rejected() {
        let config = SimulationConfig {
            stockout_penalty_per_unit: -5.0,
            ..SimulationConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NegativeCost("stockout penalty", -5.0))
        );
    }

    #[test]
    fn reversed_uniform_bounds_are_rejected() {
        let config = SimulationConfig {
            lead_time: LeadTime::Uniform { min: 5.0, max: 1.0 },
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLeadTime(_))
        ));
    }

    #[test]
    fn negative_normal_std_dev_is_rejected() {
        let config = SimulationConfig {
            lead_time: LeadTime::Normal {
                mean: 3.0,
                std_dev: -1.0,
            },
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLeadTime(_))
        ));
    }

    #[test]
    fn normal_lead_time_is_clipped_at_zero() {
        let lead = LeadTime::Normal {
            mean: 1.0,
            std_dev: 2.0,
        };
        let mut draws = ScriptedDraws::new(vec![-3.5]);
        assert_eq!(lead.sample(&mut draws), 0.0);
    }

    #[test]
    fn uniform_lead_time_is_not_clipped() {
        let lead = LeadTime::Uniform {
            min: -2.0,
            max: 2.0,
        };
        let mut draws = ScriptedDraws::new(vec![-1.5]);
        assert_eq!(lead.sample(&mut draws), -1.5);
    }

    #[test]
    fn scaling_stretches_both_parameters() {
        let uniform = LeadTime::Uniform { min: 1.0, max: 5.0 }.scaled(1.5);
        assert_eq!(
            uniform,
            LeadTime::Uniform { min: 1.5, max: 7.5 }
        );

        let normal = LeadTime::Normal {
            mean: 3.0,
            std_dev: 1.0,
        }
        .scaled(2.0);
        assert_eq!(
            normal,
            LeadTime::Normal {
                mean: 6.0,
                std_dev: 2.0
            }
        );
    }
}
