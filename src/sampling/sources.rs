// src/sampling/sources.rs

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Exp, Normal};

use crate::sampling::traits::DrawSource;

// =========================================================================
// 1. Seeded Source (production)
// =========================================================================

/// The production draw source: a ChaCha generator seeded per replication.
///
/// Two sources built from the same seed produce the same draw sequence, so a
/// replication is fully determined by its `(config, seed)` pair.
#[derive(Debug, Clone)]
pub struct SeededDraws {
    rng: ChaCha8Rng,
}

impl SeededDraws {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl DrawSource for SeededDraws {
    fn exp_interarrival(&mut self, rate_per_day: f64) -> f64 {
        let exp = Exp::new(rate_per_day).expect("arrival rate must be positive and finite");
        exp.sample(&mut self.rng)
    }

    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.rng.gen_range(low..=high)
    }

    fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let normal = Normal::new(mean, std_dev).expect("invalid normal distribution parameters");
        normal.sample(&mut self.rng)
    }
}

// =========================================================================
// 2. Scripted Source (deterministic replay)
// =========================================================================

/// Replays a fixed sequence of draws, one value per call, regardless of the
/// distribution asked for.
///
/// Once the sequence is exhausted every draw returns `f64::INFINITY`, which
/// parks any further scheduled event past the horizon. Engine tests use this
/// to pin down an exact event ordering.
#[derive(Debug, Clone)]
pub struct ScriptedDraws {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedDraws {
    pub fn new(draws: Vec<f64>) -> Self {
        Self { draws, cursor: 0 }
    }

    fn next_draw(&mut self) -> f64 {
        let value = self.draws.get(self.cursor).copied();
        self.cursor += 1;
        value.unwrap_or(f64::INFINITY)
    }
}

impl DrawSource for ScriptedDraws {
    fn exp_interarrival(&mut self, _rate_per_day: f64) -> f64 {
        self.next_draw()
    }

    fn uniform(&mut self, _low: f64, _high: f64) -> f64 {
        self.next_draw()
    }

    fn normal(&mut self, _mean: f64, _std_dev: f64) -> f64 {
        self.next_draw()
    }
}
