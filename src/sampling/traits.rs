// src/sampling/traits.rs

use std::fmt::Debug;

/// Source of the random draws consumed by the simulation engine.
///
/// The event loop never touches an RNG directly; it asks this trait for the
/// three draw kinds it needs. That keeps the loop independent of the
/// underlying generator, so tests can substitute a scripted sequence and
/// alternate distributions can be added without touching the engine.
///
/// We require `Debug` so we can print the source state if needed.
/// We require `Send` to allow replications to run on a worker pool.
pub trait DrawSource: Debug + Send {
    /// Draws an exponential inter-arrival interval with mean `1 / rate_per_day`.
    ///
    /// Callers must only pass a strictly positive, finite rate; a zero rate
    /// means "no arrivals" and is handled upstream with an infinite sentinel.
    fn exp_interarrival(&mut self, rate_per_day: f64) -> f64;

    /// Draws uniformly from the inclusive interval `[low, high]`.
    fn uniform(&mut self, low: f64, high: f64) -> f64;

    /// Draws from a normal distribution. The raw draw is returned unclipped;
    /// whether negative values are meaningful is the caller's decision.
    fn normal(&mut self, mean: f64, std_dev: f64) -> f64;
}
