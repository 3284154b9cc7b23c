// src/model/events.rs

/// The winner of the race between the two event streams of a replication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextEvent {
    /// A customer demand arrival.
    Demand,
    /// A replenishment order arriving from the supplier.
    Replenishment,
    /// The clock reached the end of the horizon; no event fires.
    HorizonEnd,
}

/// Resolves which event fires next and at what time.
///
/// The horizon wins whenever the earliest event would land at or past it.
/// When a demand and a replenishment arrival are simultaneous, the demand is
/// processed first, so an arriving order can never rescue a demand that lands
/// in the same instant.
pub fn next_event(
    next_demand_time: f64,
    order_arrival_time: f64,
    horizon_days: f64,
) -> (f64, NextEvent) {
    let time = next_demand_time.min(order_arrival_time).min(horizon_days);

    if time >= horizon_days {
        (horizon_days, NextEvent::HorizonEnd)
    } else if next_demand_time <= order_arrival_time {
        (time, NextEvent::Demand)
    } else {
        (time, NextEvent::Replenishment)
    }
}
