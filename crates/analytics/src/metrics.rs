use serde::{Deserialize, Serialize};
use ticketray_core::{status, Ticket};

/// Scalar rollup of a ticket batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketMetrics {
    pub total: usize,
    pub resolved: usize,
    /// Mean of `resolution_time` over tickets where it is positive; 0.0 when
    /// no ticket has a recorded resolution time.
    pub avg_resolution_time: f64,
    pub total_cost: f64,
    /// Resolved share in percent; 0.0 on an empty batch so the function
    /// stays total (validation rejects empty batches before this runs).
    pub resolution_rate: f64,
}

pub fn calculate_metrics(tickets: &[Ticket]) -> TicketMetrics {
    let total = tickets.len();
    let resolved = tickets
        .iter()
        .filter(|t| t.status == status::RESOLVED)
        .count();

    let timed: Vec<f64> = tickets
        .iter()
        .filter(|t| t.resolution_time > 0.0)
        .map(|t| t.resolution_time)
        .collect();
    let avg_resolution_time = if timed.is_empty() {
        0.0
    } else {
        timed.iter().sum::<f64>() / timed.len() as f64
    };

    let total_cost = tickets.iter().map(|t| t.cost).sum();
    let resolution_rate = if total == 0 {
        0.0
    } else {
        resolved as f64 / total as f64 * 100.0
    };

    TicketMetrics {
        total,
        resolved,
        avg_resolution_time,
        total_cost,
        resolution_rate,
    }
}
