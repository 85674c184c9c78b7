use serde::{Deserialize, Serialize};
use ticketray_core::Ticket;

use crate::distribution::{category_distribution, costs_per_category, CategoryCost, CategoryShare};
use crate::metrics::calculate_metrics;
use crate::patterns::{identify_root_causes, RootCause};

/// How many raw tickets accompany the aggregates in the analysis payload.
pub const DEFAULT_MAX_SAMPLE_TICKETS: usize = 5;

/// The 9-field reduction of a ticket used for the bounded raw sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleTicket {
    pub id: String,
    pub status: String,
    pub category: String,
    pub service: String,
    pub impact: String,
    pub urgency: String,
    pub resolution_time: f64,
    pub cost: f64,
    pub short_description: String,
}

impl From<&Ticket> for SampleTicket {
    fn from(t: &Ticket) -> Self {
        SampleTicket {
            id: t.id.clone(),
            status: t.status.clone(),
            category: t.category.clone(),
            service: t.service.clone(),
            impact: t.impact.clone(),
            urgency: t.urgency.clone(),
            resolution_time: t.resolution_time,
            cost: t.cost,
            short_description: t.short_description.clone(),
        }
    }
}

/// Combined aggregator output: the request payload for narrative insight
/// generation and the input for local fallback synthesis. Derived per call,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsData {
    pub total_tickets: usize,
    pub resolved_tickets: usize,
    pub average_resolution_time: f64,
    pub total_cost: f64,
    pub category_distribution: Vec<CategoryShare>,
    pub costs_per_category: Vec<CategoryCost>,
    pub root_causes: Vec<RootCause>,
    pub sample_tickets: Vec<SampleTicket>,
}

pub fn prepare_analytics_data(
    tickets: &[Ticket],
    max_sample_tickets: usize,
    root_cause_min_frequency: usize,
) -> AnalyticsData {
    let metrics = calculate_metrics(tickets);
    AnalyticsData {
        total_tickets: metrics.total,
        resolved_tickets: metrics.resolved,
        average_resolution_time: metrics.avg_resolution_time,
        total_cost: metrics.total_cost,
        category_distribution: category_distribution(tickets),
        costs_per_category: costs_per_category(tickets),
        root_causes: identify_root_causes(tickets, root_cause_min_frequency),
        sample_tickets: tickets
            .iter()
            .take(max_sample_tickets)
            .map(SampleTicket::from)
            .collect(),
    }
}
