use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ticketray_core::Ticket;
use tracing::debug;

/// Minimum group size for a recurring pattern to count as a root cause.
pub const DEFAULT_MIN_FREQUENCY: usize = 2;

/// Trailing window, in hours, for the recent-spike alerting.
pub const DEFAULT_ALERT_WINDOW_HOURS: f64 = 2.0;

/// A recurring service×category pattern surfaced as a candidate root cause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootCause {
    /// "<service> - <category>" display key.
    pub cause: String,
    pub frequency: usize,
    /// "High" when any member ticket has High impact, otherwise "Medium".
    /// The two-level label is intentional; Low never surfaces here.
    pub impact: String,
    pub recommendations: Vec<String>,
}

/// A burst of similar tickets inside the trailing alert window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSpikeAlert {
    pub service: String,
    pub category: String,
    pub count: usize,
    pub ticket_ids: Vec<String>,
    pub window_hours: f64,
}

struct PatternGroup<'a> {
    service: &'a str,
    category: &'a str,
    members: Vec<&'a Ticket>,
}

/// Groups tickets by the service-category composite key, preserving first-
/// encounter order so downstream stable sorts stay deterministic.
fn group_by_pattern(tickets: &[Ticket]) -> Vec<PatternGroup<'_>> {
    let mut order: Vec<PatternGroup<'_>> = Vec::new();
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();

    for ticket in tickets {
        let key = (ticket.service.as_str(), ticket.category.as_str());
        match index.get(&key) {
            Some(&i) => order[i].members.push(ticket),
            None => {
                index.insert(key, order.len());
                order.push(PatternGroup {
                    service: &ticket.service,
                    category: &ticket.category,
                    members: vec![ticket],
                });
            }
        }
    }
    order
}

/// Finds service×category groups recurring at least `min_frequency` times,
/// descending by frequency (stable ties).
pub fn identify_root_causes(tickets: &[Ticket], min_frequency: usize) -> Vec<RootCause> {
    let mut causes: Vec<RootCause> = group_by_pattern(tickets)
        .into_iter()
        .filter(|group| group.members.len() >= min_frequency)
        .map(|group| {
            let impact = if group.members.iter().any(|t| t.impact == "High") {
                "High"
            } else {
                "Medium"
            };
            RootCause {
                cause: format!("{} - {}", group.service, group.category),
                frequency: group.members.len(),
                impact: impact.to_string(),
                recommendations: vec![
                    format!("Implement proactive monitoring for {}", group.service),
                    format!("Create resolution documentation for {}", group.category),
                    "Establish standard procedures for similar incidents".to_string(),
                ],
            }
        })
        .collect();

    causes.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    debug!(count = causes.len(), "identified recurring root causes");
    causes
}

/// Flags service×category groups with two or more tickets opened inside the
/// trailing `window_hours` before `now`. Stateless: every call re-evaluates
/// from scratch, there is no alert deduplication across calls. Tickets with
/// unparseable `opened` timestamps never match the window.
pub fn detect_recent_spikes(
    tickets: &[Ticket],
    now: DateTime<Utc>,
    window_hours: f64,
) -> Vec<RecentSpikeAlert> {
    let mut alerts = Vec::new();

    for group in group_by_pattern(tickets) {
        let recent: Vec<&Ticket> = group
            .members
            .iter()
            .copied()
            .filter(|t| match t.hours_open(now) {
                Some(hours) => hours >= 0.0 && hours <= window_hours,
                None => false,
            })
            .collect();

        if recent.len() >= 2 {
            alerts.push(RecentSpikeAlert {
                service: group.service.to_string(),
                category: group.category.to_string(),
                count: recent.len(),
                ticket_ids: recent.iter().map(|t| t.id.clone()).collect(),
                window_hours,
            });
        }
    }
    alerts
}
