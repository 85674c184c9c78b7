use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single support-incident record as exported by the service desk.
///
/// Free-text fields stay as raw strings; aggregation matches them exactly
/// (case sensitive), so no normalization happens on ingest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ticket {
    pub id: String,
    pub parent_service_request: String,
    pub status: String,
    pub user: String,
    pub contact_type: String,
    pub service: String,
    pub configuration_item: String,
    pub category: String,
    pub sub_category: String,
    pub caused_by_change: String,
    pub impact: String,
    pub urgency: String,
    pub assignment_group: String,
    pub assigned_to: String,
    pub it_crisis: String,
    pub supplier: String,
    pub external_reference: String,
    pub short_description: String,
    pub description: String,
    pub close_code: String,
    pub closure_notes: String,
    pub work_notes: String,
    pub additional_comments: String,
    pub opened: String,
    pub opened_by: String,
    pub resolved: String,
    pub resolved_by: String,
    pub watch_list: String,
    pub correlation_id: String,
    pub sap_implementation_status: String,
    pub follow_up: String,
    pub three_strike_rule: String,
    pub due_date: String,
    pub reason_for_waiting: String,
    pub actions_taken: String,
    pub active: String,
    /// Elapsed hours between opening and resolution, 0 if unresolved.
    pub resolution_time: f64,
    pub cost: f64,
}

impl Ticket {
    /// Parsed `opened` timestamp, None when empty or malformed.
    pub fn opened_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.opened)
    }

    /// Hours elapsed since the ticket was opened. None when the timestamp
    /// cannot be parsed, so callers can skip the age bonus instead of
    /// guessing.
    pub fn hours_open(&self, now: DateTime<Utc>) -> Option<f64> {
        let opened = self.opened_at()?;
        Some((now - opened).num_seconds() as f64 / 3600.0)
    }

    pub fn impact_level(&self) -> Level {
        Level::from_text(&self.impact)
    }

    pub fn urgency_level(&self) -> Level {
        Level::from_text(&self.urgency)
    }
}

/// Impact/urgency levels as used by the service desk export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    High,
    Medium,
    Low,
}

impl Level {
    /// Unknown or empty values weigh the same as Low, matching how the
    /// dashboard scores unclassified tickets.
    pub fn from_text(text: &str) -> Self {
        match text {
            "High" => Level::High,
            "Medium" => Level::Medium,
            _ => Level::Low,
        }
    }

    pub fn weight(self) -> u32 {
        match self {
            Level::High => 3,
            Level::Medium => 2,
            Level::Low => 1,
        }
    }
}

/// Ticket lifecycle states recognized by the aggregators.
pub mod status {
    pub const OPEN: &str = "Open";
    pub const IN_PROGRESS: &str = "In Progress";
    pub const RESOLVED: &str = "Resolved";
    pub const CLOSED: &str = "Closed";
}

/// Parses the timestamp formats seen in service desk exports: RFC 3339 and
/// the date-time form without an offset (interpreted as UTC). Empty or
/// unrecognized input yields None.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn level_from_text_maps_unknown_to_low() {
        assert_eq!(Level::from_text("High"), Level::High);
        assert_eq!(Level::from_text("Medium"), Level::Medium);
        assert_eq!(Level::from_text("Low"), Level::Low);
        assert_eq!(Level::from_text(""), Level::Low);
        assert_eq!(Level::from_text("Critical"), Level::Low);
    }

    #[test]
    fn parse_timestamp_accepts_rfc3339_and_naive() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-03-01T10:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01T10:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01 10:30:00"), Some(expected));
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("not a date"), None);
    }

    #[test]
    fn hours_open_is_none_for_bad_timestamp() {
        let mut ticket = Ticket::default();
        ticket.opened = "garbage".to_string();
        assert!(ticket.hours_open(Utc::now()).is_none());

        ticket.opened = "2024-03-01T00:00:00Z".to_string();
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap();
        let hours = ticket.hours_open(now).unwrap();
        assert!((hours - 24.0).abs() < 1e-9);
    }

    #[test]
    fn ticket_deserializes_camel_case_with_defaults() {
        let ticket: Ticket = serde_json::from_str(
            r#"{"id":"INC001","status":"Resolved","shortDescription":"VPN down","resolutionTime":4.5,"cost":120.0}"#,
        )
        .unwrap();
        assert_eq!(ticket.id, "INC001");
        assert_eq!(ticket.short_description, "VPN down");
        assert_eq!(ticket.resolution_time, 4.5);
        assert_eq!(ticket.category, "");
    }
}
