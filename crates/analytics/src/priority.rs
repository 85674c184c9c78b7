use chrono::{DateTime, Utc};
use ticketray_core::Ticket;

/// Priority score used for triage ordering: impact and urgency each
/// contribute their level weight (High 3, Medium 2, otherwise 1), plus an
/// age bonus of +2 when the ticket has been open longer than 24 hours or +1
/// when longer than 8. Unparseable `opened` timestamps earn no bonus.
pub fn priority_score(ticket: &Ticket, now: DateTime<Utc>) -> u32 {
    let mut score = ticket.impact_level().weight() + ticket.urgency_level().weight();
    if let Some(hours) = ticket.hours_open(now) {
        if hours > 24.0 {
            score += 2;
        } else if hours > 8.0 {
            score += 1;
        }
    }
    score
}

/// Returns the batch reordered by descending priority score. The input is
/// untouched; equal scores keep their input order (stable sort), which makes
/// the ordering deterministic for a fixed `now`.
pub fn prioritize(tickets: &[Ticket], now: DateTime<Utc>) -> Vec<Ticket> {
    let mut scored: Vec<(u32, &Ticket)> = tickets
        .iter()
        .map(|t| (priority_score(t, now), t))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, t)| t.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ticket(id: &str, impact: &str, urgency: &str, opened: &str) -> Ticket {
        Ticket {
            id: id.to_string(),
            impact: impact.to_string(),
            urgency: urgency.to_string(),
            opened: opened.to_string(),
            ..Ticket::default()
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0).unwrap()
    }

    #[test]
    fn score_combines_impact_urgency_and_age() {
        let now = fixed_now();
        // High/High opened 30h ago: 3 + 3 + 2
        let t = ticket("INC001", "High", "High", "2024-03-01T06:00:00Z");
        assert_eq!(priority_score(&t, now), 8);
        // Medium/Low opened 9h ago: 2 + 1 + 1
        let t = ticket("INC002", "Medium", "Low", "2024-03-02T03:00:00Z");
        assert_eq!(priority_score(&t, now), 4);
        // Low/Low opened just now: 1 + 1
        let t = ticket("INC003", "Low", "Low", "2024-03-02T11:30:00Z");
        assert_eq!(priority_score(&t, now), 2);
        // unknown levels weigh like Low, bad timestamp earns no bonus
        let t = ticket("INC004", "", "Critical", "not a date");
        assert_eq!(priority_score(&t, now), 2);
    }

    #[test]
    fn prioritize_sorts_descending_without_mutating_input() {
        let now = fixed_now();
        let batch = vec![
            ticket("INC001", "Low", "Low", ""),
            ticket("INC002", "High", "High", ""),
            ticket("INC003", "Medium", "Medium", ""),
        ];
        let snapshot = batch.clone();
        let ordered = prioritize(&batch, now);
        assert_eq!(batch, snapshot);
        let ids: Vec<&str> = ordered.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["INC002", "INC003", "INC001"]);
    }

    #[test]
    fn equal_scores_preserve_input_order() {
        let now = fixed_now();
        let batch = vec![
            ticket("INC001", "Medium", "Low", ""),
            ticket("INC002", "Low", "Medium", ""),
            ticket("INC003", "Medium", "Low", ""),
        ];
        let ids: Vec<String> = prioritize(&batch, now)
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["INC001", "INC002", "INC003"]);
    }

    #[test]
    fn output_is_a_permutation_of_input() {
        let now = fixed_now();
        let batch = vec![
            ticket("INC001", "High", "Low", ""),
            ticket("INC002", "Low", "High", ""),
            ticket("INC003", "Low", "Low", "2024-02-01T00:00:00Z"),
        ];
        let ordered = prioritize(&batch, now);
        assert_eq!(ordered.len(), batch.len());
        let mut input_ids: Vec<&str> = batch.iter().map(|t| t.id.as_str()).collect();
        let mut output_ids: Vec<&str> = ordered.iter().map(|t| t.id.as_str()).collect();
        input_ids.sort_unstable();
        output_ids.sort_unstable();
        assert_eq!(input_ids, output_ids);
    }
}
