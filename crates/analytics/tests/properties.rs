use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use ticketray_analytics::{
    calculate_metrics, category_distribution, identify_root_causes, prioritize,
};
use ticketray_core::Ticket;

fn arb_ticket() -> impl Strategy<Value = Ticket> {
    (
        "[A-Z]{3}[0-9]{4}",
        prop::sample::select(vec!["Open", "In Progress", "Resolved", "Closed"]),
        prop::sample::select(vec!["Hardware", "Software", "Network", "Infrastructure"]),
        prop::sample::select(vec!["Email Service", "CRM", "VPN", "SAP"]),
        prop::sample::select(vec!["High", "Medium", "Low"]),
        prop::sample::select(vec!["High", "Medium", "Low"]),
        0.0f64..200.0,
        0.0f64..5000.0,
    )
        .prop_map(
            |(id, status, category, service, impact, urgency, resolution_time, cost)| Ticket {
                id,
                status: status.to_string(),
                category: category.to_string(),
                service: service.to_string(),
                impact: impact.to_string(),
                urgency: urgency.to_string(),
                resolution_time,
                cost,
                ..Ticket::default()
            },
        )
}

proptest! {
    #[test]
    fn distribution_percentages_sum_to_hundred(batch in prop::collection::vec(arb_ticket(), 1..50)) {
        let sum: f64 = category_distribution(&batch).iter().map(|s| s.percentage).sum();
        prop_assert!((sum - 100.0).abs() < 1e-6);
    }

    #[test]
    fn average_matches_positive_subset(batch in prop::collection::vec(arb_ticket(), 0..50)) {
        let metrics = calculate_metrics(&batch);
        let timed: Vec<f64> = batch
            .iter()
            .filter(|t| t.resolution_time > 0.0)
            .map(|t| t.resolution_time)
            .collect();
        if timed.is_empty() {
            prop_assert_eq!(metrics.avg_resolution_time, 0.0);
        } else {
            let mean = timed.iter().sum::<f64>() / timed.len() as f64;
            prop_assert_eq!(metrics.avg_resolution_time, mean);
        }
    }

    #[test]
    fn root_causes_respect_threshold_and_membership(batch in prop::collection::vec(arb_ticket(), 0..50)) {
        for cause in identify_root_causes(&batch, 2) {
            prop_assert!(cause.frequency >= 2);
            let members = batch
                .iter()
                .filter(|t| format!("{} - {}", t.service, t.category) == cause.cause)
                .count();
            prop_assert_eq!(members, cause.frequency);
        }
    }

    #[test]
    fn prioritize_is_a_sorted_permutation(batch in prop::collection::vec(arb_ticket(), 0..50)) {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let ordered = prioritize(&batch, now);
        prop_assert_eq!(ordered.len(), batch.len());

        let mut input_ids: Vec<String> = batch.iter().map(|t| t.id.clone()).collect();
        let mut output_ids: Vec<String> = ordered.iter().map(|t| t.id.clone()).collect();
        input_ids.sort();
        output_ids.sort();
        prop_assert_eq!(input_ids, output_ids);

        let scores: Vec<u32> = ordered
            .iter()
            .map(|t| ticketray_analytics::priority_score(t, now))
            .collect();
        prop_assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn aggregators_are_idempotent(batch in prop::collection::vec(arb_ticket(), 0..30)) {
        let snapshot = batch.clone();
        let first = calculate_metrics(&batch);
        let second = calculate_metrics(&batch);
        prop_assert_eq!(first, second);
        prop_assert_eq!(category_distribution(&batch), category_distribution(&batch));
        prop_assert_eq!(identify_root_causes(&batch, 2), identify_root_causes(&batch, 2));
        prop_assert_eq!(&batch, &snapshot);
    }
}
