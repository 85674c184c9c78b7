//! Local aggregation core for ticketray.
//!
//! Every function here is total and side-effect free: empty groups and
//! division-by-zero cases default to zero or empty output instead of
//! erroring, and no input batch is ever mutated. Time-dependent computations
//! (recency alerts, priority age bonus) take `now` as an argument so results
//! are reproducible.

pub mod distribution;
pub mod metrics;
pub mod patterns;
pub mod prepare;
pub mod priority;

pub use distribution::{
    category_distribution, costs_per_category, distribution_by, CategoryCost, CategoryShare,
};
pub use metrics::{calculate_metrics, TicketMetrics};
pub use patterns::{
    detect_recent_spikes, identify_root_causes, RecentSpikeAlert, RootCause,
    DEFAULT_ALERT_WINDOW_HOURS, DEFAULT_MIN_FREQUENCY,
};
pub use prepare::{prepare_analytics_data, AnalyticsData, SampleTicket, DEFAULT_MAX_SAMPLE_TICKETS};
pub use priority::{prioritize, priority_score};
