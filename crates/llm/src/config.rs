use std::env;

use ticketray_analytics::{DEFAULT_ALERT_WINDOW_HOURS, DEFAULT_MAX_SAMPLE_TICKETS, DEFAULT_MIN_FREQUENCY};

/// Tunables for the analysis pipeline and the narrative-generation call.
/// Everything is environment-overridable; the targets at the bottom only
/// feed the fallback narrative templates.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub base_url: String,
    /// Batches smaller than this are refused before any external call.
    pub min_tickets_for_analysis: usize,
    pub max_sample_tickets: usize,
    pub root_cause_min_frequency: usize,
    pub alert_window_hours: f64,
    /// Target average resolution time in hours.
    pub resolution_time_target: f64,
    pub sla_compliance_target: f64,
    pub customer_satisfaction_target: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            temperature: 0.3,
            max_tokens: 2000,
            base_url: "https://api.openai.com/v1".to_string(),
            min_tickets_for_analysis: 5,
            max_sample_tickets: DEFAULT_MAX_SAMPLE_TICKETS,
            root_cause_min_frequency: DEFAULT_MIN_FREQUENCY,
            alert_window_hours: DEFAULT_ALERT_WINDOW_HOURS,
            resolution_time_target: 8.0,
            sla_compliance_target: 95.0,
            customer_satisfaction_target: 4.0,
        }
    }
}

impl AnalysisConfig {
    /// Reads overrides from the environment (a `.env` file is honored).
    /// Unset or unparseable variables keep their defaults.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        let defaults = Self::default();
        Self {
            model: env::var("OPENAI_MODEL").unwrap_or(defaults.model),
            temperature: env_parse("OPENAI_TEMPERATURE", defaults.temperature),
            max_tokens: env_parse("OPENAI_MAX_TOKENS", defaults.max_tokens),
            base_url: env::var("OPENAI_BASE_URL").unwrap_or(defaults.base_url),
            min_tickets_for_analysis: env_parse(
                "MIN_TICKETS_FOR_ANALYSIS",
                defaults.min_tickets_for_analysis,
            ),
            max_sample_tickets: env_parse("MAX_SAMPLE_TICKETS", defaults.max_sample_tickets),
            root_cause_min_frequency: env_parse(
                "ROOT_CAUSE_MIN_FREQUENCY",
                defaults.root_cause_min_frequency,
            ),
            alert_window_hours: env_parse("ALERT_WINDOW_HOURS", defaults.alert_window_hours),
            resolution_time_target: env_parse(
                "RESOLUTION_TIME_TARGET",
                defaults.resolution_time_target,
            ),
            sla_compliance_target: env_parse(
                "SLA_COMPLIANCE_TARGET",
                defaults.sla_compliance_target,
            ),
            customer_satisfaction_target: env_parse(
                "CUSTOMER_SATISFACTION_TARGET",
                defaults.customer_satisfaction_target,
            ),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_analysis_parameters() {
        let config = AnalysisConfig::default();
        assert_eq!(config.model, "gpt-4");
        assert_eq!(config.min_tickets_for_analysis, 5);
        assert_eq!(config.max_sample_tickets, 5);
        assert_eq!(config.root_cause_min_frequency, 2);
        assert_eq!(config.alert_window_hours, 2.0);
        assert_eq!(config.resolution_time_target, 8.0);
    }

    #[test]
    fn env_parse_falls_back_on_garbage() {
        std::env::set_var("TICKETRAY_TEST_PARSE", "not-a-number");
        assert_eq!(env_parse("TICKETRAY_TEST_PARSE", 7usize), 7);
        std::env::set_var("TICKETRAY_TEST_PARSE", "12");
        assert_eq!(env_parse("TICKETRAY_TEST_PARSE", 7usize), 12);
        std::env::remove_var("TICKETRAY_TEST_PARSE");
    }
}
