use serde::{Deserialize, Serialize};
use ticketray_analytics::{CategoryCost, CategoryShare, RootCause};

/// Instruction sent as the system message. The response contract is the
/// JSON schema of [`TicketInsights`]; anything that does not parse into it
/// counts as a malformed response.
pub const SYSTEM_PROMPT: &str = r#"You are an expert IT support data analyst. Analyze the provided ticket data and produce structured insights covering:

1. Average resolution time
2. Ticket distribution per category
3. Costs per category
4. Identified root causes
5. Predictive analysis based on the observed patterns
6. Team performance metrics

Respond with a single JSON object matching this schema exactly:
{
  "averageResolutionTime": {"currentAverage": number, "trend": "string", "recommendations": ["string"], "analysis": "string"},
  "categoryDistribution": {"distribution": [{"category": "string", "count": number, "percentage": number}], "topCategories": ["string"], "analysis": "string", "recommendations": ["string"]},
  "costsPerCategory": {"costs": [{"category": "string", "totalCost": number, "averageCost": number}], "totalCost": number, "analysis": "string", "recommendations": ["string"]},
  "identifiedRootCauses": {"rootCauses": [{"cause": "string", "frequency": number, "impact": "string", "recommendations": ["string"]}], "analysis": "string"},
  "predictiveAnalysis": {"workloadPrediction": "string", "resourceOptimization": ["string"], "riskFactors": ["string"], "analysis": "string"},
  "performanceMetrics": {"slaCompliance": number, "customerSatisfaction": number, "reopenedTickets": number, "teamEfficiency": number, "analysis": "string", "recommendations": ["string"]}
}"#;

/// Structured insight object, either authored by the narrative service or
/// synthesized locally on fallback. Numeric fields coming back from the
/// service are schema-checked only and never assumed consistent with the
/// locally computed aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketInsights {
    pub average_resolution_time: ResolutionTimeInsight,
    pub category_distribution: CategoryDistributionInsight,
    pub costs_per_category: CostInsight,
    pub identified_root_causes: RootCauseInsight,
    pub predictive_analysis: PredictiveInsight,
    pub performance_metrics: PerformanceInsight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionTimeInsight {
    pub current_average: f64,
    pub trend: String,
    pub recommendations: Vec<String>,
    pub analysis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDistributionInsight {
    pub distribution: Vec<CategoryShare>,
    pub top_categories: Vec<String>,
    pub analysis: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostInsight {
    pub costs: Vec<CategoryCost>,
    pub total_cost: f64,
    pub analysis: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootCauseInsight {
    pub root_causes: Vec<RootCause>,
    pub analysis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictiveInsight {
    pub workload_prediction: String,
    pub resource_optimization: Vec<String>,
    pub risk_factors: Vec<String>,
    pub analysis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceInsight {
    pub sla_compliance: f64,
    pub customer_satisfaction: f64,
    pub reopened_tickets: f64,
    pub team_efficiency: f64,
    pub analysis: String,
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_wire_schema() {
        let json = r#"{
            "averageResolutionTime": {"currentAverage": 6.2, "trend": "Within target", "recommendations": [], "analysis": "ok"},
            "categoryDistribution": {"distribution": [{"category": "Software", "count": 3, "percentage": 100.0}], "topCategories": ["Software"], "analysis": "ok", "recommendations": []},
            "costsPerCategory": {"costs": [], "totalCost": 0.0, "analysis": "ok", "recommendations": []},
            "identifiedRootCauses": {"rootCauses": [], "analysis": "ok"},
            "predictiveAnalysis": {"workloadPrediction": "flat", "resourceOptimization": [], "riskFactors": [], "analysis": "ok"},
            "performanceMetrics": {"slaCompliance": 94.5, "customerSatisfaction": 4.2, "reopenedTickets": 3.1, "teamEfficiency": 87, "analysis": "ok", "recommendations": []}
        }"#;
        let insights: TicketInsights = serde_json::from_str(json).unwrap();
        assert_eq!(insights.average_resolution_time.current_average, 6.2);
        assert_eq!(insights.category_distribution.top_categories, vec!["Software"]);
        assert_eq!(insights.performance_metrics.team_efficiency, 87.0);
    }

    #[test]
    fn missing_sections_fail_to_parse() {
        let err = serde_json::from_str::<TicketInsights>(r#"{"averageResolutionTime": null}"#);
        assert!(err.is_err());
    }
}
