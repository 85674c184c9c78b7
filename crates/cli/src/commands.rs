use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use ticketray_analytics::{calculate_metrics, detect_recent_spikes, prioritize as rank, priority_score};
use ticketray_core::{read_csv_file, validate_batch, Ticket};
use ticketray_llm::{
    AnalysisConfig, InsightOrchestrator, InsightReport, InsightSource, LlmClient, TicketInsights,
};
use tracing::info;

fn load_batch(file: &Path) -> Result<Vec<Ticket>> {
    let tickets = read_csv_file(file)
        .with_context(|| format!("could not load tickets from {}", file.display()))?;
    info!(count = tickets.len(), file = %file.display(), "loaded ticket batch");
    if let Err(errors) = validate_batch(&tickets) {
        for error in &errors {
            eprintln!("{} {error}", style("error:").red().bold());
        }
        bail!("ticket batch failed validation ({} problems)", errors.len());
    }
    Ok(tickets)
}

pub async fn analyze(file: &Path, offline: bool, json: bool) -> Result<()> {
    let tickets = load_batch(file)?;
    let config = AnalysisConfig::from_env();

    let report = if offline {
        let client = LlmClient::new("offline".to_string(), None)?;
        InsightOrchestrator::new(client, config).generate_offline(&tickets)?
    } else {
        let client = LlmClient::from_env(Some(config.base_url.clone()))?;
        let orchestrator = InsightOrchestrator::new(client, config);

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
        spinner.set_message("generating insights...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        let result = orchestrator.generate_insights(&tickets).await;
        spinner.finish_and_clear();
        result?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

pub fn summary(file: &Path) -> Result<()> {
    let tickets = load_batch(file)?;
    let metrics = calculate_metrics(&tickets);
    let config = AnalysisConfig::from_env();

    println!("{}", style("Ticket summary").bold().underlined());
    println!("  total tickets      {}", metrics.total);
    println!(
        "  resolved           {} ({:.1}%)",
        metrics.resolved, metrics.resolution_rate
    );
    println!("  avg resolution     {:.1} h", metrics.avg_resolution_time);
    println!("  total cost         ${:.2}", metrics.total_cost);

    let alerts = detect_recent_spikes(&tickets, Utc::now(), config.alert_window_hours);
    if alerts.is_empty() {
        println!("\n{}", style("No recent ticket spikes detected.").dim());
    } else {
        println!("\n{}", style("Recent spikes").bold().underlined());
        for alert in alerts {
            println!(
                "  {} {} / {}: {} tickets in the last {:.0}h ({})",
                style("!").yellow().bold(),
                alert.service,
                alert.category,
                alert.count,
                alert.window_hours,
                alert.ticket_ids.join(", ")
            );
        }
    }
    Ok(())
}

pub fn prioritize(file: &Path, limit: usize) -> Result<()> {
    let tickets = load_batch(file)?;
    let now = Utc::now();
    println!("{}", style("Triage order").bold().underlined());
    for ticket in rank(&tickets, now).into_iter().take(limit) {
        println!(
            "  [{}] {}  {:<8} {:<8} {}",
            priority_score(&ticket, now),
            style(&ticket.id).cyan(),
            ticket.impact,
            ticket.urgency,
            ticket.short_description
        );
    }
    Ok(())
}

pub async fn check_key() -> Result<()> {
    let config = AnalysisConfig::from_env();
    let client = LlmClient::from_env(Some(config.base_url))?;
    client.check_api_key().await?;
    println!("{} API key is configured correctly", style("ok:").green().bold());
    Ok(())
}

fn print_report(report: &InsightReport) {
    if report.source == InsightSource::LocalFallback {
        println!(
            "{}",
            style("Narrative service unavailable or skipped; showing locally synthesized insights.")
                .yellow()
        );
    }
    print_insights(&report.insights);
}

fn print_insights(insights: &TicketInsights) {
    let rt = &insights.average_resolution_time;
    println!("\n{}", style("Average resolution time").bold().underlined());
    println!("  {:.1} h ({})", rt.current_average, rt.trend);
    println!("  {}", rt.analysis);

    let dist = &insights.category_distribution;
    println!("\n{}", style("Category distribution").bold().underlined());
    for share in &dist.distribution {
        println!(
            "  {:<24} {:>4}  {:>5.1}%",
            share.category, share.count, share.percentage
        );
    }
    println!("  {}", dist.analysis);

    let costs = &insights.costs_per_category;
    println!("\n{}", style("Costs per category").bold().underlined());
    for cost in &costs.costs {
        println!(
            "  {:<24} total ${:>10.2}  avg ${:>8.2}",
            cost.category, cost.total_cost, cost.average_cost
        );
    }
    println!("  {}", costs.analysis);

    let causes = &insights.identified_root_causes;
    println!("\n{}", style("Identified root causes").bold().underlined());
    for cause in &causes.root_causes {
        println!(
            "  {} (x{}, impact {})",
            style(&cause.cause).cyan(),
            cause.frequency,
            cause.impact
        );
        for recommendation in &cause.recommendations {
            println!("    - {recommendation}");
        }
    }
    println!("  {}", causes.analysis);

    let predictive = &insights.predictive_analysis;
    println!("\n{}", style("Predictive analysis").bold().underlined());
    println!("  {}", predictive.workload_prediction);
    for risk in &predictive.risk_factors {
        println!("  {} {risk}", style("risk:").red());
    }
    println!("  {}", predictive.analysis);

    let perf = &insights.performance_metrics;
    println!("\n{}", style("Performance metrics").bold().underlined());
    println!("  SLA compliance         {:.1}%", perf.sla_compliance);
    println!("  customer satisfaction  {:.1}/5", perf.customer_satisfaction);
    println!("  reopened tickets       {:.1}%", perf.reopened_tickets);
    println!("  team efficiency        {:.0}%", perf.team_efficiency);
    println!("  {}", perf.analysis);
}
