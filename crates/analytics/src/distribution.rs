use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ticketray_core::Ticket;

/// One group in a categorical distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: String,
    pub count: usize,
    pub percentage: f64,
}

/// Cost rollup for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCost {
    pub category: String,
    pub total_cost: f64,
    pub average_cost: f64,
}

/// Groups tickets by `category` and reports count plus percentage of the
/// batch, descending by count. Ties keep first-encounter order.
pub fn category_distribution(tickets: &[Ticket]) -> Vec<CategoryShare> {
    distribution_by(tickets, |t| t.category.as_str())
}

/// Same as [`category_distribution`] but over an arbitrary categorical field.
pub fn distribution_by<'a, F>(tickets: &'a [Ticket], field: F) -> Vec<CategoryShare>
where
    F: Fn(&'a Ticket) -> &'a str,
{
    let total = tickets.len();
    let mut order: Vec<CategoryShare> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for ticket in tickets {
        let key = field(ticket);
        match index.get(key) {
            Some(&i) => order[i].count += 1,
            None => {
                index.insert(key, order.len());
                order.push(CategoryShare {
                    category: key.to_string(),
                    count: 1,
                    percentage: 0.0,
                });
            }
        }
    }

    for share in &mut order {
        share.percentage = share.count as f64 / total as f64 * 100.0;
    }
    // sort_by is stable, so equal counts keep first-encounter order
    order.sort_by(|a, b| b.count.cmp(&a.count));
    order
}

/// Per-category cost totals and averages, descending by total cost.
pub fn costs_per_category(tickets: &[Ticket]) -> Vec<CategoryCost> {
    let mut order: Vec<(String, f64, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for ticket in tickets {
        match index.get(ticket.category.as_str()) {
            Some(&i) => {
                order[i].1 += ticket.cost;
                order[i].2 += 1;
            }
            None => {
                index.insert(ticket.category.as_str(), order.len());
                order.push((ticket.category.clone(), ticket.cost, 1));
            }
        }
    }

    let mut costs: Vec<CategoryCost> = order
        .into_iter()
        .map(|(category, total_cost, count)| CategoryCost {
            category,
            total_cost,
            average_cost: total_cost / count as f64,
        })
        .collect();
    costs.sort_by(|a, b| {
        b.total_cost
            .partial_cmp(&a.total_cost)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    costs
}
