use thiserror::Error;

use crate::ticket::Ticket;

/// Problems found in a ticket batch before any aggregation runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("no tickets to analyze")]
    EmptyBatch,

    #[error("ticket {index}: required field '{field}' is empty")]
    MissingField { index: usize, field: &'static str },

    #[error("ticket {index}: {field} must be a non-negative number")]
    InvalidNumeric { index: usize, field: &'static str },
}

/// Fields every ticket must carry for the analysis to be meaningful.
const REQUIRED_FIELDS: [&str; 6] = ["id", "status", "category", "service", "impact", "urgency"];

/// Checks a batch and collects every violation instead of stopping at the
/// first, so the caller can report them all at once. An empty batch is the
/// sole error; per-ticket checks are skipped in that case.
pub fn validate_batch(tickets: &[Ticket]) -> Result<(), Vec<ValidationError>> {
    if tickets.is_empty() {
        return Err(vec![ValidationError::EmptyBatch]);
    }

    let mut errors = Vec::new();
    for (index, ticket) in tickets.iter().enumerate() {
        for field in REQUIRED_FIELDS {
            let value = match field {
                "id" => &ticket.id,
                "status" => &ticket.status,
                "category" => &ticket.category,
                "service" => &ticket.service,
                "impact" => &ticket.impact,
                "urgency" => &ticket.urgency,
                _ => unreachable!(),
            };
            if value.trim().is_empty() {
                errors.push(ValidationError::MissingField { index, field });
            }
        }
        if !(ticket.resolution_time >= 0.0) || !ticket.resolution_time.is_finite() {
            errors.push(ValidationError::InvalidNumeric {
                index,
                field: "resolutionTime",
            });
        }
        if !(ticket.cost >= 0.0) || !ticket.cost.is_finite() {
            errors.push(ValidationError::InvalidNumeric { index, field: "cost" });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
