use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::ticket::Ticket;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read ticket file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV input: {0}")]
    Csv(#[from] csv::Error),

    #[error("ticket file has no header row")]
    MissingHeader,
}

/// Reads a ticket batch from a CSV export. The first row is a header naming
/// fields in the dashboard's camelCase schema; columns the schema does not
/// know are ignored and missing columns become empty strings. The numeric
/// columns fall back to 0 when a cell does not parse.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Ticket>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if headers.is_empty() {
        return Err(IngestError::MissingHeader);
    }
    let columns: HashMap<&str, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (name, idx))
        .collect();

    let mut tickets = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        tickets.push(ticket_from_record(&record, &columns));
    }
    debug!(count = tickets.len(), "loaded tickets from CSV");
    Ok(tickets)
}

pub fn read_csv_file(path: &Path) -> Result<Vec<Ticket>, IngestError> {
    let file = std::fs::File::open(path)?;
    read_csv(file)
}

fn ticket_from_record(record: &csv::StringRecord, columns: &HashMap<&str, usize>) -> Ticket {
    let text = |name: &str| -> String {
        columns
            .get(name)
            .and_then(|&idx| record.get(idx))
            .unwrap_or("")
            .to_string()
    };
    let number = |name: &str| -> f64 {
        columns
            .get(name)
            .and_then(|&idx| record.get(idx))
            .and_then(|cell| cell.trim().parse::<f64>().ok())
            .unwrap_or(0.0)
    };

    Ticket {
        id: text("id"),
        parent_service_request: text("parentServiceRequest"),
        status: text("status"),
        user: text("user"),
        contact_type: text("contactType"),
        service: text("service"),
        configuration_item: text("configurationItem"),
        category: text("category"),
        sub_category: text("subCategory"),
        caused_by_change: text("causedByChange"),
        impact: text("impact"),
        urgency: text("urgency"),
        assignment_group: text("assignmentGroup"),
        assigned_to: text("assignedTo"),
        it_crisis: text("itCrisis"),
        supplier: text("supplier"),
        external_reference: text("externalReference"),
        short_description: text("shortDescription"),
        description: text("description"),
        close_code: text("closeCode"),
        closure_notes: text("closureNotes"),
        work_notes: text("workNotes"),
        additional_comments: text("additionalComments"),
        opened: text("opened"),
        opened_by: text("openedBy"),
        resolved: text("resolved"),
        resolved_by: text("resolvedBy"),
        watch_list: text("watchList"),
        correlation_id: text("correlationId"),
        sap_implementation_status: text("sapImplementationStatus"),
        follow_up: text("followUp"),
        three_strike_rule: text("threeStrikeRule"),
        due_date: text("dueDate"),
        reason_for_waiting: text("reasonForWaiting"),
        actions_taken: text("actionsTaken"),
        active: text("active"),
        resolution_time: number("resolutionTime"),
        cost: number("cost"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_headered_csv_with_quoted_commas() {
        let data = "\
id,status,category,service,impact,urgency,shortDescription,resolutionTime,cost
INC001,Resolved,Infrastructure,Email Service,High,High,\"Outage, building A\",4.5,250
INC002,Open,Software,CRM,Low,Medium,License expired,,abc
";
        let tickets = read_csv(data.as_bytes()).unwrap();
        assert_eq!(tickets.len(), 2);
        assert_eq!(tickets[0].short_description, "Outage, building A");
        assert_eq!(tickets[0].resolution_time, 4.5);
        assert_eq!(tickets[0].cost, 250.0);
        // unparseable numerics fall back to zero
        assert_eq!(tickets[1].resolution_time, 0.0);
        assert_eq!(tickets[1].cost, 0.0);
        // unmapped columns stay empty
        assert_eq!(tickets[1].assignment_group, "");
    }

    #[test]
    fn unknown_columns_are_ignored() {
        let data = "id,status,mysteryColumn\nINC001,Open,42\n";
        let tickets = read_csv(data.as_bytes()).unwrap();
        assert_eq!(tickets[0].id, "INC001");
        assert_eq!(tickets[0].status, "Open");
    }

    #[test]
    fn short_rows_do_not_fail() {
        let data = "id,status,category,cost\nINC001,Open\n";
        let tickets = read_csv(data.as_bytes()).unwrap();
        assert_eq!(tickets[0].category, "");
        assert_eq!(tickets[0].cost, 0.0);
    }
}
