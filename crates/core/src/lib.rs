//! Domain models and input contracts for ticketray.
//!
//! Holds the `Ticket` record shape shared by every other crate, plus batch
//! validation and CSV ingest. Nothing here performs aggregation or talks to
//! the network.

pub mod ingest;
pub mod ticket;
pub mod validate;

pub use ingest::{read_csv, read_csv_file, IngestError};
pub use ticket::{parse_timestamp, status, Level, Ticket};
pub use validate::{validate_batch, ValidationError};
