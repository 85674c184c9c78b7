//! Narrative insight generation for ticketray.
//!
//! Wraps an OpenAI-compatible chat endpoint behind [`InsightOrchestrator`]:
//! local aggregates go out as a structured payload, a six-section insight
//! object comes back, and any failure other than rejected credentials
//! degrades to deterministic templated narration.

pub mod client;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod schema;

pub use client::LlmClient;
pub use config::AnalysisConfig;
pub use error::{InsightError, LlmError};
pub use orchestrator::{
    synthesize_fallback_insights, InsightOrchestrator, InsightReport, InsightSource,
};
pub use schema::{TicketInsights, SYSTEM_PROMPT};
