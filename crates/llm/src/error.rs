use thiserror::Error;
use ticketray_core::ValidationError;

/// Failures at the narrative-service boundary. Each variant renders the
/// distinct user-facing message the dashboard shows for it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LlmError {
    #[error("OPENAI_API_KEY is not configured")]
    MissingApiKey,

    #[error("invalid API credentials: the configured API key was rejected")]
    InvalidApiKey,

    #[error("rate limit exceeded, try again shortly")]
    RateLimited,

    #[error("API quota exhausted: check your plan and billing")]
    QuotaExhausted,

    #[error("could not reach the narrative service: {0}")]
    Connection(String),

    #[error("malformed response from the narrative service: {0}")]
    MalformedResponse(String),

    #[error("narrative service error (status {status}): {message}")]
    Api { status: u16, message: String },
}

impl LlmError {
    /// Maps an HTTP failure to an error variant. Status codes decide the
    /// broad class; the body text is scanned for the known provider
    /// substrings that distinguish quota exhaustion from plain rate
    /// limiting. The substring matching is deliberate: provider bodies
    /// carry the detail, not the status line.
    pub fn from_response(status: u16, body: &str) -> Self {
        if status == 401 || body.contains("invalid_api_key") || body.contains("Incorrect API key") {
            return LlmError::InvalidApiKey;
        }
        if body.contains("insufficient_quota") || body.contains("quota") {
            return LlmError::QuotaExhausted;
        }
        if status == 429 || body.contains("rate limit") || body.contains("Rate limit") {
            return LlmError::RateLimited;
        }
        LlmError::Api {
            status,
            message: body.chars().take(200).collect(),
        }
    }

    pub fn from_transport(err: &reqwest::Error) -> Self {
        LlmError::Connection(err.to_string())
    }

    /// Authentication failures must surface to the caller instead of
    /// degrading to the local fallback.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, LlmError::MissingApiKey | LlmError::InvalidApiKey)
    }
}

/// Top-level failure of an insight request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InsightError {
    #[error("invalid ticket batch: {}", format_validation(.0))]
    InvalidBatch(Vec<ValidationError>),

    #[error("insufficient data: at least {required} tickets are needed for a meaningful analysis, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error(transparent)]
    Llm(#[from] LlmError),
}

fn format_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
