use serde_json::Value;
use thiserror::Error;

/// Failures talking to the GLPI REST API
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(String),

    #[error("Upstream request timed out: {0}")]
    Timeout(reqwest::Error),

    #[error("Transport error: {0}")]
    Transport(reqwest::Error),

    #[error("Upstream returned HTTP {status}: {detail}")]
    Status { status: u16, detail: Value },

    #[error("Unexpected upstream response: {0}")]
    Decode(String),

    #[error("Pagination did not terminate after {pages} pages")]
    PageLimitExceeded { pages: u64 },
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamError::Timeout(e)
        } else {
            UpstreamError::Transport(e)
        }
    }
}

impl UpstreamError {
    /// Error payload safe to hand back to the caller: the upstream body when one
    /// was received, otherwise the lower-level message.
    pub fn detail(&self) -> Value {
        match self {
            UpstreamError::Status { detail, .. } => detail.clone(),
            other => Value::String(other.to_string()),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            UpstreamError::Transport(e) | UpstreamError::Timeout(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
