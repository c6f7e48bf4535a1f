use thiserror::Error;

use crate::glpi::UpstreamError;

/// Outcomes of a directory operation other than success
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Required caller-supplied values are missing; raised before any network call
    #[error("{message}")]
    Validation {
        message: String,
        missing: Vec<&'static str>,
    },

    /// The upstream failed; nothing partial is returned
    #[error("{message}: {source}")]
    Upstream {
        message: String,
        #[source]
        source: UpstreamError,
    },

    /// The fetch succeeded but produced nothing to show
    #[error("{0}")]
    NotFound(String),
}

impl ServiceError {
    pub fn upstream(message: impl Into<String>, source: UpstreamError) -> Self {
        ServiceError::Upstream {
            message: message.into(),
            source,
        }
    }
}
