//! Error types shared across the domain layer.

use std::fmt;
use thiserror::Error;

/// External system an upstream call was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpstreamService {
    /// The Chatwoot REST API.
    Chatwoot,
    /// The Rasa HTTP API (REST channel, `/domain`).
    Rasa,
    /// A local domain file standing in for the Rasa `/domain` endpoint.
    DomainFile,
}

impl fmt::Display for UpstreamService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UpstreamService::Chatwoot => "chatwoot",
            UpstreamService::Rasa => "rasa",
            UpstreamService::DomainFile => "domain_file",
        };
        write!(f, "{}", s)
    }
}

/// Failure of a call to the messaging platform or the dialogue engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    #[error("{service} unreachable: {message}")]
    Network {
        service: UpstreamService,
        message: String,
    },

    #[error("{service} request timed out")]
    Timeout { service: UpstreamService },

    #[error("{service} returned status {status}: {body}")]
    Status {
        service: UpstreamService,
        status: u16,
        body: String,
    },

    #[error("{service} response could not be decoded: {message}")]
    Decode {
        service: UpstreamService,
        message: String,
    },
}

impl UpstreamError {
    pub fn network(service: UpstreamService, message: impl Into<String>) -> Self {
        UpstreamError::Network {
            service,
            message: message.into(),
        }
    }

    pub fn timeout(service: UpstreamService) -> Self {
        UpstreamError::Timeout { service }
    }

    pub fn status(service: UpstreamService, status: u16, body: impl Into<String>) -> Self {
        UpstreamError::Status {
            service,
            status,
            body: body.into(),
        }
    }

    pub fn decode(service: UpstreamService, message: impl Into<String>) -> Self {
        UpstreamError::Decode {
            service,
            message: message.into(),
        }
    }

    /// The service that failed.
    pub fn service(&self) -> UpstreamService {
        match self {
            UpstreamError::Network { service, .. }
            | UpstreamError::Timeout { service }
            | UpstreamError::Status { service, .. }
            | UpstreamError::Decode { service, .. } => *service,
        }
    }

    /// Returns true if repeating the request may succeed.
    ///
    /// Network failures, timeouts, rate limiting and 5xx statuses are transient;
    /// client errors and undecodable bodies are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            UpstreamError::Network { .. } | UpstreamError::Timeout { .. } => true,
            UpstreamError::Status { status, .. } => *status == 429 || *status >= 500,
            UpstreamError::Decode { .. } => false,
        }
    }
}
