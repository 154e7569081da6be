//! NLG error types.

use thiserror::Error;

use crate::domain::foundation::UpstreamError;

/// Errors raised while refreshing response sources.
///
/// None of these reach the end user: the resolver answers with a default
/// response instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NlgError {
    #[error("response source unavailable: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("invalid domain definition: {0}")]
    InvalidDomain(String),
}

impl NlgError {
    pub fn invalid_domain(message: impl Into<String>) -> Self {
        NlgError::InvalidDomain(message.into())
    }
}

/// Why a template could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("no value for placeholder '{0}'")]
    MissingValue(String),

    #[error("unterminated placeholder")]
    Unterminated,
}
