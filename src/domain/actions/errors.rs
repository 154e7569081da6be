use thiserror::Error;

use crate::domain::foundation::UpstreamError;

/// Failures of the action server.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    #[error("no registered action named '{0}'")]
    UnknownAction(String),

    #[error("action failed: {0}")]
    Upstream(#[from] UpstreamError),
}
