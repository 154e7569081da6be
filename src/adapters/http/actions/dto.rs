//! Response bodies of the action server.

use serde::{Deserialize, Serialize};

/// Error body naming the action that was requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionErrorResponse {
    pub error: String,
    pub action_name: String,
}

impl ActionErrorResponse {
    pub fn new(error: impl Into<String>, action_name: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            action_name: action_name.into(),
        }
    }
}

/// One entry of `GET /actions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionInfo {
    pub name: String,
}
