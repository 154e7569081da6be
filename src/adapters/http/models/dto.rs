//! Response bodies of the model server.

use serde::{Deserialize, Serialize};

/// `{"msg": ...}` body used by upload responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn uploaded() -> Self {
        Self {
            msg: "File uploaded successfully".to_string(),
        }
    }

    pub fn not_allowed() -> Self {
        Self {
            msg: "No file or file extension not allowed".to_string(),
        }
    }
}
