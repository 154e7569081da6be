//! Chatwoot REST payloads not shared with the domain.

use serde::{Deserialize, Serialize};

use crate::domain::nlg::CannedResponse;

#[derive(Debug, Clone, Deserialize)]
pub struct CannedResponseDto {
    #[serde(default)]
    pub short_code: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl CannedResponseDto {
    /// Entries without a short code or content cannot be addressed or rendered.
    pub fn into_domain(self) -> Option<CannedResponse> {
        let short_code = self.short_code.filter(|s| !s.trim().is_empty())?;
        let content = self.content.filter(|c| !c.is_empty())?;
        Some(CannedResponse {
            short_code,
            content,
        })
    }
}

/// `GET .../labels` answer.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelsResponse {
    #[serde(default)]
    pub payload: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LabelsRequest<'a> {
    pub labels: &'a [String],
}

#[derive(Debug, Clone, Serialize)]
pub struct ToggleStatusRequest {
    pub status: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToggleTypingRequest {
    pub typing_status: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canned_response_requires_code_and_content() {
        let dto: CannedResponseDto =
            serde_json::from_value(json!({"id": 1, "short_code": "greet", "content": "Hi"})).unwrap();
        assert_eq!(
            dto.into_domain(),
            Some(CannedResponse {
                short_code: "greet".into(),
                content: "Hi".into()
            })
        );

        let dto: CannedResponseDto = serde_json::from_value(json!({"short_code": "", "content": "Hi"})).unwrap();
        assert_eq!(dto.into_domain(), None);

        let dto: CannedResponseDto = serde_json::from_value(json!({"short_code": "x"})).unwrap();
        assert_eq!(dto.into_domain(), None);
    }

    #[test]
    fn labels_default_to_empty() {
        let labels: LabelsResponse = serde_json::from_value(json!({})).unwrap();
        assert!(labels.payload.is_empty());
    }
}
