//! API key middleware for the model server.
//!
//! Uploads and directory listings require an `API-KEY` header equal to the
//! configured key. When no key is configured every protected request is
//! refused.
//!
//! ```text
//! Request → api_key_middleware → inserts ApiKeyStatus into extensions
//!                                      ↓
//!                  Handler → RequireApiKey rejects unless authorized
//! ```
//!
//! Downloads stay public, so the middleware never rejects on its own; it only
//! records whether the caller presented the right key.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use secrecy::{ExposeSecret, Secret};
use subtle::ConstantTimeEq;

/// Header carrying the key.
pub const API_KEY_HEADER: &str = "API-KEY";

/// The configured key, if any.
#[derive(Clone)]
pub struct ApiKeyState {
    key: Option<Arc<Secret<String>>>,
}

impl ApiKeyState {
    pub fn new(key: Option<String>) -> Self {
        Self {
            key: key
                .filter(|k| !k.is_empty())
                .map(|k| Arc::new(Secret::new(k))),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.key.is_some()
    }

    /// True only when a key is configured and the headers carry it.
    pub fn authorizes(&self, headers: &HeaderMap) -> bool {
        let Some(expected) = &self.key else {
            return false;
        };
        headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|presented| constant_time_eq(presented, expected.expose_secret()))
    }
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Outcome of the key check, stored in request extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiKeyStatus {
    pub authorized: bool,
}

pub async fn api_key_middleware(
    State(state): State<ApiKeyState>,
    mut request: Request,
    next: Next,
) -> Response {
    let authorized = state.authorizes(request.headers());
    request.extensions_mut().insert(ApiKeyStatus { authorized });
    next.run(request).await
}

/// Extractor for handlers that always need the key.
#[derive(Debug, Clone, Copy)]
pub struct RequireApiKey;

#[axum::async_trait]
impl<S> FromRequestParts<S> for RequireApiKey
where
    S: Send + Sync,
{
    type Rejection = ApiKeyRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<ApiKeyStatus>() {
            Some(status) if status.authorized => Ok(RequireApiKey),
            _ => Err(ApiKeyRejection),
        }
    }
}

/// Extractor reporting whether the key was presented, without rejecting.
#[derive(Debug, Clone, Copy)]
pub struct ApiKeyPresented(pub bool);

#[axum::async_trait]
impl<S> FromRequestParts<S> for ApiKeyPresented
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let authorized = parts
            .extensions
            .get::<ApiKeyStatus>()
            .is_some_and(|status| status.authorized);
        Ok(ApiKeyPresented(authorized))
    }
}

/// 401 with a JSON error body.
#[derive(Debug, Clone, Copy)]
pub struct ApiKeyRejection;

impl IntoResponse for ApiKeyRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "error": "Unauthorized: Invalid API Key, access denied"
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Request as HttpRequest};

    fn headers(key: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(key) = key {
            headers.insert(API_KEY_HEADER, HeaderValue::from_str(key).unwrap());
        }
        headers
    }

    #[test]
    fn matching_key_authorizes() {
        let state = ApiKeyState::new(Some("s3cret".to_string()));
        assert!(state.authorizes(&headers(Some("s3cret"))));
    }

    #[test]
    fn wrong_or_missing_key_does_not_authorize() {
        let state = ApiKeyState::new(Some("s3cret".to_string()));
        assert!(!state.authorizes(&headers(Some("s3creT"))));
        assert!(!state.authorizes(&headers(Some("s3"))));
        assert!(!state.authorizes(&headers(None)));
    }

    #[test]
    fn unconfigured_key_refuses_everyone() {
        let state = ApiKeyState::new(None);
        assert!(!state.is_configured());
        assert!(!state.authorizes(&headers(Some(""))));
        assert!(!state.authorizes(&headers(Some("anything"))));

        let empty = ApiKeyState::new(Some(String::new()));
        assert!(!empty.is_configured());
    }

    #[tokio::test]
    async fn require_api_key_reads_status_from_extensions() {
        let mut request: HttpRequest<()> = HttpRequest::builder().uri("/").body(()).unwrap();
        request.extensions_mut().insert(ApiKeyStatus { authorized: true });
        let (mut parts, _) = request.into_parts();
        assert!(RequireApiKey::from_request_parts(&mut parts, &()).await.is_ok());
    }

    #[tokio::test]
    async fn require_api_key_rejects_without_status() {
        let request: HttpRequest<()> = HttpRequest::builder().uri("/").body(()).unwrap();
        let (mut parts, _) = request.into_parts();
        assert!(RequireApiKey::from_request_parts(&mut parts, &()).await.is_err());

        let ApiKeyPresented(presented) = ApiKeyPresented::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(!presented);
    }

    #[test]
    fn rejection_is_401() {
        assert_eq!(ApiKeyRejection.into_response().status(), StatusCode::UNAUTHORIZED);
    }
}
