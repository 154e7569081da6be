//! HTTP middleware for axum.
//!
//! - `api_key` - `API-KEY` header check for the model server
//! - `layers` - tracing, request ids and timeouts shared by every service

pub mod api_key;
mod layers;

pub use api_key::{
    api_key_middleware, ApiKeyPresented, ApiKeyRejection, ApiKeyState, ApiKeyStatus,
    RequireApiKey, API_KEY_HEADER,
};
pub use layers::{with_common_layers, with_request_timeout};
