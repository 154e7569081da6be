//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `chatwoot` - Chatwoot REST API (messages, labels, canned responses)
//! - `rasa` - Rasa REST channel and domain sources
//! - `storage` - Local model directory
//! - `http` - axum routers for the four services
//! - `upstream` - Shared HTTP client plumbing and retry policy

pub mod chatwoot;
pub mod http;
pub mod rasa;
pub mod storage;
pub mod upstream;

pub use chatwoot::{ChatwootClient, ChatwootConfig};
pub use rasa::{FileDomainSource, RasaConfig, RasaRestChannel, RemoteDomainSource};
pub use storage::LocalArtifactStore;
pub use upstream::RetryPolicy;
