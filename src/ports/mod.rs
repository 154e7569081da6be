//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `MessagingPlatform` / `CannedResponseSource` - Chatwoot
//! - `DialogueEngine` / `DomainSource` - Rasa
//! - `ArtifactStore` - the models directory
//! - `Clock` - current time for working hours

mod artifact_store;
mod clock;
mod dialogue_engine;
mod domain_source;
mod messaging_platform;

pub use artifact_store::{ArtifactStore, StoredItem};
pub use clock::{Clock, SystemClock};
pub use dialogue_engine::DialogueEngine;
pub use domain_source::DomainSource;
pub use messaging_platform::{CannedResponseSource, MessagingPlatform};
