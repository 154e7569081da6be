//! Domain Source Port - Where the engine's response templates and slots come from.

use async_trait::async_trait;

use crate::domain::nlg::{DomainDefinition, NlgError};

#[async_trait]
pub trait DomainSource: Send + Sync {
    async fn load_domain(&self) -> Result<DomainDefinition, NlgError>;
}
