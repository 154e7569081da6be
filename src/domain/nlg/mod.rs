//! Natural language generation domain.
//!
//! Response tables from Chatwoot canned responses and the Rasa domain, the
//! tracker used to render them, and the tiered resolution that always yields
//! a message.

mod domain;
mod errors;
mod resolver;
mod response_table;
mod snapshot;
mod template;
mod tracker;

pub use domain::{DomainDefinition, SlotDefinition};
pub use errors::{NlgError, TemplateError};
pub use resolver::{
    candidate_variants, resolve, Resolution, ResolutionRequest, ResolutionTier,
    DEFAULT_RESPONSE_NAME, DEFAULT_RESPONSE_TEXT,
};
pub use response_table::{CannedResponse, ResponseTable, ResponseVariant, SlotCondition};
pub use snapshot::CacheSnapshot;
pub use template::{render_str, render_variant, TemplateValues};
pub use tracker::Tracker;
