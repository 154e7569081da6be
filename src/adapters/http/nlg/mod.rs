//! HTTP adapter for the NLG endpoint.

mod dto;
mod handlers;
mod routes;

pub use dto::{ChannelField, NlgRequest, NlgTrackerDto};
pub use handlers::{generate, NlgHandlers};
pub use routes::nlg_routes;
