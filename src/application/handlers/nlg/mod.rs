//! NLG handlers: the response cache and response generation.

mod generate_response;
mod response_cache;

pub use generate_response::{GenerateResponseHandler, GenerateResponseQuery, GenerateResponseResult};
pub use response_cache::ResponseCache;
