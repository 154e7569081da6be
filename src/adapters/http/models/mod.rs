//! HTTP adapter for the model/artifact directory server.

mod dto;
mod handlers;
mod listing;
mod routes;

pub use dto::MessageResponse;
pub use handlers::{browse_path, browse_root, upload, ModelHandlers};
pub use listing::render_listing;
pub use routes::model_routes;
