//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod actions;
pub mod bridge;
pub mod models;
pub mod nlg;
