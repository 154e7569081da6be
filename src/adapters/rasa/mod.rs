//! Rasa adapter: REST channel dispatch and domain loading.

mod config;
mod domain_source;
mod rest_channel;

pub use config::RasaConfig;
pub use domain_source::{FileDomainSource, RemoteDomainSource};
pub use rest_channel::RasaRestChannel;
