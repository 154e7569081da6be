//! Service assembly: wires adapters and handlers into a router per service
//! and runs it.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use thiserror::Error;

use crate::adapters::http::{
    action_routes, bridge_routes, model_routes, nlg_routes, with_common_layers,
    with_request_timeout, ActionHandlers, ApiKeyState, BridgeHandlers, ModelHandlers, NlgHandlers,
};
use crate::adapters::{
    ChatwootClient, ChatwootConfig, FileDomainSource, LocalArtifactStore, RasaConfig,
    RasaRestChannel, RemoteDomainSource, RetryPolicy,
};
use crate::application::{
    builtin_registry, BrowseArtifactsHandler, GenerateResponseHandler, HandleInboundEventHandler,
    ResponseCache, RunActionHandler, UploadArtifactHandler,
};
use crate::config::{AppConfig, Service, ValidationError};
use crate::domain::artifacts::ArtifactError;
use crate::domain::foundation::UpstreamError;
use crate::ports::{DomainSource, SystemClock};

/// Failures while assembling or running a service.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ValidationError),

    #[error("client setup failed: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("model directory unavailable: {0}")]
    Storage(#[from] ArtifactError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Validates the configuration for `service` and builds its router with the
/// common layers applied.
///
/// The bridge and NLG routers carry no request timeout: they always answer
/// once their upstream calls finish, and those are bounded by the client
/// timeouts.
pub async fn build_router(service: Service, config: &AppConfig) -> Result<Router, StartupError> {
    config.validate_for(service)?;

    let router = match service {
        Service::Webhook => webhook_router(config)?,
        Service::Nlg => nlg_router(config).await?,
        Service::Models => models_router(config).await?,
        Service::Actions => {
            with_request_timeout(actions_router(config)?, config.server.request_timeout())
        }
    };

    Ok(with_common_layers(router))
}

/// Binds `addr` and serves `router` until ctrl-c.
pub async fn serve(service: Service, router: Router, addr: SocketAddr) -> Result<(), StartupError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(service = %service, address = %addr, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!(service = %service, "Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}

fn chatwoot_client(config: &AppConfig) -> Result<Arc<ChatwootClient>, StartupError> {
    let settings = &config.chatwoot;
    let chatwoot = ChatwootConfig::new(&settings.url, settings.api_key.clone().unwrap_or_default())
        .with_account_id(&settings.account_id)
        .with_timeout(settings.timeout())
        .with_retry(RetryPolicy::new(config.rasa.max_retries));
    Ok(Arc::new(ChatwootClient::new(chatwoot)?))
}

fn rasa_config(config: &AppConfig) -> RasaConfig {
    RasaConfig::new(&config.rasa.url)
        .with_token(config.rasa.token.clone())
        .with_timeout(config.rasa.timeout())
        .with_retry(RetryPolicy::new(config.rasa.max_retries))
}

fn webhook_router(config: &AppConfig) -> Result<Router, StartupError> {
    let platform = chatwoot_client(config)?;
    let engine = Arc::new(RasaRestChannel::new(rasa_config(config))?);
    let handler = HandleInboundEventHandler::new(engine, platform);
    Ok(bridge_routes(BridgeHandlers::new(Arc::new(handler))))
}

async fn nlg_router(config: &AppConfig) -> Result<Router, StartupError> {
    let canned = chatwoot_client(config)?;
    let domain: Arc<dyn DomainSource> = match &config.nlg.domain_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Reading domain from file");
            Arc::new(FileDomainSource::new(path))
        }
        None => Arc::new(RemoteDomainSource::new(rasa_config(config))?),
    };

    let cache = Arc::new(ResponseCache::new(canned, domain, config.nlg.refresh_interval()));
    if let Err(e) = cache.refresh().await {
        tracing::warn!(error = %e, "Initial response refresh failed, retrying on first request");
    }

    let handler = GenerateResponseHandler::new(cache);
    Ok(nlg_routes(NlgHandlers::new(Arc::new(handler))))
}

async fn models_router(config: &AppConfig) -> Result<Router, StartupError> {
    let models = &config.models;
    let store = Arc::new(LocalArtifactStore::new(&models.models_dir));
    store.ensure_root().await?;

    if !models.has_api_key() {
        tracing::warn!("No model server API key configured, uploads and listings are refused");
    }

    let handlers = ModelHandlers::new(
        Arc::new(BrowseArtifactsHandler::new(store.clone())),
        Arc::new(UploadArtifactHandler::new(store, models.allowed_extensions())),
    );
    Ok(model_routes(
        handlers,
        ApiKeyState::new(models.api_key.clone()),
        models.max_request_size_bytes(),
        config.server.request_timeout(),
    ))
}

fn actions_router(config: &AppConfig) -> Result<Router, StartupError> {
    let platform = chatwoot_client(config)?;
    let working_hours = config.actions.working_hours()?;
    tracing::info!(working_hours = %working_hours, "Action server working hours (UTC)");

    let registry = builtin_registry(platform, Arc::new(SystemClock), working_hours);
    let handler = RunActionHandler::new(Arc::new(registry));
    Ok(action_routes(ActionHandlers::new(Arc::new(handler))))
}
