//! chatwoot-rasa - runs one of the Chatwoot/Rasa integration services.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chatwoot_rasa::config::{AppConfig, ServerConfig, Service};
use chatwoot_rasa::server::{build_router, serve};

#[derive(Parser)]
#[command(name = "chatwoot-rasa", version, about = "Chatwoot and Rasa integration services")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Chatwoot agent bot webhook bridge
    Webhook(ServeArgs),
    /// NLG server rendering responses for Rasa
    Nlg(ServeArgs),
    /// Model directory server
    Models(ServeArgs),
    /// Custom action server
    Actions(ServeArgs),
}

#[derive(clap::Args)]
struct ServeArgs {
    /// Port to listen on, overriding the configured one
    #[arg(short, long)]
    port: Option<u16>,
}

impl Command {
    fn service(&self) -> Service {
        match self {
            Command::Webhook(_) => Service::Webhook,
            Command::Nlg(_) => Service::Nlg,
            Command::Models(_) => Service::Models,
            Command::Actions(_) => Service::Actions,
        }
    }

    fn port(&self) -> Option<u16> {
        match self {
            Command::Webhook(args)
            | Command::Nlg(args)
            | Command::Models(args)
            | Command::Actions(args) => args.port,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.server);

    let mut runtime = tokio::runtime::Builder::new_multi_thread();
    runtime.enable_all();
    if let Some(workers) = config.server.workers {
        runtime.worker_threads(workers);
    }
    let runtime = runtime.build().context("Failed to start async runtime")?;

    runtime.block_on(run(cli.command, config))
}

async fn run(command: Command, config: AppConfig) -> Result<()> {
    let service = command.service();
    let port = command.port().unwrap_or_else(|| config.port_for(service));
    let addr = config
        .server
        .socket_addr(port)
        .context("Invalid bind address")?;

    tracing::info!(
        service = %service,
        version = env!("CARGO_PKG_VERSION"),
        "Starting"
    );

    let router = build_router(service, &config)
        .await
        .with_context(|| format!("Failed to start the {} service", service))?;
    serve(service, router, addr).await?;
    Ok(())
}

/// `RUST_LOG` wins over the configured level; `debug` forces debug output.
fn init_tracing(server: &ServerConfig) {
    let filter = if server.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(server.log_filter()))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if server.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
