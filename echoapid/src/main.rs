//! Server daemon for EchoAPI

use clap::Parser;
use echoapi_core::prelude::*;
use echoapi_http::HttpAdapter;
use std::future::Future;
use std::io;
use std::process;
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

mod cli;
mod config;

use cli::{Cli, LogFormat};
use config::ServerConfig;

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    // Load configuration
    let config = match ServerConfig::load(&args.config) {
        Ok(config) => config.with_overrides(&args),
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    init_logging(args.verbose, config.log_format);

    info!("Starting echoapid with bind address {}", config.bind_address);

    if let Err(e) = run(config).await {
        error!("Server failed: {}", e);
        process::exit(1);
    }

    info!("Server shut down cleanly");
}

/// `RUST_LOG` wins; otherwise the `-v` count picks the level.
fn init_logging(verbose: u8, format: LogFormat) {
    let log_level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string().to_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn run(config: ServerConfig) -> Result<(), PresentationError> {
    let adapter = Arc::new(HttpAdapter::new(config.http()));
    serve_until(adapter, tokio::signal::ctrl_c()).await
}

/// Run `adapter` until it exits or `shutdown` resolves. A shutdown future
/// that fails leaves the server running.
async fn serve_until<A, F>(adapter: Arc<A>, shutdown: F) -> Result<(), PresentationError>
where
    A: PresentationAdapter + 'static,
    F: Future<Output = io::Result<()>>,
{
    let runner = adapter.clone();
    let mut server = tokio::spawn(async move { runner.start().await });

    tokio::select! {
        result = &mut server => return flatten(result),
        signal = shutdown => match signal {
            Ok(()) => {
                info!("Shutdown signal received");
                adapter.stop().await?;
            }
            Err(e) => error!("Failed to listen for shutdown signal: {}", e),
        },
    }

    flatten(server.await)
}

fn flatten(
    result: Result<Result<(), PresentationError>, tokio::task::JoinError>,
) -> Result<(), PresentationError> {
    result.map_err(|e| PresentationError::ShutdownFailed(format!("Server task failed: {}", e)))?
}
