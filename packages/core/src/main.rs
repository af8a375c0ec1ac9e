use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use tokio::sync::watch;

use quote_relay::api;
use quote_relay::cli::Cli;
use quote_relay::config::Config;
use quote_relay::error::AppError;
use quote_relay::logging::init_logging;
use quote_relay::metrics::RelayMetrics;
use quote_relay::relay::{QuoteProvider, UpdatePublisher};
use quote_relay::scheduler::run_relay;
use quote_relay::services::{
    alphavantage::AlphaVantageClient, broker::BrokerClient, build_http_client,
};

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    let config = Config::from_env()
        .and_then(|config| config.with_cli(&cli))
        .map_err(AppError::Config)
        .unwrap_or_else(|err| {
            tracing::error!("{}", err);
            std::process::exit(1);
        });

    tracing::info!("Service started with config: {:?}", config);

    if let Err(err) = run(config).await {
        tracing::error!("{}", err);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), AppError> {
    let http = build_http_client(config.http_timeout())?;

    let provider: Arc<dyn QuoteProvider + Send + Sync> = Arc::new(AlphaVantageClient::new(
        config.provider_url.clone(),
        config.api_key.clone(),
        http.clone(),
    ));
    let publisher: Arc<dyn UpdatePublisher + Send + Sync> =
        Arc::new(BrokerClient::new(config.broker_url.clone(), http));

    let metrics = Arc::new(
        RelayMetrics::new().map_err(|err| AppError::Server(format!("metrics: {}", err)))?,
    );

    if let Some(addr) = config.listen_addr {
        api::start_ops_endpoint(addr, metrics.clone()).await;
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received. Stopping relay.");
        let _ = shutdown_tx.send(true);
    });

    run_relay(
        provider,
        publisher,
        config.symbols.clone(),
        config.poll_interval(),
        metrics,
        shutdown_rx,
    )
    .await;

    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix. Never resolves if no handler
/// could be installed.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to listen for SIGTERM: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
