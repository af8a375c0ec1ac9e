//! Quote relay scheduler.
//!
//! Drives the main loop: each tick walks the tracked symbols in their
//! configured order, fetches a price from the provider and publishes it to
//! the broker. Failures are logged per symbol and never stop the loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::metrics::RelayMetrics;
use crate::relay::{QuoteProvider, TrackedSymbols, UpdatePublisher, UpdateRecord};

/// Outcome counts for one tick.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub published: usize,
    pub fetch_failures: usize,
    pub publish_failures: usize,
    /// Shutdown was observed before every symbol was visited.
    pub interrupted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SymbolOutcome {
    Published,
    FetchFailed,
    PublishFailed,
}

/// Run the relay loop.
///
/// The first tick fires one `interval` after start. A tick that overruns
/// pushes the next one back rather than bunching ticks up, so ticks never
/// overlap.
///
/// Runs until `shutdown` flips to `true` or its sender is dropped. The flag
/// is checked between ticks and between symbols; a symbol already in flight
/// is finished first.
pub async fn run_relay(
    provider: Arc<dyn QuoteProvider + Send + Sync>,
    publisher: Arc<dyn UpdatePublisher + Send + Sync>,
    symbols: TrackedSymbols,
    interval: Duration,
    metrics: Arc<RelayMetrics>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tracing::info!(
        "Relay started (provider: {}, broker: {}, symbols: {}, interval: {:?})",
        provider.provider_name(),
        publisher.destination(),
        symbols.len(),
        interval,
    );

    loop {
        if *shutdown.borrow() {
            break;
        }

        tokio::select! {
            _ = ticker.tick() => {}

            changed = shutdown.changed() => {
                if changed.is_err() {
                    break;
                }
                continue;
            }
        }

        relay_once(
            provider.as_ref(),
            publisher.as_ref(),
            &symbols,
            &metrics,
            &shutdown,
        )
        .await;
    }

    tracing::info!("Relay stopped cleanly");
}

/// Execute a single tick over every tracked symbol.
pub async fn relay_once(
    provider: &(dyn QuoteProvider + Send + Sync),
    publisher: &(dyn UpdatePublisher + Send + Sync),
    symbols: &TrackedSymbols,
    metrics: &RelayMetrics,
    shutdown: &watch::Receiver<bool>,
) -> TickReport {
    let started = Instant::now();
    let mut report = TickReport::default();

    for symbol in symbols.iter() {
        if *shutdown.borrow() {
            report.interrupted = true;
            break;
        }

        match relay_symbol(provider, publisher, symbol, metrics).await {
            SymbolOutcome::Published => report.published += 1,
            SymbolOutcome::FetchFailed => report.fetch_failures += 1,
            SymbolOutcome::PublishFailed => report.publish_failures += 1,
        }
    }

    let elapsed = started.elapsed();
    metrics.ticks_total.inc();
    metrics.tick_duration.observe(elapsed.as_secs_f64());

    tracing::info!(
        published = report.published,
        fetch_failures = report.fetch_failures,
        publish_failures = report.publish_failures,
        elapsed_ms = elapsed.as_millis() as u64,
        "Tick complete"
    );

    report
}

async fn relay_symbol(
    provider: &(dyn QuoteProvider + Send + Sync),
    publisher: &(dyn UpdatePublisher + Send + Sync),
    symbol: &str,
    metrics: &RelayMetrics,
) -> SymbolOutcome {
    metrics.fetches_total.inc();

    let price = match provider.fetch_price(symbol).await {
        Ok(price) => price,
        Err(err) => {
            metrics.fetch_errors_total.with_label_values(&[err.kind()]).inc();
            tracing::warn!(symbol, error = %err, "Error fetching quote, skipping symbol this tick");
            return SymbolOutcome::FetchFailed;
        }
    };

    let record = UpdateRecord::observed_now(symbol, price);

    metrics.publishes_total.inc();
    match publisher.publish(&record).await {
        Ok(()) => {
            metrics.last_price.with_label_values(&[symbol]).set(record.price);
            tracing::info!(
                symbol,
                price = record.price,
                timestamp = %record.timestamp,
                "Successfully sent update"
            );
            SymbolOutcome::Published
        }
        Err(err) => {
            metrics.publish_errors_total.with_label_values(&[err.kind()]).inc();
            tracing::error!(symbol, price, error = %err, "Error sending update");
            SymbolOutcome::PublishFailed
        }
    }
}
