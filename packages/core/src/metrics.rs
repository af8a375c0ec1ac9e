//! Prometheus metrics registry for the quote relay.
//!
//! [`RelayMetrics`] owns all registered metrics and the [`Registry`] they
//! belong to. Construct it once at startup, wrap in `Arc`, and pass it
//! to the scheduler and the operational endpoint.

use prometheus::{
    Counter, CounterVec, GaugeVec, Histogram, HistogramOpts, Opts, Registry,
};

/// All relay-level Prometheus metrics.
pub struct RelayMetrics {
    /// Completed ticks.
    pub ticks_total: Counter,
    /// Fetch attempts against the provider (success + failure).
    pub fetches_total: Counter,
    /// Failed fetches, labelled by error kind.
    pub fetch_errors_total: CounterVec,
    /// Publish attempts against the broker (success + failure).
    pub publishes_total: Counter,
    /// Failed publishes, labelled by error kind.
    pub publish_errors_total: CounterVec,
    /// Last price successfully relayed, per symbol.
    pub last_price: GaugeVec,
    /// Wall-clock seconds spent on one tick.
    pub tick_duration: Histogram,
    /// The registry that owns all of the above metrics.
    pub registry: Registry,
}

impl RelayMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let ticks_total = Counter::with_opts(Opts::new(
            "quote_relay_ticks_total",
            "Completed relay ticks",
        ))?;

        let fetches_total = Counter::with_opts(Opts::new(
            "quote_relay_fetches_total",
            "Quote fetch attempts",
        ))?;

        let fetch_errors_total = CounterVec::new(
            Opts::new("quote_relay_fetch_errors_total", "Failed quote fetches by kind"),
            &["kind"],
        )?;

        let publishes_total = Counter::with_opts(Opts::new(
            "quote_relay_publishes_total",
            "Broker publish attempts",
        ))?;

        let publish_errors_total = CounterVec::new(
            Opts::new("quote_relay_publish_errors_total", "Failed broker publishes by kind"),
            &["kind"],
        )?;

        let last_price = GaugeVec::new(
            Opts::new("quote_relay_last_price", "Last relayed price per symbol"),
            &["symbol"],
        )?;

        let tick_duration = Histogram::with_opts(
            HistogramOpts::new(
                "quote_relay_tick_duration_seconds",
                "Wall-clock time spent relaying one tick",
            )
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        )?;

        registry.register(Box::new(ticks_total.clone()))?;
        registry.register(Box::new(fetches_total.clone()))?;
        registry.register(Box::new(fetch_errors_total.clone()))?;
        registry.register(Box::new(publishes_total.clone()))?;
        registry.register(Box::new(publish_errors_total.clone()))?;
        registry.register(Box::new(last_price.clone()))?;
        registry.register(Box::new(tick_duration.clone()))?;

        Ok(Self {
            ticks_total,
            fetches_total,
            fetch_errors_total,
            publishes_total,
            publish_errors_total,
            last_price,
            tick_duration,
            registry,
        })
    }

    /// Render all metrics as Prometheus text format (for the `/metrics` endpoint).
    pub fn render(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buf = Vec::new();
        encoder.encode(&metric_families, &mut buf)?;
        Ok(String::from_utf8(buf).unwrap_or_default())
    }
}
