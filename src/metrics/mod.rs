//! Prometheus metrics for the HTTP surface and the fetch pipeline.

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Opts, Registry, TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_requests_in_flight: IntGauge,
    pub http_request_duration_seconds: Histogram,
    pub calendar_fetches_total: IntCounter,
    pub calendar_fetch_failures_total: IntCounter,
    pub cache_hits_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = IntCounter::with_opts(Opts::new(
            "http_requests_total",
            "Total HTTP requests served",
        ))?;
        let http_requests_in_flight = IntGauge::with_opts(Opts::new(
            "http_requests_in_flight",
            "HTTP requests currently being processed",
        ))?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let calendar_fetches_total = IntCounter::with_opts(Opts::new(
            "calendar_fetches_total",
            "Upstream calendar fetches attempted",
        ))?;
        let calendar_fetch_failures_total = IntCounter::with_opts(Opts::new(
            "calendar_fetch_failures_total",
            "Upstream calendar fetches that failed",
        ))?;
        let cache_hits_total = IntCounter::with_opts(Opts::new(
            "cache_hits_total",
            "Calendar requests served from the TTL cache",
        ))?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(calendar_fetches_total.clone()))?;
        registry.register(Box::new(calendar_fetch_failures_total.clone()))?;
        registry.register(Box::new(cache_hits_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_requests_in_flight,
            http_request_duration_seconds,
            calendar_fetches_total,
            calendar_fetch_failures_total,
            cache_hits_total,
        })
    }

    /// Render the registry in Prometheus text exposition format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
