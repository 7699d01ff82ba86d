use prometheus::{Histogram, HistogramOpts, IntCounterVec, Opts, Registry};
use std::sync::LazyLock;

pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

// Lookups by the status returned to the caller
pub static LOOKUPS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new("lnaddr_lookups_total", "Total number of address lookups"),
        &["status"],
    )
    .unwrap()
});

// Discovery fetches by endpoint (lnurlp/keysend) and outcome
pub static UPSTREAM_FETCHES_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "lnaddr_upstream_fetches_total",
            "Total number of discovery fetches",
        ),
        &["endpoint", "outcome"],
    )
    .unwrap()
});

pub static LOOKUP_LATENCY: LazyLock<Histogram> = LazyLock::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "lnaddr_lookup_latency_seconds",
            "End-to-end lookup latency, both fetches included",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
    )
    .unwrap()
});

/// Register all metrics with the registry
pub fn register_metrics() -> Result<(), prometheus::Error> {
    REGISTRY.register(Box::new(LOOKUPS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(UPSTREAM_FETCHES_TOTAL.clone()))?;
    REGISTRY.register(Box::new(LOOKUP_LATENCY.clone()))?;
    Ok(())
}

pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Gather the registry in Prometheus text exposition format.
pub fn render() -> Result<String, prometheus::Error> {
    prometheus::TextEncoder::new().encode_to_string(&REGISTRY.gather())
}
